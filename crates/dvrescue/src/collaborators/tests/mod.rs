mod data_model_tests;
mod launcher_tests;
