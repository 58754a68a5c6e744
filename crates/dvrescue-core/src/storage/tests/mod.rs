mod local_tests;
mod paths_tests;
mod settings_tests;
