// Event system test module
#[cfg(test)]
mod loop_tests;
#[cfg(test)]
mod payload_tests;
