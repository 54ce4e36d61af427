//! Fixtures for tests
use crate::activity::ActivityInputs;
use crate::emissions::{EmissionsResult, calculate_emissions};
use rstest::fixture;

/// Assert that an error with the given message occurs
macro_rules! assert_error {
    ($result:expr, $msg:expr) => {
        assert_eq!(
            $result.unwrap_err().chain().next().unwrap().to_string(),
            $msg
        );
    };
}
pub(crate) use assert_error;

#[fixture]
pub fn default_inputs() -> ActivityInputs {
    ActivityInputs::default()
}

#[fixture]
pub fn default_result(default_inputs: ActivityInputs) -> EmissionsResult {
    calculate_emissions(&default_inputs)
}

#[fixture]
pub fn zero_result() -> EmissionsResult {
    calculate_emissions(&ActivityInputs::zero())
}
