//! Common routines for handling input data.
use crate::activity::ActivityInputs;
use anyhow::{Context, Result};
use log::debug;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Read a TOML file at the specified path.
///
/// # Arguments
///
/// * `file_path` - Path to the TOML file
///
/// # Returns
///
/// * The deserialised TOML data or an error if the file could not be read or parsed.
pub fn read_toml<T: DeserializeOwned>(file_path: &Path) -> Result<T> {
    let toml_str = fs::read_to_string(file_path).with_context(|| input_err_msg(file_path))?;
    let toml_data = toml::from_str(&toml_str).with_context(|| input_err_msg(file_path))?;
    Ok(toml_data)
}

/// Format an error message to include the file path. To be used with `anyhow::Context`.
pub fn input_err_msg<P: AsRef<Path>>(file_path: P) -> String {
    format!("Error reading {}", file_path.as_ref().display())
}

/// Parse and validate activity data from a TOML string.
///
/// Fields which are not present take their default values. Unknown fields are an error.
pub fn parse_activity_inputs(toml_str: &str) -> Result<ActivityInputs> {
    let inputs: ActivityInputs = toml::from_str(toml_str)?;
    inputs.validate()?;

    Ok(inputs)
}

/// Read and validate activity data from the specified TOML file
pub fn read_activity_inputs(file_path: &Path) -> Result<ActivityInputs> {
    let inputs: ActivityInputs = read_toml(file_path)?;
    inputs
        .validate()
        .with_context(|| input_err_msg(file_path))?;
    debug!("Read activity data from {}", file_path.display());

    Ok(inputs)
}

/// Load activity data from the given file, or use the default values if no file is given.
///
/// The inputs are not validated here, so that command-line overrides can be applied first.
pub fn load_activity_inputs(file_path: Option<&Path>) -> Result<ActivityInputs> {
    let Some(file_path) = file_path else {
        debug!("No input file given; using default activity data");
        return Ok(ActivityInputs::default());
    };

    read_toml(file_path)
}
