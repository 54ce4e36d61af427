//! Common functionality for Carbon Sense.
#![warn(missing_docs)]
use std::path::PathBuf;

pub mod activity;
pub mod category;
pub mod cli;
pub mod emissions;
pub mod input;
pub mod log;
pub mod output;
pub mod settings;
pub mod summary;
pub mod units;

#[cfg(test)]
mod fixture;

/// Get the path to the folder where program configuration is stored
pub fn get_carbonsense_config_dir() -> PathBuf {
    let mut path = dirs::config_dir().expect("Could not determine the user config directory");
    path.push("carbonsense");

    path
}
