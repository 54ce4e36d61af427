//! Code related to CLI interface for working with activity data files
use crate::activity::ActivityInputs;
use crate::input::read_activity_inputs;
use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::{Path, PathBuf};

/// Subcommands for activity data files
#[derive(Subcommand)]
pub enum InputsSubcommands {
    /// Write the contents of an activity data file with default values to the console
    DumpDefault,
    /// Check that an activity data file is valid
    Check {
        /// Path to the activity data file
        input_file: PathBuf,
    },
}

impl InputsSubcommands {
    /// Execute the supplied inputs subcommand
    pub fn execute(self) -> Result<()> {
        match self {
            Self::DumpDefault => handle_dump_default_command()?,
            Self::Check { input_file } => handle_check_command(&input_file)?,
        }

        Ok(())
    }
}

/// Handle the `dump-default` command
fn handle_dump_default_command() -> Result<()> {
    print!("{}", ActivityInputs::default().to_toml()?);

    Ok(())
}

/// Handle the `check` command
pub fn handle_check_command(input_path: &Path) -> Result<()> {
    read_activity_inputs(input_path).context("Activity data is invalid.")?;
    println!("{} is valid", input_path.display());

    Ok(())
}
