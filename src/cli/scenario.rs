//! Code related to the bundled scenarios and the CLI commands for interacting with them.
use super::{CalculateOpts, calculate_and_report};
use crate::activity::ActivityInputs;
use crate::emissions::EmissionsResult;
use crate::input::parse_activity_inputs;
use crate::output::get_scenario_output_dir;
use crate::settings::Settings;
use anyhow::{Context, Result, ensure};
use clap::Subcommand;
use include_dir::{Dir, include_dir};
use itertools::Itertools;
use std::fs;
use std::path::{Path, PathBuf};

/// The directory containing the bundled scenarios.
static SCENARIOS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/scenarios");

/// The name of the activity data file in each scenario
const SCENARIO_INPUTS_FILE_NAME: &str = "inputs.toml";

/// The name of the description file in each scenario
const SCENARIO_README_FILE_NAME: &str = "README.txt";

/// The available subcommands for managing bundled scenarios.
#[derive(Subcommand)]
pub enum ScenarioSubcommands {
    /// List available scenarios.
    List,
    /// Provide information about the specified scenario.
    Info {
        /// The name of the scenario.
        name: String,
    },
    /// Extract a scenario's activity data file.
    Extract {
        /// The name of the scenario to extract.
        name: String,
        /// The destination file. Defaults to `<name>.toml`.
        new_path: Option<PathBuf>,
    },
    /// Calculate emissions for a scenario.
    Run {
        /// The name of the scenario to run.
        name: String,
        /// Other calculation options
        #[command(flatten)]
        opts: CalculateOpts,
    },
}

impl ScenarioSubcommands {
    /// Execute the supplied scenario subcommand
    pub fn execute(self) -> Result<()> {
        match self {
            Self::List => handle_scenario_list_command(),
            Self::Info { name } => handle_scenario_info_command(&name)?,
            Self::Extract { name, new_path } => {
                handle_scenario_extract_command(&name, new_path.as_deref())?;
            }
            Self::Run { name, opts } => {
                handle_scenario_run_command(&name, &opts, None)?;
            }
        }

        Ok(())
    }
}

/// The names of all bundled scenarios, in alphabetical order
pub fn scenario_names() -> Vec<String> {
    SCENARIOS_DIR
        .dirs()
        .filter_map(|dir| dir.path().to_str())
        .map(String::from)
        .sorted()
        .collect()
}

/// Get the contents of a file within the named scenario
fn get_scenario_file(name: &str, file_name: &str) -> Result<&'static str> {
    let path: PathBuf = [name, file_name].iter().collect();
    let file = SCENARIOS_DIR.get_file(path).context("Scenario not found.")?;

    file.contents_utf8()
        .with_context(|| format!("{file_name} is not UTF-8 encoded"))
}

/// Load the activity data for the named scenario
pub fn load_scenario(name: &str) -> Result<ActivityInputs> {
    let toml_str = get_scenario_file(name, SCENARIO_INPUTS_FILE_NAME)?;
    parse_activity_inputs(toml_str).with_context(|| format!("Invalid scenario: {name}"))
}

/// Handle the `scenario list` command.
fn handle_scenario_list_command() {
    for name in scenario_names() {
        println!("{name}");
    }
}

/// Handle the `scenario info` command.
fn handle_scenario_info_command(name: &str) -> Result<()> {
    let readme = get_scenario_file(name, SCENARIO_README_FILE_NAME)?;
    println!("{readme}");

    Ok(())
}

/// Handle the `scenario extract` command
fn handle_scenario_extract_command(name: &str, dest: Option<&Path>) -> Result<()> {
    let default_dest = PathBuf::from(format!("{name}.toml"));
    extract_scenario(name, dest.unwrap_or(default_dest.as_path()))
}

/// Write the named scenario's activity data to a new file
fn extract_scenario(name: &str, new_path: &Path) -> Result<()> {
    let contents = get_scenario_file(name, SCENARIO_INPUTS_FILE_NAME)?;

    ensure!(
        !new_path.exists(),
        "Destination file {} already exists",
        new_path.display()
    );

    fs::write(new_path, contents)?;

    Ok(())
}

/// Handle the `scenario run` command.
pub fn handle_scenario_run_command(
    name: &str,
    opts: &CalculateOpts,
    settings: Option<Settings>,
) -> Result<EmissionsResult> {
    let inputs = load_scenario(name)?;
    calculate_and_report(&inputs, None, get_scenario_output_dir(name), opts, settings)
}
