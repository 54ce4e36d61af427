//! The command line interface for Carbon Sense.
use crate::activity::ActivityInputs;
use crate::emissions::{EmissionsResult, calculate_emissions};
use crate::input::{input_err_msg, load_activity_inputs};
use crate::log;
use crate::output::{create_output_directory, get_output_dir, write_results};
use crate::settings::Settings;
use crate::summary::{executive_summary, recommendations_listing, share_listing, summary_table};
use crate::units::{Distance, Energy, Hours, Percentage};
use ::log::{debug, info, warn};
use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};

pub mod inputs;
use inputs::InputsSubcommands;
pub mod scenario;
use scenario::ScenarioSubcommands;
pub mod settings;
use settings::SettingsSubcommands;

/// The command line interface for Carbon Sense.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// The available commands.
    #[command(subcommand)]
    command: Option<Commands>,
    /// Flag to provide the CLI docs as markdown
    #[arg(long, hide = true)]
    markdown_help: bool,
}

/// Options for commands which calculate emissions
#[derive(Args, Default)]
pub struct CalculateOpts {
    /// Directory for output files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
    /// Whether to overwrite the output directory if it already exists
    #[arg(long)]
    pub overwrite: bool,
    /// Don't write results to an output directory
    #[arg(long)]
    pub no_output: bool,
}

/// Values which replace those from the input file
#[derive(Args, Default)]
pub struct ActivityOverrides {
    /// Annual distance driven by fleet cars (km)
    #[arg(long)]
    pub cars_km: Option<f64>,
    /// Percentage of fleet cars which are electric
    #[arg(long)]
    pub ev_share_pct: Option<f64>,
    /// Percentage reduction in car driving distance
    #[arg(long)]
    pub km_reduction_pct: Option<f64>,
    /// Annual distance driven by trucks (km)
    #[arg(long)]
    pub trucks_km: Option<f64>,
    /// Annual distance driven by buses (km)
    #[arg(long)]
    pub buses_km: Option<f64>,
    /// Annual forklift operating hours
    #[arg(long)]
    pub forklift_hours: Option<f64>,
    /// Annual cargo plane flight hours
    #[arg(long)]
    pub plane_hours: Option<f64>,
    /// Average cargo load factor for planes (%)
    #[arg(long)]
    pub load_factor_pct: Option<f64>,
    /// Annual electricity use for lighting (kWh)
    #[arg(long)]
    pub lighting_kwh: Option<f64>,
    /// Annual thermal energy use for heating (kWh-th)
    #[arg(long)]
    pub heating_kwh_thermal: Option<f64>,
    /// Annual electricity use for cooling (kWh)
    #[arg(long)]
    pub cooling_kwh: Option<f64>,
    /// Annual electricity use for IT (kWh)
    #[arg(long)]
    pub computing_kwh: Option<f64>,
}

macro_rules! apply_overrides {
    ($overrides:expr, $inputs:expr, $($field:ident => $unit:ident),* $(,)?) => {
        $(
            if let Some(value) = $overrides.$field {
                debug!("Overriding {} with {}", stringify!($field), value);
                $inputs.$field = $unit(value);
            }
        )*
    };
}

impl ActivityOverrides {
    /// Replace values in `inputs` with any which were given on the command line
    pub fn apply(&self, inputs: &mut ActivityInputs) {
        apply_overrides!(
            self,
            inputs,
            cars_km => Distance,
            ev_share_pct => Percentage,
            km_reduction_pct => Percentage,
            trucks_km => Distance,
            buses_km => Distance,
            forklift_hours => Hours,
            plane_hours => Hours,
            load_factor_pct => Percentage,
            lighting_kwh => Energy,
            heating_kwh_thermal => Energy,
            cooling_kwh => Energy,
            computing_kwh => Energy,
        );
    }
}

/// The available commands.
#[derive(Subcommand)]
enum Commands {
    /// Calculate emissions from activity data.
    Calculate {
        /// Path to a TOML file of activity data. Default values are used if not given.
        input_file: Option<PathBuf>,
        /// Values which replace those from the input file
        #[command(flatten)]
        overrides: ActivityOverrides,
        /// Other calculation options
        #[command(flatten)]
        opts: CalculateOpts,
    },
    /// Work with activity data files.
    Inputs {
        /// The available subcommands for activity data files.
        #[command(subcommand)]
        subcommand: InputsSubcommands,
    },
    /// Manage bundled scenarios.
    Scenario {
        /// The available subcommands for managing scenarios.
        #[command(subcommand)]
        subcommand: ScenarioSubcommands,
    },
    /// Manage program settings.
    Settings {
        /// The available subcommands for managing settings.
        #[command(subcommand)]
        subcommand: SettingsSubcommands,
    },
}

impl Commands {
    /// Execute the supplied CLI command
    fn execute(self) -> Result<()> {
        match self {
            Self::Calculate {
                input_file,
                overrides,
                opts,
            } => {
                handle_calculate_command(input_file.as_deref(), &overrides, &opts, None)?;
                Ok(())
            }
            Self::Inputs { subcommand } => subcommand.execute(),
            Self::Scenario { subcommand } => subcommand.execute(),
            Self::Settings { subcommand } => subcommand.execute(),
        }
    }
}

/// Parse CLI arguments and start Carbon Sense
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    // Invoked as: `$ carbonsense --markdown-help`
    if cli.markdown_help {
        clap_markdown::print_help_markdown::<Cli>();
        return Ok(());
    }

    let Some(command) = cli.command else {
        // Output program help
        let help_str = Cli::command().render_long_help().to_string();
        println!("{help_str}");
        return Ok(());
    };

    command.execute()
}

/// Handle the `calculate` command.
pub fn handle_calculate_command(
    input_path: Option<&Path>,
    overrides: &ActivityOverrides,
    opts: &CalculateOpts,
    settings: Option<Settings>,
) -> Result<EmissionsResult> {
    let mut inputs = load_activity_inputs(input_path).context("Failed to load activity data.")?;
    overrides.apply(&mut inputs);

    let mut validation = inputs.validate();
    if let Some(input_path) = input_path {
        validation = validation.with_context(|| input_err_msg(input_path));
    }
    validation.context("Invalid activity data.")?;

    let default_output_dir = get_output_dir(input_path)?;
    calculate_and_report(&inputs, input_path, default_output_dir, opts, settings)
}

/// Calculate emissions, print a report and write results to disk.
///
/// # Arguments
///
/// * `inputs` - Validated activity data
/// * `input_path` - The file the activity data came from, if any
/// * `default_output_dir` - Where to write results if no output directory was specified
/// * `opts` - Options for the calculation
/// * `settings` - Program settings. If not given, these are loaded from the settings file.
pub fn calculate_and_report(
    inputs: &ActivityInputs,
    input_path: Option<&Path>,
    default_output_dir: PathBuf,
    opts: &CalculateOpts,
    settings: Option<Settings>,
) -> Result<EmissionsResult> {
    // Load program settings, if not provided
    let settings = if let Some(settings) = settings {
        settings
    } else {
        Settings::load().context("Failed to load settings.")?
    };

    // Create the output folder, unless results aren't being saved
    let (output_path, overwrite) = if settings.write_output && !opts.no_output {
        let output_path = opts.output_dir.clone().unwrap_or(default_output_dir);
        let overwrite = create_output_directory(&output_path, opts.overwrite || settings.overwrite)
            .with_context(|| {
                format!(
                    "Failed to create output directory: {}",
                    output_path.display()
                )
            })?;
        (Some(output_path), overwrite)
    } else {
        (None, false)
    };

    // Initialise program logger
    log::init(Some(settings.log_level.as_str()), output_path.as_deref())
        .context("Failed to initialise logging.")?;

    if let Some(input_path) = input_path {
        info!("Loaded activity data from {}", input_path.display());
    } else {
        info!("Using default activity data");
    }

    // NB: We have to wait until the logger is initialised to display this warning
    if overwrite {
        warn!("Output folder will be overwritten");
    }

    let result = calculate_emissions(inputs);
    info!(
        "Baseline emissions: {:.3} tons CO2e; optimised emissions: {:.3} tons CO2e",
        result.total_baseline.value(),
        result.total_optimised.value()
    );

    println!("{}", executive_summary(&result));
    println!("{}", summary_table(&result));
    println!("{}", share_listing(&result));
    println!("{}", recommendations_listing());

    if let Some(output_path) = output_path {
        write_results(&output_path, input_path, inputs, &result)?;
        info!("Results written to {}", output_path.display());
    }

    Ok(result)
}
