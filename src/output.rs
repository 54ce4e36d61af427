//! The module responsible for writing output data to disk.
use crate::activity::ActivityInputs;
use crate::category::EmissionCategory;
use crate::emissions::EmissionsResult;
use crate::summary::{ReductionRating, TotalBar, bar_chart_data};
use crate::units::{Dimensionless, Percentage, Tons};
use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub mod metadata;
use metadata::write_metadata;

/// The root folder in which output folders will be created
const OUTPUT_DIRECTORY_ROOT: &str = "carbonsense_results";

/// The name of the output folder used when no input file is given
const DEFAULT_OUTPUT_NAME: &str = "default";

/// The output file name for per-category emissions
const CATEGORY_EMISSIONS_FILE_NAME: &str = "emissions_by_category.csv";

/// The output file name for total emissions
const TOTALS_FILE_NAME: &str = "emissions_totals.csv";

/// The output file name for the summary of results
const SUMMARY_FILE_NAME: &str = "summary.toml";

/// The output file name for a copy of the inputs
const INPUTS_FILE_NAME: &str = "inputs.toml";

/// Get the output folder for results calculated from the specified input file
pub fn get_output_dir(input_path: Option<&Path>) -> Result<PathBuf> {
    let Some(input_path) = input_path else {
        return Ok([OUTPUT_DIRECTORY_ROOT, DEFAULT_OUTPUT_NAME].iter().collect());
    };

    let name = input_path
        .file_stem()
        .context("Input path has no file name")?
        .to_str()
        .context("Invalid chars in input file name")?;

    Ok([OUTPUT_DIRECTORY_ROOT, name].iter().collect())
}

/// Get the output folder for the named bundled scenario
pub fn get_scenario_output_dir(name: &str) -> PathBuf {
    [OUTPUT_DIRECTORY_ROOT, name].iter().collect()
}

/// Create a new output directory, deleting any existing contents if `allow_overwrite` is set.
///
/// # Returns
///
/// Whether an existing folder was overwritten
pub fn create_output_directory(output_dir: &Path, allow_overwrite: bool) -> Result<bool> {
    let overwrite = if let Ok(mut it) = fs::read_dir(output_dir) {
        if it.next().is_none() {
            // Folder exists and is empty: nothing to do
            return Ok(false);
        }

        ensure!(
            allow_overwrite,
            "Output folder already exists and is not empty. \
            Please delete the folder or pass the --overwrite command-line option."
        );

        fs::remove_dir_all(output_dir).context("Could not delete folder")?;
        true
    } else {
        false
    };

    // Try to create the directory, with parents
    fs::create_dir_all(output_dir)?;

    Ok(overwrite)
}

/// Represents a row in the per-category emissions CSV file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct CategoryEmissionsRow {
    category: EmissionCategory,
    baseline: Tons,
    optimised: Tons,
    share: Dimensionless,
}

/// The overall results, as written to the summary file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct SummaryFile {
    total_baseline: Tons,
    total_optimised: Tons,
    reduction_pct: Percentage,
    saving: Tons,
    rating: ReductionRating,
}

/// Write per-category emissions to a CSV file
fn write_category_emissions(output_path: &Path, result: &EmissionsResult) -> Result<()> {
    let mut writer = csv::Writer::from_path(output_path.join(CATEGORY_EMISSIONS_FILE_NAME))?;
    for (&category, &baseline) in &result.baseline {
        writer.serialize(CategoryEmissionsRow {
            category,
            baseline,
            optimised: result.optimised[&category],
            share: result.optimised_share(category),
        })?;
    }
    writer.flush()?;

    Ok(())
}

/// Write baseline and optimised totals to a CSV file
fn write_totals(output_path: &Path, result: &EmissionsResult) -> Result<()> {
    let mut writer = csv::Writer::from_path(output_path.join(TOTALS_FILE_NAME))?;
    for bar in bar_chart_data(result) {
        writer.serialize(bar)?;
    }
    writer.flush()?;

    Ok(())
}

/// Write the summary of results to a TOML file
fn write_summary(output_path: &Path, result: &EmissionsResult) -> Result<()> {
    let summary = SummaryFile {
        total_baseline: result.total_baseline,
        total_optimised: result.total_optimised,
        reduction_pct: result.reduction,
        saving: result.saving(),
        rating: result.rating(),
    };
    fs::write(output_path.join(SUMMARY_FILE_NAME), toml::to_string(&summary)?)?;

    Ok(())
}

/// Write all results to the specified output folder
///
/// # Arguments
///
/// * `output_path` - Folder where files will be saved
/// * `input_path` - The input file the results were calculated from, if any
/// * `inputs` - The activity data used
/// * `result` - The calculated emissions
pub fn write_results(
    output_path: &Path,
    input_path: Option<&Path>,
    inputs: &ActivityInputs,
    result: &EmissionsResult,
) -> Result<()> {
    write_category_emissions(output_path, result)
        .context("Failed to write per-category emissions")?;
    write_totals(output_path, result).context("Failed to write total emissions")?;
    write_summary(output_path, result).context("Failed to write summary")?;
    fs::write(output_path.join(INPUTS_FILE_NAME), inputs.to_toml()?)
        .context("Failed to write inputs")?;
    write_metadata(output_path, input_path).context("Failed to save metadata")?;

    Ok(())
}

/// Read back the bar chart data written to an output folder
pub fn read_totals(output_path: &Path) -> Result<Vec<TotalBar>> {
    let file_path = output_path.join(TOTALS_FILE_NAME);
    let mut reader = csv::Reader::from_path(&file_path)
        .with_context(|| format!("Could not open {}", file_path.display()))?;
    let totals = reader.deserialize().collect::<Result<Vec<TotalBar>, _>>()?;

    Ok(totals)
}
