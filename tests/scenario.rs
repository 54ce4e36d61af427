//! Regression tests for the bundled scenarios.
use carbonsense::cli::CalculateOpts;
use carbonsense::cli::scenario::{handle_scenario_run_command, scenario_names};
use carbonsense::settings::Settings;
use carbonsense::summary::ReductionRating;
use carbonsense::units::{Percentage, Tons};
use float_cmp::assert_approx_eq;
use rstest::rstest;
use tempfile::tempdir;

const FLOAT_CMP_TOLERANCE: f64 = 1e-6;

#[rstest]
#[case("default", 3155.7354, 2538.08755, 19.572_231_879_770_43, ReductionRating::RoomForImprovement)]
#[case("electrified_fleet", 329.49, 277.4385, 15.797_596_285_168_014, ReductionRating::RoomForImprovement)]
#[case("office_only", 37.24, 28.7, 22.932_330_827_067_67, ReductionRating::GoodProgress)]
fn test_scenario_run(
    #[case] name: &str,
    #[case] total_baseline: f64,
    #[case] total_optimised: f64,
    #[case] reduction: f64,
    #[case] rating: ReductionRating,
) {
    let dir = tempdir().unwrap();
    let opts = CalculateOpts {
        output_dir: Some(dir.path().to_path_buf()),
        ..CalculateOpts::default()
    };
    let settings = Settings {
        log_level: "off".into(),
        ..Settings::default()
    };

    let result = handle_scenario_run_command(name, &opts, Some(settings)).unwrap();
    assert_approx_eq!(
        Tons,
        result.total_baseline,
        Tons(total_baseline),
        epsilon = FLOAT_CMP_TOLERANCE
    );
    assert_approx_eq!(
        Tons,
        result.total_optimised,
        Tons(total_optimised),
        epsilon = FLOAT_CMP_TOLERANCE
    );
    assert_approx_eq!(
        Percentage,
        result.reduction,
        Percentage(reduction),
        epsilon = FLOAT_CMP_TOLERANCE
    );
    assert_eq!(result.rating(), rating);
    assert!(dir.path().join("summary.toml").is_file());
}

#[test]
fn test_every_scenario_is_tested() {
    assert_eq!(
        scenario_names(),
        ["default", "electrified_fleet", "office_only"]
    );
}
