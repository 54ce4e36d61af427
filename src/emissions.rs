//! Calculation of baseline and optimised emissions from activity data.
use crate::activity::ActivityInputs;
use crate::category::{CategoryMap, EmissionCategory};
use crate::units::{Activity, Dimensionless, Percentage, Tons};

/// The maximum proportion of a car's emissions displaced by switching it to an electric vehicle.
///
/// An EV is modelled as emitting 30% of the `CO2e` of a combustion car.
pub const EV_EMISSIONS_DISPLACEMENT: f64 = 0.7;

/// Baseline and optimised emissions for every category, in tons `CO2e`
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionsResult {
    /// Emissions for each category at the entered activity levels
    pub baseline: CategoryMap<Tons>,
    /// Emissions for each category after optimisation
    pub optimised: CategoryMap<Tons>,
    /// Sum of baseline emissions
    pub total_baseline: Tons,
    /// Sum of optimised emissions
    pub total_optimised: Tons,
    /// Percentage by which optimisation reduces total emissions
    pub reduction: Percentage,
}

impl EmissionsResult {
    /// Absolute reduction in emissions from optimisation
    pub fn saving(&self) -> Tons {
        self.total_baseline - self.total_optimised
    }

    /// The proportion of total optimised emissions coming from `category`.
    ///
    /// Returns zero if there are no optimised emissions.
    pub fn optimised_share(&self, category: EmissionCategory) -> Dimensionless {
        if self.total_optimised == Tons(0.0) {
            return Dimensionless(0.0);
        }

        self.optimised[&category] / self.total_optimised
    }

    /// The category with the largest optimised emissions.
    ///
    /// On a tie, the category which comes first is returned. Returns `None` if no category has
    /// positive emissions.
    pub fn largest_optimised(&self) -> Option<EmissionCategory> {
        let mut largest: Option<(EmissionCategory, Tons)> = None;
        for (&category, &value) in &self.optimised {
            let is_larger = match largest {
                Some((_, max)) => value > max,
                None => value > Tons(0.0),
            };
            if is_larger {
                largest = Some((category, value));
            }
        }

        largest.map(|(category, _)| category)
    }
}

/// Calculate the baseline emissions for a single category
pub fn baseline_emissions(category: EmissionCategory, inputs: &ActivityInputs) -> Tons {
    let factor = category.emission_factor();
    let mass = match category {
        EmissionCategory::Cars => {
            let ev_adjustment = Dimensionless(1.0)
                - Dimensionless(EV_EMISSIONS_DISPLACEMENT) * inputs.ev_share_pct.as_fraction();
            let distance_adjustment =
                Dimensionless(1.0) - inputs.km_reduction_pct.as_fraction();

            Activity::from(inputs.cars_km) * factor * ev_adjustment * distance_adjustment
        }
        EmissionCategory::Trucks => Activity::from(inputs.trucks_km) * factor,
        EmissionCategory::Buses => Activity::from(inputs.buses_km) * factor,
        EmissionCategory::Forklifts => Activity::from(inputs.forklift_hours) * factor,
        EmissionCategory::CargoPlanes => {
            Activity::from(inputs.plane_hours) * factor * inputs.load_factor_pct.as_fraction()
        }
        EmissionCategory::OfficeLighting => Activity::from(inputs.lighting_kwh) * factor,
        EmissionCategory::Heating => Activity::from(inputs.heating_kwh_thermal) * factor,
        EmissionCategory::Cooling => Activity::from(inputs.cooling_kwh) * factor,
        EmissionCategory::ComputingIT => Activity::from(inputs.computing_kwh) * factor,
    };

    mass.to_tons()
}

/// Calculate the percentage reduction from the baseline to the optimised total.
///
/// A baseline of exactly zero gives a reduction of zero.
pub fn reduction_percentage(total_baseline: Tons, total_optimised: Tons) -> Percentage {
    if total_baseline == Tons(0.0) {
        return Percentage(0.0);
    }

    (Dimensionless(1.0) - total_optimised / total_baseline).into()
}

/// Calculate baseline and optimised emissions for the given activity data.
///
/// The inputs are not validated. Values outside their permitted ranges (e.g. negative distances)
/// give meaningless results, but never a panic.
pub fn calculate_emissions(inputs: &ActivityInputs) -> EmissionsResult {
    let baseline = EmissionCategory::map_all(|category| baseline_emissions(category, inputs));
    let optimised: CategoryMap<Tons> = baseline
        .iter()
        .map(|(&category, &value)| (category, value * category.optimisation_factor()))
        .collect();

    let total_baseline = baseline.values().copied().sum();
    let total_optimised = optimised.values().copied().sum();

    EmissionsResult {
        reduction: reduction_percentage(total_baseline, total_optimised),
        baseline,
        optimised,
        total_baseline,
        total_optimised,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::default_result;
    use crate::units::{Distance, Energy, Hours};
    use float_cmp::assert_approx_eq;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    #[test]
    fn test_zero_inputs() {
        let result = calculate_emissions(&ActivityInputs::zero());
        assert_eq!(result.total_baseline, Tons(0.0));
        assert_eq!(result.total_optimised, Tons(0.0));
        assert_eq!(result.reduction, Percentage(0.0));
        assert_eq!(result.largest_optimised(), None);
        assert_eq!(
            result.optimised_share(EmissionCategory::Cars),
            Dimensionless(0.0)
        );
    }

    #[rstest]
    #[case(EmissionCategory::Cars, 29.4354)]
    #[case(EmissionCategory::Trucks, 135.0)]
    #[case(EmissionCategory::Buses, 88.0)]
    #[case(EmissionCategory::Forklifts, 2.4)]
    #[case(EmissionCategory::CargoPlanes, 2880.0)]
    #[case(EmissionCategory::OfficeLighting, 5.04)]
    #[case(EmissionCategory::Heating, 2.0)]
    #[case(EmissionCategory::Cooling, 6.3)]
    #[case(EmissionCategory::ComputingIT, 7.56)]
    fn test_default_baseline(
        default_result: EmissionsResult,
        #[case] category: EmissionCategory,
        #[case] expected: f64,
    ) {
        assert_approx_eq!(
            Tons,
            default_result.baseline[&category],
            Tons(expected),
            epsilon = 1e-6
        );
    }

    #[rstest]
    fn test_default_totals(default_result: EmissionsResult) {
        assert_approx_eq!(
            Tons,
            default_result.total_baseline,
            Tons(3155.7354),
            epsilon = 1e-6
        );
        assert_approx_eq!(
            Tons,
            default_result.total_optimised,
            Tons(2538.08755),
            epsilon = 1e-6
        );

        let expected = (1.0 - default_result.total_optimised.value()
            / default_result.total_baseline.value())
            * 100.0;
        assert_approx_eq!(
            Percentage,
            default_result.reduction,
            Percentage(expected),
            epsilon = 1e-6
        );
        assert_approx_eq!(
            Percentage,
            default_result.reduction,
            Percentage(19.572_231_879_770_43),
            epsilon = 1e-6
        );
        assert_approx_eq!(
            Tons,
            default_result.saving(),
            Tons(617.64785),
            epsilon = 1e-6
        );
    }

    #[rstest]
    fn test_totals_are_sums(default_result: EmissionsResult) {
        let baseline: f64 = default_result.baseline.values().map(|t| t.value()).sum();
        let optimised: f64 = default_result.optimised.values().map(|t| t.value()).sum();
        assert_approx_eq!(f64, default_result.total_baseline.value(), baseline);
        assert_approx_eq!(f64, default_result.total_optimised.value(), optimised);
    }

    #[rstest]
    fn test_optimised_is_baseline_times_factor(default_result: EmissionsResult) {
        for category in EmissionCategory::iter() {
            let baseline = default_result.baseline[&category];
            let optimised = default_result.optimised[&category];
            assert_eq!(optimised, baseline * category.optimisation_factor());
            assert!(optimised <= baseline, "{category}: {optimised} > {baseline}");
        }
    }

    #[rstest]
    fn test_largest_and_shares(default_result: EmissionsResult) {
        assert_eq!(
            default_result.largest_optimised(),
            Some(EmissionCategory::CargoPlanes)
        );

        let total: f64 = EmissionCategory::iter()
            .map(|c| default_result.optimised_share(c).0)
            .sum();
        assert_approx_eq!(f64, total, 1.0, epsilon = 1e-12);
        assert_approx_eq!(
            Dimensionless,
            default_result.optimised_share(EmissionCategory::CargoPlanes),
            Dimensionless(0.907_770_104_305_503_9),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_largest_optimised() {
        let inputs = ActivityInputs {
            cooling_kwh: Energy(1000.0),
            lighting_kwh: Energy(1000.0),
            ..ActivityInputs::zero()
        };
        let result = calculate_emissions(&inputs);

        // Same baseline, but cooling retains more after optimisation
        assert_eq!(
            result.largest_optimised(),
            Some(EmissionCategory::Cooling)
        );
    }

    #[test]
    fn test_largest_optimised_tie_prefers_first() {
        // Both give 7.2 t after optimisation
        let inputs = ActivityInputs {
            forklift_hours: Hours(2000.0),
            plane_hours: Hours(1.0),
            load_factor_pct: Percentage(100.0),
            ..ActivityInputs::zero()
        };
        let result = calculate_emissions(&inputs);
        assert_eq!(
            result.optimised[&EmissionCategory::Forklifts],
            result.optimised[&EmissionCategory::CargoPlanes]
        );
        assert_eq!(
            result.largest_optimised(),
            Some(EmissionCategory::Forklifts)
        );
    }

    #[test]
    fn test_full_ev_share() {
        let inputs = ActivityInputs {
            cars_km: Distance(100_000.0),
            ev_share_pct: Percentage(100.0),
            km_reduction_pct: Percentage(0.0),
            ..ActivityInputs::zero()
        };
        let cars = baseline_emissions(EmissionCategory::Cars, &inputs);
        assert_approx_eq!(
            Tons,
            cars,
            Tons(100_000.0 * 0.18 * 0.3 / 1000.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_ev_share_and_km_reduction_compound() {
        let inputs = ActivityInputs {
            cars_km: Distance(1000.0),
            ev_share_pct: Percentage(50.0),
            km_reduction_pct: Percentage(50.0),
            ..ActivityInputs::zero()
        };

        // 1000 km * 0.18 kg/km * 0.65 * 0.5
        assert_approx_eq!(
            Tons,
            baseline_emissions(EmissionCategory::Cars, &inputs),
            Tons(0.0585),
            epsilon = 1e-12
        );
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(50.0, 1.8)]
    #[case(100.0, 3.6)]
    fn test_load_factor(#[case] load_factor: f64, #[case] expected: f64) {
        let inputs = ActivityInputs {
            plane_hours: Hours(0.4),
            load_factor_pct: Percentage(load_factor),
            ..ActivityInputs::zero()
        };
        assert_approx_eq!(
            Tons,
            baseline_emissions(EmissionCategory::CargoPlanes, &inputs),
            Tons(expected),
            epsilon = 1e-9
        );
    }

    #[rstest]
    #[case(ActivityInputs { cars_km: Distance(1.0), ..ActivityInputs::zero() }, EmissionCategory::Cars)]
    #[case(ActivityInputs { trucks_km: Distance(1.0), ..ActivityInputs::zero() }, EmissionCategory::Trucks)]
    #[case(ActivityInputs { buses_km: Distance(1.0), ..ActivityInputs::zero() }, EmissionCategory::Buses)]
    #[case(ActivityInputs { forklift_hours: Hours(1.0), ..ActivityInputs::zero() }, EmissionCategory::Forklifts)]
    #[case(ActivityInputs { plane_hours: Hours(1.0), ..ActivityInputs::zero() }, EmissionCategory::CargoPlanes)]
    #[case(ActivityInputs { lighting_kwh: Energy(1.0), ..ActivityInputs::zero() }, EmissionCategory::OfficeLighting)]
    #[case(ActivityInputs { heating_kwh_thermal: Energy(1.0), ..ActivityInputs::zero() }, EmissionCategory::Heating)]
    #[case(ActivityInputs { cooling_kwh: Energy(1.0), ..ActivityInputs::zero() }, EmissionCategory::Cooling)]
    #[case(ActivityInputs { computing_kwh: Energy(1.0), ..ActivityInputs::zero() }, EmissionCategory::ComputingIT)]
    fn test_monotonic(#[case] increment: ActivityInputs, #[case] category: EmissionCategory) {
        // Add the increment to the default inputs, with the load factor at its maximum so that
        // plane hours contribute
        let base = ActivityInputs {
            load_factor_pct: Percentage(100.0),
            ..ActivityInputs::default()
        };
        let increased = ActivityInputs {
            cars_km: base.cars_km + increment.cars_km,
            trucks_km: base.trucks_km + increment.trucks_km,
            buses_km: base.buses_km + increment.buses_km,
            forklift_hours: base.forklift_hours + increment.forklift_hours,
            plane_hours: base.plane_hours + increment.plane_hours,
            lighting_kwh: base.lighting_kwh + increment.lighting_kwh,
            heating_kwh_thermal: base.heating_kwh_thermal + increment.heating_kwh_thermal,
            cooling_kwh: base.cooling_kwh + increment.cooling_kwh,
            computing_kwh: base.computing_kwh + increment.computing_kwh,
            ..base.clone()
        };

        let before = baseline_emissions(category, &base);
        let after = baseline_emissions(category, &increased);
        assert!(after > before, "{category}: {after} <= {before}");

        // No other category is affected
        for other in EmissionCategory::iter().filter(|c| *c != category) {
            assert_eq!(
                baseline_emissions(other, &base),
                baseline_emissions(other, &increased)
            );
        }
    }

    #[rstest]
    #[case(ActivityInputs::default())]
    #[case(ActivityInputs { lighting_kwh: Energy(50_000.0), ..ActivityInputs::zero() })]
    #[case(ActivityInputs { trucks_km: Distance(1.0), ..ActivityInputs::zero() })]
    fn test_reduction_bounds(#[case] inputs: ActivityInputs) {
        let result = calculate_emissions(&inputs);
        assert!(result.reduction >= Percentage(0.0));
        assert!(result.reduction <= Percentage(100.0));
    }

    #[rstest]
    #[case(ActivityInputs { lighting_kwh: Energy(1.0), ..ActivityInputs::zero() }, 30.0)]
    #[case(ActivityInputs { trucks_km: Distance(1.0), ..ActivityInputs::zero() }, 15.0)]
    #[case(ActivityInputs { buses_km: Distance(1.0), ..ActivityInputs::zero() }, 10.0)]
    fn test_single_category_reduction(#[case] inputs: ActivityInputs, #[case] expected: f64) {
        let result = calculate_emissions(&inputs);
        assert_approx_eq!(
            Percentage,
            result.reduction,
            Percentage(expected),
            epsilon = 1e-9
        );
    }

    #[rstest]
    fn test_idempotent(default_result: EmissionsResult) {
        let inputs = ActivityInputs::default();
        assert_eq!(calculate_emissions(&inputs), default_result);
        assert_eq!(calculate_emissions(&inputs), calculate_emissions(&inputs));
    }

    #[test]
    fn test_negative_inputs_do_not_panic() {
        let inputs = ActivityInputs {
            trucks_km: Distance(-1000.0),
            ..ActivityInputs::zero()
        };
        let result = calculate_emissions(&inputs);
        assert_approx_eq!(Tons, result.total_baseline, Tons(-0.9), epsilon = 1e-12);
        assert_eq!(result.largest_optimised(), None);
    }

    #[rstest]
    #[case(0.0, 0.0, 0.0)]
    #[case(100.0, 80.0, 20.0)]
    #[case(100.0, 100.0, 0.0)]
    #[case(200.0, 50.0, 75.0)]
    fn test_reduction_percentage(
        #[case] baseline: f64,
        #[case] optimised: f64,
        #[case] expected: f64,
    ) {
        assert_approx_eq!(
            Percentage,
            reduction_percentage(Tons(baseline), Tons(optimised)),
            Percentage(expected),
            epsilon = 1e-12
        );
    }
}
