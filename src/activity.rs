//! Defines the `ActivityInputs` struct, which holds the activity data emissions are calculated from.
use crate::units::{Distance, Energy, Hours, Percentage};
use anyhow::{Result, ensure};
use documented::DocumentedFields;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Maximum distance for any kind of vehicle (km/year)
pub const MAX_DISTANCE_KM: f64 = 1_000_000.0;
/// Maximum forklift operating hours per year
pub const MAX_FORKLIFT_HOURS: f64 = 5000.0;
/// Maximum cargo plane flight hours per year
pub const MAX_FLIGHT_HOURS: f64 = 2000.0;
/// Maximum energy use for any building service (kWh/year)
pub const MAX_ENERGY_KWH: f64 = 50_000.0;
/// Maximum value for a percentage
pub const MAX_PERCENTAGE: f64 = 100.0;

const INPUTS_FILE_HEADER: &str = "# Activity data for a Carbon Sense emissions estimate
# Any value left out will take its default.
";

/// Annual activity data for a logistics or facility operation.
///
/// Every value must be non-negative and no larger than the maximum for its field. This is checked
/// by [`ActivityInputs::validate`] when inputs are loaded, not when emissions are calculated.
#[derive(Debug, Clone, PartialEq, DocumentedFields, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ActivityInputs {
    /// Total annual distance driven by fleet cars (km/year)
    pub cars_km: Distance,
    /// Percentage of fleet cars which are electric vehicles
    pub ev_share_pct: Percentage,
    /// Percentage reduction in car driving distance (e.g. from route optimisation)
    pub km_reduction_pct: Percentage,
    /// Total annual distance driven by trucks (km/year)
    pub trucks_km: Distance,
    /// Total annual distance driven by buses (km/year)
    pub buses_km: Distance,
    /// Total annual operating hours for forklifts
    pub forklift_hours: Hours,
    /// Total annual flight hours for cargo planes
    pub plane_hours: Hours,
    /// Average cargo load factor for planes (%)
    pub load_factor_pct: Percentage,
    /// Annual electricity use for office lighting (kWh/year)
    pub lighting_kwh: Energy,
    /// Annual thermal energy use for heating (kWh-th/year)
    pub heating_kwh_thermal: Energy,
    /// Annual electricity use for air conditioning (kWh/year)
    pub cooling_kwh: Energy,
    /// Annual electricity use for IT and computing (kWh/year)
    pub computing_kwh: Energy,
}

impl Default for ActivityInputs {
    fn default() -> Self {
        Self {
            cars_km: Distance(230_000.0),
            ev_share_pct: Percentage(30.0),
            km_reduction_pct: Percentage(10.0),
            trucks_km: Distance(150_000.0),
            buses_km: Distance(80_000.0),
            forklift_hours: Hours(600.0),
            plane_hours: Hours(400.0),
            load_factor_pct: Percentage(80.0),
            lighting_kwh: Energy(12_000.0),
            heating_kwh_thermal: Energy(10_000.0),
            cooling_kwh: Energy(15_000.0),
            computing_kwh: Energy(18_000.0),
        }
    }
}

/// Check that a value lies within `[0, max]`
fn check_in_range(field: &str, value: f64, max: f64) -> Result<()> {
    ensure!(
        value.is_finite() && (0.0..=max).contains(&value),
        "{field} is out of range: {value} (must be between 0 and {max})"
    );

    Ok(())
}

impl ActivityInputs {
    /// Inputs with every quantity set to zero
    pub fn zero() -> Self {
        Self {
            cars_km: Distance(0.0),
            ev_share_pct: Percentage(0.0),
            km_reduction_pct: Percentage(0.0),
            trucks_km: Distance(0.0),
            buses_km: Distance(0.0),
            forklift_hours: Hours(0.0),
            plane_hours: Hours(0.0),
            load_factor_pct: Percentage(0.0),
            lighting_kwh: Energy(0.0),
            heating_kwh_thermal: Energy(0.0),
            cooling_kwh: Energy(0.0),
            computing_kwh: Energy(0.0),
        }
    }

    /// Each field's name, value and maximum permitted value
    fn bounded_fields(&self) -> [(&'static str, f64, f64); 12] {
        [
            ("cars_km", self.cars_km.value(), MAX_DISTANCE_KM),
            ("ev_share_pct", self.ev_share_pct.value(), MAX_PERCENTAGE),
            ("km_reduction_pct", self.km_reduction_pct.value(), MAX_PERCENTAGE),
            ("trucks_km", self.trucks_km.value(), MAX_DISTANCE_KM),
            ("buses_km", self.buses_km.value(), MAX_DISTANCE_KM),
            ("forklift_hours", self.forklift_hours.value(), MAX_FORKLIFT_HOURS),
            ("plane_hours", self.plane_hours.value(), MAX_FLIGHT_HOURS),
            ("load_factor_pct", self.load_factor_pct.value(), MAX_PERCENTAGE),
            ("lighting_kwh", self.lighting_kwh.value(), MAX_ENERGY_KWH),
            ("heating_kwh_thermal", self.heating_kwh_thermal.value(), MAX_ENERGY_KWH),
            ("cooling_kwh", self.cooling_kwh.value(), MAX_ENERGY_KWH),
            ("computing_kwh", self.computing_kwh.value(), MAX_ENERGY_KWH),
        ]
    }

    /// Check that every value is within its permitted range
    pub fn validate(&self) -> Result<()> {
        for (field, value, max) in self.bounded_fields() {
            check_in_range(field, value, max)?;
        }

        Ok(())
    }

    /// Render these inputs as a TOML file, with each field's documentation as a comment
    pub fn to_toml(&self) -> Result<String> {
        let inputs_raw = toml::to_string(self)?;

        let mut out = INPUTS_FILE_HEADER.to_string();
        for line in inputs_raw.lines() {
            if let Some(last) = line.find('=') {
                let field = line[..last].trim();
                let docs = Self::get_field_docs(field)?;
                writeln!(&mut out, "\n# {}", docs.trim())?;
                writeln!(&mut out, "{}", line.trim())?;
            }
        }

        Ok(out)
    }
}
