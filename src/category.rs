//! Emission categories and the constant factor tables associated with them.
use crate::units::{Dimensionless, EmissionFactor};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, IntoEnumIterator};

/// A map with one entry per emission category, in category order
pub type CategoryMap<T> = IndexMap<EmissionCategory, T>;

/// A source of emissions.
///
/// The variants are listed in the order in which categories are reported.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumIter,
    EnumCount,
    Serialize,
    Deserialize,
)]
pub enum EmissionCategory {
    /// Fleet cars
    Cars,
    /// Trucks
    Trucks,
    /// Buses
    Buses,
    /// Forklifts
    Forklifts,
    /// Cargo planes
    #[strum(to_string = "Cargo Planes")]
    #[serde(rename = "Cargo Planes")]
    CargoPlanes,
    /// Office lighting
    #[strum(to_string = "Office Lighting")]
    #[serde(rename = "Office Lighting")]
    OfficeLighting,
    /// Space heating
    Heating,
    /// Air conditioning
    Cooling,
    /// IT equipment and computing
    #[strum(to_string = "Computing IT")]
    #[serde(rename = "Computing IT")]
    ComputingIT,
}

impl EmissionCategory {
    /// Emissions per unit of activity for this category, in kg `CO2e`.
    ///
    /// The unit of activity is given by [`EmissionCategory::activity_unit`].
    pub const fn emission_factor(self) -> EmissionFactor {
        EmissionFactor(match self {
            Self::Cars => 0.18,
            Self::Trucks => 0.90,
            Self::Buses => 1.10,
            Self::Forklifts => 4.0,
            Self::CargoPlanes => 9000.0,
            Self::OfficeLighting | Self::Cooling | Self::ComputingIT => 0.42,
            Self::Heating => 0.20,
        })
    }

    /// The proportion of baseline emissions retained in the optimised scenario
    pub const fn optimisation_factor(self) -> Dimensionless {
        Dimensionless(match self {
            Self::Cars | Self::Cooling => 0.75,
            Self::Trucks => 0.85,
            Self::Buses | Self::Forklifts => 0.90,
            Self::CargoPlanes | Self::Heating | Self::ComputingIT => 0.80,
            Self::OfficeLighting => 0.70,
        })
    }

    /// The unit in which activity for this category is measured
    pub const fn activity_unit(self) -> &'static str {
        match self {
            Self::Cars | Self::Trucks | Self::Buses => "km",
            Self::Forklifts | Self::CargoPlanes => "h",
            Self::OfficeLighting | Self::Cooling | Self::ComputingIT => "kWh",
            Self::Heating => "kWh-th",
        }
    }

    /// Collect a value for every category into a [`CategoryMap`]
    pub fn map_all<T, F>(mut f: F) -> CategoryMap<T>
    where
        F: FnMut(EmissionCategory) -> T,
    {
        Self::iter().map(|category| (category, f(category))).collect()
    }
}
