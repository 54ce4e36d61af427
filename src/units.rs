//! This module defines the quantity types used for activity data and emissions.
//!
//! Each quantity is a newtype around an `f64` so that, for example, a distance cannot be passed
//! where an energy use is expected. Arithmetic between quantities is only defined where the result
//! has a meaningful unit.
use float_cmp::{ApproxEq, F64Margin};
use serde::{Deserialize, Serialize};
use std::iter::Sum;

/// The number of kilograms in a metric ton
pub const KG_PER_TON: f64 = 1000.0;

/// Represents a dimensionless quantity.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    PartialOrd,
    Default,
    Serialize,
    Deserialize,
    derive_more::Add,
    derive_more::Sub,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct Dimensionless(pub f64);

impl std::ops::Mul for Dimensionless {
    type Output = Dimensionless;

    fn mul(self, rhs: Dimensionless) -> Self::Output {
        Dimensionless(self.0 * rhs.0)
    }
}

impl std::ops::Div for Dimensionless {
    type Output = Dimensionless;

    fn div(self, rhs: Dimensionless) -> Self::Output {
        Dimensionless(self.0 / rhs.0)
    }
}

impl ApproxEq for Dimensionless {
    type Margin = F64Margin;

    fn approx_eq<T: Into<Self::Margin>>(self, other: Self, margin: T) -> bool {
        self.0.approx_eq(other.0, margin)
    }
}

macro_rules! unit_struct {
    ($name:ident) => {
        /// Represents a type of quantity.
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            PartialOrd,
            Default,
            Serialize,
            Deserialize,
            derive_more::Add,
            derive_more::Sub,
            derive_more::Display,
        )]
        #[serde(transparent)]
        pub struct $name(pub f64);

        impl $name {
            /// Creates a new instance of the unit type from a f64 value.
            pub const fn new(val: f64) -> Self {
                Self(val)
            }

            /// Returns the value of the unit type as a f64.
            pub const fn value(self) -> f64 {
                self.0
            }
        }

        impl std::ops::Mul<Dimensionless> for $name {
            type Output = $name;
            fn mul(self, rhs: Dimensionless) -> $name {
                $name(self.0 * rhs.0)
            }
        }

        impl std::ops::Mul<$name> for Dimensionless {
            type Output = $name;
            fn mul(self, rhs: $name) -> $name {
                $name(self.0 * rhs.0)
            }
        }

        impl std::ops::Div<Dimensionless> for $name {
            type Output = $name;
            fn div(self, rhs: Dimensionless) -> $name {
                $name(self.0 / rhs.0)
            }
        }

        impl std::ops::Div for $name {
            type Output = Dimensionless;
            fn div(self, rhs: $name) -> Dimensionless {
                Dimensionless(self.0 / rhs.0)
            }
        }

        impl Sum for $name {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold($name(0.0), |acc, x| acc + x)
            }
        }

        impl ApproxEq for $name {
            type Margin = F64Margin;

            fn approx_eq<T: Into<Self::Margin>>(self, other: Self, margin: T) -> bool {
                self.0.approx_eq(other.0, margin)
            }
        }
    };
}

macro_rules! impl_mul {
    ($Lhs:ty, $Rhs:ty, $Out:ty) => {
        impl std::ops::Mul<$Rhs> for $Lhs {
            type Output = $Out;
            fn mul(self, rhs: $Rhs) -> $Out {
                <$Out>::new(self.0 * rhs.0)
            }
        }
        impl std::ops::Mul<$Lhs> for $Rhs {
            type Output = $Out;
            fn mul(self, lhs: $Lhs) -> $Out {
                <$Out>::new(self.0 * lhs.0)
            }
        }
    };
}

// Activity quantities as entered by the user
unit_struct!(Distance);
unit_struct!(Hours);
unit_struct!(Energy);
unit_struct!(Percentage);

// A quantity of any kind of activity (km, hours or kWh), used to apply emission factors uniformly
unit_struct!(Activity);

// Emission quantities
unit_struct!(EmissionFactor);
unit_struct!(Mass);
unit_struct!(Tons);

impl_mul!(Activity, EmissionFactor, Mass);

macro_rules! impl_into_activity {
    ($name:ident) => {
        impl From<$name> for Activity {
            fn from(val: $name) -> Self {
                Activity(val.0)
            }
        }
    };
}

impl_into_activity!(Distance);
impl_into_activity!(Hours);
impl_into_activity!(Energy);

impl Percentage {
    /// Convert to a fraction of one (e.g. 30% becomes 0.3)
    pub fn as_fraction(self) -> Dimensionless {
        Dimensionless(self.0 / 100.0)
    }
}

impl From<Dimensionless> for Percentage {
    fn from(val: Dimensionless) -> Self {
        Percentage(val.0 * 100.0)
    }
}

impl Mass {
    /// Convert a mass in kg to metric tons
    pub fn to_tons(self) -> Tons {
        Tons(self.0 / KG_PER_TON)
    }
}
