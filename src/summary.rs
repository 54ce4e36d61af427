//! Summaries of emissions results for presentation to the user.
//!
//! This covers the classification of the overall reduction, the text of the executive summary and
//! the data needed to draw charts of the results.
use crate::category::EmissionCategory;
use crate::emissions::EmissionsResult;
use crate::units::{Dimensionless, Percentage, Tons};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use strum::Display;

/// A reduction above this percentage is outstanding
pub const OUTSTANDING_THRESHOLD: Percentage = Percentage(40.0);

/// A reduction above this percentage (but not outstanding) is good progress
pub const GOOD_PROGRESS_THRESHOLD: Percentage = Percentage(20.0);

/// General advice for reducing emissions
pub const RECOMMENDATIONS: [&str; 5] = [
    "Increase EV share in fleet for dramatic CO₂ savings.",
    "Optimize truck/bus routes to reduce travel distance.",
    "Switch to LED lighting and smart controls.",
    "Invest in building insulation for heating/cooling efficiency.",
    "Utilize cloud-based IT for better energy management.",
];

/// How good the reduction from optimisation is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReductionRating {
    /// More than 40% reduction
    #[strum(to_string = "outstanding")]
    Outstanding,
    /// More than 20% and at most 40% reduction
    #[strum(to_string = "good progress")]
    GoodProgress,
    /// At most 20% reduction
    #[strum(to_string = "room for improvement")]
    RoomForImprovement,
}

impl ReductionRating {
    /// Classify a percentage reduction in emissions.
    ///
    /// The thresholds are exclusive, so a reduction of exactly 40% is `GoodProgress` and exactly
    /// 20% is `RoomForImprovement`.
    pub fn from_reduction(reduction: Percentage) -> Self {
        if reduction > OUTSTANDING_THRESHOLD {
            Self::Outstanding
        } else if reduction > GOOD_PROGRESS_THRESHOLD {
            Self::GoodProgress
        } else {
            Self::RoomForImprovement
        }
    }

    /// Advice to show alongside this rating
    pub const fn message(self) -> &'static str {
        match self {
            Self::Outstanding => {
                "Outstanding! Your optimizations yield significant reductions in carbon footprint."
            }
            Self::GoodProgress => {
                "Good progress. Consider further electrification and efficiency upgrades."
            }
            Self::RoomForImprovement => {
                "There's room for improvement. Explore emission reduction strategies."
            }
        }
    }
}

impl EmissionsResult {
    /// Classify the reduction achieved by optimisation
    pub fn rating(&self) -> ReductionRating {
        ReductionRating::from_reduction(self.reduction)
    }
}

/// A slice of the pie chart of optimised emissions by category
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    /// The category this slice represents
    pub category: EmissionCategory,
    /// Optimised emissions for the category
    pub value: Tons,
    /// Proportion of total optimised emissions
    pub share: Dimensionless,
    /// Whether this is the largest slice, which is drawn pulled out from the pie
    pub emphasised: bool,
}

/// A bar in the chart comparing baseline and optimised totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalBar {
    /// Name of the scenario
    pub scenario: String,
    /// Total emissions for the scenario
    pub total: Tons,
}

/// Data for a pie chart of optimised emissions, one slice per category
pub fn pie_chart_data(result: &EmissionsResult) -> Vec<PieSlice> {
    let largest = result.largest_optimised();
    result
        .optimised
        .iter()
        .map(|(&category, &value)| PieSlice {
            category,
            value,
            share: result.optimised_share(category),
            emphasised: largest.is_some_and(|largest| result.optimised[&largest] == value),
        })
        .collect()
}

/// Data for a bar chart comparing baseline and optimised totals
pub fn bar_chart_data(result: &EmissionsResult) -> [TotalBar; 2] {
    [
        TotalBar {
            scenario: "Baseline".into(),
            total: result.total_baseline,
        },
        TotalBar {
            scenario: "Optimized".into(),
            total: result.total_optimised,
        },
    ]
}

/// The executive summary of the results: totals, the reduction and advice
pub fn executive_summary(result: &EmissionsResult) -> String {
    format!(
        "Executive Summary\n\
         Total Baseline Emissions: {:.1} tons CO₂e\n\
         Optimized Emissions: {:.1} tons CO₂e\n\
         Estimated Emission Reduction: {:.1}%\n\
         {}\n",
        result.total_baseline.value(),
        result.total_optimised.value(),
        result.reduction.value(),
        result.rating().message()
    )
}

/// A table of baseline and optimised emissions for each category
pub fn summary_table(result: &EmissionsResult) -> String {
    let mut out = format!(
        "{:<16} {:>20} {:>21}\n",
        "Category", "Baseline (tons CO₂e)", "Optimized (tons CO₂e)"
    );
    for (category, baseline) in &result.baseline {
        let optimised = result.optimised[category];
        writeln!(
            &mut out,
            "{:<16} {:>20.2} {:>21.2}",
            category.to_string(),
            baseline.value(),
            optimised.value()
        )
        .unwrap();
    }

    out
}

/// The share of optimised emissions for each category, with the largest marked
pub fn share_listing(result: &EmissionsResult) -> String {
    let mut out = String::from("Emission Share by Category (Post-Optimization)\n");
    for slice in pie_chart_data(result) {
        let marker = if slice.emphasised { '*' } else { ' ' };
        writeln!(
            &mut out,
            "{marker} {:<16} {:>6.1}%  ({:.2} tons CO₂e)",
            slice.category.to_string(),
            Percentage::from(slice.share).value(),
            slice.value.value()
        )
        .unwrap();
    }

    out
}

/// The list of recommendations as bullet points
pub fn recommendations_listing() -> String {
    let mut out = String::from("Sustainability Recommendations\n");
    for tip in RECOMMENDATIONS {
        writeln!(&mut out, "- {tip}").unwrap();
    }

    out
}
