//! Capacity unit conversion (display only).
//!
//! Conversions are applied to the value currently shown, so toggling
//! CC → LB → CC may not reproduce the original number (550.5 becomes 52.75
//! LB, then 550 CC).

use serde::Serialize;

/// LB/hour per CC/min.
pub const LB_PER_CC: f64 = 0.09583;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum CapacityUnit {
    /// CC/min, the dataset's unit.
    #[default]
    Cc,
    /// LB/hour.
    Lb,
}

impl CapacityUnit {
    pub fn other(self) -> Self {
        match self {
            CapacityUnit::Cc => CapacityUnit::Lb,
            CapacityUnit::Lb => CapacityUnit::Cc,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CapacityUnit::Cc => "CC",
            CapacityUnit::Lb => "LB",
        }
    }

    /// Express a source capacity (CC/min) in this unit.
    pub fn from_source(self, cc: f64) -> f64 {
        match self {
            CapacityUnit::Cc => cc,
            CapacityUnit::Lb => to_lb(cc),
        }
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// CC/min → LB/hour, rounded to two decimals.
pub fn to_lb(cc: f64) -> f64 {
    round_to(cc * LB_PER_CC, 2)
}

/// LB/hour → CC/min, rounded to a whole number.
pub fn to_cc(lb: f64) -> f64 {
    round_to(lb / LB_PER_CC, 0)
}

/// Convert a displayed value from `from` into `to`.
pub fn convert(value: f64, from: CapacityUnit, to: CapacityUnit) -> f64 {
    match (from, to) {
        (CapacityUnit::Cc, CapacityUnit::Lb) => to_lb(value),
        (CapacityUnit::Lb, CapacityUnit::Cc) => to_cc(value),
        _ => value,
    }
}
