use crate::domain::model::{EstimatedSalary, SalaryBound};

/// Applied to a lone lower bound: the typical salary sits above the stated floor.
pub const LOWER_ONLY_FACTOR: f64 = 1.2;
/// Applied to a lone upper bound: the typical salary sits below the stated ceiling.
pub const UPPER_ONLY_FACTOR: f64 = 0.8;

pub fn estimate(lower: Option<f64>, upper: Option<f64>) -> EstimatedSalary {
    match (lower, upper) {
        (None, None) => None,
        (Some(lower), Some(upper)) => Some((lower + upper) / 2.0),
        (Some(lower), None) => Some(lower * LOWER_ONLY_FACTOR),
        (None, Some(upper)) => Some(upper * UPPER_ONLY_FACTOR),
    }
}

pub fn estimate_bound(bound: SalaryBound) -> EstimatedSalary {
    estimate(bound.lower, bound.upper)
}
