use crate::models::policy::ImpactRating;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub meets_criteria: bool,
}

/// Compliant when `value <= limit`; the boundary counts as compliant and NaN never does.
pub fn evaluate(value: f64, limit: f64) -> Evaluation {
    Evaluation {
        meets_criteria: value <= limit,
    }
}

/// `Low` when compliant, otherwise the rating the impact table assigns to the failing metric.
pub fn classify(meets_criteria: bool, failure_rating: ImpactRating) -> ImpactRating {
    if meets_criteria {
        ImpactRating::Low
    } else {
        failure_rating
    }
}
