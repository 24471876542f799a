use serde::{Deserialize, Serialize};

/// Center of the "low" band used by the centroid defuzzifier.
pub const LOW_CENTER: f64 = 25.0;
/// Center of the "medium" band used by the centroid defuzzifier.
pub const MEDIUM_CENTER: f64 = 50.0;
/// Center of the "high" band used by the centroid defuzzifier.
pub const HIGH_CENTER: f64 = 75.0;

/// Score returned when a membership triple carries no weight at all.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Breakpoints shared by every indicator that is fuzzified on a 0–100 scale.
pub const STANDARD_BREAKPOINTS: Breakpoints = Breakpoints::new(25.0, 50.0, 75.0);

/// The three breakpoints of a low/medium/high triangular partition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoints {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl Breakpoints {
    pub const fn new(low: f64, medium: f64, high: f64) -> Self {
        Self { low, medium, high }
    }

    pub fn membership(&self, value: f64) -> Membership {
        membership(value, self.low, self.medium, self.high)
    }
}

/// Degrees of truth a crisp value holds for the low, medium and high classes.
///
/// The weights are non-negative but are not required to sum to one; callers
/// that combine several triples renormalize before defuzzifying when needed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl Membership {
    pub const fn new(low: f64, medium: f64, high: f64) -> Self {
        Self { low, medium, high }
    }

    pub fn total(&self) -> f64 {
        self.low + self.medium + self.high
    }

    pub fn is_empty(&self) -> bool {
        self.low == 0.0 && self.medium == 0.0 && self.high == 0.0
    }

    /// Component-wise mean of the given triples. An empty slice yields an empty triple.
    pub fn average(memberships: &[Membership]) -> Membership {
        if memberships.is_empty() {
            return Membership::default();
        }

        let count = memberships.len() as f64;
        let sum = memberships
            .iter()
            .fold(Membership::default(), |acc, item| Membership {
                low: acc.low + item.low,
                medium: acc.medium + item.medium,
                high: acc.high + item.high,
            });

        Membership {
            low: sum.low / count,
            medium: sum.medium / count,
            high: sum.high / count,
        }
    }

    /// Scale the triple so its weights sum to one. Triples without weight are returned untouched.
    pub fn normalized(self) -> Membership {
        let total = self.total();
        if total > 0.0 {
            Membership {
                low: self.low / total,
                medium: self.medium / total,
                high: self.high / total,
            }
        } else {
            self
        }
    }
}

/// Triangular low/medium/high membership of `value` against three breakpoints.
///
/// Equal adjacent breakpoints collapse the corresponding ramp into a step at
/// the boundary instead of dividing by zero.
pub fn membership(value: f64, low: f64, medium: f64, high: f64) -> Membership {
    if value <= low {
        Membership::new(1.0, 0.0, 0.0)
    } else if value <= medium {
        let span = medium - low;
        if span <= 0.0 {
            return Membership::new(0.0, 1.0, 0.0);
        }
        Membership::new((medium - value) / span, (value - low) / span, 0.0)
    } else if value <= high {
        let span = high - medium;
        if span <= 0.0 {
            return Membership::new(0.0, 0.0, 1.0);
        }
        Membership::new(0.0, (high - value) / span, (value - medium) / span)
    } else {
        Membership::new(0.0, 0.0, 1.0)
    }
}

/// Centroid of the triple against the fixed 25/50/75 band centers.
pub fn defuzzify(membership: &Membership) -> f64 {
    let denominator = membership.total();
    if denominator == 0.0 {
        return NEUTRAL_SCORE;
    }

    let numerator = membership.low * LOW_CENTER
        + membership.medium * MEDIUM_CENTER
        + membership.high * HIGH_CENTER;
    numerator / denominator
}
