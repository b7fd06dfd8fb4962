//! Errors raised while solving a charge configuration

use std::fmt;

use charge_physics::{MAX_CHARGES, MIN_CHARGES};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceError {
    /// Two distinct charges share a position (0-based indices, `first < second`)
    CoincidentCharges { first: usize, second: usize },
    /// Number of charges outside `MIN_CHARGES..=MAX_CHARGES`
    ChargeCount { count: usize },
    /// A charge value or coordinate is infinite or NaN (0-based index)
    NonFinite { index: usize },
}

impl fmt::Display for ForceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForceError::CoincidentCharges { first, second } => write!(
                f,
                "charges {} and {} occupy the same point; the force cannot be computed",
                first + 1,
                second + 1
            ),
            ForceError::ChargeCount { count } => write!(
                f,
                "expected between {MIN_CHARGES} and {MAX_CHARGES} charges, got {count}"
            ),
            ForceError::NonFinite { index } => write!(
                f,
                "charge {} has an infinite or undefined value",
                index + 1
            ),
        }
    }
}

impl std::error::Error for ForceError {}
