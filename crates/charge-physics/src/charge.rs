//! Point charge record

use glam::DVec3;

use crate::constants::DEFAULT_CHARGE;

/// A point charge placed in 3D space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Charge {
    /// Charge in coulombs (sign included)
    pub charge: f64,
    /// Position in meters
    pub position: DVec3,
}

impl Charge {
    pub const fn new(charge: f64, position: DVec3) -> Self {
        Self { charge, position }
    }

    /// Create a charge from loose coordinates
    pub fn at(charge: f64, x: f64, y: f64, z: f64) -> Self {
        Self::new(charge, DVec3::new(x, y, z))
    }

    /// Value the input form starts with for the charge at `index` (0-based).
    ///
    /// The second charge is negative so the default pair attracts; every
    /// other charge is positive.
    pub fn default_charge_for(index: usize) -> f64 {
        if index == 1 {
            -DEFAULT_CHARGE
        } else {
            DEFAULT_CHARGE
        }
    }

    /// Same position, charge multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.charge * factor, self.position)
    }

    /// Distance to another charge in meters
    pub fn distance_to(&self, other: &Charge) -> f64 {
        self.position.distance(other.position)
    }

    /// True when both charges sit on exactly the same point
    pub fn coincides_with(&self, other: &Charge) -> bool {
        self.distance_to(other) == 0.0
    }

    /// Charge and every coordinate are finite numbers
    pub fn is_finite(&self) -> bool {
        self.charge.is_finite() && self.position.is_finite()
    }
}
