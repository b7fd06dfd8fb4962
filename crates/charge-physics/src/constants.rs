//! Physical constants and input limits for the charge calculator
//!
//! Values are in SI units: coulombs, meters and newtons.

/// Coulomb constant for electrostatic force (k = 1/(4πε₀)), N·m²/C²
pub const COULOMB_K: f64 = 8.99e9;

/// Fewest charges a computation accepts
pub const MIN_CHARGES: usize = 2;

/// Most charges a computation accepts (bounded by the input form)
pub const MAX_CHARGES: usize = 20;

/// Magnitude of the charge pre-filled in the input form (1 µC)
pub const DEFAULT_CHARGE: f64 = 1.0e-6;
