//! # Charge Physics
//!
//! Point charges in 3D space and the electrostatic (Coulomb) interaction
//! between a pair of them.

pub mod charge;
pub mod constants;
pub mod forces;

pub use charge::*;
pub use constants::*;
pub use forces::*;
