//! # Force Engine
//!
//! Net electrostatic force on every charge of a configuration, plus the
//! pairwise distance matrix, computed in a single pass over all pairs.

pub mod distance;
pub mod engine;
pub mod error;

pub use distance::*;
pub use engine::*;
pub use error::*;
