//! # Charge Renderer
//!
//! Turns a solved charge configuration into things a person can look at:
//! a 3D scene description, an orbit camera to view it with, and a
//! formatted numeric report.

pub mod camera;
pub mod format;
pub mod palette;
pub mod params;
pub mod report;
pub mod scene;

pub use camera::*;
pub use params::*;
pub use report::*;
pub use scene::*;
