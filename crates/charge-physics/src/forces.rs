//! Coulomb force between two point charges

use glam::DVec3;

use crate::charge::Charge;
use crate::constants::COULOMB_K;

/// Signed magnitude of the Coulomb force
/// F = k * q1 * q2 / r²
///
/// Positive for like charges (repulsion), negative for opposite charges.
pub fn force_magnitude(q1: f64, q2: f64, r: f64) -> f64 {
    COULOMB_K * q1 * q2 / (r * r)
}

/// Calculate the electrostatic force exerted on `target` by `source`.
///
/// Returns `None` when both charges occupy the same point, where the
/// inverse-square law has no direction.
pub fn coulomb_force(target: &Charge, source: &Charge) -> Option<DVec3> {
    // Points from the source towards the target, so repulsion pushes the
    // target away from the source.
    let r_vec = target.position - source.position;
    let r = r_vec.length();

    if r == 0.0 {
        return None;
    }

    let r_hat = r_vec / r;
    Some(r_hat * force_magnitude(target.charge, source.charge, r))
}
