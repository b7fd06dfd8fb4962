//! Force superposition over every pair of charges

use charge_physics::{coulomb_force, Charge, MAX_CHARGES, MIN_CHARGES};
use glam::DVec3;

use crate::distance::DistanceMatrix;
use crate::error::ForceError;

/// Result of solving one charge configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ForceField {
    net_forces: Vec<DVec3>,
    distances: DistanceMatrix,
}

impl ForceField {
    /// Number of charges solved
    pub fn len(&self) -> usize {
        self.net_forces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.net_forces.is_empty()
    }

    /// Net force on charge `i` in newtons
    pub fn net_force(&self, i: usize) -> DVec3 {
        self.net_forces[i]
    }

    pub fn net_forces(&self) -> &[DVec3] {
        &self.net_forces
    }

    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Largest net force magnitude across all charges
    pub fn max_force_magnitude(&self) -> f64 {
        self.net_forces
            .iter()
            .map(|f| f.length())
            .fold(0.0, f64::max)
    }
}

/// Compute the net Coulomb force on each charge and all pairwise distances.
///
/// Each unordered pair is evaluated once: the force on `i` due to `j` is
/// added to `i` and its negation to `j`. The first coincident pair found in
/// `(i, j)` order aborts the whole computation, as does any charge with an
/// infinite or NaN value.
pub fn solve(charges: &[Charge]) -> Result<ForceField, ForceError> {
    let n = charges.len();
    if !(MIN_CHARGES..=MAX_CHARGES).contains(&n) {
        return Err(ForceError::ChargeCount { count: n });
    }
    if let Some(index) = charges.iter().position(|c| !c.is_finite()) {
        return Err(ForceError::NonFinite { index });
    }

    let mut net_forces = vec![DVec3::ZERO; n];
    let mut distances = DistanceMatrix::zeros(n);

    for i in 0..n {
        for j in (i + 1)..n {
            let f_vec = coulomb_force(&charges[i], &charges[j]).ok_or(
                ForceError::CoincidentCharges {
                    first: i,
                    second: j,
                },
            )?;

            distances.set_pair(i, j, charges[i].distance_to(&charges[j]));
            net_forces[i] += f_vec;
            net_forces[j] -= f_vec;
        }
    }

    log::debug!("Solved {} charges ({} pairs)", n, n * (n - 1) / 2);

    Ok(ForceField {
        net_forces,
        distances,
    })
}
