//! Charge input form state and the calculation it triggers

use charge_physics::{Charge, MAX_CHARGES, MIN_CHARGES};
use charge_renderer::{ForceReport, SceneDescriptor, SceneParams};
use force_engine::{solve, ForceError, ForceField};
use rand::Rng;

/// Half-width of the integer lattice used by [`ChargeForm::scatter`]
const SCATTER_RADIUS: i32 = 5;

/// Parse a typed form value, accepting only finite numbers.
///
/// Rejects `inf`, `NaN` and literals that overflow to infinity such as
/// `1e400`, so the field keeps its previous value.
pub fn parse_finite(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// One row of the form: the editable values for a single charge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChargeInput {
    pub charge: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl ChargeInput {
    fn with_defaults(index: usize) -> Self {
        Self {
            charge: Charge::default_charge_for(index),
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    pub fn to_charge(self) -> Charge {
        Charge::at(self.charge, self.x, self.y, self.z)
    }
}

/// Values for up to [`MAX_CHARGES`] charges, of which the first `count` are
/// active. Rows beyond the count keep their values so shrinking and growing
/// the count does not lose edits.
#[derive(Debug, Clone)]
pub struct ChargeForm {
    count: usize,
    inputs: Vec<ChargeInput>,
}

impl Default for ChargeForm {
    fn default() -> Self {
        Self {
            count: MIN_CHARGES,
            inputs: (0..MAX_CHARGES).map(ChargeInput::with_defaults).collect(),
        }
    }
}

impl ChargeForm {
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn set_count(&mut self, count: usize) {
        self.count = count.clamp(MIN_CHARGES, MAX_CHARGES);
    }

    pub fn active(&self) -> &[ChargeInput] {
        &self.inputs[..self.count]
    }

    pub fn active_mut(&mut self) -> &mut [ChargeInput] {
        &mut self.inputs[..self.count]
    }

    /// Immutable copy of the active charges for one calculation
    pub fn snapshot(&self) -> Vec<Charge> {
        self.active().iter().map(|input| input.to_charge()).collect()
    }

    /// Move the active charges to distinct random points of an integer
    /// lattice, keeping their magnitudes.
    pub fn scatter<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let side = (2 * SCATTER_RADIUS + 1) as usize;
        let cells = rand::seq::index::sample(rng, side * side * side, self.count);

        for (input, cell) in self.inputs.iter_mut().zip(cells.into_iter()) {
            let coord = |c: usize| (c % side) as f64 - SCATTER_RADIUS as f64;
            input.x = coord(cell);
            input.y = coord(cell / side);
            input.z = coord(cell / (side * side));
        }
    }
}

/// Everything shown for one successful calculation
#[derive(Debug, Clone)]
pub struct Calculation {
    pub charges: Vec<Charge>,
    pub field: ForceField,
    pub report: ForceReport,
    pub scene: SceneDescriptor,
    scene_params: SceneParams,
}

impl Calculation {
    pub fn run(charges: Vec<Charge>, params: &SceneParams) -> Result<Self, ForceError> {
        let field = solve(&charges)?;
        let report = ForceReport::new(&field);
        let scene = SceneDescriptor::build(&charges, &field, params);

        Ok(Self {
            charges,
            field,
            report,
            scene,
            scene_params: *params,
        })
    }

    /// Rebuild the scene if the rendering parameters changed
    pub fn refresh_scene(&mut self, params: &SceneParams) {
        if self.scene_params != *params {
            self.scene = SceneDescriptor::build(&self.charges, &self.field, params);
            self.scene_params = *params;
        }
    }
}
