//! Backend-agnostic description of the 3D charge scene
//!
//! The viewport (or any other consumer) only needs positions, vectors,
//! labels and colors; nothing here touches a graphics API.

use charge_physics::Charge;
use force_engine::ForceField;
use glam::DVec3;

use crate::format::{metres, scientific};
use crate::palette::{self, Rgb};
use crate::params::SceneParams;

pub const SCENE_TITLE: &str = "Electric Charge Interaction with Distances";
pub const AXIS_TITLES: [&str; 3] = ["X (m)", "Y (m)", "Z (m)"];

/// One dot per charge
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeMarker {
    pub position: DVec3,
    /// Text drawn above the marker, `q1`, `q2`, ...
    pub label: String,
    /// Legend entry
    pub name: String,
    pub color: Rgb,
    pub size: f32,
}

/// Net force drawn as a cone/arrow with its tail on the charge
#[derive(Debug, Clone, PartialEq)]
pub struct ForceGlyph {
    pub anchor: DVec3,
    pub tip: DVec3,
    /// Unscaled net force in newtons
    pub force: DVec3,
    pub name: String,
    pub color: Rgb,
}

impl ForceGlyph {
    /// Drawn length in scene units
    pub fn length(&self) -> f64 {
        self.anchor.distance(self.tip)
    }

    /// Zero forces produce a degenerate glyph that is skipped
    pub fn is_visible(&self) -> bool {
        self.length() > 0.0
    }
}

/// Dashed line between a pair of charges plus its midpoint label
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceLink {
    /// 0-based charge indices, `first < second`
    pub first: usize,
    pub second: usize,
    pub from: DVec3,
    pub to: DVec3,
    pub midpoint: DVec3,
    pub distance: f64,
    pub label: String,
    pub hover_text: String,
}

/// What a legend swatch depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendKind {
    Marker,
    Force,
}

/// One named row of the legend overlay
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub name: String,
    pub color: Rgb,
    pub kind: LegendKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneDescriptor {
    pub title: &'static str,
    pub axis_titles: [&'static str; 3],
    pub markers: Vec<ChargeMarker>,
    pub force_glyphs: Vec<ForceGlyph>,
    pub links: Vec<DistanceLink>,
    /// Axis-aligned bounds of all charge positions
    pub bounds_min: DVec3,
    pub bounds_max: DVec3,
    /// Largest pairwise distance
    pub extent: f64,
}

impl SceneDescriptor {
    /// Build the scene for a solved configuration.
    ///
    /// # Panics
    /// If `field` was not solved from `charges`.
    pub fn build(charges: &[Charge], field: &ForceField, params: &SceneParams) -> Self {
        assert_eq!(
            charges.len(),
            field.len(),
            "force field does not match the charge list"
        );

        let distances = field.distances();
        let extent = distances.max_distance();
        let max_force = field.max_force_magnitude();

        let markers = charges
            .iter()
            .enumerate()
            .map(|(i, charge)| ChargeMarker {
                position: charge.position,
                label: format!("q{}", i + 1),
                name: format!("Charge {}", i + 1),
                color: palette::charge_color(i),
                size: params.marker_size,
            })
            .collect();

        let force_glyphs = charges
            .iter()
            .zip(field.net_forces())
            .enumerate()
            .map(|(i, (charge, force))| {
                let offset = if max_force > 0.0 {
                    *force / max_force * params.force_glyph_scale * extent
                } else {
                    DVec3::ZERO
                };

                ForceGlyph {
                    anchor: charge.position,
                    tip: charge.position + offset,
                    force: *force,
                    name: format!("Force on q{}", i + 1),
                    color: palette::force_color(),
                }
            })
            .collect();

        let links = distances
            .pairs()
            .map(|(i, j, distance)| {
                let from = charges[i].position;
                let to = charges[j].position;
                DistanceLink {
                    first: i,
                    second: j,
                    from,
                    to,
                    midpoint: (from + to) / 2.0,
                    distance,
                    label: metres(distance),
                    hover_text: format!(
                        "Distance q{}-q{}: {}m",
                        i + 1,
                        j + 1,
                        scientific(distance)
                    ),
                }
            })
            .collect();

        let (bounds_min, bounds_max) = charges.iter().fold(
            (DVec3::splat(f64::INFINITY), DVec3::splat(f64::NEG_INFINITY)),
            |(lo, hi), charge| (lo.min(charge.position), hi.max(charge.position)),
        );

        Self {
            title: SCENE_TITLE,
            axis_titles: AXIS_TITLES,
            markers,
            force_glyphs,
            links,
            bounds_min,
            bounds_max,
            extent,
        }
    }

    /// Legend rows: every charge marker, then each force glyph that is
    /// currently drawn. Distance links have no entry.
    pub fn legend(&self, params: &SceneParams) -> Vec<LegendEntry> {
        let markers = self.markers.iter().map(|marker| LegendEntry {
            name: marker.name.clone(),
            color: marker.color,
            kind: LegendKind::Marker,
        });

        let forces = self
            .force_glyphs
            .iter()
            .filter(|glyph| params.show_force_glyphs && glyph.is_visible())
            .map(|glyph| LegendEntry {
                name: glyph.name.clone(),
                color: glyph.color,
                kind: LegendKind::Force,
            });

        markers.chain(forces).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use force_engine::solve;

    fn square() -> Vec<Charge> {
        vec![
            Charge::at(1.0e-6, 0.0, 0.0, 0.0),
            Charge::at(-1.0e-6, 1.0, 0.0, 0.0),
            Charge::at(2.0e-6, 1.0, 1.0, 0.0),
            Charge::at(1.0e-6, 0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_scene_counts() {
        let charges = square();
        let field = solve(&charges).unwrap();
        let scene = SceneDescriptor::build(&charges, &field, &SceneParams::default());

        assert_eq!(scene.markers.len(), 4);
        assert_eq!(scene.force_glyphs.len(), 4);
        assert_eq!(scene.links.len(), 6);
        assert_eq!(scene.title, SCENE_TITLE);
        assert_eq!(scene.axis_titles, ["X (m)", "Y (m)", "Z (m)"]);
    }

    #[test]
    fn test_markers_are_labelled_by_index() {
        let charges = square();
        let field = solve(&charges).unwrap();
        let scene = SceneDescriptor::build(&charges, &field, &SceneParams::default());

        assert_eq!(scene.markers[0].label, "q1");
        assert_eq!(scene.markers[3].name, "Charge 4");
        assert_eq!(scene.markers[2].position, charges[2].position);
        assert_eq!(scene.markers[1].color, palette::charge_color(1));
        assert_eq!(scene.force_glyphs[2].name, "Force on q3");
    }

    #[test]
    fn test_links_carry_labels_and_midpoints() {
        let charges = square();
        let field = solve(&charges).unwrap();
        let scene = SceneDescriptor::build(&charges, &field, &SceneParams::default());

        let diagonal = &scene.links[1];
        assert_eq!((diagonal.first, diagonal.second), (0, 2));
        assert_eq!(diagonal.midpoint, DVec3::new(0.5, 0.5, 0.0));
        assert_eq!(diagonal.label, "1.41m");
        assert_eq!(diagonal.hover_text, "Distance q1-q3: 1.41e+00m");
    }

    #[test]
    fn test_largest_glyph_uses_visual_scale() {
        let charges = square();
        let field = solve(&charges).unwrap();
        let params = SceneParams::default();
        let scene = SceneDescriptor::build(&charges, &field, &params);

        let longest = scene
            .force_glyphs
            .iter()
            .map(ForceGlyph::length)
            .fold(0.0, f64::max);
        assert_relative_eq!(
            longest,
            params.force_glyph_scale * 2.0_f64.sqrt(),
            max_relative = 1.0e-9
        );

        for (glyph, force) in scene.force_glyphs.iter().zip(field.net_forces()) {
            let direction = (glyph.tip - glyph.anchor).normalize();
            assert_relative_eq!(direction.dot(force.normalize()), 1.0, epsilon = 1.0e-9);
        }
    }

    #[test]
    fn test_zero_force_glyph_is_hidden() {
        let charges = [
            Charge::at(1.0e-6, -1.0, 0.0, 0.0),
            Charge::at(1.0e-6, 1.0, 0.0, 0.0),
            Charge::at(1.0e-6, 0.0, 0.0, 0.0),
        ];
        let field = solve(&charges).unwrap();
        let scene = SceneDescriptor::build(&charges, &field, &SceneParams::default());

        assert!(scene.force_glyphs[0].is_visible());
        assert!(!scene.force_glyphs[2].is_visible());
    }

    #[test]
    fn test_legend_lists_markers_then_forces() {
        let charges = square();
        let field = solve(&charges).unwrap();
        let params = SceneParams::default();
        let scene = SceneDescriptor::build(&charges, &field, &params);

        let legend = scene.legend(&params);
        let names: Vec<_> = legend.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Charge 1",
                "Charge 2",
                "Charge 3",
                "Charge 4",
                "Force on q1",
                "Force on q2",
                "Force on q3",
                "Force on q4"
            ]
        );
        assert_eq!(legend[1].color, palette::charge_color(1));
        assert_eq!(legend[1].kind, LegendKind::Marker);
        assert_eq!(legend[4].color, palette::force_color());
        assert_eq!(legend[4].kind, LegendKind::Force);
    }

    #[test]
    fn test_legend_skips_hidden_forces() {
        let charges = [
            Charge::at(1.0e-6, -1.0, 0.0, 0.0),
            Charge::at(1.0e-6, 1.0, 0.0, 0.0),
            Charge::at(1.0e-6, 0.0, 0.0, 0.0),
        ];
        let field = solve(&charges).unwrap();
        let mut params = SceneParams::default();
        let scene = SceneDescriptor::build(&charges, &field, &params);

        let forces: Vec<_> = scene
            .legend(&params)
            .into_iter()
            .filter(|e| e.kind == LegendKind::Force)
            .map(|e| e.name)
            .collect();
        assert_eq!(forces, ["Force on q1", "Force on q2"]);

        params.show_force_glyphs = false;
        let legend = scene.legend(&params);
        assert_eq!(legend.len(), 3);
        assert!(legend.iter().all(|e| e.kind == LegendKind::Marker));
    }

    #[test]
    fn test_bounds_cover_all_charges() {
        let charges = [
            Charge::at(1.0e-6, -1.0, 2.0, 0.5),
            Charge::at(1.0e-6, 3.0, -2.0, 0.0),
        ];
        let field = solve(&charges).unwrap();
        let scene = SceneDescriptor::build(&charges, &field, &SceneParams::default());

        assert_eq!(scene.bounds_min, DVec3::new(-1.0, -2.0, 0.0));
        assert_eq!(scene.bounds_max, DVec3::new(3.0, 2.0, 0.5));
        assert_eq!(scene.extent, charges[0].distance_to(&charges[1]));
    }
}
