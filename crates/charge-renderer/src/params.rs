//! Rendering parameters for runtime tuning

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneParams {
    /// Longest force glyph as a fraction of the scene extent
    pub force_glyph_scale: f64,
    /// Charge marker diameter in points
    pub marker_size: f32,
    /// Width of the dashed distance lines in points
    pub line_width: f32,
    /// Font size of the distance labels
    pub label_size: f32,

    pub show_force_glyphs: bool,
    pub show_distance_lines: bool,
    pub show_distance_labels: bool,
    /// Overlay naming each charge and drawn force
    pub show_legend: bool,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            force_glyph_scale: 0.2,
            marker_size: 8.0,
            line_width: 2.0,
            label_size: 10.0,
            show_force_glyphs: true,
            show_distance_lines: true,
            show_distance_labels: true,
            show_legend: true,
        }
    }
}
