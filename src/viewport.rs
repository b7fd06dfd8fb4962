//! 3D view of the charge scene painted with egui shapes

use charge_renderer::{
    palette, palette::Rgb, Camera, LegendEntry, LegendKind, SceneDescriptor, SceneParams,
};
use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke};
use glam::{DVec3, Vec2};

/// Radians of orbit per dragged point
const ORBIT_SPEED: f32 = 0.01;
/// Zoom factor per scrolled point
const ZOOM_SPEED: f32 = 0.002;
/// Pointer distance (points) at which a distance label shows its hover text
const LABEL_HOVER_RADIUS: f32 = 14.0;
/// Height of one legend row in points
const LEGEND_ROW: f32 = 16.0;

fn color(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

struct Projector {
    camera: Camera,
    rect: Rect,
}

impl Projector {
    fn project(&self, world: DVec3) -> Option<Pos2> {
        let size = Vec2::new(self.rect.width(), self.rect.height());
        self.camera
            .project(world.as_vec3(), size)
            .map(|p| self.rect.min + egui::vec2(p.x, p.y))
    }
}

/// Paint the scene (or a hint when there is none) and handle orbit/zoom input.
pub fn show(
    ui: &mut egui::Ui,
    scene: Option<&SceneDescriptor>,
    camera: &mut Camera,
    params: &SceneParams,
) {
    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::drag());
    let rect = response.rect;
    painter.rect_filled(rect, 0.0, color(palette::background_color()));

    let Some(scene) = scene else {
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            "Enter the charges and press Calculate",
            FontId::proportional(16.0),
            color(palette::label_color()),
        );
        return;
    };

    if response.dragged() {
        let delta = response.drag_delta();
        camera.rotate(-delta.x * ORBIT_SPEED, -delta.y * ORBIT_SPEED);
    }
    if response.hovered() {
        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll != 0.0 {
            camera.zoom((-scroll * ZOOM_SPEED).exp());
        }
    }
    camera.resize(rect.width(), rect.height());

    let projector = Projector {
        camera: *camera,
        rect,
    };
    let text_color = color(palette::label_color());

    painter.text(
        rect.center_top() + egui::vec2(0.0, 8.0),
        Align2::CENTER_TOP,
        scene.title,
        FontId::proportional(18.0),
        text_color,
    );

    draw_axes(&painter, &projector, scene, text_color);

    if params.show_distance_lines {
        let stroke = Stroke::new(params.line_width, color(palette::distance_line_color()));
        for link in &scene.links {
            if let (Some(a), Some(b)) = (projector.project(link.from), projector.project(link.to))
            {
                painter.extend(Shape::dashed_line(&[a, b], stroke, 6.0, 4.0));
            }
        }
    }

    if params.show_force_glyphs {
        for glyph in scene.force_glyphs.iter().filter(|g| g.is_visible()) {
            if let (Some(tail), Some(tip)) =
                (projector.project(glyph.anchor), projector.project(glyph.tip))
            {
                draw_arrow(&painter, tail, tip, color(glyph.color));
            }
        }
    }

    for marker in &scene.markers {
        let Some(center) = projector.project(marker.position) else {
            continue;
        };
        painter.circle_filled(center, marker.size * 0.5, color(marker.color));
        painter.text(
            center - egui::vec2(0.0, marker.size),
            Align2::CENTER_BOTTOM,
            &marker.label,
            FontId::proportional(12.0),
            text_color,
        );
    }

    let mut hovered = None;
    if params.show_distance_labels {
        let pointer = response.hover_pos();
        for link in &scene.links {
            let Some(at) = projector.project(link.midpoint) else {
                continue;
            };
            painter.text(
                at,
                Align2::CENTER_CENTER,
                &link.label,
                FontId::proportional(params.label_size),
                text_color,
            );
            if pointer.is_some_and(|p| p.distance(at) <= LABEL_HOVER_RADIUS) {
                hovered = Some(link.hover_text.clone());
            }
        }
    }

    if params.show_legend {
        draw_legend(&painter, rect, &scene.legend(params), text_color);
    }

    if let Some(text) = hovered {
        response.on_hover_text_at_pointer(text);
    }
}

/// Swatch and name per entry, stacked in the top-right corner
fn draw_legend(painter: &egui::Painter, rect: Rect, entries: &[LegendEntry], text: Color32) {
    if entries.is_empty() {
        return;
    }

    let font = FontId::proportional(12.0);
    let swatch = 14.0;
    let padding = 6.0;
    let text_width = entries
        .iter()
        .map(|entry| {
            painter
                .layout_no_wrap(entry.name.clone(), font.clone(), text)
                .size()
                .x
        })
        .fold(0.0, f32::max);

    let size = egui::vec2(
        padding * 3.0 + swatch + text_width,
        padding * 2.0 + LEGEND_ROW * entries.len() as f32,
    );
    let frame = Rect::from_min_size(
        rect.right_top() + egui::vec2(-size.x - 10.0, 36.0),
        size,
    );
    let [r, g, b] = palette::background_color();
    painter.rect_filled(frame, 4.0, Color32::from_rgba_unmultiplied(r, g, b, 220));

    for (row, entry) in entries.iter().enumerate() {
        let y = frame.top() + padding + LEGEND_ROW * (row as f32 + 0.5);
        let left = frame.left() + padding;
        let fill = color(entry.color);

        match entry.kind {
            LegendKind::Marker => {
                painter.circle_filled(Pos2::new(left + swatch * 0.5, y), swatch * 0.3, fill);
            }
            LegendKind::Force => draw_arrow(
                painter,
                Pos2::new(left, y),
                Pos2::new(left + swatch, y),
                fill,
            ),
        }

        painter.text(
            Pos2::new(left + swatch + padding, y),
            Align2::LEFT_CENTER,
            &entry.name,
            font.clone(),
            text,
        );
    }
}

/// Axis triad at the lower corner of the scene bounds
fn draw_axes(
    painter: &egui::Painter,
    projector: &Projector,
    scene: &SceneDescriptor,
    text: Color32,
) {
    let origin = scene.bounds_min;
    let length = scene.extent.max(1.0e-9) * 0.25;
    let stroke = Stroke::new(1.0, color(palette::charge_color(7)));

    let Some(start) = projector.project(origin) else {
        return;
    };
    for (axis, title) in [DVec3::X, DVec3::Y, DVec3::Z].into_iter().zip(scene.axis_titles) {
        if let Some(end) = projector.project(origin + axis * length) {
            painter.line_segment([start, end], stroke);
            painter.text(end, Align2::LEFT_BOTTOM, title, FontId::proportional(11.0), text);
        }
    }
}

fn draw_arrow(painter: &egui::Painter, tail: Pos2, tip: Pos2, fill: Color32) {
    let shaft = tip - tail;
    let length = shaft.length();
    if length < 1.0 {
        painter.circle_filled(tip, 2.0, fill);
        return;
    }

    let dir = shaft / length;
    let normal = egui::vec2(-dir.y, dir.x);
    let head = (length * 0.3).clamp(4.0, 14.0);
    let base = tip - dir * head;

    painter.line_segment([tail, base], Stroke::new(2.0, fill));
    painter.add(Shape::convex_polygon(
        vec![tip, base + normal * head * 0.5, base - normal * head * 0.5],
        fill,
        Stroke::NONE,
    ));
}
