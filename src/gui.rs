use std::time::{Duration, Instant};

use charge_physics::{MAX_CHARGES, MIN_CHARGES};
use charge_renderer::{format, palette, Camera, SceneParams};
use egui::{Color32, Context};
use egui_wgpu::Renderer;
use egui_winit::{EventResponse, State};
use force_engine::ForceError;
use glam::Vec3;
use wgpu::{Device, TextureFormat};
use winit::{event::WindowEvent, window::Window};

use crate::form::{parse_finite, Calculation, ChargeForm};
use crate::viewport;

pub struct UiState {
    pub form: ChargeForm,
    /// Last Calculate result; `None` until the button is pressed once
    pub outcome: Option<Result<Calculation, ForceError>>,
    pub scene_params: SceneParams,
    pub camera: Camera,
}

impl UiState {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            form: ChargeForm::default(),
            outcome: None,
            scene_params: SceneParams::default(),
            camera: Camera::new(width as f32, height as f32),
        }
    }

    /// Solve the current form contents and replace the shown outcome
    pub fn calculate(&mut self) {
        let charges = self.form.snapshot();
        log::info!("Calculating forces for {} charges", charges.len());

        let outcome = Calculation::run(charges, &self.scene_params);
        match &outcome {
            Ok(calculation) => {
                for line in &calculation.report.force_lines {
                    log::info!("  {}", line);
                }
                log::debug!("Distances:\n{}", calculation.report.distance_table());
            }
            Err(err) => log::warn!("Calculation aborted: {}", err),
        }

        self.outcome = Some(outcome);
        self.reset_view();
    }

    /// Frame the current scene, or the origin when there is none
    pub fn reset_view(&mut self) {
        match &self.outcome {
            Some(Ok(calculation)) => self.camera.fit_to(
                calculation.scene.bounds_min.as_vec3(),
                calculation.scene.bounds_max.as_vec3(),
            ),
            _ => self.camera.fit_to(Vec3::ZERO, Vec3::ZERO),
        }
    }
}

/// When the UI next needs a frame, from egui's requested repaint delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepaintSchedule {
    /// Draw again as soon as possible (animations, tooltips, smooth scroll)
    Now,
    /// Draw again at this instant unless input arrives first
    At(Instant),
    /// Nothing pending; wait for input
    Idle,
}

impl RepaintSchedule {
    /// Schedule for a repaint requested `delay` after `now`.
    ///
    /// egui reports "never" as `Duration::MAX`, which overflows the instant
    /// and maps to [`RepaintSchedule::Idle`].
    pub fn after(delay: Duration, now: Instant) -> Self {
        if delay.is_zero() {
            return RepaintSchedule::Now;
        }
        now.checked_add(delay)
            .map_or(RepaintSchedule::Idle, RepaintSchedule::At)
    }
}

/// GPU handles and the surface view one GUI frame draws into
pub struct FrameTarget<'a> {
    pub device: &'a Device,
    pub queue: &'a wgpu::Queue,
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub view: &'a wgpu::TextureView,
}

pub struct FrameOutput {
    /// Paint-callback buffers, submitted before the frame's encoder
    pub callback_buffers: Vec<wgpu::CommandBuffer>,
    pub repaint: RepaintSchedule,
}

/// Tessellated result of one UI pass, not yet uploaded
struct UiFrame {
    primitives: Vec<egui::ClippedPrimitive>,
    textures: egui::TexturesDelta,
    pixels_per_point: f32,
    repaint: RepaintSchedule,
}

pub struct Gui {
    context: Context,
    state: State,
    renderer: Renderer,
}

impl Gui {
    pub fn new(device: &Device, output_color_format: TextureFormat, window: &Window) -> Self {
        let context = Context::default();

        let state = State::new(
            context.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            Some(device.limits().max_texture_dimension_2d as usize),
        );
        let renderer = Renderer::new(
            device,
            output_color_format,
            egui_wgpu::RendererOptions::default(),
        );

        Self {
            context,
            state,
            renderer,
        }
    }

    /// Feed a window event to egui; `consumed` means the app should ignore it
    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> EventResponse {
        self.state.on_window_event(window, event)
    }

    /// Run the calculator UI for one frame and draw it over `target.view`
    pub fn frame(
        &mut self,
        window: &Window,
        ui_state: &mut UiState,
        target: FrameTarget<'_>,
    ) -> FrameOutput {
        let ui_frame = self.run_ui(window, ui_state);
        let callback_buffers = self.paint(window, target, &ui_frame);

        for id in &ui_frame.textures.free {
            self.renderer.free_texture(id);
        }

        FrameOutput {
            callback_buffers,
            repaint: ui_frame.repaint,
        }
    }

    fn run_ui(&mut self, window: &Window, ui_state: &mut UiState) -> UiFrame {
        let raw_input = self.state.take_egui_input(window);
        let output = self.context.run(raw_input, |ctx| ui(ctx, ui_state));

        let delay = output
            .viewport_output
            .get(&egui::ViewportId::ROOT)
            .map_or(Duration::MAX, |viewport| viewport.repaint_delay);
        self.state
            .handle_platform_output(window, output.platform_output);

        UiFrame {
            primitives: self
                .context
                .tessellate(output.shapes, output.pixels_per_point),
            textures: output.textures_delta,
            pixels_per_point: output.pixels_per_point,
            repaint: RepaintSchedule::after(delay, Instant::now()),
        }
    }

    fn paint(
        &mut self,
        window: &Window,
        target: FrameTarget<'_>,
        ui_frame: &UiFrame,
    ) -> Vec<wgpu::CommandBuffer> {
        let FrameTarget {
            device,
            queue,
            encoder,
            view,
        } = target;

        let size = window.inner_size();
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [size.width, size.height],
            pixels_per_point: ui_frame.pixels_per_point,
        };

        for (id, delta) in &ui_frame.textures.set {
            self.renderer.update_texture(device, queue, *id, delta);
        }
        let callback_buffers =
            self.renderer
                .update_buffers(device, queue, encoder, &ui_frame.primitives, &screen);

        let mut pass = encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("GUI Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            })
            .forget_lifetime();
        self.renderer
            .render(&mut pass, &ui_frame.primitives, &screen);

        callback_buffers
    }
}

fn ui(ctx: &Context, state: &mut UiState) {
    let error_color = {
        let [r, g, b] = palette::error_color();
        Color32::from_rgb(r, g, b)
    };

    // Charge inputs (left)
    egui::SidePanel::left("charges")
        .resizable(true)
        .default_width(300.0)
        .show(ctx, |ui| {
            ui.heading("Electric Force Vector Calculator");
            ui.separator();

            let mut count = state.form.count();
            ui.add(
                egui::Slider::new(&mut count, MIN_CHARGES..=MAX_CHARGES).text("Number of charges"),
            );
            state.form.set_count(count);

            ui.horizontal(|ui| {
                if ui.button("Calculate").clicked() {
                    state.calculate();
                }
                if ui
                    .button("Scatter")
                    .on_hover_text("Place the charges on distinct random points")
                    .clicked()
                {
                    state.form.scatter(&mut rand::rng());
                }
            });
            ui.separator();

            egui::ScrollArea::vertical()
                .id_salt("charge_inputs")
                .show(ui, |ui| {
                    for (i, input) in state.form.active_mut().iter_mut().enumerate() {
                        let n = i + 1;
                        ui.group(|ui| {
                            ui.strong(format!("Charge {n}"));
                            ui.horizontal(|ui| {
                                ui.label(format!("q{n} (C)"));
                                ui.add(
                                    egui::DragValue::new(&mut input.charge)
                                        .speed(1.0e-8)
                                        .custom_formatter(|v, _| format::scientific(v))
                                        .custom_parser(parse_finite),
                                );
                            });
                            ui.horizontal(|ui| {
                                for (axis, value) in
                                    [("x", &mut input.x), ("y", &mut input.y), ("z", &mut input.z)]
                                {
                                    ui.add(
                                        egui::DragValue::new(value)
                                            .speed(0.05)
                                            .prefix(format!("{axis}{n}: "))
                                            .custom_parser(parse_finite),
                                    );
                                }
                            });
                        });
                    }
                });
        });

    // Results and rendering controls (right)
    egui::SidePanel::right("results")
        .resizable(true)
        .default_width(360.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("results")
                .show(ui, |ui| {
                    ui.heading("Force Results");
                    match &state.outcome {
                        None => {
                            ui.label("No calculation yet.");
                        }
                        Some(Err(err)) => {
                            ui.colored_label(error_color, err.to_string());
                        }
                        Some(Ok(calculation)) => {
                            for line in &calculation.report.force_lines {
                                ui.monospace(line);
                            }

                            ui.separator();
                            ui.heading("Distances between charges (m)");
                            egui::Grid::new("distance_table")
                                .striped(true)
                                .num_columns(2)
                                .show(ui, |ui| {
                                    ui.strong("Charges");
                                    ui.strong("Distance (m)");
                                    ui.end_row();
                                    for row in &calculation.report.distance_rows {
                                        ui.label(&row.pair);
                                        ui.monospace(&row.distance);
                                        ui.end_row();
                                    }
                                });
                            if ui.button("Copy table").clicked() {
                                ui.ctx().copy_text(calculation.report.distance_table());
                            }
                        }
                    }

                    ui.separator();
                    ui.heading("Rendering");
                    let params = &mut state.scene_params;
                    ui.checkbox(&mut params.show_force_glyphs, "Show Forces");
                    ui.checkbox(&mut params.show_distance_lines, "Show Distance Lines");
                    ui.checkbox(&mut params.show_distance_labels, "Show Distance Labels");
                    ui.checkbox(&mut params.show_legend, "Show Legend");
                    ui.add(
                        egui::Slider::new(&mut params.force_glyph_scale, 0.05..=1.0)
                            .text("Force Scale"),
                    );
                    ui.add(
                        egui::Slider::new(&mut params.marker_size, 2.0..=24.0).text("Marker Size"),
                    );
                    ui.add(
                        egui::Slider::new(&mut params.line_width, 0.5..=6.0).text("Line Width"),
                    );
                    ui.add(
                        egui::Slider::new(&mut params.label_size, 6.0..=20.0).text("Label Size"),
                    );
                    if ui.button("Reset view (C)").clicked() {
                        state.reset_view();
                    }
                });
        });

    let params = state.scene_params;
    if let Some(Ok(calculation)) = &mut state.outcome {
        calculation.refresh_scene(&params);
    }

    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            let scene = match &state.outcome {
                Some(Ok(calculation)) => Some(&calculation.scene),
                _ => None,
            };
            viewport::show(ui, scene, &mut state.camera, &params);
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_delay_repaints_now() {
        let now = Instant::now();
        assert_eq!(RepaintSchedule::after(Duration::ZERO, now), RepaintSchedule::Now);
    }

    #[test]
    fn test_short_delay_schedules_wakeup() {
        let now = Instant::now();
        let delay = Duration::from_millis(250);

        assert_eq!(
            RepaintSchedule::after(delay, now),
            RepaintSchedule::At(now + delay)
        );
    }

    #[test]
    fn test_unbounded_delay_is_idle() {
        let now = Instant::now();
        assert_eq!(RepaintSchedule::after(Duration::MAX, now), RepaintSchedule::Idle);
    }

    #[test]
    fn test_calculate_frames_result() {
        let mut state = UiState::new(800, 600);
        state.form.active_mut()[1].x = 2.0;
        state.calculate();

        assert!(matches!(state.outcome, Some(Ok(_))));
        assert_eq!(state.camera.target, Vec3::new(1.0, 0.0, 0.0));
    }
}
