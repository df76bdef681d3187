use std::time::Instant;

use eframe::{App, Frame, NativeOptions, egui, run_native};
use egui::{Color32, PointerButton, Sense};
use sim::{NoiseKind, RenderPipeline, ShadedLayer, ViewState, WaterConfig};

mod camera;
use camera::OrbitCamera;

// Strength used for click splashes and the panel button.
const SPLASH_STRENGTH: f32 = 1.2;

struct WaterApp {
    // ripple grid resolution is 2^exp; changing it rebuilds the pipeline
    exp: u32,
    seed: u64,
    // slider state, snapshotted into the pipeline once per frame
    config: WaterConfig,

    pipeline: RenderPipeline,
    camera: OrbitCamera,
    start: Instant,

    // timing & status
    status_message: String,
    last_frame_ms: Option<f32>,
    sand_missing: bool,
}

// The seabed texture is optional; without it the terrain falls back to its
// flat base color.
fn build_pipeline(exp: u32, seed: u64) -> (RenderPipeline, bool) {
    let sand = image::open("assets/sand.png").ok().map(|img| img.to_rgb8());
    let missing = sand.is_none();
    (RenderPipeline::new(1 << exp, seed, sand.as_ref()), missing)
}

impl Default for WaterApp {
    fn default() -> Self {
        let exp = 8; // 2^8 = 256
        let seed = 2025;
        let (pipeline, sand_missing) = build_pipeline(exp, seed);
        Self {
            exp,
            seed,
            config: WaterConfig::default(),
            pipeline,
            camera: OrbitCamera::default(),
            start: Instant::now(),
            status_message: String::new(),
            last_frame_ms: None,
            sand_missing,
        }
    }
}

impl WaterApp {
    fn rebuild_pipeline(&mut self, reason: &str) {
        let (pipeline, missing) = build_pipeline(self.exp, self.seed);
        self.pipeline = pipeline;
        self.sand_missing = missing;
        self.status_message = reason.into();
    }

    // Export the current ripple channel as a grayscale PNG.
    fn save_ripple_png(&mut self) {
        let size = self.pipeline.sim_size();
        // signed heights mapped around mid-gray
        let buf: Vec<u8> = self
            .pipeline
            .ripple_heights()
            .iter()
            .map(|h| ((h.clamp(-1.0, 1.0) * 0.5 + 0.5) * 255.0) as u8)
            .collect();
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name("ripple.png")
            .save_file()
        {
            match image::save_buffer(&path, &buf, size as u32, size as u32, image::ColorType::L8) {
                Ok(()) => self.status_message = format!("Saved {}", path.display()),
                Err(e) => self.status_message = format!("Save error: {}", e),
            }
        }
    }
}

impl App for WaterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::SidePanel::left("controls").show(ctx, |ui| {
            ui.heading("Water Surface");
            ui.separator();

            ui.label("Wave Noise");
            egui::ComboBox::from_label("Noise Algorithm")
                .selected_text(format!("{:?}", self.config.noise_kind))
                .show_ui(ui, |ui| {
                    ui.selectable_value(
                        &mut self.config.noise_kind,
                        NoiseKind::SimplexFbm,
                        "SimplexFbm",
                    );
                    ui.selectable_value(
                        &mut self.config.noise_kind,
                        NoiseKind::PerlinFbm,
                        "PerlinFbm",
                    );
                    ui.selectable_value(&mut self.config.noise_kind, NoiseKind::Voronoi, "Voronoi");
                });

            // resolution is fixed per pipeline; a change rebuilds everything
            let prev_exp = self.exp;
            ui.horizontal(|ui| {
                ui.label("Ripple grid 2^n:");
                let size = 1u32 << self.exp;
                ui.add(
                    egui::Slider::new(&mut self.exp, 7..=9)
                        .text(format!("{}×{}", size, size))
                        .step_by(1.0),
                );
            });
            if prev_exp != self.exp {
                self.rebuild_pipeline("Pipeline rebuilt for new resolution");
            }

            ui.label("Seed");
            let prev_seed = self.seed;
            ui.add(egui::DragValue::new(&mut self.seed).speed(1.0));
            if prev_seed != self.seed {
                self.rebuild_pipeline("Pipeline rebuilt for new seed");
            }

            ui.separator();
            ui.label("Ripples");
            ui.add(egui::Slider::new(&mut self.config.ripple_damping, 0.8..=0.999).text("Damping"));
            ui.add(egui::Slider::new(&mut self.config.ripple_strength, 0.0..=2.0).text("Strength"));
            ui.add(egui::Slider::new(&mut self.config.ripple_radius, 0.005..=0.2).text("Radius"));
            ui.add(
                egui::Slider::new(&mut self.config.ripple_normal_intensity, 0.0..=2.0)
                    .text("Normal Intensity"),
            );

            ui.separator();
            ui.label("Waves");
            ui.add(egui::Slider::new(&mut self.config.wave_height, 0.0..=2.0).text("Height"));
            ui.add(egui::Slider::new(&mut self.config.wave_speed, 0.0..=4.0).text("Speed"));
            ui.add(egui::Slider::new(&mut self.config.wave_scale, 0.1..=4.0).text("Scale"));

            ui.separator();
            ui.label("Surface");
            ui.add(egui::Slider::new(&mut self.config.transparency, 0.0..=1.0).text("Transparency"));
            ui.add(
                egui::Slider::new(&mut self.config.sun_intensity, 0.0..=3.0).text("Sun Intensity"),
            );

            ui.separator();

            if ui.button("Splash").clicked() {
                let now = self.start.elapsed().as_secs_f64();
                self.pipeline
                    .add_impact(glam::Vec2::splat(0.5), SPLASH_STRENGTH, now);
            }

            if ui.button("Save ripple PNG…").clicked() {
                self.save_ripple_png();
            }

            if ui.button("Extract palette").clicked() {
                let palette = self.pipeline.extract_palette();
                let [dr, dg, db] = palette.color_deep;
                let [sr, sg, sb] = palette.color_shallow;
                self.status_message = format!(
                    "Palette: deep #{:02x}{:02x}{:02x}, shallow #{:02x}{:02x}{:02x}",
                    dr, dg, db, sr, sg, sb
                );
            }

            if self.sand_missing {
                ui.label("No assets/sand.png; seabed uses its flat color");
            }
            if let Some(ms) = self.last_frame_ms {
                ui.label(format!("Frame {:.2} ms", ms));
            }
            ui.separator();
            ui.label(&self.status_message);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let frame_start = Instant::now();
            let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
            let viewport = glam::Vec2::new(rect.width(), rect.height());

            // secondary drag orbits, scroll zooms
            if response.dragged_by(PointerButton::Secondary) {
                let delta = response.drag_delta();
                self.camera.orbit(delta.x, delta.y);
            }
            if response.hovered() {
                let scroll = ui.input(|i| i.raw_scroll_delta.y);
                if scroll != 0.0 {
                    self.camera.zoom(scroll);
                }
            }
            self.camera.set_aspect(rect.width() / rect.height());

            let view = ViewState {
                view: self.camera.view_matrix(),
                proj: self.camera.projection_matrix(),
                eye: self.camera.position(),
                viewport,
            };

            let now = self.start.elapsed().as_secs_f64();

            // hover + primary hold drives the continuous pointer source,
            // a primary click drops a discrete impact
            let picked = response
                .hover_pos()
                .and_then(|pos| {
                    let local = glam::Vec2::new(pos.x - rect.left(), pos.y - rect.top());
                    self.camera.pick_water_plane(local, viewport)
                })
                .and_then(RenderPipeline::domain_uv);

            if response.clicked() {
                if let Some(uv) = picked {
                    self.pipeline.add_impact(uv, SPLASH_STRENGTH, now);
                }
            }
            let holding = response.dragged_by(PointerButton::Primary)
                || (response.hovered() && ui.input(|i| i.pointer.primary_down()));
            self.pipeline.set_pointer(if holding { picked } else { None });

            // one pass: solver step, buffer swap, then the shaded draw lists
            let frame = self
                .pipeline
                .render_frame(&self.config, &view, now as f32, now);

            let painter = ui.painter_at(rect);
            let [r, g, b, a] = frame.clear_color;
            painter.rect_filled(
                rect,
                egui::CornerRadius::ZERO,
                Color32::from_rgba_unmultiplied(r, g, b, a),
            );
            paint_layer(&painter, rect, &frame.terrain);
            paint_layer(&painter, rect, &frame.water);

            self.last_frame_ms = Some(frame_start.elapsed().as_secs_f32() * 1000.0);
        });

        // keep the simulation animating
        ctx.request_repaint();
    }
}

// Convert one shaded layer into an egui mesh and hand it to the painter.
fn paint_layer(painter: &egui::Painter, rect: egui::Rect, layer: &ShadedLayer) {
    let mut mesh = egui::epaint::Mesh::default();
    mesh.vertices.reserve(layer.points.len());
    for (p, c) in layer.points.iter().zip(&layer.colors) {
        mesh.vertices.push(egui::epaint::Vertex {
            pos: egui::pos2(rect.left() + p.x, rect.top() + p.y),
            uv: egui::epaint::WHITE_UV,
            color: Color32::from_rgba_unmultiplied(c[0], c[1], c[2], c[3]),
        });
    }
    mesh.indices = layer.indices.clone();
    painter.add(egui::epaint::Shape::mesh(mesh));
}

fn main() {
    let opts = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 700.0])
            .with_min_inner_size([500.0, 350.0]),
        ..Default::default()
    };
    run_native(
        "Water Surface",
        opts,
        Box::new(|_cc| Ok(Box::new(WaterApp::default()))),
    )
    .unwrap();
}
