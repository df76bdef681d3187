use glam::{Mat4, Vec2, Vec3};
use image::RgbImage;

use crate::heightfield::HeightField;
use crate::impacts::{ImpactInjector, PointerSource};
use crate::mesh::{SurfaceMesh, generate_grid};
use crate::normals::{NORMAL_EPSILON, RippleProbe, surface_normal};
use crate::shading::WaterShading;
use crate::solver::{self, WaveParameters};
use crate::waves::{NoiseKind, ProceduralWaveParams, WaveField};

// Water sheet extent in world units and its tessellation.
const WATER_SIZE: f32 = 400.0;
const WATER_SEGMENTS: usize = 128;
// Seabed plane: wider, coarser, and below the deep/shallow blend range.
const TERRAIN_SIZE: f32 = 1000.0;
const TERRAIN_SEGMENTS: usize = 64;
const TERRAIN_LEVEL: f32 = -15.0;
// Ripple heights scale into vertex displacement by this factor.
const RIPPLE_DISPLACEMENT: f32 = 5.0;
// Background behind both layers.
const CLEAR_COLOR: [u8; 4] = [26, 26, 38, 255];
// Triangles with a vertex this close to (or behind) the eye plane are culled.
const NEAR_W: f32 = 0.1;

// Per-frame host configuration, snapshotted once per frame and never cached
// beyond it. Required ranges (caller contract, not validated here):
// ripple_damping in [0,1), ripple_radius > 0, wave_speed ≥ 0,
// transparency in [0,1].
#[derive(Clone, Copy, Debug)]
pub struct WaterConfig {
    pub ripple_damping: f32,
    pub ripple_strength: f32,
    pub ripple_radius: f32,
    pub wave_height: f32,
    pub wave_speed: f32,
    pub wave_scale: f32,
    pub noise_kind: NoiseKind,
    pub transparency: f32,
    pub sun_intensity: f32,
    pub ripple_normal_intensity: f32,
}

impl Default for WaterConfig {
    fn default() -> Self {
        Self {
            ripple_damping: 0.98,
            ripple_strength: 0.5,
            ripple_radius: 0.05,
            wave_height: 0.6,
            wave_speed: 1.0,
            wave_scale: 1.0,
            noise_kind: NoiseKind::SimplexFbm,
            transparency: 0.85,
            sun_intensity: 1.0,
            ripple_normal_intensity: 0.6,
        }
    }
}

// Camera state consumed read-only each frame; the host owns and updates it.
#[derive(Clone, Copy, Debug)]
pub struct ViewState {
    pub view: Mat4,
    pub proj: Mat4,
    pub eye: Vec3,
    // render target size in pixels
    pub viewport: Vec2,
}

// One shaded layer: screen-space points, per-vertex colors, triangle indices.
pub struct ShadedLayer {
    pub points: Vec<Vec2>,
    pub colors: Vec<[u8; 4]>,
    pub indices: Vec<u32>,
}

// Everything a host needs to paint one frame, in draw order: clear, then
// terrain, then water.
pub struct FramePrimitives {
    pub clear_color: [u8; 4],
    pub terrain: ShadedLayer,
    pub water: ShadedLayer,
}

// Placeholder palette: fixed constants, not derived from rendered output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub color_deep: [u8; 3],
    pub color_shallow: [u8; 3],
}

pub struct RenderPipeline {
    field: HeightField,
    injector: ImpactInjector,
    pointer: PointerSource,
    waves: WaveField,
    shading: WaterShading,
    water_mesh: SurfaceMesh,
    terrain_mesh: SurfaceMesh,
    terrain_colors: Vec<[u8; 4]>,
}

impl RenderPipeline {
    // `sim_size` fixes the ripple grid dimensions for the pipeline's
    // lifetime; a resolution change means building a new pipeline.
    pub fn new(sim_size: usize, seed: u64, sand: Option<&RgbImage>) -> Self {
        let shading = WaterShading::new();
        let terrain_mesh = generate_grid(
            TERRAIN_SIZE,
            TERRAIN_SIZE,
            TERRAIN_SEGMENTS,
            TERRAIN_SEGMENTS,
        );
        // nothing animates the seabed, so its vertex colors are fixed at init
        let terrain_colors = terrain_mesh
            .uvs
            .iter()
            .map(|uv| shading.shade_terrain(*uv, sand))
            .collect();

        Self {
            field: HeightField::new(sim_size),
            injector: ImpactInjector::new(),
            pointer: PointerSource::default(),
            waves: WaveField::new(seed),
            shading,
            water_mesh: generate_grid(WATER_SIZE, WATER_SIZE, WATER_SEGMENTS, WATER_SEGMENTS),
            terrain_mesh,
            terrain_colors,
        }
    }

    // --- host control surface -------------------------------------------

    // Enqueue a discrete splash at a domain-normalized position.
    pub fn add_impact(&mut self, position: Vec2, strength: f32, now: f64) {
        self.injector.add(position, strength, now);
    }

    // `None` deactivates the continuous pointer disturbance.
    pub fn set_pointer(&mut self, position: Option<Vec2>) {
        match position {
            Some(p) => {
                self.pointer = PointerSource {
                    position: p,
                    active: true,
                }
            }
            None => self.pointer.active = false,
        }
    }

    // Placeholder: returns fixed colors rather than analyzing the frame.
    pub fn extract_palette(&self) -> Palette {
        Palette {
            color_deep: [0x05, 0x10, 0x1a],
            color_shallow: [0x4d, 0x80, 0xb3],
        }
    }

    // Current readable ripple heights, row-major.
    pub fn ripple_heights(&self) -> &[f32] {
        &self.field.current().height
    }

    pub fn sim_size(&self) -> usize {
        self.field.size()
    }

    // Domain-normalized uv of a world XZ point on the water sheet, or None
    // when the point misses it.
    pub fn domain_uv(world_xz: Vec2) -> Option<Vec2> {
        let u = world_xz.x / WATER_SIZE + 0.5;
        let v = 0.5 - world_xz.y / WATER_SIZE;
        if (0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&v) {
            Some(Vec2::new(u, v))
        } else {
            None
        }
    }

    // --- frame sequence --------------------------------------------------

    // Simulation pass: one solver step into the inactive buffer, then the
    // role swap. Runs before `draw` within a frame.
    pub fn advance(&mut self, cfg: &WaterConfig, now: f64) {
        let params = WaveParameters {
            damping: cfg.ripple_damping,
            strength: cfg.ripple_strength,
            radius: cfg.ripple_radius,
        };
        let impacts = self.injector.active(now);
        let pointer = self.pointer;
        let (src, dst) = self.field.split_mut();
        solver::step(src, dst, &params, impacts, &pointer);
        self.field.swap();
    }

    // Draw pass: clear color plus the terrain and water triangle lists.
    pub fn draw(&self, cfg: &WaterConfig, view: &ViewState, time: f32) -> FramePrimitives {
        FramePrimitives {
            clear_color: CLEAR_COLOR,
            terrain: self.draw_terrain(view),
            water: self.draw_water(cfg, view, time),
        }
    }

    // Convenience for hosts: simulation pass then draw pass, strictly
    // ordered so the draw observes the step issued this frame.
    pub fn render_frame(
        &mut self,
        cfg: &WaterConfig,
        view: &ViewState,
        time: f32,
        now: f64,
    ) -> FramePrimitives {
        self.advance(cfg, now);
        self.draw(cfg, view, time)
    }

    fn draw_terrain(&self, view: &ViewState) -> ShadedLayer {
        let n = self.terrain_mesh.positions.len();
        let mut points = Vec::with_capacity(n);
        let mut ws = Vec::with_capacity(n);
        for pos in &self.terrain_mesh.positions {
            let world = Vec3::new(pos.x, pos.y + TERRAIN_LEVEL, pos.z);
            let (p, w) = project(view, world);
            points.push(p);
            ws.push(w);
        }
        ShadedLayer {
            points,
            colors: self.terrain_colors.clone(),
            indices: cull_indices(&self.terrain_mesh.indices, &ws),
        }
    }

    fn draw_water(&self, cfg: &WaterConfig, view: &ViewState, time: f32) -> ShadedLayer {
        let buffer = self.field.current();
        let texel = 1.0 / buffer.size() as f32;
        let wave_params = ProceduralWaveParams {
            amplitude: cfg.wave_height,
            speed: cfg.wave_speed,
            scale: cfg.wave_scale,
            kind: cfg.noise_kind,
        };

        let n = self.water_mesh.positions.len();
        let mut points = Vec::with_capacity(n);
        let mut ws = Vec::with_capacity(n);
        let mut colors = Vec::with_capacity(n);

        for (pos, uv) in self.water_mesh.positions.iter().zip(&self.water_mesh.uvs) {
            let world_xz = Vec2::new(pos.x, pos.z);
            let ripple = buffer.sample(uv.x, uv.y);
            let displacement =
                self.waves.displacement(world_xz, time, &wave_params) + ripple * RIPPLE_DISPLACEMENT;
            let world = Vec3::new(pos.x, pos.y + displacement, pos.z);

            let probe = RippleProbe {
                center: ripple,
                dx: buffer.sample(uv.x + texel, uv.y),
                dz: buffer.sample(uv.x, uv.y + texel),
            };
            let normal = surface_normal(
                &self.waves,
                &wave_params,
                time,
                world_xz,
                probe,
                cfg.ripple_normal_intensity,
                NORMAL_EPSILON,
            );
            let view_dir = (view.eye - world).normalize();
            colors.push(self.shading.shade_water(
                normal,
                view_dir,
                world.y,
                cfg.sun_intensity,
                cfg.transparency,
            ));

            let (p, w) = project(view, world);
            points.push(p);
            ws.push(w);
        }

        ShadedLayer {
            points,
            colors,
            indices: cull_indices(&self.water_mesh.indices, &ws),
        }
    }
}

// World point through the camera: screen position plus the clip-space w the
// culling pass keys on.
fn project(view: &ViewState, world: Vec3) -> (Vec2, f32) {
    let clip = view.proj * view.view * world.extend(1.0);
    if clip.w <= 0.0 {
        return (Vec2::ZERO, clip.w);
    }
    let ndc_x = clip.x / clip.w;
    let ndc_y = clip.y / clip.w;
    (
        Vec2::new(
            (ndc_x * 0.5 + 0.5) * view.viewport.x,
            (1.0 - (ndc_y * 0.5 + 0.5)) * view.viewport.y,
        ),
        clip.w,
    )
}

// Keep only triangles fully in front of the eye plane.
fn cull_indices(indices: &[u32], ws: &[f32]) -> Vec<u32> {
    let mut out = Vec::with_capacity(indices.len());
    for tri in indices.chunks_exact(3) {
        if tri.iter().all(|&i| ws[i as usize] > NEAR_W) {
            out.extend_from_slice(tri);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{RenderPipeline, ViewState, WaterConfig};
    use glam::{Mat4, Vec2, Vec3};

    const SIZE: usize = 64;
    const SEED: u64 = 2025;

    fn test_view() -> ViewState {
        let eye = Vec3::new(0.0, 45.0, 160.0);
        ViewState {
            view: Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y),
            proj: Mat4::perspective_rh(50f32.to_radians(), 16.0 / 9.0, 0.1, 4000.0),
            eye,
            viewport: Vec2::new(1280.0, 720.0),
        }
    }

    #[test]
    fn impact_reaches_the_readable_buffer_after_advance() {
        let mut pipeline = RenderPipeline::new(SIZE, SEED, None);
        let cfg = WaterConfig::default();
        assert!(pipeline.ripple_heights().iter().all(|&h| h == 0.0));

        pipeline.add_impact(Vec2::splat(0.5), 1.0, 0.0);
        pipeline.advance(&cfg, 0.0);
        assert!(pipeline.ripple_heights().iter().any(|&h| h > 0.0));
    }

    #[test]
    fn frames_are_deterministic_across_pipelines() {
        let run = || {
            let mut pipeline = RenderPipeline::new(SIZE, SEED, None);
            let cfg = WaterConfig::default();
            let view = test_view();
            pipeline.add_impact(Vec2::new(0.3, 0.7), 1.0, 0.0);
            let mut last = pipeline.render_frame(&cfg, &view, 0.0, 0.0);
            for i in 1..5 {
                let t = i as f32 / 60.0;
                last = pipeline.render_frame(&cfg, &view, t, t as f64);
            }
            (pipeline.ripple_heights().to_vec(), last.water.colors)
        };
        let (heights_a, colors_a) = run();
        let (heights_b, colors_b) = run();
        assert_eq!(heights_a, heights_b);
        assert_eq!(colors_a, colors_b);
    }

    #[test]
    fn draw_lists_cover_both_meshes() {
        let mut pipeline = RenderPipeline::new(SIZE, SEED, None);
        let cfg = WaterConfig::default();
        let frame = pipeline.render_frame(&cfg, &test_view(), 0.0, 0.0);

        assert_eq!(frame.water.points.len(), 129 * 129);
        assert_eq!(frame.water.colors.len(), frame.water.points.len());
        assert_eq!(frame.terrain.points.len(), 65 * 65);
        assert_eq!(frame.terrain.colors.len(), frame.terrain.points.len());
        // culling only ever removes whole triangles
        assert_eq!(frame.water.indices.len() % 3, 0);
        assert!(frame.water.indices.len() <= 128 * 128 * 6);
        assert!(!frame.water.indices.is_empty());
        assert!(!frame.terrain.indices.is_empty());
        assert_eq!(frame.clear_color[3], 255);
    }

    #[test]
    fn water_alpha_follows_transparency() {
        let mut pipeline = RenderPipeline::new(SIZE, SEED, None);
        let cfg = WaterConfig {
            transparency: 0.25,
            ..WaterConfig::default()
        };
        let frame = pipeline.render_frame(&cfg, &test_view(), 0.0, 0.0);
        assert!(frame.water.colors.iter().all(|c| c[3] == 63));
    }

    #[test]
    fn palette_stub_returns_documented_constants() {
        let pipeline = RenderPipeline::new(SIZE, SEED, None);
        let palette = pipeline.extract_palette();
        assert_eq!(palette.color_deep, [0x05, 0x10, 0x1a]);
        assert_eq!(palette.color_shallow, [0x4d, 0x80, 0xb3]);
    }

    #[test]
    fn domain_uv_maps_the_water_extent() {
        assert_eq!(
            RenderPipeline::domain_uv(Vec2::ZERO),
            Some(Vec2::new(0.5, 0.5))
        );
        // +x is +u, +z is -v
        let uv = RenderPipeline::domain_uv(Vec2::new(100.0, -100.0)).unwrap();
        assert!((uv.x - 0.75).abs() < 1e-6);
        assert!((uv.y - 0.75).abs() < 1e-6);
        assert_eq!(RenderPipeline::domain_uv(Vec2::new(500.0, 0.0)), None);
    }

    #[test]
    fn pointer_source_toggles() {
        let mut pipeline = RenderPipeline::new(SIZE, SEED, None);
        let cfg = WaterConfig::default();
        pipeline.set_pointer(Some(Vec2::splat(0.5)));
        pipeline.advance(&cfg, 0.0);
        let with_pointer: f32 = pipeline.ripple_heights().iter().sum();
        assert!(with_pointer > 0.0);

        let mut still = RenderPipeline::new(SIZE, SEED, None);
        still.set_pointer(Some(Vec2::splat(0.5)));
        still.set_pointer(None);
        still.advance(&cfg, 0.0);
        assert!(still.ripple_heights().iter().all(|&h| h == 0.0));
    }
}
