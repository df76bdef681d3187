use glam::{Vec2, Vec3};

use crate::waves::{ProceduralWaveParams, WaveField};

// Step used for the procedural finite differences, in world units.
pub const NORMAL_EPSILON: f32 = 0.5;

// Ripple heights around one surface point: the cell under the point plus its
// +x and +z texel neighbors.
#[derive(Clone, Copy, Debug, Default)]
pub struct RippleProbe {
    pub center: f32,
    pub dx: f32,
    pub dz: f32,
}

// Surface normal of the combined (procedural + ripple) height field at one
// point. Forward differences give two tangents which cross into the normal;
// a perfectly flat field yields (0, 1, 0).
pub fn surface_normal(
    waves: &WaveField,
    params: &ProceduralWaveParams,
    time: f32,
    world_xz: Vec2,
    ripple: RippleProbe,
    ripple_intensity: f32,
    epsilon: f32,
) -> Vec3 {
    let h = waves.displacement(world_xz, time, params) + ripple.center * ripple_intensity;
    let hx = waves.displacement(world_xz + Vec2::new(epsilon, 0.0), time, params)
        + ripple.dx * ripple_intensity;
    let hz = waves.displacement(world_xz + Vec2::new(0.0, epsilon), time, params)
        + ripple.dz * ripple_intensity;

    let v1 = Vec3::new(epsilon, hx - h, 0.0);
    let v2 = Vec3::new(0.0, hz - h, epsilon);
    v2.cross(v1).normalize()
}
