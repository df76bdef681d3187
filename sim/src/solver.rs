use glam::Vec2;

use crate::heightfield::RippleBuffer;
use crate::impacts::{Impact, PointerSource};

// Ripple solver parameters, snapshotted by the caller once per step.
// Required ranges are a caller contract: damping in [0,1) (at 1 or above the
// field stops decaying and may diverge), radius > 0, strength > 0. The step
// never validates or clamps them.
#[derive(Clone, Copy, Debug)]
pub struct WaveParameters {
    pub damping: f32,
    pub strength: f32,
    pub radius: f32,
}

// Linear falloff: full strength at the source, zero from `radius` outward.
#[inline]
fn falloff(uv: Vec2, source: Vec2, radius: f32, strength: f32) -> f32 {
    let dist = uv.distance(source);
    if dist < radius {
        (1.0 - dist / radius) * strength
    } else {
        0.0
    }
}

// Advance the ripple field by one step, reading `src` only and writing `dst`
// only.
//
// Per cell: velocity = 0.5 * (left + right + up + down) - prev, damped, then
// pointer and impact contributions added on top. The half-sum form (no center
// term) is what the rest of the pipeline is calibrated against; keep it as
// is. The written prev channel is the pre-update height so the next step can
// take the second difference.
pub fn step(
    src: &RippleBuffer,
    dst: &mut RippleBuffer,
    params: &WaveParameters,
    impacts: &[Impact],
    pointer: &PointerSource,
) {
    let size = src.size();
    for y in 0..size {
        for x in 0..size {
            let i = y * size + x;
            let left = src.height_clamped(x as isize - 1, y as isize);
            let right = src.height_clamped(x as isize + 1, y as isize);
            let up = src.height_clamped(x as isize, y as isize - 1);
            let down = src.height_clamped(x as isize, y as isize + 1);

            let mut velocity = 0.5 * (left + right + up + down) - src.prev[i];
            velocity *= params.damping;

            let mut height = velocity;
            let (u, v) = src.cell_uv(x, y);
            let uv = Vec2::new(u, v);

            if pointer.active {
                height += falloff(uv, pointer.position, params.radius, params.strength);
            }

            // impacts superpose additively, each with its own strength
            for impact in impacts {
                height += falloff(uv, impact.position, params.radius, impact.strength);
            }

            dst.height[i] = height;
            dst.prev[i] = src.height[i];
        }
    }
}
