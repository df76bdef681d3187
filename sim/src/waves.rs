use glam::Vec2;

use crate::{NoiseBasis, Perlin2D, Simplex2D, Voronoi2D};

// Which coherent-noise family drives the large-scale swell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoiseKind {
    SimplexFbm,
    PerlinFbm,
    Voronoi,
}

// Large-scale wave knobs, supplied fresh each frame by the host.
// amplitude ≥ 0, speed ≥ 0, scale > 0 (caller contract, not validated here).
#[derive(Clone, Copy, Debug)]
pub struct ProceduralWaveParams {
    pub amplitude: f32,
    pub speed: f32,
    pub scale: f32,
    pub kind: NoiseKind,
}

// Drift direction of the swell: a fixed diagonal weighted (1.0, 0.4).
const DRIFT: Vec2 = Vec2::new(1.0, 0.4);
// World units shrink by this factor before sampling so `scale` stays a
// comfortable slider range.
const WORLD_TO_NOISE: f32 = 0.02;
// Overall gain between the amplitude slider and world-space height.
const HEIGHT_GAIN: f32 = 10.0;
// Octave stack shared by both gradient-noise kinds.
const OCTAVES: usize = 2;
const GAIN: f64 = 0.5;
const LACUNARITY: f64 = 2.0;

// Analytic displacement field for the swell. The generators hold nothing but
// seed-derived permutation tables, so identical (position, time, params)
// always produce identical output.
pub struct WaveField {
    simplex: Simplex2D,
    perlin: Perlin2D,
    voronoi: Voronoi2D,
}

impl WaveField {
    pub fn new(seed: u64) -> Self {
        Self {
            simplex: Simplex2D::new(seed),
            perlin: Perlin2D::new(seed),
            voronoi: Voronoi2D::new(seed),
        }
    }

    // Vertical displacement of the swell at a world XZ position.
    pub fn displacement(&self, world_xz: Vec2, time: f32, params: &ProceduralWaveParams) -> f32 {
        let pos = world_xz * params.scale * WORLD_TO_NOISE + DRIFT * (time * params.speed * 0.5);
        let height = params.amplitude * HEIGHT_GAIN;
        let x = pos.x as f64;
        let y = pos.y as f64;

        match params.kind {
            NoiseKind::SimplexFbm => {
                self.simplex.fbm2(x, y, OCTAVES, GAIN, LACUNARITY) as f32 * height
            }
            NoiseKind::PerlinFbm => {
                self.perlin.fbm2(x, y, OCTAVES, GAIN, LACUNARITY) as f32 * height
            }
            NoiseKind::Voronoi => {
                // cell field at half the domain frequency, remapped to [-1, 1]
                let t = (time * params.speed) as f64;
                let v = self.voronoi.sample(x * 0.5, y * 0.5, t);
                (v * 2.0 - 1.0) as f32 * height
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NoiseKind, ProceduralWaveParams, WaveField};
    use glam::Vec2;

    fn params(kind: NoiseKind) -> ProceduralWaveParams {
        ProceduralWaveParams {
            amplitude: 0.6,
            speed: 1.0,
            scale: 1.0,
            kind,
        }
    }

    #[test]
    fn equal_seeds_give_equal_fields() {
        let a = WaveField::new(2025);
        let b = WaveField::new(2025);
        for kind in [NoiseKind::SimplexFbm, NoiseKind::PerlinFbm, NoiseKind::Voronoi] {
            let p = params(kind);
            let pos = Vec2::new(12.5, -40.0);
            assert_eq!(a.displacement(pos, 3.2, &p), b.displacement(pos, 3.2, &p));
        }
    }

    #[test]
    fn zero_amplitude_is_flat() {
        let field = WaveField::new(1);
        for kind in [NoiseKind::SimplexFbm, NoiseKind::PerlinFbm, NoiseKind::Voronoi] {
            let p = ProceduralWaveParams {
                amplitude: 0.0,
                ..params(kind)
            };
            assert_eq!(field.displacement(Vec2::new(5.0, 7.0), 1.0, &p), 0.0);
        }
    }

    #[test]
    fn voronoi_stays_within_height_bound() {
        // the remapped cell field is in [-1, 1], so |displacement| ≤ amplitude*10
        let field = WaveField::new(42);
        let p = params(NoiseKind::Voronoi);
        let bound = p.amplitude * 10.0 + 1e-4;
        for i in 0..50 {
            let pos = Vec2::new(i as f32 * 13.7 - 300.0, i as f32 * 7.3 - 150.0);
            let d = field.displacement(pos, i as f32 * 0.1, &p);
            assert!(d.abs() <= bound, "displacement {d} beyond {bound}");
        }
    }

    #[test]
    fn time_drifts_the_pattern() {
        let field = WaveField::new(9);
        let p = params(NoiseKind::SimplexFbm);
        let pos = Vec2::new(30.0, 60.0);
        let differs = (field.displacement(pos, 0.0, &p) - field.displacement(pos, 2.0, &p)).abs();
        assert!(differs > 1e-6);
    }
}
