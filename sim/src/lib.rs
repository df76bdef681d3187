// sim holds all the ripple, wave and shading algorithms
pub mod heightfield;
pub mod impacts;
pub mod mesh;
pub mod normals;
pub mod perlin2;
pub mod pipeline;
pub mod shading;
pub mod simplex2;
pub mod solver;
pub mod utils;
pub mod voronoi2;
pub mod waves;

pub use heightfield::{HeightField, RippleBuffer};
pub use impacts::{Impact, ImpactInjector, PointerSource};
pub use mesh::{SurfaceMesh, generate_grid};
pub use perlin2::Perlin2D;
pub use pipeline::{FramePrimitives, RenderPipeline, ShadedLayer, ViewState, WaterConfig};
pub use simplex2::Simplex2D;
pub use solver::WaveParameters;
pub use voronoi2::Voronoi2D;
pub use waves::{NoiseKind, ProceduralWaveParams, WaveField};

// single-octave coherent noise sampled at (x, y)
// multi-octave sums are built on top via `fbm2`
pub trait NoiseBasis {
    // Sample one octave of noise at (x, y)
    fn noise2(&self, x: f64, y: f64) -> f64;

    // Fractal sum of `octaves` octaves: amplitude scaled by `gain` and
    // frequency by `lacunarity` after each one
    fn fbm2(&self, x: f64, y: f64, octaves: usize, gain: f64, lacunarity: f64) -> f64 {
        let mut amplitude = 1.0;
        let mut freq = 1.0;
        let mut total = 0.0;

        for _ in 0..octaves {
            total += self.noise2(x * freq, y * freq) * amplitude;
            amplitude *= gain;
            freq *= lacunarity;
        }

        total
    }
}
