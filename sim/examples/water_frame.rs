use glam::{Vec2, Vec3};
use image::{Rgb, RgbImage};
use sim::normals::{NORMAL_EPSILON, RippleProbe, surface_normal};
use sim::shading::WaterShading;
use sim::waves::{NoiseKind, ProceduralWaveParams, WaveField};

// Offline top-down render of the procedural swell at one instant: height and
// normal per pixel, shaded with the same model the interactive app uses.
fn main() {
    let size = 512u32;
    let waves = WaveField::new(2025);
    let shading = WaterShading::new();
    let params = ProceduralWaveParams {
        amplitude: 0.8,
        speed: 1.0,
        scale: 1.0,
        kind: NoiseKind::SimplexFbm,
    };
    let time = 3.0;

    let mut img = RgbImage::new(size, size);
    for y in 0..size {
        for x in 0..size {
            let world = Vec2::new(
                x as f32 / size as f32 * 400.0 - 200.0,
                y as f32 / size as f32 * 400.0 - 200.0,
            );
            let normal = surface_normal(
                &waves,
                &params,
                time,
                world,
                RippleProbe::default(),
                0.0,
                NORMAL_EPSILON,
            );
            let elevation = waves.displacement(world, time, &params);
            // looking straight down
            let [r, g, b, _] = shading.shade_water(normal, Vec3::Y, elevation, 1.0, 1.0);
            img.put_pixel(x, y, Rgb([r, g, b]));
        }
    }

    img.save("water_frame.png").unwrap();
    println!("Saved water_frame.png");
}
