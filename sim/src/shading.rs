use glam::{Vec2, Vec3};
use image::RgbImage;
use palette::{Gradient, LinSrgb};

use crate::utils::{sample_tiled, smoothstep, to_u8};

// Fixed directional light above and behind the far edge of the water.
pub const SUN_POSITION: Vec3 = Vec3::new(50.0, 100.0, -100.0);

const SPECULAR_EXPONENT: f32 = 32.0;
const FRESNEL_EXPONENT: f32 = 5.0;
const RIM_STRENGTH: f32 = 0.15;
const AMBIENT: f32 = 0.35;
// Elevation range the deep/shallow blend sweeps over.
const BLEND_LOW: f32 = -10.0;
const BLEND_HIGH: f32 = 10.0;

const WATER_DEEP: (f32, f32, f32) = (0.05, 0.15, 0.25);
const WATER_SHALLOW: (f32, f32, f32) = (0.3, 0.5, 0.7);
const TERRAIN_DEEP: (f32, f32, f32) = (0.1, 0.2, 0.3);
const TERRAIN_SHALLOW: (f32, f32, f32) = (0.4, 0.6, 0.8);
// How many times the sand texture repeats across the seabed.
const SAND_TILING: f32 = 10.0;

// Water and seabed color models. The deep→shallow ramp is built once; each
// vertex asks for a blend position plus the three lighting terms.
pub struct WaterShading {
    water_ramp: Gradient<LinSrgb>,
}

impl WaterShading {
    pub fn new() -> Self {
        Self {
            water_ramp: Gradient::new(vec![
                LinSrgb::new(WATER_DEEP.0, WATER_DEEP.1, WATER_DEEP.2),
                LinSrgb::new(WATER_SHALLOW.0, WATER_SHALLOW.1, WATER_SHALLOW.2),
            ]),
        }
    }

    // Water surface color: elevation blend lit by Lambert diffuse and a
    // Phong highlight, plus a Fresnel rim at grazing angles. Alpha carries
    // the configured transparency straight through.
    pub fn shade_water(
        &self,
        normal: Vec3,
        view_dir: Vec3,
        elevation: f32,
        sun_intensity: f32,
        transparency: f32,
    ) -> [u8; 4] {
        let sun_dir = SUN_POSITION.normalize();
        let diffuse = normal.dot(sun_dir).max(0.0);
        let reflect_dir = (-sun_dir).reflect(normal);
        let spec = view_dir.dot(reflect_dir).max(0.0).powf(SPECULAR_EXPONENT) * sun_intensity;
        let fresnel = (1.0 - normal.dot(view_dir).max(0.0)).powf(FRESNEL_EXPONENT);

        let base = self
            .water_ramp
            .get(smoothstep(BLEND_LOW, BLEND_HIGH, elevation));
        let light = AMBIENT + (1.0 - AMBIENT) * diffuse;
        let rim = fresnel * RIM_STRENGTH;

        [
            to_u8(base.red * light + spec + rim),
            to_u8(base.green * light + spec + rim),
            to_u8(base.blue * light + spec + rim),
            to_u8(transparency),
        ]
    }

    // Seabed color: static tint times a tiled sand sample. A missing texture
    // degrades to the untinted base color, never an error.
    pub fn shade_terrain(&self, uv: Vec2, sand: Option<&RgbImage>) -> [u8; 4] {
        let base = (
            0.5 * (TERRAIN_DEEP.0 + TERRAIN_SHALLOW.0),
            0.5 * (TERRAIN_DEEP.1 + TERRAIN_SHALLOW.1),
            0.5 * (TERRAIN_DEEP.2 + TERRAIN_SHALLOW.2),
        );
        let sand_rgb = match sand {
            Some(img) => sample_tiled(img, uv.x * SAND_TILING, uv.y * SAND_TILING),
            None => (1.0, 1.0, 1.0),
        };
        [
            to_u8(base.0 * sand_rgb.0),
            to_u8(base.1 * sand_rgb.1),
            to_u8(base.2 * sand_rgb.2),
            255,
        ]
    }
}

impl Default for WaterShading {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::WaterShading;
    use glam::{Vec2, Vec3};
    use image::{Rgb, RgbImage};

    #[test]
    fn alpha_carries_transparency() {
        let shading = WaterShading::new();
        let c = shading.shade_water(Vec3::Y, Vec3::Y, 0.0, 1.0, 0.5);
        assert_eq!(c[3], 127);
        let c = shading.shade_water(Vec3::Y, Vec3::Y, 0.0, 1.0, 1.0);
        assert_eq!(c[3], 255);
    }

    #[test]
    fn elevation_blends_deep_to_shallow() {
        let shading = WaterShading::new();
        let deep = shading.shade_water(Vec3::Y, Vec3::Y, -10.0, 0.0, 1.0);
        let shallow = shading.shade_water(Vec3::Y, Vec3::Y, 10.0, 0.0, 1.0);
        // shallow water is brighter on every channel
        assert!(shallow[0] > deep[0]);
        assert!(shallow[1] > deep[1]);
        assert!(shallow[2] > deep[2]);
    }

    #[test]
    fn sun_facing_surface_is_brighter() {
        let shading = WaterShading::new();
        let sun_dir = super::SUN_POSITION.normalize();
        let lit = shading.shade_water(sun_dir, Vec3::Y, 0.0, 0.0, 1.0);
        let away = shading.shade_water(-sun_dir, Vec3::Y, 0.0, 0.0, 1.0);
        assert!(lit[1] > away[1]);
    }

    #[test]
    fn missing_sand_texture_degrades_to_base() {
        let shading = WaterShading::new();
        let plain = shading.shade_terrain(Vec2::new(0.3, 0.3), None);
        assert_eq!(plain[3], 255);
        // a black sand texture darkens the seabed to black
        let black = RgbImage::from_pixel(4, 4, Rgb([0, 0, 0]));
        let tinted = shading.shade_terrain(Vec2::new(0.3, 0.3), Some(&black));
        assert_eq!(&tinted[..3], &[0, 0, 0]);
        assert!(plain[2] > 0);
    }
}
