use image::RgbImage;

// Hermite smoothstep between two edges
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

// Clamp a linear channel into a display byte
#[inline]
pub fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0) as u8
}

// Repeat-wrapped nearest sample of an RGB image, channels scaled to [0, 1]
pub fn sample_tiled(img: &RgbImage, u: f32, v: f32) -> (f32, f32, f32) {
    let uu = u.rem_euclid(1.0);
    let vv = v.rem_euclid(1.0);
    let x = ((uu * img.width() as f32) as u32).min(img.width() - 1);
    let y = ((vv * img.height() as f32) as u32).min(img.height() - 1);
    let p = img.get_pixel(x, y);
    (
        p[0] as f32 / 255.0,
        p[1] as f32 / 255.0,
        p[2] as f32 / 255.0,
    )
}

#[cfg(test)]
mod tests {
    use super::{sample_tiled, smoothstep, to_u8};
    use image::{Rgb, RgbImage};

    #[test]
    fn smoothstep_edges_and_midpoint() {
        assert_eq!(smoothstep(-10.0, 10.0, -10.0), 0.0);
        assert_eq!(smoothstep(-10.0, 10.0, 10.0), 1.0);
        assert_eq!(smoothstep(-10.0, 10.0, -25.0), 0.0);
        assert_eq!(smoothstep(-10.0, 10.0, 42.0), 1.0);
        assert!((smoothstep(-10.0, 10.0, 0.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn to_u8_clamps() {
        assert_eq!(to_u8(-0.5), 0);
        assert_eq!(to_u8(2.0), 255);
        assert_eq!(to_u8(1.0), 255);
        assert_eq!(to_u8(0.0), 0);
    }

    #[test]
    fn tiled_sampling_wraps() {
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 1, Rgb([0, 255, 0]));
        let a = sample_tiled(&img, 0.0, 0.0);
        let b = sample_tiled(&img, 1.0, 1.0);
        let c = sample_tiled(&img, -1.0, -1.0);
        assert_eq!(a, (1.0, 0.0, 0.0));
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(sample_tiled(&img, 0.75, 0.75), (0.0, 1.0, 0.0));
    }
}
