use glam::Vec2;
use sim::{HeightField, ImpactInjector, PointerSource, WaveParameters, solver};

// Drop one splash into a 128×128 field and write grayscale snapshots of the
// wave front every 12 steps.
fn main() {
    let size = 128;
    let mut field = HeightField::new(size);
    let mut injector = ImpactInjector::new();
    let pointer = PointerSource::default();
    let params = WaveParameters {
        damping: 0.98,
        strength: 0.0,
        radius: 0.08,
    };

    injector.add(Vec2::splat(0.5), 1.0, 0.0);

    for step_idx in 0..60 {
        let now = step_idx as f64 / 60.0;
        let impacts = injector.active(now).to_vec();
        let (src, dst) = field.split_mut();
        solver::step(src, dst, &params, &impacts, &pointer);
        field.swap();

        if step_idx % 12 == 0 {
            // signed heights mapped around mid-gray
            let buf: Vec<u8> = field
                .current()
                .height
                .iter()
                .map(|h| ((h.clamp(-1.0, 1.0) * 0.5 + 0.5) * 255.0) as u8)
                .collect();
            let filename = format!("ripple_{:03}.png", step_idx);
            image::save_buffer(
                &filename,
                &buf,
                size as u32,
                size as u32,
                image::ColorType::L8,
            )
            .unwrap();
            println!("wrote {}", filename);
        }
    }
}
