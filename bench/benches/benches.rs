use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use glam::{Mat4, Vec2, Vec3};
use sim::normals::{NORMAL_EPSILON, RippleProbe, surface_normal};
use sim::{
    HeightField, ImpactInjector, NoiseKind, PointerSource, ProceduralWaveParams, RenderPipeline,
    ViewState, WaterConfig, WaveField, WaveParameters, solver,
};

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

fn bench_solver_step(c: &mut Criterion) {
    for size in [256usize, 512] {
        c.bench_function(&format!("solver step {size}"), |b| {
            let mut field = HeightField::new(size);
            let params = WaveParameters {
                damping: 0.98,
                strength: 0.5,
                radius: 0.05,
            };
            let pointer = PointerSource {
                position: Vec2::splat(0.5),
                active: true,
            };
            b.iter(|| {
                let (src, dst) = field.split_mut();
                solver::step(src, dst, &params, &[], &pointer);
                field.swap();
            })
        });
    }
}

fn bench_solver_step_with_impacts(c: &mut Criterion) {
    c.bench_function("solver step 256 + 10 impacts", |b| {
        let mut field = HeightField::new(256);
        let params = WaveParameters {
            damping: 0.98,
            strength: 0.5,
            radius: 0.05,
        };
        let pointer = PointerSource::default();
        let mut injector = ImpactInjector::new();
        for i in 0..10 {
            injector.add(Vec2::new(i as f32 / 10.0, 0.5), 1.0, 0.0);
        }
        let impacts = injector.active(0.0).to_vec();
        b.iter(|| {
            let (src, dst) = field.split_mut();
            solver::step(src, dst, &params, &impacts, &pointer);
            field.swap();
        })
    });
}

fn bench_wave_field(c: &mut Criterion) {
    let grid = 64;
    for (name, kind) in [
        ("simplex fbm", NoiseKind::SimplexFbm),
        ("perlin fbm", NoiseKind::PerlinFbm),
        ("voronoi", NoiseKind::Voronoi),
    ] {
        c.bench_function(&format!("wave displacement 64×64 {name}"), |b| {
            let waves = WaveField::new(SEED);
            let params = ProceduralWaveParams {
                amplitude: 0.6,
                speed: 1.0,
                scale: 1.0,
                kind,
            };
            b.iter(|| {
                let mut total = 0.0f32;
                for y in 0..grid {
                    for x in 0..grid {
                        let pos = Vec2::new(x as f32 * 3.0 - 96.0, y as f32 * 3.0 - 96.0);
                        total += waves.displacement(pos, 1.5, &params);
                    }
                }
                black_box(total)
            })
        });
    }
}

fn bench_normal_estimation(c: &mut Criterion) {
    c.bench_function("surface normal 64×64", |b| {
        let waves = WaveField::new(SEED);
        let params = ProceduralWaveParams {
            amplitude: 0.6,
            speed: 1.0,
            scale: 1.0,
            kind: NoiseKind::SimplexFbm,
        };
        b.iter(|| {
            let mut acc = Vec3::ZERO;
            for y in 0..64 {
                for x in 0..64 {
                    let pos = Vec2::new(x as f32 * 3.0 - 96.0, y as f32 * 3.0 - 96.0);
                    acc += surface_normal(
                        &waves,
                        &params,
                        1.5,
                        pos,
                        RippleProbe::default(),
                        0.6,
                        NORMAL_EPSILON,
                    );
                }
            }
            black_box(acc)
        })
    });
}

fn bench_full_frame(c: &mut Criterion) {
    c.bench_function("render_frame 256", |b| {
        let mut pipeline = RenderPipeline::new(256, SEED, None);
        let cfg = WaterConfig::default();
        let view = test_view();
        pipeline.add_impact(Vec2::splat(0.5), 1.0, 0.0);
        let mut t = 0.0f32;
        b.iter(|| {
            t += 1.0 / 60.0;
            black_box(pipeline.render_frame(&cfg, &view, t, t as f64))
        })
    });
}

criterion_group!(
    water_benchmarks,
    bench_solver_step,
    bench_solver_step_with_impacts,
    bench_wave_field,
    bench_normal_estimation,
    bench_full_frame
);
criterion_main!(water_benchmarks);
