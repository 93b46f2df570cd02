use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use trimorph_image::{Image, ImageSize};
use trimorph_imgproc::parallel::ExecutionStrategy;
use trimorph_mesh::Point2;
use trimorph_morph::{MorphConfig, Morpher};

fn landmarks(width: f32, height: f32) -> (Vec<Point2>, Vec<Point2>) {
    let grid = [0.2, 0.4, 0.6, 0.8];
    let points1 = grid
        .iter()
        .flat_map(|fy| grid.iter().map(move |fx| Point2::new(fx * width, fy * height)))
        .collect::<Vec<_>>();
    let points2 = points1
        .iter()
        .map(|p| Point2::new(p.x + 3.0, p.y - 2.0))
        .collect();
    (points1, points2)
}

fn bench_morph(c: &mut Criterion) {
    let mut group = c.benchmark_group("Morph");
    group.sample_size(10);

    for (width, height) in [(160, 120), (320, 240)].iter() {
        let parameter_string = format!("{}x{}", width, height);

        let size = ImageSize {
            width: *width,
            height: *height,
        };
        let image1 = Image::<u8, 3>::from_size_val(size, 60).unwrap();
        let image2 = Image::<u8, 3>::from_size_val(size, 180).unwrap();
        let (points1, points2) = landmarks(*width as f32, *height as f32);

        for strategy in [ExecutionStrategy::Serial, ExecutionStrategy::Parallel] {
            let morpher = Morpher::new(MorphConfig {
                steps: 4,
                strategy,
                ..Default::default()
            });

            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", strategy), &parameter_string),
                &(&image1, &image2),
                |b, i| {
                    b.iter(|| {
                        morpher.run(
                            black_box(i.0),
                            black_box(i.1),
                            black_box(&points1),
                            black_box(&points2),
                        )
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_morph);
criterion_main!(benches);
