use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use trimorph_mesh::{triangulate, Point2, Rect};

// Deterministic scattered points, a stand in for hand placed landmarks.
fn scattered_points(n: usize, width: f32, height: f32) -> Vec<Point2> {
    let mut state = 0x2545_f491_u32;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        (state % 10_000) as f32 / 10_000.0
    };
    (0..n)
        .map(|_| Point2::new((next() * width).floor(), (next() * height).floor()))
        .collect()
}

fn bench_triangulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("Triangulate");

    for num_points in [16, 64, 256].iter() {
        let rect = Rect::new(0, 0, 640, 480);
        let points = scattered_points(*num_points, 640.0, 480.0);

        group.bench_with_input(
            BenchmarkId::new("bowyer_watson", num_points),
            &points,
            |b, points| b.iter(|| triangulate(black_box(rect), black_box(points))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_triangulate);
criterion_main!(benches);
