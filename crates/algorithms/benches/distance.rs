//! Benchmarks for nearest-location labeling

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rastergeo_algorithms::distance::nearest_location_labels;
use rastergeo_core::{GeoReference, LocationSet, Raster};

fn create_locations(count: usize) -> LocationSet {
    (0..count)
        .map(|i| {
            let f = i as f64 / count as f64;
            (format!("market {}", i), 18.0 + 4.0 * f, 81.5 + 5.5 * ((f * 7.0) % 1.0))
        })
        .collect()
}

fn bench_nearest_labels(c: &mut Criterion) {
    let mut group = c.benchmark_group("distance/nearest_labels");
    let raster: Raster<f64> = Raster::zeros(256, 256, GeoReference::new(81.359, 0.02, 22.582, -0.02));
    for count in [10, 100, 400] {
        let locations = create_locations(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| nearest_location_labels(black_box(&raster), &locations).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_nearest_labels);
criterion_main!(benches);
