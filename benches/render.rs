#[macro_use]
extern crate criterion;
extern crate mandeltile;
extern crate num;
extern crate num_cpus;

use criterion::Criterion;
use mandeltile::{point_iterations, Gradient, Renderer, Schedule};
use num::Complex;

fn escape(c: &mut Criterion) {
    c.bench_function("point in the set, depth 2048", |b| {
        b.iter(|| point_iterations(Complex::new(-0.1, 0.1), 2048))
    });
}

fn gradient(c: &mut Criterion) {
    c.bench_function("gradient, depth 8000", |b| b.iter(|| Gradient::new(8000)));
}

fn tile(c: &mut Criterion) {
    let center = Complex::new(-0.759081, -0.071950);
    let per_row = Renderer::new(512);
    c.bench_function("128px tile, one thread per row", move |b| {
        b.iter(|| per_row.render(center, 0.001611, 128))
    });
    let pooled = Renderer::new(512).with_schedule(Schedule::Pool(num_cpus::get()));
    c.bench_function("128px tile, worker pool", move |b| {
        b.iter(|| pooled.render(center, 0.001611, 128))
    });
}

criterion_group!(benches, escape, gradient, tile);
criterion_main!(benches);
