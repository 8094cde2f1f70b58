// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#[macro_use]
extern crate criterion;
extern crate fractal2d;

use criterion::Criterion;
use fractal2d::*;

const WIDTH: usize = 96;
const HEIGHT: usize = 64;

fn scene() -> (Viewport, Coloring) {
    let viewport = Viewport::new(
        WIDTH,
        HEIGHT,
        ComplexPlane::from_corners(Complex::new(-2.5, -1.2), Complex::new(1.0, 1.2)),
        true,
    )
    .unwrap();
    let coloring = Coloring::build(
        "smooth",
        BailoutAlgorithm::new(Equation::Mandelbrot, 200, 4.0, None).into(),
        Color::black(),
        Palette::grayscale(),
    )
    .unwrap();
    (viewport, coloring)
}

fn bench_strategy(c: &mut Criterion, name: &str, strategy: RenderStrategy) {
    c.bench_function(name, move |b| {
        let (viewport, coloring) = scene();
        let mut canvas = Canvas::new(WIDTH, HEIGHT);
        b.iter(|| strategy.refresh(&viewport, &coloring, &mut canvas).unwrap())
    });
}

fn strategies(c: &mut Criterion) {
    bench_strategy(c, "standard", RenderStrategy::Standard);
    bench_strategy(c, "progressive", RenderStrategy::Progressive);
    bench_strategy(c, "threaded x4", RenderStrategy::Threaded { workers: 4 });
}

criterion_group!(benches, strategies);
criterion_main!(benches);
