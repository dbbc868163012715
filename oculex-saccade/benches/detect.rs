use criterion::{black_box, criterion_group, criterion_main, Criterion};
use oculex_saccade::{detect, DetectorConfig};

/// One-second window at 1 kHz with a movement to an on-annulus target.
fn trace() -> (Vec<f64>, Vec<f64>) {
    let n = 1000;
    let (at, ramp) = (400, 20);
    let mut xs = Vec::with_capacity(n);
    let mut ys = Vec::with_capacity(n);
    for i in 0..n {
        let frac = if i < at {
            0.0
        } else if i >= at + ramp {
            1.0
        } else {
            let phase = (i - at) as f64 / ramp as f64;
            0.5 * (1.0 - (std::f64::consts::PI * phase).cos())
        };
        xs.push(10.0 * frac);
        ys.push(0.0);
    }
    (xs, ys)
}

fn bench_detect(c: &mut Criterion) {
    let config = DetectorConfig::default();
    let (xs, ys) = trace();
    c.bench_function("detect_1s_window", |b| {
        b.iter(|| detect(black_box(&xs), black_box(&ys), 1.0, &config))
    });
}

criterion_group!(benches, bench_detect);
criterion_main!(benches);
