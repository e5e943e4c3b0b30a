use criterion::{black_box, criterion_group, criterion_main, Criterion};
use weather_globe::{
    DisplayMode, GlobalDataset, GridSpec, LatLon, Overlay, WeatherObservation,
};

fn synthetic_dataset(step: f64) -> GlobalDataset {
    let observations = GridSpec::global(step)
        .unwrap()
        .coordinates()
        .into_iter()
        .map(|coordinate| WeatherObservation {
            temperature: coordinate.0 / 2.0,
            precipitation: (coordinate.1.abs() / 10.0).floor(),
            wind_speed: coordinate.0.abs(),
            wind_direction: coordinate.1 + 180.0,
            ..WeatherObservation::placeholder(coordinate, 0)
        })
        .collect();
    GlobalDataset::from_observations(observations)
}

fn bench_grid(c: &mut Criterion) {
    let grid = GridSpec::global(1.0).unwrap();
    c.bench_function("grid_coordinates_1deg", |b| {
        b.iter(|| black_box(&grid).coordinates())
    });
}

fn bench_overlay(c: &mut Criterion) {
    let dataset = synthetic_dataset(5.0);
    for mode in DisplayMode::ALL {
        c.bench_function(&format!("overlay_{mode}_5deg"), |b| {
            b.iter(|| Overlay::build(black_box(&dataset), mode, 100.0))
        });
    }
}

fn bench_nearest(c: &mut Criterion) {
    let dataset = synthetic_dataset(5.0);
    c.bench_function("nearest_5deg", |b| {
        b.iter(|| {
            dataset
                .nearest()
                .location(black_box(LatLon(52.52, 13.405)))
                .limit(4)
                .call()
        })
    });
}

criterion_group!(benches, bench_grid, bench_overlay, bench_nearest);
criterion_main!(benches);
