// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::{Point, Vec2};
use understory_gesture::{
    Capabilities, GestureConfig, GestureInput, GestureState, Modifiers, PointerInput, WheelInput,
};

fn circle(i: usize, radius: f64) -> Point {
    let t = i as f64 * 0.05;
    Point::new(radius * t.cos(), radius * t.sin())
}

fn bench_pointer_pan(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture_state/pan");

    for moves in [64usize, 1_024] {
        let path: Vec<PointerInput> = (0..moves)
            .map(|i| PointerInput::new(1, circle(i, 200.0), i as f64))
            .collect();
        group.throughput(Throughput::Elements(moves as u64));

        group.bench_with_input(BenchmarkId::new("single_pointer", moves), &path, |b, path| {
            b.iter_batched(
                || {
                    let mut state = GestureState::default();
                    state.pointer_down(&PointerInput::new(1, Point::ORIGIN, 0.0));
                    state
                },
                |mut state| {
                    for input in path {
                        black_box(state.pointer_move(input));
                    }
                    black_box(state.pointer_up(&PointerInput::new(1, Point::ORIGIN, 0.0)));
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_pinch(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture_state/pinch");

    for moves in [64usize, 1_024] {
        // Second finger orbits and breathes around the first.
        let path: Vec<PointerInput> = (0..moves)
            .map(|i| {
                let radius = 100.0 + 50.0 * (i as f64 * 0.1).sin();
                PointerInput::new(2, circle(i, radius), i as f64)
            })
            .collect();
        group.throughput(Throughput::Elements(moves as u64));

        group.bench_with_input(BenchmarkId::new("two_pointers", moves), &path, |b, path| {
            b.iter_batched(
                || {
                    let mut state =
                        GestureState::new(Capabilities::MULTI_TOUCH, GestureConfig::default());
                    state.pointer_down(&PointerInput::new(1, Point::ORIGIN, 0.0));
                    state.pointer_down(&PointerInput::new(2, Point::new(100.0, 0.0), 0.0));
                    state
                },
                |mut state| {
                    for input in path {
                        black_box(state.pointer_move(input));
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_wheel(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture_state/wheel");
    let inputs = [
        ("pan", WheelInput::new(Vec2::new(3.0, -12.0))),
        (
            "zoom",
            WheelInput::new(Vec2::new(0.0, -4.0)).with_modifiers(Modifiers::CONTROL),
        ),
        (
            "rotate",
            WheelInput::new(Vec2::new(0.0, 4.0))
                .with_modifiers(Modifiers::CONTROL | Modifiers::SHIFT),
        ),
        ("z_axis", WheelInput::new(Vec2::ZERO).with_delta_z(2.0)),
    ];

    for (name, input) in inputs {
        group.bench_function(name, |b| {
            let mut state = GestureState::default();
            b.iter(|| black_box(state.wheel(black_box(&input))));
        });
    }

    group.finish();
}

fn bench_native_gesture(c: &mut Criterion) {
    c.bench_function("gesture_state/native_change", |b| {
        let mut state = GestureState::new(Capabilities::NATIVE_GESTURE, GestureConfig::default());
        state.gesture_start(&GestureInput::new(Point::ORIGIN, 1.0, 0.0));
        let mut i = 0_u32;
        b.iter(|| {
            i = i.wrapping_add(1);
            let t = f64::from(i % 360);
            let input = GestureInput::new(Point::new(t, -t), 1.0 + t * 0.001, t);
            black_box(state.gesture_change(&input))
        });
    });
}

criterion_group!(
    benches,
    bench_pointer_pan,
    bench_pinch,
    bench_wheel,
    bench_native_gesture
);
criterion_main!(benches);
