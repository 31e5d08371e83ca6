// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::Cell;
use std::rc::Rc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Vec2};
use understory_gesture::{
    Capabilities, GestureConfig, LocalTarget, PointerInput, PointerPhase, WheelInput, attach,
};

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("attach/dispatch");

    // Cost of the listener registry and session borrow on top of the state machine.
    group.bench_function("wheel", |b| {
        let target = LocalTarget::new();
        let seen = Rc::new(Cell::new(0.0));
        let sink = Rc::clone(&seen);
        let _attachment = attach(
            &target,
            Capabilities::empty(),
            GestureConfig::default(),
            move |ev| sink.set(ev.transform.translation.y),
        )
        .unwrap();
        let input = WheelInput::new(Vec2::new(0.0, 1.0));
        b.iter(|| black_box(target.dispatch_wheel(black_box(input))));
        black_box(seen.get());
    });

    group.bench_function("pointer_move", |b| {
        let target = LocalTarget::new();
        let _attachment = attach(
            &target,
            Capabilities::MULTI_TOUCH,
            GestureConfig::default(),
            |ev| {
                black_box(ev);
            },
        )
        .unwrap();
        target.dispatch_pointer(PointerPhase::Down, PointerInput::new(1, Point::ORIGIN, 0.0));
        let mut x = 0.0;
        b.iter(|| {
            x += 1.0;
            let input = PointerInput::new(1, Point::new(x, 0.0), x);
            black_box(target.dispatch_pointer(PointerPhase::Move, input))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_dispatch);
criterion_main!(benches);
