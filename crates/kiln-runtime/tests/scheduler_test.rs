// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use kiln_core::time::{FrameClock, FrameTime, TimeConfig};
use kiln_runtime::{
    from_fn, CoroutineScheduler, CoroutineState, DelayCache, PredicateHandle, WaitForDone,
};

/// A coroutine that waits once on `wait` and then marks `done`.
fn wait_then_flag(
    wait: impl Fn(&mut DelayCache) -> CoroutineState + 'static,
    done: Rc<Cell<bool>>,
) -> impl kiln_runtime::Coroutine {
    let mut started = false;
    from_fn(move |cx| {
        if started {
            done.set(true);
            return CoroutineState::Complete;
        }
        started = true;
        wait(&mut *cx.delays)
    })
}

#[test]
fn test_scaled_wait_follows_time_scale() {
    let mut delays = DelayCache::new();
    let mut scheduler = CoroutineScheduler::new();
    let mut clock = FrameClock::new(&TimeConfig::default()).unwrap();
    clock.set_time_scale(0.5).unwrap();

    let done = Rc::new(Cell::new(false));
    scheduler.start(
        wait_then_flag(|d| CoroutineState::wait(d.wait_for_seconds(1.0)), Rc::clone(&done)),
        &mut delays,
        FrameTime::default(),
    );

    // One real second at half speed is only half a scaled second.
    let frame = clock.advance(Duration::from_secs(1));
    scheduler.update(&mut delays, frame);
    assert!(!done.get());

    let frame = clock.advance(Duration::from_secs(1));
    scheduler.update(&mut delays, frame);
    assert!(done.get());
}

#[test]
fn test_unscaled_wait_ignores_time_scale() {
    let mut delays = DelayCache::new();
    let mut scheduler = CoroutineScheduler::new();
    let mut clock = FrameClock::new(&TimeConfig::default()).unwrap();
    clock.set_time_scale(0.0).unwrap();

    let done = Rc::new(Cell::new(false));
    scheduler.start(
        wait_then_flag(
            |d| CoroutineState::wait(d.wait_for_seconds_unscaled(1.0)),
            Rc::clone(&done),
        ),
        &mut delays,
        FrameTime::default(),
    );

    let frame = clock.advance(Duration::from_secs(1));
    assert_eq!(frame.delta, 0.0);
    scheduler.update(&mut delays, frame);
    assert!(done.get());
}

#[test]
fn test_shared_seconds_token_does_not_alias_countdowns() {
    let mut delays = DelayCache::new();
    let mut scheduler = CoroutineScheduler::new();
    let first = Rc::new(Cell::new(false));
    let second = Rc::new(Cell::new(false));

    scheduler.start(
        wait_then_flag(|d| CoroutineState::wait(d.wait_for_seconds(1.0)), Rc::clone(&first)),
        &mut delays,
        FrameTime::default(),
    );
    scheduler.update(&mut delays, FrameTime::uniform(0.5));

    scheduler.start(
        wait_then_flag(|d| CoroutineState::wait(d.wait_for_seconds(1.0)), Rc::clone(&second)),
        &mut delays,
        FrameTime::default(),
    );
    assert_eq!(delays.seconds_len(), 1);

    scheduler.update(&mut delays, FrameTime::uniform(0.5));
    assert!(first.get());
    assert!(!second.get());

    scheduler.update(&mut delays, FrameTime::uniform(0.5));
    assert!(second.get());
}

#[test]
fn test_wait_for_done_resumes_when_predicate_holds() {
    let mut delays = DelayCache::new();
    let mut scheduler = CoroutineScheduler::new();
    let ready = Rc::new(Cell::new(false));
    let watched = Rc::clone(&ready);
    let predicate = PredicateHandle::new(move || watched.get());

    let done = Rc::new(Cell::new(false));
    let routine_predicate = predicate.clone();
    scheduler.start(
        wait_then_flag(
            move |d| CoroutineState::wait(d.wait_for_done(30.0, &routine_predicate)),
            Rc::clone(&done),
        ),
        &mut delays,
        FrameTime::default(),
    );

    for _ in 0..10 {
        scheduler.update(&mut delays, FrameTime::uniform(0.1));
    }
    assert!(!done.get());

    ready.set(true);
    scheduler.update(&mut delays, FrameTime::uniform(0.1));
    assert!(done.get());
    assert_eq!(delays.wait_for_done(30.0, &predicate).remaining(), 30.0);
}

#[test]
fn test_stopping_leaves_shared_token_unreset() {
    let mut delays = DelayCache::new();
    let mut scheduler = CoroutineScheduler::new();
    let predicate = PredicateHandle::new(|| false);
    let token: Rc<WaitForDone> = delays.wait_for_done(2.0, &predicate);

    let routine_predicate = predicate.clone();
    let id = scheduler.start(
        wait_then_flag(
            move |d| CoroutineState::wait(d.wait_for_done(2.0, &routine_predicate)),
            Rc::new(Cell::new(false)),
        ),
        &mut delays,
        FrameTime::default(),
    );

    scheduler.update(&mut delays, FrameTime::uniform(0.5));
    assert_eq!(token.remaining(), 1.5);

    assert!(scheduler.stop(id));
    assert!(!scheduler.is_running(id));
    scheduler.update(&mut delays, FrameTime::uniform(0.5));
    assert_eq!(token.remaining(), 1.5);
}

#[test]
fn test_coroutine_loops_on_cached_tokens() {
    let mut delays = DelayCache::new();
    let mut scheduler = CoroutineScheduler::new();
    let ticks = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&ticks);

    let mut first = true;
    scheduler.start(
        from_fn(move |cx| {
            if !first {
                counter.set(counter.get() + 1);
            }
            first = false;
            if counter.get() == 3 {
                CoroutineState::Complete
            } else {
                CoroutineState::wait(cx.delays.wait_for_seconds(0.25))
            }
        }),
        &mut delays,
        FrameTime::default(),
    );

    for _ in 0..12 {
        scheduler.update(&mut delays, FrameTime::uniform(0.125));
    }
    assert_eq!(ticks.get(), 3);
    assert!(scheduler.is_empty());
    assert_eq!(delays.seconds_len(), 1);
}
