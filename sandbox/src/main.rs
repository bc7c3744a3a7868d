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

//! Runs a few seconds of simulated frames with coroutines driving a player body.

use std::cell::{Cell, RefCell};
use std::fs;
use std::rc::Rc;

use anyhow::{Context, Result};
use kiln_core::constants::movement::MINIMUM_SPEED_BEFORE_IDLE;
use kiln_core::movement::{accelerate, decelerate, jump, Body2D, Direction, PointMass2D};
use kiln_core::time::{FrameClock, FrameTime};
use kiln_core::Vec2;
use kiln_runtime::{
    from_fn, CoroutineScheduler, CoroutineState, DelayCache, PredicateHandle, RuntimeConfig,
};

const SIMULATED_SECONDS: f32 = 4.0;
const MAX_SPEED: f32 = 6.0;
const ACCELERATION: f32 = 1.5;
const DECELERATION: f32 = 3.0;
const JUMP_SPEED: f32 = 5.0;

fn load_config() -> Result<RuntimeConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("failed to read configuration '{path}'"))?;
            Ok(RuntimeConfig::from_ron(&text)?)
        }
        None => Ok(RuntimeConfig::default()),
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    let mut clock = FrameClock::new(&config.time)?;
    let mut delays = DelayCache::with_config(&config.delays);
    let mut scheduler = CoroutineScheduler::new();

    let player = Rc::new(RefCell::new(PointMass2D::default()));
    let moving_right = Rc::new(Cell::new(true));

    // Flip direction every second of scaled time.
    let direction = Rc::clone(&moving_right);
    scheduler.start(
        from_fn(move |cx| {
            direction.set(!direction.get());
            log::info!("Turning, moving right: {}", direction.get());
            CoroutineState::wait(cx.delays.wait_for_seconds(1.0))
        }),
        &mut delays,
        FrameTime::default(),
    );

    // Jump whenever the player is fast enough, or at least every 1.5 seconds.
    let body = Rc::clone(&player);
    let fast =
        PredicateHandle::new(move || body.borrow().velocity.x.abs() > MINIMUM_SPEED_BEFORE_IDLE);
    let jumper = Rc::clone(&player);
    scheduler.start(
        from_fn(move |cx| {
            jump(&mut *jumper.borrow_mut(), JUMP_SPEED);
            log::info!("Jump at velocity {}", jumper.borrow().velocity());
            CoroutineState::wait(cx.delays.wait_for_done(1.5, &fast))
        }),
        &mut delays,
        FrameTime::default(),
    );

    // Integrate horizontal motion on every fixed step.
    let mover = Rc::clone(&player);
    let heading = Rc::clone(&moving_right);
    scheduler.start(
        from_fn(move |cx| {
            let dt = cx.time.fixed_delta;
            let mut body = mover.borrow_mut();
            let direction = if heading.get() {
                Direction::Right
            } else {
                Direction::Left
            };
            let v = body.velocity();
            let x = accelerate(v.x, MAX_SPEED, ACCELERATION, direction, dt);
            let y = decelerate(v.y, DECELERATION, dt);
            body.set_velocity(Vec2::new(x, y));
            CoroutineState::wait(cx.delays.fixed_update())
        }),
        &mut delays,
        FrameTime::default(),
    );

    let step = config.time.target_frame_duration();
    let mut fixed_accumulator = 0.0_f32;
    while clock.unscaled_time() < f64::from(SIMULATED_SECONDS) {
        let frame = clock.advance(step);
        scheduler.update(&mut delays, frame);

        fixed_accumulator += frame.delta;
        while fixed_accumulator >= frame.fixed_delta {
            fixed_accumulator -= frame.fixed_delta;
            scheduler.fixed_update(&mut delays, frame);
        }

        scheduler.end_of_frame(&mut delays, frame);
    }

    log::info!(
        "Simulated {} frames; {} coroutine(s) alive, {} timed and {} predicate wait(s) cached. Final velocity {}",
        clock.frame_count(),
        scheduler.len(),
        delays.seconds_len(),
        delays.predicate_len(),
        player.borrow().velocity(),
    );
    Ok(())
}
