// crates/input_core/src/engine_loop.rs

use std::time::Instant;

use crate::app::App;
use crate::input::InputRouter;

/// Fixed-timestep bookkeeping (time, accumulator, limits).
/// Each step runs the app's input step before the gameplay update.
pub struct EngineLoop {
    last_frame_time: Instant,
    sim_accumulator: f32,
    sim_dt: f32,
    max_steps_per_frame: u32,
}

impl EngineLoop {
    pub fn new(sim_dt: f32) -> Self {
        Self {
            last_frame_time: Instant::now(),
            sim_accumulator: 0.0,
            sim_dt,
            max_steps_per_frame: 5,
        }
    }

    pub fn sim_dt(&self) -> f32 {
        self.sim_dt
    }

    /// Update the frame timer and return the clamped frame delta.
    /// Clamps to 0.25s to avoid giant spikes when dragging the window,
    /// hitting breakpoints, etc.
    pub fn tick_timer(&mut self) -> f32 {
        let now = Instant::now();
        let frame_dt = now.duration_since(self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;

        frame_dt.min(0.25)
    }

    /// Runs fixed-timestep steps until the accumulator is caught up or we hit
    /// max_steps_per_frame. Each step calls `app.step_input()` and then `update`.
    /// Returns the number of steps taken.
    pub fn update_simulation<F>(&mut self, frame_dt: f32, app: &mut App, mut update: F) -> u32
    where
        F: FnMut(&mut InputRouter, f32),
    {
        let steps = self.advance(frame_dt);
        for _ in 0..steps {
            app.step_input();
            update(app.router_mut(), self.sim_dt);
        }
        steps
    }

    /// Accumulator arithmetic only. If the backlog still remains at the cap,
    /// we drop it, to avoid "chasing" an infinite backlog under heavy load.
    fn advance(&mut self, frame_dt: f32) -> u32 {
        self.sim_accumulator += frame_dt;

        let mut steps = 0;
        while self.sim_accumulator >= self.sim_dt && steps < self.max_steps_per_frame {
            self.sim_accumulator -= self.sim_dt;
            steps += 1;
        }

        if steps == self.max_steps_per_frame && self.sim_accumulator >= self.sim_dt {
            self.sim_accumulator = 0.0;
        }
        steps
    }
}
