// crates/input_core/src/platform_runner.rs

use thiserror::Error;
use tracing::{debug, info};
use winit::error::{EventLoopError, OsError};
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::app::App;
use crate::engine_loop::EngineLoop;
use crate::input::{InputDefaults, InputRouter};

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("event loop failed: {0}")]
    EventLoop(#[from] EventLoopError),

    #[error("window creation failed: {0}")]
    Window(#[from] OsError),
}

/// Gameplay side of the loop. Callbacks bound on the router fire from inside
/// `router.tick()` and the event handlers, before `fixed_update` runs.
pub trait Simulation {
    /// Once per rendered frame, before any fixed step.
    fn begin_frame(&mut self, _app: &mut App) {}

    fn fixed_update(&mut self, router: &mut InputRouter, dt: f32);
}

/// Owns App and runs the platform (winit) event loop.
/// This isolates OS interaction from the input core.
pub struct PlatformRunner {
    app: App,
}

impl PlatformRunner {
    pub fn new(app: App) -> Self {
        Self { app }
    }

    pub fn start<S>(mut self, mut sim: S) -> Result<(), RunnerError>
    where
        S: Simulation + 'static,
    {
        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&self.app.window_title)
            .with_inner_size(winit::dpi::LogicalSize::new(1280.0, 720.0))
            .build(&event_loop)?;

        #[cfg(feature = "gamepad")]
        self.app.enable_gamepads();

        let mut engine_loop = EngineLoop::new(InputDefaults::SIM_DT);
        info!(sim_dt = engine_loop.sim_dt(), "entering event loop");

        event_loop.run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Poll);

            match event {
                Event::WindowEvent { event: win_event, .. } => match win_event {
                    WindowEvent::CloseRequested => elwt.exit(),
                    WindowEvent::Focused(focused) => {
                        debug!(focused, "window focus changed");
                        self.app.handle_window_event(&win_event);
                    }
                    _ => self.app.handle_window_event(&win_event),
                },

                Event::AboutToWait => {
                    // 1) Time step
                    let frame_dt = engine_loop.tick_timer();

                    // 2) Polled device state (gamepads)
                    self.app.begin_frame();
                    sim.begin_frame(&mut self.app);

                    // 3) Fixed-step simulation: stick re-send and held re-fire, then gameplay.
                    engine_loop.update_simulation(frame_dt, &mut self.app, |router, dt| {
                        sim.fixed_update(router, dt)
                    });

                    window.request_redraw();
                }

                Event::LoopExiting => info!("event loop exiting"),

                _ => {}
            }
        })?;

        Ok(())
    }
}
