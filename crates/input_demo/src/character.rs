// crates/input_demo/src/character.rs
//! Third-person controller driven purely by bound mappings.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use input_core::input::InputRouter;
use tracing::{debug, info};

/// Degrees per second at full stick deflection.
const BASE_TURN_RATE: f32 = 45.0;
const BASE_LOOK_UP_RATE: f32 = 45.0;
const WALK_SPEED: f32 = 3.0;
const SPRINT_SPEED: f32 = 6.0;

/// Values written by the bound callbacks during a step.
#[derive(Debug, Default)]
struct Intent {
    move_input: Vec2,
    yaw_input: f32,
    pitch_input: f32,
    yaw_rate: f32,
    pitch_rate: f32,
    jumps: u32,
    sprint_toggles: u32,
    shots: u32,
}

#[derive(Debug, Default)]
pub struct Character {
    intent: Rc<RefCell<Intent>>,
    pub position: Vec2,
    pub yaw: f32,
    pub pitch: f32,
    pub sprinting: bool,
    pub jumps: u32,
    pub shots: u32,
}

impl Character {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds every mapping this controller understands. Names missing from the
    /// config are ignored by the router.
    pub fn bind(&self, router: &mut InputRouter) {
        let intent = self.intent.clone();
        router.bind_axis("MoveForward", move |v| intent.borrow_mut().move_input.y += v);
        let intent = self.intent.clone();
        router.bind_axis("MoveRight", move |v| intent.borrow_mut().move_input.x += v);
        let intent = self.intent.clone();
        router.bind_axis("Turn", move |v| intent.borrow_mut().yaw_input += v);
        let intent = self.intent.clone();
        router.bind_axis("LookUp", move |v| intent.borrow_mut().pitch_input += v);
        let intent = self.intent.clone();
        router.bind_axis("TurnRate", move |v| intent.borrow_mut().yaw_rate = v);
        let intent = self.intent.clone();
        router.bind_axis("LookUpRate", move |v| intent.borrow_mut().pitch_rate = v);

        let intent = self.intent.clone();
        router.bind_action("Jump", move || intent.borrow_mut().jumps += 1);
        let intent = self.intent.clone();
        router.bind_action("Sprint", move || intent.borrow_mut().sprint_toggles += 1);
        let intent = self.intent.clone();
        router.bind_action("Fire", move || intent.borrow_mut().shots += 1);
    }

    /// Consumes this step's intent. Accumulators reset every step; the router
    /// re-sends held input each step.
    pub fn step(&mut self, dt: f32) {
        let intent = std::mem::take(&mut *self.intent.borrow_mut());

        if intent.sprint_toggles % 2 == 1 {
            self.sprinting = !self.sprinting;
            info!(sprinting = self.sprinting, "sprint toggled");
        }
        if intent.jumps > 0 {
            info!(position = ?self.position, "jump");
        }
        if intent.shots > 0 {
            info!(yaw = self.yaw, pitch = self.pitch, "fire");
        }
        self.jumps += intent.jumps;
        self.shots += intent.shots;

        let speed = if self.sprinting { SPRINT_SPEED } else { WALK_SPEED };
        let movement = intent.move_input.clamp_length_max(1.0);
        self.position += movement * speed * dt;

        self.yaw += intent.yaw_input + intent.yaw_rate * BASE_TURN_RATE * dt;
        self.pitch = (self.pitch + intent.pitch_input + intent.pitch_rate * BASE_LOOK_UP_RATE * dt)
            .clamp(-89.0, 89.0);

        if movement != Vec2::ZERO {
            debug!(position = ?self.position, yaw = self.yaw, "moved");
        }
    }
}
