// crates/input_core/src/input/joystick.rs
//! On-screen touch widgets. Rendering lives elsewhere; these only turn touch
//! positions into router calls and expose the thumb position to draw.

use glam::Vec2;
use input_shared::{input_codes, RawCode};

use super::router::InputRouter;

/// Caps `offset` at `radius` while keeping its direction.
pub fn disc_clamp(offset: Vec2, radius: f32) -> Vec2 {
    offset.clamp_length_max(radius.max(0.0))
}

/// Axis pair in [-1, 1] for a touch at `location` on a stick centred on `origin`.
/// `None` for a degenerate radius.
pub fn stick_axes(location: Vec2, origin: Vec2, radius: f32) -> Option<Vec2> {
    if !(radius > 0.0) {
        return None;
    }
    Some(disc_clamp(location - origin, radius) / radius)
}

/// Virtual thumbstick: the X axis goes to `main_code`, the Y axis to `alt_code`.
#[derive(Debug, Clone)]
pub struct VirtualJoystick {
    origin: Vec2,
    radius: f32,
    main_code: RawCode,
    alt_code: RawCode,
    thumb: Vec2,
    axes: Vec2,
    active: bool,
    /// Axes already sent since the last `refresh`.
    fresh: bool,
}

impl VirtualJoystick {
    pub fn new(origin: Vec2, radius: f32, main_code: RawCode, alt_code: RawCode) -> Self {
        Self {
            origin,
            radius,
            main_code,
            alt_code,
            thumb: Vec2::ZERO,
            axes: Vec2::ZERO,
            active: false,
            fresh: false,
        }
    }

    /// Thumb position relative to the background centre, already clamped.
    pub fn thumb_offset(&self) -> Vec2 {
        self.thumb
    }

    pub fn axes(&self) -> Vec2 {
        self.axes
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether a touch starting at `location` lands on the background disc.
    pub fn hit_test(&self, location: Vec2) -> bool {
        self.radius > 0.0 && location.distance(self.origin) <= self.radius
    }

    pub fn on_touch_start(&mut self, router: &mut InputRouter, location: Vec2) {
        self.drag(router, location);
    }

    pub fn on_touch_move(&mut self, router: &mut InputRouter, location: Vec2) {
        self.drag(router, location);
    }

    pub fn on_touch_end(&mut self, router: &mut InputRouter) {
        self.reset();
        for code in self.codes() {
            router.on_touch_end(code);
        }
    }

    pub fn on_touch_cancel(&mut self, router: &mut InputRouter) {
        self.reset();
        for code in self.codes() {
            router.on_touch_cancel(code);
        }
    }

    /// Re-sends the current deflection, once per simulation step before the held
    /// re-fire. Touch platforms only report movement, so a thumb resting off-centre
    /// would otherwise fall silent. Skipped if a drag already reported since the
    /// last call.
    pub fn refresh(&mut self, router: &mut InputRouter) {
        if self.active && !self.fresh {
            self.emit(router);
        }
        self.fresh = false;
    }

    fn drag(&mut self, router: &mut InputRouter, location: Vec2) {
        let Some(axes) = stick_axes(location, self.origin, self.radius) else {
            return;
        };
        self.axes = axes;
        self.thumb = axes * self.radius;
        self.active = true;
        self.fresh = true;
        self.emit(router);
    }

    fn emit(&self, router: &mut InputRouter) {
        if self.main_code != input_codes::NONE {
            router.on_joystick_axis(self.main_code, self.axes.x);
        }
        if self.alt_code != input_codes::NONE {
            router.on_joystick_axis(self.alt_code, self.axes.y);
        }
    }

    fn reset(&mut self) {
        self.thumb = Vec2::ZERO;
        self.axes = Vec2::ZERO;
        self.active = false;
        self.fresh = false;
    }

    fn codes(&self) -> impl Iterator<Item = RawCode> {
        [self.main_code, self.alt_code]
            .into_iter()
            .filter(|&code| code != input_codes::NONE)
    }
}

/// Round on-screen button bound to a single raw code.
#[derive(Debug, Clone, Copy)]
pub struct VirtualButton {
    origin: Vec2,
    radius: f32,
    code: RawCode,
}

impl VirtualButton {
    pub fn new(origin: Vec2, radius: f32, code: RawCode) -> Self {
        Self {
            origin,
            radius,
            code,
        }
    }

    pub fn code(&self) -> RawCode {
        self.code
    }

    /// Whether a touch starting at `location` lands on the button.
    pub fn hit_test(&self, location: Vec2) -> bool {
        self.radius > 0.0 && location.distance(self.origin) <= self.radius
    }

    pub fn on_touch_start(&self, router: &mut InputRouter) {
        if self.code != input_codes::NONE {
            router.on_touch_start(self.code);
        }
    }

    pub fn on_touch_end(&self, router: &mut InputRouter) {
        if self.code != input_codes::NONE {
            router.on_touch_end(self.code);
        }
    }

    pub fn on_touch_cancel(&self, router: &mut InputRouter) {
        if self.code != input_codes::NONE {
            router.on_touch_cancel(self.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use input_shared::input_codes::*;
    use input_shared::MappingConfig;
    use std::cell::RefCell;
    use std::rc::Rc;

    const EPS: f32 = 1e-5;

    fn router() -> InputRouter {
        let config = MappingConfig::default()
            .with_axis("MoveRight", LEFT_THUMBSTICK_AXIS_X, 1.0)
            .with_axis("MoveForward", LEFT_THUMBSTICK_AXIS_Y, 1.0)
            .with_action("Jump", GAMEPAD_TOUCH_1);
        InputRouter::from_config(&config).unwrap()
    }

    #[test]
    fn disc_clamp_preserves_angle() {
        let radius = 50.0;
        for step in 0..16 {
            let theta = step as f32 * std::f32::consts::TAU / 16.0;
            let offset = Vec2::new(theta.cos(), theta.sin()) * 130.0;

            let clamped = disc_clamp(offset, radius);

            assert!((clamped.length() - radius).abs() < EPS * radius);
            assert!(clamped.angle_between(offset).abs() < 1e-3);
        }
    }

    #[test]
    fn disc_clamp_leaves_inner_offsets_alone() {
        let offset = Vec2::new(3.0, -4.0);
        assert_eq!(disc_clamp(offset, 10.0), offset);
    }

    #[test]
    fn axes_stay_within_unit_range() {
        let origin = Vec2::new(200.0, 100.0);
        for location in [
            Vec2::new(900.0, 100.0),
            Vec2::new(-400.0, -300.0),
            Vec2::new(200.0, 1000.0),
            Vec2::new(230.0, 110.0),
        ] {
            let axes = stick_axes(location, origin, 60.0).unwrap();
            assert!((-1.0..=1.0).contains(&axes.x));
            assert!((-1.0..=1.0).contains(&axes.y));
        }
        assert_eq!(stick_axes(Vec2::ONE, Vec2::ZERO, 0.0), None);
    }

    #[test]
    fn drag_emits_both_axes_and_release_zeroes_them() {
        let mut router = router();
        let right = Rc::new(RefCell::new(Vec::new()));
        let sink = right.clone();
        router.bind_axis("MoveRight", move |v| sink.borrow_mut().push(v));
        router.bind_axis("MoveForward", |_| {});

        let mut stick = VirtualJoystick::new(
            Vec2::new(100.0, 100.0),
            50.0,
            LEFT_THUMBSTICK_AXIS_X,
            LEFT_THUMBSTICK_AXIS_Y,
        );

        stick.on_touch_start(&mut router, Vec2::new(125.0, 100.0));
        stick.on_touch_move(&mut router, Vec2::new(100.0, 400.0));

        assert!((router.axis_value("MoveForward").unwrap() - 1.0).abs() < EPS);
        assert!((stick.thumb_offset() - Vec2::new(0.0, 50.0)).length() < EPS);
        assert!(router.is_pressed(LEFT_THUMBSTICK_AXIS_X));

        stick.on_touch_end(&mut router);

        assert_eq!(router.axis_value("MoveRight"), Some(0.0));
        assert_eq!(router.axis_value("MoveForward"), Some(0.0));
        assert!(!router.is_pressed(LEFT_THUMBSTICK_AXIS_Y));
        assert_eq!(stick.thumb_offset(), Vec2::ZERO);

        let seen = right.borrow();
        assert!((seen[0] - 0.5).abs() < EPS);
        assert_eq!(seen.last(), Some(&0.0));
    }

    #[test]
    fn refresh_only_while_touched() {
        let mut router = router();
        let count = Rc::new(RefCell::new(0));
        let sink = count.clone();
        router.bind_axis("MoveRight", move |_| *sink.borrow_mut() += 1);

        let mut stick = VirtualJoystick::new(Vec2::ZERO, 10.0, LEFT_THUMBSTICK_AXIS_X, NONE);
        stick.refresh(&mut router);
        assert_eq!(*count.borrow(), 0);

        stick.on_touch_start(&mut router, Vec2::new(5.0, 0.0));
        // The drag already reported for this step.
        stick.refresh(&mut router);
        assert_eq!(*count.borrow(), 1);

        stick.refresh(&mut router);
        stick.on_touch_cancel(&mut router);
        stick.refresh(&mut router);

        // start, second refresh, cancel
        assert_eq!(*count.borrow(), 3);
    }

    #[test]
    fn button_presses_through_touch_path() {
        let mut router = router();
        let jumps = Rc::new(RefCell::new(0));
        let sink = jumps.clone();
        router.bind_action("Jump", move || *sink.borrow_mut() += 1);

        let button = VirtualButton::new(Vec2::ZERO, 20.0, GAMEPAD_TOUCH_1);
        button.on_touch_start(&mut router);
        assert!(router.is_pressed(GAMEPAD_TOUCH_1));
        button.on_touch_end(&mut router);

        VirtualButton::new(Vec2::ZERO, 20.0, NONE).on_touch_start(&mut router);

        assert_eq!(*jumps.borrow(), 1);
        assert!(!router.is_pressed(GAMEPAD_TOUCH_1));
    }

    #[test]
    fn button_hit_test_is_a_disc() {
        let button = VirtualButton::new(Vec2::new(50.0, -50.0), 10.0, GAMEPAD_TOUCH_2);

        assert!(button.hit_test(Vec2::new(56.0, -58.0)));
        assert!(!button.hit_test(Vec2::new(61.0, -50.0)));
        assert!(!VirtualButton::new(Vec2::ZERO, 0.0, GAMEPAD_TOUCH_2).hit_test(Vec2::ZERO));
        assert_eq!(button.code(), GAMEPAD_TOUCH_2);
    }
}
