// crates/input_core/src/input/mapping.rs

/// Gameplay callback for an axis. The receiver is captured by the closure.
pub type AxisCallback = Box<dyn FnMut(f32)>;

/// Gameplay callback for an action.
pub type ActionCallback = Box<dyn FnMut()>;

pub struct AxisMapping {
    name: String,
    callback: AxisCallback,
    value: f32,
}

impl AxisMapping {
    pub fn new(name: &str, callback: AxisCallback) -> Self {
        Self {
            name: name.to_string(),
            callback,
            value: 0.0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Last value delivered to the callback (diagnostics only).
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn execute(&mut self, value: f32) {
        self.value = value;
        (self.callback)(value);
    }

    pub fn cancel(&mut self) {
        self.execute(0.0);
    }
}

pub struct ActionMapping {
    name: String,
    callback: ActionCallback,
}

impl ActionMapping {
    pub fn new(name: &str, callback: ActionCallback) -> Self {
        Self {
            name: name.to_string(),
            callback,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn execute(&mut self) {
        (self.callback)();
    }

    /// Actions hold no steady-state value, so there is nothing to clear.
    pub fn cancel(&mut self) {}
}

/// A bound mapping instance. One table of these replaces separate axis/action tables.
pub enum Mapping {
    Axis(AxisMapping),
    Action(ActionMapping),
}

impl Mapping {
    pub fn name(&self) -> &str {
        match self {
            Mapping::Axis(axis) => axis.name(),
            Mapping::Action(action) => action.name(),
        }
    }

    pub fn cancel(&mut self) {
        match self {
            Mapping::Axis(axis) => axis.cancel(),
            Mapping::Action(action) => action.cancel(),
        }
    }
}
