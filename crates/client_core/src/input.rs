//! Frame-sampled input snapshot for the local player.
//!
//! Platform code mutates this on key/pointer events; the core reads it each
//! frame and resets the per-frame pointer deltas at the bottom of the frame.
//! Created once at startup and kept for the whole session.

/// Discrete actions a key code can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Forward,
    Backward,
    Left,
    Right,
    Jump,
    Crouch,
    Run,
    Walk,
}

/// Fixed key-code → action table. Codes use the layout-independent
/// `KeyboardEvent.code` naming so bindings survive non-QWERTY layouts.
#[must_use]
pub fn action_for_code(code: &str) -> Option<Action> {
    Some(match code {
        "KeyW" | "ArrowUp" => Action::Forward,
        "KeyS" | "ArrowDown" => Action::Backward,
        "KeyA" | "ArrowLeft" => Action::Left,
        "KeyD" | "ArrowRight" => Action::Right,
        "Space" => Action::Jump,
        "ControlLeft" | "KeyC" => Action::Crouch,
        "ShiftLeft" | "ShiftRight" => Action::Run,
        "AltLeft" => Action::Walk,
        _ => return None,
    })
}

/// Pointer state driving the orbit camera.
#[derive(Debug, Clone, Copy)]
pub struct PointerState {
    /// Pointer lock is held by the platform (camera drag is active).
    pub locked: bool,
    pub dragging: bool,
    pub rotate_down: bool,
    /// Accumulated mouse delta for the current frame, in counts.
    pub frame_dx: f32,
    pub frame_dy: f32,
    pub wheel_delta: f32,
    /// Radians of camera rotation per mouse count.
    pub sensitivity: f32,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            locked: false,
            dragging: false,
            rotate_down: false,
            frame_dx: 0.0,
            frame_dy: 0.0,
            wheel_delta: 0.0,
            sensitivity: 0.003,
        }
    }
}

/// Input snapshot for one frame of local player intent.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub crouch: bool,
    pub run: bool,
    pub walk: bool,
    pub pointer: PointerState,
}

impl InputState {
    /// Apply a key-down event. Unbound codes are ignored.
    pub fn press(&mut self, code: &str) {
        if let Some(action) = action_for_code(code) {
            self.set_action(action, true);
        }
    }

    /// Apply a key-up event. Unbound codes are ignored.
    pub fn release(&mut self, code: &str) {
        if let Some(action) = action_for_code(code) {
            self.set_action(action, false);
        }
    }

    fn set_action(&mut self, action: Action, held: bool) {
        match action {
            Action::Forward => self.forward = held,
            Action::Backward => self.backward = held,
            Action::Left => self.left = held,
            Action::Right => self.right = held,
            Action::Jump => self.jump = held,
            Action::Crouch => self.crouch = held,
            Action::Run => self.run = held,
            Action::Walk => self.walk = held,
        }
    }

    #[must_use]
    pub fn any_direction(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    /// Accumulate a pointer-move delta into the current frame.
    pub fn add_mouse_delta(&mut self, dx: f32, dy: f32) {
        self.pointer.frame_dx += dx;
        self.pointer.frame_dy += dy;
    }

    /// Accumulate a wheel event into the current frame.
    pub fn add_wheel(&mut self, delta: f32) {
        self.pointer.wheel_delta += delta;
    }

    /// Platform acknowledgment that pointer lock was acquired or released.
    pub fn set_pointer_locked(&mut self, locked: bool) {
        self.pointer.locked = locked;
    }

    /// Consume the per-frame deltas; called once at the bottom of a frame.
    pub fn end_frame(&mut self) {
        self.pointer.frame_dx = 0.0;
        self.pointer.frame_dy = 0.0;
        self.pointer.wheel_delta = 0.0;
    }

    /// Drop every held action and per-frame delta (e.g. on focus loss).
    pub fn clear(&mut self) {
        let pointer = PointerState {
            frame_dx: 0.0,
            frame_dy: 0.0,
            wheel_delta: 0.0,
            ..self.pointer
        };
        *self = Self {
            pointer,
            ..Self::default()
        };
    }
}
