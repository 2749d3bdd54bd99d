//! Third-person movement controller: discrete locomotion states plus the
//! per-frame kinematic update.
//!
//! Movement is camera-relative: the raw key vector is rotated by the camera
//! yaw before integration, so "forward" always means away from the camera.

use glam::{Quat, Vec3};

use crate::angles::{lerp_angle, wrap_angle};
use crate::input::InputState;

/// Discrete locomotion state. Exactly one is active per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveState {
    Idle,
    Walk,
    Normal,
    Run,
    Crouch,
    Jump,
}

/// Tuning constants. Speeds in m/s, rates in 1/s, angles in radians.
#[derive(Debug, Clone, Copy)]
pub struct MovementConfig {
    pub move_speed: f32,
    pub walk_speed: f32,
    pub run_speed: f32,
    /// Damping rate of `current_speed` toward `target_speed`.
    pub speed_damping: f32,
    /// Damping rate of the facing angle toward its target.
    pub turn_rate: f32,
    pub gravity: f32,
    pub jump_force: f32,
    /// Fall-speed floor; gravity never accelerates past this.
    pub terminal_velocity: f32,
    pub floor_y: f32,
    /// Snap distance for the ground clamp.
    pub ground_epsilon: f32,
    /// Frame deltas are clamped here so a stalled frame cannot tunnel
    /// through the floor.
    pub max_dt: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            move_speed: 4.0,
            walk_speed: 2.0,
            run_speed: 7.0,
            speed_damping: 8.0,
            turn_rate: 12.0,
            gravity: 9.81,
            jump_force: 4.6,
            terminal_velocity: 20.0,
            floor_y: 0.0,
            ground_epsilon: 0.01,
            max_dt: 0.1,
        }
    }
}

/// Kinematic state owned by the controller; everything else reads it only.
#[derive(Debug, Clone, Copy)]
pub struct CharacterBody {
    pub pos: Vec3,
    pub vel: Vec3,
    /// Facing angle in radians, wrapped to `[0, 2π)`.
    pub facing: f32,
    pub grounded: bool,
    pub current_speed: f32,
    pub target_speed: f32,
}

impl Default for CharacterBody {
    fn default() -> Self {
        Self {
            pos: Vec3::ZERO,
            vel: Vec3::ZERO,
            facing: 0.0,
            grounded: true,
            current_speed: 0.0,
            target_speed: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MovementController {
    body: CharacterBody,
    state: MoveState,
    cfg: MovementConfig,
    /// Set at takeoff when the character was running; picks the running-jump
    /// clip. Kinematics are identical for both jump flavors.
    ran_into_jump: bool,
    /// World-space movement direction for the current frame (zero when no
    /// directional action is held).
    move_dir: Vec3,
}

impl MovementController {
    #[must_use]
    pub fn new(cfg: MovementConfig) -> Self {
        Self {
            body: CharacterBody::default(),
            state: MoveState::Idle,
            cfg,
            ran_into_jump: false,
            move_dir: Vec3::ZERO,
        }
    }

    #[must_use]
    pub fn body(&self) -> &CharacterBody {
        &self.body
    }

    #[must_use]
    pub fn state(&self) -> MoveState {
        self.state
    }

    #[must_use]
    pub fn ran_into_jump(&self) -> bool {
        self.ran_into_jump
    }

    #[must_use]
    pub fn config(&self) -> &MovementConfig {
        &self.cfg
    }

    /// Place the character (e.g. at spawn). Facing is wrapped.
    pub fn teleport(&mut self, pos: Vec3, facing: f32) {
        self.body.pos = pos;
        self.body.facing = wrap_angle(facing);
        self.body.vel = Vec3::ZERO;
    }

    /// Full per-frame update: state machine, horizontal move, facing,
    /// gravity, and the ground clamp, in that order.
    pub fn advance(&mut self, dt: f32, input: &InputState, cam_yaw: f32, cam_facing: f32) {
        self.advance_movement(dt, input, cam_yaw);
        self.advance_facing(dt, cam_facing);
        self.advance_vertical(dt, input);
    }

    /// Malformed frame deltas are clamped at the integration boundary.
    fn clamp_dt(&self, dt: f32) -> f32 {
        if dt.is_finite() {
            dt.clamp(0.0, self.cfg.max_dt)
        } else {
            0.0
        }
    }

    /// Evaluate the state transition table. First match wins.
    fn transition(&mut self, input: &InputState) {
        let dir_held = input.any_direction();
        let (state, target_speed) = if !dir_held && self.body.grounded {
            (MoveState::Idle, 0.0)
        } else if !self.body.grounded {
            // Persists until grounded again; the takeoff target is kept.
            (MoveState::Jump, self.body.target_speed)
        } else if input.crouch {
            (MoveState::Crouch, self.cfg.walk_speed * 0.5)
        } else if input.run {
            (MoveState::Run, self.cfg.run_speed)
        } else if input.walk {
            (MoveState::Walk, self.cfg.walk_speed)
        } else {
            (MoveState::Normal, self.cfg.move_speed)
        };
        self.state = state;
        self.body.target_speed = target_speed;
    }

    /// Sub-step 1: transitions, speed damping, camera-relative horizontal
    /// integration.
    pub(crate) fn advance_movement(&mut self, dt: f32, input: &InputState, cam_yaw: f32) {
        let dt = self.clamp_dt(dt);
        self.transition(input);

        let k = (self.cfg.speed_damping * dt).min(1.0);
        self.body.current_speed += (self.body.target_speed - self.body.current_speed) * k;

        let raw = raw_direction(input);
        self.move_dir = if raw.length_squared() > 0.0 {
            Quat::from_rotation_y(cam_yaw) * raw.normalize()
        } else {
            Vec3::ZERO
        };

        self.body.vel.x = self.move_dir.x * self.body.current_speed;
        self.body.vel.z = self.move_dir.z * self.body.current_speed;
        self.body.pos.x += self.body.vel.x * dt;
        self.body.pos.z += self.body.vel.z * dt;
    }

    /// Sub-step 2: turn toward the movement direction while moving, toward
    /// the camera-fed facing target while idle. Always the shorter path.
    pub(crate) fn advance_facing(&mut self, dt: f32, cam_facing: f32) {
        let dt = self.clamp_dt(dt);
        let target = if self.move_dir.length_squared() > 0.0 {
            self.move_dir.x.atan2(self.move_dir.z)
        } else {
            cam_facing
        };
        let k = (self.cfg.turn_rate * dt).min(1.0);
        self.body.facing = lerp_angle(self.body.facing, wrap_angle(target), k);
    }

    /// Sub-step 3: jump trigger, gravity, vertical integration, and the
    /// post-integration ground clamp.
    pub(crate) fn advance_vertical(&mut self, dt: f32, input: &InputState) {
        let dt = self.clamp_dt(dt);

        if self.body.grounded && input.jump {
            self.ran_into_jump = self.state == MoveState::Run;
            self.body.vel.y = self.cfg.jump_force;
            self.body.grounded = false;
            self.state = MoveState::Jump;
        }

        // Gravity integrates every frame; the ground clamp below re-zeroes it.
        self.body.vel.y -= self.cfg.gravity * dt;
        self.body.vel.y = self.body.vel.y.max(-self.cfg.terminal_velocity);
        self.body.pos.y += self.body.vel.y * dt;

        // Clamp strictly after integrating both axes; one frame of
        // interpenetration is accepted.
        if self.body.pos.y <= self.cfg.floor_y + self.cfg.ground_epsilon {
            self.body.pos.y = self.cfg.floor_y;
            self.body.vel.y = 0.0;
            self.body.grounded = true;
            self.ran_into_jump = false;
        } else {
            self.body.grounded = false;
        }
    }
}

/// Raw key vector: forward is -z, right is +x. Not yet normalized.
fn raw_direction(input: &InputState) -> Vec3 {
    let mut dir = Vec3::ZERO;
    if input.forward {
        dir.z -= 1.0;
    }
    if input.backward {
        dir.z += 1.0;
    }
    if input.left {
        dir.x -= 1.0;
    }
    if input.right {
        dir.x += 1.0;
    }
    dir
}
