//! Orbit camera rig: drag-driven yaw/pitch, wheel zoom, damped follow.
//!
//! The rig both consumes character state (follow target) and drives it: its
//! smoothed yaw is the movement basis, and `facing()` is the idle-facing
//! target fed back to the controller.

use glam::Vec3;
use std::f32::consts::PI;

use crate::angles::wrap_angle;
use crate::input::InputState;

/// Tuning constants. Rates in 1/s, angles in radians, distances in meters.
#[derive(Debug, Clone, Copy)]
pub struct CameraConfig {
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub min_pitch: f32,
    pub max_pitch: f32,
    /// Yaw/pitch/zoom damping while the rotate button is held.
    pub drag_rate: f32,
    /// Yaw/pitch/zoom damping while idle (settling drift).
    pub settle_rate: f32,
    pub look_rate: f32,
    /// Zoom step per wheel unit, as a fraction of the current distance.
    pub zoom_step_scale: f32,
    /// Height of the look target above the character origin.
    pub eye_height: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            min_zoom: 2.0,
            max_zoom: 16.0,
            min_pitch: -PI / 2.5,
            max_pitch: PI / 4.0,
            drag_rate: 18.0,
            settle_rate: 6.0,
            look_rate: 10.0,
            zoom_step_scale: 0.1,
            eye_height: 1.6,
        }
    }
}

/// Resolved camera transform for one frame.
#[derive(Debug, Clone, Copy)]
pub struct CameraPose {
    pub eye: Vec3,
    pub look_target: Vec3,
    /// Smoothed yaw, wrapped to `[0, 2π)`; the movement basis.
    pub yaw: f32,
}

/// Host-side effects requested by the rig; the platform owns the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    PointerLockRequest(bool),
}

#[derive(Debug, Clone)]
pub struct CameraRig {
    yaw: f32,
    target_yaw: f32,
    pitch: f32,
    target_pitch: f32,
    zoom: f32,
    target_zoom: f32,
    look_target: Vec3,
    cfg: CameraConfig,
}

impl CameraRig {
    #[must_use]
    pub fn new(cfg: CameraConfig) -> Self {
        let zoom = (cfg.min_zoom + cfg.max_zoom) * 0.5;
        let pitch = 0.35_f32.clamp(cfg.min_pitch, cfg.max_pitch);
        Self {
            yaw: 0.0,
            target_yaw: 0.0,
            pitch,
            target_pitch: pitch,
            zoom,
            target_zoom: zoom,
            look_target: Vec3::ZERO,
            cfg,
        }
    }

    /// Current smoothed yaw, wrapped to `[0, 2π)`.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        wrap_angle(self.yaw)
    }

    #[must_use]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    #[must_use]
    pub fn target_zoom(&self) -> f32 {
        self.target_zoom
    }

    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Idle-facing target for the character: directly away from the camera.
    #[must_use]
    pub fn facing(&self) -> f32 {
        wrap_angle(self.yaw + PI)
    }

    /// Per-frame update. Mouse deltas only apply while pointer lock is held
    /// and the rotate button is down; wheel zoom follows a multiplicative
    /// law so steps shrink as the camera closes in.
    pub fn advance(&mut self, dt: f32, input: &InputState, character_pos: Vec3) -> CameraPose {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let pointer = &input.pointer;

        if pointer.locked && pointer.rotate_down {
            self.target_yaw -= pointer.frame_dx * pointer.sensitivity;
            self.target_pitch = (self.target_pitch + pointer.frame_dy * pointer.sensitivity)
                .clamp(self.cfg.min_pitch, self.cfg.max_pitch);
        }

        if pointer.wheel_delta.abs() > f32::EPSILON {
            let step = self.cfg.zoom_step_scale * self.zoom;
            self.target_zoom = (self.target_zoom + pointer.wheel_delta * step)
                .clamp(self.cfg.min_zoom, self.cfg.max_zoom);
        }

        // Snappy while dragging, settling drift otherwise; all three axes
        // share the rate.
        let rate = if pointer.rotate_down {
            self.cfg.drag_rate
        } else {
            self.cfg.settle_rate
        };
        let k = (rate * dt).min(1.0);
        self.yaw += (self.target_yaw - self.yaw) * k;
        self.pitch += (self.target_pitch - self.pitch) * k;
        self.zoom += (self.target_zoom - self.zoom) * k;

        // Look target is smoothed separately from the angles.
        let desired_look = character_pos + Vec3::Y * self.cfg.eye_height;
        let kl = (self.cfg.look_rate * dt).min(1.0);
        self.look_target += (desired_look - self.look_target) * kl;

        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let offset = Vec3::new(sin_yaw * cos_pitch, sin_pitch, cos_yaw * cos_pitch) * self.zoom;
        CameraPose {
            eye: character_pos + offset,
            look_target: self.look_target,
            yaw: self.yaw(),
        }
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

/// Rotate-button press/release. Requests pointer lock on press and a release
/// on let-go; the platform answers via `InputState::set_pointer_locked`.
pub fn handle_rotate_button(input: &mut InputState, down: bool, out: &mut Vec<HostEvent>) {
    if input.pointer.rotate_down == down {
        return;
    }
    input.pointer.rotate_down = down;
    input.pointer.dragging = down;
    log::debug!("camera drag {}", if down { "begin" } else { "end" });
    out.push(HostEvent::PointerLockRequest(down));
}
