//! Per-frame orchestration.
//!
//! One coordinating type owns the frame order (movement, then the camera
//! whose yaw feeds back as the idle-facing target, then the ground clamp,
//! then animation selection) as private ordered calls. Callers get exactly
//! one entry point and cannot run the sub-steps out of order.

use glam::Vec3;

use crate::animator::{AnimatorConfig, ClipEvent, LocomotionAnimator, PlayingClip};
use crate::camera::{CameraConfig, CameraPose, CameraRig, HostEvent};
use crate::controller::{CharacterBody, MoveState, MovementConfig, MovementController};
use crate::input::InputState;

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionConfig {
    pub movement: MovementConfig,
    pub camera: CameraConfig,
    pub animator: AnimatorConfig,
}

/// Everything the renderer needs from one frame.
#[derive(Debug, Clone)]
pub struct FrameOutput {
    pub camera: CameraPose,
    pub body: CharacterBody,
    pub state: MoveState,
    pub clip_events: Vec<ClipEvent>,
}

/// A single player's input, movement, camera, and animation state.
pub struct PlayerSession {
    pub input: InputState,
    controller: MovementController,
    camera: CameraRig,
    animator: LocomotionAnimator,
}

impl PlayerSession {
    #[must_use]
    pub fn new(cfg: SessionConfig) -> Self {
        Self {
            input: InputState::default(),
            controller: MovementController::new(cfg.movement),
            camera: CameraRig::new(cfg.camera),
            animator: LocomotionAnimator::new(cfg.animator),
        }
    }

    #[must_use]
    pub fn controller(&self) -> &MovementController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut MovementController {
        &mut self.controller
    }

    pub fn animator_mut(&mut self) -> &mut LocomotionAnimator {
        &mut self.animator
    }

    /// Clips currently mixed into the pose, for the mixer collaborator.
    #[must_use]
    pub fn active_clips(&self) -> &[PlayingClip] {
        self.animator.active()
    }

    /// Rotate-button press/release; pointer-lock requests for the platform
    /// land in `out`.
    pub fn handle_rotate_button(&mut self, down: bool, out: &mut Vec<HostEvent>) {
        crate::camera::handle_rotate_button(&mut self.input, down, out);
    }

    /// Advance one frame. Sub-step order is the contract:
    /// movement → camera → facing feedback → ground clamp → animation.
    pub fn advance(&mut self, dt: f32) -> FrameOutput {
        // 1) horizontal movement from this frame's input sample,
        //    camera-relative via the rig's smoothed yaw
        self.controller
            .advance_movement(dt, &self.input, self.camera.yaw());
        // 2) camera follows the moved character
        let pose = self.camera.advance(dt, &self.input, self.controller.body().pos);
        // 3) facing feedback: idle facing tracks the camera
        self.controller.advance_facing(dt, self.camera.facing());
        // 4) gravity and the post-integration ground clamp
        self.controller.advance_vertical(dt, &self.input);
        // 5) animation selection from the resolved state
        let clip_events = self.animator.advance(
            dt,
            self.controller.state(),
            self.controller.ran_into_jump(),
        );
        // 6) per-frame deltas are consumed
        self.input.end_frame();

        FrameOutput {
            camera: pose,
            body: *self.controller.body(),
            state: self.controller.state(),
            clip_events,
        }
    }

    /// Spawn helper: place the character; the camera's smoothed look target
    /// settles onto it over the next frames.
    pub fn spawn_at(&mut self, pos: Vec3) {
        self.controller.teleport(pos, 0.0);
    }
}
