//! Client locomotion core: input snapshot, third-person movement controller,
//! orbit camera rig, and the locomotion animator, orchestrated once per frame
//! by `session::PlayerSession`.
//!
//! Rendering, windowing, and asset decoding are collaborators; this crate is
//! pure state and math.

#![deny(warnings, clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::struct_excessive_bools
)]

pub mod angles;
pub mod animator;
pub mod camera;
pub mod character;
pub mod controller;
pub mod input;
pub mod session;

pub use animator::{ClipEvent, LocomotionAnimator};
pub use camera::{CameraPose, CameraRig, HostEvent};
pub use controller::{CharacterBody, MoveState, MovementController};
pub use input::InputState;
pub use session::{FrameOutput, PlayerSession, SessionConfig};
