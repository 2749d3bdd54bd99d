//! Locomotion animator: one clip per movement state, cross-faded.
//!
//! The animator never samples bones itself; it maintains the weighted set of
//! active clips the downstream mixer binds to the skeleton. One-shot clips
//! report completion as a synchronous event in the same `advance` pass, so
//! there are no completion listeners to register or leak.

use std::collections::HashMap;

use plaza_assets::AnimClip;

use crate::controller::MoveState;

/// Fixed movement-state → clip-name table.
#[must_use]
pub fn clip_for(state: MoveState, ran_into_jump: bool) -> &'static str {
    match state {
        MoveState::Idle => "idle",
        MoveState::Walk | MoveState::Normal => "walk",
        MoveState::Run => "run",
        MoveState::Crouch => "crouch",
        MoveState::Jump => {
            if ran_into_jump {
                "jump_running"
            } else {
                "jump"
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AnimatorConfig {
    /// Cross-fade length in seconds.
    pub fade_duration: f32,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            fade_duration: 0.25,
        }
    }
}

/// A clip currently mixed into the pose.
#[derive(Debug, Clone)]
pub struct PlayingClip {
    pub name: String,
    pub time: f32,
    pub weight: f32,
    looping: bool,
    duration: f32,
    fading_in: bool,
}

/// Synchronous per-clip signal for the frame that just advanced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipEvent {
    Finished(String),
}

pub struct LocomotionAnimator {
    cfg: AnimatorConfig,
    clips: HashMap<String, AnimClip>,
    active: Vec<PlayingClip>,
    current: Option<String>,
}

impl LocomotionAnimator {
    #[must_use]
    pub fn new(cfg: AnimatorConfig) -> Self {
        Self {
            cfg,
            clips: HashMap::new(),
            active: Vec::new(),
            current: None,
        }
    }

    /// Install the (already retargeted) clip set. Replaces any previous set;
    /// active playback state is reset.
    pub fn set_clips(&mut self, clips: Vec<AnimClip>) {
        log::info!("animator: {} clips installed", clips.len());
        self.clips = clips.into_iter().map(|c| (c.name.clone(), c)).collect();
        self.active.clear();
        self.current = None;
    }

    #[must_use]
    pub fn has_clips(&self) -> bool {
        !self.clips.is_empty()
    }

    /// Clips currently mixed into the pose, for the mixer collaborator.
    #[must_use]
    pub fn active(&self) -> &[PlayingClip] {
        &self.active
    }

    #[must_use]
    pub fn current_clip(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Select the clip for `state`, advance times and fade weights, and
    /// report any one-shot completions for this frame.
    pub fn advance(&mut self, dt: f32, state: MoveState, ran_into_jump: bool) -> Vec<ClipEvent> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.play(clip_for(state, ran_into_jump));

        let fade_step = if self.cfg.fade_duration > 0.0 {
            dt / self.cfg.fade_duration
        } else {
            1.0
        };

        let mut events = Vec::new();
        for clip in &mut self.active {
            if clip.fading_in {
                clip.weight = (clip.weight + fade_step).min(1.0);
            } else {
                clip.weight = (clip.weight - fade_step).max(0.0);
            }
            if clip.looping {
                clip.time += dt;
                if clip.duration > 0.0 {
                    clip.time = clip.time.rem_euclid(clip.duration);
                }
            } else if clip.duration > 0.0 && clip.time < clip.duration {
                clip.time = (clip.time + dt).min(clip.duration);
                if clip.time >= clip.duration {
                    events.push(ClipEvent::Finished(clip.name.clone()));
                }
            }
        }
        self.active.retain(|c| c.weight > 0.0 || c.fading_in);

        // A finished one-shot releases the current slot; the next advance
        // re-selects from whatever the movement state then is.
        for ClipEvent::Finished(name) in &events {
            if self.current.as_deref() == Some(name) {
                self.current = None;
                for clip in &mut self.active {
                    if clip.name == *name {
                        clip.fading_in = false;
                    }
                }
            }
        }
        events
    }

    /// Start cross-fading to `name`. Re-selecting the current clip is a
    /// no-op so redundant selections cannot restart playback.
    fn play(&mut self, name: &str) {
        if self.current.as_deref() == Some(name) {
            return;
        }
        let Some(clip) = self.clips.get(name) else {
            log::debug!("animator: no clip installed for `{name}`");
            return;
        };
        for active in &mut self.active {
            active.fading_in = false;
        }
        let instant = self.cfg.fade_duration <= 0.0;
        self.active.push(PlayingClip {
            name: name.to_string(),
            time: 0.0,
            weight: if instant { 1.0 } else { 0.0 },
            looping: !name.starts_with("jump"),
            duration: clip.duration,
            fading_in: true,
        });
        self.current = Some(name.to_string());
    }
}

impl Default for LocomotionAnimator {
    fn default() -> Self {
        Self::new(AnimatorConfig::default())
    }
}
