//! Animation retargeting: rename foreign-skeleton tracks onto the target rig.
//!
//! Pure transform over a clip's track list. Tracks the table cannot place are
//! passed through untouched; animation import degrades, it never fails.

use crate::bonemap::BoneMap;
use crate::types::{AnimClip, Track};

/// Property suffix carrying authored root motion.
const TRANSLATION_PROPERTY: &str = "position";

/// Property suffixes the retargeter understands; anything else passes through.
fn is_known_property(prop: &str) -> bool {
    matches!(prop, "position" | "quaternion" | "rotation" | "scale")
}

/// Split `"<bone>.<property>"` at the last separator.
fn split_track_name(name: &str) -> Option<(&str, &str)> {
    let dot = name.rfind('.')?;
    if dot == 0 || dot + 1 == name.len() {
        return None;
    }
    Some((&name[..dot], &name[dot + 1..]))
}

/// Remap a clip authored for a foreign skeleton onto the target skeleton.
///
/// Root-bone translation tracks are dropped so the source's authored root
/// motion cannot drag the character through the world; mapped bones are
/// renamed sample-for-sample; everything else passes through unchanged.
/// The clip's name and duration are preserved.
#[must_use]
pub fn retarget_clip(clip: &AnimClip, map: &BoneMap) -> AnimClip {
    let mut tracks: Vec<Track> = Vec::with_capacity(clip.tracks.len());
    for track in &clip.tracks {
        match split_track_name(&track.name) {
            Some((bone, prop)) if is_known_property(prop) => {
                if map.is_root(bone) && prop == TRANSLATION_PROPERTY {
                    continue;
                }
                if let Some(target) = map.target_for(bone) {
                    let mut renamed = track.clone();
                    renamed.name = format!("{target}.{prop}");
                    tracks.push(renamed);
                } else {
                    tracks.push(track.clone());
                }
            }
            _ => tracks.push(track.clone()),
        }
    }
    AnimClip {
        name: clip.name.clone(),
        duration: clip.duration,
        tracks,
    }
}
