//! Character setup boundary: load model + animation library, retarget, and
//! install the clip set.
//!
//! Every asset error stops here. A missing model or clip library leaves the
//! session degraded but running; an interactive loop never aborts because a
//! file failed to load.

use std::sync::Arc;

use plaza_assets::{AssetCache, AssetDecoder, BoneMap, LoadedAsset, retarget_clip};

use crate::animator::LocomotionAnimator;

/// Outcome of a character attach. `model` is handed to the scene-graph
/// collaborator; `clips_installed` reports whether the animator got a set.
#[derive(Debug, Default)]
pub struct CharacterSetup {
    pub model: Option<Arc<LoadedAsset>>,
    pub clips_installed: bool,
}

/// Load the character model and its animation library through the cache,
/// retarget every foreign clip onto the target skeleton, and install the
/// result into the animator.
pub fn attach_character(
    cache: &mut AssetCache,
    decoder: &mut dyn AssetDecoder,
    animator: &mut LocomotionAnimator,
    model_id: &str,
    anim_id: &str,
) -> CharacterSetup {
    let mut setup = CharacterSetup::default();

    match cache.load_by_id(model_id, decoder) {
        Ok(model) => setup.model = Some(model),
        Err(e) => log::warn!("character model `{model_id}` unavailable: {e}"),
    }

    match cache.load_by_id(anim_id, decoder) {
        Ok(library) => {
            let map = BoneMap::humanoid();
            let clips = library
                .clips
                .iter()
                .map(|clip| retarget_clip(clip, &map))
                .collect();
            animator.set_clips(clips);
            setup.clips_installed = animator.has_clips();
        }
        Err(e) => log::warn!("animation library `{anim_id}` unavailable: {e}"),
    }

    setup
}
