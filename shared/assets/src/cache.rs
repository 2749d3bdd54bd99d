//! Asset registry and exactly-once load cache.
//!
//! The cache is an owned service object: sessions construct one and pass it
//! by reference, so independent sessions (and tests) never share state.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::types::{LoadedAsset, NodeKind, SceneNode};

/// Decode collaborator: turns a source locator into a scene graph + clips.
///
/// Implementations own all file/network I/O and format parsing; the cache
/// only sees the decoded result.
pub trait AssetDecoder {
    fn decode(&mut self, source: &str) -> anyhow::Result<LoadedAsset>;
}

/// Load descriptor registered under a logical asset id.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetDescriptor {
    pub source: String,
    pub enabled: bool,
    pub excluded_parts: Vec<String>,
}

impl AssetDescriptor {
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            enabled: true,
            excluded_parts: Vec::new(),
        }
    }

    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    #[must_use]
    pub fn excluding(mut self, parts: Vec<String>) -> Self {
        self.excluded_parts = parts;
        self
    }
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset `{0}` is not registered")]
    NotRegistered(String),
    #[error("asset `{0}` is disabled")]
    Disabled(String),
    #[error("decode failed for asset `{id}`")]
    Decode {
        id: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Identity-keyed registry plus memoized loader.
///
/// A given id is decoded at most once; every caller gets the same shared
/// result. Under the cooperative single-threaded frame loop this memoization
/// is also the request coalescing: a second load of an id never reaches the
/// decoder.
#[derive(Default)]
pub struct AssetCache {
    registry: HashMap<String, AssetDescriptor>,
    loaded: HashMap<String, Arc<LoadedAsset>>,
}

impl AssetCache {
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: HashMap::new(),
            loaded: HashMap::new(),
        }
    }

    /// Upsert a descriptor. Registering the same id twice is fine.
    pub fn register(&mut self, id: impl Into<String>, descriptor: AssetDescriptor) {
        self.registry.insert(id.into(), descriptor);
    }

    #[must_use]
    pub fn descriptor(&self, id: &str) -> Option<&AssetDescriptor> {
        self.registry.get(id)
    }

    #[must_use]
    pub fn is_loaded(&self, id: &str) -> bool {
        self.loaded.contains_key(id)
    }

    /// Enable or disable an id. Returns false if the id is unknown.
    pub fn set_enabled(&mut self, id: &str, enabled: bool) -> bool {
        match self.registry.get_mut(id) {
            Some(desc) => {
                desc.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Replace the excluded-part list for an id and evict any cached result,
    /// so the next load re-applies the exclusions. Returns false if the id
    /// is unknown.
    pub fn set_excluded_parts(&mut self, id: &str, parts: Vec<String>) -> bool {
        match self.registry.get_mut(id) {
            Some(desc) => {
                desc.excluded_parts = parts;
                if self.loaded.remove(id).is_some() {
                    log::debug!("evicted cached asset `{id}` after exclusion change");
                }
                true
            }
            None => false,
        }
    }

    /// Load an asset by id, decoding at most once per id.
    ///
    /// Part exclusion hides matched nodes instead of deleting them, so the
    /// skeleton stays addressable by the animation mixer. Shadow flags on the
    /// remaining meshes are normalized as a load-time step.
    pub fn load_by_id(
        &mut self,
        id: &str,
        decoder: &mut dyn AssetDecoder,
    ) -> Result<Arc<LoadedAsset>, AssetError> {
        let desc = self
            .registry
            .get(id)
            .ok_or_else(|| AssetError::NotRegistered(id.to_string()))?;
        if !desc.enabled {
            return Err(AssetError::Disabled(id.to_string()));
        }
        if let Some(asset) = self.loaded.get(id) {
            return Ok(asset.clone());
        }
        let mut asset = decoder.decode(&desc.source).map_err(|e| AssetError::Decode {
            id: id.to_string(),
            source: e,
        })?;
        apply_exclusions(&mut asset.root, &desc.excluded_parts);
        normalize_shadow_flags(&mut asset.root);
        log::info!(
            "loaded asset `{id}`: {} nodes, {} clips",
            asset.root.node_count(),
            asset.clips.len()
        );
        let asset = Arc::new(asset);
        self.loaded.insert(id.to_string(), asset.clone());
        Ok(asset)
    }
}

/// Hide excluded parts. Nodes are never removed: bones underneath them must
/// stay reachable for skinning.
fn apply_exclusions(root: &mut SceneNode, excluded: &[String]) {
    if excluded.is_empty() {
        return;
    }
    let patterns: Vec<String> = excluded.iter().map(|p| p.to_ascii_lowercase()).collect();
    root.visit_mut(&mut |node| {
        let name = node.name.to_ascii_lowercase();
        if patterns.iter().any(|p| name == *p || name.contains(p)) {
            node.visible = false;
        }
    });
}

/// Every mesh still visible after exclusion both casts and receives shadows.
fn normalize_shadow_flags(root: &mut SceneNode) {
    root.visit_mut(&mut |node| {
        if !node.visible {
            return;
        }
        if let NodeKind::Mesh {
            casts_shadow,
            receives_shadow,
        } = &mut node.kind
        {
            *casts_shadow = true;
            *receives_shadow = true;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AnimClip;
    use anyhow::bail;

    struct CountingDecoder {
        calls: usize,
        fail: bool,
    }

    impl CountingDecoder {
        fn new() -> Self {
            Self {
                calls: 0,
                fail: false,
            }
        }
    }

    impl AssetDecoder for CountingDecoder {
        fn decode(&mut self, _source: &str) -> anyhow::Result<LoadedAsset> {
            self.calls += 1;
            if self.fail {
                bail!("synthetic decode failure");
            }
            let root = SceneNode::group("scene").with_children(vec![
                SceneNode::mesh("Body"),
                SceneNode::mesh("Hair_Long"),
                SceneNode::bone("hips"),
            ]);
            Ok(LoadedAsset {
                root,
                clips: vec![AnimClip::from_tracks("idle", Vec::new())],
            })
        }
    }

    #[test]
    fn double_load_decodes_once_and_shares_result() {
        let mut cache = AssetCache::new();
        let mut dec = CountingDecoder::new();
        cache.register("avatar", AssetDescriptor::new("models/avatar.glb"));
        let a = cache.load_by_id("avatar", &mut dec).expect("first load");
        let b = cache.load_by_id("avatar", &mut dec).expect("second load");
        assert_eq!(dec.calls, 1, "second load must hit the cache");
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn unregistered_and_disabled_ids_fail_without_decoding() {
        let mut cache = AssetCache::new();
        let mut dec = CountingDecoder::new();
        assert!(matches!(
            cache.load_by_id("ghost", &mut dec),
            Err(AssetError::NotRegistered(_))
        ));
        cache.register("avatar", AssetDescriptor::new("models/avatar.glb").disabled());
        assert!(matches!(
            cache.load_by_id("avatar", &mut dec),
            Err(AssetError::Disabled(_))
        ));
        assert_eq!(dec.calls, 0, "no decode may happen for failed lookups");
    }

    #[test]
    fn exclusion_hides_nodes_without_deleting_them() {
        let mut cache = AssetCache::new();
        let mut dec = CountingDecoder::new();
        cache.register(
            "avatar",
            AssetDescriptor::new("models/avatar.glb").excluding(vec!["hair".into()]),
        );
        let asset = cache.load_by_id("avatar", &mut dec).expect("load");
        let hair = asset.root.find_named("Hair_Long").expect("node kept");
        assert!(!hair.visible, "excluded part must be hidden");
        assert!(asset.root.find_named("hips").is_some());
    }

    #[test]
    fn changing_exclusions_evicts_and_reapplies() {
        let mut cache = AssetCache::new();
        let mut dec = CountingDecoder::new();
        cache.register("avatar", AssetDescriptor::new("models/avatar.glb"));
        let first = cache.load_by_id("avatar", &mut dec).expect("load");
        assert!(first.root.find_named("Hair_Long").expect("hair").visible);

        assert!(cache.set_excluded_parts("avatar", vec!["Hair_Long".into()]));
        assert!(!cache.is_loaded("avatar"), "eviction deletes the entry");
        let second = cache.load_by_id("avatar", &mut dec).expect("reload");
        assert_eq!(dec.calls, 2);
        assert!(!second.root.find_named("Hair_Long").expect("hair").visible);
    }

    #[test]
    fn shadow_flags_normalized_on_visible_meshes_only() {
        let mut cache = AssetCache::new();
        let mut dec = CountingDecoder::new();
        cache.register(
            "avatar",
            AssetDescriptor::new("models/avatar.glb").excluding(vec!["hair".into()]),
        );
        let asset = cache.load_by_id("avatar", &mut dec).expect("load");
        let body = asset.root.find_named("Body").expect("body");
        assert_eq!(
            body.kind,
            NodeKind::Mesh {
                casts_shadow: true,
                receives_shadow: true
            }
        );
        let hair = asset.root.find_named("Hair_Long").expect("hair");
        assert_eq!(
            hair.kind,
            NodeKind::Mesh {
                casts_shadow: false,
                receives_shadow: false
            }
        );
    }

    #[test]
    fn decode_failure_is_typed_and_not_cached() {
        let mut cache = AssetCache::new();
        let mut dec = CountingDecoder::new();
        dec.fail = true;
        cache.register("avatar", AssetDescriptor::new("models/avatar.glb"));
        assert!(matches!(
            cache.load_by_id("avatar", &mut dec),
            Err(AssetError::Decode { .. })
        ));
        dec.fail = false;
        assert!(cache.load_by_id("avatar", &mut dec).is_ok());
        assert_eq!(dec.calls, 2, "a failed decode must not poison the cache");
    }
}
