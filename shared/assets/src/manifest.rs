//! JSON asset manifest: batch registration of load descriptors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cache::{AssetCache, AssetDescriptor};

pub const MANIFEST_SCHEMA: &str = "plaza.assets.v1";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ManifestEntry {
    pub id: String,
    pub source: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub excluded_parts: Vec<String>,
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssetManifest {
    pub schema: String,
    pub assets: Vec<ManifestEntry>,
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("bad schema: {0}")]
    Schema(String),
    #[error("parse error")]
    Serde(#[from] serde_json::Error),
}

/// Parse a manifest document and upsert every entry into the cache.
/// Returns how many descriptors were registered.
pub fn register_manifest(cache: &mut AssetCache, s: &str) -> Result<usize, ManifestError> {
    let manifest: AssetManifest = serde_json::from_str(s)?;
    if manifest.schema != MANIFEST_SCHEMA {
        return Err(ManifestError::Schema(manifest.schema));
    }
    let count = manifest.assets.len();
    for entry in manifest.assets {
        cache.register(
            entry.id,
            AssetDescriptor {
                source: entry.source,
                enabled: entry.enabled,
                excluded_parts: entry.excluded_parts,
            },
        );
    }
    Ok(count)
}
