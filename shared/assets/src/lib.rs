//! plaza-assets: CPU-side asset model, animation retargeting, and the
//! exactly-once load cache.
//!
//! Decoding is a collaborator behind the `AssetDecoder` trait; this crate is
//! renderer-independent and does no I/O of its own.

pub mod bonemap;
pub mod cache;
pub mod manifest;
pub mod retarget;
pub mod types;

pub use bonemap::BoneMap;
pub use cache::{AssetCache, AssetDecoder, AssetDescriptor, AssetError};
pub use manifest::{AssetManifest, ManifestError, register_manifest};
pub use retarget::retarget_clip;
pub use types::{AnimClip, LoadedAsset, NodeKind, SceneNode, Track, TrackValues};
