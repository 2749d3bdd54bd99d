//! CPU-side asset types shared by the cache and the retargeter.
//!
//! These are renderer-independent: the scene-graph collaborator consumes
//! `SceneNode` hierarchies and the animation mixer consumes `AnimClip`
//! tracks. Nothing here touches the GPU or the filesystem.

use glam::{Quat, Vec3};

/// Closed set of scene-node kinds.
///
/// Loaders classify nodes once at decode time; downstream code asks the
/// capability questions (`is_mesh`, `is_bone`) instead of probing structure
/// at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Group,
    Mesh {
        casts_shadow: bool,
        receives_shadow: bool,
    },
    Bone,
}

/// One node of a decoded scene hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub name: String,
    pub kind: NodeKind,
    pub visible: bool,
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            visible: true,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn group(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Group)
    }

    #[must_use]
    pub fn mesh(name: impl Into<String>) -> Self {
        Self::new(
            name,
            NodeKind::Mesh {
                casts_shadow: false,
                receives_shadow: false,
            },
        )
    }

    #[must_use]
    pub fn bone(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Bone)
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<SceneNode>) -> Self {
        self.children = children;
        self
    }

    #[must_use]
    pub fn is_mesh(&self) -> bool {
        matches!(self.kind, NodeKind::Mesh { .. })
    }

    #[must_use]
    pub fn is_bone(&self) -> bool {
        matches!(self.kind, NodeKind::Bone)
    }

    /// Depth-first search for a named descendant (or self).
    #[must_use]
    pub fn find_named(&self, name: &str) -> Option<&SceneNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_named(name))
    }

    /// Visit self and every descendant, depth-first.
    pub fn visit_mut(&mut self, f: &mut impl FnMut(&mut SceneNode)) {
        f(self);
        for c in &mut self.children {
            c.visit_mut(f);
        }
    }

    /// Count of nodes in this subtree, self included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SceneNode::node_count).sum::<usize>()
    }
}

/// Time-sampled values of a single track.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackValues {
    Vec3(Vec<Vec3>),
    Quat(Vec<Quat>),
}

impl TrackValues {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            TrackValues::Vec3(v) => v.len(),
            TrackValues::Quat(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A single bone+property curve, named `"<bone>.<property>"`.
///
/// Recognized property suffixes are `position`, `quaternion` (alias
/// `rotation`), and `scale`; anything else is carried opaquely.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub name: String,
    pub times: Vec<f32>,
    pub values: TrackValues,
}

impl Track {
    #[must_use]
    pub fn vec3(name: impl Into<String>, times: Vec<f32>, values: Vec<Vec3>) -> Self {
        Self {
            name: name.into(),
            times,
            values: TrackValues::Vec3(values),
        }
    }

    #[must_use]
    pub fn quat(name: impl Into<String>, times: Vec<f32>, values: Vec<Quat>) -> Self {
        Self {
            name: name.into(),
            times,
            values: TrackValues::Quat(values),
        }
    }

    /// Sample a vector track at `t` (clamped to the keyframe range).
    /// Returns `None` for empty or rotation tracks.
    #[must_use]
    pub fn sample_vec3(&self, t: f32) -> Option<Vec3> {
        let TrackValues::Vec3(values) = &self.values else {
            return None;
        };
        if values.is_empty() {
            return None;
        }
        let (i, f) = segment(&self.times, t)?;
        Some(values[i].lerp(values[(i + 1).min(values.len() - 1)], f))
    }

    /// Sample a rotation track at `t` (clamped to the keyframe range).
    #[must_use]
    pub fn sample_quat(&self, t: f32) -> Option<Quat> {
        let TrackValues::Quat(values) = &self.values else {
            return None;
        };
        if values.is_empty() {
            return None;
        }
        let (i, f) = segment(&self.times, t)?;
        Some(values[i].slerp(values[(i + 1).min(values.len() - 1)], f))
    }

    /// Last keyframe time, or 0 for an empty track.
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }
}

/// Find the keyframe segment containing `t` and the blend factor inside it.
fn segment(times: &[f32], t: f32) -> Option<(usize, f32)> {
    let (&first, &last) = (times.first()?, times.last()?);
    if t <= first || times.len() == 1 {
        return Some((0, 0.0));
    }
    if t >= last {
        return Some((times.len() - 1, 0.0));
    }
    let mut i = 0;
    while i + 1 < times.len() && times[i + 1] < t {
        i += 1;
    }
    let span = times[i + 1] - times[i];
    let f = if span > 0.0 { (t - times[i]) / span } else { 0.0 };
    Some((i, f))
}

/// A named, time-bounded set of per-bone tracks.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimClip {
    pub name: String,
    pub duration: f32,
    pub tracks: Vec<Track>,
}

impl AnimClip {
    /// Build a clip whose duration is the latest keyframe across tracks.
    #[must_use]
    pub fn from_tracks(name: impl Into<String>, tracks: Vec<Track>) -> Self {
        let duration = tracks.iter().map(Track::end_time).fold(0.0, f32::max);
        Self {
            name: name.into(),
            duration,
            tracks,
        }
    }
}

/// Immutable decode result: a scene hierarchy plus its authored clips.
#[derive(Debug, Clone)]
pub struct LoadedAsset {
    pub root: SceneNode,
    pub clips: Vec<AnimClip>,
}
