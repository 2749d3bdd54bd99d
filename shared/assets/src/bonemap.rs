//! Generated source→target bone-name table.
//!
//! The table is generated from canonical joint names crossed with a
//! left/right multiplier instead of being hand-authored per bone;
//! hand-authored tables of this size routinely carry wrong-side copy/paste
//! slips, and generation rules that class of mistake out entirely.

use std::collections::{HashMap, HashSet};

/// Prefix used by the foreign skeleton's bone names.
const SOURCE_PREFIX: &str = "mixamorig";

/// Axial chain: source joint token → target bone.
const AXIAL: &[(&str, &str)] = &[
    ("Hips", "hips"),
    ("Spine", "spine"),
    ("Spine1", "chest"),
    ("Spine2", "upper_chest"),
    ("Neck", "neck"),
    ("Head", "head"),
];

/// Per-side limb chain: source joint token → target bone stem.
const LIMBS: &[(&str, &str)] = &[
    ("Shoulder", "shoulder"),
    ("Arm", "upper_arm"),
    ("ForeArm", "lower_arm"),
    ("Hand", "hand"),
    ("UpLeg", "upper_leg"),
    ("Leg", "lower_leg"),
    ("Foot", "foot"),
    ("ToeBase", "toes"),
];

/// Finger chains; the target rig carries three segments per finger.
const FINGERS: &[(&str, &str)] = &[
    ("HandThumb", "thumb"),
    ("HandIndex", "index"),
    ("HandMiddle", "middle"),
    ("HandRing", "ring"),
    ("HandPinky", "pinky"),
];

const FINGER_SEGMENTS: u32 = 3;

/// Source-name → target-name remap plus the set of root bones whose
/// translation tracks must be stripped. Many-to-one entries are allowed.
#[derive(Debug, Clone)]
pub struct BoneMap {
    mapping: HashMap<String, String>,
    root_bones: HashSet<String>,
}

impl BoneMap {
    /// The standard humanoid table for `mixamorig*`-named source skeletons.
    #[must_use]
    pub fn humanoid() -> Self {
        let mut mapping = HashMap::new();
        for (src, dst) in AXIAL {
            mapping.insert(format!("{SOURCE_PREFIX}{src}"), (*dst).to_string());
        }
        for (side_src, side_dst) in [("Left", "l"), ("Right", "r")] {
            for (src, dst) in LIMBS {
                mapping.insert(
                    format!("{SOURCE_PREFIX}{side_src}{src}"),
                    format!("{dst}_{side_dst}"),
                );
            }
            for (src, dst) in FINGERS {
                for seg in 1..=FINGER_SEGMENTS {
                    mapping.insert(
                        format!("{SOURCE_PREFIX}{side_src}{src}{seg}"),
                        format!("{dst}_{seg:02}_{side_dst}"),
                    );
                }
                // Packs that author a fourth distal segment collapse onto the
                // last segment the target rig has.
                mapping.insert(
                    format!("{SOURCE_PREFIX}{side_src}{src}4"),
                    format!("{dst}_{FINGER_SEGMENTS:02}_{side_dst}"),
                );
            }
            // Alternate ring-finger spelling seen in some packs; same targets
            // as the canonical HandRing chain.
            for seg in 1..=FINGER_SEGMENTS {
                mapping.insert(
                    format!("{SOURCE_PREFIX}{side_src}RingFinger{seg}"),
                    format!("ring_{seg:02}_{side_dst}"),
                );
            }
        }
        let root_bones = HashSet::from([format!("{SOURCE_PREFIX}Hips")]);
        Self {
            mapping,
            root_bones,
        }
    }

    /// Target bone name for a source bone, if the table maps it.
    #[must_use]
    pub fn target_for(&self, bone: &str) -> Option<&str> {
        self.mapping.get(bone).map(String::as_str)
    }

    /// Whether `bone` is a root bone whose translation carries root motion.
    #[must_use]
    pub fn is_root(&self, bone: &str) -> bool {
        self.root_bones.contains(bone)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    /// Root bone names, for callers that strip or inspect root tracks.
    pub fn root_bones(&self) -> impl Iterator<Item = &str> {
        self.root_bones.iter().map(String::as_str)
    }
}
