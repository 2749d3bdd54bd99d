use client_core::MoveState;
use client_core::character::attach_character;
use client_core::session::{PlayerSession, SessionConfig};
use plaza_assets::types::{AnimClip, LoadedAsset, SceneNode, Track};
use plaza_assets::{AssetCache, AssetDecoder, register_manifest};

const MANIFEST: &str = r#"{
    "schema": "plaza.assets.v1",
    "assets": [
        {"id": "avatar", "source": "stub://avatar"},
        {"id": "avatar-anims", "source": "stub://clips"}
    ]
}"#;

/// Fabricates a tiny skeleton and a clip library authored against the
/// foreign bone names, counting decode calls.
struct StubDecoder {
    calls: usize,
}

impl AssetDecoder for StubDecoder {
    fn decode(&mut self, source: &str) -> anyhow::Result<LoadedAsset> {
        self.calls += 1;
        let root = SceneNode::group("scene").with_children(vec![
            SceneNode::mesh("body"),
            SceneNode::bone("mixamorigHips")
                .with_children(vec![SceneNode::bone("mixamorigSpine")]),
        ]);
        let clips = if source.ends_with("clips") {
            ["idle", "walk", "run", "crouch", "jump", "jump_running"]
                .into_iter()
                .map(|name| {
                    AnimClip::from_tracks(
                        name,
                        vec![Track::quat(
                            "mixamorigHips.quaternion",
                            vec![0.0, 1.0],
                            vec![glam::Quat::IDENTITY; 2],
                        )],
                    )
                })
                .collect()
        } else {
            Vec::new()
        };
        Ok(LoadedAsset { root, clips })
    }
}

struct FailingDecoder;

impl AssetDecoder for FailingDecoder {
    fn decode(&mut self, source: &str) -> anyhow::Result<LoadedAsset> {
        anyhow::bail!("unreachable host: {source}")
    }
}

/// End-to-end loop over the whole stack:
/// - Register assets from a manifest and attach the character through the cache
/// - Walk, sprint, and jump via scripted key codes
/// - Assert the state machine, kinematics, and clip selection line up each leg
#[test]
fn e2e_manifest_walk_sprint_jump_cycle() {
    let mut cache = AssetCache::new();
    let n = register_manifest(&mut cache, MANIFEST).expect("manifest parses");
    assert_eq!(n, 2);

    let mut session = PlayerSession::new(SessionConfig::default());
    let mut decoder = StubDecoder { calls: 0 };
    let setup = attach_character(
        &mut cache,
        &mut decoder,
        session.animator_mut(),
        "avatar",
        "avatar-anims",
    );
    assert!(setup.model.is_some());
    assert!(setup.clips_installed);
    assert_eq!(decoder.calls, 2, "one decode per asset id");

    let dt = 1.0 / 60.0;

    // Leg 1: walk forward
    session.input.press("KeyW");
    for _ in 0..120 {
        session.advance(dt);
    }
    assert_eq!(session.controller().state(), MoveState::Normal);
    assert!(
        session.controller().body().pos.z < -3.0,
        "walked forward, z = {}",
        session.controller().body().pos.z
    );
    assert_eq!(session.active_clips().len(), 1, "walk fade has settled");
    assert_eq!(session.active_clips()[0].name, "walk");

    // Leg 2: sprint
    session.input.press("ShiftLeft");
    for _ in 0..120 {
        session.advance(dt);
    }
    assert_eq!(session.controller().state(), MoveState::Run);
    assert!(session.controller().body().current_speed > 5.0);
    assert_eq!(session.active_clips().len(), 1);
    assert_eq!(session.active_clips()[0].name, "run");

    // Leg 3: running jump
    session.input.press("Space");
    let out = session.advance(dt);
    assert_eq!(out.state, MoveState::Jump);
    assert!(!out.body.grounded);
    assert_eq!(
        session.active_clips().last().map(|c| c.name.as_str()),
        Some("jump_running"),
        "takeoff from a sprint selects the running-jump clip"
    );
    session.input.release("Space");
    let mut frames = 0;
    while !session.controller().body().grounded {
        session.advance(dt);
        frames += 1;
        assert!(frames < 300, "character must land");
    }
    session.advance(dt);
    assert_eq!(
        session.controller().state(),
        MoveState::Run,
        "landing re-resolves from the held keys"
    );

    // Leg 4: let go of everything and settle
    session.input.clear();
    for _ in 0..200 {
        session.advance(dt);
    }
    assert_eq!(session.controller().state(), MoveState::Idle);
    assert!(session.controller().body().current_speed < 0.05);
    assert_eq!(session.active_clips().len(), 1);
    assert_eq!(session.active_clips()[0].name, "idle");

    // A second attach is served from the cache, not the decoder.
    let again = attach_character(
        &mut cache,
        &mut decoder,
        session.animator_mut(),
        "avatar",
        "avatar-anims",
    );
    assert!(again.clips_installed);
    assert_eq!(decoder.calls, 2, "cache hit on re-attach");
}

/// Asset failures stop at the attach boundary: the session keeps running with
/// no model and no clips instead of aborting.
#[test]
fn e2e_degraded_session_survives_decode_failure() {
    let mut cache = AssetCache::new();
    register_manifest(&mut cache, MANIFEST).expect("manifest parses");

    let mut session = PlayerSession::new(SessionConfig::default());
    let setup = attach_character(
        &mut cache,
        &mut FailingDecoder,
        session.animator_mut(),
        "avatar",
        "avatar-anims",
    );
    assert!(setup.model.is_none());
    assert!(!setup.clips_installed);

    session.input.press("KeyW");
    for _ in 0..60 {
        let out = session.advance(1.0 / 60.0);
        assert!(out.clip_events.is_empty());
    }
    assert!(session.controller().body().pos.z < -1.0, "still moves");
    assert!(session.active_clips().is_empty(), "nothing to mix");
}
