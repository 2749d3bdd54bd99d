//! Headless demo: a scripted input stream driving a `PlayerSession`.
//!
//! There is no window here: the decode collaborator is a small procedural
//! stub and the "renderer" is the log. Useful for eyeballing the state
//! machine and the camera/animator plumbing end to end.

use plaza::assets::types::{AnimClip, LoadedAsset, SceneNode, Track};
use plaza::assets::{register_manifest, AssetCache, AssetDecoder};
use plaza::client::character::attach_character;
use plaza::client::session::{PlayerSession, SessionConfig};

const MANIFEST: &str = r#"{
    "schema": "plaza.assets.v1",
    "assets": [
        {"id": "avatar", "source": "demo://avatar", "excluded_parts": ["hat"]},
        {"id": "avatar-anims", "source": "demo://clips"}
    ]
}"#;

/// Stand-in for the out-of-scope decode collaborator: fabricates a small
/// skeleton and a clip library authored against the foreign bone names.
struct DemoDecoder;

impl AssetDecoder for DemoDecoder {
    fn decode(&mut self, source: &str) -> anyhow::Result<LoadedAsset> {
        let root = SceneNode::group("scene").with_children(vec![
            SceneNode::mesh("body"),
            SceneNode::mesh("hat"),
            SceneNode::bone("mixamorigHips").with_children(vec![
                SceneNode::bone("mixamorigSpine"),
                SceneNode::bone("mixamorigLeftUpLeg"),
                SceneNode::bone("mixamorigRightUpLeg"),
            ]),
        ]);
        let clips = if source.ends_with("clips") {
            ["idle", "walk", "run", "crouch", "jump", "jump_running"]
                .into_iter()
                .map(demo_clip)
                .collect()
        } else {
            Vec::new()
        };
        Ok(LoadedAsset { root, clips })
    }
}

fn demo_clip(name: &str) -> AnimClip {
    let times = vec![0.0, 0.5, 1.0];
    AnimClip::from_tracks(
        name,
        vec![
            Track::vec3("mixamorigHips.position", times.clone(), vec![glam::Vec3::ZERO; 3]),
            Track::quat(
                "mixamorigHips.quaternion",
                times.clone(),
                vec![glam::Quat::IDENTITY; 3],
            ),
            Track::quat(
                "mixamorigLeftUpLeg.quaternion",
                times,
                vec![glam::Quat::IDENTITY; 3],
            ),
        ],
    )
}

fn main() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();

    let mut cache = AssetCache::new();
    match register_manifest(&mut cache, MANIFEST) {
        Ok(n) => log::info!("registered {n} assets"),
        Err(e) => {
            log::error!("manifest rejected: {e}");
            return;
        }
    }

    let mut session = PlayerSession::new(SessionConfig::default());
    let mut decoder = DemoDecoder;
    let setup = attach_character(
        &mut cache,
        &mut decoder,
        session.animator_mut(),
        "avatar",
        "avatar-anims",
    );
    log::info!(
        "character attached: model={} clips={}",
        setup.model.is_some(),
        setup.clips_installed
    );
    session.spawn_at(glam::Vec3::ZERO);

    let dt = 1.0 / 60.0;
    let mut lock_events = Vec::new();
    for frame in 0u32..600 {
        // scripted input: walk, sprint, drag the camera, jump, stop
        match frame {
            0 => session.input.press("KeyW"),
            120 => session.input.press("ShiftLeft"),
            240 => {
                session.handle_rotate_button(true, &mut lock_events);
                session.input.set_pointer_locked(true);
            }
            360 => {
                session.handle_rotate_button(false, &mut lock_events);
                session.input.set_pointer_locked(false);
                session.input.press("Space");
            }
            380 => session.input.release("Space"),
            480 => session.input.clear(),
            _ => {}
        }
        if (240..360).contains(&frame) {
            session.input.add_mouse_delta(6.0, 1.0);
        }

        let out = session.advance(dt);
        for ev in &out.clip_events {
            log::info!("frame {frame}: clip event {ev:?}");
        }
        if frame % 60 == 0 {
            log::info!(
                "frame {frame}: state={:?} pos=({:.2},{:.2},{:.2}) speed={:.2} cam_yaw={:.2}",
                out.state,
                out.body.pos.x,
                out.body.pos.y,
                out.body.pos.z,
                out.body.current_speed,
                out.camera.yaw
            );
        }
    }
    log::info!("pointer lock requests seen: {}", lock_events.len());
}
