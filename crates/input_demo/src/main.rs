// crates/input_demo/src/main.rs

mod character;

use std::env;
use std::fs;
use std::path::PathBuf;
use std::thread;

use anyhow::{Context, Result};
use glam::Vec2;
use input_core::input::overlay::{AssetResult, Sender};
use input_core::input::{AssetError, AssetSource, InputDefaults, OverlayHost, OverlayLoader};
use input_core::input_codes::{gamepad_touch, LEFT_THUMBSTICK_AXIS_X, LEFT_THUMBSTICK_AXIS_Y};
use input_core::{App, InputRouter, PlatformRunner, Simulation};
use tracing::info;

use character::Character;

/// Loads overlay descriptions from `assets/<id>.json` on a worker thread.
struct FileAssets {
    root: PathBuf,
}

impl AssetSource<String> for FileAssets {
    fn load(&mut self, asset_id: &str, done: Sender<AssetResult<String>>) {
        let path = self.root.join(format!("{asset_id}.json"));
        let id = asset_id.to_string();
        thread::spawn(move || {
            let result = fs::read_to_string(&path).map_err(|e| AssetError::Load {
                id,
                reason: e.to_string(),
            });
            let _ = done.send(result);
        });
    }
}

/// Stand-in scene graph: the demo has no UI tree, it only logs the attach.
struct LoggingScene;

impl OverlayHost<String> for LoggingScene {
    fn has_ui_root(&self) -> bool {
        true
    }

    fn attach_overlay(&mut self, overlay: String) {
        info!(bytes = overlay.len(), "touch overlay in scene");
    }
}

struct Demo {
    character: Character,
    overlay: OverlayLoader<String>,
    scene: LoggingScene,
}

impl Simulation for Demo {
    fn begin_frame(&mut self, _app: &mut App) {
        self.overlay.poll(&mut self.scene);
    }

    fn fixed_update(&mut self, _router: &mut InputRouter, dt: f32) {
        self.character.step(dt);
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Optional mapping config path; the built-in layout otherwise.
    let config = match env::args().nth(1) {
        Some(path) => InputDefaults::load_file(&path)
            .with_context(|| format!("loading mapping config from {path}"))?,
        None => InputDefaults::mapping_config(),
    };

    let mut app = App::new(&config).context("building input map")?;
    app.add_touch_stick(Vec2::new(160.0, 560.0), 80.0, LEFT_THUMBSTICK_AXIS_X, LEFT_THUMBSTICK_AXIS_Y);
    // Jump, Sprint, Fire in the default layout.
    for (slot, (x, y)) in [(1120.0, 600.0), (1220.0, 520.0), (1220.0, 640.0)]
        .into_iter()
        .enumerate()
    {
        app.add_touch_button(Vec2::new(x, y), 45.0, gamepad_touch(slot as u32));
    }

    let character = Character::new();
    character.bind(app.router_mut());
    info!(bound = app.router().bound_count(), "character bound");

    let mut assets = FileAssets {
        root: PathBuf::from("assets"),
    };
    let overlay: OverlayLoader<String> = app.request_touch_overlay(&mut assets);

    let demo = Demo {
        character,
        overlay,
        scene: LoggingScene,
    };
    PlatformRunner::new(app).start(demo)?;
    Ok(())
}
