// crates/input_core/src/input/overlay.rs
//! Optional on-screen touch overlay. The asset system and scene graph are external;
//! this only decides whether to request the overlay and attaches it once loaded.
//! Every failure is logged and otherwise ignored.

use crossbeam_channel::{Receiver, TryRecvError};
use tracing::{error, info};

use super::error::AssetError;
use super::map::InputMap;

/// Completion handle handed to an [`AssetSource`].
pub use crossbeam_channel::Sender;

/// Platforms where the overlay is always shown.
pub const TOUCH_FIRST_PLATFORM: bool = cfg!(any(target_os = "android", target_os = "ios"));

pub type AssetResult<A> = Result<A, AssetError>;

/// External asset loader. `load` may finish on any thread; the result goes to `done`.
pub trait AssetSource<A> {
    fn load(&mut self, asset_id: &str, done: Sender<AssetResult<A>>);
}

/// External scene graph the overlay is attached to.
pub trait OverlayHost<A> {
    fn has_ui_root(&self) -> bool;
    fn attach_overlay(&mut self, overlay: A);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    Disabled,
    Pending,
    Attached,
    Failed,
}

pub struct OverlayLoader<A> {
    pending: Option<Receiver<AssetResult<A>>>,
    asset_id: String,
    state: OverlayState,
}

impl<A> OverlayLoader<A> {
    pub fn disabled() -> Self {
        Self {
            pending: None,
            asset_id: String::new(),
            state: OverlayState::Disabled,
        }
    }

    /// Requests the overlay if the config (or the platform) asks for it.
    pub fn start(map: &InputMap, touch_first: bool, source: &mut dyn AssetSource<A>) -> Self {
        if !(map.always_show_touch() || touch_first) {
            return Self::disabled();
        }
        let Some(asset_id) = map.touch_overlay_asset() else {
            return Self::disabled();
        };

        let (done, pending) = crossbeam_channel::bounded(1);
        source.load(asset_id, done);
        info!(asset = asset_id, "requested touch overlay");

        Self {
            pending: Some(pending),
            asset_id: asset_id.to_string(),
            state: OverlayState::Pending,
        }
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    /// Drains the load result on the main thread. Cheap when nothing is pending.
    pub fn poll(&mut self, host: &mut dyn OverlayHost<A>) -> OverlayState {
        let Some(pending) = &self.pending else {
            return self.state;
        };

        let result = match pending.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return self.state,
            Err(TryRecvError::Disconnected) => Err(AssetError::Dropped),
        };
        self.pending = None;

        self.state = match result {
            Err(e) => {
                error!(asset = %self.asset_id, "touch overlay failed to load: {e}");
                OverlayState::Failed
            }
            Ok(_) if !host.has_ui_root() => {
                error!(
                    asset = %self.asset_id,
                    "touch overlay loaded but the scene has no UI root to attach it to"
                );
                OverlayState::Failed
            }
            Ok(overlay) => {
                host.attach_overlay(overlay);
                info!(asset = %self.asset_id, "touch overlay attached");
                OverlayState::Attached
            }
        };
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use input_shared::MappingConfig;
    use std::thread;

    struct ThreadedSource {
        result: Option<AssetResult<&'static str>>,
        requested: Vec<String>,
    }

    impl AssetSource<&'static str> for ThreadedSource {
        fn load(&mut self, asset_id: &str, done: Sender<AssetResult<&'static str>>) {
            self.requested.push(asset_id.to_string());
            if let Some(result) = self.result.take() {
                thread::spawn(move || {
                    let _ = done.send(result);
                })
                .join()
                .unwrap();
            }
        }
    }

    #[derive(Default)]
    struct Scene {
        root: bool,
        attached: Vec<&'static str>,
    }

    impl OverlayHost<&'static str> for Scene {
        fn has_ui_root(&self) -> bool {
            self.root
        }
        fn attach_overlay(&mut self, overlay: &'static str) {
            self.attached.push(overlay);
        }
    }

    fn map(always_show: bool, uuid: &str) -> InputMap {
        let mut config = MappingConfig::default();
        config.always_show_touch = always_show;
        config.touch_prefab_uuid = uuid.to_string();
        InputMap::from_config(&config).unwrap()
    }

    fn source(result: Option<AssetResult<&'static str>>) -> ThreadedSource {
        ThreadedSource {
            result,
            requested: Vec::new(),
        }
    }

    #[test]
    fn not_requested_on_desktop_without_flag() {
        let mut src = source(Some(Ok("overlay")));
        let loader = OverlayLoader::<&'static str>::start(&map(false, "abc"), false, &mut src);

        assert_eq!(loader.state(), OverlayState::Disabled);
        assert!(src.requested.is_empty());
    }

    #[test]
    fn not_requested_without_asset_id() {
        let mut src = source(Some(Ok("overlay")));
        let loader = OverlayLoader::<&'static str>::start(&map(true, ""), true, &mut src);

        assert_eq!(loader.state(), OverlayState::Disabled);
    }

    #[test]
    fn attaches_under_ui_root() {
        let mut src = source(Some(Ok("overlay")));
        let mut loader = OverlayLoader::<&'static str>::start(&map(true, "abc"), false, &mut src);
        let mut scene = Scene {
            root: true,
            ..Default::default()
        };

        assert_eq!(src.requested, vec!["abc".to_string()]);
        assert_eq!(loader.poll(&mut scene), OverlayState::Attached);
        assert_eq!(scene.attached, vec!["overlay"]);

        // Nothing left to drain.
        assert_eq!(loader.poll(&mut scene), OverlayState::Attached);
        assert_eq!(scene.attached.len(), 1);
    }

    #[test]
    fn missing_ui_root_is_non_fatal() {
        let mut src = source(Some(Ok("overlay")));
        let mut loader = OverlayLoader::<&'static str>::start(&map(false, "abc"), true, &mut src);
        let mut scene = Scene::default();

        assert_eq!(loader.poll(&mut scene), OverlayState::Failed);
        assert!(scene.attached.is_empty());
    }

    #[test]
    fn load_failure_is_non_fatal() {
        let mut src = source(Some(Err(AssetError::NotFound("abc".into()))));
        let mut loader = OverlayLoader::<&'static str>::start(&map(true, "abc"), false, &mut src);
        let mut scene = Scene {
            root: true,
            ..Default::default()
        };

        assert_eq!(loader.poll(&mut scene), OverlayState::Failed);
        assert!(scene.attached.is_empty());
    }

    #[test]
    fn dropped_request_fails() {
        let mut src = source(None);
        let mut loader = OverlayLoader::<&'static str>::start(&map(true, "abc"), false, &mut src);
        let mut scene = Scene::default();

        // `done` was dropped without an answer.
        assert_eq!(loader.poll(&mut scene), OverlayState::Failed);
    }
}
