//! Mock windows for presenter resolution

use crate::anchor::MockAnchor;
use modal_core::{HostWindow, PresentationAnchor, WindowSource};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Window with an optional root anchor
#[derive(Debug)]
pub struct MockWindow {
    key: AtomicBool,
    root: Mutex<Option<Arc<MockAnchor>>>,
}

impl MockWindow {
    /// Key window with a fresh root anchor
    pub fn key() -> Arc<Self> {
        Self::build(true, Some(MockAnchor::new()))
    }

    /// Background window with a fresh root anchor
    pub fn background() -> Arc<Self> {
        Self::build(false, Some(MockAnchor::new()))
    }

    /// Key window without content
    pub fn empty() -> Arc<Self> {
        Self::build(true, None)
    }

    fn build(key: bool, root: Option<Arc<MockAnchor>>) -> Arc<Self> {
        Arc::new(Self {
            key: AtomicBool::new(key),
            root: Mutex::new(root),
        })
    }

    /// Root anchor, for assertions on what was presented
    pub fn anchor(&self) -> Option<Arc<MockAnchor>> {
        self.root.lock().clone()
    }

    /// Change whether this window receives key input
    pub fn set_key(&self, key: bool) {
        self.key.store(key, Ordering::SeqCst);
    }

    /// Remove the window's content
    pub fn clear_root(&self) {
        self.root.lock().take();
    }
}

impl HostWindow for MockWindow {
    fn is_key(&self) -> bool {
        self.key.load(Ordering::SeqCst)
    }

    fn root_anchor(&self) -> Option<Arc<dyn PresentationAnchor>> {
        self.root
            .lock()
            .clone()
            .map(|anchor| anchor as Arc<dyn PresentationAnchor>)
    }
}

/// Connected windows of a mock application
#[derive(Debug, Default)]
pub struct MockWindowSource {
    windows: Mutex<Vec<Arc<MockWindow>>>,
}

impl MockWindowSource {
    /// Application with `windows` connected
    pub fn with_windows(windows: Vec<Arc<MockWindow>>) -> Arc<Self> {
        Arc::new(Self {
            windows: Mutex::new(windows),
        })
    }

    /// Connect another window
    pub fn connect(&self, window: Arc<MockWindow>) {
        self.windows.lock().push(window);
    }
}

impl WindowSource for MockWindowSource {
    fn windows(&self) -> Vec<Arc<dyn HostWindow>> {
        self.windows
            .lock()
            .iter()
            .map(|window| window.clone() as Arc<dyn HostWindow>)
            .collect()
    }
}
