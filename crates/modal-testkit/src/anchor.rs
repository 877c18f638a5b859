//! Mock presentation anchor

use modal_core::{ModalSurface, PresentationAnchor, SurfaceKind};
use parking_lot::Mutex;
use std::sync::Arc;

/// One `present` call seen by the anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentCall {
    /// Kind of the presented surface
    pub kind: SurfaceKind,
    /// Whether the presentation was animated
    pub animated: bool,
}

/// Anchor recording every surface presented on it
#[derive(Debug, Default)]
pub struct MockAnchor {
    calls: Mutex<Vec<PresentCall>>,
}

impl MockAnchor {
    /// New shared anchor
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// All presentations, oldest first
    pub fn calls(&self) -> Vec<PresentCall> {
        self.calls.lock().clone()
    }

    /// Kinds of all presented surfaces, oldest first
    pub fn presented_kinds(&self) -> Vec<SurfaceKind> {
        self.calls.lock().iter().map(|call| call.kind).collect()
    }

    /// Number of presentations
    pub fn presented(&self) -> usize {
        self.calls.lock().len()
    }
}

impl PresentationAnchor for MockAnchor {
    fn present(&self, surface: &dyn ModalSurface, animated: bool) {
        tracing::trace!(kind = ?surface.kind(), animated, "Mock anchor presenting");
        self.calls.lock().push(PresentCall {
            kind: surface.kind(),
            animated,
        });
    }
}
