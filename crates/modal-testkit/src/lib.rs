//! Modal Testing Infrastructure
//!
//! Mock hosts standing in for the platform layer: an anchor recording what it
//! presents, windows for presenter resolution, probe surfaces counting their
//! dismissals, a dialog renderer the test can "tap", and one mock per feature
//! host.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! modal-testkit = { path = "../modal-testkit" }
//! ```
//!
//! ```rust,ignore
//! use modal_testkit::*;
//!
//! let anchor = MockAnchor::new();
//! let renderer = MockDialogRenderer::new();
//! let presenter = Presenter::anchor(&anchor);
//! let mut pending = std::pin::pin!(alert(&renderer, &presenter, &config, dialog));
//! assert!(futures::poll!(&mut pending).is_pending());
//! renderer.tap_title("Delete");
//! ```

pub mod anchor;
pub mod dialogs;
pub mod hosts;
pub mod logging;
pub mod probe;
pub mod windows;

pub use anchor::{MockAnchor, PresentCall};
pub use dialogs::MockDialogRenderer;
pub use hosts::*;
pub use logging::init_test_tracing;
pub use probe::{MockSurface, ProbeSurface, SurfaceProbe};
pub use windows::{MockWindow, MockWindowSource};

use modal_core::{ModalConfig, Presenter};
use std::sync::Arc;

/// Error reported by mock hosts, for exact-error forwarding assertions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MockPlatformError {
    /// The host could not deliver the composed content
    #[error("delivery failed: {0}")]
    Delivery(String),

    /// The user closed the web session
    #[error("session cancelled by the user")]
    SessionCancelledByUser,
}

/// Anchor plus a presenter resolving to it
///
/// The presenter holds the anchor weakly; keep the returned `Arc` alive for
/// the duration of the test.
pub fn anchored() -> (Arc<MockAnchor>, Presenter) {
    let anchor = MockAnchor::new();
    let presenter = Presenter::anchor(&anchor);
    (anchor, presenter)
}

/// Config without animations, as used by most tests
pub fn test_config() -> ModalConfig {
    ModalConfig::immediate()
}
