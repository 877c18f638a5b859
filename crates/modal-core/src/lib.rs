//! # Modal Core
//!
//! Presents a modal surface and turns its one-shot delegate outcome into a
//! single asynchronous result.
//!
//! - [`ModalCoordinator`] owns the presented surface and guarantees exactly one
//!   terminal event, with at-most-once dismissal
//! - [`Presenter`] resolves, at use time, where a surface is shown
//! - [`require`] gates an operation behind an authorization status
//!
//! Host adapters (alerts, composers, pickers, web sessions) live in
//! `modal-dialogs` and `modal-surfaces`; this crate holds no platform code.
//!
//! All presentation, dismissal and listener callbacks are expected on the
//! thread owning the visual hierarchy. Nothing here spawns tasks or blocks:
//! `present` returns as soon as the anchor was asked to show the surface.

pub mod authorization;
pub mod config;
pub mod coordinator;
pub mod describe;
pub mod errors;
pub mod presenter;
pub mod surface;

pub use authorization::{
    require, require_authorized, resolve_authorization, AuthorizationSource, AuthorizationStatus,
};
pub use config::ModalConfig;
pub use coordinator::{CoordinatorState, ModalCoordinator, ModalListener, Presentation};
pub use describe::ModalDescribe;
pub use errors::{ModalError, ModalResult, PlatformError};
pub use presenter::{HostView, HostWindow, PresentationAnchor, Presenter, WindowSource};
pub use surface::{ModalSurface, PresentationId, SurfaceKind, SurfaceState};
