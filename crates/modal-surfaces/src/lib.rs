//! # Modal Surfaces
//!
//! Feature adapters over [`modal_core::ModalCoordinator`]: mail and message
//! composers, media and photo pickers, and web authentication sessions.
//!
//! Each feature pairs a host trait, implemented by the platform layer, with an
//! `async fn` entry point. Availability checks (mail account, text messaging,
//! media library authorization) run when the returned future is first polled,
//! so building the future has no side effect.

pub mod composers;
pub mod pickers;
pub mod web_auth;

pub use composers::*;
pub use pickers::*;
pub use web_auth::{
    web_authentication_session, WebAuthenticationDelegate, WebAuthenticationHost,
    WebAuthenticationRequest,
};

pub use url::Url;
