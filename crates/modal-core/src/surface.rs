//! Modal surface abstraction
//!
//! A modal surface is any transient, exclusive-focus UI element: an alert, an
//! action sheet, a picker, a composer or a web-authentication view. Host
//! adapters implement [`ModalSurface`] over their platform objects.

use std::fmt;
use uuid::Uuid;

/// Kind of modal surface, used for logging and host dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// Centered alert dialog
    Alert,
    /// Action sheet anchored to a source element
    ActionSheet,
    /// Mail composer
    MailComposer,
    /// Text message composer
    MessageComposer,
    /// Media library picker
    MediaPicker,
    /// Photo library picker
    PhotoPicker,
    /// Web authentication session
    WebAuthentication,
    /// Host-defined surface
    Custom(&'static str),
}

impl SurfaceKind {
    /// Short label for logging/display
    pub fn label(&self) -> &'static str {
        match self {
            Self::Alert => "alert",
            Self::ActionSheet => "action-sheet",
            Self::MailComposer => "mail-composer",
            Self::MessageComposer => "message-composer",
            Self::MediaPicker => "media-picker",
            Self::PhotoPicker => "photo-picker",
            Self::WebAuthentication => "web-authentication",
            Self::Custom(label) => *label,
        }
    }
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Visibility of a surface as reported by its host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceState {
    /// Built but not yet shown
    Detached,
    /// On screen
    Presented,
    /// Dismissal in progress (possibly started by the platform itself)
    Dismissing,
    /// Removed from screen
    Dismissed,
}

impl SurfaceState {
    /// Whether the surface is leaving or already left the screen
    pub fn is_going_away(&self) -> bool {
        matches!(self, Self::Dismissing | Self::Dismissed)
    }
}

/// A transient modal UI element owned by one coordinator
pub trait ModalSurface: Send + Sync + 'static {
    /// Kind of surface
    fn kind(&self) -> SurfaceKind;

    /// Current visibility as seen by the host
    fn state(&self) -> SurfaceState;

    /// Ask the host to remove the surface. Fire-and-forget: completion is
    /// observed through [`ModalSurface::state`].
    fn dismiss(&self, animated: bool);
}

/// Identifier correlating log lines of a single presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PresentationId(pub Uuid);

impl PresentationId {
    /// Create a fresh identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PresentationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PresentationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "presentation-{}", self.0.simple())
    }
}
