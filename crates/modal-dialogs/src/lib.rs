//! # Modal Dialogs
//!
//! Alerts and action sheets presented through the modal coordinator.
//!
//! A [`Dialog`] is validated at construction (at least one action, at most one
//! preferred), rendered by a host [`DialogRenderer`], and resolves to the
//! result of the action the user picked.
//!
//! ```rust,ignore
//! let choice = alert(
//!     &renderer,
//!     &presenter,
//!     &ModalConfig::default(),
//!     Dialog::builder()
//!         .title("Delete Item")
//!         .action(DialogAction::cancel("Cancel").map_to(Choice::Cancel))
//!         .action(DialogAction::destructive("Delete").map_to(Choice::Delete)),
//! )
//! .await?;
//! ```

pub mod action;
pub mod dialog;
pub mod present;
pub mod render;
pub mod style;
pub mod text_field;

pub use action::{ActionFuture, DialogAction, DialogActionStyle};
pub use dialog::{Dialog, DialogBuilder, DialogError};
pub use present::{action_sheet, alert, present_dialog};
pub use render::{ActionDescriptor, DialogDelegate, DialogDescriptor, DialogRenderer};
pub use style::{DialogSource, DialogStyle, Rect};
pub use text_field::{
    Autocapitalization, DialogTextField, KeyboardType, TextContentType, TextInputTraits,
};
