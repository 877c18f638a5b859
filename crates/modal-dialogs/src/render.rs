//! Host rendering of dialogs
//!
//! A [`DialogRenderer`] turns a [`DialogDescriptor`] into a platform surface
//! and reports the user's choice through the [`DialogDelegate`] it was given.

use crate::action::{ActionFuture, DialogAction, DialogActionStyle};
use crate::style::DialogStyle;
use crate::text_field::DialogTextField;
use modal_core::{ModalError, ModalListener, ModalSurface, SurfaceKind};
use std::fmt;
use std::sync::Arc;

/// Render description of a single action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDescriptor {
    /// Button title
    pub title: String,
    /// Button style
    pub style: DialogActionStyle,
    /// Whether the button is the preferred one
    pub is_preferred: bool,
}

/// Everything a host needs to draw a dialog
#[derive(Debug, Clone, PartialEq)]
pub struct DialogDescriptor {
    /// Title
    pub title: Option<String>,
    /// Message
    pub message: Option<String>,
    /// Text fields, in display order
    pub text_fields: Vec<DialogTextField>,
    /// Actions, in display order
    pub actions: Vec<ActionDescriptor>,
    /// Index of the preferred action; never chosen implicitly
    pub preferred_action: Option<usize>,
    /// Alert or action sheet
    pub style: DialogStyle,
}

impl DialogDescriptor {
    /// Surface kind to render
    pub fn kind(&self) -> SurfaceKind {
        self.style.kind()
    }

    /// Action titles, in display order
    pub fn action_titles(&self) -> Vec<&str> {
        self.actions.iter().map(|a| a.title.as_str()).collect()
    }

    /// Index of the action titled `title`
    pub fn action_index(&self, title: &str) -> Option<usize> {
        self.actions.iter().position(|a| a.title == title)
    }

    /// Index of the first cancel-style action
    pub fn cancel_action(&self) -> Option<usize> {
        self.actions
            .iter()
            .position(|a| a.style == DialogActionStyle::Cancel)
    }
}

/// Outcome listener of a rendered dialog.
///
/// Hosts call [`did_select`](Self::did_select) from their button callback
/// with the chosen index and the current text of every field.
pub struct DialogDelegate<V> {
    actions: Arc<[DialogAction<V>]>,
    listener: ModalListener<ActionFuture<V>>,
}

impl<V> Clone for DialogDelegate<V> {
    fn clone(&self) -> Self {
        Self {
            actions: self.actions.clone(),
            listener: self.listener.clone(),
        }
    }
}

impl<V> fmt::Debug for DialogDelegate<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogDelegate")
            .field("actions", &self.actions.len())
            .field("listener", &self.listener)
            .finish()
    }
}

impl<V: Send + 'static> DialogDelegate<V> {
    /// Bind actions to the listener of the coordinator presenting them
    pub fn new(actions: Arc<[DialogAction<V>]>, listener: ModalListener<ActionFuture<V>>) -> Self {
        Self { actions, listener }
    }

    /// The user chose the action at `index`.
    ///
    /// Returns `false` when the dialog already produced its outcome; the
    /// action's computation is not started in that case.
    pub fn did_select(&self, index: usize, field_values: Vec<String>) -> bool {
        if !self.listener.is_open() {
            tracing::debug!(index, "Ignoring dialog selection after outcome");
            return false;
        }
        match self.actions.get(index) {
            Some(action) => {
                tracing::debug!(
                    index,
                    title = action.title(),
                    fields = field_values.len(),
                    "Dialog action selected"
                );
                self.listener.resolve(action.perform(&field_values))
            }
            None => self.listener.fail(ModalError::invalid_dialog(format!(
                "no action at index {index} (dialog has {})",
                self.actions.len()
            ))),
        }
    }

    /// Number of actions
    pub fn action_count(&self) -> usize {
        self.actions.len()
    }
}

/// Host adapter drawing dialogs
pub trait DialogRenderer: Send + Sync {
    /// Platform surface produced for a dialog
    type Surface: ModalSurface;

    /// Build (but do not show) the surface for `descriptor`, reporting the
    /// user's choice to `delegate`
    fn make_dialog<V: Send + 'static>(
        &self,
        descriptor: DialogDescriptor,
        delegate: DialogDelegate<V>,
    ) -> Self::Surface;
}
