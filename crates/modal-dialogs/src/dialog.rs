//! Dialog descriptions
//!
//! A [`Dialog`] is an immutable description built by the caller before
//! presentation: title, message, text fields and an ordered, non-empty list of
//! actions of which at most one is preferred.

use crate::action::{DialogAction, DialogActionStyle};
use crate::render::{ActionDescriptor, DialogDescriptor};
use crate::style::DialogStyle;
use crate::text_field::DialogTextField;
use modal_core::ModalError;

/// Construction error of a dialog
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DialogError {
    /// No action was declared
    #[error("a dialog must declare at least one action")]
    NoActions,

    /// More than one action is marked preferred
    #[error("actions {first} and {second} are both marked preferred")]
    MultiplePreferred {
        /// Index of the first preferred action
        first: usize,
        /// Index of the second preferred action
        second: usize,
    },
}

impl From<DialogError> for ModalError {
    fn from(err: DialogError) -> Self {
        ModalError::invalid_dialog(err.to_string())
    }
}

/// Validated dialog description
#[derive(Debug, Clone)]
pub struct Dialog<V> {
    title: Option<String>,
    message: Option<String>,
    text_fields: Vec<DialogTextField>,
    actions: Vec<DialogAction<V>>,
}

impl<V> Dialog<V> {
    /// Validate and build a dialog
    pub fn new(
        title: Option<String>,
        message: Option<String>,
        text_fields: Vec<DialogTextField>,
        actions: Vec<DialogAction<V>>,
    ) -> Result<Self, DialogError> {
        if actions.is_empty() {
            return Err(DialogError::NoActions);
        }
        let mut preferred = actions
            .iter()
            .enumerate()
            .filter(|(_, action)| action.is_preferred())
            .map(|(index, _)| index);
        if let (Some(first), Some(second)) = (preferred.next(), preferred.next()) {
            return Err(DialogError::MultiplePreferred { first, second });
        }

        Ok(Self {
            title,
            message,
            text_fields,
            actions,
        })
    }

    /// Start building a dialog
    pub fn builder() -> DialogBuilder<V> {
        DialogBuilder::default()
    }

    /// Title
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Message
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Text fields, in display order
    pub fn text_fields(&self) -> &[DialogTextField] {
        &self.text_fields
    }

    /// Actions, in display order
    pub fn actions(&self) -> &[DialogAction<V>] {
        &self.actions
    }

    /// Index of the preferred action, if one is marked
    pub fn preferred_action(&self) -> Option<usize> {
        self.actions.iter().position(DialogAction::is_preferred)
    }

    /// Index of the first cancel-style action, if any
    pub fn cancel_action(&self) -> Option<usize> {
        self.actions
            .iter()
            .position(|action| action.style() == DialogActionStyle::Cancel)
    }

    /// Render description handed to a [`DialogRenderer`](crate::DialogRenderer)
    pub fn descriptor(&self, style: DialogStyle) -> DialogDescriptor {
        DialogDescriptor {
            title: self.title.clone(),
            message: self.message.clone(),
            text_fields: self.text_fields.clone(),
            actions: self
                .actions
                .iter()
                .map(|action| ActionDescriptor {
                    title: action.title().to_string(),
                    style: action.style(),
                    is_preferred: action.is_preferred(),
                })
                .collect(),
            preferred_action: self.preferred_action(),
            style,
        }
    }

    pub(crate) fn into_actions(self) -> Vec<DialogAction<V>> {
        self.actions
    }
}

/// Builder for [`Dialog`]
#[derive(Debug)]
pub struct DialogBuilder<V> {
    title: Option<String>,
    message: Option<String>,
    text_fields: Vec<DialogTextField>,
    actions: Vec<DialogAction<V>>,
}

impl<V> Default for DialogBuilder<V> {
    fn default() -> Self {
        Self {
            title: None,
            message: None,
            text_fields: Vec::new(),
            actions: Vec::new(),
        }
    }
}

impl<V> DialogBuilder<V> {
    /// Set the title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Append a text field
    pub fn text_field(mut self, field: DialogTextField) -> Self {
        self.text_fields.push(field);
        self
    }

    /// Append an action
    pub fn action(mut self, action: DialogAction<V>) -> Self {
        self.actions.push(action);
        self
    }

    /// Append several actions
    pub fn actions(mut self, actions: impl IntoIterator<Item = DialogAction<V>>) -> Self {
        self.actions.extend(actions);
        self
    }

    /// Validate and build the dialog
    pub fn build(self) -> Result<Dialog<V>, DialogError> {
        Dialog::new(self.title, self.message, self.text_fields, self.actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::DialogSource;

    #[derive(Debug, Clone, PartialEq)]
    enum Choice {
        Cancel,
        Delete,
    }

    #[test]
    fn test_dialog_without_actions_is_rejected() {
        let result = Dialog::<Choice>::builder().title("Empty").build();
        assert_eq!(result.unwrap_err(), DialogError::NoActions);
    }

    #[test]
    fn test_two_preferred_actions_are_rejected() {
        let result = Dialog::builder()
            .action(DialogAction::cancel("Cancel").map_to(Choice::Cancel).preferred())
            .action(DialogAction::destructive("Delete").map_to(Choice::Delete))
            .action(DialogAction::action("Also").map_to(Choice::Delete).preferred())
            .build();
        assert_eq!(
            result.unwrap_err(),
            DialogError::MultiplePreferred { first: 0, second: 2 }
        );
    }

    #[test]
    fn test_no_implicit_preferred_action() {
        let dialog = Dialog::builder()
            .action(DialogAction::cancel("Cancel").map_to(Choice::Cancel))
            .action(DialogAction::destructive("Delete").map_to(Choice::Delete))
            .build()
            .unwrap();
        assert_eq!(dialog.preferred_action(), None);
        assert_eq!(dialog.cancel_action(), Some(0));
    }

    #[test]
    fn test_descriptor_mirrors_dialog() {
        let dialog = Dialog::builder()
            .title("Sign in")
            .message("Please sign in")
            .text_field(DialogTextField::email())
            .action(DialogAction::<Choice>::cancel("Cancel"))
            .action(DialogAction::action("Sign In").preferred())
            .build()
            .unwrap();

        let descriptor = dialog.descriptor(DialogStyle::ActionSheet {
            source: DialogSource::bar_button_item("start"),
        });
        assert_eq!(descriptor.title.as_deref(), Some("Sign in"));
        assert_eq!(descriptor.text_fields.len(), 1);
        assert_eq!(descriptor.preferred_action, Some(1));
        assert_eq!(descriptor.action_titles(), vec!["Cancel", "Sign In"]);
        assert_eq!(descriptor.kind(), modal_core::SurfaceKind::ActionSheet);
    }

    #[test]
    fn test_dialog_error_converts_to_modal_error() {
        let err: ModalError = DialogError::NoActions.into();
        assert!(matches!(err, ModalError::InvalidDialog { .. }));
    }
}
