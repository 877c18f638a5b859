//! Dialog actions
//!
//! An action pairs a button description with the computation that produces the
//! dialog's result once the user picks it. Computations receive the current text
//! of the dialog's fields, in declaration order.

use futures::future::{self, BoxFuture, FutureExt};
use modal_core::{ModalError, ModalResult};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Future produced by a chosen action; `None` when it completes without a value
pub type ActionFuture<V> = BoxFuture<'static, ModalResult<Option<V>>>;

type ActionHandler<V> = Arc<dyn Fn(&[String]) -> ActionFuture<V> + Send + Sync>;

/// Visual style of a dialog action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DialogActionStyle {
    /// Regular button
    #[default]
    Default,
    /// Cancel button (rendered apart by most hosts)
    Cancel,
    /// Destructive button
    Destructive,
}

/// Button of a dialog and the computation it triggers
pub struct DialogAction<V> {
    title: String,
    style: DialogActionStyle,
    handler: ActionHandler<V>,
    is_preferred: bool,
}

impl<V> Clone for DialogAction<V> {
    fn clone(&self) -> Self {
        Self {
            title: self.title.clone(),
            style: self.style,
            handler: self.handler.clone(),
            is_preferred: self.is_preferred,
        }
    }
}

impl<V> fmt::Debug for DialogAction<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogAction")
            .field("title", &self.title)
            .field("style", &self.style)
            .field("is_preferred", &self.is_preferred)
            .finish_non_exhaustive()
    }
}

impl<V: Send + 'static> DialogAction<V> {
    /// Action completing without a value
    pub fn new(title: impl Into<String>, style: DialogActionStyle) -> Self {
        Self {
            title: title.into(),
            style,
            handler: Arc::new(complete_empty::<V>),
            is_preferred: false,
        }
    }

    /// Action with the default style
    pub fn action(title: impl Into<String>) -> Self {
        Self::new(title, DialogActionStyle::Default)
    }

    /// Action with the cancel style
    pub fn cancel(title: impl Into<String>) -> Self {
        Self::new(title, DialogActionStyle::Cancel)
    }

    /// Action with the destructive style
    pub fn destructive(title: impl Into<String>) -> Self {
        Self::new(title, DialogActionStyle::Destructive)
    }

    /// Produce `value` when chosen
    pub fn map_to(self, value: V) -> Self
    where
        V: Clone + Sync,
    {
        self.with_handler(move |_| future::ready(Ok(Some(value.clone()))).boxed())
    }

    /// Produce a value computed from the field texts when chosen
    pub fn map<F>(self, transform: F) -> Self
    where
        F: Fn(&[String]) -> V + Send + Sync + 'static,
    {
        self.with_handler(move |fields| future::ready(Ok(Some(transform(fields)))).boxed())
    }

    /// Continue with another asynchronous operation when chosen, such as a
    /// follow-up modal
    pub fn flat_map<F, Fut>(self, operation: F) -> Self
    where
        F: Fn(&[String]) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ModalResult<V>> + Send + 'static,
    {
        self.with_handler(move |fields| operation(fields).map(|result| result.map(Some)).boxed())
    }

    /// Fail with `error` when chosen
    pub fn throw(self, error: ModalError) -> Self {
        self.with_handler(move |_| future::ready(Err(error.clone())).boxed())
    }

    /// Mark as the dialog's preferred action
    pub fn preferred(mut self) -> Self {
        self.is_preferred = true;
        self
    }

    /// Same action with another style
    pub fn with_style(mut self, style: DialogActionStyle) -> Self {
        self.style = style;
        self
    }

    fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&[String]) -> ActionFuture<V> + Send + Sync + 'static,
    {
        self.handler = Arc::new(handler);
        self
    }

    /// Start the action's computation with the current field texts
    pub fn perform(&self, field_values: &[String]) -> ActionFuture<V> {
        (self.handler)(field_values)
    }
}

fn complete_empty<V: Send + 'static>(_field_values: &[String]) -> ActionFuture<V> {
    future::ready(Ok(None)).boxed()
}

impl<V> DialogAction<V> {
    /// Button title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Button style
    pub fn style(&self) -> DialogActionStyle {
        self.style
    }

    /// Whether this is the preferred action
    pub fn is_preferred(&self) -> bool {
        self.is_preferred
    }
}
