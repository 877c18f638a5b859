//! Text message composer

use modal_core::{
    ModalConfig, ModalCoordinator, ModalDescribe, ModalError, ModalListener, ModalResult,
    ModalSurface, Presenter,
};

/// How the user left the message composer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageComposeResult {
    /// Closed without sending
    Cancelled,
    /// Queued for sending
    Sent,
    /// Could not be queued
    Failed,
}

impl ModalDescribe for MessageComposeResult {
    fn modal_description(&self) -> String {
        match self {
            Self::Cancelled => ".cancelled",
            Self::Sent => ".sent",
            Self::Failed => ".failed",
        }
        .to_string()
    }
}

/// Initial content of the message composer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageDraft {
    /// Phone numbers or addresses
    pub recipients: Vec<String>,
    /// Subject, on hosts that support message subjects
    pub subject: Option<String>,
    /// Message text
    pub body: Option<String>,
}

impl MessageDraft {
    /// Empty draft
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a recipient
    pub fn recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipients.push(recipient.into());
        self
    }

    /// Set the message text
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Completion callback of a message composer
#[derive(Debug, Clone)]
pub struct MessageComposeDelegate {
    listener: ModalListener<MessageComposeResult>,
}

impl MessageComposeDelegate {
    /// The composer finished with `result`
    pub fn did_finish(&self, result: MessageComposeResult) -> bool {
        self.listener.resolve(result)
    }
}

/// Host able to show a text message composer
pub trait MessageComposerHost: Send + Sync {
    /// Platform composer surface
    type Surface: ModalSurface;

    /// Whether this device can send text messages
    fn can_send_text(&self) -> bool;

    /// Build the composer for `draft`
    fn make_message_composer(
        &self,
        draft: MessageDraft,
        delegate: MessageComposeDelegate,
    ) -> Self::Surface;
}

/// Present a message composer and await how the user left it.
///
/// Fails with [`ModalError::Unsupported`] when the device cannot send texts.
pub async fn message_composer<H>(
    host: &H,
    presenter: &Presenter,
    config: &ModalConfig,
    draft: MessageDraft,
) -> ModalResult<MessageComposeResult>
where
    H: MessageComposerHost + ?Sized,
{
    if !host.can_send_text() {
        return Err(ModalError::unsupported("message composer"));
    }
    ModalCoordinator::present(presenter, config, |listener| {
        host.make_message_composer(draft, MessageComposeDelegate { listener })
    })?
    .await
}
