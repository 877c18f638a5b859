//! Mail composer
//!
//! Presents the host's mail compose sheet for a [`MailDraft`] and resolves to
//! how the user left it. A delivery error reported by the host fails the
//! presentation with that exact error.

use modal_core::{
    ModalConfig, ModalCoordinator, ModalDescribe, ModalError, ModalListener, ModalResult,
    ModalSurface, PlatformError, Presenter,
};

/// How the user left the mail composer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MailComposeResult {
    /// Closed without saving
    Cancelled,
    /// Saved as a draft
    Saved,
    /// Queued for sending
    Sent,
    /// Could not be saved or queued
    Failed,
}

impl ModalDescribe for MailComposeResult {
    fn modal_description(&self) -> String {
        match self {
            Self::Cancelled => ".cancelled",
            Self::Saved => ".saved",
            Self::Sent => ".sent",
            Self::Failed => ".failed",
        }
        .to_string()
    }
}

/// File attached to a draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailAttachment {
    /// Raw content
    pub data: Vec<u8>,
    /// MIME type, e.g. `image/png`
    pub mime_type: String,
    /// File name shown to the recipient
    pub file_name: String,
}

/// Initial content of the mail composer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MailDraft {
    /// Primary recipients
    pub to: Vec<String>,
    /// Carbon-copy recipients
    pub cc: Vec<String>,
    /// Blind carbon-copy recipients
    pub bcc: Vec<String>,
    /// Subject line
    pub subject: Option<String>,
    /// Message body
    pub body: Option<String>,
    /// Whether `body` is HTML
    pub is_html: bool,
    /// Attached files
    pub attachments: Vec<MailAttachment>,
    /// Sending address to preselect, when the account has several
    pub preferred_sending_address: Option<String>,
}

impl MailDraft {
    /// Empty draft
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a primary recipient
    pub fn to(mut self, address: impl Into<String>) -> Self {
        self.to.push(address.into());
        self
    }

    /// Set the subject
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set a plain-text body
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self.is_html = false;
        self
    }

    /// Set an HTML body
    pub fn html_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self.is_html = true;
        self
    }

    /// Attach a file
    pub fn attachment(mut self, attachment: MailAttachment) -> Self {
        self.attachments.push(attachment);
        self
    }
}

/// Completion callback of a mail composer
#[derive(Debug, Clone)]
pub struct MailComposeDelegate {
    listener: ModalListener<MailComposeResult>,
}

impl MailComposeDelegate {
    /// The composer finished. An `error` takes precedence over `result`.
    pub fn did_finish(&self, result: MailComposeResult, error: Option<PlatformError>) -> bool {
        match error {
            Some(error) => {
                tracing::debug!(?result, %error, "Mail composer finished with an error");
                self.listener.fail(ModalError::Platform(error))
            }
            None => self.listener.resolve(result),
        }
    }
}

/// Host able to show a mail composer
pub trait MailComposerHost: Send + Sync {
    /// Platform composer surface
    type Surface: ModalSurface;

    /// Whether a mail account is configured on this device
    fn can_send_mail(&self) -> bool;

    /// Build the composer for `draft`, reporting completion to `delegate`
    fn make_mail_composer(&self, draft: MailDraft, delegate: MailComposeDelegate) -> Self::Surface;
}

/// Present a mail composer and await how the user left it.
///
/// Fails with [`ModalError::Unsupported`] without presenting anything when no
/// mail account is available.
pub async fn mail_composer<H>(
    host: &H,
    presenter: &Presenter,
    config: &ModalConfig,
    draft: MailDraft,
) -> ModalResult<MailComposeResult>
where
    H: MailComposerHost + ?Sized,
{
    if !host.can_send_mail() {
        return Err(ModalError::unsupported("mail composer"));
    }
    ModalCoordinator::present(presenter, config, |listener| {
        host.make_mail_composer(draft, MailComposeDelegate { listener })
    })?
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_descriptions() {
        assert_eq!(MailComposeResult::Cancelled.modal_description(), ".cancelled");
        assert_eq!(MailComposeResult::Saved.modal_description(), ".saved");
        assert_eq!(MailComposeResult::Sent.modal_description(), ".sent");
        assert_eq!(MailComposeResult::Failed.modal_description(), ".failed");
    }

    #[test]
    fn test_draft_builder() {
        let draft = MailDraft::new()
            .to("support@example.com")
            .subject("Hello")
            .html_body("<p>Hi</p>");
        assert_eq!(draft.to, vec!["support@example.com".to_string()]);
        assert!(draft.is_html);

        let plain = draft.body("Hi");
        assert!(!plain.is_html);
    }
}
