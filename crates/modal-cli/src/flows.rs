//! Demo flows
//!
//! Each flow presents one or more modal surfaces on the [`TerminalHost`] and
//! is recorded as a transcript of stream events:
//!
//! ```text
//! Single<Choice>
//! .subscribe
//! .next(.delete)
//! .completed
//! .dispose
//! ```

use crate::host::{Response, Script, TerminalHost};
use clap::ValueEnum;
use futures::future::{BoxFuture, FutureExt};
use modal_core::{ModalConfig, ModalDescribe, ModalError, ModalResult, Presenter};
use modal_dialogs::{
    action_sheet, alert, Dialog, DialogAction, DialogBuilder, DialogSource, DialogTextField,
};
use modal_surfaces::{
    mail_composer, media_picker, message_composer, photo_picker, web_authentication_session,
    MailComposeResult, MailDraft, MediaPickerOptions, MessageComposeResult, MessageDraft,
    PhotoPickerConfiguration, WebAuthenticationRequest,
};
use std::sync::Arc;
use url::Url;

const CONTACT_ADDRESS: &str = "modal@example.com";
const CONTACT_NUMBER: &str = "0639981337";
const OAUTH_AUTHORIZE_URL: &str = "https://www.oauth.com/playground/auth-dialog.html";
const OAUTH_REGISTRATION_URL: &str = "https://www.oauth.com/playground/client-registration.html";
const CALLBACK_SCHEME: &str = "modal-demo";

/// Flows of the demo catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Flow {
    /// Delete confirmation alert
    Alert,
    /// Delete confirmation action sheet
    ActionSheet,
    /// Media library picker behind its authorization
    MediaPicker,
    /// Mail composer
    MailComposer,
    /// Text message composer
    MessageComposer,
    /// Action sheet chaining into a composer
    ComposerChooser,
    /// Alert with credential fields
    SignIn,
    /// Client ID alert chaining into a web authentication session
    WebSession,
    /// Photo picker limited to three assets
    PhotoPicker,
}

impl Flow {
    /// Human readable title
    pub fn title(&self) -> &'static str {
        match self {
            Self::Alert => "Alert",
            Self::ActionSheet => "Action Sheet",
            Self::MediaPicker => "Media Picker",
            Self::MailComposer => "Mail Composer",
            Self::MessageComposer => "Message Composer",
            Self::ComposerChooser => "Composer Chooser",
            Self::SignIn => "Sign In alert",
            Self::WebSession => "Web Session",
            Self::PhotoPicker => "Photo Picker",
        }
    }

    /// Stream type shown at the top of the transcript
    pub fn result_type(&self) -> &'static str {
        match self {
            Self::Alert | Self::ActionSheet => "Single<Choice?>",
            Self::MediaPicker => "Single<MediaItemCollection>",
            Self::MailComposer => "Single<MailComposeResult>",
            Self::MessageComposer => "Single<MessageComposeResult>",
            Self::ComposerChooser => "Single<ContactResult?>",
            Self::SignIn => "Single<Credentials?>",
            Self::WebSession => "Single<Url>",
            Self::PhotoPicker => "Single<[PhotoPickerResult]>",
        }
    }

    /// Start the flow; resolves to the description of its value
    fn start(
        self,
        host: &Arc<TerminalHost>,
        presenter: &Presenter,
        config: ModalConfig,
    ) -> BoxFuture<'static, ModalResult<String>> {
        let host = host.clone();
        let presenter = presenter.clone();
        match self {
            Self::Alert => async move {
                let choice = alert(host.as_ref(), &presenter, &config, delete_item()).await?;
                Ok(choice.modal_description())
            }
            .boxed(),
            Self::ActionSheet => async move {
                let choice = action_sheet(
                    host.as_ref(),
                    &presenter,
                    &config,
                    DialogSource::bar_button_item("start"),
                    delete_item(),
                )
                .await?;
                Ok(choice.modal_description())
            }
            .boxed(),
            Self::MediaPicker => async move {
                let options = MediaPickerOptions {
                    allows_multiple_selection: true,
                    ..MediaPickerOptions::default()
                };
                let items =
                    media_picker(host.as_ref(), host.as_ref(), &presenter, &config, options)
                        .await?;
                Ok(items.modal_description())
            }
            .boxed(),
            Self::MailComposer => async move {
                let draft = MailDraft::new()
                    .to(CONTACT_ADDRESS)
                    .subject("Modal")
                    .body("Hey,\nThis library is awesome!\nThanks :)");
                let result = mail_composer(host.as_ref(), &presenter, &config, draft).await?;
                Ok(result.modal_description())
            }
            .boxed(),
            Self::MessageComposer => async move {
                let draft = MessageDraft::new()
                    .recipient(CONTACT_NUMBER)
                    .body("Hey,\nThis library is awesome!\nThanks :)");
                let result = message_composer(host.as_ref(), &presenter, &config, draft).await?;
                Ok(result.modal_description())
            }
            .boxed(),
            Self::ComposerChooser => async move {
                let dialog = contact_us(&host, &presenter, config);
                let result = action_sheet(
                    host.as_ref(),
                    &presenter,
                    &config,
                    DialogSource::bar_button_item("start"),
                    dialog,
                )
                .await?;
                Ok(result.modal_description())
            }
            .boxed(),
            Self::SignIn => async move {
                let credentials = alert(host.as_ref(), &presenter, &config, sign_in()).await?;
                Ok(credentials.modal_description())
            }
            .boxed(),
            Self::WebSession => async move {
                let url = web_session(&host, &presenter, config).await?;
                Ok(url.to_string())
            }
            .boxed(),
            Self::PhotoPicker => async move {
                let configuration = PhotoPickerConfiguration {
                    selection_limit: 3,
                    ..PhotoPickerConfiguration::default()
                };
                let results =
                    photo_picker(host.as_ref(), &presenter, &config, configuration).await?;
                Ok(results.modal_description())
            }
            .boxed(),
        }
    }
}

/// Choice of the delete confirmation dialogs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Keep the item
    Cancel,
    /// Delete the item
    Delete,
}

impl ModalDescribe for Choice {
    fn modal_description(&self) -> String {
        match self {
            Self::Cancel => ".cancel",
            Self::Delete => ".delete",
        }
        .to_string()
    }
}

/// Composer chosen in the contact sheet, with its result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactResult {
    /// Mail composer result
    Mail(MailComposeResult),
    /// Message composer result
    Message(MessageComposeResult),
}

impl ModalDescribe for ContactResult {
    fn modal_description(&self) -> String {
        match self {
            Self::Mail(result) => result.modal_description(),
            Self::Message(result) => result.modal_description(),
        }
    }
}

/// Values typed in the sign-in alert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// E-mail field
    pub email: String,
    /// Password field
    pub password: String,
}

impl ModalDescribe for Credentials {
    fn modal_description(&self) -> String {
        format!(
            "Credentials(email: {:?}, password: {:?})",
            self.email, self.password
        )
    }
}

/// Failures raised by the flows themselves
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    /// The web session needs a registered client
    #[error("missing client ID")]
    MissingClientId,
}

fn delete_item() -> DialogBuilder<Choice> {
    Dialog::builder()
        .title("Delete Item")
        .message("Are you sure you want to delete something?")
        .action(DialogAction::cancel("Cancel").map_to(Choice::Cancel))
        .action(DialogAction::destructive("Delete").map_to(Choice::Delete))
}

fn sign_in() -> DialogBuilder<Credentials> {
    Dialog::builder()
        .title("Sign in")
        .message("Please sign in using your credentials")
        .text_field(DialogTextField::email().placeholder("e-mail"))
        .text_field(DialogTextField::password().placeholder("password"))
        .action(DialogAction::cancel("Cancel"))
        .action(DialogAction::action("Sign In").map(|fields: &[String]| Credentials {
            email: fields.first().cloned().unwrap_or_default(),
            password: fields.get(1).cloned().unwrap_or_default(),
        }))
}

fn contact_us(
    host: &Arc<TerminalHost>,
    presenter: &Presenter,
    config: ModalConfig,
) -> DialogBuilder<ContactResult> {
    let mail = {
        let host = host.clone();
        let presenter = presenter.clone();
        move |_: &[String]| {
            let host = host.clone();
            let presenter = presenter.clone();
            async move {
                let draft = MailDraft::new().to(CONTACT_ADDRESS).body("Hello World!");
                mail_composer(host.as_ref(), &presenter, &config, draft)
                    .await
                    .map(ContactResult::Mail)
            }
        }
    };
    let message = {
        let host = host.clone();
        let presenter = presenter.clone();
        move |_: &[String]| {
            let host = host.clone();
            let presenter = presenter.clone();
            async move {
                let draft = MessageDraft::new().recipient(CONTACT_NUMBER).body("Hello World!");
                message_composer(host.as_ref(), &presenter, &config, draft)
                    .await
                    .map(ContactResult::Message)
            }
        }
    };

    Dialog::builder()
        .title("Contact Us")
        .action(DialogAction::action("Mail").flat_map(mail))
        .action(DialogAction::action("Message").flat_map(message))
        .action(DialogAction::cancel("Cancel"))
}

async fn web_session(
    host: &Arc<TerminalHost>,
    presenter: &Presenter,
    config: ModalConfig,
) -> ModalResult<Url> {
    let client_id = Dialog::builder()
        .title("Client ID")
        .message("You must register a playground client on oauth.com first")
        .text_field(DialogTextField::plain().placeholder("CLIENT ID"))
        .action(
            DialogAction::cancel("Cancel").throw(ModalError::platform(FlowError::MissingClientId)),
        )
        .action(DialogAction::action("Register New Client"))
        .action(
            DialogAction::action("Continue")
                .map(|fields: &[String]| fields.first().cloned().unwrap_or_default())
                .preferred(),
        );
    let Some(client_id) = alert(host.as_ref(), presenter, &config, client_id).await? else {
        tracing::info!(url = OAUTH_REGISTRATION_URL, "Register a client first");
        return Err(ModalError::platform(FlowError::MissingClientId));
    };

    let redirect_uri = format!("{CALLBACK_SCHEME}://");
    let url = Url::parse_with_params(
        OAUTH_AUTHORIZE_URL,
        &[
            ("response_type", "token"),
            ("client_id", client_id.as_str()),
            ("redirect_uri", redirect_uri.as_str()),
            ("scope", "photo"),
        ],
    )
    .map_err(ModalError::platform)?;

    let request = WebAuthenticationRequest::new(url, CALLBACK_SCHEME);
    web_authentication_session(host.as_ref(), presenter, &config, request).await
}

/// Stream events of one flow run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Recorded lines
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl std::fmt::Display for Transcript {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.lines.join("\n\n"))
    }
}

/// Run `flow` against a terminal host answering from `script`
pub async fn run_flow(flow: Flow, script: Script, config: ModalConfig) -> Transcript {
    let (host, mut interactions) = TerminalHost::new(script);
    let presenter = Presenter::key_window(&host);

    let mut transcript = Transcript::default();
    transcript.push(flow.result_type());
    transcript.push(".subscribe");
    tracing::info!(flow = flow.title(), "Starting flow");

    let mut running = flow.start(&host, &presenter, config);
    loop {
        tokio::select! {
            outcome = &mut running => {
                match outcome {
                    Ok(description) => {
                        transcript.push(format!(".next({description})"));
                        transcript.push(".completed");
                    }
                    Err(error) => transcript.push(format!(".error({error})")),
                }
                break;
            }
            Some(interaction) = interactions.recv() => {
                if let Response::Unscripted(reason) = host.respond(interaction) {
                    tracing::warn!(%reason, "Abandoning flow");
                    break;
                }
            }
        }
    }

    drop(running);
    transcript.push(".dispose");
    transcript
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ComposeOutcome;
    use modal_surfaces::MediaLibraryAuthorizationStatus;

    fn script(taps: &[&str]) -> Script {
        Script {
            taps: taps.iter().map(|t| (*t).to_string()).collect(),
            ..Script::default()
        }
    }

    async fn run(flow: Flow, script: Script) -> Vec<String> {
        run_flow(flow, script, ModalConfig::immediate())
            .await
            .lines()
            .to_vec()
    }

    #[tokio::test]
    async fn test_alert_transcript() {
        let lines = run(Flow::Alert, script(&["Delete"])).await;
        assert_eq!(
            lines,
            vec![
                "Single<Choice?>",
                ".subscribe",
                ".next(.delete)",
                ".completed",
                ".dispose"
            ]
        );
    }

    #[tokio::test]
    async fn test_unscripted_dialog_is_disposed() {
        let lines = run(Flow::ActionSheet, Script::default()).await;
        assert_eq!(lines, vec!["Single<Choice?>", ".subscribe", ".dispose"]);
    }

    #[tokio::test]
    async fn test_sign_in_reads_fields() {
        let mut script = script(&["Sign In"]);
        script.fields = ["me@example.com", "hunter2"]
            .iter()
            .map(|f| (*f).to_string())
            .collect();
        let lines = run(Flow::SignIn, script).await;
        assert_eq!(
            lines[2],
            ".next(Credentials(email: \"me@example.com\", password: \"hunter2\"))"
        );
    }

    #[tokio::test]
    async fn test_sign_in_cancel_is_nil() {
        let lines = run(Flow::SignIn, script(&["Cancel"])).await;
        assert_eq!(lines[2], ".next(nil)");
    }

    #[tokio::test]
    async fn test_denied_media_library() {
        let script = Script {
            media_library: MediaLibraryAuthorizationStatus::Denied,
            ..Script::default()
        };
        let lines = run(Flow::MediaPicker, script).await;
        assert!(lines[2].starts_with(".error(Authorization denied"));
        assert_eq!(lines.len(), 4);
    }

    #[tokio::test]
    async fn test_media_picker_picks_tracks() {
        let script = Script {
            pick: 2,
            ..Script::default()
        };
        let lines = run(Flow::MediaPicker, script).await;
        assert_eq!(
            lines[2],
            ".next(MediaItemCollection([\"Track 1\", \"Track 2\"]))"
        );
    }

    #[tokio::test]
    async fn test_composer_chooser_chains_into_mail() {
        let script = Script {
            compose: ComposeOutcome::Saved,
            ..script(&["Mail"])
        };
        let lines = run(Flow::ComposerChooser, script).await;
        assert_eq!(lines[2], ".next(.saved)");
    }

    #[tokio::test]
    async fn test_mail_unavailable() {
        let script = Script {
            can_send_mail: false,
            ..Script::default()
        };
        let lines = run(Flow::MailComposer, script).await;
        assert_eq!(lines[2], ".error(Unsupported: mail composer)");
    }

    #[tokio::test]
    async fn test_failed_mail_forwards_host_error() {
        let script = Script {
            compose: ComposeOutcome::Failed,
            ..Script::default()
        };
        let lines = run(Flow::MailComposer, script).await;
        assert_eq!(
            lines[2],
            ".error(Platform error: the mail could not be delivered)"
        );
    }

    #[tokio::test]
    async fn test_web_session_with_callback() {
        let mut script = script(&["Continue"]);
        script.fields.push_back("client-42".to_string());
        script.callback = Some(Url::parse("modal-demo://done#access_token=abc").unwrap());
        let lines = run(Flow::WebSession, script).await;
        assert_eq!(lines[2], ".next(modal-demo://done#access_token=abc)");
    }

    #[tokio::test]
    async fn test_web_session_without_client_id() {
        let lines = run(Flow::WebSession, script(&["Register New Client"])).await;
        assert_eq!(lines[2], ".error(Platform error: missing client ID)");
    }

    #[tokio::test]
    async fn test_photo_picker_respects_selection_limit() {
        let script = Script {
            pick: 5,
            ..Script::default()
        };
        let lines = run(Flow::PhotoPicker, script).await;
        assert_eq!(
            lines[2],
            ".next([PhotoPickerResult(asset-1), PhotoPickerResult(asset-2), PhotoPickerResult(asset-3)])"
        );
    }
}
