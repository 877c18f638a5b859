//! Scripted terminal host
//!
//! Stands in for the platform: every surface it builds is queued as an
//! [`Interaction`], and the flow driver answers it from the [`Script`] given on
//! the command line once the presentation is under way.

use async_trait::async_trait;
use clap::ValueEnum;
use modal_core::{
    AuthorizationSource, HostWindow, ModalSurface, PlatformError, PresentationAnchor,
    SurfaceKind, SurfaceState, WindowSource,
};
use modal_dialogs::{DialogDelegate, DialogDescriptor, DialogRenderer};
use modal_surfaces::{
    MailComposeDelegate, MailComposeResult, MailComposerHost, MailDraft, MediaItem,
    MediaItemCollection, MediaLibraryAuthorizationStatus, MediaPickerDelegate, MediaPickerHost,
    MediaPickerOptions, MessageComposeDelegate, MessageComposeResult, MessageComposerHost,
    MessageDraft, PhotoPickerConfiguration, PhotoPickerDelegate, PhotoPickerHost,
    PhotoPickerResult, WebAuthenticationDelegate, WebAuthenticationHost,
    WebAuthenticationRequest,
};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::mpsc;
use url::Url;

/// Errors the terminal host reports through delegates
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// Scripted mail failure
    #[error("the mail could not be delivered")]
    MailDeliveryFailed,

    /// No callback URL was scripted for a web session
    #[error("the user cancelled the login")]
    CanceledLogin,
}

/// How scripted composers finish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ComposeOutcome {
    /// Send the message
    #[default]
    Sent,
    /// Save a draft (mail only; messages are cancelled instead)
    Saved,
    /// Close without sending
    Cancelled,
    /// Fail delivery
    Failed,
}

/// Scripted user behaviour
#[derive(Debug, Clone)]
pub struct Script {
    /// Titles of the dialog actions to tap, in order
    pub taps: VecDeque<String>,
    /// Text typed into dialog fields, in order
    pub fields: VecDeque<String>,
    /// Composer outcome
    pub compose: ComposeOutcome,
    /// Number of items picked in pickers; `0` cancels media pickers
    pub pick: usize,
    /// Callback URL completing web sessions
    pub callback: Option<Url>,
    /// Answer of the media library prompt
    pub media_library: MediaLibraryAuthorizationStatus,
    /// Whether a mail account is configured
    pub can_send_mail: bool,
    /// Whether text messages can be sent
    pub can_send_text: bool,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            taps: VecDeque::new(),
            fields: VecDeque::new(),
            compose: ComposeOutcome::Sent,
            pick: 1,
            callback: None,
            media_library: MediaLibraryAuthorizationStatus::Authorized,
            can_send_mail: true,
            can_send_text: true,
        }
    }
}

type Select = Arc<dyn Fn(usize, Vec<String>) -> bool + Send + Sync>;

/// Visibility of a terminal surface, shared with the interaction driving it
pub type SurfaceHandle = Arc<Mutex<SurfaceState>>;

/// Surface waiting for a scripted answer
pub enum Interaction {
    /// Alert or action sheet
    Dialog {
        /// What is shown
        descriptor: DialogDescriptor,
        /// Report the tapped action
        select: Select,
    },
    /// Mail composer
    Mail(MailComposeDelegate),
    /// Message composer
    Message(MessageComposeDelegate),
    /// Media library picker
    MediaPicker(MediaPickerDelegate),
    /// Photo picker
    PhotoPicker {
        /// Picker configuration
        configuration: PhotoPickerConfiguration,
        /// Report the picked assets
        delegate: PhotoPickerDelegate,
    },
    /// Web authentication session
    WebAuthentication {
        /// Report the callback URL
        delegate: WebAuthenticationDelegate,
        /// Session visibility; a finished session closes itself
        session: SurfaceHandle,
    },
}

impl Interaction {
    fn kind(&self) -> SurfaceKind {
        match self {
            Self::Dialog { descriptor, .. } => descriptor.kind(),
            Self::Mail(_) => SurfaceKind::MailComposer,
            Self::Message(_) => SurfaceKind::MessageComposer,
            Self::MediaPicker(_) => SurfaceKind::MediaPicker,
            Self::PhotoPicker { .. } => SurfaceKind::PhotoPicker,
            Self::WebAuthentication { .. } => SurfaceKind::WebAuthentication,
        }
    }
}

/// Result of answering an interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// The scripted answer was delivered
    Answered,
    /// The script has no answer; the flow is abandoned
    Unscripted(String),
}

/// Surface drawn by the terminal host
#[derive(Debug)]
pub struct TerminalSurface {
    kind: SurfaceKind,
    state: SurfaceHandle,
}

impl ModalSurface for TerminalSurface {
    fn kind(&self) -> SurfaceKind {
        self.kind
    }

    fn state(&self) -> SurfaceState {
        *self.state.lock()
    }

    fn dismiss(&self, animated: bool) {
        tracing::info!(kind = %self.kind, animated, "Dismissed");
        *self.state.lock() = SurfaceState::Dismissed;
    }
}

struct TerminalAnchor;

impl PresentationAnchor for TerminalAnchor {
    fn present(&self, surface: &dyn ModalSurface, animated: bool) {
        tracing::info!(kind = %surface.kind(), animated, "Presented");
    }
}

struct TerminalWindow {
    root: Arc<TerminalAnchor>,
}

impl HostWindow for TerminalWindow {
    fn is_key(&self) -> bool {
        true
    }

    fn root_anchor(&self) -> Option<Arc<dyn PresentationAnchor>> {
        Some(self.root.clone() as Arc<dyn PresentationAnchor>)
    }
}

/// Platform stand-in answering surfaces from a [`Script`]
pub struct TerminalHost {
    script: Mutex<Script>,
    window: Arc<TerminalWindow>,
    interactions: mpsc::UnboundedSender<Interaction>,
}

impl TerminalHost {
    /// Host answering from `script`, with the queue of surfaces to answer
    pub fn new(script: Script) -> (Arc<Self>, mpsc::UnboundedReceiver<Interaction>) {
        let (interactions, receiver) = mpsc::unbounded_channel();
        let host = Arc::new(Self {
            script: Mutex::new(script),
            window: Arc::new(TerminalWindow {
                root: Arc::new(TerminalAnchor),
            }),
            interactions,
        });
        (host, receiver)
    }

    fn queue(&self, interaction: Interaction) -> TerminalSurface {
        self.queue_with(|_| interaction)
    }

    fn queue_with(&self, build: impl FnOnce(SurfaceHandle) -> Interaction) -> TerminalSurface {
        let state: SurfaceHandle = Arc::new(Mutex::new(SurfaceState::Presented));
        let interaction = build(state.clone());
        let surface = TerminalSurface {
            kind: interaction.kind(),
            state,
        };
        if self.interactions.send(interaction).is_err() {
            tracing::warn!(kind = %surface.kind, "No driver listening for interactions");
        }
        surface
    }

    /// Deliver the scripted answer to `interaction`
    pub fn respond(&self, interaction: Interaction) -> Response {
        match interaction {
            Interaction::Dialog { descriptor, select } => {
                self.respond_to_dialog(&descriptor, &select)
            }
            Interaction::Mail(delegate) => {
                let compose = self.script.lock().compose;
                tracing::info!(?compose, "Mail composer finished");
                match compose {
                    ComposeOutcome::Sent => delegate.did_finish(MailComposeResult::Sent, None),
                    ComposeOutcome::Saved => delegate.did_finish(MailComposeResult::Saved, None),
                    ComposeOutcome::Cancelled => {
                        delegate.did_finish(MailComposeResult::Cancelled, None)
                    }
                    ComposeOutcome::Failed => delegate.did_finish(
                        MailComposeResult::Failed,
                        Some(PlatformError::new(HostError::MailDeliveryFailed)),
                    ),
                };
                Response::Answered
            }
            Interaction::Message(delegate) => {
                let result = match self.script.lock().compose {
                    ComposeOutcome::Sent => MessageComposeResult::Sent,
                    ComposeOutcome::Failed => MessageComposeResult::Failed,
                    ComposeOutcome::Saved | ComposeOutcome::Cancelled => {
                        MessageComposeResult::Cancelled
                    }
                };
                tracing::info!(?result, "Message composer finished");
                delegate.did_finish(result);
                Response::Answered
            }
            Interaction::MediaPicker(delegate) => {
                let pick = self.script.lock().pick;
                if pick == 0 {
                    tracing::info!("Media picker cancelled");
                    delegate.did_cancel();
                } else {
                    let items = (1..=pick as u64)
                        .map(|persistent_id| MediaItem {
                            persistent_id,
                            title: Some(format!("Track {persistent_id}")),
                            artist: None,
                        })
                        .collect();
                    delegate.did_pick(MediaItemCollection::new(items));
                }
                Response::Answered
            }
            Interaction::PhotoPicker {
                configuration,
                delegate,
            } => {
                let mut pick = self.script.lock().pick;
                if configuration.selection_limit > 0 {
                    pick = pick.min(configuration.selection_limit);
                }
                let results = (1..=pick)
                    .map(|n| PhotoPickerResult {
                        asset_identifier: Some(format!("asset-{n}")),
                        type_identifiers: vec!["public.jpeg".to_string()],
                    })
                    .collect();
                delegate.did_finish_picking(results);
                Response::Answered
            }
            Interaction::WebAuthentication { delegate, session } => {
                *session.lock() = SurfaceState::Dismissing;
                match self.script.lock().callback.clone() {
                    Some(url) => delegate.did_complete(Some(url), None),
                    None => delegate
                        .did_complete(None, Some(PlatformError::new(HostError::CanceledLogin))),
                };
                Response::Answered
            }
        }
    }

    fn respond_to_dialog(&self, descriptor: &DialogDescriptor, select: &Select) -> Response {
        let (index, fields) = {
            let mut script = self.script.lock();
            let Some(title) = script.taps.pop_front() else {
                return Response::Unscripted(format!("no tap scripted for {}", descriptor.kind()));
            };
            let Some(index) = descriptor.action_index(&title) else {
                return Response::Unscripted(format!(
                    "no action titled {title:?} (available: {})",
                    descriptor.action_titles().join(", ")
                ));
            };
            let fields: Vec<String> = descriptor
                .text_fields
                .iter()
                .map(|_| script.fields.pop_front().unwrap_or_default())
                .collect();
            tracing::info!(%title, fields = fields.len(), "Tapped");
            (index, fields)
        };
        select(index, fields);
        Response::Answered
    }
}

impl WindowSource for TerminalHost {
    fn windows(&self) -> Vec<Arc<dyn HostWindow>> {
        vec![self.window.clone() as Arc<dyn HostWindow>]
    }
}

impl DialogRenderer for TerminalHost {
    type Surface = TerminalSurface;

    fn make_dialog<V: Send + 'static>(
        &self,
        descriptor: DialogDescriptor,
        delegate: DialogDelegate<V>,
    ) -> TerminalSurface {
        self.queue(Interaction::Dialog {
            descriptor,
            select: Arc::new(move |index, fields| delegate.did_select(index, fields)),
        })
    }
}

impl MailComposerHost for TerminalHost {
    type Surface = TerminalSurface;

    fn can_send_mail(&self) -> bool {
        self.script.lock().can_send_mail
    }

    fn make_mail_composer(
        &self,
        draft: MailDraft,
        delegate: MailComposeDelegate,
    ) -> TerminalSurface {
        tracing::info!(to = ?draft.to, subject = ?draft.subject, "Composing mail");
        self.queue(Interaction::Mail(delegate))
    }
}

impl MessageComposerHost for TerminalHost {
    type Surface = TerminalSurface;

    fn can_send_text(&self) -> bool {
        self.script.lock().can_send_text
    }

    fn make_message_composer(
        &self,
        draft: MessageDraft,
        delegate: MessageComposeDelegate,
    ) -> TerminalSurface {
        tracing::info!(recipients = ?draft.recipients, "Composing message");
        self.queue(Interaction::Message(delegate))
    }
}

impl MediaPickerHost for TerminalHost {
    type Surface = TerminalSurface;

    fn make_media_picker(
        &self,
        options: MediaPickerOptions,
        delegate: MediaPickerDelegate,
    ) -> TerminalSurface {
        tracing::info!(multiple = options.allows_multiple_selection, "Opening media picker");
        self.queue(Interaction::MediaPicker(delegate))
    }
}

impl PhotoPickerHost for TerminalHost {
    type Surface = TerminalSurface;

    fn make_photo_picker(
        &self,
        configuration: PhotoPickerConfiguration,
        delegate: PhotoPickerDelegate,
    ) -> TerminalSurface {
        self.queue(Interaction::PhotoPicker {
            configuration,
            delegate,
        })
    }
}

impl WebAuthenticationHost for TerminalHost {
    type Session = TerminalSurface;

    fn make_web_authentication_session(
        &self,
        request: WebAuthenticationRequest,
        delegate: WebAuthenticationDelegate,
    ) -> TerminalSurface {
        tracing::info!(url = %request.url, "Opening web session");
        self.queue_with(|session| Interaction::WebAuthentication { delegate, session })
    }
}

#[async_trait]
impl AuthorizationSource for TerminalHost {
    type Status = MediaLibraryAuthorizationStatus;

    fn current_status(&self) -> MediaLibraryAuthorizationStatus {
        MediaLibraryAuthorizationStatus::NotDetermined
    }

    async fn request_authorization(&self) -> MediaLibraryAuthorizationStatus {
        let status = self.script.lock().media_library;
        tracing::info!(?status, "Media library prompt answered");
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modal_core::{ModalConfig, Presenter};
    use modal_surfaces::web_authentication_session;

    #[tokio::test]
    async fn test_finished_web_session_is_not_dismissed_again() {
        let callback = Url::parse("modal-demo://done").unwrap();
        let (host, mut interactions) = TerminalHost::new(Script {
            callback: Some(callback.clone()),
            ..Script::default()
        });
        let presenter = Presenter::key_window(&host);
        let config = ModalConfig::immediate();
        let request = WebAuthenticationRequest::new(
            Url::parse("https://example.com/authorize").unwrap(),
            "modal-demo",
        );

        let mut pending = std::pin::pin!(web_authentication_session(
            host.as_ref(),
            &presenter,
            &config,
            request
        ));
        assert!(futures::poll!(&mut pending).is_pending());

        let interaction = interactions.try_recv().unwrap();
        let Interaction::WebAuthentication { session, .. } = &interaction else {
            panic!("expected a web session");
        };
        let session = session.clone();
        assert_eq!(host.respond(interaction), Response::Answered);

        assert_eq!(pending.await.unwrap(), callback);
        assert_eq!(*session.lock(), SurfaceState::Dismissing);
    }

    #[tokio::test]
    async fn test_unanswered_web_session_is_dismissed_on_drop() {
        let (host, mut interactions) = TerminalHost::new(Script::default());
        let presenter = Presenter::key_window(&host);
        let config = ModalConfig::immediate();
        let request = WebAuthenticationRequest::new(
            Url::parse("https://example.com/authorize").unwrap(),
            "modal-demo",
        );

        let session = {
            let mut pending = std::pin::pin!(web_authentication_session(
                host.as_ref(),
                &presenter,
                &config,
                request
            ));
            assert!(futures::poll!(&mut pending).is_pending());
            let Ok(Interaction::WebAuthentication { session, .. }) = interactions.try_recv() else {
                panic!("expected a web session");
            };
            session
        };

        assert_eq!(*session.lock(), SurfaceState::Dismissed);
    }
}
