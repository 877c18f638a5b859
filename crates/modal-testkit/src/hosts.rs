//! Mock feature hosts
//!
//! Each mock records the requests it was asked to present and keeps the
//! delegate of the latest one so the test can finish it.

use crate::probe::{ProbeSurface, SurfaceProbe};
use async_trait::async_trait;
use modal_core::{AuthorizationSource, PlatformError, SurfaceKind};
use modal_surfaces::{
    MailComposeDelegate, MailComposeResult, MailComposerHost, MailDraft, MediaItem,
    MediaItemCollection, MediaLibraryAuthorizationStatus, MediaPickerDelegate, MediaPickerHost,
    MediaPickerOptions, MessageComposeDelegate, MessageComposeResult, MessageComposerHost,
    MessageDraft, PhotoPickerConfiguration, PhotoPickerDelegate, PhotoPickerHost,
    PhotoPickerResult, WebAuthenticationDelegate, WebAuthenticationHost,
    WebAuthenticationRequest,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use url::Url;

/// Requests and the live delegate of one mock host
struct Recorder<R, D> {
    kind: SurfaceKind,
    state: Mutex<RecorderState<R, D>>,
}

struct RecorderState<R, D> {
    requests: Vec<R>,
    current: Option<(D, Arc<SurfaceProbe>)>,
}

impl<R: Clone, D: Clone> Recorder<R, D> {
    fn new(kind: SurfaceKind) -> Self {
        Self {
            kind,
            state: Mutex::new(RecorderState {
                requests: Vec::new(),
                current: None,
            }),
        }
    }

    fn record(&self, request: R, delegate: D) -> ProbeSurface {
        let probe = SurfaceProbe::new(self.kind);
        let mut state = self.state.lock();
        state.requests.push(request);
        state.current = Some((delegate, probe.clone()));
        ProbeSurface::new(probe)
    }

    fn delegate(&self) -> Option<D> {
        self.state
            .lock()
            .current
            .as_ref()
            .map(|(delegate, _)| delegate.clone())
    }

    fn probe(&self) -> Option<Arc<SurfaceProbe>> {
        self.state.lock().current.as_ref().map(|(_, probe)| probe.clone())
    }

    fn requests(&self) -> Vec<R> {
        self.state.lock().requests.clone()
    }
}

/// Mail composer host
pub struct MockMailComposer {
    available: bool,
    recorder: Recorder<MailDraft, MailComposeDelegate>,
}

impl MockMailComposer {
    /// Host with a configured mail account
    pub fn new() -> Self {
        Self {
            available: true,
            recorder: Recorder::new(SurfaceKind::MailComposer),
        }
    }

    /// Host without a mail account
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Finish the latest composer with `result`
    pub fn finish(&self, result: MailComposeResult) -> bool {
        self.recorder
            .delegate()
            .is_some_and(|delegate| delegate.did_finish(result, None))
    }

    /// Finish the latest composer with `error`
    pub fn fail(&self, error: PlatformError) -> bool {
        self.recorder
            .delegate()
            .is_some_and(|delegate| delegate.did_finish(MailComposeResult::Failed, Some(error)))
    }

    /// Drafts presented so far
    pub fn drafts(&self) -> Vec<MailDraft> {
        self.recorder.requests()
    }

    /// Probe of the latest composer
    pub fn probe(&self) -> Option<Arc<SurfaceProbe>> {
        self.recorder.probe()
    }
}

impl Default for MockMailComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl MailComposerHost for MockMailComposer {
    type Surface = ProbeSurface;

    fn can_send_mail(&self) -> bool {
        self.available
    }

    fn make_mail_composer(&self, draft: MailDraft, delegate: MailComposeDelegate) -> ProbeSurface {
        self.recorder.record(draft, delegate)
    }
}

/// Text message composer host
pub struct MockMessageComposer {
    available: bool,
    recorder: Recorder<MessageDraft, MessageComposeDelegate>,
}

impl MockMessageComposer {
    /// Host able to send texts
    pub fn new() -> Self {
        Self {
            available: true,
            recorder: Recorder::new(SurfaceKind::MessageComposer),
        }
    }

    /// Host unable to send texts
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Finish the latest composer with `result`
    pub fn finish(&self, result: MessageComposeResult) -> bool {
        self.recorder
            .delegate()
            .is_some_and(|delegate| delegate.did_finish(result))
    }

    /// Drafts presented so far
    pub fn drafts(&self) -> Vec<MessageDraft> {
        self.recorder.requests()
    }

    /// Probe of the latest composer
    pub fn probe(&self) -> Option<Arc<SurfaceProbe>> {
        self.recorder.probe()
    }
}

impl Default for MockMessageComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageComposerHost for MockMessageComposer {
    type Surface = ProbeSurface;

    fn can_send_text(&self) -> bool {
        self.available
    }

    fn make_message_composer(
        &self,
        draft: MessageDraft,
        delegate: MessageComposeDelegate,
    ) -> ProbeSurface {
        self.recorder.record(draft, delegate)
    }
}

/// Media library authorization with a scripted prompt answer
#[derive(Debug)]
pub struct MockMediaLibrary {
    status: Mutex<MediaLibraryAuthorizationStatus>,
    answer: MediaLibraryAuthorizationStatus,
    requests: AtomicUsize,
}

impl MockMediaLibrary {
    /// Library whose status is already `status`
    pub fn with_status(status: MediaLibraryAuthorizationStatus) -> Self {
        Self {
            status: Mutex::new(status),
            answer: status,
            requests: AtomicUsize::new(0),
        }
    }

    /// Undetermined library; the prompt answers `answer`
    pub fn prompting(answer: MediaLibraryAuthorizationStatus) -> Self {
        Self {
            status: Mutex::new(MediaLibraryAuthorizationStatus::NotDetermined),
            answer,
            requests: AtomicUsize::new(0),
        }
    }

    /// Number of prompts shown
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthorizationSource for MockMediaLibrary {
    type Status = MediaLibraryAuthorizationStatus;

    fn current_status(&self) -> MediaLibraryAuthorizationStatus {
        *self.status.lock()
    }

    async fn request_authorization(&self) -> MediaLibraryAuthorizationStatus {
        self.requests.fetch_add(1, Ordering::SeqCst);
        *self.status.lock() = self.answer;
        self.answer
    }
}

/// Media library picker host
pub struct MockMediaPicker {
    recorder: Recorder<MediaPickerOptions, MediaPickerDelegate>,
}

impl MockMediaPicker {
    /// New picker host
    pub fn new() -> Self {
        Self {
            recorder: Recorder::new(SurfaceKind::MediaPicker),
        }
    }

    /// Pick items titled `titles`, numbered from 1
    pub fn pick(&self, titles: &[&str]) -> bool {
        let items = titles
            .iter()
            .zip(1u64..)
            .map(|(title, persistent_id)| MediaItem {
                persistent_id,
                title: Some((*title).to_string()),
                artist: None,
            })
            .collect();
        self.recorder
            .delegate()
            .is_some_and(|delegate| delegate.did_pick(MediaItemCollection::new(items)))
    }

    /// Close the picker without picking
    pub fn cancel(&self) -> bool {
        self.recorder
            .delegate()
            .is_some_and(|delegate| delegate.did_cancel())
    }

    /// Number of pickers built
    pub fn presented(&self) -> usize {
        self.recorder.requests().len()
    }

    /// Probe of the latest picker
    pub fn probe(&self) -> Option<Arc<SurfaceProbe>> {
        self.recorder.probe()
    }
}

impl Default for MockMediaPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaPickerHost for MockMediaPicker {
    type Surface = ProbeSurface;

    fn make_media_picker(
        &self,
        options: MediaPickerOptions,
        delegate: MediaPickerDelegate,
    ) -> ProbeSurface {
        self.recorder.record(options, delegate)
    }
}

/// Photo picker host
pub struct MockPhotoPicker {
    recorder: Recorder<PhotoPickerConfiguration, PhotoPickerDelegate>,
}

impl MockPhotoPicker {
    /// New picker host
    pub fn new() -> Self {
        Self {
            recorder: Recorder::new(SurfaceKind::PhotoPicker),
        }
    }

    /// Finish picking the assets identified by `identifiers`
    pub fn pick(&self, identifiers: &[&str]) -> bool {
        let results = identifiers
            .iter()
            .map(|id| PhotoPickerResult {
                asset_identifier: Some((*id).to_string()),
                type_identifiers: vec!["public.jpeg".to_string()],
            })
            .collect();
        self.recorder
            .delegate()
            .is_some_and(|delegate| delegate.did_finish_picking(results))
    }

    /// Configurations presented so far
    pub fn configurations(&self) -> Vec<PhotoPickerConfiguration> {
        self.recorder.requests()
    }

    /// Probe of the latest picker
    pub fn probe(&self) -> Option<Arc<SurfaceProbe>> {
        self.recorder.probe()
    }
}

impl Default for MockPhotoPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl PhotoPickerHost for MockPhotoPicker {
    type Surface = ProbeSurface;

    fn make_photo_picker(
        &self,
        configuration: PhotoPickerConfiguration,
        delegate: PhotoPickerDelegate,
    ) -> ProbeSurface {
        self.recorder.record(configuration, delegate)
    }
}

/// Web authentication host
pub struct MockWebAuthentication {
    recorder: Recorder<WebAuthenticationRequest, WebAuthenticationDelegate>,
}

impl MockWebAuthentication {
    /// New session host
    pub fn new() -> Self {
        Self {
            recorder: Recorder::new(SurfaceKind::WebAuthentication),
        }
    }

    /// Complete the latest session; a completed session is no longer on screen
    pub fn complete(&self, callback_url: Option<Url>, error: Option<PlatformError>) -> bool {
        if let Some(probe) = self.recorder.probe() {
            probe.begin_self_dismissal();
        }
        self.recorder
            .delegate()
            .is_some_and(|delegate| delegate.did_complete(callback_url, error))
    }

    /// Complete the latest session with the callback `url`
    ///
    /// # Panics
    ///
    /// When `url` does not parse.
    pub fn callback(&self, url: &str) -> bool {
        self.complete(Some(Url::parse(url).expect("valid callback URL")), None)
    }

    /// Requests started so far
    pub fn requests(&self) -> Vec<WebAuthenticationRequest> {
        self.recorder.requests()
    }

    /// Probe of the latest session; its dismissals are session cancellations
    pub fn probe(&self) -> Option<Arc<SurfaceProbe>> {
        self.recorder.probe()
    }
}

impl Default for MockWebAuthentication {
    fn default() -> Self {
        Self::new()
    }
}

impl WebAuthenticationHost for MockWebAuthentication {
    type Session = ProbeSurface;

    fn make_web_authentication_session(
        &self,
        request: WebAuthenticationRequest,
        delegate: WebAuthenticationDelegate,
    ) -> ProbeSurface {
        self.recorder.record(request, delegate)
    }
}
