//! Web authentication session
//!
//! Runs a browser-based sign-in and resolves to the callback URL the service
//! redirected to. The session surface is started when presented; cancelling
//! the presentation (or dropping it) cancels the session.

use modal_core::{
    ModalConfig, ModalCoordinator, ModalError, ModalListener, ModalResult, ModalSurface,
    PlatformError, Presenter,
};
use url::Url;

/// Sign-in page and the callback it must redirect to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebAuthenticationRequest {
    /// Page opened in the session
    pub url: Url,
    /// Scheme of the callback URL completing the session
    pub callback_url_scheme: String,
    /// Do not share cookies with the user's browser
    pub prefers_ephemeral_session: bool,
}

impl WebAuthenticationRequest {
    /// Request opening `url` and completing on `callback_url_scheme`
    pub fn new(url: Url, callback_url_scheme: impl Into<String>) -> Self {
        Self {
            url,
            callback_url_scheme: callback_url_scheme.into(),
            prefers_ephemeral_session: false,
        }
    }

    /// Parse `url` and build a request
    pub fn parse(url: &str, callback_url_scheme: impl Into<String>) -> ModalResult<Self> {
        let url = Url::parse(url).map_err(ModalError::platform)?;
        Ok(Self::new(url, callback_url_scheme))
    }

    /// Use a private browsing session
    pub fn ephemeral(mut self) -> Self {
        self.prefers_ephemeral_session = true;
        self
    }
}

/// Completion handler of a web authentication session
#[derive(Debug, Clone)]
pub struct WebAuthenticationDelegate {
    listener: ModalListener<Url>,
}

impl WebAuthenticationDelegate {
    /// The session completed.
    ///
    /// An `error` is forwarded as is. A completion carrying neither a URL nor
    /// an error fails with [`ModalError::Unsupported`].
    pub fn did_complete(&self, callback_url: Option<Url>, error: Option<PlatformError>) -> bool {
        match (callback_url, error) {
            (_, Some(error)) => {
                tracing::debug!(%error, "Web authentication failed");
                self.listener.fail(ModalError::Platform(error))
            }
            (Some(url), None) => self.listener.resolve(url),
            (None, None) => self
                .listener
                .fail(ModalError::unsupported("web authentication without callback URL")),
        }
    }
}

/// Host able to run web authentication sessions
pub trait WebAuthenticationHost: Send + Sync {
    /// Platform session; dismissing it cancels the session
    type Session: ModalSurface;

    /// Create the session for `request`. It starts once presented.
    fn make_web_authentication_session(
        &self,
        request: WebAuthenticationRequest,
        delegate: WebAuthenticationDelegate,
    ) -> Self::Session;
}

/// Run a web authentication session and await its callback URL
pub async fn web_authentication_session<H>(
    host: &H,
    presenter: &Presenter,
    config: &ModalConfig,
    request: WebAuthenticationRequest,
) -> ModalResult<Url>
where
    H: WebAuthenticationHost + ?Sized,
{
    tracing::debug!(url = %request.url, scheme = %request.callback_url_scheme, "Starting web authentication");
    ModalCoordinator::present(presenter, config, |listener| {
        host.make_web_authentication_session(request, WebAuthenticationDelegate { listener })
    })?
    .await
}
