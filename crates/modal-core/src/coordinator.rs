//! Modal Result Coordinator
//!
//! Owns one presented modal surface and bridges its single asynchronous
//! outcome into a [`Presentation`] future.
//!
//! ```text
//! Idle ──present──▶ Presenting ──first listener outcome──▶ Resolved
//!                        │
//!                        └──────cancel / drop──────────────▶ Cancelled
//! ```
//!
//! `Resolved` and `Cancelled` are terminal: whichever comes first takes the
//! surface out of its owning slot, so the surface is dismissed at most once and
//! later listener events are ignored.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let presentation = ModalCoordinator::present(&presenter, &config, |listener| {
//!     host.make_picker(PickerDelegate::new(listener))
//! })?;
//! let picked = presentation.await?;
//! ```

use crate::config::ModalConfig;
use crate::errors::{ModalError, ModalResult};
use crate::presenter::Presenter;
use crate::surface::{ModalSurface, PresentationId, SurfaceKind};
use parking_lot::Mutex;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Weak};
use std::task::{Context, Poll};
use tokio::sync::oneshot;

/// Lifecycle of a coordinator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordinatorState {
    /// Created, surface not yet shown
    Idle,
    /// Surface being built or shown, waiting for its outcome
    Presenting,
    /// First outcome delivered
    Resolved,
    /// Torn down before any outcome
    Cancelled,
}

impl CoordinatorState {
    /// Whether no further transitions can happen
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved | Self::Cancelled)
    }
}

/// Receiving end of listener outcomes, erased over the surface type
trait OutcomeSink<T>: Send + Sync {
    fn deliver(&self, outcome: ModalResult<T>) -> bool;
    fn accepts_outcome(&self) -> bool;
}

/// Single-shot outcome listener handed to the surface being built.
///
/// Host adapters call exactly one of [`resolve`](Self::resolve),
/// [`fail`](Self::fail) or [`complete`](Self::complete) from their delegate
/// callback. The first call wins; every later call returns `false`. The
/// listener holds its coordinator weakly, so a surface retaining its listener
/// never keeps the coordinator alive.
pub struct ModalListener<T> {
    sink: Weak<dyn OutcomeSink<T>>,
    presentation: PresentationId,
}

impl<T> Clone for ModalListener<T> {
    fn clone(&self) -> Self {
        Self {
            sink: self.sink.clone(),
            presentation: self.presentation,
        }
    }
}

impl<T> fmt::Debug for ModalListener<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalListener")
            .field("presentation", &self.presentation)
            .finish_non_exhaustive()
    }
}

impl<T> ModalListener<T> {
    /// Deliver a success value
    pub fn resolve(&self, value: T) -> bool {
        self.complete(Ok(value))
    }

    /// Deliver a failure
    pub fn fail(&self, error: ModalError) -> bool {
        self.complete(Err(error))
    }

    /// Deliver an outcome; returns whether it was accepted
    pub fn complete(&self, outcome: ModalResult<T>) -> bool {
        match self.sink.upgrade() {
            Some(sink) => sink.deliver(outcome),
            None => {
                tracing::trace!(
                    presentation = %self.presentation,
                    "Listener fired after its coordinator was released"
                );
                false
            }
        }
    }

    /// Whether an outcome delivered now would still be accepted
    pub fn is_open(&self) -> bool {
        self.sink
            .upgrade()
            .is_some_and(|sink| sink.accepts_outcome())
    }

    /// Presentation this listener belongs to
    pub fn presentation_id(&self) -> PresentationId {
        self.presentation
    }
}

struct Slots<S, T> {
    state: CoordinatorState,
    kind: Option<SurfaceKind>,
    surface: Option<Arc<S>>,
    sender: Option<oneshot::Sender<ModalResult<T>>>,
}

/// Owner of one presented surface and of the slot its outcome lands in
pub struct ModalCoordinator<S: ModalSurface, T: Send + 'static> {
    id: PresentationId,
    config: ModalConfig,
    slots: Mutex<Slots<S, T>>,
}

impl<S: ModalSurface, T: Send + 'static> ModalCoordinator<S, T> {
    /// Present a surface and return the future of its single outcome.
    ///
    /// Fails with [`ModalError::MissingPresentationTarget`] before
    /// `build_surface` runs when the presenter resolves to no anchor.
    pub fn present<B>(
        presenter: &Presenter,
        config: &ModalConfig,
        build_surface: B,
    ) -> ModalResult<Presentation<S, T>>
    where
        B: FnOnce(ModalListener<T>) -> S,
    {
        let Some(anchor) = presenter.resolve() else {
            tracing::debug!("Presenter resolved to no anchor");
            return Err(ModalError::MissingPresentationTarget);
        };

        let (sender, receiver) = oneshot::channel();
        let coordinator = Arc::new(Self {
            id: PresentationId::new(),
            config: *config,
            slots: Mutex::new(Slots {
                state: CoordinatorState::Idle,
                kind: None,
                surface: None,
                sender: Some(sender),
            }),
        });

        let sink: Arc<dyn OutcomeSink<T>> = coordinator.clone();
        let listener = ModalListener {
            sink: Arc::downgrade(&sink),
            presentation: coordinator.id,
        };
        drop(sink);
        coordinator.slots.lock().state = CoordinatorState::Presenting;

        // Hosts may report an outcome from inside the builder; it is accepted
        // and the surface is never shown.
        let surface = Arc::new(build_surface(listener));
        let kind = surface.kind();
        {
            let mut slots = coordinator.slots.lock();
            slots.kind = Some(kind);
            if slots.state != CoordinatorState::Presenting {
                tracing::debug!(
                    presentation = %coordinator.id,
                    %kind,
                    state = ?slots.state,
                    "Outcome arrived while building the surface, not presenting it"
                );
                drop(slots);
                return Ok(Presentation {
                    coordinator,
                    receiver,
                });
            }
            slots.surface = Some(surface.clone());
        }

        tracing::debug!(
            presentation = %coordinator.id,
            %kind,
            animated = config.animated,
            "Presenting modal surface"
        );
        anchor.present(surface.as_ref(), config.animated);

        Ok(Presentation {
            coordinator,
            receiver,
        })
    }

    /// Identifier used in log lines
    pub fn id(&self) -> PresentationId {
        self.id
    }

    /// Current lifecycle state
    pub fn state(&self) -> CoordinatorState {
        self.slots.lock().state
    }

    /// Tear down without an outcome. Returns `false` if already terminal.
    fn cancel(&self) -> bool {
        let (sender, surface, kind) = {
            let mut slots = self.slots.lock();
            if slots.state != CoordinatorState::Presenting {
                return false;
            }
            slots.state = CoordinatorState::Cancelled;
            (slots.sender.take(), slots.surface.take(), slots.kind)
        };
        drop(sender);

        tracing::debug!(
            presentation = %self.id,
            kind = ?kind,
            "Presentation cancelled before an outcome"
        );
        if let Some(surface) = surface {
            self.dismiss_surface(surface.as_ref());
        }
        true
    }

    fn dismiss_surface(&self, surface: &S) {
        let state = surface.state();
        if state.is_going_away() {
            tracing::trace!(
                presentation = %self.id,
                ?state,
                "Surface already leaving the screen"
            );
            return;
        }
        tracing::debug!(
            presentation = %self.id,
            kind = %surface.kind(),
            "Dismissing modal surface"
        );
        surface.dismiss(self.config.animated);
    }
}

impl<S: ModalSurface, T: Send + 'static> OutcomeSink<T> for ModalCoordinator<S, T> {
    fn deliver(&self, outcome: ModalResult<T>) -> bool {
        let (sender, surface) = {
            let mut slots = self.slots.lock();
            if slots.state != CoordinatorState::Presenting {
                tracing::debug!(
                    presentation = %self.id,
                    state = ?slots.state,
                    "Ignoring listener outcome"
                );
                return false;
            }
            slots.state = CoordinatorState::Resolved;
            (slots.sender.take(), slots.surface.take())
        };

        tracing::debug!(
            presentation = %self.id,
            failed = outcome.is_err(),
            "Modal outcome received"
        );
        if let Some(sender) = sender {
            if sender.send(outcome).is_err() {
                tracing::trace!(presentation = %self.id, "Outcome receiver already gone");
            }
        }

        if let Some(surface) = surface {
            self.dismiss_surface(surface.as_ref());
        }
        true
    }

    fn accepts_outcome(&self) -> bool {
        self.slots.lock().state == CoordinatorState::Presenting
    }
}

/// Future of a presented surface's single outcome.
///
/// Dropping it before the outcome arrives cancels the presentation and
/// dismisses the surface.
#[must_use = "dropping a presentation cancels it"]
pub struct Presentation<S: ModalSurface, T: Send + 'static> {
    coordinator: Arc<ModalCoordinator<S, T>>,
    receiver: oneshot::Receiver<ModalResult<T>>,
}

impl<S: ModalSurface, T: Send + 'static> Presentation<S, T> {
    /// Identifier used in log lines
    pub fn id(&self) -> PresentationId {
        self.coordinator.id
    }

    /// Current lifecycle state
    pub fn state(&self) -> CoordinatorState {
        self.coordinator.state()
    }

    /// The presented surface, while it is still owned by the coordinator
    pub fn surface(&self) -> Option<Arc<S>> {
        self.coordinator.slots.lock().surface.clone()
    }

    /// Cancel the presentation. Returns `false` when already terminal.
    ///
    /// Awaiting a cancelled presentation yields [`ModalError::Cancelled`].
    pub fn cancel(&self) -> bool {
        self.coordinator.cancel()
    }
}

impl<S: ModalSurface, T: Send + 'static> Future for Presentation<S, T> {
    type Output = ModalResult<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            Poll::Ready(Err(_)) => Poll::Ready(Err(ModalError::Cancelled)),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<S: ModalSurface, T: Send + 'static> Drop for Presentation<S, T> {
    fn drop(&mut self) {
        self.coordinator.cancel();
    }
}

impl<S: ModalSurface, T: Send + 'static> fmt::Debug for Presentation<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Presentation")
            .field("id", &self.coordinator.id)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::PresentationAnchor;
    use crate::surface::SurfaceState;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingAnchor {
        presented: AtomicUsize,
    }

    impl PresentationAnchor for CountingAnchor {
        fn present(&self, _surface: &dyn ModalSurface, _animated: bool) {
            self.presented.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct Sheet {
        listener: ModalListener<u32>,
        state: Mutex<SurfaceState>,
        dismissals: AtomicUsize,
    }

    impl Sheet {
        fn new(listener: ModalListener<u32>) -> Self {
            Self {
                listener,
                state: Mutex::new(SurfaceState::Presented),
                dismissals: AtomicUsize::new(0),
            }
        }
    }

    impl ModalSurface for Sheet {
        fn kind(&self) -> SurfaceKind {
            SurfaceKind::Custom("sheet")
        }

        fn state(&self) -> SurfaceState {
            *self.state.lock()
        }

        fn dismiss(&self, _animated: bool) {
            self.dismissals.fetch_add(1, Ordering::SeqCst);
            *self.state.lock() = SurfaceState::Dismissing;
        }
    }

    #[tokio::test]
    async fn test_first_outcome_wins() {
        let anchor = Arc::new(CountingAnchor::default());
        let presenter = Presenter::anchor(&anchor);
        let presentation =
            ModalCoordinator::present(&presenter, &ModalConfig::immediate(), Sheet::new).unwrap();
        let sheet = presentation.surface().unwrap();
        assert_eq!(presentation.state(), CoordinatorState::Presenting);
        assert_eq!(anchor.presented.load(Ordering::SeqCst), 1);

        assert!(sheet.listener.resolve(1));
        assert!(!sheet.listener.resolve(2));
        assert!(!sheet.listener.is_open());
        assert_eq!(presentation.state(), CoordinatorState::Resolved);
        assert!(presentation.surface().is_none());

        assert_eq!(presentation.await.unwrap(), 1);
        assert_eq!(sheet.dismissals.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_outcome_reported_while_building_is_kept() {
        let anchor = Arc::new(CountingAnchor::default());
        let presentation = ModalCoordinator::present(
            &Presenter::anchor(&anchor),
            &ModalConfig::immediate(),
            |listener: ModalListener<u32>| {
                assert!(listener.fail(ModalError::unsupported("sheet")));
                Sheet::new(listener)
            },
        )
        .unwrap();

        assert_eq!(presentation.state(), CoordinatorState::Resolved);
        assert_eq!(anchor.presented.load(Ordering::SeqCst), 0);
        assert!(presentation.surface().is_none());
        assert!(matches!(
            presentation.await,
            Err(ModalError::Unsupported { .. })
        ));
    }

    #[test]
    fn test_missing_target_skips_surface_construction() {
        let mut built = false;
        let result = ModalCoordinator::<Sheet, u32>::present(
            &Presenter::none(),
            &ModalConfig::default(),
            |listener| {
                built = true;
                Sheet::new(listener)
            },
        );
        assert!(matches!(result, Err(ModalError::MissingPresentationTarget)));
        assert!(!built);
    }

    #[test]
    fn test_drop_cancels_and_dismisses_once() {
        let anchor = Arc::new(CountingAnchor::default());
        let presentation = ModalCoordinator::present(
            &Presenter::anchor(&anchor),
            &ModalConfig::immediate(),
            Sheet::new,
        )
        .unwrap();
        let sheet = presentation.surface().unwrap();

        drop(presentation);
        assert_eq!(sheet.dismissals.load(Ordering::SeqCst), 1);
        assert!(!sheet.listener.resolve(3));
        assert_eq!(sheet.dismissals.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_self_dismissing_surface_is_not_dismissed_again() {
        let anchor = Arc::new(CountingAnchor::default());
        let presentation = ModalCoordinator::present(
            &Presenter::anchor(&anchor),
            &ModalConfig::immediate(),
            Sheet::new,
        )
        .unwrap();
        let sheet = presentation.surface().unwrap();

        *sheet.state.lock() = SurfaceState::Dismissing;
        assert!(sheet.listener.resolve(4));
        assert_eq!(sheet.dismissals.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_listener_does_not_keep_coordinator_alive() {
        let anchor = Arc::new(CountingAnchor::default());
        let presentation = ModalCoordinator::present(
            &Presenter::anchor(&anchor),
            &ModalConfig::immediate(),
            Sheet::new,
        )
        .unwrap();
        let sheet = presentation.surface().unwrap();
        let coordinator = Arc::downgrade(&presentation.coordinator);

        drop(presentation);
        assert!(coordinator.upgrade().is_none());
        assert!(!sheet.listener.is_open());
    }
}
