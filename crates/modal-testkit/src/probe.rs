//! Probe surfaces
//!
//! A [`SurfaceProbe`] is the test's view of a surface owned by a coordinator:
//! it stays readable after the coordinator released the surface.

use modal_core::{ModalError, ModalListener, ModalResult, ModalSurface, SurfaceKind, SurfaceState};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared state of a mock surface
#[derive(Debug)]
pub struct SurfaceProbe {
    kind: SurfaceKind,
    state: Mutex<SurfaceState>,
    dismissals: AtomicUsize,
    last_animated: Mutex<Option<bool>>,
}

impl SurfaceProbe {
    /// Probe of an on-screen surface of `kind`
    pub fn new(kind: SurfaceKind) -> Arc<Self> {
        Arc::new(Self {
            kind,
            state: Mutex::new(SurfaceState::Presented),
            dismissals: AtomicUsize::new(0),
            last_animated: Mutex::new(None),
        })
    }

    /// Surface kind
    pub fn kind(&self) -> SurfaceKind {
        self.kind
    }

    /// Current state
    pub fn state(&self) -> SurfaceState {
        *self.state.lock()
    }

    /// Override the state, e.g. to simulate a platform-initiated dismissal
    pub fn set_state(&self, state: SurfaceState) {
        *self.state.lock() = state;
    }

    /// Simulate the platform dismissing the surface on its own
    pub fn begin_self_dismissal(&self) {
        self.set_state(SurfaceState::Dismissing);
    }

    /// Number of `dismiss` calls received
    pub fn dismissals(&self) -> usize {
        self.dismissals.load(Ordering::SeqCst)
    }

    /// Animation flag of the last `dismiss` call
    pub fn last_dismiss_animated(&self) -> Option<bool> {
        *self.last_animated.lock()
    }

    fn record_dismiss(&self, animated: bool) {
        self.dismissals.fetch_add(1, Ordering::SeqCst);
        *self.last_animated.lock() = Some(animated);
        self.set_state(SurfaceState::Dismissed);
    }
}

/// Surface backed by a [`SurfaceProbe`]
#[derive(Debug, Clone)]
pub struct ProbeSurface {
    probe: Arc<SurfaceProbe>,
}

impl ProbeSurface {
    /// Surface reporting to `probe`
    pub fn new(probe: Arc<SurfaceProbe>) -> Self {
        Self { probe }
    }

    /// Shared probe
    pub fn probe(&self) -> &Arc<SurfaceProbe> {
        &self.probe
    }
}

impl ModalSurface for ProbeSurface {
    fn kind(&self) -> SurfaceKind {
        self.probe.kind()
    }

    fn state(&self) -> SurfaceState {
        self.probe.state()
    }

    fn dismiss(&self, animated: bool) {
        self.probe.record_dismiss(animated);
    }
}

/// Surface holding its own listener, driven directly by the test
pub struct MockSurface<T> {
    listener: ModalListener<T>,
    probe: Arc<SurfaceProbe>,
}

impl<T> MockSurface<T> {
    /// Surface of kind `Custom("mock")`; usable as a builder: `MockSurface::new`
    pub fn new(listener: ModalListener<T>) -> Self {
        Self::with_kind(SurfaceKind::Custom("mock"), listener)
    }

    /// Surface of the given kind
    pub fn with_kind(kind: SurfaceKind, listener: ModalListener<T>) -> Self {
        Self {
            listener,
            probe: SurfaceProbe::new(kind),
        }
    }

    /// Shared probe
    pub fn probe(&self) -> Arc<SurfaceProbe> {
        self.probe.clone()
    }

    /// Listener handed to the surface
    pub fn listener(&self) -> ModalListener<T> {
        self.listener.clone()
    }

    /// Fire the delegate with `outcome`
    pub fn fire(&self, outcome: ModalResult<T>) -> bool {
        self.listener.complete(outcome)
    }

    /// Fire the delegate with a value
    pub fn resolve(&self, value: T) -> bool {
        self.listener.resolve(value)
    }

    /// Fire the delegate with an error
    pub fn fail(&self, error: ModalError) -> bool {
        self.listener.fail(error)
    }
}

impl<T: Send + 'static> ModalSurface for MockSurface<T> {
    fn kind(&self) -> SurfaceKind {
        self.probe.kind()
    }

    fn state(&self) -> SurfaceState {
        self.probe.state()
    }

    fn dismiss(&self, animated: bool) {
        self.probe.record_dismiss(animated);
    }
}
