//! Presenter resolution
//!
//! A [`Presenter`] is resolved at use time to the anchor a modal surface is
//! shown on. Every constructor holds its target weakly: a presenter never keeps
//! a window or an anchor alive, and resolves to nothing once they are gone.

use crate::surface::ModalSurface;
use std::fmt;
use std::sync::{Arc, Weak};

/// Host surface able to show modal surfaces on top of itself
pub trait PresentationAnchor: Send + Sync {
    /// Show `surface` on top of this anchor. Fire-and-forget.
    fn present(&self, surface: &dyn ModalSurface, animated: bool);
}

/// Top-level window owning a hierarchy of anchors
pub trait HostWindow: Send + Sync {
    /// Whether the window currently receives key input
    fn is_key(&self) -> bool;

    /// Root anchor of the window, if the window has content
    fn root_anchor(&self) -> Option<Arc<dyn PresentationAnchor>>;
}

/// View placed somewhere in a window's hierarchy
pub trait HostView: Send + Sync {
    /// Window currently containing the view, if it is attached to one
    fn window(&self) -> Option<Arc<dyn HostWindow>>;
}

/// Source of the application's connected windows
pub trait WindowSource: Send + Sync {
    /// Currently connected windows
    fn windows(&self) -> Vec<Arc<dyn HostWindow>>;
}

type Resolver = dyn Fn() -> Option<Arc<dyn PresentationAnchor>> + Send + Sync;

/// Capability yielding the anchor to present onto
#[derive(Clone)]
pub struct Presenter {
    resolve: Arc<Resolver>,
}

impl Presenter {
    /// Build a presenter from an arbitrary resolution function
    pub fn from_fn<F>(resolve: F) -> Self
    where
        F: Fn() -> Option<Arc<dyn PresentationAnchor>> + Send + Sync + 'static,
    {
        Self {
            resolve: Arc::new(resolve),
        }
    }

    /// Presenter that never resolves
    pub fn none() -> Self {
        Self::from_fn(|| None)
    }

    /// Present directly onto `anchor`, held weakly
    pub fn anchor<A>(anchor: &Arc<A>) -> Self
    where
        A: PresentationAnchor + 'static,
    {
        let anchor: Weak<A> = Arc::downgrade(anchor);
        Self::from_fn(move || {
            anchor
                .upgrade()
                .map(|anchor| anchor as Arc<dyn PresentationAnchor>)
        })
    }

    /// Present onto the root anchor of `window`, held weakly
    pub fn window<W>(window: &Arc<W>) -> Self
    where
        W: HostWindow + 'static,
    {
        let window: Weak<W> = Arc::downgrade(window);
        Self::from_fn(move || window.upgrade().and_then(|window| window.root_anchor()))
    }

    /// Present onto the root anchor of the window containing `view`, held
    /// weakly. Resolves to nothing while the view is detached.
    pub fn view<V>(view: &Arc<V>) -> Self
    where
        V: HostView + 'static,
    {
        let view: Weak<V> = Arc::downgrade(view);
        Self::from_fn(move || view.upgrade()?.window()?.root_anchor())
    }

    /// Present onto the root anchor of the key window found in `source`
    ///
    /// Several key windows usually mean a more specific presenter is needed;
    /// the first one wins and a warning is logged.
    pub fn key_window<S>(source: &Arc<S>) -> Self
    where
        S: WindowSource + 'static,
    {
        let source: Weak<S> = Arc::downgrade(source);
        Self::from_fn(move || {
            let source = source.upgrade()?;
            let mut key_windows = source.windows().into_iter().filter(|w| w.is_key());
            let window = key_windows.next()?;
            let extra = key_windows.count();
            if extra > 0 {
                tracing::warn!(
                    extra_key_windows = extra,
                    "Several key windows found; presenting on the first one"
                );
            }
            window.root_anchor()
        })
    }

    /// Resolve the anchor to present onto right now
    pub fn resolve(&self) -> Option<Arc<dyn PresentationAnchor>> {
        (self.resolve)()
    }
}

impl fmt::Debug for Presenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Presenter").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{SurfaceKind, SurfaceState};

    struct Anchor;

    impl PresentationAnchor for Anchor {
        fn present(&self, _surface: &dyn ModalSurface, _animated: bool) {}
    }

    struct Window {
        key: bool,
        root: Option<Arc<Anchor>>,
    }

    impl HostWindow for Window {
        fn is_key(&self) -> bool {
            self.key
        }

        fn root_anchor(&self) -> Option<Arc<dyn PresentationAnchor>> {
            self.root
                .clone()
                .map(|anchor| anchor as Arc<dyn PresentationAnchor>)
        }
    }

    struct View(Option<Arc<dyn HostWindow>>);

    impl HostView for View {
        fn window(&self) -> Option<Arc<dyn HostWindow>> {
            self.0.clone()
        }
    }

    struct Windows(Vec<Arc<dyn HostWindow>>);

    impl WindowSource for Windows {
        fn windows(&self) -> Vec<Arc<dyn HostWindow>> {
            self.0.clone()
        }
    }

    struct Inert;

    impl ModalSurface for Inert {
        fn kind(&self) -> SurfaceKind {
            SurfaceKind::Alert
        }

        fn state(&self) -> SurfaceState {
            SurfaceState::Detached
        }

        fn dismiss(&self, _animated: bool) {}
    }

    #[test]
    fn test_anchor_presenter_does_not_keep_anchor_alive() {
        let anchor = Arc::new(Anchor);
        let presenter = Presenter::anchor(&anchor);
        assert!(presenter.resolve().is_some());
        assert_eq!(Arc::strong_count(&anchor), 1);

        drop(anchor);
        assert!(presenter.resolve().is_none());
    }

    #[test]
    fn test_window_presenter_uses_root_anchor() {
        let window = Arc::new(Window {
            key: true,
            root: Some(Arc::new(Anchor)),
        });
        let presenter = Presenter::window(&window);
        let anchor = presenter.resolve().unwrap();
        anchor.present(&Inert, false);

        let empty = Arc::new(Window {
            key: true,
            root: None,
        });
        assert!(Presenter::window(&empty).resolve().is_none());
    }

    #[test]
    fn test_view_presenter_resolves_through_its_window() {
        let window: Arc<dyn HostWindow> = Arc::new(Window {
            key: false,
            root: Some(Arc::new(Anchor)),
        });
        let view = Arc::new(View(Some(window.clone())));
        let presenter = Presenter::view(&view);
        assert!(presenter.resolve().is_some());
        assert_eq!(Arc::strong_count(&view), 1);

        let detached = Arc::new(View(None));
        assert!(Presenter::view(&detached).resolve().is_none());

        drop(view);
        assert!(presenter.resolve().is_none());
    }

    #[test]
    fn test_key_window_presenter_skips_background_windows() {
        let background: Arc<dyn HostWindow> = Arc::new(Window {
            key: false,
            root: Some(Arc::new(Anchor)),
        });
        let source = Arc::new(Windows(vec![background.clone()]));
        assert!(Presenter::key_window(&source).resolve().is_none());

        let key: Arc<dyn HostWindow> = Arc::new(Window {
            key: true,
            root: Some(Arc::new(Anchor)),
        });
        let source = Arc::new(Windows(vec![background, key]));
        assert!(Presenter::key_window(&source).resolve().is_some());
    }

    #[test]
    fn test_none_presenter() {
        assert!(Presenter::none().resolve().is_none());
    }
}
