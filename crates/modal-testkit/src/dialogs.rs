//! Mock dialog renderer
//!
//! Records every dialog it renders and lets the test act as the user:
//! [`tap`](MockDialogRenderer::tap) picks an action of the most recently
//! rendered dialog.

use crate::probe::{ProbeSurface, SurfaceProbe};
use modal_dialogs::{DialogDelegate, DialogDescriptor, DialogRenderer};
use parking_lot::Mutex;
use std::sync::Arc;

type Select = Arc<dyn Fn(usize, Vec<String>) -> bool + Send + Sync>;

struct RenderedDialog {
    descriptor: DialogDescriptor,
    select: Select,
    probe: Arc<SurfaceProbe>,
}

/// Renderer standing in for the platform's alert controller
#[derive(Default)]
pub struct MockDialogRenderer {
    rendered: Mutex<Vec<RenderedDialog>>,
    dismiss_on_tap: bool,
}

impl MockDialogRenderer {
    /// Renderer whose dialogs wait for the coordinator to dismiss them
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer whose dialogs start dismissing themselves when tapped, like
    /// platform alert controllers do
    pub fn dismissing_on_tap() -> Self {
        Self {
            dismiss_on_tap: true,
            ..Self::default()
        }
    }

    /// Number of dialogs rendered so far
    pub fn rendered(&self) -> usize {
        self.rendered.lock().len()
    }

    /// Descriptor of the most recent dialog
    pub fn last_descriptor(&self) -> Option<DialogDescriptor> {
        self.rendered
            .lock()
            .last()
            .map(|dialog| dialog.descriptor.clone())
    }

    /// Probe of the most recent dialog's surface
    pub fn last_probe(&self) -> Option<Arc<SurfaceProbe>> {
        self.rendered.lock().last().map(|dialog| dialog.probe.clone())
    }

    /// Tap the action at `index` with empty field texts
    pub fn tap(&self, index: usize) -> bool {
        let fields = self
            .last_descriptor()
            .map(|descriptor| vec![String::new(); descriptor.text_fields.len()])
            .unwrap_or_default();
        self.tap_with_fields(index, fields)
    }

    /// Tap the action titled `title`
    ///
    /// # Panics
    ///
    /// When no rendered dialog has an action with that title.
    pub fn tap_title(&self, title: &str) -> bool {
        let index = self
            .last_descriptor()
            .and_then(|descriptor| descriptor.action_index(title))
            .unwrap_or_else(|| panic!("no action titled {title:?}"));
        self.tap(index)
    }

    /// Type `fields` into the text fields and tap the action at `index`
    pub fn tap_with_fields(&self, index: usize, fields: Vec<String>) -> bool {
        let Some((select, probe)) = self
            .rendered
            .lock()
            .last()
            .map(|dialog| (dialog.select.clone(), dialog.probe.clone()))
        else {
            return false;
        };
        if self.dismiss_on_tap {
            probe.begin_self_dismissal();
        }
        select(index, fields)
    }
}

impl DialogRenderer for MockDialogRenderer {
    type Surface = ProbeSurface;

    fn make_dialog<V: Send + 'static>(
        &self,
        descriptor: DialogDescriptor,
        delegate: DialogDelegate<V>,
    ) -> ProbeSurface {
        let probe = SurfaceProbe::new(descriptor.kind());
        self.rendered.lock().push(RenderedDialog {
            descriptor,
            select: Arc::new(move |index, fields| delegate.did_select(index, fields)),
            probe: probe.clone(),
        });
        ProbeSurface::new(probe)
    }
}
