//! Dialog presentation styles

use modal_core::SurfaceKind;

/// Rectangle in the source view's coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Origin x
    pub x: f64,
    /// Origin y
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Rect {
    /// Rectangle at the origin with the given size
    pub fn with_size(width: f64, height: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
        }
    }
}

/// Element an action sheet points at on hosts that render it as a popover
#[derive(Debug, Clone, PartialEq)]
pub enum DialogSource {
    /// A view, identified by the host, and a rectangle inside it
    View {
        /// Host identifier of the view
        view: String,
        /// Rectangle inside the view
        rect: Rect,
    },
    /// A toolbar / navigation bar button, identified by the host
    BarButtonItem {
        /// Host identifier of the item
        item: String,
    },
}

impl DialogSource {
    /// Point at the whole bounds of a view
    pub fn bounds(view: impl Into<String>, width: f64, height: f64) -> Self {
        Self::View {
            view: view.into(),
            rect: Rect::with_size(width, height),
        }
    }

    /// Point at a bar button item
    pub fn bar_button_item(item: impl Into<String>) -> Self {
        Self::BarButtonItem { item: item.into() }
    }
}

/// How a dialog is presented
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DialogStyle {
    /// Centered alert
    #[default]
    Alert,
    /// Action sheet anchored to `source`
    ActionSheet {
        /// Popover source
        source: DialogSource,
    },
}

impl DialogStyle {
    /// Surface kind rendered for this style
    pub fn kind(&self) -> SurfaceKind {
        match self {
            Self::Alert => SurfaceKind::Alert,
            Self::ActionSheet { .. } => SurfaceKind::ActionSheet,
        }
    }
}
