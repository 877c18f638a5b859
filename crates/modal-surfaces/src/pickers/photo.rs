//! Photo library picker

use modal_core::{
    ModalConfig, ModalCoordinator, ModalDescribe, ModalListener, ModalResult, ModalSurface,
    Presenter,
};

/// Kind of assets offered by the photo picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhotoPickerFilter {
    /// Still images
    Images,
    /// Videos
    Videos,
    /// Live photos
    LivePhotos,
}

/// Configuration of the photo picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoPickerConfiguration {
    /// Maximum number of assets; `0` means unlimited
    pub selection_limit: usize,
    /// Assets offered; `None` offers everything
    pub filter: Option<PhotoPickerFilter>,
}

impl Default for PhotoPickerConfiguration {
    fn default() -> Self {
        Self {
            selection_limit: 1,
            filter: None,
        }
    }
}

impl PhotoPickerConfiguration {
    /// Allow picking any number of assets
    pub fn unlimited() -> Self {
        Self {
            selection_limit: 0,
            ..Self::default()
        }
    }

    /// Restrict the assets offered
    pub fn filter(mut self, filter: PhotoPickerFilter) -> Self {
        self.filter = Some(filter);
        self
    }
}

/// Asset picked in the photo picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoPickerResult {
    /// Library identifier, when the picker has library access
    pub asset_identifier: Option<String>,
    /// Uniform type identifiers the asset can be loaded as
    pub type_identifiers: Vec<String>,
}

impl ModalDescribe for PhotoPickerResult {
    fn modal_description(&self) -> String {
        match &self.asset_identifier {
            Some(id) => format!("PhotoPickerResult({id})"),
            None => format!("PhotoPickerResult({})", self.type_identifiers.join("|")),
        }
    }
}

/// Completion callback of a photo picker
#[derive(Debug, Clone)]
pub struct PhotoPickerDelegate {
    listener: ModalListener<Vec<PhotoPickerResult>>,
}

impl PhotoPickerDelegate {
    /// The picker closed with `results`; empty when the user cancelled
    pub fn did_finish_picking(&self, results: Vec<PhotoPickerResult>) -> bool {
        self.listener.resolve(results)
    }
}

/// Host able to show a photo picker
pub trait PhotoPickerHost: Send + Sync {
    /// Platform picker surface
    type Surface: ModalSurface;

    /// Build the picker for `configuration`
    fn make_photo_picker(
        &self,
        configuration: PhotoPickerConfiguration,
        delegate: PhotoPickerDelegate,
    ) -> Self::Surface;
}

/// Present the photo picker and await the picked assets
pub async fn photo_picker<H>(
    host: &H,
    presenter: &Presenter,
    config: &ModalConfig,
    configuration: PhotoPickerConfiguration,
) -> ModalResult<Vec<PhotoPickerResult>>
where
    H: PhotoPickerHost + ?Sized,
{
    ModalCoordinator::present(presenter, config, |listener| {
        host.make_photo_picker(configuration, PhotoPickerDelegate { listener })
    })?
    .await
}
