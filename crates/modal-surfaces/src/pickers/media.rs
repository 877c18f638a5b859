//! Media library picker
//!
//! Presenting the picker is gated on the media library authorization: the
//! status is resolved first (prompting the user only when it was never
//! determined) and the picker is shown only for `Authorized` or `Restricted`.
//! Any other status fails with [`ModalError::AuthorizationDenied`] carrying
//! [`MediaLibraryAuthorizationStatus`].

use modal_core::{
    require_authorized, resolve_authorization, AuthorizationSource, AuthorizationStatus,
    ModalConfig, ModalCoordinator, ModalDescribe, ModalListener, ModalResult, ModalSurface,
    Presenter,
};

/// Statuses under which the picker may be presented
pub const MEDIA_PICKER_ACCEPTED: [MediaLibraryAuthorizationStatus; 2] = [
    MediaLibraryAuthorizationStatus::Authorized,
    MediaLibraryAuthorizationStatus::Restricted,
];

/// Access the user granted to the media library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaLibraryAuthorizationStatus {
    /// The user was never asked
    NotDetermined,
    /// The user refused access
    Denied,
    /// Access is limited by policy
    Restricted,
    /// Full access
    Authorized,
}

impl AuthorizationStatus for MediaLibraryAuthorizationStatus {
    fn is_not_determined(&self) -> bool {
        matches!(self, Self::NotDetermined)
    }
}

impl ModalDescribe for MediaLibraryAuthorizationStatus {
    fn modal_description(&self) -> String {
        match self {
            Self::NotDetermined => ".notDetermined",
            Self::Denied => ".denied",
            Self::Restricted => ".restricted",
            Self::Authorized => ".authorized",
        }
        .to_string()
    }
}

/// Kinds of media offered by the picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MediaType {
    /// Everything in the library
    #[default]
    Any,
    /// Songs
    Music,
    /// Podcast episodes
    Podcast,
    /// Audio books
    AudioBook,
    /// Movies, TV shows and music videos
    Video,
}

/// Presentation options of the media picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPickerOptions {
    /// Kinds of media offered
    pub media_type: MediaType,
    /// Allow picking several items
    pub allows_multiple_selection: bool,
    /// Show items not downloaded to the device
    pub shows_cloud_items: bool,
    /// Prompt displayed above the list
    pub prompt: Option<String>,
}

impl Default for MediaPickerOptions {
    fn default() -> Self {
        Self {
            media_type: MediaType::Any,
            allows_multiple_selection: false,
            shows_cloud_items: true,
            prompt: None,
        }
    }
}

/// Item of the media library
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    /// Library identifier of the item
    pub persistent_id: u64,
    /// Title, when known
    pub title: Option<String>,
    /// Artist, when known
    pub artist: Option<String>,
}

/// Items picked by the user, possibly none
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaItemCollection {
    items: Vec<MediaItem>,
}

impl MediaItemCollection {
    /// Collection of `items`
    pub fn new(items: Vec<MediaItem>) -> Self {
        Self { items }
    }

    /// Collection without items
    pub fn empty() -> Self {
        Self::default()
    }

    /// Picked items
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    /// Number of picked items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing was picked
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ModalDescribe for MediaItemCollection {
    fn modal_description(&self) -> String {
        let titles: Vec<String> = self
            .items
            .iter()
            .map(|item| match &item.title {
                Some(title) => format!("{title:?}"),
                None => format!("#{}", item.persistent_id),
            })
            .collect();
        format!("MediaItemCollection([{}])", titles.join(", "))
    }
}

/// Completion callbacks of a media picker
#[derive(Debug, Clone)]
pub struct MediaPickerDelegate {
    listener: ModalListener<MediaItemCollection>,
}

impl MediaPickerDelegate {
    /// The user picked `collection`
    pub fn did_pick(&self, collection: MediaItemCollection) -> bool {
        self.listener.resolve(collection)
    }

    /// The user closed the picker; resolves to an empty collection
    pub fn did_cancel(&self) -> bool {
        self.listener.resolve(MediaItemCollection::empty())
    }
}

/// Host able to show a media library picker
pub trait MediaPickerHost: Send + Sync {
    /// Platform picker surface
    type Surface: ModalSurface;

    /// Build the picker for `options`
    fn make_media_picker(
        &self,
        options: MediaPickerOptions,
        delegate: MediaPickerDelegate,
    ) -> Self::Surface;
}

/// Media library authorization, prompting the user only when undetermined
pub async fn media_library_authorization_status<A>(library: &A) -> MediaLibraryAuthorizationStatus
where
    A: AuthorizationSource<Status = MediaLibraryAuthorizationStatus> + ?Sized,
{
    resolve_authorization(library).await
}

/// Present the media picker once the library authorization allows it
pub async fn media_picker<H, A>(
    host: &H,
    library: &A,
    presenter: &Presenter,
    config: &ModalConfig,
    options: MediaPickerOptions,
) -> ModalResult<MediaItemCollection>
where
    H: MediaPickerHost + ?Sized,
    A: AuthorizationSource<Status = MediaLibraryAuthorizationStatus> + ?Sized,
{
    require_authorized(library, &MEDIA_PICKER_ACCEPTED, || async move {
        ModalCoordinator::present(presenter, config, |listener| {
            host.make_media_picker(options, MediaPickerDelegate { listener })
        })?
        .await
    })
    .await
}
