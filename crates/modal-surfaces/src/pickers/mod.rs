//! Media library and photo pickers

pub mod media;
pub mod photo;

pub use media::{
    media_library_authorization_status, media_picker, MediaItem, MediaItemCollection,
    MediaLibraryAuthorizationStatus, MediaPickerDelegate, MediaPickerHost, MediaPickerOptions,
    MediaType, MEDIA_PICKER_ACCEPTED,
};
pub use photo::{
    photo_picker, PhotoPickerConfiguration, PhotoPickerDelegate, PhotoPickerFilter,
    PhotoPickerHost, PhotoPickerResult,
};
