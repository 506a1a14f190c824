//! Resource-level helpers on top of the raw clients.

mod browse;
mod images;
mod resource;

pub use browse::BrowseParams;
pub use images::{ImageUpload, ImagesApi, mime_for};
pub use resource::{AdminResource, ContentResource};
