//! The gallery feature: the decode → fetch → refine → estimate pipeline,
//! the filter controller, HTML rendering and the HTTP handlers tying them
//! together.

pub mod controller;
pub mod pages;
pub mod pipeline;
pub mod render;
pub mod types;

pub use controller::{FilterController, FilterEdit, Navigator};
pub use pages::{gallery_page_handler, navigate_handler, photos_json_handler};
pub use pipeline::load_gallery;
pub use types::{GalleryError, GalleryPage};
