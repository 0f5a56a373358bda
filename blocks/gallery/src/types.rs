use serde::Serialize;
use thiserror::Error;
use universeex_atoms::photos::{FetchError, PhotoRecord};
use universeex_atoms::query::FilterState;

// ========== GALLERY PAGE ==========
/// One rendered result: the filter it was built from, the refined photos and
/// whether the "next" control is enabled.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct GalleryPage {
    pub filter: FilterState,
    pub photos: Vec<PhotoRecord>,
    pub has_next: bool,
    /// Size of the batch before the search term was applied
    pub fetched_count: usize,
}

// ========== ERRORS ==========
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GalleryError {
    #[error("Invalid page number: {0:?}")]
    InvalidPage(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}
