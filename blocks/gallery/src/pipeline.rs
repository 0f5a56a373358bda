use universeex_atoms::catalog::is_camera_for_rover;
use universeex_atoms::photos::{self, PhotoSource};
use universeex_atoms::query::{FilterState, PageNumber};

use crate::types::{GalleryError, GalleryPage};

/// decode → **fetch** → refine → estimate.
///
/// `filter` is the already-decoded location. The continuation flag is taken
/// from the batch as fetched, so a search that hides every photo can still
/// leave "next" enabled.
pub async fn load_gallery(
    source: &dyn PhotoSource,
    filter: FilterState,
) -> Result<GalleryPage, GalleryError> {
    if let PageNumber::Invalid(raw) = filter.page() {
        tracing::warn!("Rejecting invalid page value {:?}", raw);
        return Err(GalleryError::InvalidPage(raw.clone()));
    }

    if let Some(camera) = filter.camera() {
        if !is_camera_for_rover(filter.rover(), camera) {
            // Sent anyway; the API answers with an empty batch
            tracing::warn!("Camera {} is not listed for rover {}", camera, filter.rover());
        }
    }

    let batch = source.fetch_page(&filter).await?;
    let fetched_count = batch.len();
    let has_next = photos::has_next(&batch);
    let photos = photos::refine(batch, filter.search());

    tracing::info!(
        "Gallery loaded - fetched: {} shown: {} has_next: {}",
        fetched_count,
        photos.len(),
        has_next
    );

    Ok(GalleryPage {
        filter,
        photos,
        has_next,
        fetched_count,
    })
}
