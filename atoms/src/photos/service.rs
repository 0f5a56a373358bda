use url::Url;

use super::model::{FetchError, PhotoRecord, PhotosResponse};
use crate::query::FilterState;

/// The API's usual page size. A batch this big is taken to mean "there may be more".
pub const PAGE_SIZE_THRESHOLD: usize = 25;

/// Build `{base}/{rover}/photos?earth_date=..[&camera=..]&page=..&api_key=..`
pub fn build_photos_url(
    base: &str,
    filter: &FilterState,
    api_key: &str,
) -> Result<Url, FetchError> {
    let page = filter.page().get().ok_or_else(|| {
        FetchError::InvalidRequest(format!(
            "page {:?} is not a positive integer",
            filter.page().to_string()
        ))
    })?;

    let mut url = Url::parse(base)
        .map_err(|e| FetchError::InvalidRequest(format!("bad base url {}: {}", base, e)))?;

    url.path_segments_mut()
        .map_err(|_| FetchError::InvalidRequest(format!("base url {} cannot take a path", base)))?
        .pop_if_empty()
        .push(filter.rover().as_str())
        .push("photos");

    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("earth_date", filter.date());
        if let Some(camera) = filter.camera() {
            pairs.append_pair("camera", camera);
        }
        pairs.append_pair("page", &page.to_string());
        pairs.append_pair("api_key", api_key);
    }

    Ok(url)
}

/// Parse the `photos` array of a response body into records.
pub fn parse_photos(body: &str) -> Result<Vec<PhotoRecord>, FetchError> {
    let response: PhotosResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;
    Ok(response.photos.into_iter().map(PhotoRecord::from).collect())
}

/// Keep records whose rover name, camera code or camera full name contains
/// `term` (case-insensitive). No term, or an empty one, keeps everything.
pub fn refine(records: Vec<PhotoRecord>, term: Option<&str>) -> Vec<PhotoRecord> {
    let needle = match term {
        Some(t) if !t.is_empty() => t.to_lowercase(),
        _ => return records,
    };

    records
        .into_iter()
        .filter(|record| matches_term(record, &needle))
        .collect()
}

fn matches_term(record: &PhotoRecord, needle: &str) -> bool {
    [
        &record.rover_name,
        &record.camera_name,
        &record.camera_full_name,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

/// Continuation heuristic over the batch *as fetched* (before `refine`).
/// The API has no total count, so a last page of exactly 25 still reports `true`.
pub fn has_next(records: &[PhotoRecord]) -> bool {
    records.len() >= PAGE_SIZE_THRESHOLD
}
