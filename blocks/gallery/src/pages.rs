use lambda_http::{http::StatusCode, Body, Error, Response};
use serde::Serialize;
use universeex_atoms::query::{self, Location};
use universeex_shared::AppState;

use crate::controller::{FilterController, FilterEdit, Navigator};
use crate::pipeline::load_gallery;
use crate::render::{self, GALLERY_PATH, PHOTO_KEY};
use crate::types::GalleryError;

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

/// Holds the one location a controller commit navigates to.
#[derive(Default)]
struct Redirect(Option<Location>);

impl Navigator for Redirect {
    fn navigate(&mut self, location: Location) {
        self.0 = Some(location);
    }
}

fn error_status(err: &GalleryError) -> (StatusCode, &'static str) {
    match err {
        GalleryError::InvalidPage(_) => (StatusCode::BAD_REQUEST, "InvalidPage"),
        GalleryError::Fetch(_) => (StatusCode::BAD_GATEWAY, "RemoteFetchError"),
    }
}

/// HTTP Handler: GET /
pub async fn gallery_page_handler(
    state: &AppState,
    location: &Location,
) -> Result<Response<Body>, Error> {
    let filter = query::decode(location);
    let selected = location.get(PHOTO_KEY).and_then(|id| id.trim().parse::<u64>().ok());

    match load_gallery(state.photos.as_ref(), filter.clone()).await {
        Ok(page) => Ok(Response::builder()
            .status(StatusCode::OK)
            .header("Content-Type", "text/html; charset=utf-8")
            .header("Access-Control-Allow-Origin", "*")
            .body(render::render_gallery(&page, selected)?.into())
            .map_err(Box::new)?),
        Err(e) => {
            tracing::error!("Gallery render failed: {}", e);
            let (status, _) = error_status(&e);
            Ok(Response::builder()
                .status(status)
                .header("Content-Type", "text/html; charset=utf-8")
                .header("Access-Control-Allow-Origin", "*")
                .body(render::render_error(&filter, &e.to_string())?.into())
                .map_err(Box::new)?)
        }
    }
}

/// HTTP Handler: GET /api/photos
pub async fn photos_json_handler(
    state: &AppState,
    location: &Location,
) -> Result<Response<Body>, Error> {
    let filter = query::decode(location);

    match load_gallery(state.photos.as_ref(), filter).await {
        Ok(page) => Ok(Response::builder()
            .status(StatusCode::OK)
            .header("Content-Type", "application/json")
            .header("Access-Control-Allow-Origin", "*")
            .body(serde_json::to_string(&page)?.into())
            .map_err(Box::new)?),
        Err(e) => {
            tracing::error!("Photo listing failed: {}", e);
            let (status, code) = error_status(&e);
            let error = ErrorResponse {
                error: code.to_string(),
                message: e.to_string(),
            };
            Ok(Response::builder()
                .status(status)
                .header("Content-Type", "application/json")
                .header("Access-Control-Allow-Origin", "*")
                .body(serde_json::to_string(&error)?.into())
                .map_err(Box::new)?)
        }
    }
}

/// HTTP Handler: GET /navigate?{current location}&edit={field}&value={new value}
///
/// Runs one filter edit through the controller and redirects to the new location.
pub async fn navigate_handler(location: &Location) -> Result<Response<Body>, Error> {
    // `edit` / `value` / `photo` are not filter keys, so decode skips them
    let current = query::decode(location);
    let edit = location
        .get("edit")
        .and_then(|field| FilterEdit::parse(field, location.get("value").unwrap_or_default()));

    let Some(edit) = edit else {
        let error = ErrorResponse {
            error: "InvalidEdit".to_string(),
            message: "Expected edit=rover|camera|date|q|page with a value".to_string(),
        };
        return Ok(Response::builder()
            .status(StatusCode::BAD_REQUEST)
            .header("Content-Type", "application/json")
            .header("Access-Control-Allow-Origin", "*")
            .body(serde_json::to_string(&error)?.into())
            .map_err(Box::new)?);
    };

    let mut controller = FilterController::new(current.clone(), Redirect::default());
    controller.apply(edit);

    // No commit (e.g. Prev on page 1): stay where we are
    let target = controller
        .into_navigator()
        .0
        .unwrap_or_else(|| query::encode(&current, query::EncodeIntent::PageNavigation));
    let href = target.to_href(GALLERY_PATH);
    tracing::info!("Redirecting to {}", href);

    Ok(Response::builder()
        .status(StatusCode::SEE_OTHER)
        .header("Location", href)
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::Empty)
        .map_err(Box::new)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::tests::{batch_of, mixed_ten, StubSource};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use universeex_atoms::photos::FetchError;
    use universeex_shared::Config;

    fn state_with(source: StubSource) -> AppState {
        AppState::with_source(Config::default(), Arc::new(source))
    }

    fn body_text(resp: &Response<Body>) -> String {
        match resp.body() {
            Body::Text(text) => text.clone(),
            Body::Binary(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            Body::Empty => String::new(),
        }
    }

    fn location_header(resp: &Response<Body>) -> String {
        resp.headers()
            .get("Location")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }

    #[tokio::test]
    async fn gallery_page_renders_photos() {
        let state = state_with(StubSource::returning(batch_of(25)));
        let resp = gallery_page_handler(&state, &Location::default()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let html = body_text(&resp);
        assert_eq!(html.matches(r#"<li class="photo">"#).count(), 25);
        assert!(html.contains(r#"<a class="next""#));
    }

    #[tokio::test]
    async fn gallery_page_opens_selected_photo() {
        let state = state_with(StubSource::returning(batch_of(3)));
        let resp = gallery_page_handler(&state, &Location::from_query("photo=2"))
            .await
            .unwrap();
        assert!(body_text(&resp).contains(r#"class="viewer""#));
    }

    #[tokio::test]
    async fn invalid_page_is_a_bad_request() {
        let state = state_with(StubSource::returning(batch_of(3)));
        let resp = gallery_page_handler(&state, &Location::from_query("page=abc"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(&resp).contains("Invalid page number"));
    }

    #[tokio::test]
    async fn remote_failure_is_a_bad_gateway() {
        let state = state_with(StubSource::failing(FetchError::Status {
            status: 503,
            status_text: "Service Unavailable".to_string(),
        }));
        let resp = gallery_page_handler(&state, &Location::default()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        assert!(body_text(&resp).contains("NASA API error: 503 Service Unavailable"));
    }

    #[tokio::test]
    async fn json_listing_reports_refined_photos_and_raw_continuation() {
        let state = state_with(StubSource::returning(mixed_ten()));
        let resp = photos_json_handler(&state, &Location::from_query("q=navcam"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body_text(&resp)).unwrap();
        assert_eq!(json["photos"].as_array().map(Vec::len), Some(3));
        assert_eq!(json["has_next"], serde_json::json!(false));
        assert_eq!(json["fetched_count"], serde_json::json!(10));
        assert_eq!(json["filter"]["search"], serde_json::json!("navcam"));
        assert_eq!(json["filter"]["page"], serde_json::json!(1));
    }

    #[tokio::test]
    async fn json_listing_reports_invalid_page() {
        let state = state_with(StubSource::returning(batch_of(1)));
        let resp = photos_json_handler(&state, &Location::from_query("page=0"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(&resp).contains("InvalidPage"));
    }

    #[tokio::test]
    async fn camera_edit_redirects_without_page() {
        let location = Location::from_query("camera=NAVCAM&page=3&edit=camera&value=FHAZ");
        let resp = navigate_handler(&location).await.unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location_header(&resp), "/?camera=FHAZ");
    }

    #[tokio::test]
    async fn page_edit_keeps_filters() {
        let location = Location::from_query("rover=spirit&q=pan&page=2&edit=page&value=1");
        let resp = navigate_handler(&location).await.unwrap();
        assert_eq!(location_header(&resp), "/?rover=spirit&q=pan&page=3");
    }

    #[tokio::test]
    async fn prev_on_first_page_stays_put() {
        let location = Location::from_query("rover=spirit&edit=page&value=-1");
        let resp = navigate_handler(&location).await.unwrap();
        assert_eq!(location_header(&resp), "/?rover=spirit");
    }

    #[tokio::test]
    async fn clearing_every_filter_lands_on_root() {
        let location = Location::from_query("q=mast&edit=q&value=");
        let resp = navigate_handler(&location).await.unwrap();
        assert_eq!(location_header(&resp), "/");
    }

    #[tokio::test]
    async fn unknown_edit_is_rejected() {
        let location = Location::from_query("edit=color&value=red");
        let resp = navigate_handler(&location).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
