use gallery_block::{gallery_page_handler, navigate_handler, photos_json_handler};
use lambda_http::{
    http::{Method, StatusCode},
    Body, Error, Request, RequestExt, Response,
};
use std::sync::Arc;
use universeex_atoms::query::Location;
use universeex_shared::AppState;

use lambda_http::http::header::HeaderValue;

fn with_cors_headers(mut resp: Response<Body>) -> Response<Body> {
    let headers = resp.headers_mut();
    headers.insert("Access-Control-Allow-Origin", HeaderValue::from_static("*"));
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static("GET,OPTIONS"),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static("Content-Type"),
    );
    resp
}

fn finalize_response(resp: Result<Response<Body>, Error>) -> Result<Response<Body>, Error> {
    resp.map(with_cors_headers)
}

/// Query component of the request as an ordered location.
/// API Gateway puts the query in the URI; the parsed map is the fallback.
fn location_from_request(event: &Request) -> Location {
    if let Some(raw) = event.uri().query() {
        return Location::from_query(raw);
    }
    let params = event.query_string_parameters();
    Location::from_pairs(params.iter().map(|(k, v)| (k.to_string(), v.to_string())))
}

/// Main Lambda handler - routes gallery, navigation and JSON requests
pub(crate) async fn function_handler(
    event: Request,
    state: Arc<AppState>,
) -> Result<Response<Body>, Error> {
    let method = event.method();
    let path = event.uri().path();
    tracing::info!("🚀 Gallery Lambda invoked - Method: {} Path: {}", method, path);

    // Handle CORS preflight
    if method == Method::OPTIONS {
        let resp = Response::builder()
            .status(StatusCode::OK)
            .body(Body::Empty)
            .map_err(Box::new)?;
        return Ok(with_cors_headers(resp));
    }

    if method != Method::GET {
        let resp = Response::builder()
            .status(StatusCode::METHOD_NOT_ALLOWED)
            .header("Content-Type", "application/json")
            .body(
                serde_json::json!({"error": "Method not allowed"})
                    .to_string()
                    .into(),
            )
            .map_err(Box::new)?;
        return finalize_response(Ok(resp));
    }

    let location = location_from_request(&event);

    match path {
        "" | "/" => finalize_response(gallery_page_handler(&state, &location).await),
        "/navigate" => finalize_response(navigate_handler(&location).await),
        "/api/photos" => finalize_response(photos_json_handler(&state, &location).await),
        "/health" => finalize_response(health()),
        _ => {
            tracing::warn!("⚠️ No route matched - Method: {} Path: {}", method, path);
            finalize_response(not_found())
        }
    }
}

fn health() -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/json")
        .body(serde_json::json!({"status": "ok"}).to_string().into())
        .map_err(Box::new)?)
}

fn not_found() -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header("Content-Type", "application/json")
        .body(serde_json::json!({"error": "Not found"}).to_string().into())
        .map_err(Box::new)?)
}
