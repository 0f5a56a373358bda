use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One photo as the gallery uses it. Display strings come straight from the
/// API and are not checked against the rover catalog.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct PhotoRecord {
    pub id: u64,
    pub img_src: String,
    pub earth_date: String,
    pub rover_name: String,
    pub camera_name: String,
    pub camera_full_name: String,
}

// ========== WIRE FORMAT ==========
// Only the fields the gallery reads; serde drops the rest.

#[derive(Debug, Deserialize)]
pub struct PhotosResponse {
    pub photos: Vec<WirePhoto>,
}

#[derive(Debug, Deserialize)]
pub struct WirePhoto {
    pub id: u64,
    pub img_src: String,
    pub earth_date: String,
    pub rover: WireRover,
    pub camera: WireCamera,
}

#[derive(Debug, Deserialize)]
pub struct WireRover {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct WireCamera {
    pub name: String,
    pub full_name: String,
}

impl From<WirePhoto> for PhotoRecord {
    fn from(wire: WirePhoto) -> Self {
        PhotoRecord {
            id: wire.id,
            img_src: wire.img_src,
            earth_date: wire.earth_date,
            rover_name: wire.rover.name,
            camera_name: wire.camera.name,
            camera_full_name: wire.camera.full_name,
        }
    }
}

// ========== ERRORS ==========
/// Failure of one fetch. Terminal for the render that asked for it, never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("NASA API error: {status} {status_text}")]
    Status { status: u16, status_text: String },

    #[error("Invalid photo request: {0}")]
    InvalidRequest(String),

    #[error("NASA API unreachable: {0}")]
    Transport(String),

    #[error("Malformed NASA API response: {0}")]
    Decode(String),
}
