use super::model::{Rover, CURIOSITY_CAMERAS, MER_CAMERAS};

/// Camera codes available on a rover, in display order.
pub fn cameras_for(rover: Rover) -> &'static [&'static str] {
    match rover {
        Rover::Curiosity => CURIOSITY_CAMERAS,
        // Opportunity and Spirit share the MER camera suite
        Rover::Opportunity | Rover::Spirit => MER_CAMERAS,
    }
}

/// Trim + uppercase so `" navcam"` compares equal to `NAVCAM`
pub fn normalize_camera(camera: &str) -> String {
    camera.trim().to_ascii_uppercase()
}

/// Advisory check: is `camera` one of the rover's camera codes?
/// Nothing in the request path rejects a mismatch, the API just returns no photos.
pub fn is_camera_for_rover(rover: Rover, camera: &str) -> bool {
    let norm = normalize_camera(camera);
    cameras_for(rover).iter().any(|code| *code == norm)
}
