use serde::{Deserialize, Serialize};
use std::fmt;

/// Rovers served by the Mars Rover Photos API.
/// Lowercase on the wire and in the location query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rover {
    #[default]
    Curiosity,
    Opportunity,
    Spirit,
}

impl Rover {
    pub const ALL: [Rover; 3] = [Rover::Curiosity, Rover::Opportunity, Rover::Spirit];

    /// Path segment / query value, e.g. `curiosity`
    pub fn as_str(&self) -> &'static str {
        match self {
            Rover::Curiosity => "curiosity",
            Rover::Opportunity => "opportunity",
            Rover::Spirit => "spirit",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Rover::Curiosity => "Curiosity",
            Rover::Opportunity => "Opportunity",
            Rover::Spirit => "Spirit",
        }
    }

    /// Case-insensitive lookup. Unknown names return `None`.
    pub fn parse(raw: &str) -> Option<Rover> {
        let needle = raw.trim();
        Rover::ALL
            .into_iter()
            .find(|rover| rover.as_str().eq_ignore_ascii_case(needle))
    }
}

impl fmt::Display for Rover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ========== CAMERAS ==========
// Short codes as the API expects them. Not every camera exists on every rover.
pub const FHAZ: &str = "FHAZ";
pub const RHAZ: &str = "RHAZ";
pub const MAST: &str = "MAST";
pub const CHEMCAM: &str = "CHEMCAM";
pub const MAHLI: &str = "MAHLI";
pub const MARDI: &str = "MARDI";
pub const NAVCAM: &str = "NAVCAM";
pub const PANCAM: &str = "PANCAM";
pub const MINITES: &str = "MINITES";

pub(crate) const CURIOSITY_CAMERAS: &[&str] = &[FHAZ, RHAZ, MAST, CHEMCAM, MAHLI, MARDI, NAVCAM];
pub(crate) const MER_CAMERAS: &[&str] = &[FHAZ, RHAZ, NAVCAM, PANCAM, MINITES];
