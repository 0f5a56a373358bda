// Photo records, the remote source seam, refine + pagination helpers
pub mod model;
pub mod service;
pub mod source;

pub use model::{FetchError, PhotoRecord};
pub use service::*;
pub use source::PhotoSource;
