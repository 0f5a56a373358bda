//! Pure domain for the rover photo gallery: the rover catalog, the
//! filter-state codec and photo records. No I/O lives here.

pub mod catalog;
pub mod photos;
pub mod query;
