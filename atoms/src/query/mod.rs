// Filter state <-> location query codec
pub mod model;
pub mod service;

pub use model::{
    EncodeIntent, FilterDate, FilterState, Location, PageNumber, CAMERA_KEY, DATE_KEY, DEFAULT_DATE,
    MIN_DATE, PAGE_KEY, ROVER_KEY, SEARCH_KEY,
};
pub use service::*;
