// Static reference data: rovers and their cameras
pub mod model;
pub mod service;

pub use model::Rover;
pub use service::*;
