pub mod cli;
pub mod error;
pub mod form;
pub mod gpx;
pub mod map;
pub mod persist;
pub mod render;
pub mod storage;
pub mod tracker;
pub mod types;
pub mod utils;

pub use error::{TrackerError, ValidationError};
pub use form::WorkoutForm;
pub use tracker::Tracker;
pub use types::{Coords, Discipline, Workout};
