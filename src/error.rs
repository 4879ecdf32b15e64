use crate::types::Discipline;

/// Rejected form input. Nothing is mutated when one of these is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be a finite number (got {raw:?})")]
    NotFinite { field: &'static str, raw: String },

    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f64 },

    #[error("a {current} workout cannot be edited into a {requested} one")]
    DisciplineChanged {
        current: Discipline,
        requested: Discipline,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("Please insert positive inputs: {0}")]
    Validation(#[from] ValidationError),

    #[error("cannot access your location: {0}")]
    LocationUnavailable(String),

    #[error("no map location selected")]
    NoLocationSelected,

    #[error("no workout is being edited")]
    NotEditing,

    #[error("workout not found: {0}")]
    NotFound(String),

    #[error("writing workouts to storage")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl TrackerError {
    pub fn storage(err: anyhow::Error) -> Self {
        Self::Storage(err.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown discipline: {0:?}")]
pub struct UnknownDiscipline(pub String);

/// Why a single stored record could not be turned back into a workout.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error(transparent)]
    UnknownDiscipline(#[from] UnknownDiscipline),

    #[error("{discipline} record is missing {field}")]
    MissingField {
        discipline: Discipline,
        field: &'static str,
    },

    #[error("malformed record: {0}")]
    Malformed(#[from] serde_json::Error),
}
