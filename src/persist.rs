//! Serialization of the workout collection to a [`KeyValueStore`].
//!
//! The whole collection lives under a single key as a JSON array. Records
//! written by the original browser app (`type`, `date`, `clicks`, `coords`,
//! `elevation`, `sympol`) are accepted through serde aliases.

use crate::dlog;
use crate::error::RecordError;
use crate::storage::KeyValueStore;
use crate::types::{Coords, Discipline, Metrics, Workout};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

pub const STORAGE_KEY: &str = "workouts";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredWorkout {
    #[serde(alias = "type")]
    pub discipline: String,
    pub id: String,
    #[serde(alias = "date")]
    pub created_at: DateTime<Utc>,
    #[serde(alias = "clicks", default)]
    pub interaction_count: u32,
    pub distance: f64,
    pub duration: f64,
    #[serde(alias = "coords")]
    pub coordinates: Coords,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(alias = "sympol", default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cadence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pace: Option<f64>,

    #[serde(alias = "elevation", default, skip_serializing_if = "Option::is_none")]
    pub elevation_gain: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

impl From<&Workout> for StoredWorkout {
    fn from(w: &Workout) -> Self {
        let (cadence, pace, elevation_gain, speed) = match w.metrics() {
            Metrics::Running { cadence, pace } => (Some(cadence), Some(pace), None, None),
            Metrics::Cycling {
                elevation_gain,
                speed,
            } => (None, None, Some(elevation_gain), Some(speed)),
        };

        Self {
            discipline: w.discipline().as_str().to_string(),
            id: w.id().to_string(),
            created_at: w.created_at(),
            interaction_count: w.interaction_count(),
            distance: w.distance(),
            duration: w.duration(),
            coordinates: w.coords(),
            description: Some(w.description().to_string()),
            icon: Some(w.icon().to_string()),
            cadence,
            pace,
            elevation_gain,
            speed,
        }
    }
}

impl TryFrom<StoredWorkout> for Workout {
    type Error = RecordError;

    /// Rebuild through the variant constructor, then force the stored
    /// identity over the freshly generated one.
    fn try_from(r: StoredWorkout) -> Result<Self, Self::Error> {
        let discipline: Discipline = r.discipline.parse()?;
        let mut w = match discipline {
            Discipline::Running => {
                let cadence = r.cadence.ok_or(RecordError::MissingField {
                    discipline,
                    field: "cadence",
                })?;
                Self::running(
                    r.id.clone(),
                    r.created_at,
                    r.distance,
                    r.duration,
                    r.coordinates,
                    cadence,
                )
            }
            Discipline::Cycling => {
                let elevation_gain = r.elevation_gain.ok_or(RecordError::MissingField {
                    discipline,
                    field: "elevationGain",
                })?;
                Self::cycling(
                    r.id.clone(),
                    r.created_at,
                    r.distance,
                    r.duration,
                    r.coordinates,
                    elevation_gain,
                )
            }
        };
        w.restore_identity(r.id, r.created_at, r.interaction_count);
        Ok(w)
    }
}

pub fn encode(workouts: &[Workout]) -> serde_json::Result<String> {
    let records: Vec<StoredWorkout> = workouts.iter().map(StoredWorkout::from).collect();
    serde_json::to_string(&records)
}

/// Decode a stored payload. Never fails: an unparseable payload is an empty
/// collection and an undecodable record is skipped, both with a warning.
pub fn decode(payload: &str) -> Vec<Workout> {
    let records = match serde_json::from_str::<Vec<JsonValue>>(payload) {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!(err = %e, "stored workouts are unreadable; starting empty");
            return Vec::new();
        }
    };

    let total = records.len();
    let mut out = Vec::with_capacity(total);
    for (idx, value) in records.into_iter().enumerate() {
        match decode_record(value) {
            Ok(w) => out.push(w),
            Err(e) => tracing::warn!(idx, err = %e, "skipping stored workout"),
        }
    }

    dlog!("decoded workouts kept={} total={}", out.len(), total);
    out
}

fn decode_record(value: JsonValue) -> Result<Workout, RecordError> {
    let record: StoredWorkout = serde_json::from_value(value)?;
    Workout::try_from(record)
}

/// Load the collection. A missing key or a failing read is an empty
/// collection.
pub fn load(store: &dyn KeyValueStore) -> Vec<Workout> {
    match store.get_item(STORAGE_KEY) {
        Ok(Some(payload)) => decode(&payload),
        Ok(None) => {
            dlog!("no stored workouts under key={}", STORAGE_KEY);
            Vec::new()
        }
        Err(e) => {
            tracing::warn!(err = %format!("{e:#}"), "reading stored workouts failed; starting empty");
            Vec::new()
        }
    }
}

/// Replace the stored collection.
pub fn save(store: &mut dyn KeyValueStore, workouts: &[Workout]) -> Result<()> {
    let payload = encode(workouts).context("Serializing workouts")?;
    store.set_item(STORAGE_KEY, &payload)?;
    dlog!("saved workouts count={} bytes={}", workouts.len(), payload.len());
    Ok(())
}
