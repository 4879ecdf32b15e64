use crate::error::UnknownDiscipline;
use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Discipline {
    #[default]
    Running,
    Cycling,
}

impl Discipline {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Cycling => "cycling",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Cycling => "Cycling",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Running => "🏃‍♂️",
            Self::Cycling => "🚴",
        }
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Discipline {
    type Err = UnknownDiscipline;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(Self::Running),
            "cycling" => Ok(Self::Cycling),
            other => Err(UnknownDiscipline(other.to_string())),
        }
    }
}

/// A map location, stored as a `[lat, lng]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Coords {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coords> for [f64; 2] {
    fn from(c: Coords) -> Self {
        [c.lat, c.lng]
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Discipline-specific input plus the metric derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metrics {
    /// `cadence` in steps/min, `pace` in min/km.
    Running { cadence: f64, pace: f64 },
    /// `elevation_gain` in meters (negative for descent), `speed` in km/h.
    Cycling { elevation_gain: f64, speed: f64 },
}

/// Minutes per kilometer.
pub fn pace(distance: f64, duration: f64) -> f64 {
    duration / distance
}

/// Kilometers per hour, `duration` being in minutes.
pub fn speed(distance: f64, duration: f64) -> f64 {
    distance / (duration / 60.0)
}

/// "Running on 14 March".
pub fn describe(discipline: Discipline, date: NaiveDate) -> String {
    format!(
        "{} on {} {}",
        discipline.title(),
        date.day(),
        MONTHS[date.month0() as usize]
    )
}

/// A recorded workout.
///
/// Constructors trust their caller: validation happens in [`crate::form`].
/// Zero or non-finite inputs produce `inf`/`NaN` metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    id: String,
    created_at: DateTime<Utc>,
    distance: f64,
    duration: f64,
    coords: Coords,
    description: String,
    interaction_count: u32,
    metrics: Metrics,
}

impl Workout {
    pub fn running(
        id: String,
        created_at: DateTime<Utc>,
        distance: f64,
        duration: f64,
        coords: Coords,
        cadence: f64,
    ) -> Self {
        Self::build(
            id,
            created_at,
            distance,
            duration,
            coords,
            Metrics::Running {
                cadence,
                pace: pace(distance, duration),
            },
        )
    }

    pub fn cycling(
        id: String,
        created_at: DateTime<Utc>,
        distance: f64,
        duration: f64,
        coords: Coords,
        elevation_gain: f64,
    ) -> Self {
        Self::build(
            id,
            created_at,
            distance,
            duration,
            coords,
            Metrics::Cycling {
                elevation_gain,
                speed: speed(distance, duration),
            },
        )
    }

    fn build(
        id: String,
        created_at: DateTime<Utc>,
        distance: f64,
        duration: f64,
        coords: Coords,
        metrics: Metrics,
    ) -> Self {
        let mut w = Self {
            id,
            created_at,
            distance,
            duration,
            coords,
            description: String::new(),
            interaction_count: 0,
            metrics,
        };
        w.description = describe(w.discipline(), local_date(created_at));
        w
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub const fn distance(&self) -> f64 {
        self.distance
    }

    pub const fn duration(&self) -> f64 {
        self.duration
    }

    pub const fn coords(&self) -> Coords {
        self.coords
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub const fn interaction_count(&self) -> u32 {
        self.interaction_count
    }

    pub const fn metrics(&self) -> Metrics {
        self.metrics
    }

    pub const fn discipline(&self) -> Discipline {
        match self.metrics {
            Metrics::Running { .. } => Discipline::Running,
            Metrics::Cycling { .. } => Discipline::Cycling,
        }
    }

    pub const fn icon(&self) -> &'static str {
        self.discipline().icon()
    }

    /// Cadence for running, elevation gain for cycling.
    pub const fn discipline_input(&self) -> f64 {
        match self.metrics {
            Metrics::Running { cadence, .. } => cadence,
            Metrics::Cycling { elevation_gain, .. } => elevation_gain,
        }
    }

    /// Pace for running, speed for cycling.
    pub const fn derived_metric(&self) -> f64 {
        match self.metrics {
            Metrics::Running { pace, .. } => pace,
            Metrics::Cycling { speed, .. } => speed,
        }
    }

    pub const fn pace(&self) -> Option<f64> {
        match self.metrics {
            Metrics::Running { pace, .. } => Some(pace),
            Metrics::Cycling { .. } => None,
        }
    }

    pub const fn speed(&self) -> Option<f64> {
        match self.metrics {
            Metrics::Cycling { speed, .. } => Some(speed),
            Metrics::Running { .. } => None,
        }
    }

    /// Recompute pace/speed from the current distance and duration.
    pub fn refresh_metric(&mut self) {
        let (distance, duration) = (self.distance, self.duration);
        match &mut self.metrics {
            Metrics::Running { pace: p, .. } => *p = pace(distance, duration),
            Metrics::Cycling { speed: s, .. } => *s = speed(distance, duration),
        }
    }

    /// Overwrite the editable fields in place. `id`, `created_at`,
    /// `description` and the discipline stay as they are.
    pub fn apply_edit(&mut self, distance: f64, duration: f64, discipline_input: f64) {
        self.distance = distance;
        self.duration = duration;
        match &mut self.metrics {
            Metrics::Running { cadence, .. } => *cadence = discipline_input,
            Metrics::Cycling { elevation_gain, .. } => *elevation_gain = discipline_input,
        }
        self.refresh_metric();
    }

    pub fn register_interaction(&mut self) {
        self.interaction_count = self.interaction_count.saturating_add(1);
    }

    /// Force stored identity over a freshly constructed workout.
    pub(crate) fn restore_identity(
        &mut self,
        id: String,
        created_at: DateTime<Utc>,
        interaction_count: u32,
    ) {
        self.id = id;
        self.created_at = created_at;
        self.interaction_count = interaction_count;
        self.description = describe(self.discipline(), local_date(created_at));
    }
}

fn local_date(t: DateTime<Utc>) -> NaiveDate {
    t.with_timezone(&Local).date_naive()
}
