use crate::error::ValidationError;
use crate::types::{Discipline, Workout};

/// Raw form values, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkoutForm {
    pub discipline: Discipline,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

/// Numbers that passed validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurements {
    pub discipline: Discipline,
    pub distance: f64,
    pub duration: f64,
    /// Cadence for running, elevation gain for cycling.
    pub discipline_input: f64,
}

impl WorkoutForm {
    /// Form pre-filled from an existing workout, as shown when editing.
    pub fn prefilled(w: &Workout) -> Self {
        let mut form = Self {
            discipline: w.discipline(),
            distance: w.distance().to_string(),
            duration: w.duration().to_string(),
            ..Self::default()
        };
        match w.discipline() {
            Discipline::Running => form.cadence = w.discipline_input().to_string(),
            Discipline::Cycling => form.elevation = w.discipline_input().to_string(),
        }
        form
    }

    /// Coerce every field, require them finite, then require distance,
    /// duration and (running only) cadence to be positive.
    pub fn validate(&self) -> Result<Measurements, ValidationError> {
        let (metric_field, metric_raw) = match self.discipline {
            Discipline::Running => ("cadence", &self.cadence),
            Discipline::Cycling => ("elevation", &self.elevation),
        };

        let distance = finite("distance", &self.distance)?;
        let duration = finite("duration", &self.duration)?;
        let discipline_input = finite(metric_field, metric_raw)?;

        positive("distance", distance)?;
        positive("duration", duration)?;
        if self.discipline == Discipline::Running {
            positive("cadence", discipline_input)?;
        }

        Ok(Measurements {
            discipline: self.discipline,
            distance,
            duration,
            discipline_input,
        })
    }
}

/// Text to number the way a browser's unary `+` does: whitespace is trimmed,
/// empty text is zero, `0x`/`0o`/`0b` literals are integers in that radix,
/// `Infinity` is the only spelled-out number, anything else unparseable is
/// `NaN`.
pub fn coerce(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }
    if let Some(v) = radix_literal(s) {
        return v;
    }

    let unsigned = s.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(s);
    if unsigned == "Infinity" {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }
    // `str::parse` also takes "inf" and "nan" in any case
    if unsigned.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

/// Unsigned `0x`, `0o` or `0b` literal. `None` when `s` has no such prefix.
fn radix_literal(s: &str) -> Option<f64> {
    let radix = match s.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    let digits = &s[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }

    let value = digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix)
            .map(|d| acc * f64::from(radix) + f64::from(d))
    });
    Some(value.unwrap_or(f64::NAN))
}

fn finite(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    let v = coerce(raw);
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ValidationError::NotFinite {
            field,
            raw: raw.to_string(),
        })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NotPositive { field, value })
    }
}
