use crate::map::Marker;
use crate::types::{Metrics, Workout};

pub fn marker(w: &Workout) -> Marker {
    Marker {
        coords: w.coords(),
        label: format!("{} {}", w.icon(), w.description()),
        class: format!("{}-popup", w.discipline()),
    }
}

/// One list entry: title line, then one detail per line.
pub fn list_entry(w: &Workout) -> String {
    let specific = match w.metrics() {
        Metrics::Running { cadence, pace } => {
            format!("  ⚡️ {pace:.1} min/km\n  🦶🏼 {cadence} spm")
        }
        Metrics::Cycling {
            elevation_gain,
            speed,
        } => format!("  ⚡️ {speed:.1} km/h\n  ⛰ {elevation_gain} m"),
    };
    format!(
        "[{}] {}\n  {} {} km\n  ⏱ {} min\n{specific}",
        w.id(),
        w.description(),
        w.icon(),
        w.distance(),
        w.duration()
    )
}

/// Tab-separated line for `list --details`.
pub fn detail_line(w: &Workout) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
        w.id(),
        w.discipline(),
        w.created_at().to_rfc3339(),
        w.coords(),
        w.distance(),
        w.duration(),
        w.discipline_input(),
        w.interaction_count()
    )
}
