use crate::types::Coords;

/// Marker rendered for one workout.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub coords: Coords,
    /// Popup text, e.g. "🏃‍♂️ Running on 14 March".
    pub label: String,
    /// Popup style class, e.g. "running-popup".
    pub class: String,
}

/// The map widget the tracker drives. Markers are keyed by workout id.
pub trait MapView {
    fn set_view(&mut self, center: Coords, zoom: u8);
    fn fly_to(&mut self, center: Coords, zoom: u8);
    fn add_marker(&mut self, id: &str, marker: Marker);
    /// Returns whether a marker existed for `id`.
    fn remove_marker(&mut self, id: &str) -> bool;
}

/// Source of the device position, asked once at startup.
pub trait LocationSource {
    fn current_position(&mut self) -> Result<Coords, String>;
}

/// A position configured up front, or none at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLocation(pub Option<Coords>);

impl LocationSource for FixedLocation {
    fn current_position(&mut self) -> Result<Coords, String> {
        self.0.ok_or_else(|| "no home location configured".to_string())
    }
}

/// Map without a display: keeps track of markers and logs what it is asked
/// to draw.
#[derive(Debug, Default)]
pub struct LogMap {
    markers: Vec<(String, Marker)>,
}

impl LogMap {
    pub fn marker_ids(&self) -> impl Iterator<Item = &str> {
        self.markers.iter().map(|(id, _)| id.as_str())
    }
}

impl MapView for LogMap {
    fn set_view(&mut self, center: Coords, zoom: u8) {
        tracing::debug!(%center, zoom, "map view set");
    }

    fn fly_to(&mut self, center: Coords, zoom: u8) {
        tracing::info!(%center, zoom, "flying to workout");
    }

    fn add_marker(&mut self, id: &str, marker: Marker) {
        tracing::debug!(id, coords = %marker.coords, label = %marker.label, "marker added");
        self.markers.push((id.to_string(), marker));
    }

    fn remove_marker(&mut self, id: &str) -> bool {
        let before = self.markers.len();
        self.markers.retain(|(m, _)| m != id);
        let removed = self.markers.len() != before;
        if removed {
            tracing::debug!(id, "marker removed");
        }
        removed
    }
}
