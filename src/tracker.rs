use crate::dlog;
use crate::error::{TrackerError, ValidationError};
use crate::form::WorkoutForm;
use crate::map::{LocationSource, MapView};
use crate::persist;
use crate::render;
use crate::storage::KeyValueStore;
use crate::types::{Coords, Discipline, Workout};
use chrono::{DateTime, Utc};

pub const DEFAULT_ZOOM: u8 = 13;

/// Owns the workout collection together with the store and map it is
/// mirrored to. Every UI event goes through one of its methods.
pub struct Tracker<S, M> {
    store: S,
    map: M,
    zoom: u8,
    map_ready: bool,
    workouts: Vec<Workout>,
    selected: Option<Coords>,
    /// Id of the workout whose edit form is open.
    editing: Option<String>,
}

impl<S: KeyValueStore, M: MapView> Tracker<S, M> {
    /// Restore the collection from `store`. Unreadable data is an empty
    /// collection.
    pub fn new(store: S, map: M, zoom: u8) -> Self {
        let workouts = persist::load(&store);
        tracing::info!(count = workouts.len(), "restored workouts");
        Self {
            store,
            map,
            zoom,
            map_ready: false,
            workouts,
            selected: None,
            editing: None,
        }
    }

    /// Ask for the device position once. On success the map is centered on it
    /// and every workout gets its marker; on failure the map stays unloaded
    /// and the collection is still usable.
    pub fn attach_location(&mut self, source: &mut dyn LocationSource) -> Result<(), TrackerError> {
        let center = source
            .current_position()
            .map_err(TrackerError::LocationUnavailable)?;

        self.map.set_view(center, self.zoom);
        self.map_ready = true;
        for w in &self.workouts {
            self.map.add_marker(w.id(), render::marker(w));
        }
        dlog!("map loaded center={} markers={}", center, self.workouts.len());
        Ok(())
    }

    /// A click on the map: the next create lands here.
    pub fn select_location(&mut self, at: Coords) {
        self.selected = Some(at);
        self.editing = None;
    }

    /// Open the edit form for `id`, pre-filled with its current values.
    pub fn begin_edit(&mut self, id: &str) -> Result<WorkoutForm, TrackerError> {
        let w = self
            .get(id)
            .ok_or_else(|| TrackerError::NotFound(id.to_string()))?;
        let form = WorkoutForm::prefilled(w);
        self.editing = Some(id.to_string());
        Ok(form)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// Form submission: applies the open edit if there is one, otherwise
    /// creates a workout at the selected location.
    pub fn submit(&mut self, form: &WorkoutForm) -> Result<&Workout, TrackerError> {
        self.submit_at(form, Utc::now())
    }

    pub fn submit_at(
        &mut self,
        form: &WorkoutForm,
        now: DateTime<Utc>,
    ) -> Result<&Workout, TrackerError> {
        match self.editing.take() {
            Some(id) => self.apply_edit(&id, form),
            None => self.create(form, now),
        }
    }

    fn create(&mut self, form: &WorkoutForm, now: DateTime<Utc>) -> Result<&Workout, TrackerError> {
        let at = self.selected.ok_or(TrackerError::NoLocationSelected)?;
        let m = form.validate()?;

        let id = next_id(now, &self.workouts);
        let w = match m.discipline {
            Discipline::Running => {
                Workout::running(id, now, m.distance, m.duration, at, m.discipline_input)
            }
            Discipline::Cycling => {
                Workout::cycling(id, now, m.distance, m.duration, at, m.discipline_input)
            }
        };

        self.workouts.push(w);
        if let Err(e) = self.persist() {
            self.workouts.pop();
            return Err(e);
        }
        self.selected = None;

        let w = &self.workouts[self.workouts.len() - 1];
        tracing::info!(id = w.id(), discipline = %w.discipline(), "workout created");
        if self.map_ready {
            self.map.add_marker(w.id(), render::marker(w));
        }
        Ok(w)
    }

    fn apply_edit(&mut self, id: &str, form: &WorkoutForm) -> Result<&Workout, TrackerError> {
        let idx = self
            .position(id)
            .ok_or_else(|| TrackerError::NotFound(id.to_string()))?;

        let current = self.workouts[idx].discipline();
        if form.discipline != current {
            return Err(ValidationError::DisciplineChanged {
                current,
                requested: form.discipline,
            }
            .into());
        }
        let m = form.validate()?;

        let previous = self.workouts[idx].clone();
        self.workouts[idx].apply_edit(m.distance, m.duration, m.discipline_input);
        if let Err(e) = self.persist() {
            self.workouts[idx] = previous;
            return Err(e);
        }
        tracing::info!(id, "workout edited");

        Ok(&self.workouts[idx])
    }

    /// Remove `id` and its marker. Returns whether anything was removed;
    /// an unknown id is not an error and leaves the store untouched.
    pub fn delete(&mut self, id: &str) -> Result<bool, TrackerError> {
        let Some(idx) = self.position(id) else {
            dlog!("delete of unknown workout id={}", id);
            return Ok(false);
        };

        let removed = self.workouts.remove(idx);
        if let Err(e) = self.persist() {
            self.workouts.insert(idx, removed);
            return Err(e);
        }

        if self.map_ready {
            self.map.remove_marker(id);
        }
        if self.editing.as_deref() == Some(id) {
            self.editing = None;
        }
        tracing::info!(id, "workout deleted");
        Ok(true)
    }

    /// Navigate to `id` on the map and count the interaction.
    pub fn focus(&mut self, id: &str) -> Result<Option<&Workout>, TrackerError> {
        let Some(idx) = self.position(id) else {
            return Ok(None);
        };

        if self.map_ready {
            self.map.fly_to(self.workouts[idx].coords(), self.zoom);
        }
        let previous = self.workouts[idx].clone();
        self.workouts[idx].register_interaction();
        if let Err(e) = self.persist() {
            self.workouts[idx] = previous;
            return Err(e);
        }

        Ok(Some(&self.workouts[idx]))
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn get(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == id)
    }

    pub const fn map(&self) -> &M {
        &self.map
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn map_ready(&self) -> bool {
        self.map_ready
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.workouts.iter().position(|w| w.id() == id)
    }

    fn persist(&mut self) -> Result<(), TrackerError> {
        persist::save(&mut self.store, &self.workouts).map_err(TrackerError::storage)
    }
}

/// Last ten digits of the millisecond timestamp, bumped past ids already in
/// use.
fn next_id(now: DateTime<Utc>, taken: &[Workout]) -> String {
    let mut millis = now.timestamp_millis();
    loop {
        let s = millis.to_string();
        let id = s[s.len().saturating_sub(10)..].to_string();
        if !taken.iter().any(|w| w.id() == id) {
            return id;
        }
        millis += 1;
    }
}
