// End-to-end flows against an on-disk SQLite store.

use chrono::{TimeZone, Utc};
use mapty::gpx::GpxMap;
use mapty::map::{FixedLocation, LogMap};
use mapty::persist::STORAGE_KEY;
use mapty::storage::{KeyValueStore, SqliteStore};
use mapty::tracker::DEFAULT_ZOOM;
use mapty::{Coords, Discipline, Tracker, TrackerError, WorkoutForm};
use tempfile::TempDir;

fn form(discipline: Discipline, distance: &str, duration: &str, metric: &str) -> WorkoutForm {
    let mut f = WorkoutForm {
        discipline,
        distance: distance.into(),
        duration: duration.into(),
        ..WorkoutForm::default()
    };
    match discipline {
        Discipline::Running => f.cadence = metric.into(),
        Discipline::Cycling => f.elevation = metric.into(),
    }
    f
}

fn open(dir: &TempDir) -> Tracker<SqliteStore, LogMap> {
    let store = SqliteStore::open(&dir.path().join("mapty.sqlite")).unwrap();
    let mut t = Tracker::new(store, LogMap::default(), DEFAULT_ZOOM);
    t.attach_location(&mut FixedLocation(Some(Coords::new(48.1, -1.6))))
        .unwrap();
    t
}

#[test]
fn workouts_survive_a_restart() {
    let dir = TempDir::new().unwrap();
    let day = Utc.with_ymd_and_hms(2024, 6, 2, 7, 0, 0).unwrap();

    let (run_id, ride_id) = {
        let mut t = open(&dir);
        t.select_location(Coords::new(48.11, -1.68));
        let run_id = t
            .submit_at(&form(Discipline::Running, "5", "30", "150"), day)
            .unwrap()
            .id()
            .to_string();
        t.select_location(Coords::new(48.2, -1.7));
        let ride_id = t
            .submit_at(&form(Discipline::Cycling, "10", "40", "-50"), day)
            .unwrap()
            .id()
            .to_string();
        t.focus(&run_id).unwrap();
        (run_id, ride_id)
    };
    assert_ne!(run_id, ride_id);

    let t = open(&dir);
    assert_eq!(t.workouts().len(), 2);
    assert_eq!(t.map().marker_ids().collect::<Vec<_>>(), vec![run_id.as_str(), ride_id.as_str()]);

    let run = t.get(&run_id).unwrap();
    assert_eq!(run.pace(), Some(6.0));
    assert_eq!(run.interaction_count(), 1);
    assert_eq!(run.created_at(), day);

    let ride = t.get(&ride_id).unwrap();
    assert_eq!(ride.speed(), Some(15.0));
    assert_eq!(ride.discipline_input(), -50.0);
}

#[test]
fn edit_and_delete_are_persisted() {
    let dir = TempDir::new().unwrap();
    let id = {
        let mut t = open(&dir);
        t.select_location(Coords::new(1.0, 1.0));
        let id = t
            .submit(&form(Discipline::Running, "5", "30", "150"))
            .unwrap()
            .id()
            .to_string();

        let mut f = t.begin_edit(&id).unwrap();
        f.distance = "6".into();
        t.submit(&f).unwrap();

        t.select_location(Coords::new(2.0, 2.0));
        let other = t
            .submit(&form(Discipline::Cycling, "20", "60", "300"))
            .unwrap()
            .id()
            .to_string();
        assert!(t.delete(&other).unwrap());
        id
    };

    let t = open(&dir);
    assert_eq!(t.workouts().len(), 1);
    let w = t.get(&id).unwrap();
    assert_eq!(w.distance(), 6.0);
    assert_eq!(w.pace(), Some(5.0));
}

#[test]
fn invalid_submission_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let mut t = open(&dir);
    t.select_location(Coords::new(1.0, 1.0));
    let err = t
        .submit(&form(Discipline::Running, "", "30", "150"))
        .unwrap_err();
    assert!(matches!(err, TrackerError::Validation(_)));
    assert_eq!(t.store().get_item(STORAGE_KEY).unwrap(), None);
}

#[test]
fn browser_payload_with_unknown_record_restores_the_rest() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mapty.sqlite");
    {
        let mut store = SqliteStore::open(&path).unwrap();
        store
            .set_item(
                STORAGE_KEY,
                r#"[
                  {"date":"2024-05-01T18:00:00.000Z","id":"4586400000","clicks":2,
                   "duration":25,"distance":4,"coords":[48.1,-1.6],"type":"running","cadence":172},
                  {"date":"2024-05-02T18:00:00.000Z","id":"4672800000","clicks":0,
                   "duration":50,"distance":2,"coords":[48.1,-1.6],"type":"swimming"}
                ]"#,
            )
            .unwrap();
    }

    let store = SqliteStore::open(&path).unwrap();
    let t = Tracker::new(store, LogMap::default(), DEFAULT_ZOOM);
    assert_eq!(t.workouts().len(), 1);
    let w = &t.workouts()[0];
    assert_eq!(w.id(), "4586400000");
    assert_eq!(w.interaction_count(), 2);
    assert_eq!(w.pace(), Some(6.25));
}

#[test]
fn corrupt_payload_starts_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mapty.sqlite");
    {
        let mut store = SqliteStore::open(&path).unwrap();
        store.set_item(STORAGE_KEY, "{not json").unwrap();
    }
    let t = Tracker::new(SqliteStore::open(&path).unwrap(), LogMap::default(), DEFAULT_ZOOM);
    assert!(t.workouts().is_empty());
}

#[test]
fn gpx_export_contains_every_workout() {
    let dir = TempDir::new().unwrap();
    {
        let mut t = open(&dir);
        for (i, at) in [Coords::new(1.0, 1.0), Coords::new(2.0, 2.0)].into_iter().enumerate() {
            t.select_location(at);
            let day = Utc.with_ymd_and_hms(2024, 6, 2 + i as u32, 7, 0, 0).unwrap();
            t.submit_at(&form(Discipline::Running, "5", "30", "150"), day)
                .unwrap();
        }
    }

    let store = SqliteStore::open(&dir.path().join("mapty.sqlite")).unwrap();
    let mut t = Tracker::new(store, GpxMap::default(), DEFAULT_ZOOM);
    t.attach_location(&mut FixedLocation(Some(Coords::new(0.0, 0.0))))
        .unwrap();
    assert_eq!(t.map().len(), 2);

    let out = dir.path().join("workouts.gpx");
    t.map().write_to(&out).unwrap();
    let text = std::fs::read_to_string(&out).unwrap();
    assert_eq!(text.matches("<wpt ").count(), 2);
    assert!(text.contains("running-popup"));
}
