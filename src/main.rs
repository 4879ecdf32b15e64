#![deny(
    warnings,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::Result;
use clap::Parser;
use mapty::cli::{self, Cmd};
use mapty::gpx::GpxMap;
use mapty::map::{FixedLocation, LogMap, MapView};
use mapty::storage::SqliteStore;
use mapty::{Coords, Tracker, render, utils};

#[macro_use]
extern crate mapty;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    utils::init_logging(cli.verbose, cli.quiet);

    let store = SqliteStore::open(&cli.store)?;
    dlog!("store={} zoom={}", cli.store.display(), cli.zoom);

    if let Cmd::ExportGpx { path } = &cli.cmd {
        let mut tracker = Tracker::new(store, GpxMap::default(), cli.zoom);
        // Without a home position, center on the oldest workout.
        let center = cli
            .home
            .or_else(|| tracker.workouts().first().map(mapty::Workout::coords));
        load_map(&mut tracker, center);
        tracker.map().write_to(path)?;
        return Ok(());
    }

    let mut tracker = Tracker::new(store, LogMap::default(), cli.zoom);
    load_map(&mut tracker, cli.home);
    run(&mut tracker, cli.cmd)
}

fn load_map<M: MapView>(tracker: &mut Tracker<SqliteStore, M>, center: Option<Coords>) {
    if center.is_none() {
        dlog!("no home location configured; map not loaded");
        return;
    }
    if let Err(e) = tracker.attach_location(&mut FixedLocation(center)) {
        tracing::warn!(err = %e, "map not loaded");
    }
}

fn run(tracker: &mut Tracker<SqliteStore, LogMap>, cmd: Cmd) -> Result<()> {
    match cmd {
        Cmd::List { details } => {
            if tracker.workouts().is_empty() {
                tracing::info!("no workouts yet");
            }
            for w in tracker.workouts().iter().rev() {
                if details {
                    println!("{}", render::detail_line(w));
                } else {
                    println!("{}\n", render::list_entry(w));
                }
            }
        }
        Cmd::Add {
            at,
            discipline,
            distance,
            duration,
            cadence,
            elevation,
        } => {
            tracker.select_location(at);
            let form = mapty::WorkoutForm {
                discipline,
                distance,
                duration,
                cadence,
                elevation,
            };
            let w = tracker.submit(&form)?;
            println!("{}", render::list_entry(w));
        }
        Cmd::Edit {
            id,
            distance,
            duration,
            cadence,
            elevation,
        } => {
            let mut form = tracker.begin_edit(&id)?;
            dlog!("editing id={} prefilled={:?}", id, form);
            if let Some(v) = distance {
                form.distance = v;
            }
            if let Some(v) = duration {
                form.duration = v;
            }
            if let Some(v) = cadence {
                form.cadence = v;
            }
            if let Some(v) = elevation {
                form.elevation = v;
            }
            let w = tracker.submit(&form)?;
            println!("{}", render::list_entry(w));
        }
        Cmd::Delete { id } => {
            if !tracker.delete(&id)? {
                tracing::warn!(id = %id, "no workout with this id");
            }
        }
        Cmd::Goto { id } => match tracker.focus(&id)? {
            Some(w) => println!("{}", render::list_entry(w)),
            None => tracing::warn!(id = %id, "no workout with this id"),
        },
        Cmd::ExportGpx { .. } => unreachable!("handled before the map is chosen"),
    }
    Ok(())
}
