use crate::tracker::DEFAULT_ZOOM;
use crate::types::{Coords, Discipline};
use crate::utils::parse_coords;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

const DEFAULT_STORE: &str = "mapty.sqlite";

#[derive(Parser, Debug)]
#[command(
    name = "mapty",
    about = "Log running and cycling workouts pinned to map locations"
)]
pub struct Cli {
    /// SQLite file holding the stored workouts.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_STORE, global = true)]
    pub store: PathBuf,

    /// Your current position (LAT,LNG). Without it the map is not loaded.
    #[arg(long, value_name = "LAT,LNG", value_parser = parse_coords, global = true)]
    pub home: Option<Coords>,

    /// Zoom level used when centering the map on a position.
    #[arg(long, default_value_t = DEFAULT_ZOOM, global = true)]
    pub zoom: u8,

    /// Increase log verbosity (-v, -vv). Defaults to INFO.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease log verbosity (-q, -qq). Defaults to INFO.
    #[arg(short = 'q', long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Show stored workouts, newest first.
    List {
        /// One tab-separated line per workout with every stored field.
        #[arg(long)]
        details: bool,
    },

    /// Record a workout at a map location.
    Add {
        /// Location of the workout (LAT,LNG).
        #[arg(long, value_name = "LAT,LNG", value_parser = parse_coords, allow_hyphen_values = true)]
        at: Coords,

        #[arg(long = "type", value_name = "TYPE", default_value = "running")]
        discipline: Discipline,

        /// Distance in km.
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        distance: String,

        /// Duration in minutes.
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        duration: String,

        /// Steps per minute (running).
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        cadence: String,

        /// Elevation gain in meters (cycling).
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        elevation: String,
    },

    /// Change distance, duration and cadence/elevation of a workout.
    Edit {
        id: String,

        #[arg(long, allow_hyphen_values = true)]
        distance: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        duration: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        cadence: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        elevation: Option<String>,
    },

    /// Delete a workout. Unknown ids are ignored.
    Delete { id: String },

    /// Center the map on a workout.
    Goto { id: String },

    /// Write every workout as a GPX waypoint.
    ExportGpx {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
}
