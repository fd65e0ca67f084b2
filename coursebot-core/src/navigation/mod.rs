//! Waypoint navigation
//!
//! A [`Navigator`] owns the chassis and a [`WaypointTable`] loaded once at
//! startup. Waypoints are recorded on the course beforehand with
//! [`record_waypoints`] and persisted through a point store.

pub mod navigator;
pub mod recorder;
pub mod table;

pub use navigator::Navigator;
pub use recorder::{calibrate, record_waypoints, Confirm, RecordError, RECORD_PAUSE_MS, SAMPLE_INTERVAL_MS};
pub use table::{CalibrationError, Waypoint, WaypointTable};
