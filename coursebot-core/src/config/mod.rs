//! Configuration types
//!
//! Robot calibration (geometry and tuning) and the recorded waypoint
//! point table, plus the formats the point table is persisted in.

pub mod calibration;
pub mod motion;
pub mod points;

pub use calibration::{PointCalibration, CALIBRATION_MAGIC, CALIBRATION_VERSION};
pub use motion::{ConfigError, DriveGeometry, DriveTuning, MotionConfig, TimingConfig, TurnTuning};
pub use points::{CourseLayout, LayoutError, PointRecord, MAX_LABEL_LEN, MAX_WAYPOINTS};
