//! Board-agnostic motion control core for the course robot
//!
//! This crate contains all navigation logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (wheels, encoders, pose service, clock, point store)
//! - Heading and distance geometry
//! - Dead-reckoning primitives (pivot turn, straight drive)
//! - Closed-loop correctors driven by the absolute pose service
//! - Waypoint table, navigator and calibration recorder
//! - Configuration and point-table persistence formats

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

#[macro_use]
mod fmt;

pub mod config;
pub mod geometry;
pub mod motion;
pub mod navigation;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use geometry::Pose;
pub use motion::{Chassis, MotionOutcome};
pub use navigation::{Navigator, Waypoint, WaypointTable};
