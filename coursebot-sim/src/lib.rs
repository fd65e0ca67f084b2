//! Host simulation of the course robot
//!
//! Runs the coursebot-core navigator against a perfect-odometry world
//! model so courses and tuning can be tried without hardware.

pub mod config;
pub mod error;
pub mod runner;
pub mod store;
pub mod world;

pub use config::SimConfig;
pub use error::{Result, SimError};
pub use store::FilePointStore;
pub use world::Simulation;
