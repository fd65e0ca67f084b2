//! Configuration loading for the simulator
//!
//! ```toml
//! [motion.drive]
//! veer_trim_percent = 0.0
//!
//! [world]
//! dropout_every = 7
//!
//! [course]
//! waypoints = ["Start", "Ramp"]
//! route = ["Ramp", "Start"]
//! points = "position.txt"
//! ```

use std::path::{Path, PathBuf};

use coursebot_core::config::{CourseLayout, MotionConfig};
use serde::Deserialize;

use crate::error::{Result, SimError};
use crate::world::WorldConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub motion: MotionConfig,
    pub world: WorldConfig,
    pub course: CourseConfig,
}

/// Waypoints, the route through them and where their poses live
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CourseConfig {
    /// Waypoint names in point table order
    pub waypoints: Vec<String>,
    /// Waypoint names to visit, in order
    pub route: Vec<String>,
    /// Point table file; `.bin` selects the binary block layout
    pub points: PathBuf,
    /// Turn to each waypoint's recorded heading on arrival
    pub facing: bool,
    /// Split every leg at its midpoint
    pub mid_course: bool,
    /// Where the simulated operator parks the robot while recording,
    /// one `[x, y, heading]` per waypoint
    pub placements: Vec<[f32; 3]>,
}

impl Default for CourseConfig {
    fn default() -> Self {
        Self {
            waypoints: Vec::new(),
            route: Vec::new(),
            points: PathBuf::from("position.txt"),
            facing: true,
            mid_course: false,
            placements: Vec::new(),
        }
    }
}

impl SimConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate a TOML document
    pub fn parse(contents: &str) -> Result<Self> {
        let config: SimConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.motion.validate()?;
        let layout = self.layout()?;

        if let Some(unknown) = self.course.route.iter().find(|name| layout.position(name).is_none()) {
            return Err(SimError::Config(format!("route visits unknown waypoint {unknown:?}")));
        }
        if !self.course.placements.is_empty() && self.course.placements.len() != layout.len() {
            return Err(SimError::Config(format!(
                "{} placements for {} waypoints",
                self.course.placements.len(),
                layout.len()
            )));
        }
        Ok(())
    }

    /// Course layout from the waypoint names
    pub fn layout(&self) -> Result<CourseLayout> {
        let names: Vec<&str> = self.course.waypoints.iter().map(String::as_str).collect();
        Ok(CourseLayout::from_names(&names)?)
    }
}
