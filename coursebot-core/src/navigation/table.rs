//! Waypoint table
//!
//! The table pairs every name of the course layout with the pose recorded
//! for it. It is built once and never modified.

use heapless::{String, Vec};

use crate::config::points::{CourseLayout, PointRecord, MAX_LABEL_LEN, MAX_WAYPOINTS};
use crate::geometry::Pose;
use crate::traits::{PointStore, StoreError};

/// Errors loading the waypoint table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError {
    /// The point store could not be read
    Storage(StoreError),
    /// Fewer records than the layout has waypoints
    Missing { expected: usize, found: usize },
}

impl From<StoreError> for CalibrationError {
    fn from(e: StoreError) -> Self {
        CalibrationError::Storage(e)
    }
}

/// A named course location
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Waypoint {
    pub name: String<MAX_LABEL_LEN>,
    pub pose: Pose,
}

/// Recorded waypoints in layout order
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WaypointTable {
    waypoints: Vec<Waypoint, MAX_WAYPOINTS>,
}

impl WaypointTable {
    /// Pair layout names with records, in order
    ///
    /// Every name needs a record. Extra trailing records are ignored.
    pub fn from_records(
        layout: &CourseLayout,
        records: &[PointRecord],
    ) -> Result<Self, CalibrationError> {
        if records.len() < layout.len() {
            return Err(CalibrationError::Missing {
                expected: layout.len(),
                found: records.len(),
            });
        }

        let mut table = Self::default();
        for (name, record) in layout.names().zip(records) {
            let pose = record.pose();
            if !pose.is_valid() {
                warn!("waypoint {} was recorded without a fix", name);
            }
            let mut label = String::new();
            // layout names already fit the label capacity
            let _ = label.push_str(name);
            let _ = table.waypoints.push(Waypoint {
                name: label,
                pose,
            });
        }
        Ok(table)
    }

    /// Read the table from a point store
    pub fn load<S: PointStore>(layout: &CourseLayout, store: &mut S) -> Result<Self, CalibrationError> {
        let records = store.load()?;
        let table = Self::from_records(layout, &records)?;
        info!("loaded {} waypoints", table.len());
        Ok(table)
    }

    /// Look up a waypoint by name
    pub fn get(&self, name: &str) -> Option<&Waypoint> {
        self.waypoints.iter().find(|w| w.name.as_str() == name)
    }

    /// Pose of a waypoint, or the invalid sentinel for unknown names
    pub fn pose_of(&self, name: &str) -> Pose {
        self.get(name).map_or(Pose::INVALID, |w| w.pose)
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Waypoint> {
        self.waypoints.iter()
    }
}
