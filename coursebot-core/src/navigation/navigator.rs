//! Waypoint navigator

use super::table::{CalibrationError, WaypointTable};
use crate::config::points::CourseLayout;
use crate::geometry::Pose;
use crate::motion::{Chassis, MotionOutcome};
use crate::traits::{Clock, DriveTrain, PointStore, PoseSource};

/// Drives the chassis between named waypoints
pub struct Navigator<D, P, C> {
    chassis: Chassis<D, P, C>,
    table: WaypointTable,
}

impl<D, P, C> Navigator<D, P, C>
where
    D: DriveTrain,
    P: PoseSource,
    C: Clock,
{
    /// Pair a chassis with an already loaded table
    pub fn new(chassis: Chassis<D, P, C>, table: WaypointTable) -> Self {
        Self { chassis, table }
    }

    /// Load the waypoint table, then bring up the pose service
    ///
    /// A short or unreadable point table is fatal: no navigator is built
    /// and the pose service is left untouched.
    pub fn start<S: PointStore>(
        mut chassis: Chassis<D, P, C>,
        layout: &CourseLayout,
        store: &mut S,
    ) -> Result<Self, CalibrationError> {
        let table = WaypointTable::load(layout, store)?;
        chassis.initialize_pose_source();
        Ok(Self::new(chassis, table))
    }

    /// Drive to a named waypoint
    ///
    /// Returns the waypoint's recorded pose, or [`Pose::INVALID`] for an
    /// unknown name, in which case nothing moves.
    pub fn go_to(&mut self, name: &str) -> Pose {
        self.go_to_with(name, false).0
    }

    /// [`go_to`](Self::go_to) with the leg split at its midpoint
    pub fn go_to_via_midpoint(&mut self, name: &str) -> Pose {
        self.go_to_with(name, true).0
    }

    /// Drive to a named waypoint and turn to its recorded heading
    pub fn go_to_facing(&mut self, name: &str) -> Pose {
        let (target, _) = self.go_to_with(name, false);
        self.face(target)
    }

    /// [`go_to_facing`](Self::go_to_facing) with the leg split at its midpoint
    pub fn go_to_facing_via_midpoint(&mut self, name: &str) -> Pose {
        let (target, _) = self.go_to_with(name, true);
        self.face(target)
    }

    fn face(&mut self, target: Pose) -> Pose {
        if target.is_valid() {
            let outcome = self.chassis.turn_to_heading(target.heading);
            debug!("facing {}: {:?}", target.heading, outcome);
        }
        target
    }

    fn go_to_with(&mut self, name: &str, mid_course: bool) -> (Pose, MotionOutcome) {
        let Some(target) = self.table.get(name).map(|w| w.pose) else {
            warn!("unknown waypoint: {}", name);
            return (Pose::INVALID, MotionOutcome::InvalidTarget);
        };

        info!("heading for {}", name);
        let outcome = self.chassis.move_to_point(&target, mid_course);
        if !outcome.is_complete() {
            warn!("{} not reached: {:?}", name, outcome);
        }
        (target, outcome)
    }

    pub fn table(&self) -> &WaypointTable {
        &self.table
    }

    pub fn chassis(&self) -> &Chassis<D, P, C> {
        &self.chassis
    }

    /// Chassis for issuing primitives directly between waypoints
    pub fn chassis_mut(&mut self) -> &mut Chassis<D, P, C> {
        &mut self.chassis
    }

    pub fn into_chassis(self) -> Chassis<D, P, C> {
        self.chassis
    }
}
