//! Exclusively owned robot hardware
//!
//! All motion goes through one `Chassis`. It owns the wheels, the pose
//! source and the clock, so no other code can issue a competing command.

use crate::config::MotionConfig;
use crate::geometry::Pose;
use crate::traits::{Clock, Deadline, DriveTrain, PoseSource};

/// Drive train, pose source and clock plus their calibration
pub struct Chassis<D, P, C> {
    pub(crate) drive: D,
    pub(crate) pose: P,
    pub(crate) clock: C,
    pub(crate) config: MotionConfig,
}

impl<D, P, C> Chassis<D, P, C>
where
    D: DriveTrain,
    P: PoseSource,
    C: Clock,
{
    /// Assemble a chassis; the motors are stopped immediately
    pub fn new(mut drive: D, pose: P, clock: C, config: MotionConfig) -> Self {
        drive.stop_all();
        Self {
            drive,
            pose,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Swap in a new calibration
    pub fn set_config(&mut self, config: MotionConfig) {
        self.config = config;
    }

    pub fn drive_mut(&mut self) -> &mut D {
        &mut self.drive
    }

    pub fn pose_source_mut(&mut self) -> &mut P {
        &mut self.pose
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Take the hardware back, motors stopped
    pub fn into_parts(mut self) -> (D, P, C) {
        self.drive.stop_all();
        (self.drive, self.pose, self.clock)
    }

    /// Initialize the pose service
    pub fn initialize_pose_source(&mut self) {
        self.pose.initialize();
    }

    /// Current pose if the service has a fix
    pub fn current_pose(&mut self) -> Option<Pose> {
        self.pose.fix()
    }

    /// Cut power to both wheels
    pub fn stop(&mut self) {
        self.drive.stop_all();
    }

    /// Block for the configured settle time
    pub fn settle(&mut self) {
        self.clock.delay_ms(self.config.timing.settle_ms);
    }

    /// Block for `ms` milliseconds
    pub fn sleep_ms(&mut self, ms: u32) {
        self.clock.delay_ms(ms);
    }

    /// Poll the pose service until it reports a fix or the deadline passes
    pub fn wait_for_fix(&mut self, deadline: Deadline) -> Option<Pose> {
        loop {
            if let Some(pose) = self.pose.fix() {
                return Some(pose);
            }
            if deadline.expired(&mut self.clock) {
                return None;
            }
            self.settle();
        }
    }
}
