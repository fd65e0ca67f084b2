//! Closed-loop correctors
//!
//! These wrap the dead-reckoning primitives in loops that re-sample the
//! absolute pose between moves. A reading without a fix never aborts a
//! loop: the iteration settles and samples again until the deadline.

use libm::{copysignf, fabsf};

use super::chassis::Chassis;
use super::corrector::{DistanceCorrector, DriveStep, HeadingCorrector, TurnStep};
use super::MotionOutcome;
use crate::geometry::{shortest_turn, Pose};
use crate::traits::{Clock, Deadline, DriveTrain, PoseSource};

impl<D, P, C> Chassis<D, P, C>
where
    D: DriveTrain,
    P: PoseSource,
    C: Clock,
{
    /// Turn until the pose service reports `target` within the fine threshold
    ///
    /// Large errors are taken out with one pivot sized to the current error;
    /// the rest in fixed pulses with a settle after each.
    pub fn turn_to_heading(&mut self, target: f32) -> MotionOutcome {
        let deadline = Deadline::after(&mut self.clock, self.config.turn.deadline_ms);
        self.turn_to_heading_until(target, deadline)
    }

    pub(crate) fn turn_to_heading_until(&mut self, target: f32, deadline: Deadline) -> MotionOutcome {
        if !target.is_finite() {
            warn!("turn to non-finite heading ignored");
            return MotionOutcome::InvalidTarget;
        }

        let mut corrector = HeadingCorrector::new(target, &self.config.turn);
        let mut seen_fix = false;

        loop {
            if deadline.expired(&mut self.clock) {
                self.drive.stop_all();
                warn!("turn to {} gave up in {:?}", corrector.target(), corrector.phase());
                return if seen_fix {
                    MotionOutcome::DeadlineExceeded
                } else {
                    MotionOutcome::NoFix
                };
            }

            let fix = self.pose.fix();
            seen_fix |= fix.is_some();

            match corrector.step(fix) {
                TurnStep::Done => {
                    debug!("on heading {}", corrector.target());
                    return MotionOutcome::Completed;
                }
                TurnStep::Wait => self.settle(),
                TurnStep::Pivot(degrees) => {
                    self.pivot_turn_until(degrees, deadline);
                    self.settle();
                }
            }
        }
    }

    /// Turn by `delta` degrees relative to the current heading
    ///
    /// With a fix this is a closed-loop [`turn_to_heading`](Self::turn_to_heading);
    /// without one the shortest equivalent pivot is made open-loop.
    pub fn turn_by(&mut self, delta: f32) -> MotionOutcome {
        if delta == 0.0 || !delta.is_finite() {
            return MotionOutcome::Skipped;
        }

        match self.pose.fix() {
            Some(pose) => self.turn_to_heading(pose.heading + delta),
            None => {
                warn!("no fix, turning {} open loop", delta);
                match self.pivot_turn(shortest_turn(delta)) {
                    MotionOutcome::Completed => MotionOutcome::OpenLoop,
                    other => other,
                }
            }
        }
    }

    /// Drive `distance` inches along the current heading
    ///
    /// A coarse drive stops short of the goal by the configured margin, then
    /// short pulses close the gap until the pose service puts the robot
    /// within the distance threshold. Without a starting fix the whole
    /// distance is driven on the encoders alone.
    pub fn drive_distance(&mut self, distance: f32) -> MotionOutcome {
        let deadline = Deadline::after(&mut self.clock, self.config.drive.deadline_ms);
        self.drive_distance_until(distance, deadline)
    }

    pub(crate) fn drive_distance_until(&mut self, distance: f32, deadline: Deadline) -> MotionOutcome {
        if distance == 0.0 || !distance.is_finite() {
            return MotionOutcome::Skipped;
        }
        let tuning = self.config.drive;

        let Some(start) = self.pose.fix() else {
            warn!("no fix, driving {} in open loop", distance);
            return match self.drive_straight_until(tuning.coarse_percent, distance, deadline) {
                MotionOutcome::Completed => MotionOutcome::OpenLoop,
                other => other,
            };
        };

        let coarse = fabsf(distance) - tuning.coarse_margin_in;
        if coarse > 0.0 {
            let outcome =
                self.drive_straight_until(tuning.coarse_percent, copysignf(coarse, distance), deadline);
            if outcome == MotionOutcome::DeadlineExceeded {
                return outcome;
            }
            self.settle();
        }

        let mut corrector = DistanceCorrector::new(start, distance, &tuning);
        loop {
            if deadline.expired(&mut self.clock) {
                self.drive.stop_all();
                warn!("drive of {} in gave up", distance);
                return MotionOutcome::DeadlineExceeded;
            }

            match corrector.step(self.pose.fix()) {
                DriveStep::Done => {
                    debug!("drove {} in", distance);
                    return MotionOutcome::Completed;
                }
                DriveStep::Wait => self.settle(),
                DriveStep::Pulse(step) => {
                    let pulse_deadline =
                        Deadline::after(&mut self.clock, tuning.pulse_timeout_ms).min(deadline);
                    self.drive_straight_until(tuning.pulse_percent, step, pulse_deadline);
                    self.settle();
                }
            }
        }
    }

    /// Drive to `target` in a straight line
    ///
    /// Turns to face the target, then drives the remaining distance. With
    /// `mid_course` the leg is split at its midpoint and the second half is
    /// re-aimed from wherever the robot actually got to.
    pub fn move_to_point(&mut self, target: &Pose, mid_course: bool) -> MotionOutcome {
        if !target.is_valid() {
            warn!("move to invalid point ({}, {}) ignored", target.x, target.y);
            return MotionOutcome::InvalidTarget;
        }

        let deadline = Deadline::after(&mut self.clock, self.config.timing.leg_deadline_ms);
        let Some(start) = self.wait_for_fix(deadline) else {
            warn!("no fix, cannot move to ({}, {})", target.x, target.y);
            return MotionOutcome::NoFix;
        };

        if mid_course && start.distance_to(target) > 2.0 * self.config.drive.distance_threshold_in {
            let mid = start.midpoint(target);
            let outcome = self.run_leg(start, &mid, deadline);
            if outcome == MotionOutcome::DeadlineExceeded {
                return outcome;
            }
            let Some(here) = self.wait_for_fix(deadline) else {
                return MotionOutcome::NoFix;
            };
            return self.run_leg(here, target, deadline);
        }

        self.run_leg(start, target, deadline)
    }

    fn run_leg(&mut self, from: Pose, to: &Pose, deadline: Deadline) -> MotionOutcome {
        let distance = from.distance_to(to);
        if distance <= self.config.drive.distance_threshold_in {
            return MotionOutcome::Completed;
        }

        let bearing = from.bearing_to(to);
        debug!("leg to ({}, {}): {} in at {} deg", to.x, to.y, distance, bearing);

        let turn_deadline =
            Deadline::after(&mut self.clock, self.config.turn.deadline_ms).min(deadline);
        self.turn_to_heading_until(bearing, turn_deadline);
        if deadline.expired(&mut self.clock) {
            self.drive.stop_all();
            return MotionOutcome::DeadlineExceeded;
        }
        self.settle();

        let remaining = match self.pose.fix() {
            Some(pose) => pose.distance_to(to),
            None => distance,
        };
        let drive_deadline =
            Deadline::after(&mut self.clock, self.config.drive.deadline_ms).min(deadline);
        match self.drive_distance_until(remaining, drive_deadline) {
            MotionOutcome::Skipped => MotionOutcome::Completed,
            other => other,
        }
    }
}
