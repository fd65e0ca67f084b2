//! Dead-reckoning primitives
//!
//! Each primitive follows the same pattern: stop both wheels, zero the
//! encoders, energize, poll the counts until the target is met or the
//! deadline passes, then stop both wheels again on every exit path.

use libm::{copysignf, fabsf};

use super::chassis::Chassis;
use super::MotionOutcome;
use crate::traits::{Clock, Deadline, DriveTrain, PoseSource, Wheel};

impl<D, P, C> Chassis<D, P, C>
where
    D: DriveTrain,
    P: PoseSource,
    C: Clock,
{
    /// Rotate in place about the axle midpoint
    ///
    /// Positive degrees turn counter-clockwise. The turn ends when the
    /// summed encoder count reaches the calibrated target or after the
    /// pivot time cap, whichever comes first. A zero turn is a no-op and
    /// never energizes a motor.
    pub fn pivot_turn(&mut self, degrees: f32) -> MotionOutcome {
        self.pivot_turn_until(degrees, Deadline::never())
    }

    /// [`pivot_turn`](Self::pivot_turn), also bounded by an outer deadline
    pub(crate) fn pivot_turn_until(&mut self, degrees: f32, outer: Deadline) -> MotionOutcome {
        if degrees == 0.0 || !degrees.is_finite() {
            return MotionOutcome::Skipped;
        }

        let target = self.config.geometry.counts_per_degree() * fabsf(degrees);
        let power = copysignf(self.config.turn.turn_percent, degrees);
        let deadline =
            Deadline::after(&mut self.clock, self.config.turn.pivot_timeout_ms).min(outer);

        self.drive.stop_all();
        self.drive.reset_counts();
        self.drive.set_power(Wheel::Left, -power);
        self.drive.set_power(Wheel::Right, power);

        let outcome = self.poll_counts(deadline, |drive| drive.total_count() as f32 >= target);
        self.drive.stop_all();

        debug!("pivot {} deg: {:?}", degrees, outcome);
        outcome
    }

    /// Drive both wheels the same way for `distance` inches
    ///
    /// The sign of `distance` picks the direction. The right wheel gets the
    /// configured veer trim on top of `percent`. `timeout_ms` caps the move;
    /// `None` leaves it bounded only by the encoders.
    pub fn drive_straight(
        &mut self,
        percent: f32,
        distance: f32,
        timeout_ms: Option<u32>,
    ) -> MotionOutcome {
        let deadline = Deadline::optional(&mut self.clock, timeout_ms);
        self.drive_straight_until(percent, distance, deadline)
    }

    pub(crate) fn drive_straight_until(
        &mut self,
        percent: f32,
        distance: f32,
        deadline: Deadline,
    ) -> MotionOutcome {
        if distance == 0.0 || !distance.is_finite() {
            return MotionOutcome::Skipped;
        }
        if percent.is_nan() || percent <= 0.0 {
            warn!("drive at {}% would never finish, ignored", percent);
            return MotionOutcome::Skipped;
        }

        let target = self.config.geometry.counts_per_inch() * fabsf(distance);
        let left = copysignf(percent, distance);
        let right = copysignf(percent + self.config.drive.veer_trim_percent, distance);

        self.drive.stop_all();
        self.drive.reset_counts();
        self.drive.set_power(Wheel::Right, right);
        self.drive.set_power(Wheel::Left, left);

        let outcome =
            self.poll_counts(deadline, |drive| drive.total_count() as f32 / 2.0 >= target);
        self.drive.stop_all();

        debug!("drive {} in at {}%: {:?}", distance, percent, outcome);
        outcome
    }

    fn poll_counts<F>(&mut self, deadline: Deadline, mut reached: F) -> MotionOutcome
    where
        F: FnMut(&mut D) -> bool,
    {
        loop {
            if reached(&mut self.drive) {
                return MotionOutcome::Completed;
            }
            if deadline.expired(&mut self.clock) {
                return MotionOutcome::DeadlineExceeded;
            }
            self.clock.delay_ms(self.config.timing.poll_interval_ms);
        }
    }
}
