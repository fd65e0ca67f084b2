//! Correction state machines
//!
//! The correctors decide what to do next from a pose reading; they never
//! touch hardware. The chassis feeds them readings and carries out the
//! steps they return, which keeps the decision logic testable on its own.

use libm::{copysignf, fabsf};

use crate::config::{DriveTuning, TurnTuning};
use crate::geometry::{heading_error, normalize_heading, Pose};

/// Phase of a turn-to-heading correction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TurnPhase {
    /// Large errors, one pivot sized to the whole error per step
    Coarse,
    /// Small errors, fixed-size pulses toward the target
    Fine,
    /// Within the fine threshold
    Done,
}

/// Next action of a heading correction
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TurnStep {
    /// Pivot by this many degrees (positive is counter-clockwise)
    Pivot(f32),
    /// No fix this cycle; settle and sample again
    Wait,
    /// On heading
    Done,
}

/// Coarse-then-fine heading correction
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HeadingCorrector {
    target: f32,
    phase: TurnPhase,
    coarse_threshold: f32,
    fine_threshold: f32,
    pulse: f32,
}

impl HeadingCorrector {
    pub fn new(target: f32, tuning: &TurnTuning) -> Self {
        Self {
            target: normalize_heading(target),
            phase: TurnPhase::Coarse,
            coarse_threshold: tuning.coarse_threshold_deg,
            fine_threshold: tuning.fine_threshold_deg,
            pulse: tuning.pulse_angle_deg,
        }
    }

    /// Target heading, normalized
    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Decide the next action from the latest reading
    ///
    /// Once the error has dropped to the coarse threshold the corrector
    /// stays in the fine phase, so an overshoot is walked back in pulses.
    pub fn step(&mut self, fix: Option<Pose>) -> TurnStep {
        if self.phase == TurnPhase::Done {
            return TurnStep::Done;
        }
        let Some(pose) = fix else {
            return TurnStep::Wait;
        };

        let error = heading_error(pose.heading, self.target);
        if self.phase == TurnPhase::Coarse {
            if fabsf(error) > self.coarse_threshold {
                return TurnStep::Pivot(error);
            }
            self.phase = TurnPhase::Fine;
        }

        if fabsf(error) > self.fine_threshold {
            TurnStep::Pivot(copysignf(self.pulse, error))
        } else {
            self.phase = TurnPhase::Done;
            TurnStep::Done
        }
    }
}

/// Next action of a distance correction
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriveStep {
    /// Drive this many inches (sign is direction)
    Pulse(f32),
    /// No fix this cycle; settle and sample again
    Wait,
    /// Remaining distance within the threshold
    Done,
}

/// Pulsed straight-line distance correction
///
/// Progress is measured as straight-line distance from the start pose, so
/// the corrector works the same driving forward or backward. It only
/// decides how far to go, never which way: sideways drift left by the
/// heading tolerance carries through to the end of the drive.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DistanceCorrector {
    start: Pose,
    distance: f32,
    pulse: f32,
    threshold: f32,
    done: bool,
}

impl DistanceCorrector {
    /// Track a drive of `distance` inches (signed) that began at `start`
    pub fn new(start: Pose, distance: f32, tuning: &DriveTuning) -> Self {
        Self {
            start,
            distance,
            pulse: copysignf(tuning.pulse_distance_in, distance),
            threshold: tuning.distance_threshold_in,
            done: false,
        }
    }

    /// Distance still to go from a reading
    pub fn remaining(&self, pose: &Pose) -> f32 {
        fabsf(self.distance) - self.start.distance_to(pose)
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Decide the next action from the latest reading
    pub fn step(&mut self, fix: Option<Pose>) -> DriveStep {
        if self.done {
            return DriveStep::Done;
        }
        let Some(pose) = fix else {
            return DriveStep::Wait;
        };

        if self.remaining(&pose) <= self.threshold {
            self.done = true;
            DriveStep::Done
        } else {
            DriveStep::Pulse(self.pulse)
        }
    }
}
