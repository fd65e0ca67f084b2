//! Motion tuning
//!
//! Every number in here is calibration data for one particular robot:
//! wheel geometry, motor powers, thresholds and time caps. Nothing in the
//! control logic hard-codes them.

use core::f32::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Wheel geometry must be strictly positive
    InvalidGeometry,
    /// Motor power outside (0, 100]
    InvalidPower,
    /// Fine threshold must be positive and below the coarse threshold
    InvalidThreshold,
    /// Pulse sizes must be positive
    InvalidPulse,
}

/// Wheel and encoder geometry
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DriveGeometry {
    /// Encoder pulses per wheel revolution
    pub counts_per_rev: f32,
    /// Distance between the two wheel contact patches (inches)
    pub track_width_in: f32,
    /// Wheel diameter (inches)
    pub wheel_diameter_in: f32,
    /// Empirical multiplier on the ideal pivot count
    ///
    /// Wheels slip while pivoting, so the robot needs slightly more encoder
    /// travel than the geometry predicts. 1.0 means no slip.
    pub turn_correction: f32,
}

impl Default for DriveGeometry {
    fn default() -> Self {
        Self {
            counts_per_rev: 318.0,
            track_width_in: 7.86,
            wheel_diameter_in: 2.41,
            turn_correction: 1.0711,
        }
    }
}

impl DriveGeometry {
    /// Average per-wheel encoder pulses for one inch of straight travel
    pub fn counts_per_inch(&self) -> f32 {
        self.counts_per_rev / (PI * self.wheel_diameter_in)
    }

    /// Summed (left + right) encoder pulses for one degree of pivot
    ///
    /// Each wheel rolls along an arc of radius `track / 2`, so the sum of
    /// both wheels is `track * pi / 180` inches per degree.
    pub fn counts_per_degree(&self) -> f32 {
        self.turn_correction * self.counts_per_rev * self.track_width_in
            / (180.0 * self.wheel_diameter_in)
    }
}

/// Heading control tuning
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TurnTuning {
    /// Wheel power while pivoting (percent)
    pub turn_percent: f32,
    /// Time cap for one pivot; stalled encoders end the turn here (ms)
    pub pivot_timeout_ms: u32,
    /// Errors above this are corrected with one full-size pivot (degrees)
    pub coarse_threshold_deg: f32,
    /// Errors at or below this count as on-heading (degrees)
    pub fine_threshold_deg: f32,
    /// Size of one fine-phase pulse (degrees)
    pub pulse_angle_deg: f32,
    /// Time cap for a whole turn-to-heading correction (ms)
    pub deadline_ms: u32,
}

impl Default for TurnTuning {
    fn default() -> Self {
        Self {
            turn_percent: 30.0,
            pivot_timeout_ms: 4000,
            coarse_threshold_deg: 10.0,
            fine_threshold_deg: 1.0,
            pulse_angle_deg: 0.5,
            deadline_ms: 10_000,
        }
    }
}

/// Straight-line drive tuning
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DriveTuning {
    /// Wheel power for the coarse stage (percent)
    pub coarse_percent: f32,
    /// Extra power on the right wheel to cancel a systematic veer (percent)
    pub veer_trim_percent: f32,
    /// The coarse stage stops this far short of the goal (inches)
    ///
    /// Motors coast after power is cut; undershooting leaves the last bit
    /// to the fine stage instead of overshooting.
    pub coarse_margin_in: f32,
    /// Length of one fine-stage pulse (inches)
    pub pulse_distance_in: f32,
    /// Wheel power for fine-stage pulses (percent)
    pub pulse_percent: f32,
    /// Time cap for one fine-stage pulse (ms)
    pub pulse_timeout_ms: u32,
    /// Remaining distance at or below this counts as arrived (inches)
    pub distance_threshold_in: f32,
    /// Time cap for a whole drive-distance correction (ms)
    pub deadline_ms: u32,
}

impl Default for DriveTuning {
    fn default() -> Self {
        Self {
            coarse_percent: 40.0,
            veer_trim_percent: 1.0,
            coarse_margin_in: 0.75,
            pulse_distance_in: 0.05,
            pulse_percent: 20.0,
            pulse_timeout_ms: 1000,
            distance_threshold_in: 0.15,
            deadline_ms: 20_000,
        }
    }
}

/// Loop pacing
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimingConfig {
    /// Pause after each motion so the robot and pose service settle (ms)
    pub settle_ms: u32,
    /// Sleep between encoder polls inside a primitive (ms)
    pub poll_interval_ms: u32,
    /// Time cap for one move-to-point leg, turn and drive included (ms)
    pub leg_deadline_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            settle_ms: 200,
            poll_interval_ms: 1,
            leg_deadline_ms: 30_000,
        }
    }
}

/// Complete motion calibration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MotionConfig {
    pub geometry: DriveGeometry,
    pub turn: TurnTuning,
    pub drive: DriveTuning,
    pub timing: TimingConfig,
}

impl MotionConfig {
    /// Check that the calibration is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = &self.geometry;
        if !(g.counts_per_rev > 0.0
            && g.track_width_in > 0.0
            && g.wheel_diameter_in > 0.0
            && g.turn_correction > 0.0)
        {
            return Err(ConfigError::InvalidGeometry);
        }

        for power in [
            self.turn.turn_percent,
            self.drive.coarse_percent,
            self.drive.pulse_percent,
        ] {
            if !(power > 0.0 && power <= 100.0) {
                return Err(ConfigError::InvalidPower);
            }
        }

        if !(self.turn.fine_threshold_deg > 0.0
            && self.turn.fine_threshold_deg < self.turn.coarse_threshold_deg
            && self.drive.distance_threshold_in > 0.0)
        {
            return Err(ConfigError::InvalidThreshold);
        }

        if !(self.turn.pulse_angle_deg > 0.0
            && self.drive.pulse_distance_in > 0.0
            && self.drive.coarse_margin_in >= 0.0)
        {
            return Err(ConfigError::InvalidPulse);
        }

        Ok(())
    }
}
