//! Wheel actuation traits
//!
//! The chassis talks to the wheels through [`DriveTrain`]. Driver crates
//! usually build a `DriveTrain` out of two [`WheelMotor`]s and two
//! [`PulseCounter`]s.

/// Wheel identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Wheel {
    Left,
    Right,
}

impl Wheel {
    /// Both wheels, left first
    pub const BOTH: [Wheel; 2] = [Wheel::Left, Wheel::Right];
}

/// Clamp a power request into the `[-100, 100]` percent range
pub fn saturate_percent(percent: f32) -> f32 {
    if percent.is_nan() {
        0.0
    } else {
        percent.clamp(-100.0, 100.0)
    }
}

/// Two independently driven wheels with rotary encoders
///
/// Encoder counts measure the magnitude of rotation, not its direction:
/// between two resets a count never decreases.
pub trait DriveTrain {
    /// Drive one wheel at a signed percent of full power
    ///
    /// Values outside `[-100, 100]` saturate.
    fn set_power(&mut self, wheel: Wheel, percent: f32);

    /// Cut power to one wheel
    fn stop(&mut self, wheel: Wheel);

    /// Zero the encoder count of one wheel
    fn reset_count(&mut self, wheel: Wheel);

    /// Encoder pulses accumulated since the last reset
    ///
    /// Takes `&mut self` because polled encoders sample their input here.
    fn count(&mut self, wheel: Wheel) -> u32;

    /// Cut power to both wheels
    fn stop_all(&mut self) {
        for wheel in Wheel::BOTH {
            self.stop(wheel);
        }
    }

    /// Zero both encoder counts
    fn reset_counts(&mut self) {
        for wheel in Wheel::BOTH {
            self.reset_count(wheel);
        }
    }

    /// Sum of both encoder counts
    fn total_count(&mut self) -> u32 {
        self.count(Wheel::Left)
            .saturating_add(self.count(Wheel::Right))
    }
}

/// A single DC wheel motor
pub trait WheelMotor {
    /// Drive at a signed percent of full power (saturating)
    fn set_percent(&mut self, percent: f32);

    /// Cut power
    fn stop(&mut self);
}

/// A single wheel encoder
pub trait PulseCounter {
    /// Pulses since the last reset
    fn count(&mut self) -> u32;

    /// Zero the count
    fn reset(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturate_percent() {
        assert_eq!(saturate_percent(40.0), 40.0);
        assert_eq!(saturate_percent(-140.0), -100.0);
        assert_eq!(saturate_percent(250.0), 100.0);
        assert_eq!(saturate_percent(f32::NAN), 0.0);
    }
}
