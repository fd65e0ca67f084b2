//! Differential drive train
//!
//! Composes two wheel motors and two encoders into the chassis-facing
//! [`DriveTrain`].

use coursebot_core::traits::{saturate_percent, DriveTrain, PulseCounter, Wheel, WheelMotor};

pub struct DifferentialDrive<M, E> {
    left: M,
    right: M,
    left_encoder: E,
    right_encoder: E,
}

impl<M, E> DifferentialDrive<M, E>
where
    M: WheelMotor,
    E: PulseCounter,
{
    /// Compose a drive train; both motors are stopped and encoders zeroed
    pub fn new(mut left: M, mut right: M, mut left_encoder: E, mut right_encoder: E) -> Self {
        left.stop();
        right.stop();
        left_encoder.reset();
        right_encoder.reset();
        Self {
            left,
            right,
            left_encoder,
            right_encoder,
        }
    }

    pub fn motor_mut(&mut self, wheel: Wheel) -> &mut M {
        match wheel {
            Wheel::Left => &mut self.left,
            Wheel::Right => &mut self.right,
        }
    }

    pub fn encoder_mut(&mut self, wheel: Wheel) -> &mut E {
        match wheel {
            Wheel::Left => &mut self.left_encoder,
            Wheel::Right => &mut self.right_encoder,
        }
    }

    /// Split back into (left, right, left encoder, right encoder)
    pub fn release(self) -> (M, M, E, E) {
        (self.left, self.right, self.left_encoder, self.right_encoder)
    }
}

impl<M, E> DriveTrain for DifferentialDrive<M, E>
where
    M: WheelMotor,
    E: PulseCounter,
{
    fn set_power(&mut self, wheel: Wheel, percent: f32) {
        self.motor_mut(wheel).set_percent(saturate_percent(percent));
    }

    fn stop(&mut self, wheel: Wheel) {
        self.motor_mut(wheel).stop();
    }

    fn reset_count(&mut self, wheel: Wheel) {
        self.encoder_mut(wheel).reset();
    }

    fn count(&mut self, wheel: Wheel) -> u32 {
        self.encoder_mut(wheel).count()
    }
}
