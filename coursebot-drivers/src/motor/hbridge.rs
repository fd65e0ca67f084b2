//! H-bridge DC wheel motor
//!
//! Speed is the PWM duty cycle and direction is a single GPIO on the
//! bridge. Which physical channel ends up as "left", and which way is
//! "forward", depends on the wiring; the `inverted` flag absorbs the
//! latter so the core only ever sees counter-clockwise-positive turns.
//!
//! ```ignore
//! let left = HBridgeMotor::new(pwm_a, dir_a).inverted();
//! let right = HBridgeMotor::new(pwm_b, dir_b);
//! ```

use coursebot_core::traits::{saturate_percent, WheelMotor};
use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

/// H-bridge motor state
pub struct HBridgeMotor<PWM, DIR> {
    pwm: PWM,
    dir: DIR,
    /// Swap the meaning of the direction pin
    inverted: bool,
    /// Last commanded power (-100 to 100%)
    percent: f32,
    /// A HAL call failed since the last `clear_fault`
    fault: bool,
}

impl<PWM, DIR> HBridgeMotor<PWM, DIR>
where
    PWM: SetDutyCycle,
    DIR: OutputPin,
{
    /// Create a motor; the output is not touched until the first command
    pub fn new(pwm: PWM, dir: DIR) -> Self {
        Self {
            pwm,
            dir,
            inverted: false,
            percent: 0.0,
            fault: false,
        }
    }

    /// Reverse the direction pin polarity
    pub fn inverted(mut self) -> Self {
        self.inverted = !self.inverted;
        self
    }

    /// Last commanded power
    pub fn percent(&self) -> f32 {
        self.percent
    }

    pub fn has_fault(&self) -> bool {
        self.fault
    }

    pub fn clear_fault(&mut self) {
        self.fault = false;
    }

    /// Give back the PWM channel and direction pin
    pub fn release(self) -> (PWM, DIR) {
        (self.pwm, self.dir)
    }

    fn duty_for(&self, percent: f32) -> u16 {
        let max = self.pwm.max_duty_cycle() as f32;
        libm::roundf(libm::fabsf(percent) / 100.0 * max) as u16
    }
}

impl<PWM, DIR> WheelMotor for HBridgeMotor<PWM, DIR>
where
    PWM: SetDutyCycle,
    DIR: OutputPin,
{
    fn set_percent(&mut self, percent: f32) {
        let percent = saturate_percent(percent);
        let forward = (percent >= 0.0) != self.inverted;

        let dir_ok = if forward {
            self.dir.set_high().is_ok()
        } else {
            self.dir.set_low().is_ok()
        };
        let duty = self.duty_for(percent);
        let pwm_ok = self.pwm.set_duty_cycle(duty).is_ok();

        self.fault |= !(dir_ok && pwm_ok);
        self.percent = percent;
    }

    fn stop(&mut self) {
        self.fault |= self.pwm.set_duty_cycle(0).is_err();
        self.percent = 0.0;
    }
}
