//! Polled edge-counting encoder
//!
//! Counts rising edges on one encoder channel. The input is sampled each
//! time the count is read, so the caller must poll faster than the
//! fastest edge rate. The count is a magnitude: direction is not decoded.

use coursebot_core::traits::PulseCounter;
use embedded_hal::digital::InputPin;

pub struct EdgeEncoder<P> {
    pin: P,
    /// Level seen at the previous sample, unknown before the first one
    last_high: Option<bool>,
    count: u32,
    /// Samples where the pin could not be read
    read_errors: u32,
}

impl<P: InputPin> EdgeEncoder<P> {
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            last_high: None,
            count: 0,
            read_errors: 0,
        }
    }

    /// Sample the pin, counting a rising edge since the last sample
    pub fn poll(&mut self) -> u32 {
        match self.pin.is_high() {
            Ok(high) => {
                if high && self.last_high == Some(false) {
                    self.count = self.count.saturating_add(1);
                }
                self.last_high = Some(high);
            }
            Err(_) => self.read_errors = self.read_errors.saturating_add(1),
        }
        self.count
    }

    pub fn read_errors(&self) -> u32 {
        self.read_errors
    }

    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: InputPin> PulseCounter for EdgeEncoder<P> {
    fn count(&mut self) -> u32 {
        self.poll()
    }

    /// Zero the count; the last level is kept so a held-high pin does not
    /// count again
    fn reset(&mut self) {
        self.count = 0;
    }
}
