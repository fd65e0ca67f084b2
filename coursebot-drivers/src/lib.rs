//! Hardware driver implementations
//!
//! Concrete implementations of the coursebot-core wheel traits over
//! embedded-hal 1.0:
//!
//! - H-bridge wheel motors (PWM duty plus a direction pin)
//! - Polled edge-counting wheel encoders
//! - A differential drive train composed of the two

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod drive;
pub mod encoder;
pub mod motor;

pub use drive::DifferentialDrive;
pub use encoder::EdgeEncoder;
pub use motor::HBridgeMotor;
