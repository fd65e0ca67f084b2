//! Hardware abstraction traits
//!
//! These traits define the interface between the motion logic and the
//! robot-specific implementations (real drivers or the simulator).

pub mod clock;
pub mod drive;
pub mod pose;
pub mod store;

pub use clock::{Clock, Deadline};
pub use drive::{saturate_percent, DriveTrain, PulseCounter, Wheel, WheelMotor};
pub use pose::PoseSource;
pub use store::{PointStore, StoreError};
