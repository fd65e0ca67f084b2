//! Motion control
//!
//! [`Chassis`] owns the drive train, the pose source and the clock. Its
//! open-loop primitives bound every move by encoder counts and a time cap;
//! its closed-loop correctors step the [`HeadingCorrector`] and
//! [`DistanceCorrector`] state machines against fresh pose readings.

pub mod chassis;
pub mod closed_loop;
pub mod corrector;
pub mod primitives;

pub use chassis::Chassis;
pub use corrector::{DistanceCorrector, DriveStep, HeadingCorrector, TurnPhase, TurnStep};

/// How a motion request ended
///
/// None of these are errors: the robot simply carries on from wherever
/// the move left it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionOutcome {
    /// Goal reached (encoder target met or pose within tolerance)
    Completed,
    /// Zero-size request; no motor was energized
    Skipped,
    /// Time cap hit; motors stopped with partial progress
    DeadlineExceeded,
    /// No pose fix arrived before the time cap; nothing was corrected
    NoFix,
    /// Finished without pose feedback because no fix was available
    OpenLoop,
    /// Target was the invalid sentinel pose; nothing moved
    InvalidTarget,
}

impl MotionOutcome {
    /// Check if the request finished as asked
    pub fn is_complete(&self) -> bool {
        matches!(self, MotionOutcome::Completed | MotionOutcome::Skipped)
    }
}
