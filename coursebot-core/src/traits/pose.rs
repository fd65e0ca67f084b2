//! Absolute pose service trait

use crate::geometry::Pose;

/// External absolute position and heading reference
///
/// Implementations wrap the course positioning service. When the robot is
/// out of view the service returns a pose with a negative heading, which
/// callers treat as "no fix".
pub trait PoseSource {
    /// Prepare the service; called once before any navigation
    fn initialize(&mut self);

    /// Latest pose reading, possibly the invalid sentinel
    fn pose(&mut self) -> Pose;

    /// Latest pose reading if it carries a fix
    fn fix(&mut self) -> Option<Pose> {
        let pose = self.pose();
        pose.is_valid().then_some(pose)
    }
}
