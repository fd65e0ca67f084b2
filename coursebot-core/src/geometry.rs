//! Course geometry
//!
//! Headings are in degrees, measured counter-clockwise from the +X axis of
//! the course and kept in `[0, 360)`. Distances are in inches.

use core::f32::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Robot position and heading in course coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pose {
    pub x: f32,
    pub y: f32,
    /// Heading in degrees, `[0, 360)`; negative means "no fix"
    pub heading: f32,
}

impl Pose {
    /// Sentinel reported when no fix is available
    pub const INVALID: Pose = Pose {
        x: -2.0,
        y: -2.0,
        heading: -2.0,
    };

    /// Create a pose, normalizing the heading
    pub fn new(x: f32, y: f32, heading: f32) -> Self {
        Self {
            x,
            y,
            heading: normalize_heading(heading),
        }
    }

    /// Check if this reading carries a fix
    pub fn is_valid(&self) -> bool {
        self.heading >= 0.0 && self.heading.is_finite() && self.x.is_finite() && self.y.is_finite()
    }

    /// Straight-line distance to another pose
    pub fn distance_to(&self, other: &Pose) -> f32 {
        libm::hypotf(other.x - self.x, other.y - self.y)
    }

    /// Heading that points from this pose toward another, in `[0, 360)`
    pub fn bearing_to(&self, other: &Pose) -> f32 {
        let angle = to_degrees(libm::atan2f(other.y - self.y, other.x - self.x));
        normalize_heading(angle)
    }

    /// Point halfway between two poses, facing the bearing between them
    pub fn midpoint(&self, other: &Pose) -> Pose {
        Pose::new(
            (self.x + other.x) / 2.0,
            (self.y + other.y) / 2.0,
            self.bearing_to(other),
        )
    }
}

/// Wrap a heading into `[0, 360)`
pub fn normalize_heading(degrees: f32) -> f32 {
    if !degrees.is_finite() {
        return degrees;
    }
    let mut wrapped = libm::fmodf(degrees, 360.0);
    if wrapped < 0.0 {
        wrapped += 360.0;
    }
    // -tiny + 360 rounds up to 360
    if wrapped >= 360.0 {
        wrapped -= 360.0;
    }
    wrapped
}

/// Signed shortest turn from `from` to `to`, in `(-180, 180]`
///
/// Positive values are counter-clockwise.
pub fn heading_error(from: f32, to: f32) -> f32 {
    let diff = normalize_heading(to - from);
    if diff > 180.0 {
        diff - 360.0
    } else {
        diff
    }
}

/// Wrap a relative turn into `(-180, 180]`
pub fn shortest_turn(degrees: f32) -> f32 {
    heading_error(0.0, degrees)
}

pub fn to_degrees(radians: f32) -> f32 {
    radians * 180.0 / PI
}

pub fn to_radians(degrees: f32) -> f32 {
    degrees * PI / 180.0
}
