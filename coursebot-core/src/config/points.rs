//! Waypoint point table
//!
//! The course layout names the waypoints in a fixed, pre-agreed order; the
//! point table holds one recorded pose per name in that same order. The
//! text layout is the one written to the SD card by the calibration run:
//!
//! ```text
//! 12.250000	30.100000	90.000000
//! 18.500000	41.750000	270.500000
//!
//! ```

use core::fmt::Write;

use heapless::{String, Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::Pose;

/// Maximum waypoints in a course layout
pub const MAX_WAYPOINTS: usize = 16;

/// Maximum waypoint name length
pub const MAX_LABEL_LEN: usize = 24;

/// Course layout errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LayoutError {
    /// Layout has no waypoints
    Empty,
    /// More waypoints than the table can hold
    TooManyWaypoints,
    /// Name longer than [`MAX_LABEL_LEN`]
    NameTooLong,
    /// The same name appears twice
    DuplicateName,
}

/// One recorded row of the point table
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointRecord {
    pub x: f32,
    pub y: f32,
    pub heading: f32,
}

impl PointRecord {
    pub const fn new(x: f32, y: f32, heading: f32) -> Self {
        Self { x, y, heading }
    }

    /// The recorded pose, heading normalized
    ///
    /// A row recorded while the pose service had no fix comes back as
    /// [`Pose::INVALID`].
    pub fn pose(&self) -> Pose {
        let raw = Pose {
            x: self.x,
            y: self.y,
            heading: self.heading,
        };
        if raw.is_valid() {
            Pose::new(self.x, self.y, self.heading)
        } else {
            Pose::INVALID
        }
    }
}

impl From<Pose> for PointRecord {
    fn from(pose: Pose) -> Self {
        Self::new(pose.x, pose.y, pose.heading)
    }
}

/// Ordered list of waypoint names
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CourseLayout {
    names: Vec<String<MAX_LABEL_LEN>, MAX_WAYPOINTS>,
}

impl CourseLayout {
    /// Build a layout from waypoint names in table order
    pub fn from_names(names: &[&str]) -> Result<Self, LayoutError> {
        if names.is_empty() {
            return Err(LayoutError::Empty);
        }

        let mut layout = Self::default();
        for &name in names {
            if layout.position(name).is_some() {
                return Err(LayoutError::DuplicateName);
            }
            let mut label = String::new();
            label
                .push_str(name)
                .map_err(|_| LayoutError::NameTooLong)?;
            layout
                .names
                .push(label)
                .map_err(|_| LayoutError::TooManyWaypoints)?;
        }
        Ok(layout)
    }

    /// Number of waypoints (and expected point table rows)
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Table row of a waypoint name
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n.as_str() == name)
    }

    /// Name at a table row
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(|n| n.as_str())
    }

    /// Names in table order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|n| n.as_str())
    }
}

/// Parse the text point table
///
/// Reads whitespace separated `x y heading` triples until the input runs
/// out or a value fails to parse, like a `scanf` loop would. A partial
/// trailing record is dropped. Reading stops at [`MAX_WAYPOINTS`] records.
pub fn parse_point_table(text: &str) -> Vec<PointRecord, MAX_WAYPOINTS> {
    let mut records = Vec::new();
    let mut values = text.split_whitespace().map(|token| token.parse::<f32>());

    while !records.is_full() {
        let (Some(Ok(x)), Some(Ok(y)), Some(Ok(heading))) =
            (values.next(), values.next(), values.next())
        else {
            break;
        };
        let _ = records.push(PointRecord::new(x, y, heading));
    }

    records
}

/// Write the text point table, one tab separated record per line
pub fn write_point_table<W: Write>(out: &mut W, records: &[PointRecord]) -> core::fmt::Result {
    for record in records {
        writeln!(out, "{:.6}\t{:.6}\t{:.6}", record.x, record.y, record.heading)?;
    }
    out.write_str("\n\n")
}
