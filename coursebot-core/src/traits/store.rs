//! Waypoint point store trait

use heapless::Vec;

use crate::config::points::{PointRecord, MAX_WAYPOINTS};

/// Errors from point store operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Nothing has been recorded yet
    NotFound,
    /// Underlying storage read or write failed
    Io,
    /// Stored data failed validation (magic, version or CRC)
    Corrupted,
    /// Buffer too small for the data
    BufferTooSmall,
    /// More records than the table can hold
    Full,
}

/// Durable storage for the recorded waypoint poses
///
/// Records are kept in course layout order. A store may return fewer
/// records than the layout expects; deciding whether that is acceptable is
/// up to the caller.
pub trait PointStore {
    /// Read every stored record in order
    fn load(&mut self) -> Result<Vec<PointRecord, MAX_WAYPOINTS>, StoreError>;

    /// Replace the stored records
    fn save(&mut self, records: &[PointRecord]) -> Result<(), StoreError>;
}
