//! Binary point table block
//!
//! Flash-backed point stores keep the recorded waypoints as a postcard
//! serialized block guarded by a magic number, a format version and a
//! CRC32 over the records.

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::points::{PointRecord, MAX_WAYPOINTS};
use crate::traits::StoreError;

/// Magic number identifying a point table block
pub const CALIBRATION_MAGIC: u32 = 0x5741_5950; // "WAYP"

/// Current block format version
pub const CALIBRATION_VERSION: u8 = 1;

/// Upper bound on an encoded block
pub const MAX_ENCODED_LEN: usize = 16 + MAX_WAYPOINTS * 3 * 5;

/// Recorded waypoints with integrity header
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointCalibration {
    /// Magic number for validation
    pub magic: u32,
    /// Block format version
    pub version: u8,
    /// Records in course layout order
    pub records: Vec<PointRecord, MAX_WAYPOINTS>,
    /// CRC32 over magic, version and records
    pub crc: u32,
}

impl Default for PointCalibration {
    fn default() -> Self {
        Self::new()
    }
}

impl PointCalibration {
    /// Create an empty block
    pub const fn new() -> Self {
        Self {
            magic: CALIBRATION_MAGIC,
            version: CALIBRATION_VERSION,
            records: Vec::new(),
            crc: 0,
        }
    }

    /// Create a sealed block holding `records`
    pub fn from_records(records: &[PointRecord]) -> Result<Self, StoreError> {
        let mut block = Self::new();
        block.records =
            Vec::from_slice(records).map_err(|_| StoreError::Full)?;
        block.update_crc();
        Ok(block)
    }

    /// Check magic and version
    pub fn is_valid(&self) -> bool {
        self.magic == CALIBRATION_MAGIC && self.version == CALIBRATION_VERSION
    }

    /// CRC32 over everything except the crc field
    pub fn calculate_crc(&self) -> u32 {
        let mut crc = crc32_update(0xFFFF_FFFF, &self.magic.to_le_bytes());
        crc = crc32_update(crc, &[self.version, self.records.len() as u8]);
        for record in &self.records {
            crc = crc32_update(crc, &record.x.to_le_bytes());
            crc = crc32_update(crc, &record.y.to_le_bytes());
            crc = crc32_update(crc, &record.heading.to_le_bytes());
        }
        !crc
    }

    pub fn update_crc(&mut self) {
        self.crc = self.calculate_crc();
    }

    pub fn verify_crc(&self) -> bool {
        self.crc == self.calculate_crc()
    }

    /// Seal and serialize into `buffer`, returning the used prefix
    #[cfg(feature = "serde")]
    pub fn encode<'a>(&mut self, buffer: &'a mut [u8]) -> Result<&'a mut [u8], StoreError> {
        self.update_crc();
        postcard::to_slice(self, buffer).map_err(|_| StoreError::BufferTooSmall)
    }

    /// Deserialize and validate a block
    #[cfg(feature = "serde")]
    pub fn decode(bytes: &[u8]) -> Result<Self, StoreError> {
        let block: Self = postcard::from_bytes(bytes).map_err(|_| StoreError::Corrupted)?;
        if !block.is_valid() || !block.verify_crc() {
            return Err(StoreError::Corrupted);
        }
        Ok(block)
    }
}

/// Bitwise CRC32 (IEEE 802.3, reflected)
fn crc32_update(mut crc: u32, data: &[u8]) -> u32 {
    const POLY: u32 = 0xEDB8_8320;
    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (POLY & mask);
        }
    }
    crc
}
