//! File-backed point store
//!
//! `.bin` files hold the CRC-protected binary block; anything else is the
//! tab separated text table written by the recorder.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use coursebot_core::config::calibration::MAX_ENCODED_LEN;
use coursebot_core::config::points::{parse_point_table, write_point_table};
use coursebot_core::config::{PointCalibration, PointRecord, MAX_WAYPOINTS};
use coursebot_core::traits::{PointStore, StoreError};
use heapless::Vec;
use tracing::{debug, warn};

/// On-disk layout of a point table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointFormat {
    Text,
    Binary,
}

impl PointFormat {
    /// Pick the layout from a file extension
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("bin") => PointFormat::Binary,
            _ => PointFormat::Text,
        }
    }
}

/// Point table kept in a single file
#[derive(Debug, Clone)]
pub struct FilePointStore {
    path: PathBuf,
    format: PointFormat,
}

impl FilePointStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = PointFormat::for_path(&path);
        Self { path, format }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> PointFormat {
        self.format
    }
}

fn io_error(e: std::io::Error) -> StoreError {
    match e.kind() {
        ErrorKind::NotFound => StoreError::NotFound,
        _ => StoreError::Io,
    }
}

impl PointStore for FilePointStore {
    fn load(&mut self) -> Result<Vec<PointRecord, MAX_WAYPOINTS>, StoreError> {
        let bytes = std::fs::read(&self.path).map_err(|e| {
            warn!("cannot read {}: {}", self.path.display(), e);
            io_error(e)
        })?;

        let records = match self.format {
            PointFormat::Text => {
                let text = std::str::from_utf8(&bytes).map_err(|_| StoreError::Corrupted)?;
                parse_point_table(text)
            }
            PointFormat::Binary => PointCalibration::decode(&bytes)?.records,
        };
        debug!("read {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    fn save(&mut self, records: &[PointRecord]) -> Result<(), StoreError> {
        let bytes = match self.format {
            PointFormat::Text => {
                let mut text = String::new();
                write_point_table(&mut text, records).map_err(|_| StoreError::Io)?;
                text.into_bytes()
            }
            PointFormat::Binary => {
                let mut block = PointCalibration::from_records(records)?;
                let mut buffer = [0u8; MAX_ENCODED_LEN];
                block.encode(&mut buffer)?.to_vec()
            }
        };

        std::fs::write(&self.path, bytes).map_err(|e| {
            warn!("cannot write {}: {}", self.path.display(), e);
            io_error(e)
        })?;
        debug!("wrote {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}
