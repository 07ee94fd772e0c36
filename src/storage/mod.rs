//! Trip ownership and local data files.
//!
//! Trips live in memory for the session; the data directory holds the log
//! file and an optional place catalog.

mod error;
mod trips;

use std::fs;
use std::path::PathBuf;

pub use error::StorageError;
pub use trips::TripsController;

/// Returns `~/.local/share/resfeber` (or the platform equivalent), creating it
/// if needed.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base = dirs::data_dir().ok_or(StorageError::NoDataDir)?;
    let path = base.join("resfeber");
    fs::create_dir_all(&path)?;
    Ok(path)
}
