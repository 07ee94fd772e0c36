use std::path::PathBuf;

/// Errors that can occur while reading or writing local files.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// An I/O error occurred while reading or writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON serialization or deserialization error occurred.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The platform does not provide a data directory.
    #[error("could not determine XDG data directory")]
    NoDataDir,

    /// A place catalog parsed but contains an entry with an impossible coordinate.
    #[error("place {name:?} in {path} has an invalid coordinate")]
    InvalidPlace {
        /// The catalog file.
        path: PathBuf,
        /// The offending entry's name.
        name: String,
    },
}
