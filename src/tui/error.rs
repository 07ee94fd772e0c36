use crate::config::ConfigError;
use crate::storage::StorageError;

/// Errors that can occur in the TUI layer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An I/O error occurred (terminal, event reading, runtime startup).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A storage error occurred while loading local data.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The configuration file could not be used.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}
