use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] serials_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Nothing to delete: pass serial numbers or --at positions")]
    NothingToDelete,
    #[error("List positions start at 1, got {0}")]
    InvalidPosition(usize),
    #[error("Configuration error: {0}")]
    Config(String),
}
