//! # App Error Type
//!
//! Startup failures. Cart operations never fail outward; they raise notices.
//!
//! ## Exit Codes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Outcome                                      Exit code                 │
//! │  ───────                                      ─────────                 │
//! │  Operation applied                            0                         │
//! │  Operation rejected (a notice was printed)    2                         │
//! │  Bad configuration                            78 (EX_CONFIG)            │
//! │  Storage / client / runtime setup failed      1                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use stockcart_client::ClientError;
use stockcart_db::DbError;

use crate::state::ConfigError;

/// Exit code when a notice fired.
pub const EXIT_NOTICE: u8 = 2;

/// Exit code for configuration problems.
pub const EXIT_CONFIG: u8 = 78;

/// Failures that stop the app before or around a cart operation.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Local storage unavailable: {0}")]
    Database(#[from] DbError),

    #[error("Inventory client setup failed: {0}")]
    Client(#[from] ClientError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not render output: {0}")]
    Output(#[from] serde_json::Error),
}

impl AppError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Config(_) => EXIT_CONFIG,
            AppError::Client(ClientError::InvalidUrl(_)) => EXIT_CONFIG,
            _ => 1,
        }
    }
}

/// Result type alias for app setup.
pub type AppResult<T> = Result<T, AppError>;
