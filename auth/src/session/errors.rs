use std::time::Duration;

use thiserror::Error;

/// Error type for session store operations.
///
/// Both variants describe a dependency failure, never a credential judgement.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Session store unavailable: {0}")]
    Unavailable(String),

    #[error("Session store call timed out after {0:?}")]
    Timeout(Duration),
}
