use thiserror::Error;

/// Unified error type for the entire finmetrics-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Engine ──────────────────────────────────────────────────────
    #[error("Metrics not computable — age unavailable: {0}")]
    AgeUnavailable(String),

    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("User already exists: {0}")]
    UserAlreadyExists(String),

    #[error("Goal not found: {0}")]
    GoalNotFound(String),

    #[error("Action not found: {0}")]
    ActionNotFound(String),

    #[error("Action '{0}' cannot be completed while its condition still holds")]
    ActionStillTriggered(String),

    // ── Storage ─────────────────────────────────────────────────────
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
