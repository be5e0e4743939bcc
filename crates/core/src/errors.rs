use thiserror::Error;

/// Unified error type for the entire practice-dashboard-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// Data-quality problems inside the numeric engine never surface here:
/// transforms degrade to returning the input unchanged so the UI never
/// crashes on a chart refresh. `CoreError` covers caller-contract
/// violations only.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Business Logic ──────────────────────────────────────────────
    #[error("Input validation failed: {0}")]
    ValidationError(String),

    #[error("No data loaded for year {0}")]
    YearNotFound(i32),

    // ── Export ──────────────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Serialization(e.to_string())
    }
}
