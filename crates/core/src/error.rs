/// Domain errors that are not tied to a specific service.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Client input failed a shape or rule check.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
