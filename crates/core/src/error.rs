use crate::types::DbId;

/// Domain-level error taxonomy shared across the workspace.
///
/// Ownership failures are reported as [`NotFound`](CoreError::NotFound) so
/// callers cannot probe for the existence of other users' data.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// The entity exists but is in a state that forbids the operation,
    /// e.g. completing an already-completed task or editing it afterwards.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    /// The daily completion guard tripped: the user already received a
    /// rewarded completion (task or challenge) today.
    #[error("Already completed a task or challenge today")]
    DuplicateDailyCompletion,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
