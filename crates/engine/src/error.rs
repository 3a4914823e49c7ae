//! Engine-level error type (spec.md §7). Validation failures are not
//! errors — they're `Some(reason)` returned from the validator (§4.3) — this
//! type covers genuinely exceptional paths: domain invariant violations,
//! execution exceptions (§7.3), and session-state misuse.

use outbreak_domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Caught per-action during execution (spec.md §7.3); the pipeline
    /// turns this into the narration fragment "(Internal execution
    /// error: ...)" rather than propagating it.
    #[error("execution error: {0}")]
    Execution(String),

    /// A pending confirmation/correction/undo flow was resumed with no
    /// matching stored state (spec.md §7.5).
    #[error("no pending confirmation to resume")]
    NoPendingConfirmation,

    #[error("collaborator call failed: {0}")]
    Collaborator(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
