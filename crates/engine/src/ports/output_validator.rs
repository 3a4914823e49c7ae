//! Output validator port (spec.md §6.1, §7 error #6).

use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Story,
    Conversation,
}

/// Accepts or rejects a generated reply. A timed-out validator is fail-open
/// to accept (spec.md §5) — applied by the pipeline, not this port.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OutputValidatorPort: Send + Sync {
    async fn validate(&self, mode: OutputMode, payload: &str) -> bool;
}
