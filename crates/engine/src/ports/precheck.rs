//! Precheck port (spec.md §4.8 step 5, §6.1).

use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrecheckLabel {
    Clear,
    Long,
    Insufficient,
    Impossible,
    Question,
    Undo,
}

impl PrecheckLabel {
    /// Tolerant synonym mapping (spec.md §4.8 step 5): `redo` maps to
    /// `undo`, `unrelated`/`irrelevant` to `impossible`, `unknown` to
    /// `insufficient`.
    pub fn from_label(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "clear" => PrecheckLabel::Clear,
            "long" => PrecheckLabel::Long,
            "insufficient" | "unknown" => PrecheckLabel::Insufficient,
            "impossible" | "unrelated" | "irrelevant" => PrecheckLabel::Impossible,
            "question" => PrecheckLabel::Question,
            "undo" | "redo" => PrecheckLabel::Undo,
            _ => PrecheckLabel::Insufficient,
        }
    }
}

/// Classifies raw player text before parsing (spec.md §4.8 step 5). A
/// timed-out or failing precheck is fail-open to `Clear` (spec.md §5) —
/// that fallback is the pipeline's responsibility, not this port's.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PrecheckPort: Send + Sync {
    async fn classify(&self, text: &str) -> PrecheckLabel;
}
