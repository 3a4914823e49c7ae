//! Action validation (spec.md §4.3) and chain validation via phantom state
//! (spec.md §4.3.1).

mod phantom;
mod rules;

pub use phantom::{validate_sequence, ChainValidationError};
pub use rules::validate_single;
