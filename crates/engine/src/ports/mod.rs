//! Collaborator ports (spec.md §6.1): the engine's only dependency on
//! natural-language services. Grounded on the teacher's
//! `application/ports/outbound/*.rs` one-trait-per-file layout — each port
//! is a narrow async request/response interface, implementations (LLM-backed
//! or deterministic stubs) live outside this crate.

pub mod conversation;
pub mod intent_parser;
pub mod output_validator;
pub mod precheck;
pub mod storytelling;
pub mod undo_selector;

pub use conversation::{ConversationExtras, ConversationPort};
pub use intent_parser::IntentParserPort;
pub use output_validator::{OutputMode, OutputValidatorPort};
pub use precheck::{PrecheckLabel, PrecheckPort};
pub use storytelling::StorytellingPort;
pub use undo_selector::UndoSelectorPort;
