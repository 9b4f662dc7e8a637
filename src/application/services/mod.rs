mod interpretation_service;
mod translation_prompt;

pub use interpretation_service::{Interpretation, InterpretationService};
pub use translation_prompt::build_translation_instruction;
