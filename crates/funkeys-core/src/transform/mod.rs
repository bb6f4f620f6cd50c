// Funkeys Transform Module
// Core translation logic for keyboard event processing

pub mod engine;
pub mod enter;
pub mod rules;

pub use engine::Translator;
pub use enter::{EnterDecision, EnterState, EnterTap, TAP_WINDOW};
pub use rules::SubstitutionTable;
