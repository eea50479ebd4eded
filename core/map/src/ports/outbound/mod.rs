//! Outbound ポート: usecase が端末とやり取りするための trait

pub mod field_prompt;
pub mod interrupt_checker;

pub use field_prompt::FieldPrompt;
pub use interrupt_checker::InterruptChecker;
