//! map の CLI 側アダプタ（端末入力・割り込み検知・表示）

pub mod field_prompt;
pub mod render;
pub mod sigint_checker;

pub use field_prompt::{CliFieldPrompt, NoFieldPrompt};
pub use sigint_checker::SigintChecker;
