//! 生成サービス（LLM）プロバイダの実装
//!
//! 判定は 1 回の補完で完結するため、ストリーミングやツール呼び出しは扱わない。

pub mod openai;
pub mod provider;

pub use openai::OpenAiChatProvider;
pub use provider::{ChatProvider, ChatRequest, Message};
