//! 生成サービス（チャット補完）プロバイダのトレイト定義

use crate::error::Error;
use serde::Serialize;

/// 役割付きメッセージ
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }
}

/// 単発の補完リクエスト（ストリーミング・複数ターンなし）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub temperature: f64,
    pub messages: Vec<Message>,
}

impl ChatRequest {
    /// system 1 件 + user 1 件の固定構成
    pub fn new(
        model: impl Into<String>,
        temperature: f64,
        system_instruction: &str,
        user_message: &str,
    ) -> Self {
        Self {
            model: model.into(),
            temperature,
            messages: vec![Message::system(system_instruction), Message::user(user_message)],
        }
    }
}

/// チャット補完プロバイダのトレイト
///
/// 実装は `llm::openai::OpenAiChatProvider` やテスト用のスタブ。
/// ネットワーク・認証・タイムアウトの失敗は Err、本文が空の応答は Ok("") を返す。
pub trait ChatProvider: Send + Sync {
    /// プロバイダ名を返す
    fn name(&self) -> &str;

    /// 1 回だけ呼び出して応答テキスト全文を返す
    fn complete(&self, request: &ChatRequest) -> Result<String, Error>;
}
