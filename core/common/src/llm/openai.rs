//! OpenAI Chat Completions 互換 (/chat/completions) プロバイダ
//!
//! base_url で任意のエンドポイントを指定可能。ストリーミングは使わず全文を 1 回で受け取る。

use crate::error::Error;
use crate::llm::provider::{ChatProvider, ChatRequest};
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI Chat Completions 互換プロバイダ
pub struct OpenAiChatProvider {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

impl OpenAiChatProvider {
    /// 新しいプロバイダを作成
    ///
    /// * `api_key` - Bearer トークン
    /// * `base_url` - ベース URL（None のとき DEFAULT_BASE_URL）
    /// * `timeout` - 1 リクエストの上限時間（接続から本文受信まで）
    pub fn new(api_key: String, base_url: Option<String>, timeout: Duration) -> Result<Self, Error> {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

/// エラーレスポンスから `error.message` を取り出す（無ければステータスと本文）
pub(crate) fn api_error_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(|s| s.to_string()))
        .unwrap_or_else(|| format!("HTTP {}: {}", status, body))
}

/// 応答 JSON から `choices[0].message.content` を取り出す。
/// content が null / 欠落のときは空文字（判定側のフォールバックで扱う）。
pub fn parse_chat_response(body: &str) -> Result<String, Error> {
    let v: Value = serde_json::from_str(body)
        .map_err(|e| Error::json(format!("Failed to parse response JSON: {}", e)))?;

    if let Some(err) = v.get("error") {
        let msg = err["message"].as_str().unwrap_or("Unknown error");
        return Err(Error::http(format!("API error: {}", msg)));
    }

    Ok(v["choices"][0]["message"]["content"]
        .as_str()
        .unwrap_or_default()
        .to_string())
}

impl ChatProvider for OpenAiChatProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn complete(&self, request: &ChatRequest) -> Result<String, Error> {
        let response = self
            .client
            .post(self.url())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()?;

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            return Err(Error::http(format!(
                "Chat completions error: {}",
                api_error_message(status, &body)
            )));
        }

        parse_chat_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chat_response_text() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"[GO] 문제 없음"}}]}"#;
        assert_eq!(parse_chat_response(body).unwrap(), "[GO] 문제 없음");
    }

    #[test]
    fn test_parse_chat_response_null_content_is_empty() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
        assert_eq!(parse_chat_response(body).unwrap(), "");
        assert_eq!(parse_chat_response(r#"{"choices":[]}"#).unwrap(), "");
    }

    #[test]
    fn test_parse_chat_response_error_object() {
        let body = r#"{"error":{"message":"Incorrect API key provided"}}"#;
        let err = parse_chat_response(body).unwrap_err();
        assert!(matches!(err, Error::Http(ref m) if m.contains("Incorrect API key")));
    }

    #[test]
    fn test_parse_chat_response_invalid_json() {
        assert!(matches!(parse_chat_response("<html>"), Err(Error::Json(_))));
    }

    #[test]
    fn test_api_error_message() {
        let status = reqwest::StatusCode::UNAUTHORIZED;
        assert_eq!(
            api_error_message(status, r#"{"error":{"message":"bad key"}}"#),
            "bad key"
        );
        assert!(api_error_message(status, "nope").contains("401"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let p = OpenAiChatProvider::new(
            "k".to_string(),
            Some("http://localhost:11434/v1/".to_string()),
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(p.url(), "http://localhost:11434/v1/chat/completions");
        assert_eq!(p.name(), "openai");
    }

    #[test]
    fn test_complete_times_out_when_server_never_replies() {
        use std::io::Read;
        use std::net::TcpListener;
        use std::time::Instant;

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            // 受け付けたまま応答しない
            if let Ok((mut socket, _)) = listener.accept() {
                let mut buf = [0u8; 1024];
                let _ = socket.read(&mut buf);
                std::thread::sleep(Duration::from_secs(5));
            }
        });

        let p = OpenAiChatProvider::new(
            "k".to_string(),
            Some(format!("http://{}", addr)),
            Duration::from_millis(500),
        )
        .unwrap();
        let request = ChatRequest::new("gpt-4o-mini", 0.0, "system", "user");
        let started = Instant::now();
        let result = p.complete(&request);
        assert!(matches!(result, Err(Error::Timeout(_))), "{:?}", result);
        assert!(started.elapsed() < Duration::from_secs(4));
    }
}
