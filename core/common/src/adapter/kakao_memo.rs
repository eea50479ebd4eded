//! カカオトーク「나에게 보내기」（memo API）の Notifier 実装

use crate::error::Error;
use crate::ports::outbound::Notifier;
use serde_json::{json, Value};
use std::time::Duration;

const MEMO_URL: &str = "https://kapi.kakao.com/v2/api/talk/memo/default/send";
/// テキストテンプレートの本文上限（文字数）
pub const TEXT_MAX_CHARS: usize = 200;
const BUTTON_TITLE: &str = "기록 확인";

/// `template_object` の JSON（本文は上限で切る）
pub fn build_template(text: &str, link_url: &str) -> String {
    let text: String = text.chars().take(TEXT_MAX_CHARS).collect();
    json!({
        "object_type": "text",
        "text": text,
        "link": { "web_url": link_url, "mobile_web_url": link_url },
        "button_title": BUTTON_TITLE,
    })
    .to_string()
}

/// 応答を判定する。HTTP 200 かつ result_code が 0（あれば）のとき成功。
pub fn check_response(status: u16, body: &str) -> Result<(), Error> {
    let v: Option<Value> = serde_json::from_str(body).ok();
    if status == 200 {
        match v.as_ref().and_then(|v| v["result_code"].as_i64()) {
            None | Some(0) => return Ok(()),
            Some(code) => {
                return Err(Error::http(format!("Kakao memo rejected: result_code {}", code)))
            }
        }
    }
    let msg = v
        .as_ref()
        .and_then(|v| v["msg"].as_str().map(|s| s.to_string()))
        .unwrap_or_else(|| body.to_string());
    Err(Error::http(format!("Kakao memo failed (HTTP {}): {}", status, msg)))
}

/// memo API を使う Notifier
pub struct KakaoMemoNotifier {
    client: reqwest::blocking::Client,
    access_token: String,
    link_url: String,
}

impl KakaoMemoNotifier {
    pub fn new(access_token: String, link_url: String, timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            access_token,
            link_url,
        })
    }
}

impl Notifier for KakaoMemoNotifier {
    fn name(&self) -> &str {
        "kakao-memo"
    }

    fn send_text(&self, text: &str) -> Result<(), Error> {
        let template = build_template(text, &self.link_url);
        let response = self
            .client
            .post(MEMO_URL)
            .bearer_auth(&self.access_token)
            .form(&[("template_object", template.as_str())])
            .send()?;
        let status = response.status().as_u16();
        let body = response.text().unwrap_or_default();
        check_response(status, &body)
    }
}
