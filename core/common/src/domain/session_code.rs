//! セッションコード（MAP-YYYYMMDD-HHMM-XXXXXXXXXX）とクライアントタグ
//!
//! 入力値と時刻の SHA-256 から導くため、同じ入力・同じ時刻なら同じコードになる。

use crate::domain::KstTimestamp;
use sha2::{Digest, Sha256};

const HASH_LEN: usize = 10;
const TAG_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCode(String);

impl SessionCode {
    /// "{timestamp}|{field_1}|..." の SHA-256 先頭 10 桁（大文字 hex）をサフィックスにする
    pub fn derive(timestamp: &KstTimestamp, values: &[String]) -> Self {
        let mut seed = timestamp.to_string();
        for v in values {
            seed.push('|');
            seed.push_str(v);
        }
        let hex = format!("{:X}", Sha256::digest(seed.as_bytes()));
        Self(format!("MAP-{}-{}", timestamp.compact(), &hex[..HASH_LEN]))
    }

    /// ハッシュ部分
    pub fn suffix(&self) -> &str {
        self.0.rsplit('-').next().unwrap_or_default()
    }

    /// カカオテンプレートで実名の代わりに使う仮名タグ（"User_3FA9C1"）
    pub fn client_tag(&self) -> String {
        let tag: String = self.suffix().chars().take(TAG_LEN).collect();
        format!("User_{}", tag)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
