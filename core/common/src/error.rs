//! エラーハンドリング
//!
//! 外部呼び出し（LLM・スプレッドシート・プッシュ通知）の失敗はすべてこの型に変換してから
//! 上位へ返す。サードパーティ crate のエラーをそのまま UI 層へ漏らさない。

use thiserror::Error as ThisError;

/// アプリ全体で使うエラー型
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// 引数・入力不正（空欄を含む）
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0}")]
    Io(String),
    #[error("{0}")]
    Json(String),
    /// HTTP 送受信・認証・ステータス異常
    #[error("{0}")]
    Http(String),
    /// 外部呼び出しのタイムアウト
    #[error("{0}")]
    Timeout(String),
    #[error("{0}")]
    Env(String),
    /// 必要なシークレットが無く、その機能だけが無効になっている
    #[error("ConfigurationMissing: {0}")]
    ConfigurationMissing(String),
    /// 生成サービス呼び出しが失敗し、判定を出せなかった
    #[error("ClassificationUnavailable: {0}")]
    ClassificationUnavailable(String),
    /// リトライを使い切っても記録を保存できなかった
    #[error("PersistenceFailed: {0}")]
    PersistenceFailed(String),
    /// Ctrl+C による中断
    #[error("Interrupted: {0}")]
    Interrupted(String),
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn io_msg(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Self::Json(msg.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    pub fn env(msg: impl Into<String>) -> Self {
        Self::Env(msg.into())
    }

    pub fn configuration_missing(what: impl Into<String>) -> Self {
        Self::ConfigurationMissing(what.into())
    }

    pub fn classification_unavailable(msg: impl Into<String>) -> Self {
        Self::ClassificationUnavailable(msg.into())
    }

    pub fn persistence_failed(msg: impl Into<String>) -> Self {
        Self::PersistenceFailed(msg.into())
    }

    pub fn interrupted(msg: impl Into<String>) -> Self {
        Self::Interrupted(msg.into())
    }

    /// 使い方の誤りか（main で usage を表示するかの判定に使う）
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// sysexits.h 準拠の終了コード
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) => 64,
            Self::Json(_) | Self::Env(_) => 70,
            Self::Io(_) | Self::Http(_) | Self::Timeout(_) | Self::ClassificationUnavailable(_) => 74,
            Self::PersistenceFailed(_) => 75,
            Self::ConfigurationMissing(_) => 78,
            Self::Interrupted(_) => 130,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout(format!("Request timed out: {}", e))
        } else {
            Self::Http(format!("HTTP request failed: {}", e))
        }
    }
}
