//! 記録（Record Sink）
//!
//! 追記は有限回リトライ付き。失敗は握りつぶさず AppendOutcome で呼び出し元に返す。
//! 通知はベストエフォートで 1 回だけ送り、結果は追記に影響させない。

use common::domain::ClassificationRecord;
use common::error::Error;
use common::ports::outbound::{Log, LogLevel, LogRecord, Notifier, RecordStore};
use common::retry::{retry, RetryPolicy};
use std::sync::Arc;

/// 追記の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendOutcome {
    pub ok: bool,
    /// 保存できなかった理由。常に PersistenceFailed（ok のときは None）
    pub error: Option<Error>,
    pub attempts: u32,
}

impl AppendOutcome {
    /// 保存できたら 0、できなければ PersistenceFailed の終了コード
    pub fn exit_code(&self) -> i32 {
        self.error.as_ref().map_or(0, Error::exit_code)
    }
}

/// 通知の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyOutcome {
    pub ok: bool,
    pub error: Option<String>,
}

pub struct RecordSink {
    store: Option<Arc<dyn RecordStore>>,
    notifier: Option<Arc<dyn Notifier>>,
    policy: RetryPolicy,
    log: Arc<dyn Log>,
}

impl RecordSink {
    /// `store` / `notifier` が None のときはその機能が無効（資格情報未設定）
    pub fn new(
        store: Option<Arc<dyn RecordStore>>,
        notifier: Option<Arc<dyn Notifier>>,
        policy: RetryPolicy,
        log: Arc<dyn Log>,
    ) -> Self {
        Self {
            store,
            notifier,
            policy,
            log,
        }
    }

    /// 1 行追記する。設定不足以外のエラーはすべて再試行する。
    pub fn append(&self, record: &ClassificationRecord) -> AppendOutcome {
        let store = match &self.store {
            Some(s) => s,
            None => {
                return AppendOutcome {
                    ok: false,
                    error: Some(Error::persistence_failed(
                        Error::configuration_missing("spreadsheet credential is not set").to_string(),
                    )),
                    attempts: 0,
                }
            }
        };

        let row = record.to_row();
        let result = retry(
            &self.policy,
            |e: &Error| !matches!(e, Error::ConfigurationMissing(_)),
            |attempt, e| {
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Warn, "append failed, retrying")
                        .layer("usecase")
                        .kind("persist")
                        .field("store", store.name())
                        .field("attempt", attempt)
                        .field("error", e.to_string()),
                );
            },
            |_| store.append_row(&row),
        );

        match result {
            Ok(((), attempts)) => {
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Info, "record appended")
                        .layer("usecase")
                        .kind("persist")
                        .field("store", store.name())
                        .field("session_code", record.session_code().as_str())
                        .field("attempts", attempts),
                );
                AppendOutcome {
                    ok: true,
                    error: None,
                    attempts,
                }
            }
            Err(failure) => {
                let error = Error::persistence_failed(failure.error.to_string());
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Error, "record not saved")
                        .layer("usecase")
                        .kind("persist")
                        .field("store", store.name())
                        .field("session_code", record.session_code().as_str())
                        .field("attempts", failure.attempts)
                        .field("error", error.to_string()),
                );
                AppendOutcome {
                    ok: false,
                    error: Some(error),
                    attempts: failure.attempts,
                }
            }
        }
    }

    /// 自分宛てに短いメッセージを送る（1 回だけ・失敗は警告ログのみ）
    pub fn notify(&self, message: &str) -> NotifyOutcome {
        let notifier = match &self.notifier {
            Some(n) => n,
            None => {
                return NotifyOutcome {
                    ok: false,
                    error: Some(
                        Error::configuration_missing("KAKAO_ACCESS_TOKEN is not set").to_string(),
                    ),
                }
            }
        };
        match notifier.send_text(message) {
            Ok(()) => {
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Info, "notification sent")
                        .layer("usecase")
                        .kind("notify")
                        .field("notifier", notifier.name()),
                );
                NotifyOutcome {
                    ok: true,
                    error: None,
                }
            }
            Err(e) => {
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Warn, "notification failed")
                        .layer("usecase")
                        .kind("notify")
                        .field("notifier", notifier.name())
                        .field("error", e.to_string()),
                );
                NotifyOutcome {
                    ok: false,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}
