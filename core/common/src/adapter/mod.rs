//! アダプター（ポートの標準実装と外部サービス連携）
//!
//! usecase はポートの trait 経由でのみ時刻・ファイル・環境変数・外部 API に触れる。
//! ここにはその標準実装（Std*）と HTTP クライアントを置く。

pub mod file_json_log;
pub mod google_auth;
pub mod google_sheets;
pub mod kakao_memo;
pub mod memory_store;
pub mod std_clock;
pub mod std_env_resolver;
pub mod std_fs;

pub use file_json_log::{FileJsonLog, NoopLog, StderrLog, TeeLog};
pub use google_auth::{GoogleAuth, ServiceAccountKey, SCOPE_DRIVE_READONLY, SCOPE_SPREADSHEETS};
pub use google_sheets::GoogleSheetsStore;
pub use kakao_memo::KakaoMemoNotifier;
pub use memory_store::MemoryRecordStore;
pub use std_clock::{FixedClock, StdClock};
pub use std_env_resolver::StdEnvResolver;
pub use std_fs::StdFileSystem;
