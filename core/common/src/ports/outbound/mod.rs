//! Outbound ポート: アプリが外界（時刻・FS・環境変数・LLM・シート・通知・ログ）を使うための trait

pub mod clock;
pub mod env_resolver;
pub mod fs;
pub mod llm_provider;
pub mod log;
pub mod notifier;
pub mod record_store;

pub use clock::Clock;
pub use env_resolver::EnvResolver;
pub use fs::{FileMetadata, FileSystem};
pub use llm_provider::{ChatProvider, ChatRequest, Message};
pub use log::{now_iso8601, Log, LogLevel, LogRecord};
pub use notifier::Notifier;
pub use record_store::RecordStore;
