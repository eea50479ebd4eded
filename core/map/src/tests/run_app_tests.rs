use super::stubs::{FlagInterrupt, FlakyStore, RecordingNotifier, ScriptedPrompt, StubChatProvider, MS};
use crate::cli::Config;
use crate::domain::{DisabledCapability, DisabledReason};
use crate::ports::inbound::UseCaseRunner;
use crate::wiring::{assemble, App, Services};
use common::adapter::{FixedClock, NoopLog, StdFileSystem};
use common::config::{AppConfig, Capability};
use common::ports::outbound::{ChatProvider, EnvResolver, RecordStore};
use common::retry::RetryPolicy;
use std::sync::Arc;
use std::time::Duration;

struct HomeEnv(String);

impl EnvResolver for HomeEnv {
    fn var(&self, name: &str) -> Option<String> {
        (name == "MAP_HOME").then(|| self.0.clone())
    }
}

fn config(home: &tempfile::TempDir) -> AppConfig {
    let env = HomeEnv(home.path().to_string_lossy().into_owned());
    let mut config = AppConfig::load(&env, &StdFileSystem).unwrap();
    config.store.retry = RetryPolicy::new(2, Duration::ZERO);
    config
}

/// スタブで App を組み立て、Runner で run する（テスト用の入口）
fn run_app(app: App, config: Config) -> i32 {
    let runner = crate::Runner { app };
    match runner.run(config) {
        Ok(code) => code,
        Err(e) => e.exit_code(),
    }
}

fn app_with(home: &tempfile::TempDir, reply: &str, store: Arc<FlakyStore>) -> App {
    let store: Arc<dyn RecordStore> = store;
    assemble(
        config(home),
        Services {
            provider: Some(Arc::new(StubChatProvider::replying(reply))),
            store: Some(store),
            notifier: Some(Arc::new(RecordingNotifier::ok())),
            clock: Arc::new(FixedClock(MS)),
            interrupt: Arc::new(FlagInterrupt::new(false)),
            field_prompt: Arc::new(ScriptedPrompt::new(&[])),
            logger: Arc::new(NoopLog),
            reasons: Vec::new(),
        },
        false,
    )
}

fn check_config() -> Config {
    Config {
        command: Some("check".to_string()),
        member: Some("20대 여성, 특이사항 없음".to_string()),
        symptom: Some("없음".to_string()),
        exercise: Some("숄더프레스".to_string()),
        non_interactive: true,
        ..Default::default()
    }
}

#[test]
fn test_run_app_with_help() {
    let home = tempfile::tempdir().unwrap();
    let app = app_with(&home, "[GO]", Arc::new(FlakyStore::new(0)));
    let config = Config {
        help: true,
        ..Default::default()
    };
    assert_eq!(run_app(app, config), 0);
}

#[test]
fn test_run_app_without_command_is_usage() {
    let home = tempfile::tempdir().unwrap();
    let app = app_with(&home, "[GO]", Arc::new(FlakyStore::new(0)));
    assert_eq!(run_app(app, Config::default()), 64);
}

#[test]
fn test_run_app_check_saved() {
    let home = tempfile::tempdir().unwrap();
    let store = Arc::new(FlakyStore::new(0));
    let app = app_with(&home, "[GO] 문제 없음", Arc::clone(&store));
    assert!(app.disabled.is_empty());
    assert_eq!(run_app(app, check_config()), 0);
    assert_eq!(store.rows().len(), 1);
    assert_eq!(store.rows()[0][5], "GO");
}

#[test]
fn test_run_app_not_saved_exit_75() {
    let home = tempfile::tempdir().unwrap();
    let store = Arc::new(FlakyStore::broken());
    let app = app_with(&home, "[GO] 문제 없음", Arc::clone(&store));
    assert_eq!(run_app(app, check_config()), 75);
    // 設定どおり 2 回で諦める
    assert_eq!(store.calls(), 2);
}

#[test]
fn test_run_app_blank_field_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    let store = Arc::new(FlakyStore::new(0));
    let app = app_with(&home, "[GO]", Arc::clone(&store));
    let config = Config {
        exercise: None,
        ..check_config()
    };
    assert_eq!(run_app(app, config), 64);
    assert_eq!(store.calls(), 0);
}

#[test]
fn test_run_app_without_provider_fails_before_prompting() {
    let home = tempfile::tempdir().unwrap();
    let store = Arc::new(FlakyStore::new(0));
    let store_dyn: Arc<dyn RecordStore> = store.clone();
    let prompt = Arc::new(ScriptedPrompt::new(&["20대 여성", "없음", "스쿼트"]));
    let app = assemble(
        config(&home),
        Services {
            provider: None,
            store: Some(store_dyn),
            notifier: None,
            clock: Arc::new(FixedClock(MS)),
            interrupt: Arc::new(FlagInterrupt::new(false)),
            field_prompt: prompt.clone(),
            logger: Arc::new(NoopLog),
            reasons: Vec::new(),
        },
        false,
    );
    assert_eq!(
        app.disabled,
        vec![
            DisabledCapability::new(Capability::Classification, DisabledReason::NotConfigured),
            DisabledCapability::new(Capability::Notification, DisabledReason::NotConfigured),
        ]
    );
    let config = Config {
        command: Some("check".to_string()),
        ..Default::default()
    };
    assert_eq!(run_app(app, config), 78);
    assert!(prompt.asked().is_empty());
    assert_eq!(store.calls(), 0);
}

#[test]
fn test_run_app_keeps_given_disable_reason() {
    let home = tempfile::tempdir().unwrap();
    let store: Arc<dyn RecordStore> = Arc::new(FlakyStore::new(0));
    let app = assemble(
        config(&home),
        Services {
            provider: Some(Arc::new(StubChatProvider::replying("[GO]"))),
            store: Some(store),
            notifier: None,
            clock: Arc::new(FixedClock(MS)),
            interrupt: Arc::new(FlagInterrupt::new(false)),
            field_prompt: Arc::new(ScriptedPrompt::new(&[])),
            logger: Arc::new(NoopLog),
            reasons: vec![DisabledCapability::new(
                Capability::Notification,
                DisabledReason::DryRun,
            )],
        },
        false,
    );
    assert_eq!(
        app.disabled,
        vec![DisabledCapability::new(Capability::Notification, DisabledReason::DryRun)]
    );
}

#[test]
fn test_run_app_interrupted_skips_provider() {
    let home = tempfile::tempdir().unwrap();
    let provider = Arc::new(StubChatProvider::replying("[GO]"));
    let provider_dyn: Arc<dyn ChatProvider> = provider.clone();
    let store = Arc::new(FlakyStore::new(0));
    let store_dyn: Arc<dyn RecordStore> = store.clone();
    let app = assemble(
        config(&home),
        Services {
            provider: Some(provider_dyn),
            store: Some(store_dyn),
            notifier: None,
            clock: Arc::new(FixedClock(MS)),
            interrupt: Arc::new(FlagInterrupt::new(true)),
            field_prompt: Arc::new(ScriptedPrompt::new(&[])),
            logger: Arc::new(NoopLog),
            reasons: Vec::new(),
        },
        false,
    );
    assert_eq!(run_app(app, check_config()), 130);
    assert_eq!(provider.calls(), 0);
    assert_eq!(store.calls(), 0);
}

#[test]
fn test_run_app_status_and_recent() {
    let home = tempfile::tempdir().unwrap();
    let store = Arc::new(FlakyStore::new(0));
    let app = app_with(&home, "[GO]", Arc::clone(&store));
    let status = Config {
        command: Some("status".to_string()),
        ..Default::default()
    };
    assert_eq!(run_app(app, status), 0);

    let app = app_with(&home, "[GO]", Arc::clone(&store));
    let recent = Config {
        command: Some("recent".to_string()),
        limit: 3,
        ..Default::default()
    };
    assert_eq!(run_app(app, recent), 0);
}

#[test]
fn test_run_app_writes_lifecycle_log() {
    use common::adapter::FileJsonLog;
    let home = tempfile::tempdir().unwrap();
    let log_path = home.path().join("logs").join("map.jsonl");
    let store: Arc<dyn RecordStore> = Arc::new(FlakyStore::new(0));
    let app = assemble(
        config(&home),
        Services {
            provider: Some(Arc::new(StubChatProvider::replying("[STOP] 허리 부담"))),
            store: Some(store),
            notifier: None,
            clock: Arc::new(FixedClock(MS)),
            interrupt: Arc::new(FlagInterrupt::new(false)),
            field_prompt: Arc::new(ScriptedPrompt::new(&[])),
            logger: Arc::new(FileJsonLog::new(Arc::new(StdFileSystem), &log_path)),
            reasons: Vec::new(),
        },
        false,
    );
    assert_eq!(run_app(app, check_config()), 0);

    let content = std::fs::read_to_string(&log_path).unwrap();
    let records: Vec<serde_json::Value> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records[0]["message"], "command started");
    assert_eq!(records[0]["fields"]["command"], "check");
    let classified = records
        .iter()
        .find(|r| r["fields"]["decision"].is_string())
        .unwrap();
    assert_eq!(classified["fields"]["decision"], "STOP");
    let last = records.last().unwrap();
    assert_eq!(last["message"], "command finished");
    assert_eq!(last["fields"]["exit_code"], 0);
    // シークレットや入力本文はログに出さない
    assert!(!content.contains("숄더프레스"));
}
