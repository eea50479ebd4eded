//! 実行時設定（起動時に 1 回だけ組み立て、以後は読み取り専用）
//!
//! シークレットは環境変数から、その他の調整値は `$MAP_HOME/config/map.json` から読む。
//! シークレットが欠けても起動は失敗させず、その機能（分析・保存・通知）だけを無効にする。

use crate::domain::{Decision, HomeDir, DEFAULT_REPORT_MAX_CHARS};
use crate::error::Error;
use crate::ports::outbound::{EnvResolver, FileSystem};
use crate::retry::RetryPolicy;
use serde::Deserialize;
use std::time::Duration;

pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_SERVICE_ACCOUNT_JSON: &str = "MAP_GCP_SERVICE_ACCOUNT";
pub const ENV_SERVICE_ACCOUNT_FILE: &str = "GOOGLE_APPLICATION_CREDENTIALS";
pub const ENV_KAKAO_TOKEN: &str = "KAKAO_ACCESS_TOKEN";

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TEMPERATURE: f64 = 0.2;
const MAX_TEMPERATURE: f64 = 0.3;
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 30;
const DEFAULT_STORE_TIMEOUT_SECS: u64 = 15;
const DEFAULT_NOTIFY_TIMEOUT_SECS: u64 = 10;
const DEFAULT_APPEND_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_APPEND_RETRY_DELAY_MS: u64 = 800;
const DEFAULT_SPREADSHEET_NAME: &str = "MAP_DATABASE";
const DEFAULT_STALE_AFTER_HOURS: u64 = 3;
const DEFAULT_LINK_URL: &str = "https://docs.google.com/spreadsheets";
const DEFAULT_BRANCHES: [&str; 3] = ["킹스짐 1호점 (본점)", "킹스짐 2호점", "킹스짐 3호점"];

/// シークレット 1 つで有効・無効が決まる機能
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Classification,
    Persistence,
    Notification,
}

impl Capability {
    /// 画面表示用の段階名
    pub fn label(&self) -> &'static str {
        match self {
            Self::Classification => "분석",
            Self::Persistence => "저장",
            Self::Notification => "알림",
        }
    }

    /// 必要なシークレット（環境変数名）
    pub fn secret(&self) -> &'static str {
        match self {
            Self::Classification => ENV_OPENAI_API_KEY,
            Self::Persistence => "MAP_GCP_SERVICE_ACCOUNT or GOOGLE_APPLICATION_CREDENTIALS",
            Self::Notification => ENV_KAKAO_TOKEN,
        }
    }
}

/// スプレッドシートの指定方法（ID 優先）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpreadsheetRef {
    Id(String),
    Name(String),
}

#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f64,
    pub base_url: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct StoreSettings {
    /// サービスアカウント JSON（未設定なら None）
    pub service_account_json: Option<String>,
    /// 資格情報ファイルを読めなかった理由
    pub credential_error: Option<String>,
    pub spreadsheet: SpreadsheetRef,
    /// None のとき既定（先頭）シート
    pub worksheet: Option<String>,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

#[derive(Debug, Clone)]
pub struct NotifySettings {
    pub access_token: Option<String>,
    pub link_url: String,
    pub timeout: Duration,
}

/// アプリ設定
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub home_dir: Option<HomeDir>,
    pub llm: LlmSettings,
    pub store: StoreSettings,
    pub notify: NotifySettings,
    pub report_max_chars: usize,
    /// キーワードが見つからないときの判定
    pub fallback_decision: Decision,
    pub branches: Vec<String>,
    pub stale_after: Duration,
}

/// map.json の生の形（すべて省略可）
#[derive(Debug, Default, Deserialize)]
struct ConfigFileRaw {
    model: Option<String>,
    temperature: Option<f64>,
    base_url: Option<String>,
    llm_timeout_secs: Option<u64>,
    spreadsheet_name: Option<String>,
    spreadsheet_id: Option<String>,
    worksheet: Option<String>,
    store_timeout_secs: Option<u64>,
    append_max_attempts: Option<u32>,
    append_retry_delay_ms: Option<u64>,
    report_max_chars: Option<usize>,
    fallback_decision: Option<String>,
    branches: Option<Vec<String>>,
    stale_after_hours: Option<u64>,
    kakao_link_url: Option<String>,
}

impl AppConfig {
    /// 環境変数と設定ファイルから組み立てる。
    ///
    /// 設定ファイルが壊れている場合や判定値が不正な場合は Err（黙って既定値にしない）。
    pub fn load(env: &dyn EnvResolver, fs: &dyn FileSystem) -> Result<Self, Error> {
        let home_dir = env.resolve_home_dir().ok();
        let raw = match &home_dir {
            Some(home) => read_config_file(fs, home)?,
            None => ConfigFileRaw::default(),
        };

        let fallback_decision = match env
            .var("MAP_FALLBACK_DECISION")
            .or(raw.fallback_decision.clone())
        {
            Some(s) => s.parse::<Decision>()?,
            None => Decision::Modification,
        };

        let spreadsheet = match env.var("MAP_SPREADSHEET_ID").or(raw.spreadsheet_id.clone()) {
            Some(id) => SpreadsheetRef::Id(id),
            None => SpreadsheetRef::Name(
                env.var("MAP_SPREADSHEET_NAME")
                    .or(raw.spreadsheet_name.clone())
                    .unwrap_or_else(|| DEFAULT_SPREADSHEET_NAME.to_string()),
            ),
        };

        let (service_account_json, credential_error) = load_service_account(env, fs);

        Ok(Self {
            llm: LlmSettings {
                api_key: env.var(ENV_OPENAI_API_KEY),
                model: env
                    .var("MAP_MODEL")
                    .or(raw.model)
                    .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                temperature: raw
                    .temperature
                    .unwrap_or(DEFAULT_TEMPERATURE)
                    .clamp(0.0, MAX_TEMPERATURE),
                base_url: raw.base_url,
                timeout: Duration::from_secs(
                    raw.llm_timeout_secs.unwrap_or(DEFAULT_LLM_TIMEOUT_SECS).max(1),
                ),
            },
            store: StoreSettings {
                service_account_json,
                credential_error,
                spreadsheet,
                worksheet: raw.worksheet.filter(|w| !w.trim().is_empty()),
                timeout: Duration::from_secs(
                    raw.store_timeout_secs.unwrap_or(DEFAULT_STORE_TIMEOUT_SECS).max(1),
                ),
                retry: RetryPolicy::new(
                    raw.append_max_attempts.unwrap_or(DEFAULT_APPEND_MAX_ATTEMPTS),
                    Duration::from_millis(
                        raw.append_retry_delay_ms
                            .unwrap_or(DEFAULT_APPEND_RETRY_DELAY_MS),
                    ),
                ),
            },
            notify: NotifySettings {
                access_token: env.var(ENV_KAKAO_TOKEN),
                link_url: raw
                    .kakao_link_url
                    .unwrap_or_else(|| DEFAULT_LINK_URL.to_string()),
                timeout: Duration::from_secs(DEFAULT_NOTIFY_TIMEOUT_SECS),
            },
            report_max_chars: raw
                .report_max_chars
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_REPORT_MAX_CHARS),
            fallback_decision,
            branches: raw
                .branches
                .filter(|b| !b.is_empty())
                .unwrap_or_else(|| DEFAULT_BRANCHES.iter().map(|s| s.to_string()).collect()),
            stale_after: Duration::from_secs(
                raw.stale_after_hours.unwrap_or(DEFAULT_STALE_AFTER_HOURS) * 3600,
            ),
            home_dir,
        })
    }
}

fn read_config_file(fs: &dyn FileSystem, home: &HomeDir) -> Result<ConfigFileRaw, Error> {
    let path = home.config_path();
    match fs.metadata(&path) {
        Err(_) => return Ok(ConfigFileRaw::default()),
        Ok(m) if !m.is_file() => {
            return Err(Error::io_msg(format!(
                "Config path '{}' is not a file",
                path.display()
            )))
        }
        Ok(_) => {}
    }
    let content = fs.read_to_string(&path)?;
    serde_json::from_str(&content)
        .map_err(|e| Error::json(format!("Invalid config '{}': {}", path.display(), e)))
}

/// インライン JSON を優先し、無ければファイルパスから読む。読めなければ理由を返す。
fn load_service_account(
    env: &dyn EnvResolver,
    fs: &dyn FileSystem,
) -> (Option<String>, Option<String>) {
    if let Some(json) = env.var(ENV_SERVICE_ACCOUNT_JSON) {
        return (Some(json), None);
    }
    match env.var(ENV_SERVICE_ACCOUNT_FILE) {
        Some(path) => match fs.read_to_string(std::path::Path::new(&path)) {
            Ok(json) => (Some(json), None),
            Err(e) => (None, Some(e.to_string())),
        },
        None => (None, None),
    }
}
