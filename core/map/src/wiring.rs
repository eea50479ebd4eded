//! 配線: 設定を読み、標準アダプタで UseCase を組み立てる
//!
//! 資格情報が無い・読めない機能は None として渡し、その機能だけを無効にする。

use std::io::IsTerminal;
use std::sync::Arc;

use common::adapter::{
    FileJsonLog, GoogleAuth, GoogleSheetsStore, KakaoMemoNotifier, MemoryRecordStore, NoopLog,
    ServiceAccountKey, StdClock, StdEnvResolver, StdFileSystem, StderrLog, TeeLog,
    SCOPE_DRIVE_READONLY, SCOPE_SPREADSHEETS,
};
use common::config::{AppConfig, Capability, StoreSettings};
use common::error::Error;
use common::llm::OpenAiChatProvider;
use common::ports::outbound::{
    ChatProvider, Clock, EnvResolver, FileSystem, Log, LogLevel, LogRecord, Notifier, RecordStore,
};

use crate::adapter::{CliFieldPrompt, NoFieldPrompt, SigintChecker};
use crate::domain::{DisabledCapability, DisabledReason};
use crate::ports::outbound::{FieldPrompt, InterruptChecker};
use crate::usecase::{DecisionClassifier, RecordSink, StatusUseCase, SubmitUseCase};

/// main / Runner が使う組み立て済みのアプリ
pub struct App {
    pub config: AppConfig,
    pub logger: Arc<dyn Log>,
    pub submit: SubmitUseCase,
    pub status: StatusUseCase,
    pub field_prompt: Arc<dyn FieldPrompt>,
    pub interrupt: Arc<dyn InterruptChecker>,
    /// 起動時点で無効になっている機能
    pub disabled: Vec<DisabledCapability>,
    /// 端末出力に色を付けるか
    pub color: bool,
}

/// 外部サービス側の依存（テストではスタブを入れる）
pub struct Services {
    pub provider: Option<Arc<dyn ChatProvider>>,
    pub store: Option<Arc<dyn RecordStore>>,
    pub notifier: Option<Arc<dyn Notifier>>,
    pub clock: Arc<dyn Clock>,
    pub interrupt: Arc<dyn InterruptChecker>,
    pub field_prompt: Arc<dyn FieldPrompt>,
    pub logger: Arc<dyn Log>,
    /// None の機能が未設定以外の理由で無効なときに指定する
    pub reasons: Vec<DisabledCapability>,
}

/// 設定と依存から App を組み立てる
pub fn assemble(config: AppConfig, services: Services, color: bool) -> App {
    let missing = [
        (Capability::Classification, services.provider.is_none()),
        (Capability::Persistence, services.store.is_none()),
        (Capability::Notification, services.notifier.is_none()),
    ];
    let disabled = missing
        .into_iter()
        .filter(|(_, is_none)| *is_none)
        .map(|(capability, _)| {
            services
                .reasons
                .iter()
                .find(|r| r.capability == capability)
                .copied()
                .unwrap_or(DisabledCapability::new(capability, DisabledReason::NotConfigured))
        })
        .collect();

    let classifier = DecisionClassifier::new(
        services.provider,
        config.llm.model.clone(),
        config.llm.temperature,
        config.fallback_decision,
        Arc::clone(&services.logger),
    );
    let sink = RecordSink::new(
        services.store.clone(),
        services.notifier,
        config.store.retry,
        Arc::clone(&services.logger),
    );
    let submit = SubmitUseCase::new(
        classifier,
        sink,
        Arc::clone(&services.clock),
        Arc::clone(&services.interrupt),
        config.report_max_chars,
        Arc::clone(&services.logger),
    );
    let status = StatusUseCase::new(
        services.store,
        services.clock,
        config.branches.clone(),
        config.stale_after,
    );
    App {
        config,
        logger: services.logger,
        submit,
        status,
        field_prompt: services.field_prompt,
        interrupt: services.interrupt,
        disabled,
        color,
    }
}

fn build_logger(fs: &Arc<dyn FileSystem>, config: &AppConfig, verbose: bool) -> Arc<dyn Log> {
    let file: Arc<dyn Log> = match &config.home_dir {
        Some(home) => Arc::new(FileJsonLog::new(Arc::clone(fs), home.log_path())),
        None => Arc::new(NoopLog),
    };
    if verbose {
        let stderr: Arc<dyn Log> = Arc::new(StderrLog::new(LogLevel::Debug));
        Arc::new(TeeLog::new(vec![file, stderr]))
    } else {
        file
    }
}

fn build_provider(config: &AppConfig) -> Result<Option<Arc<dyn ChatProvider>>, Error> {
    let key = match &config.llm.api_key {
        Some(k) => k.clone(),
        None => return Ok(None),
    };
    let provider =
        OpenAiChatProvider::new(key, config.llm.base_url.clone(), config.llm.timeout)?;
    Ok(Some(Arc::new(provider)))
}

/// シートの資格情報が壊れている場合は保存機能だけを無効にして続行する
fn build_store(store: &StoreSettings, logger: &Arc<dyn Log>) -> Result<Option<Arc<dyn RecordStore>>, Error> {
    if let Some(reason) = &store.credential_error {
        let _ = logger.log(
            &LogRecord::new(LogLevel::Warn, "service account credential unreadable")
                .layer("wiring")
                .kind("config")
                .field("error", reason.as_str()),
        );
    }
    let json = match &store.service_account_json {
        Some(j) => j,
        None => return Ok(None),
    };
    let key = match ServiceAccountKey::from_json(json) {
        Ok(k) => k,
        Err(e) => {
            let _ = logger.log(
                &LogRecord::new(LogLevel::Warn, "service account credential invalid")
                    .layer("wiring")
                    .kind("config")
                    .field("error", e.to_string()),
            );
            return Ok(None);
        }
    };
    let auth = GoogleAuth::new(key, vec![SCOPE_SPREADSHEETS, SCOPE_DRIVE_READONLY], store.timeout)?;
    let _ = logger.log(
        &LogRecord::new(LogLevel::Debug, "sheet store configured")
            .layer("wiring")
            .kind("config")
            .field("service_account", auth.client_email()),
    );
    let sheets = GoogleSheetsStore::new(
        Arc::new(auth),
        store.spreadsheet.clone(),
        store.worksheet.clone(),
        store.timeout,
    )?;
    Ok(Some(Arc::new(sheets)))
}

fn build_notifier(config: &AppConfig) -> Result<Option<Arc<dyn Notifier>>, Error> {
    match &config.notify.access_token {
        Some(token) => Ok(Some(Arc::new(KakaoMemoNotifier::new(
            token.clone(),
            config.notify.link_url.clone(),
            config.notify.timeout,
        )?))),
        None => Ok(None),
    }
}

/// 配線: 標準アダプタで App を組み立てる
///
/// `dry_run` のときはシートの代わりにメモリストアを使い、通知は送らない。
pub fn wire_map(non_interactive: bool, verbose: bool, dry_run: bool) -> Result<App, Error> {
    let env = StdEnvResolver;
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    let config = AppConfig::load(&env, fs.as_ref())?;
    let logger = build_logger(&fs, &config, verbose);

    let provider = build_provider(&config)?;
    let mut reasons = Vec::new();
    let (store, notifier) = if dry_run {
        let memory: Arc<dyn RecordStore> = Arc::new(MemoryRecordStore::new());
        reasons.push(DisabledCapability::new(Capability::Notification, DisabledReason::DryRun));
        (Some(memory), None)
    } else {
        let store = build_store(&config.store, &logger)?;
        let has_credential =
            config.store.service_account_json.is_some() || config.store.credential_error.is_some();
        if store.is_none() && has_credential {
            reasons.push(DisabledCapability::new(
                Capability::Persistence,
                DisabledReason::InvalidCredential,
            ));
        }
        (store, build_notifier(&config)?)
    };

    // ハンドラ登録は入力収集の後（Runner が arm する）
    let interrupt: Arc<dyn InterruptChecker> = Arc::new(SigintChecker::new());
    let field_prompt: Arc<dyn FieldPrompt> = if non_interactive {
        Arc::new(NoFieldPrompt)
    } else {
        Arc::new(CliFieldPrompt)
    };
    let color = std::io::stdout().is_terminal() && env.var("NO_COLOR").is_none();

    let _ = logger.log(
        &LogRecord::new(LogLevel::Debug, "config loaded")
            .layer("wiring")
            .kind("config")
            .field("model", config.llm.model.as_str())
            .field("fallback_decision", config.fallback_decision.as_str())
            .field("append_max_attempts", config.store.retry.max_attempts())
            .field("dry_run", dry_run),
    );

    Ok(assemble(
        config,
        Services {
            provider,
            store,
            notifier,
            clock: Arc::new(StdClock),
            interrupt,
            field_prompt,
            logger,
            reasons,
        },
        color,
    ))
}
