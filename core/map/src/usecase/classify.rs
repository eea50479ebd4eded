//! 判定（Decision Classifier）
//!
//! ガバナンスプロンプト + 入力項目を 1 回だけ生成サービスに送り、
//! 応答テキストから優先順位付きキーワードで判定を導く。呼び出しは再試行しない。

use common::domain::{Decision, OutputType, SubjectFields};
use common::error::Error;
use common::ports::outbound::{ChatProvider, ChatRequest, Log, LogLevel, LogRecord};
use std::sync::Arc;

/// 判定結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub decision: Decision,
    /// false ならキーワードが無くフォールバックを採用した
    pub matched: bool,
    pub output_type: OutputType,
    /// 生成テキスト全文（切り詰め前）
    pub report: String,
}

pub struct DecisionClassifier {
    provider: Option<Arc<dyn ChatProvider>>,
    model: String,
    temperature: f64,
    fallback: Decision,
    log: Arc<dyn Log>,
}

impl DecisionClassifier {
    /// `provider` が None のときは分析機能が無効（API キー未設定）
    pub fn new(
        provider: Option<Arc<dyn ChatProvider>>,
        model: impl Into<String>,
        temperature: f64,
        fallback: Decision,
        log: Arc<dyn Log>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
            fallback,
            log,
        }
    }

    /// 生成サービスが使えるか（API キー未設定なら ConfigurationMissing）
    pub fn ensure_configured(&self) -> Result<&Arc<dyn ChatProvider>, Error> {
        self.provider
            .as_ref()
            .ok_or_else(|| Error::configuration_missing("OPENAI_API_KEY is not set"))
    }

    /// 判定する。呼び出し失敗は ClassificationUnavailable（判定を作らない）。
    /// 空・不正な応答はエラーにせずフォールバック判定にする。
    pub fn classify(&self, fields: &SubjectFields) -> Result<Classification, Error> {
        let provider = self.ensure_configured()?;

        let category = fields.category();
        let request = ChatRequest::new(
            self.model.clone(),
            self.temperature,
            category.system_prompt(),
            &fields.to_user_message(),
        );

        let report = provider.complete(&request).map_err(|e| {
            let _ = self.log.log(
                &LogRecord::new(LogLevel::Error, "classification failed")
                    .layer("usecase")
                    .kind("classify")
                    .field("provider", provider.name())
                    .field("error", e.to_string()),
            );
            Error::classification_unavailable(e.to_string())
        })?;

        let m = Decision::from_report(&report, self.fallback);
        let output_type = OutputType::detect(&report);
        let level = if m.matched { LogLevel::Info } else { LogLevel::Warn };
        let _ = self.log.log(
            &LogRecord::new(level, "classified")
                .layer("usecase")
                .kind("classify")
                .field("category", category.tag())
                .field("decision", m.decision.as_str())
                .field("matched", m.matched)
                .field("output_type", output_type.number())
                .field("report_chars", report.chars().count()),
        );

        Ok(Classification {
            decision: m.decision,
            matched: m.matched,
            output_type,
            report,
        })
    }
}
