//! 判定から記録・通知までの一連の流れ
//!
//! 順序: 割り込み確認 → 判定 → 割り込み確認 → レコード生成 → 追記（リトライ付き）→ 通知。
//! 判定が終わる前に記録が残ることはない。通知の失敗は保存結果を変えない。

use crate::ports::outbound::InterruptChecker;
use crate::usecase::classify::{Classification, DecisionClassifier};
use crate::usecase::sink::{AppendOutcome, NotifyOutcome, RecordSink};
use common::domain::{report, Category, ClassificationRecord, KstTimestamp, SubjectFields};
use common::error::Error;
use common::ports::outbound::{Clock, Log, LogLevel, LogRecord};
use std::sync::Arc;

/// 1 回の提出の結果
#[derive(Debug, Clone)]
pub struct SubmitReport {
    pub record: ClassificationRecord,
    pub classification: Classification,
    pub append: AppendOutcome,
    /// 通知を要求しなかった場合は None
    pub notify: Option<NotifyOutcome>,
    /// 通知本文（送らない場合も表示用に作る）
    pub kakao_message: String,
    pub footer: Option<&'static str>,
}

impl SubmitReport {
    /// 保存できたら 0、できなければ 75（EX_TEMPFAIL）
    pub fn exit_code(&self) -> i32 {
        self.append.exit_code()
    }
}

/// 通知本文を作る。セッション判定はカカオテンプレート、施設点検は要約 1 行。
pub fn notification_text(record: &ClassificationRecord, report_text: &str) -> String {
    let fields = record.fields();
    match fields.category() {
        Category::SessionSafety => {
            report::kakao_message(report_text, &record.session_code().client_tag())
        }
        Category::FacilityCheck => format!(
            "{} {} 시설 점검: {}\n담당자: {}\n{}",
            record.decision().icon(),
            fields.get("branch").unwrap_or_default(),
            record.decision(),
            fields.get("staff").unwrap_or_default(),
            fields.get("note").unwrap_or_default(),
        ),
    }
}

pub struct SubmitUseCase {
    classifier: DecisionClassifier,
    sink: RecordSink,
    clock: Arc<dyn Clock>,
    interrupt: Arc<dyn InterruptChecker>,
    report_max_chars: usize,
    log: Arc<dyn Log>,
}

impl SubmitUseCase {
    pub fn new(
        classifier: DecisionClassifier,
        sink: RecordSink,
        clock: Arc<dyn Clock>,
        interrupt: Arc<dyn InterruptChecker>,
        report_max_chars: usize,
        log: Arc<dyn Log>,
    ) -> Self {
        Self {
            classifier,
            sink,
            clock,
            interrupt,
            report_max_chars,
            log,
        }
    }

    /// 入力を集める前に呼ぶ。判定できない設定なら何も聞かずに止める。
    pub fn ensure_ready(&self) -> Result<(), Error> {
        self.classifier.ensure_configured().map(|_| ())
    }

    /// 判定して記録する。
    ///
    /// 判定できなければ Err（何も保存しない）。保存の失敗は Err ではなく
    /// `SubmitReport::append` に入れて返す（画面で「保存されていない」と明示するため）。
    pub fn run(&self, fields: SubjectFields, notify: bool) -> Result<SubmitReport, Error> {
        if self.interrupt.is_interrupted() {
            self.log_interrupted("interrupted before classifying");
            return Err(Error::interrupted("판정 전에 중단되었습니다 (기록 없음)"));
        }

        let classification = self.classifier.classify(&fields)?;

        if self.interrupt.is_interrupted() {
            self.log_interrupted("interrupted before persisting");
            return Err(Error::interrupted("판정 후 저장 전에 중단되었습니다 (기록 없음)"));
        }

        let record = ClassificationRecord::new(
            KstTimestamp::from_millis(self.clock.now_ms()),
            fields,
            classification.decision,
            &classification.report,
            self.report_max_chars,
        );

        let append = self.sink.append(&record);
        let kakao_message = notification_text(&record, &classification.report);
        let notify = if notify {
            Some(self.sink.notify(&kakao_message))
        } else {
            None
        };

        Ok(SubmitReport {
            footer: classification.output_type.footer(),
            record,
            classification,
            append,
            notify,
            kakao_message,
        })
    }

    fn log_interrupted(&self, message: &str) {
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Warn, message)
                .layer("usecase")
                .kind("lifecycle"),
        );
    }
}
