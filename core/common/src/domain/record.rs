//! 判定レコード（シート 1 行に対応）

use crate::domain::{Category, Decision, KstTimestamp, SessionCode, SubjectFields};

/// シートのセル上限に合わせた応答本文の最大保存長（文字数）
pub const DEFAULT_REPORT_MAX_CHARS: usize = 4000;

/// 文字数（Unicode scalar value 単位）で切り詰める。文字の途中では切らない。
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

/// 1 回の判定で生成される記録。生成後は変更しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRecord {
    timestamp: KstTimestamp,
    fields: SubjectFields,
    decision: Decision,
    raw_response: String,
    session_code: SessionCode,
}

impl ClassificationRecord {
    /// 応答本文は `report_max_chars` 文字に切り詰めて保持する
    pub fn new(
        timestamp: KstTimestamp,
        fields: SubjectFields,
        decision: Decision,
        raw_response: &str,
        report_max_chars: usize,
    ) -> Self {
        let session_code = SessionCode::derive(&timestamp, fields.values());
        Self {
            timestamp,
            fields,
            decision,
            raw_response: truncate_chars(raw_response, report_max_chars),
            session_code,
        }
    }

    pub fn timestamp(&self) -> &KstTimestamp {
        &self.timestamp
    }

    pub fn category(&self) -> Category {
        self.fields.category()
    }

    pub fn fields(&self) -> &SubjectFields {
        &self.fields
    }

    pub fn decision(&self) -> Decision {
        self.decision
    }

    pub fn raw_response(&self) -> &str {
        &self.raw_response
    }

    pub fn session_code(&self) -> &SessionCode {
        &self.session_code
    }

    /// シートの列順: timestamp, category, field_1..field_n, decision, report
    pub fn to_row(&self) -> Vec<String> {
        let mut row = Vec::with_capacity(self.fields.values().len() + 4);
        row.push(self.timestamp.to_string());
        row.push(self.category().tag().to_string());
        row.extend(self.fields.values().iter().cloned());
        row.push(self.decision.as_str().to_string());
        row.push(self.raw_response.clone());
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> SubjectFields {
        SubjectFields::validate(
            Category::SessionSafety,
            vec![
                "50대 남성, 허리디스크".to_string(),
                "오늘 허리 뻐근함".to_string(),
                "데드리프트".to_string(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_truncate_chars_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("허리디스크", 2), "허리");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 0), "");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn test_report_is_truncated_to_limit() {
        let long = "가".repeat(5000);
        let ts = KstTimestamp::from_millis(1_767_589_380_000);
        let rec = ClassificationRecord::new(ts, fields(), Decision::Stop, &long, 4000);
        assert_eq!(rec.raw_response().chars().count(), 4000);

        let short = "[STOP] 허리 부담";
        let rec = ClassificationRecord::new(ts, fields(), Decision::Stop, short, 4000);
        assert_eq!(rec.raw_response(), short);
    }

    #[test]
    fn test_row_column_order() {
        let ts = KstTimestamp::from_millis(1_767_589_380_000);
        let rec = ClassificationRecord::new(ts, fields(), Decision::Stop, "[STOP] 허리 부담...", 4000);
        assert_eq!(
            rec.to_row(),
            vec![
                "2026-01-05 14:03:00",
                "session-safety",
                "50대 남성, 허리디스크",
                "오늘 허리 뻐근함",
                "데드리프트",
                "STOP",
                "[STOP] 허리 부담...",
            ]
        );
    }
}
