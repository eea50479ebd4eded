//! 記録時刻（UTC+9 固定オフセット）
//!
//! 閲覧者のローカル時刻ではなく、常に KST で表示・保存する。

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};

/// KST のオフセット（秒）
pub const KST_OFFSET_SECS: i32 = 9 * 3600;

/// シートに書く形式
pub const SHEET_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn kst() -> FixedOffset {
    FixedOffset::east_opt(KST_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// UTC+9 で表現した時刻
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct KstTimestamp(DateTime<FixedOffset>);

impl KstTimestamp {
    /// Unix epoch ミリ秒から生成する（範囲外は epoch に丸める）
    pub fn from_millis(ms: u64) -> Self {
        let utc = i64::try_from(ms)
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .unwrap_or_default();
        Self(utc.with_timezone(&kst()))
    }

    /// シート形式（"2026-01-05 14:03:00"）や RFC3339 を読み戻す。読めなければ None。
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self(dt.with_timezone(&kst())));
        }
        ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .and_then(|naive| kst().from_local_datetime(&naive).single())
            .map(Self)
    }

    /// 分単位のコンパクト表記（"20260105-1403"）。セッションコードに使う。
    pub fn compact(&self) -> String {
        self.0.format("%Y%m%d-%H%M").to_string()
    }

    /// KST での日付
    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// `earlier` から何分経過したか（負にはならない）
    pub fn minutes_since(&self, earlier: &KstTimestamp) -> i64 {
        (self.0 - earlier.0).num_minutes().max(0)
    }

    pub fn as_datetime(&self) -> &DateTime<FixedOffset> {
        &self.0
    }
}

impl std::fmt::Display for KstTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(SHEET_FORMAT))
    }
}
