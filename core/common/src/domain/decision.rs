//! 判定ラベル（GO / MODIFICATION / STOP）と優先順位付きキーワード判定

use crate::error::Error;
use std::str::FromStr;

/// 判定ラベル。レコードに残る値は常にこの 3 つのどれか。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    Go,
    Modification,
    Stop,
}

/// キーワード判定の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecisionMatch {
    pub decision: Decision,
    /// false のときはキーワードが見つからずフォールバックを採用した（AmbiguousClassification）
    pub matched: bool,
}

impl Decision {
    /// 優先度の高い順。出現位置ではなくこの順で判定する。
    pub const PRIORITY: [Decision; 3] = [Decision::Stop, Decision::Modification, Decision::Go];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Go => "GO",
            Self::Modification => "MODIFICATION",
            Self::Stop => "STOP",
        }
    }

    /// 表示用アイコン
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Go => "✅",
            Self::Modification => "⚠️",
            Self::Stop => "⛔",
        }
    }

    /// 深刻度（GO=0, MODIFICATION=1, STOP=2）。表示色の選択に使う。
    pub fn severity(&self) -> u8 {
        match self {
            Self::Go => 0,
            Self::Modification => 1,
            Self::Stop => 2,
        }
    }

    /// 生成テキストから判定を導く。
    ///
    /// `[STOP]` のような括弧付きタグも部分一致で拾う。大文字小文字は区別する。
    /// どれも含まれなければ `fallback` を返し、`matched = false` とする。
    pub fn from_report(text: &str, fallback: Decision) -> DecisionMatch {
        Self::PRIORITY
            .iter()
            .find(|d| text.contains(d.as_str()))
            .map(|&decision| DecisionMatch {
                decision,
                matched: true,
            })
            .unwrap_or(DecisionMatch {
                decision: fallback,
                matched: false,
            })
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Decision {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GO" => Ok(Self::Go),
            "MODIFICATION" => Ok(Self::Modification),
            "STOP" => Ok(Self::Stop),
            other => Err(Error::invalid_argument(format!(
                "Unknown decision '{}' (expected GO, MODIFICATION or STOP)",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_wins_over_modification_regardless_of_position() {
        let text = "MODIFICATION 권장. 다만 통증 지속 시 STOP";
        let m = Decision::from_report(text, Decision::Go);
        assert_eq!(m.decision, Decision::Stop);
        assert!(m.matched);
    }

    #[test]
    fn test_bracketed_tag() {
        let m = Decision::from_report("[STOP] 허리 부담...", Decision::Modification);
        assert_eq!(m.decision, Decision::Stop);
        let m = Decision::from_report("[GO] 문제 없음", Decision::Modification);
        assert_eq!(m.decision, Decision::Go);
    }

    #[test]
    fn test_modification_over_go() {
        let m = Decision::from_report("GO 가능하나 MODIFICATION 필요", Decision::Stop);
        assert_eq!(m.decision, Decision::Modification);
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let text = "🚨 [RED FLAG] 고위험 신호가 감지되었습니다.";
        for _ in 0..5 {
            let m = Decision::from_report(text, Decision::Modification);
            assert_eq!(m.decision, Decision::Modification);
            assert!(!m.matched);
        }
        let m = Decision::from_report("", Decision::Go);
        assert_eq!(m.decision, Decision::Go);
        assert!(!m.matched);
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        let m = Decision::from_report("stop here, go there", Decision::Modification);
        assert!(!m.matched);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(" modification ".parse::<Decision>().unwrap(), Decision::Modification);
        assert_eq!("STOP".parse::<Decision>().unwrap(), Decision::Stop);
        assert!("UNKNOWN".parse::<Decision>().is_err());
    }
}
