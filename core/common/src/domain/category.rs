//! レコード種別（category）と種別ごとの入力項目

use crate::domain::prompt;
use crate::error::Error;
use std::str::FromStr;

/// レコード種別。ユーザーが編集できない固定の集合。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// 수업 전 회원 안전 판정
    SessionSafety,
    /// 지점 시설 점검
    FacilityCheck,
}

/// 入力項目 1 つ分の定義
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub example: &'static str,
}

const SESSION_SAFETY_FIELDS: [FieldSpec; 3] = [
    FieldSpec {
        key: "member",
        label: "회원 정보",
        example: "여/30대/과거력 없음",
    },
    FieldSpec {
        key: "symptom",
        label: "현재 증상",
        example: "허리 통증, 무릎 뻐근함",
    },
    FieldSpec {
        key: "exercise",
        label: "예정 운동",
        example: "스쿼트, 숄더프레스",
    },
];

const FACILITY_CHECK_FIELDS: [FieldSpec; 3] = [
    FieldSpec {
        key: "branch",
        label: "지점",
        example: "킹스짐 1호점 (본점)",
    },
    FieldSpec {
        key: "staff",
        label: "담당자",
        example: "김코치",
    },
    FieldSpec {
        key: "note",
        label: "점검 내용",
        example: "스미스머신 케이블 마모, 바닥 미끄럼",
    },
];

impl Category {
    pub const ALL: [Category; 2] = [Category::SessionSafety, Category::FacilityCheck];

    /// シートの category 列に書くタグ
    pub fn tag(&self) -> &'static str {
        match self {
            Self::SessionSafety => "session-safety",
            Self::FacilityCheck => "facility-check",
        }
    }

    /// 入力項目（順序固定）
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            Self::SessionSafety => &SESSION_SAFETY_FIELDS,
            Self::FacilityCheck => &FACILITY_CHECK_FIELDS,
        }
    }

    /// 種別ごとのガバナンスプロンプト（system instruction）
    pub fn system_prompt(&self) -> &'static str {
        match self {
            Self::SessionSafety => prompt::SESSION_SAFETY_PROMPT,
            Self::FacilityCheck => prompt::FACILITY_CHECK_PROMPT,
        }
    }

    /// 入力値を "1. 회원 정보: ..." 形式の user メッセージにする
    pub fn user_message(&self, values: &[String]) -> String {
        self.fields()
            .iter()
            .zip(values)
            .enumerate()
            .map(|(i, (spec, value))| format!("{}. {}: {}", i + 1, spec.label, value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "session-safety" | "session" => Ok(Self::SessionSafety),
            "facility-check" | "facility" => Ok(Self::FacilityCheck),
            other => Err(Error::invalid_argument(format!("Unknown category '{}'", other))),
        }
    }
}
