//! 生成テキストの寛容な構造解析
//!
//! マークダウン見出し（`### 1.` 等）でセクションに分け、出力タイプを判定する。
//! 期待した見出しが無い場合はテキスト全体を 1 セクションとして返し、決してパニックしない。

use regex::Regex;
use std::sync::OnceLock;

/// エンジン出力のタイプ（プロンプトの Type 1〜6 に対応）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputType {
    InputForm,
    Report,
    SecurityRefusal,
    LicenseExpired,
    Rationale,
    RedFlag,
    Unknown,
}

impl OutputType {
    /// 判定順: RED FLAG > License > Security > Input form > Report > Rationale
    pub fn detect(text: &str) -> Self {
        let t = collapse_whitespace(text);
        if t.contains("🚨 [RED FLAG]") {
            Self::RedFlag
        } else if t.contains("License Expired") {
            Self::LicenseExpired
        } else if t.contains("보안 정책상 내부 로직") {
            Self::SecurityRefusal
        } else if t.contains("[MAP 안전 판정 데이터 입력]") {
            Self::InputForm
        } else if t.contains("### 1. 📋 FSL 현장 리포트") {
            Self::Report
        } else if t.contains("국제 스포츠 안전 표준") || t.contains("일반 원칙") {
            Self::Rationale
        } else {
            Self::Unknown
        }
    }

    /// プロンプト上の Type 番号（Unknown は 0）
    pub fn number(&self) -> u8 {
        match self {
            Self::InputForm => 1,
            Self::Report => 2,
            Self::SecurityRefusal => 3,
            Self::LicenseExpired => 4,
            Self::Rationale => 5,
            Self::RedFlag => 6,
            Self::Unknown => 0,
        }
    }

    /// エンジン出力の下にだけ付ける案内フッター
    pub fn footer(&self) -> Option<&'static str> {
        match self {
            Self::RedFlag => Some(
                "⚠️ 안내\n이 메시지는 오류가 아닙니다.\n현재 상태에서는 운동 계획을 논의하기보다,\n트레이너가 현장에서 다음 현장 절차를 안내하는 흐름으로 전환됩니다.",
            ),
            Self::InputForm => Some(
                "ℹ️ 안내\nMAP 안전 판정은 운동 시작 전,\n판단 진행 가능 여부를 확인하는 절차입니다.\n3개 항목이 모두 입력된 경우에만 판정 출력이 생성됩니다.",
            ),
            Self::Report => Some(
                "ℹ️ 안내\n위 내용은 안전 기준 분류 결과이며,\n실제 진행 여부와 방식은 트레이너와 현장에서 함께 결정됩니다.",
            ),
            Self::Rationale => Some(
                "ℹ️ 안내\nMAP 엔진은 기준에 대한 일반 원칙만 제공하며,\n개별 사례에 대한 해석이나 상세 설명은 제공하지 않습니다.",
            ),
            Self::SecurityRefusal | Self::LicenseExpired | Self::Unknown => None,
        }
    }
}

/// 見出しで区切った 1 セクション。見出しが無いテキストは number = 0。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub number: u32,
    pub title: String,
    pub body: String,
}

fn header_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^[ \t]*###[ \t]*(\d+)\.[ \t]*(.*)$").ok())
        .as_ref()
}

fn blank_lines_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{3,}").ok()).as_ref()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `### <n>.` 見出しでセクションに分ける。
///
/// 最初の見出しより前のテキストは number = 0 のセクションになる（空なら省く）。
pub fn split_sections(text: &str) -> Vec<Section> {
    let headers: Vec<_> = header_re()
        .map(|re| re.captures_iter(text).collect())
        .unwrap_or_default();
    if headers.is_empty() {
        return vec![Section {
            number: 0,
            title: String::new(),
            body: text.trim().to_string(),
        }];
    }

    let mut sections = Vec::new();
    let first_start = headers[0].get(0).map(|m| m.start()).unwrap_or(0);
    let preamble = text[..first_start].trim();
    if !preamble.is_empty() {
        sections.push(Section {
            number: 0,
            title: String::new(),
            body: preamble.to_string(),
        });
    }

    for (i, caps) in headers.iter().enumerate() {
        let (Some(whole), Some(num), Some(title)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        let end = headers
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map(|m| m.start())
            .unwrap_or(text.len());
        sections.push(Section {
            number: num.as_str().parse().unwrap_or(0),
            title: title.as_str().trim().to_string(),
            body: text[whole.end()..end].trim().to_string(),
        });
    }
    sections
}

/// `n` 番セクションの本文。前後の `---` 区切り線は除く。
pub fn section(text: &str, n: u32) -> Option<String> {
    split_sections(text)
        .into_iter()
        .find(|s| n != 0 && s.number == n)
        .map(|s| strip_fences(&s.body))
        .filter(|body| !body.is_empty())
}

fn strip_fences(body: &str) -> String {
    let mut lines: Vec<&str> = body.lines().collect();
    while lines.first().is_some_and(|l| l.trim() == "---" || l.trim().is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| l.trim() == "---" || l.trim().is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

const KAKAO_PREFIX: &str = "MAP 트레이닝 센터입니다.\n\n오늘 컨디션 확인 완료했습니다.\n오늘은 안전 기준으로 진행 흐름을 정리해 두었습니다.";
const KAKAO_FALLBACK_BODY: &str = "📌 오늘의 진행 포인트\n: 오늘 안내된 안전 포인트를 기준으로 진행합니다.\n\n수업 중 컨디션 변화가 있으면 그 기준으로 바로 조정해드립니다.\n(본 안내는 운동 안전 참고 자료이며 의료적 판단이 아닙니다.)";

/// 카카오톡 전송 템플릿（3 番セクション）を取り出し、確認完了の前置きを付ける。
/// セクションが無ければ固定のテンプレートを返す。
pub fn kakao_message(report: &str, client_tag: &str) -> String {
    let body = section(report, 3)
        .map(|b| match blank_lines_re() {
            Some(re) => re.replace_all(&b, "\n\n").into_owned(),
            None => b,
        })
        .unwrap_or_else(|| KAKAO_FALLBACK_BODY.to_string());
    format!("안녕하세요, {}님. {}\n\n{}", client_tag, KAKAO_PREFIX, body)
}
