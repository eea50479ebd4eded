//! 端末表示（判定結果・保存状況・状況ボード）
//!
//! 文字列を組み立てるだけの純粋関数。色は ANSI エスケープで付け、端末でなければ付けない。

use crate::domain::{DisabledCapability, DisabledReason};
use crate::usecase::{BranchState, StatusBoard, SubmitReport};
use common::domain::{Decision, OutputType};

const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[1;31m";
const YELLOW: &str = "\x1b[1;33m";
const GREEN: &str = "\x1b[1;32m";
const DIM: &str = "\x1b[2m";

fn paint(text: &str, code: &str, color: bool) -> String {
    if color {
        format!("{}{}{}", code, text, RESET)
    } else {
        text.to_string()
    }
}

fn decision_color(decision: Decision) -> &'static str {
    match decision.severity() {
        0 => GREEN,
        1 => YELLOW,
        _ => RED,
    }
}

/// 判定結果の全体（本文・フッター・通知本文・保存状況・メタ情報）
pub fn render_submit(report: &SubmitReport, fallback: Decision, color: bool) -> String {
    let c = &report.classification;
    let mut out = String::new();

    let headline = format!("{} 판정: {}", c.decision.icon(), c.decision);
    out.push_str(&paint(&headline, decision_color(c.decision), color));
    out.push('\n');
    if c.output_type == OutputType::RedFlag {
        out.push_str(&paint("🚨 RED FLAG: 현장 절차로 전환하십시오", RED, color));
        out.push('\n');
    }
    if !c.matched {
        out.push_str(&format!(
            "ℹ️ 판정 키워드가 없어 기본 판정 {} 을(를) 적용했습니다\n",
            fallback
        ));
    }
    out.push('\n');
    out.push_str(c.report.trim_end());
    out.push_str("\n\n");

    if let Some(footer) = report.footer {
        out.push_str(&paint(footer, DIM, color));
        out.push_str("\n\n");
    }

    out.push_str("📨 알림 메시지\n");
    out.push_str(&report.kakao_message);
    out.push_str("\n\n");

    out.push_str(&save_status_lines(report, color));
    out.push('\n');
    out.push_str(&meta_block(report));
    out
}

/// 保存・通知の状況（失敗した段階を明示する）
pub fn save_status_lines(report: &SubmitReport, color: bool) -> String {
    let mut lines = Vec::new();
    let a = &report.append;
    if a.ok {
        lines.push(paint(
            &format!("💾 저장 완료 (시도 {}회)", a.attempts),
            GREEN,
            color,
        ));
    } else {
        lines.push(paint(
            &format!(
                "❌ 저장 실패: 기록이 저장되지 않았습니다 (시도 {}회): {}",
                a.attempts,
                a.error
                    .as_ref()
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "unknown error".to_string())
            ),
            RED,
            color,
        ));
    }
    match &report.notify {
        None => {}
        Some(n) if n.ok => lines.push("📨 알림 전송 완료".to_string()),
        Some(n) => lines.push(paint(
            &format!(
                "⚠️ 알림 실패 (저장 결과와 무관): {}",
                n.error.as_deref().unwrap_or("unknown error")
            ),
            YELLOW,
            color,
        )),
    }
    lines.join("\n") + "\n"
}

fn meta_block(report: &SubmitReport) -> String {
    let r = &report.record;
    format!(
        "👤 Client: {} | 🔑 Session: {}\n🕒 {} (KST) | 🧾 Output Type: {} | {}\n",
        r.session_code().client_tag(),
        r.session_code(),
        r.timestamp(),
        report.classification.output_type.number(),
        r.category(),
    )
}

/// 無効になっている機能の警告（起動時）
pub fn render_disabled(disabled: &[DisabledCapability]) -> Vec<String> {
    disabled
        .iter()
        .map(|d| {
            let c = d.capability;
            match d.reason {
                DisabledReason::NotConfigured => {
                    format!("{} 기능 비활성화: {} 미설정", c.label(), c.secret())
                }
                DisabledReason::InvalidCredential => {
                    format!("{} 기능 비활성화: {} 자격 증명을 읽을 수 없음", c.label(), c.secret())
                }
                DisabledReason::DryRun => format!("{} 기능 비활성화: --dry-run", c.label()),
            }
        })
        .collect()
}

/// 最近の行（列はタブ区切り、長い本文は切る）
pub fn render_rows(rows: &[Vec<String>], max_cell_chars: usize) -> String {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|cell| {
                    let one_line = cell.replace(['\n', '\r'], " ");
                    if one_line.chars().count() > max_cell_chars {
                        let head: String = one_line.chars().take(max_cell_chars).collect();
                        format!("{}…", head)
                    } else {
                        one_line
                    }
                })
                .collect::<Vec<_>>()
                .join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// 지점별 신호등
pub fn render_board(board: &StatusBoard, color: bool) -> String {
    let mut out = format!(
        "총 누적 데이터: {}건 | 오늘 기록: {}건 | 가동 지점: {}곳\n\n",
        board.total_rows, board.rows_today, board.active_branches
    );
    for b in &board.branches {
        let line = match b.state {
            BranchState::Missing => paint(
                &format!("🚨 {}: 데이터 없음 (즉시 확인 요망)", b.branch),
                RED,
                color,
            ),
            BranchState::Stale => paint(
                &format!(
                    "🚨 {}: 위험 (점검 누락) 마지막 점검 {} ({}분 전)",
                    b.branch,
                    last_hhmm(b),
                    b.minutes_ago.unwrap_or_default()
                ),
                RED,
                color,
            ),
            BranchState::Ok => paint(
                &format!(
                    "✅ {}: 정상 가동 중 마지막 점검 {} ({}분 전) 담당자: {}",
                    b.branch,
                    last_hhmm(b),
                    b.minutes_ago.unwrap_or_default(),
                    b.staff.as_deref().unwrap_or("-")
                ),
                GREEN,
                color,
            ),
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn last_hhmm(b: &crate::usecase::BranchStatus) -> String {
    b.last
        .map(|ts| ts.as_datetime().format("%H:%M").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::config::Capability;

    #[test]
    fn test_paint_without_color_is_plain() {
        assert_eq!(paint("x", RED, false), "x");
        assert_eq!(paint("x", RED, true), "\x1b[1;31mx\x1b[0m");
    }

    #[test]
    fn test_decision_colors() {
        assert_eq!(decision_color(Decision::Stop), RED);
        assert_eq!(decision_color(Decision::Modification), YELLOW);
        assert_eq!(decision_color(Decision::Go), GREEN);
    }

    #[test]
    fn test_render_rows_truncates_and_flattens() {
        let rows = vec![vec!["a".to_string(), "line1\nline2".to_string(), "가".repeat(10)]];
        assert_eq!(render_rows(&rows, 5), "a\tline1…\t가가가가가…");
    }

    #[test]
    fn test_render_disabled() {
        let lines = render_disabled(&[DisabledCapability::new(
            Capability::Notification,
            DisabledReason::NotConfigured,
        )]);
        assert_eq!(lines, vec!["알림 기능 비활성화: KAKAO_ACCESS_TOKEN 미설정".to_string()]);
    }

    #[test]
    fn test_render_disabled_names_real_reason() {
        let lines = render_disabled(&[
            DisabledCapability::new(Capability::Notification, DisabledReason::DryRun),
            DisabledCapability::new(Capability::Persistence, DisabledReason::InvalidCredential),
        ]);
        assert_eq!(lines[0], "알림 기능 비활성화: --dry-run");
        assert!(!lines[0].contains("미설정"));
        assert!(lines[1].starts_with("저장 기능 비활성화:"));
        assert!(lines[1].contains("자격 증명을 읽을 수 없음"));
    }
}
