use super::stubs::{strings, MS};
use crate::usecase::status::build_board;
use crate::usecase::{BranchState, StatusUseCase};
use common::adapter::{FixedClock, MemoryRecordStore};
use common::domain::KstTimestamp;
use common::error::Error;
use common::ports::outbound::RecordStore;
use std::sync::Arc;
use std::time::Duration;

/// 2026-01-05 16:00:00 KST
const NOW_MS: u64 = MS + 117 * 60 * 1000;
const THREE_HOURS: Duration = Duration::from_secs(3 * 3600);

fn branches() -> Vec<String> {
    strings(&["킹스짐 1호점 (본점)", "킹스짐 2호점", "킹스짐 3호점"])
}

fn sheet() -> Vec<Vec<String>> {
    vec![
        strings(&["Timestamp", "Category", "Branch", "Staff", "Note", "Decision", "Report"]),
        strings(&["2026-01-05 11:00:00", "facility-check", "킹스짐 1호점 (본점)", "박코치", "정상", "GO", "[GO]"]),
        strings(&["2026-01-05 15:30:00", "facility-check", "킹스짐 1호점 (본점)", "김코치", "정상", "GO", "[GO]"]),
        strings(&["2026-01-05 12:30:00", "facility-check", "킹스짐 2호점", "이코치", "바닥", "MODIFICATION", "[MODIFICATION]"]),
        strings(&["2026-01-04 23:00:00", "session-safety", "50대 남성", "통증", "스쿼트", "STOP", "[STOP]"]),
        strings(&["not a date", "facility-check", "킹스짐 3호점", "최코치", "x", "GO", "[GO]"]),
    ]
}

#[test]
fn test_board_states_per_branch() {
    let now = KstTimestamp::from_millis(NOW_MS);
    assert_eq!(now.to_string(), "2026-01-05 16:00:00");
    let board = build_board(&sheet(), &now, &branches(), THREE_HOURS);

    let first = &board.branches[0];
    assert_eq!(first.state, BranchState::Ok);
    assert_eq!(first.minutes_ago, Some(30));
    assert_eq!(first.staff.as_deref(), Some("김코치"));

    let second = &board.branches[1];
    assert_eq!(second.state, BranchState::Stale);
    assert_eq!(second.minutes_ago, Some(210));

    // 日付を読めない行しか無い支店は記録なし扱い
    let third = &board.branches[2];
    assert_eq!(third.state, BranchState::Missing);
    assert_eq!(third.last, None);
}

#[test]
fn test_board_totals_skip_header_and_bad_rows() {
    let now = KstTimestamp::from_millis(NOW_MS);
    let board = build_board(&sheet(), &now, &branches(), THREE_HOURS);
    assert_eq!(board.total_rows, 4);
    assert_eq!(board.rows_today, 3);
    assert_eq!(board.active_branches, 2);
}

#[test]
fn test_exactly_at_threshold_is_ok() {
    let now = KstTimestamp::from_millis(NOW_MS);
    let rows = vec![strings(&[
        "2026-01-05 13:00:00",
        "facility-check",
        "킹스짐 3호점",
        "최코치",
    ])];
    let board = build_board(&rows, &now, &branches(), THREE_HOURS);
    assert_eq!(board.branches[2].state, BranchState::Ok);
    assert_eq!(board.branches[2].minutes_ago, Some(180));
}

#[test]
fn test_empty_sheet_all_missing() {
    let now = KstTimestamp::from_millis(NOW_MS);
    let board = build_board(&[], &now, &branches(), THREE_HOURS);
    assert_eq!(board.total_rows, 0);
    assert!(board.branches.iter().all(|b| b.state == BranchState::Missing));
}

fn use_case(store: Option<Arc<dyn RecordStore>>) -> StatusUseCase {
    StatusUseCase::new(store, Arc::new(FixedClock(NOW_MS)), branches(), THREE_HOURS)
}

#[test]
fn test_recent_returns_tail_without_header() {
    let store: Arc<dyn RecordStore> = Arc::new(MemoryRecordStore::with_rows(sheet()));
    let uc = use_case(Some(store));

    let rows = uc.recent(2).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][0], "2026-01-05 12:30:00");
    assert_eq!(rows[1][0], "2026-01-04 23:00:00");

    assert_eq!(uc.recent(100).unwrap().len(), 4);
}

#[test]
fn test_board_through_store() {
    let store: Arc<dyn RecordStore> = Arc::new(MemoryRecordStore::with_rows(sheet()));
    let board = use_case(Some(store)).board().unwrap();
    assert_eq!(board.branches[0].state, BranchState::Ok);
}

#[test]
fn test_without_store_is_configuration_missing() {
    let err = use_case(None).board().unwrap_err();
    assert!(matches!(err, Error::ConfigurationMissing(_)));
    assert!(use_case(None).recent(5).is_err());
}
