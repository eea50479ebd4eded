//! 記録の参照（最近の行・지점별 점검 신호등）
//!
//! 読み出すだけで書き込みはしない。タイムスタンプを読めない行（ヘッダー等）は数えない。

use common::domain::{Category, KstTimestamp};
use common::error::Error;
use common::ports::outbound::{Clock, RecordStore};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

const COL_TIMESTAMP: usize = 0;
const COL_CATEGORY: usize = 1;
const COL_BRANCH: usize = 2;
const COL_STAFF: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchState {
    /// 点検記録が 1 件も無い
    Missing,
    /// 最後の点検から stale_after を超えた
    Stale,
    Ok,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchStatus {
    pub branch: String,
    pub state: BranchState,
    pub last: Option<KstTimestamp>,
    pub minutes_ago: Option<i64>,
    pub staff: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBoard {
    pub total_rows: usize,
    /// KST の今日の日付の行数
    pub rows_today: usize,
    /// 施設点検の記録がある지점の数
    pub active_branches: usize,
    pub branches: Vec<BranchStatus>,
}

fn timestamp_of(row: &[String]) -> Option<KstTimestamp> {
    row.get(COL_TIMESTAMP).and_then(|s| KstTimestamp::parse(s))
}

/// 行から状況ボードを組み立てる（純粋関数）
pub fn build_board(
    rows: &[Vec<String>],
    now: &KstTimestamp,
    branches: &[String],
    stale_after: Duration,
) -> StatusBoard {
    let dated: Vec<(KstTimestamp, &Vec<String>)> = rows
        .iter()
        .filter_map(|r| timestamp_of(r).map(|ts| (ts, r)))
        .collect();
    let facility: Vec<&(KstTimestamp, &Vec<String>)> = dated
        .iter()
        .filter(|(_, r)| {
            r.get(COL_CATEGORY).map(|c| c.as_str()) == Some(Category::FacilityCheck.tag())
        })
        .collect();

    let stale_minutes = (stale_after.as_secs() / 60) as i64;
    let statuses = branches
        .iter()
        .map(|branch| {
            let latest = facility
                .iter()
                .filter(|(_, r)| r.get(COL_BRANCH).map(|b| b.trim()) == Some(branch.as_str()))
                .max_by_key(|(ts, _)| *ts);
            match latest {
                None => BranchStatus {
                    branch: branch.clone(),
                    state: BranchState::Missing,
                    last: None,
                    minutes_ago: None,
                    staff: None,
                },
                Some((ts, row)) => {
                    let minutes = now.minutes_since(ts);
                    BranchStatus {
                        branch: branch.clone(),
                        state: if minutes > stale_minutes {
                            BranchState::Stale
                        } else {
                            BranchState::Ok
                        },
                        last: Some(*ts),
                        minutes_ago: Some(minutes),
                        staff: row.get(COL_STAFF).cloned(),
                    }
                }
            }
        })
        .collect();

    let active: BTreeSet<&str> = facility
        .iter()
        .filter_map(|(_, r)| r.get(COL_BRANCH).map(|b| b.trim()))
        .filter(|b| !b.is_empty())
        .collect();

    StatusBoard {
        total_rows: dated.len(),
        rows_today: dated.iter().filter(|(ts, _)| ts.date() == now.date()).count(),
        active_branches: active.len(),
        branches: statuses,
    }
}

pub struct StatusUseCase {
    store: Option<Arc<dyn RecordStore>>,
    clock: Arc<dyn Clock>,
    branches: Vec<String>,
    stale_after: Duration,
}

impl StatusUseCase {
    pub fn new(
        store: Option<Arc<dyn RecordStore>>,
        clock: Arc<dyn Clock>,
        branches: Vec<String>,
        stale_after: Duration,
    ) -> Self {
        Self {
            store,
            clock,
            branches,
            stale_after,
        }
    }

    fn rows(&self) -> Result<Vec<Vec<String>>, Error> {
        self.store
            .as_ref()
            .ok_or_else(|| Error::configuration_missing("spreadsheet credential is not set"))?
            .read_rows()
    }

    /// 末尾 `limit` 件（古い順）
    pub fn recent(&self, limit: usize) -> Result<Vec<Vec<String>>, Error> {
        let rows: Vec<Vec<String>> = self
            .rows()?
            .into_iter()
            .filter(|r| timestamp_of(r).is_some())
            .collect();
        let skip = rows.len().saturating_sub(limit);
        Ok(rows.into_iter().skip(skip).collect())
    }

    pub fn board(&self) -> Result<StatusBoard, Error> {
        let rows = self.rows()?;
        let now = KstTimestamp::from_millis(self.clock.now_ms());
        Ok(build_board(&rows, &now, &self.branches, self.stale_after))
    }
}
