//! map コマンドの enum（Command Pattern）
//!
//! 判定の提出・記録の参照・ヘルプの分岐を enum で明示する。

use common::domain::Category;

/// map の実行モード
#[derive(Debug, Clone, PartialEq)]
pub enum MapCommand {
    /// ヘルプ表示
    Help,
    /// 入力を集めて判定し、記録する
    Submit {
        category: Category,
        /// 種別の項目順。None は未指定（対話で問い合わせる）
        provided: Vec<Option<String>>,
        notify: bool,
        dry_run: bool,
    },
    /// 最近の記録を表示
    Recent { limit: usize },
    /// 支店ごとの点検状況を表示
    Status,
}

impl MapCommand {
    /// ログ用の名前
    pub fn name(&self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::Submit {
                category: Category::SessionSafety,
                ..
            } => "check",
            Self::Submit {
                category: Category::FacilityCheck,
                ..
            } => "facility",
            Self::Recent { .. } => "recent",
            Self::Status => "status",
        }
    }
}
