//! ドメイン型（Newtype と判定ロジック）
//!
//! String / PathBuf を直接運ばず、意味のある型に包んで境界を明確にする。

pub mod category;
pub mod decision;
pub mod fields;
pub mod prompt;
pub mod record;
pub mod report;
pub mod session_code;
pub mod timestamp;

use std::path::{Path, PathBuf};

pub use category::{Category, FieldSpec};
pub use decision::{Decision, DecisionMatch};
pub use fields::SubjectFields;
pub use record::{truncate_chars, ClassificationRecord, DEFAULT_REPORT_MAX_CHARS};
pub use report::{OutputType, Section};
pub use session_code::SessionCode;
pub use timestamp::KstTimestamp;

/// ホームディレクトリのパス（MAP_HOME / $XDG_CONFIG_HOME/map）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeDir(PathBuf);

impl HomeDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// 設定ファイル（config/map.json）
    pub fn config_path(&self) -> PathBuf {
        self.0.join("config").join("map.json")
    }

    /// JSONL ログ（logs/map.jsonl）
    pub fn log_path(&self) -> PathBuf {
        self.0.join("logs").join("map.jsonl")
    }
}

impl std::ops::Deref for HomeDir {
    type Target = PathBuf;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for HomeDir {
    fn as_ref(&self) -> &Path {
        self.0.as_ref()
    }
}

impl From<PathBuf> for HomeDir {
    fn from(p: PathBuf) -> Self {
        Self(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_dir_paths() {
        let home = HomeDir::new("/tmp/map");
        assert_eq!(home.config_path(), PathBuf::from("/tmp/map/config/map.json"));
        assert_eq!(home.log_path(), PathBuf::from("/tmp/map/logs/map.jsonl"));
    }
}
