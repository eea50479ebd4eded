//! 環境変数解決 Outbound ポート
//!
//! ホームディレクトリとシークレットを環境変数から解決する。
//! usecase / config はこの trait 経由でのみ環境変数にアクセスする。

use crate::domain::HomeDir;
use crate::error::Error;

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver` やテスト用のマップ実装など。
pub trait EnvResolver: Send + Sync {
    /// 値を返す。未設定・空文字は None。
    fn var(&self, name: &str) -> Option<String>;

    /// ホームディレクトリを環境変数から解決する
    ///
    /// 優先順位:
    /// 1. MAP_HOME（設定されていれば）
    /// 2. $XDG_CONFIG_HOME/map（XDG_CONFIG_HOME が設定されていれば）
    /// 3. $HOME/.config/map
    fn resolve_home_dir(&self) -> Result<HomeDir, Error> {
        if let Some(home) = self.var("MAP_HOME") {
            return Ok(HomeDir::new(home));
        }
        let base = self
            .var("XDG_CONFIG_HOME")
            .map(std::path::PathBuf::from)
            .or_else(|| {
                self.var("HOME")
                    .map(|h| std::path::PathBuf::from(h).join(".config"))
            })
            .ok_or_else(|| Error::env("HOME is not set"))?;
        Ok(HomeDir::new(base.join("map")))
    }
}
