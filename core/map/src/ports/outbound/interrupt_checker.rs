//! Ctrl+C（SIGINT）による割り込みを検知する Outbound ポート
//!
//! 入力収集の各項目の後・判定の前・保存の前に参照し、中断されていれば記録を残さずに終了する。

use common::error::Error;

/// 割り込みが要求されたかどうかを返す能力
pub trait InterruptChecker: Send + Sync {
    /// 検知を開始する。開始前の Ctrl+C は既定どおりプロセスを終了させる。
    fn arm(&self) -> Result<(), Error> {
        Ok(())
    }

    fn is_interrupted(&self) -> bool;
}
