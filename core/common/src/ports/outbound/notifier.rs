//! プッシュ通知 Outbound ポート（「나에게 보내기」型の自分宛てメッセージ）

use crate::error::Error;

/// 短いテキストを自分宛てに送る。失敗しても記録の保存には影響させない。
pub trait Notifier: Send + Sync {
    fn name(&self) -> &str;

    fn send_text(&self, text: &str) -> Result<(), Error>;
}
