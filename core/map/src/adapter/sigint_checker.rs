//! Ctrl+C（SIGINT）で割り込みフラグを立てる InterruptChecker 実装
//!
//! ハンドラは arm() で初めて登録する。端末入力を待つ間は登録しないので、
//! プロンプトでの Ctrl+C は read_line に握りつぶされずプロセスを終了させる。

use crate::ports::outbound::InterruptChecker;
use common::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Ctrl+C を受けたらフラグを立てる実装
#[derive(Debug, Default)]
pub struct SigintChecker {
    flag: Arc<AtomicBool>,
    armed: AtomicBool,
}

impl SigintChecker {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InterruptChecker for SigintChecker {
    /// 2 回目以降は何もしない（ctrlc のハンドラはプロセスに 1 つ）
    fn arm(&self) -> Result<(), Error> {
        if self.armed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        let flag = Arc::clone(&self.flag);
        ctrlc::set_handler(move || {
            flag.store(true, Ordering::SeqCst);
        })
        .map_err(|e| Error::io_msg(format!("Failed to install Ctrl+C handler: {}", e)))
    }

    fn is_interrupted(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
