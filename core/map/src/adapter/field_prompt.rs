//! 未入力項目の CLI プロンプト実装
//!
//! usecase は FieldPrompt trait 経由でのみ利用する。

use crate::ports::outbound::FieldPrompt;
use common::domain::FieldSpec;
use common::error::Error;
use std::io::{self, BufRead, Write};

/// 非対話用: 常に None を返す（CI 等でプロンプトを出さない）
#[derive(Debug, Clone, Default)]
pub struct NoFieldPrompt;

impl FieldPrompt for NoFieldPrompt {
    fn ask(&self, _spec: &FieldSpec) -> Result<Option<String>, Error> {
        Ok(None)
    }
}

/// 標準入出力で 1 行ずつ問い合わせる実装（プロンプトは stderr に出す）
#[derive(Debug, Clone, Default)]
pub struct CliFieldPrompt;

impl FieldPrompt for CliFieldPrompt {
    fn ask(&self, spec: &FieldSpec) -> Result<Option<String>, Error> {
        eprint!("{} (예: {}): ", spec.label, spec.example);
        let _ = io::stderr().flush();

        let mut line = String::new();
        let n = io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| Error::io_msg(e.to_string()))?;
        if n == 0 {
            // EOF
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
