//! 起動時に無効になっている機能とその理由

use common::config::Capability;

/// 機能が無効になった理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisabledReason {
    /// シークレットが未設定
    NotConfigured,
    /// 資格情報はあるが読めない・解釈できない
    InvalidCredential,
    /// --dry-run で意図的に止めている
    DryRun,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisabledCapability {
    pub capability: Capability,
    pub reason: DisabledReason,
}

impl DisabledCapability {
    pub fn new(capability: Capability, reason: DisabledReason) -> Self {
        Self { capability, reason }
    }
}
