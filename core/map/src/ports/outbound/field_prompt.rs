//! 未入力の項目を利用者に問い合わせる Outbound ポート

use common::domain::FieldSpec;
use common::error::Error;

/// 1 項目分の値を問い合わせる能力
///
/// usecase はこの trait にのみ依存し、adapter が stdin/stderr でプロンプトを表示する。
pub trait FieldPrompt: Send + Sync {
    /// 入力された値を返す。問い合わせられない（非対話）場合は None。
    fn ask(&self, spec: &FieldSpec) -> Result<Option<String>, Error>;
}
