//! 追記専用の表形式ストア Outbound ポート
//!
//! 更新・削除の操作は持たない。行の順序や同時追記の原子性はストア側の責務。

use crate::error::Error;

/// 行を追記・読み出すストア（Google スプレッドシート等）
pub trait RecordStore: Send + Sync {
    /// ストア名（ログ・表示用）
    fn name(&self) -> &str;

    /// 既定シートの末尾に 1 行追記する
    fn append_row(&self, row: &[String]) -> Result<(), Error>;

    /// 既定シートの全行を返す（ヘッダー行があればそれも含む）
    fn read_rows(&self) -> Result<Vec<Vec<String>>, Error>;
}
