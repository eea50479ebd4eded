//! Ports & Adapters のポート定義
//!
//! - inbound: ドライバ（CLI）がアプリを呼び出すインターフェース
//! - outbound: アプリが端末（入力プロンプト・割り込み）を使うための trait
//!
//! LLM・シート・通知などのポートは common::ports::outbound にある。

pub mod inbound;
pub mod outbound;
