//! MAP 共通ライブラリ
//!
//! `map` コマンドが使うドメイン型・ポート・外部サービスのアダプタを提供します。

/// エラーハンドリング
pub mod error;

/// ドメイン型（判定・入力項目・記録行・リポート解析）
pub mod domain;

/// Ports & Adapters のポート定義
pub mod ports;

/// ポートの標準実装と外部サービス連携
pub mod adapter;

/// チャット補完プロバイダ
pub mod llm;

/// 有限回リトライ
pub mod retry;

/// 実行時設定
pub mod config;
