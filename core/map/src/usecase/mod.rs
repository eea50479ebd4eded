//! ユースケース（入力収集 → 判定 → 記録 → 通知、および記録の参照）

pub mod classify;
pub mod collect;
pub mod sink;
pub mod status;
pub mod submit;

pub use classify::DecisionClassifier;
pub use collect::collect;
pub use sink::RecordSink;
pub use status::{BranchState, BranchStatus, StatusBoard, StatusUseCase};
pub use submit::{SubmitReport, SubmitUseCase};
