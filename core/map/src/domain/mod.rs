//! map 固有のドメイン型

pub mod capability;
pub mod command;

pub use capability::{DisabledCapability, DisabledReason};
pub use command::MapCommand;
