//! Domain models for server-side configuration.

pub mod approval;
pub mod flow;
pub mod ui;

pub use approval::ApprovalConfig;
pub use flow::{FlowDescriptor, FlowDescriptorMap};
pub use ui::UiConfig;
