pub use crate::nodes::debug::{ErrorNode, LogNode};
pub use crate::nodes::flow::DelayNode;
pub use crate::nodes::logic::{BranchNode, GuardNode, SwitchNode};
pub use crate::payload::{ErrorEntry, ErrorPayload};
pub use crate::telemetry::Traced;
