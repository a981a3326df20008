//! Seqfold Core
//!
//! Contracts shared by every seqfold crate:
//! - [`Transition`]: one asynchronous step over an accumulator value
//! - [`Step`] and [`Outcome`]: steps with an explicit `Next` / `Fault` verdict
//! - [`StopCondition`]: when a reduction halts early
//! - [`branch2`] / [`branch_multiple`]: function selectors
//!
//! No execution lives here; see `seqfold-runtime`.

pub mod bus;
pub mod error;
pub mod outcome;
pub mod schematic;
pub mod selector;
pub mod step;
pub mod stop;
pub mod transition;

pub use bus::Bus;
pub use error::{BusError, SelectError, SelectResult};
pub use outcome::Outcome;
pub use schematic::{Node, Schematic};
pub use selector::{BranchMap, Condition, branch_multiple, branch2};
pub use step::Step;
pub use stop::{ExitSignal, StopCondition, StopPredicate, is_truthy};
pub use transition::{ANONYMOUS_STEP, Transition, type_name_of};

pub mod prelude {
    pub use crate::bus::Bus;
    pub use crate::error::SelectError;
    pub use crate::outcome::Outcome;
    pub use crate::schematic::Schematic;
    pub use crate::selector::{BranchMap, Condition, branch_multiple, branch2};
    pub use crate::step::Step;
    pub use crate::stop::{ExitSignal, StopCondition};
    pub use crate::transition::Transition;
}
