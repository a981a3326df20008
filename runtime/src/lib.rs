pub mod pipeline;
pub mod reduce;
pub mod step;

pub mod prelude {
    pub use crate::pipeline::Pipeline;
    pub use crate::reduce::{reduce, reduce_async, reduce_with};
    pub use crate::step::{FnStep, OutcomeFn, SyncStep, async_step, sync_step};
}

pub use pipeline::Pipeline;
pub use reduce::{reduce, reduce_async, reduce_with};
pub use step::{FnStep, OutcomeFn, SyncStep, async_step, sync_step};
