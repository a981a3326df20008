//! seqfold facade crate.
//!
//! Re-exports the core, runtime and std crates (`core`, `runtime`,
//! `std_lib`) with a single entry point.
//!
//! ```rust
//! use seqfold::prelude::*;
//!
//! let steps: [fn(u32) -> u32; 2] = [|x| x + 1, |x| x * 2];
//! assert_eq!(reduce(3, &steps, None), 8);
//! ```

pub use seqfold_core as core;
pub use seqfold_runtime as runtime;
#[cfg(feature = "std")]
pub use seqfold_std as std_lib;

pub use seqfold_core::{
    BranchMap, Bus, Condition, Outcome, SelectError, Step, StopCondition, Transition,
    branch_multiple, branch2,
};
pub use seqfold_runtime::{Pipeline, reduce, reduce_async, reduce_with};

pub mod prelude {
    pub use seqfold_core::prelude::*;
    pub use seqfold_runtime::prelude::*;
    #[cfg(feature = "std")]
    pub use seqfold_std::prelude::*;
}
