//! Seqfold Std - reusable steps
//!
//! - `nodes`: logging, delays, guards and branch-selecting steps
//! - `payload`: the `{ "errors": [...] }` in-band failure record
//! - `telemetry`: the [`Traced`] decorator
//!
//! [`Traced`]: telemetry::Traced

pub mod nodes;
pub mod payload;
pub mod prelude;
pub mod telemetry;
