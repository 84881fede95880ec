//! Compile layer for esquery: the value model, condition trees, the
//! search-engine clause DSL, and request assembly.
//!
//! This crate performs no I/O. Everything here is a pure transform from a
//! caller-built condition tree into the request document a cluster client
//! submits; execution lives in the `esquery` facade crate.

// public exports are one module level down
pub mod compile;
pub mod condition;
pub mod dsl;
pub mod request;
pub mod value;

///
/// CONSTANTS
///

/// Default result-window ceiling applied when a query sets no explicit size.
///
/// Mirrors the engine's default `index.max_result_window`. The cap is
/// deliberate: "return everything" is bounded here, and deeper pagination
/// needs an explicit range.
pub const DEFAULT_RESULT_WINDOW: u32 = 10_000;

///
/// Prelude
///
/// Domain vocabulary only. No errors or assembly helpers are re-exported
/// here.
///

pub mod prelude {
    pub use crate::{
        condition::{Condition, ConditionGroup, ConditionValue, Conjunction, Node, Operator},
        dsl::SortOrder,
        value::Value,
    };
}
