//! Entity queries executed against a search cluster.
//!
//! Build an [`EntityQuery`] over a [`ClusterClient`], refine it with
//! conditions and directives, then `execute()` for either a match count or
//! an ordered set of matching entity identifiers. Compilation of the
//! condition tree into the request document lives in `esquery-core`.

pub use esquery_core as core;

pub mod client;
pub mod error;
pub mod query;
pub mod result;

pub use client::{ClientError, ClusterClient, CountResponse, Hit, Hits, SearchResponse};
pub use error::Error;
pub use query::EntityQuery;
pub use result::QueryResult;

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        client::ClusterClient, error::Error, query::EntityQuery, result::QueryResult,
    };
    pub use esquery_core::{
        condition::{Condition, ConditionGroup, ConditionValue, Conjunction, Node, Operator},
        dsl::SortOrder,
        request::{QueryMode, RangeSpec, SearchRequest},
        value::Value,
    };
}
