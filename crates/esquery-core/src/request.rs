use crate::{
    compile::{self, CompileError},
    condition::ConditionGroup,
    dsl::{BoolQuery, SortClause},
};
use serde::Serialize;

///
/// QueryMode
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum QueryMode {
    /// Return matching entity identifiers.
    #[default]
    Search,
    /// Return only the number of matches.
    Count,
}

///
/// RangeSpec
/// Pagination window for search-mode execution; ignored when counting.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RangeSpec {
    pub start: Option<u64>,
    pub length: Option<u32>,
}

///
/// SearchRequest
///
/// The compiled artifact submitted to the cluster: index name plus the
/// request body document. Built fresh per execution from the current
/// condition tree and directive snapshot, never mutated afterwards.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchRequest {
    pub index: String,
    pub body: SearchBody,
}

///
/// SearchBody
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchBody {
    /// Always `false` for search-mode requests: only identifiers are
    /// consumed downstream, so source documents are never fetched.
    #[serde(rename = "_source", skip_serializing_if = "Option::is_none")]
    pub source: Option<bool>,
    pub query: QueryDocument,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortClause>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

///
/// QueryDocument
/// Top-level `{"bool": ...}` wrapper around the lowered filter.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QueryDocument {
    #[serde(rename = "bool")]
    pub bool_query: BoolQuery,
}

impl SearchRequest {
    /// Lower the filter and combine it with the directives into a request.
    ///
    /// Count mode carries the filter only. Search mode excludes `_source`,
    /// applies sort and range, and resolves a missing `size` to
    /// `result_window - from` so "all matches" stays inside the engine's
    /// result-window ceiling.
    pub fn assemble(
        index: impl Into<String>,
        filter: &ConditionGroup,
        mode: QueryMode,
        sort: Option<&SortClause>,
        range: RangeSpec,
        result_window: u32,
    ) -> Result<Self, CompileError> {
        let query = QueryDocument {
            bool_query: compile::lower(filter)?,
        };

        let body = match mode {
            QueryMode::Count => SearchBody {
                source: None,
                query,
                sort: None,
                from: None,
                size: None,
            },
            QueryMode::Search => {
                let from = range.start;
                let size = match range.length {
                    Some(length) => u64::from(length),
                    None => u64::from(result_window).saturating_sub(from.unwrap_or(0)),
                };

                SearchBody {
                    source: Some(false),
                    query,
                    sort: sort.cloned(),
                    from,
                    size: Some(size),
                }
            }
        };

        Ok(Self {
            index: index.into(),
            body,
        })
    }
}
