use crate::{client::ClusterClient, error::Error, result::QueryResult};
use esquery_core::{
    DEFAULT_RESULT_WINDOW,
    condition::{Condition, ConditionGroup, ConditionValue, Conjunction},
    dsl::{SortClause, SortOrder},
    request::{QueryMode, RangeSpec, SearchRequest},
    value::Value,
};
use indexmap::IndexSet;
use tracing::debug;

///
/// EntityQuery
///
/// Builder over one entity type: accumulate a condition tree and
/// directives, then execute against the cluster client. Every `execute()`
/// compiles a fresh request from the current snapshot; the builder is not
/// consumed, so a query can be refined and re-run.
///
/// Not synchronized: share a query across threads only with external
/// locking, and never mutate it while an execution is in flight.
///

#[derive(Debug)]
pub struct EntityQuery<'a, C> {
    client: &'a C,
    entity_type: String,
    root: ConditionGroup,
    sort: Option<SortClause>,
    range: RangeSpec,
    mode: QueryMode,
    result_window: u32,
}

impl<'a, C: ClusterClient> EntityQuery<'a, C> {
    /// Start a query for an entity type with the given root conjunction.
    #[must_use]
    pub fn new(client: &'a C, entity_type: impl Into<String>, conjunction: Conjunction) -> Self {
        Self {
            client,
            entity_type: entity_type.into(),
            root: ConditionGroup::new(conjunction),
            sort: None,
            range: RangeSpec::default(),
            mode: QueryMode::default(),
            result_window: DEFAULT_RESULT_WINDOW,
        }
    }

    // ------------------------------------------------------------------
    // Intent inspection
    // ------------------------------------------------------------------

    #[must_use]
    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    #[must_use]
    pub const fn mode(&self) -> QueryMode {
        self.mode
    }

    #[must_use]
    pub const fn root(&self) -> &ConditionGroup {
        &self.root
    }

    // ------------------------------------------------------------------
    // Query refinement
    // ------------------------------------------------------------------

    /// Add an equality leaf to the root group (the default operator).
    #[must_use]
    pub fn condition(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.root = self.root.condition(field, value);
        self
    }

    /// Add a leaf with a spelled-out operator (`"="`, `"!="`, `"IN"`,
    /// `"BETWEEN"`, ...). Unknown spellings and mismatched value shapes
    /// fail here, before anything reaches the cluster.
    pub fn condition_op(
        mut self,
        field: impl Into<String>,
        operator: &str,
        value: ConditionValue,
    ) -> Result<Self, Error> {
        self.root = self
            .root
            .with(Condition::parse(field, Some(operator), value)?);

        Ok(self)
    }

    /// Field is present and non-null.
    #[must_use]
    pub fn exists(mut self, field: impl Into<String>) -> Self {
        self.root = self.root.exists(field);
        self
    }

    /// Field is absent or null.
    #[must_use]
    pub fn not_exists(mut self, field: impl Into<String>) -> Self {
        self.root = self.root.not_exists(field);
        self
    }

    /// Attach a nested sub-group with its own conjunction.
    #[must_use]
    pub fn group(mut self, group: ConditionGroup) -> Self {
        self.root = self.root.with(group);
        self
    }

    /// Sort directive. Last call wins: the request carries one sort clause.
    #[must_use]
    pub fn sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort = Some(SortClause {
            field: field.into(),
            order,
        });
        self
    }

    /// Pagination window for search-mode execution.
    #[must_use]
    pub fn range(mut self, start: Option<u64>, length: Option<u32>) -> Self {
        self.range = RangeSpec { start, length };
        self
    }

    /// Switch to count mode: `execute()` returns the match count only.
    #[must_use]
    pub fn count(mut self) -> Self {
        self.mode = QueryMode::Count;
        self
    }

    /// Override the default result-window ceiling.
    #[must_use]
    pub fn result_window(mut self, window: u32) -> Self {
        self.result_window = window;
        self
    }

    // ------------------------------------------------------------------
    // Compilation / execution
    // ------------------------------------------------------------------

    /// Compile the request without executing it, for introspection and
    /// debugging.
    pub fn compile(&self) -> Result<SearchRequest, Error> {
        let request = SearchRequest::assemble(
            self.entity_type.clone(),
            &self.root,
            self.mode,
            self.sort.as_ref(),
            self.range,
            self.result_window,
        )?;

        Ok(request)
    }

    /// Compile and run: the scalar count in count mode, otherwise the
    /// ordered-unique identifiers of matching entities.
    pub fn execute(&self) -> Result<QueryResult, Error> {
        let request = self.compile()?;
        debug!(index = %request.index, mode = ?self.mode, "executing entity query");

        match self.mode {
            QueryMode::Count => {
                let response = self.client.count(&request)?;

                Ok(QueryResult::Count(response.count))
            }
            QueryMode::Search => {
                let response = self.client.search(&request)?;

                let mut ids = IndexSet::with_capacity(response.hits.hits.len());
                for hit in response.hits.hits {
                    // First occurrence wins; duplicate hits collapse.
                    ids.insert(hit.id);
                }

                Ok(QueryResult::Ids(ids))
            }
        }
    }
}
