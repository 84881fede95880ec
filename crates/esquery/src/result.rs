use indexmap::IndexSet;

///
/// QueryResult
///
/// Either a scalar match count or the matching entity identifiers in
/// cluster hit order, deduplicated (first occurrence wins).
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum QueryResult {
    Count(u64),
    Ids(IndexSet<String>),
}

impl QueryResult {
    /// Number of matches: the scalar itself in count mode, the identifier
    /// cardinality otherwise.
    #[must_use]
    pub fn count(&self) -> u64 {
        match self {
            Self::Count(count) => *count,
            Self::Ids(ids) => ids.len() as u64,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    #[must_use]
    pub const fn ids(&self) -> Option<&IndexSet<String>> {
        match self {
            Self::Count(_) => None,
            Self::Ids(ids) => Some(ids),
        }
    }

    #[must_use]
    pub fn into_ids(self) -> Option<IndexSet<String>> {
        match self {
            Self::Count(_) => None,
            Self::Ids(ids) => Some(ids),
        }
    }
}
