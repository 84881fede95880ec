use crate::value::Value;
use serde::{
    Serialize, Serializer,
    ser::{SerializeMap, SerializeStruct},
};

///
/// Clause
///
/// One boolean-query clause, serialized to the engine's exact wire shape:
/// `{"term": {field: value}}`, `{"exists": {"field": f}}`,
/// `{"range": {field: {gt: ..}}}`, and so on. Field names are dynamic map
/// keys, so serialization is hand-written.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Clause {
    Term { field: String, value: Value },
    Terms { field: String, values: Vec<Value> },
    Exists { field: String },
    Range { field: String, bounds: RangeBounds },
    Prefix { field: String, value: String },
    Wildcard { field: String, pattern: String },
    Bool(Box<BoolQuery>),
}

impl Serialize for Clause {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Self::Term { field, value } => {
                map.serialize_entry("term", &FieldEntry(field, value))?;
            }
            Self::Terms { field, values } => {
                map.serialize_entry("terms", &FieldEntry(field, values))?;
            }
            Self::Exists { field } => {
                map.serialize_entry("exists", &ExistsBody { field })?;
            }
            Self::Range { field, bounds } => {
                map.serialize_entry("range", &FieldEntry(field, bounds))?;
            }
            Self::Prefix { field, value } => {
                map.serialize_entry("prefix", &FieldEntry(field, value))?;
            }
            Self::Wildcard { field, pattern } => {
                map.serialize_entry("wildcard", &FieldEntry(field, pattern))?;
            }
            Self::Bool(bool_query) => {
                map.serialize_entry("bool", bool_query)?;
            }
        }
        map.end()
    }
}

/// `{field: payload}` single-entry object used by term, terms, range,
/// prefix, and wildcard clauses.
struct FieldEntry<'a, T>(&'a str, &'a T);

impl<T: Serialize> Serialize for FieldEntry<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.0, self.1)?;
        map.end()
    }
}

#[derive(Serialize)]
struct ExistsBody<'a> {
    field: &'a str,
}

///
/// BoolQuery
///
/// The three clause buckets of a boolean query. Empty buckets are omitted
/// from the document; the engine treats a missing bucket and an empty one
/// identically. When `should` is non-empty and `must` is absent, the engine
/// requires at least one `should` clause to match.
///

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BoolQuery {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub must: Vec<Clause>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub should: Vec<Clause>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub must_not: Vec<Clause>,
}

impl BoolQuery {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.must.is_empty() && self.should.is_empty() && self.must_not.is_empty()
    }

    /// Wrap this sub-query as a nested bool clause.
    #[must_use]
    pub fn into_clause(self) -> Clause {
        Clause::Bool(Box::new(self))
    }

    /// Negate a single clause by wrapping it in a fresh `must_not` group.
    /// This is how negation is expressed where no negative bucket exists.
    #[must_use]
    pub fn negating(clause: Clause) -> Self {
        Self {
            must_not: vec![clause],
            ..Self::default()
        }
    }
}

///
/// RangeBounds
///

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RangeBounds {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gt: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gte: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lt: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lte: Option<Value>,
}

///
/// SortOrder
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

///
/// SortClause
/// Serializes to `{field: {"order": "asc"|"desc"}}`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SortClause {
    pub field: String,
    pub order: SortOrder,
}

impl Serialize for SortClause {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.field, &OrderBody { order: self.order })?;
        map.end()
    }
}

struct OrderBody {
    order: SortOrder,
}

impl Serialize for OrderBody {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut body = serializer.serialize_struct("OrderBody", 1)?;
        body.serialize_field("order", &self.order)?;
        body.end()
    }
}
