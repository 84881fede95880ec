//! End-to-end facade tests against a scripted cluster client.

use esquery::{
    client::{ClientError, ClusterClient, CountResponse, SearchResponse},
    error::Error,
    query::EntityQuery,
    result::QueryResult,
};
use esquery_core::{
    condition::{ConditionGroup, ConditionValue, Conjunction},
    dsl::SortOrder,
    request::SearchRequest,
};
use serde_json::json;
use std::cell::RefCell;

///
/// MockCluster
/// Records every request and replays canned responses.
///

#[derive(Debug, Default)]
struct MockCluster {
    search_requests: RefCell<Vec<SearchRequest>>,
    count_requests: RefCell<Vec<SearchRequest>>,
    hits: Vec<&'static str>,
    count: u64,
    fail_with: Option<&'static str>,
}

impl MockCluster {
    fn with_hits(hits: Vec<&'static str>) -> Self {
        Self {
            hits,
            ..Self::default()
        }
    }

    fn with_count(count: u64) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }

    fn failing(message: &'static str) -> Self {
        Self {
            fail_with: Some(message),
            ..Self::default()
        }
    }

    fn calls(&self) -> usize {
        self.search_requests.borrow().len() + self.count_requests.borrow().len()
    }
}

impl ClusterClient for MockCluster {
    fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ClientError> {
        if let Some(message) = self.fail_with {
            return Err(ClientError::new(message));
        }
        self.search_requests.borrow_mut().push(request.clone());

        Ok(SearchResponse::from_ids(self.hits.iter().copied()))
    }

    fn count(&self, request: &SearchRequest) -> Result<CountResponse, ClientError> {
        if let Some(message) = self.fail_with {
            return Err(ClientError::new(message));
        }
        self.count_requests.borrow_mut().push(request.clone());

        Ok(CountResponse { count: self.count })
    }
}

#[test]
fn search_returns_ordered_unique_ids() {
    let cluster = MockCluster::with_hits(vec!["a", "b", "a"]);
    let result = EntityQuery::new(&cluster, "node", Conjunction::And)
        .condition("status", 1)
        .execute()
        .unwrap();

    assert_eq!(result.count(), 2);
    assert!(!result.is_empty());

    let ids = result.into_ids().unwrap();
    let ids: Vec<&str> = ids.iter().map(String::as_str).collect();

    // Hit order is preserved and the duplicate collapses.
    assert_eq!(ids, ["a", "b"]);
}

#[test]
fn count_mode_passes_the_scalar_through() {
    let cluster = MockCluster::with_count(42);
    let result = EntityQuery::new(&cluster, "node", Conjunction::And)
        .condition("status", 1)
        .count()
        .execute()
        .unwrap();

    assert_eq!(result, QueryResult::Count(42));
    assert_eq!(cluster.count_requests.borrow().len(), 1);
    assert!(cluster.search_requests.borrow().is_empty());
}

#[test]
fn compile_does_not_touch_the_cluster() {
    let cluster = MockCluster::with_hits(vec!["a"]);
    let query = EntityQuery::new(&cluster, "node", Conjunction::And)
        .condition("type", "article")
        .sort("created", SortOrder::Desc);

    let request = query.compile().unwrap();

    assert_eq!(cluster.calls(), 0);
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({
            "index": "node",
            "body": {
                "_source": false,
                "query": {"bool": {"must": [{"term": {"type": "article"}}]}},
                "sort": {"created": {"order": "desc"}},
                "size": 10_000,
            },
        })
    );
}

#[test]
fn last_sort_directive_wins() {
    let cluster = MockCluster::default();
    let request = EntityQuery::new(&cluster, "node", Conjunction::And)
        .sort("created", SortOrder::Asc)
        .sort("title", SortOrder::Desc)
        .compile()
        .unwrap();

    assert_eq!(
        serde_json::to_value(&request).unwrap()["body"]["sort"],
        json!({"title": {"order": "desc"}})
    );
}

#[test]
fn or_queries_wrap_nested_groups_and_negations() {
    let cluster = MockCluster::default();
    let request = EntityQuery::new(&cluster, "node", Conjunction::Or)
        .condition_op("status", "!=", ConditionValue::scalar(0))
        .unwrap()
        .group(ConditionGroup::all().eq("type", "page").exists("author"))
        .compile()
        .unwrap();

    assert_eq!(
        serde_json::to_value(&request).unwrap()["body"]["query"],
        json!({
            "bool": {"should": [
                {"bool": {"must_not": [{"term": {"status": 0}}]}},
                {"bool": {"must": [
                    {"term": {"type": "page"}},
                    {"exists": {"field": "author"}},
                ]}},
            ]}
        })
    );
}

#[test]
fn malformed_dynamic_condition_fails_before_execution() {
    let cluster = MockCluster::default();
    let err = EntityQuery::new(&cluster, "node", Conjunction::And)
        .condition_op("age", "BETWEEN", ConditionValue::set([1, 2, 3]))
        .unwrap_err();

    assert!(matches!(err, Error::Condition(_)));
    assert_eq!(cluster.calls(), 0);
}

#[test]
fn unknown_operator_fails_before_execution() {
    let cluster = MockCluster::default();
    let err = EntityQuery::new(&cluster, "node", Conjunction::And)
        .condition_op("name", "LIKE", ConditionValue::scalar("bob"))
        .unwrap_err();

    assert!(matches!(err, Error::Condition(_)));
}

#[test]
fn transport_errors_surface_unmodified() {
    let cluster = MockCluster::failing("connection refused");
    let err = EntityQuery::new(&cluster, "node", Conjunction::And)
        .condition("status", 1)
        .execute()
        .unwrap_err();

    let Error::Client(client_err) = err else {
        panic!("expected a client error");
    };
    assert_eq!(client_err.message(), "connection refused");
}

#[test]
fn execute_recompiles_from_the_current_snapshot() {
    let cluster = MockCluster::with_hits(vec!["a"]);
    let query = EntityQuery::new(&cluster, "node", Conjunction::And).condition("status", 1);

    query.execute().unwrap();
    let refined = query.range(Some(10), Some(5));
    refined.execute().unwrap();

    let requests = cluster.search_requests.borrow();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].body.from, None);
    assert_eq!(requests[1].body.from, Some(10));
    assert_eq!(requests[1].body.size, Some(5));
}
