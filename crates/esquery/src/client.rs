use esquery_core::request::SearchRequest;
use serde::Deserialize;
use std::error::Error as StdError;
use thiserror::Error as ThisError;

///
/// ClientError
///
/// Opaque transport failure surfaced unmodified from the cluster client.
/// This layer never retries and never swallows one.
///

#[derive(Debug, ThisError)]
#[error("cluster request failed: {message}")]
pub struct ClientError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl ClientError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

///
/// ClusterClient
///
/// Boundary collaborator that executes compiled requests against the
/// cluster. Implementations own transport, authentication, timeouts, and
/// retries; this layer treats them as opaque.
///

pub trait ClusterClient {
    /// Execute a search and return the raw hit envelope.
    fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ClientError>;

    /// Count the matches for the request's filter.
    fn count(&self, request: &SearchRequest) -> Result<CountResponse, ClientError>;
}

///
/// SearchResponse
/// Engine hit envelope, trimmed to what identifier extraction needs.
///

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SearchResponse {
    pub hits: Hits,
}

impl SearchResponse {
    /// Build an envelope from bare identifiers, in order.
    #[must_use]
    pub fn from_ids<I>(ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            hits: Hits {
                hits: ids
                    .into_iter()
                    .map(|id| Hit { id: id.into() })
                    .collect(),
            },
        }
    }
}

///
/// Hits
///

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Hits {
    pub hits: Vec<Hit>,
}

///
/// Hit
///

#[derive(Clone, Debug, Deserialize)]
pub struct Hit {
    #[serde(rename = "_id")]
    pub id: String,
}

///
/// CountResponse
///

#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct CountResponse {
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_envelope_deserializes_from_engine_shape() {
        let response: SearchResponse = serde_json::from_value(serde_json::json!({
            "took": 3,
            "hits": {
                "total": {"value": 2},
                "hits": [
                    {"_index": "node", "_id": "a", "_score": 1.0},
                    {"_index": "node", "_id": "b", "_score": 0.5},
                ],
            },
        }))
        .unwrap();

        let ids: Vec<&str> = response.hits.hits.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn client_error_preserves_its_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = ClientError::with_source("request failed", io);

        assert_eq!(err.message(), "request failed");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn count_envelope_deserializes() {
        let response: CountResponse =
            serde_json::from_value(serde_json::json!({"count": 7, "_shards": {}})).unwrap();
        assert_eq!(response.count, 7);
    }
}
