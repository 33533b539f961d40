//! SPARQL 1.1 Protocol client.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use tracing::{info_span, Instrument};

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::rdf::{SelectQuery, Update};

use super::{GraphStore, Row, SparqlResults};

const SPARQL_QUERY: &str = "application/sparql-query";
const SPARQL_UPDATE: &str = "application/sparql-update";
const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// Maximum length of a store error body kept in error messages.
const MAX_ERROR_BODY_LENGTH: usize = 200;

fn truncate_body(body: &str) -> String {
    if body.len() > MAX_ERROR_BODY_LENGTH {
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated)", &body[..end])
    } else {
        body.to_string()
    }
}

/// Talks to a remote SPARQL endpoint.
///
/// No timeout is applied unless `timeout_secs` is configured; a stuck call
/// blocks its caller.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    query_endpoint: String,
    update_endpoint: String,
}

impl HttpStore {
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| StoreError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| StoreError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
            headers.insert(header_name, header_value);
        }

        let mut builder = Client::builder().default_headers(headers);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(StoreError::Client)?;

        Ok(Self {
            client,
            query_endpoint: config.endpoint.clone(),
            update_endpoint: config
                .update_endpoint
                .clone()
                .unwrap_or_else(|| config.endpoint.clone()),
        })
    }

    pub fn query_endpoint(&self) -> &str {
        &self.query_endpoint
    }

    pub fn update_endpoint(&self) -> &str {
        &self.update_endpoint
    }

    async fn post_query(&self, sparql: String) -> Result<Vec<Row>, StoreError> {
        let read_error = |reason: String| StoreError::Read {
            endpoint: self.query_endpoint.clone(),
            reason,
        };

        let response = self
            .client
            .post(&self.query_endpoint)
            .header(CONTENT_TYPE, SPARQL_QUERY)
            .header(ACCEPT, SPARQL_RESULTS_JSON)
            .body(sparql)
            .send()
            .await
            .map_err(|e| read_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("SPARQL query rejected with {}", status);
            return Err(read_error(format!("{}: {}", status, truncate_body(&body))));
        }

        let body = response
            .text()
            .await
            .map_err(|e| read_error(e.to_string()))?;
        let results: SparqlResults = serde_json::from_str(&body)
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;
        Ok(results.into_rows())
    }

    async fn post_update(&self, sparql: String) -> Result<(), StoreError> {
        let write_error = |reason: String| StoreError::Write {
            endpoint: self.update_endpoint.clone(),
            reason,
        };

        let response = self
            .client
            .post(&self.update_endpoint)
            .header(CONTENT_TYPE, SPARQL_UPDATE)
            .body(sparql)
            .send()
            .await
            .map_err(|e| write_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("SPARQL update rejected with {}", status);
            return Err(write_error(format!("{}: {}", status, truncate_body(&body))));
        }
        Ok(())
    }
}

#[async_trait]
impl GraphStore for HttpStore {
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Row>, StoreError> {
        let sparql = query.to_sparql();
        debug!("SPARQL query ({} bytes)", sparql.len());
        let span = info_span!("store.select", endpoint = %self.query_endpoint);
        self.post_query(sparql).instrument(span).await
    }

    async fn update(&self, update: &Update) -> Result<(), StoreError> {
        let sparql = update.to_sparql();
        debug!("SPARQL update ({} bytes)", sparql.len());
        let span = info_span!("store.update", endpoint = %self.update_endpoint);
        self.post_update(sparql).instrument(span).await
    }
}
