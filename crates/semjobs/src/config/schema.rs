use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::rdf::Iri;

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub files: FileConfig,
    #[serde(default)]
    pub errors: ErrorConfig,
    /// Identity recorded as `dct:creator` by flow facades.
    #[serde(default = "default_creator")]
    pub creator: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            files: FileConfig::default(),
            errors: ErrorConfig::default(),
            creator: default_creator(),
        }
    }
}

impl Config {
    pub fn creator_iri(&self) -> Iri {
        Iri::new(self.creator.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// SPARQL query endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// SPARQL update endpoint, when it differs from the query endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_endpoint: Option<String>,
    /// Request timeout. Unset means calls wait indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Static headers sent with every request.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            update_endpoint: None,
            timeout_secs: None,
            headers: BTreeMap::new(),
        }
    }
}

/// Mapping between local storage paths and externally addressable file URIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileConfig {
    #[serde(default = "default_internal_prefix")]
    pub internal_prefix: String,
    #[serde(default = "default_external_prefix")]
    pub external_prefix: String,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            internal_prefix: default_internal_prefix(),
            external_prefix: default_external_prefix(),
        }
    }
}

impl FileConfig {
    /// `/share/x.pdf` becomes `share://x.pdf`; other paths are kept as-is.
    pub fn to_external_uri(&self, path: &str) -> String {
        match path.strip_prefix(&self.internal_prefix) {
            Some(rest) => format!("{}{}", self.external_prefix, rest),
            None => path.to_string(),
        }
    }

    /// Inverse of [`FileConfig::to_external_uri`]. `None` for URIs outside
    /// the external scheme.
    pub fn to_internal_path(&self, uri: &str) -> Option<String> {
        uri.strip_prefix(&self.external_prefix)
            .map(|rest| format!("{}{}", self.internal_prefix, rest))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorConfig {
    /// Label identifying the producing system on every Error record.
    #[serde(default = "default_error_subject")]
    pub subject: String,
    /// Graph Error records are written to.
    #[serde(default = "default_error_graph")]
    pub graph: String,
}

impl Default for ErrorConfig {
    fn default() -> Self {
        Self {
            subject: default_error_subject(),
            graph: default_error_graph(),
        }
    }
}

fn default_endpoint() -> String {
    "http://database:8890/sparql".to_string()
}

fn default_internal_prefix() -> String {
    "/share/".to_string()
}

fn default_external_prefix() -> String {
    "share://".to_string()
}

fn default_error_subject() -> String {
    "Automatic Submission Service".to_string()
}

fn default_error_graph() -> String {
    "http://mu.semte.ch/graphs/error".to_string()
}

fn default_creator() -> String {
    "http://lblod.data.gift/services/automatic-submission-flow-service".to_string()
}
