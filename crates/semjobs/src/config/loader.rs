use std::path::{Path, PathBuf};

use crate::config::schema::Config;
use crate::error::ConfigError;

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<Config, ConfigError> {
    let config: Config = serde_json::from_str(content)?;

    validate_config(&config)?;

    Ok(config)
}

/// Builds a configuration from environment variables, starting from the
/// defaults.
///
/// | variable | field |
/// |---|---|
/// | `SPARQL_ENDPOINT`, falling back to `MU_SPARQL_ENDPOINT` | `store.endpoint` |
/// | `SPARQL_UPDATE_ENDPOINT` | `store.updateEndpoint` |
/// | `SPARQL_TIMEOUT_SECS` | `store.timeoutSecs` |
/// | `FILE_INTERNAL_PREFIX` / `FILE_EXTERNAL_PREFIX` | `files.*` |
/// | `ERROR_SUBJECT` / `ERROR_GRAPH` | `errors.*` |
/// | `SERVICE_CREATOR` | `creator` |
pub fn load_config_from_env() -> Result<Config, ConfigError> {
    let mut config = Config::default();

    if let Some(endpoint) = env_var("SPARQL_ENDPOINT").or_else(|| env_var("MU_SPARQL_ENDPOINT")) {
        config.store.endpoint = endpoint;
    }
    if let Some(endpoint) = env_var("SPARQL_UPDATE_ENDPOINT") {
        config.store.update_endpoint = Some(endpoint);
    }
    if let Some(raw) = env_var("SPARQL_TIMEOUT_SECS") {
        let secs = raw.parse::<u64>().map_err(|_| ConfigError::InvalidEnv {
            name: "SPARQL_TIMEOUT_SECS".to_string(),
            value: raw.clone(),
        })?;
        config.store.timeout_secs = Some(secs);
    }
    if let Some(prefix) = env_var("FILE_INTERNAL_PREFIX") {
        config.files.internal_prefix = prefix;
    }
    if let Some(prefix) = env_var("FILE_EXTERNAL_PREFIX") {
        config.files.external_prefix = prefix;
    }
    if let Some(subject) = env_var("ERROR_SUBJECT") {
        config.errors.subject = subject;
    }
    if let Some(graph) = env_var("ERROR_GRAPH") {
        config.errors.graph = graph;
    }
    if let Some(creator) = env_var("SERVICE_CREATOR") {
        config.creator = creator;
    }

    validate_config(&config)?;

    Ok(config)
}

/// Returns the per-user config path: `<config dir>/semjobs/config.json`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("semjobs").join("config.json"))
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
    validate_endpoint("store.endpoint", &config.store.endpoint)?;
    if let Some(update) = &config.store.update_endpoint {
        validate_endpoint("store.updateEndpoint", update)?;
    }

    if config.store.timeout_secs == Some(0) {
        return Err(ConfigError::Validation {
            message: "store.timeoutSecs must be greater than zero".to_string(),
        });
    }

    if config.files.internal_prefix.is_empty() || config.files.external_prefix.is_empty() {
        return Err(ConfigError::Validation {
            message: "files.internalPrefix and files.externalPrefix must not be empty".to_string(),
        });
    }

    if config.errors.subject.trim().is_empty() {
        return Err(ConfigError::Validation {
            message: "errors.subject must not be empty".to_string(),
        });
    }

    for (field, iri) in [("errors.graph", &config.errors.graph), ("creator", &config.creator)] {
        if !iri.contains(':') {
            return Err(ConfigError::Validation {
                message: format!("{} must be an absolute IRI, got '{}'", field, iri),
            });
        }
    }

    Ok(())
}

fn validate_endpoint(field: &str, endpoint: &str) -> Result<(), ConfigError> {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::Validation {
            message: format!("{} must be an http(s) URL, got '{}'", field, endpoint),
        })
    }
}
