use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SemjobsError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
}

#[derive(Error, Debug)]
pub enum StoreError {
    /// A read against the store failed (transport or store-side rejection).
    #[error("Store read failed at '{endpoint}': {reason}")]
    Read { endpoint: String, reason: String },

    /// A write against the store failed (transport or store-side rejection).
    #[error("Store write failed at '{endpoint}': {reason}")]
    Write { endpoint: String, reason: String },

    #[error("Malformed store response: {0}")]
    InvalidResponse(String),

    #[error("Invalid store header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },

    #[error("Invalid value '{value}' for environment variable '{name}'")]
    InvalidEnv { name: String, value: String },
}

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Failed to delete file content '{path}': {source}")]
    Delete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Physical file '{0}' is not addressable in local storage")]
    NotLocal(String),
}

#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to install log bridge: {0}")]
    LogBridge(#[from] log::SetLoggerError),

    #[error("Failed to install tracing subscriber: {0}")]
    Subscriber(#[from] tracing::subscriber::SetGlobalDefaultError),

    #[error("Invalid log filter '{filter}': {reason}")]
    Filter { filter: String, reason: String },
}

pub type Result<T> = std::result::Result<T, SemjobsError>;
