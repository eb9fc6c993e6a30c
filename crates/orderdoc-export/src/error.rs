//! Error types for orderdoc-export

use orderdoc_template::TemplateError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Invalid settings: {0}")]
    Settings(String),

    #[error("Could not read YAML settings: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Could not read JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Template '{section}' failed: {source}")]
    Template {
        section: &'static str,
        #[source]
        source: TemplateError,
    },
}

impl ExportError {
    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
