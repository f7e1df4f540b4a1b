// ABOUTME: Error types for page construction, invocation, and rendering
// ABOUTME: Defines specific error types for the page lifecycle, registry, and page manifests

use thiserror::Error;

use super::lifecycle::Lifecycle;
use crate::template::TemplateError;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("Template error: {0}")]
    TemplateError(#[from] TemplateError),

    #[error(transparent)]
    Handler(#[from] anyhow::Error),

    #[error("Invalid page lifecycle transition: {from} -> {to}")]
    InvalidTransition { from: Lifecycle, to: Lifecycle },

    #[error("Unknown page: {name}")]
    UnknownPage { name: String },

    #[error("Page already registered: {name}")]
    DuplicatePage { name: String },

    #[error("Invalid response header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("Failed to read page manifest: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse page manifest: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PageError>;
