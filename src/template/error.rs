// ABOUTME: Error types for template manager operations
// ABOUTME: Defines specific error types for loading document and view templates and rendering them

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Document template not found: {}", path.display())]
    DocumentNotFound { path: PathBuf },

    #[error("View template not found: {}", path.display())]
    ViewNotFound { path: PathBuf },

    #[error("No view has been added to the template manager")]
    NoView,

    #[error("Template syntax error in {}: {message}", path.display())]
    SyntaxError { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Handlebars error: {0}")]
    HandlebarsError(#[from] handlebars::RenderError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TemplateError>;
