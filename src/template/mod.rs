// ABOUTME: Template module for the page rendering layer
// ABOUTME: Provides the Handlebars-backed template manager, render context, and helper functions

pub mod context;
pub mod engine;
pub mod error;
pub mod helpers;

pub use context::{RenderContext, META_KEY};
pub use engine::{TemplateManager, DOCUMENT_TEMPLATE, VIEW_TEMPLATE};
pub use error::{Result, TemplateError};
