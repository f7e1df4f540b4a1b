// ABOUTME: Template manager built on Handlebars for page rendering
// ABOUTME: Loads the document template, registers the page view, and renders with or without document wrapping

use handlebars::Handlebars;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::context::RenderContext;
use super::error::{Result, TemplateError};
use super::helpers;

/// Name the document template is registered under.
pub const DOCUMENT_TEMPLATE: &str = "document";

/// Name the view is registered under, both as a template and as a partial.
/// Document templates embed it with `{{> view}}`.
pub const VIEW_TEMPLATE: &str = "view";

#[derive(Clone)]
pub struct TemplateManager {
    handlebars: Handlebars<'static>,
    document_path: PathBuf,
    view_path: Option<PathBuf>,
}

impl TemplateManager {
    /// Create a template manager around the given document template.
    ///
    /// Fails when the document template is missing or does not compile.
    pub fn new(document_template: &Path) -> Result<Self> {
        let mut handlebars = Handlebars::new();

        handlebars.set_strict_mode(false);
        handlebars.set_dev_mode(false);

        helpers::register_helpers(&mut handlebars);

        if !document_template.is_file() {
            return Err(TemplateError::DocumentNotFound {
                path: document_template.to_path_buf(),
            });
        }

        let source = std::fs::read_to_string(document_template)?;
        handlebars
            .register_template_string(DOCUMENT_TEMPLATE, source)
            .map_err(|e| TemplateError::SyntaxError {
                path: document_template.to_path_buf(),
                message: e.to_string(),
            })?;

        debug!("Loaded document template {}", document_template.display());

        Ok(Self {
            handlebars,
            document_path: document_template.to_path_buf(),
            view_path: None,
        })
    }

    /// Register the view file rendered for this page
    pub fn add_view(&mut self, path: &Path) -> Result<()> {
        if !path.is_file() {
            return Err(TemplateError::ViewNotFound {
                path: path.to_path_buf(),
            });
        }

        let source = std::fs::read_to_string(path)?;
        let syntax_error = |e: handlebars::TemplateError| TemplateError::SyntaxError {
            path: path.to_path_buf(),
            message: e.to_string(),
        };

        self.handlebars
            .register_template_string(VIEW_TEMPLATE, &source)
            .map_err(syntax_error)?;
        self.handlebars
            .register_partial(VIEW_TEMPLATE, source)
            .map_err(syntax_error)?;

        debug!("Registered view {}", path.display());
        self.view_path = Some(path.to_path_buf());
        Ok(())
    }

    /// Render the registered view, wrapped in the document template when
    /// `use_template` is set
    pub fn render_template(&self, context: &RenderContext, use_template: bool) -> Result<String> {
        if self.view_path.is_none() {
            return Err(TemplateError::NoView);
        }

        let name = if use_template {
            DOCUMENT_TEMPLATE
        } else {
            VIEW_TEMPLATE
        };

        self.handlebars
            .render(name, &context.to_json())
            .map_err(TemplateError::HandlebarsError)
    }

    pub fn document_path(&self) -> &Path {
        &self.document_path
    }

    pub fn view_path(&self) -> Option<&Path> {
        self.view_path.as_deref()
    }

    /// Register a custom helper function
    pub fn register_helper<F>(&mut self, name: &str, helper: F)
    where
        F: handlebars::HelperDef + Send + Sync + 'static,
    {
        self.handlebars.register_helper(name, Box::new(helper));
    }
}
