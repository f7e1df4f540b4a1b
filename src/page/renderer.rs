// ABOUTME: Page rendering pipeline
// ABOUTME: Constructs page instances, invokes handlers, resolves views, and renders responses through the template manager

use bytes::Bytes;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, error, info, info_span, warn};

use super::declaration::{FrameworkPaths, PageDeclaration};
use super::error::Result;
use super::lifecycle::Lifecycle;
use super::params::PageParams;
use super::response::RenderedPage;
use super::state::PageState;
use super::Request;
use crate::template::{RenderContext, TemplateError, TemplateManager};
use crate::view::{ResolvedView, ViewLocator, ViewOrigin};

/// Exit status used when the template manager cannot be constructed.
pub const EXIT_TEMPLATE_FAILURE: i32 = 70;

/// A request handler. Handlers populate the page state: view variables,
/// metadata, response status and headers.
pub trait Page {
    fn invoke(&mut self, request: &Request, state: &mut PageState) -> anyhow::Result<()>;
}

impl<P: Page + ?Sized> Page for Box<P> {
    fn invoke(&mut self, request: &Request, state: &mut PageState) -> anyhow::Result<()> {
        (**self).invoke(request, state)
    }
}

/// Page backed by a closure
pub struct FnPage<F>(F);

impl<F> FnPage<F>
where
    F: FnMut(&Request, &mut PageState) -> anyhow::Result<()>,
{
    pub fn new(handler: F) -> Self {
        Self(handler)
    }
}

impl<F> Page for FnPage<F>
where
    F: FnMut(&Request, &mut PageState) -> anyhow::Result<()>,
{
    fn invoke(&mut self, request: &Request, state: &mut PageState) -> anyhow::Result<()> {
        (self.0)(request, state)
    }
}

#[derive(Debug, Clone)]
pub struct PageRenderer {
    paths: FrameworkPaths,
    locator: ViewLocator,
}

impl PageRenderer {
    pub fn new(paths: FrameworkPaths) -> Self {
        let locator = ViewLocator::from_paths(&paths);
        Self { paths, locator }
    }

    pub fn paths(&self) -> &FrameworkPaths {
        &self.paths
    }

    pub fn locator(&self) -> &ViewLocator {
        &self.locator
    }

    /// Construct a page instance for one request.
    ///
    /// A template manager that cannot be built is fatal: diagnostics are
    /// logged and dumped to stderr, then the process exits.
    pub fn construct<P: Page>(
        &self,
        declaration: PageDeclaration,
        page: P,
        params: PageParams,
    ) -> PageInstance<P> {
        match self.try_construct(declaration, page, params) {
            Ok(instance) => instance,
            Err(e) => abort_on_template_failure(e),
        }
    }

    /// Construct a page instance, returning template manager failures
    pub fn try_construct<P: Page>(
        &self,
        declaration: PageDeclaration,
        page: P,
        params: PageParams,
    ) -> std::result::Result<PageInstance<P>, TemplateError> {
        let document = self.paths.document_template(&declaration);
        let templates = TemplateManager::new(&document)?;

        debug!(
            "Constructed page in {} with document {}",
            declaration.source_dir.display(),
            document.display()
        );

        Ok(PageInstance {
            declaration,
            page,
            state: PageState::new(params),
            templates,
            locator: self.locator.clone(),
            lifecycle: Lifecycle::Constructed,
        })
    }
}

fn abort_on_template_failure(error: TemplateError) -> ! {
    error!("Failed to construct template manager: {}", error);
    eprintln!("{:#?}", error);
    std::process::exit(EXIT_TEMPLATE_FAILURE);
}

/// One page handling one request. Rendering consumes the instance.
pub struct PageInstance<P> {
    declaration: PageDeclaration,
    page: P,
    state: PageState,
    templates: TemplateManager,
    locator: ViewLocator,
    lifecycle: Lifecycle,
}

impl<P: Page> PageInstance<P> {
    pub fn declaration(&self) -> &PageDeclaration {
        &self.declaration
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// State before invocation, e.g. to seed view variables
    pub fn state_mut(&mut self) -> &mut PageState {
        &mut self.state
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn templates_mut(&mut self) -> &mut TemplateManager {
        &mut self.templates
    }

    /// Invoke the handler, resolve the view and render the response body
    pub fn render(mut self, request: &Request) -> Result<RenderedPage> {
        self.page.invoke(request, &mut self.state)?;
        self.lifecycle.advance(Lifecycle::Invoked)?;

        let resolved = self.locator.resolve(
            &self.declaration.source_dir,
            self.declaration.render_view.as_deref(),
            self.declaration.kind,
        );

        match resolved {
            ResolvedView::Found { path, origin } => {
                if origin == ViewOrigin::Default {
                    self.declaration.render_view = Some(path.clone());
                }
                self.lifecycle.advance(Lifecycle::ViewResolved)?;
                self.render_view(path)
            }
            ResolvedView::NotFound { declared } => {
                warn!(
                    "No view file found for {} in {}",
                    declared.display(),
                    self.declaration.source_dir.display()
                );
                self.lifecycle.advance(Lifecycle::ViewNotFound)?;
                self.state.with_content_type("text/html");
                self.lifecycle.advance(Lifecycle::Rendered)?;

                let (status, headers) = self.state.into_response_parts();
                Ok(RenderedPage::new(status, headers, Bytes::new(), None))
            }
        }
    }

    fn render_view(mut self, view: PathBuf) -> Result<RenderedPage> {
        let span = info_span!("page_render", view = %view.display());
        let _guard = span.enter();
        let started = Instant::now();

        self.templates.add_view(&view)?;

        let context = RenderContext::for_page(self.state.view_variables(), &self.state.meta())?;
        let body = self
            .templates
            .render_template(&context, self.declaration.use_template)?;

        info!(
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            bytes = body.len(),
            "Rendered {}",
            view.display()
        );
        self.lifecycle.advance(Lifecycle::Rendered)?;

        if self.state.content_type().is_none() {
            self.state.with_content_type("text/html");
        }
        let (status, headers) = self.state.into_response_parts();
        Ok(RenderedPage::new(status, headers, Bytes::from(body), Some(view)))
    }
}
