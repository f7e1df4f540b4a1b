// ABOUTME: Registry of page types and their declarations
// ABOUTME: Builds a fresh page instance per request from a registered factory and renders it

use std::collections::HashMap;
use tracing::debug;

use super::declaration::PageDeclaration;
use super::error::{PageError, Result};
use super::params::PageParams;
use super::renderer::{Page, PageRenderer};
use super::response::RenderedPage;
use super::Request;

pub type PageFactory = Box<dyn Fn() -> Box<dyn Page>>;

struct Registration {
    declaration: PageDeclaration,
    factory: PageFactory,
}

pub struct PageRegistry {
    renderer: PageRenderer,
    pages: HashMap<String, Registration>,
}

impl PageRegistry {
    pub fn new(renderer: PageRenderer) -> Self {
        Self {
            renderer,
            pages: HashMap::new(),
        }
    }

    pub fn register<F, P>(&mut self, name: &str, declaration: PageDeclaration, factory: F) -> Result<()>
    where
        F: Fn() -> P + 'static,
        P: Page + 'static,
    {
        if self.pages.contains_key(name) {
            return Err(PageError::DuplicatePage {
                name: name.to_string(),
            });
        }

        debug!("Registered page {} at {}", name, declaration.source_dir.display());
        self.pages.insert(
            name.to_string(),
            Registration {
                declaration,
                factory: Box::new(move || Box::new(factory()) as Box<dyn Page>),
            },
        );
        Ok(())
    }

    pub fn declaration(&self, name: &str) -> Option<&PageDeclaration> {
        self.pages.get(name).map(|r| &r.declaration)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.pages.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.pages.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Construct a fresh instance of the named page and render it
    pub fn render(&self, name: &str, params: PageParams, request: &Request) -> Result<RenderedPage> {
        let registration = self.pages.get(name).ok_or_else(|| PageError::UnknownPage {
            name: name.to_string(),
        })?;

        let page = (registration.factory)();
        self.renderer
            .construct(registration.declaration.clone(), page, params)
            .render(request)
    }

    pub fn renderer(&self) -> &PageRenderer {
        &self.renderer
    }
}
