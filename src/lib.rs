// ABOUTME: Main library module for the pageframe page rendering layer
// ABOUTME: Exports all core modules and provides the public API

pub mod cli;
pub mod page;
pub mod template;
pub mod view;

// Re-export commonly used types
pub use cli::{App, Args, Config};
pub use page::{
    FnPage, FrameworkPaths, Meta, MetaProvider, Page, PageDeclaration, PageError, PageKind,
    PageParams, PageRegistry, PageRenderer, PageState, RenderedPage, Request,
};
pub use template::{RenderContext, TemplateError, TemplateManager};
pub use view::{ResolvedView, ViewLocator, ViewOrigin};

// Error handling
pub type Result<T> = anyhow::Result<T>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
