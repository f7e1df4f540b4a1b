// ABOUTME: Page module for request handlers rendered through views
// ABOUTME: Exports page declarations, per-request state, the renderer, the registry, and manifests

pub mod declaration;
pub mod error;
pub mod lifecycle;
pub mod manifest;
pub mod meta;
pub mod params;
pub mod registry;
pub mod renderer;
pub mod response;
pub mod state;

pub use declaration::{FrameworkPaths, PageDeclaration, PageKind};
pub use error::{PageError, Result};
pub use lifecycle::Lifecycle;
pub use manifest::{ManifestPage, PageManifest, MANIFEST_FILE};
pub use meta::{Meta, MetaProvider};
pub use params::PageParams;
pub use registry::PageRegistry;
pub use renderer::{FnPage, Page, PageInstance, PageRenderer, EXIT_TEMPLATE_FAILURE};
pub use response::RenderedPage;
pub use state::PageState;

/// Incoming request handed to page handlers
pub type Request = http::Request<bytes::Bytes>;
