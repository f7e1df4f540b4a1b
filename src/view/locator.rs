// ABOUTME: View file resolution for pages
// ABOUTME: Searches the page directory, the pages root, and the project root for a declared view template

use serde::Serialize;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

use crate::page::{FrameworkPaths, PageKind};

/// View file used when a page declares none.
pub const DEFAULT_VIEW: &str = "view.twig";

/// View file used when a manageable page declares none.
pub const DEFAULT_MANAGE_VIEW: &str = "manage-form.twig";

/// Where a resolved view was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewOrigin {
    /// No view was declared; the page directory default is assumed present
    Default,
    PageDirectory,
    PagesRoot,
    ProjectRoot,
}

impl fmt::Display for ViewOrigin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ViewOrigin::Default => "default",
            ViewOrigin::PageDirectory => "page directory",
            ViewOrigin::PagesRoot => "pages root",
            ViewOrigin::ProjectRoot => "project root",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedView {
    Found { path: PathBuf, origin: ViewOrigin },
    NotFound { declared: PathBuf },
}

impl ResolvedView {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ResolvedView::Found { path, .. } => Some(path),
            ResolvedView::NotFound { .. } => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, ResolvedView::Found { .. })
    }
}

#[derive(Debug, Clone)]
pub struct ViewLocator {
    pages_root: PathBuf,
    project_root: PathBuf,
}

impl ViewLocator {
    pub fn new(pages_root: impl Into<PathBuf>, project_root: impl Into<PathBuf>) -> Self {
        Self {
            pages_root: pages_root.into(),
            project_root: project_root.into(),
        }
    }

    pub fn from_paths(paths: &FrameworkPaths) -> Self {
        Self::new(&paths.pages_root, &paths.project_root)
    }

    /// Default view path for a page directory, without touching the filesystem
    pub fn default_view(page_dir: &Path, kind: PageKind) -> PathBuf {
        match kind {
            PageKind::Standard => page_dir.join(DEFAULT_VIEW),
            PageKind::Manageable => page_dir.join(DEFAULT_MANAGE_VIEW),
        }
    }

    /// Resolve the view template for a page. Candidates are checked in order
    /// and the first existing file wins.
    pub fn resolve(&self, page_dir: &Path, declared: Option<&Path>, kind: PageKind) -> ResolvedView {
        let Some(declared) = declared else {
            let path = Self::default_view(page_dir, kind);
            debug!("No view declared, using default {}", path.display());
            return ResolvedView::Found {
                path,
                origin: ViewOrigin::Default,
            };
        };

        let relative = strip_root(declared);
        let candidates = [
            (page_dir, ViewOrigin::PageDirectory),
            (self.pages_root.as_path(), ViewOrigin::PagesRoot),
            (self.project_root.as_path(), ViewOrigin::ProjectRoot),
        ];

        for (root, origin) in candidates {
            let candidate = root.join(&relative);
            if candidate.is_file() {
                debug!("Resolved view {} from {}", candidate.display(), origin);
                return ResolvedView::Found {
                    path: candidate,
                    origin,
                };
            }
            debug!("View candidate {} does not exist", candidate.display());
        }

        ResolvedView::NotFound {
            declared: declared.to_path_buf(),
        }
    }

    pub fn pages_root(&self) -> &Path {
        &self.pages_root
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }
}

/// Declared views are always relative to a candidate root, even when written
/// with a leading `/`.
fn strip_root(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
        .collect()
}
