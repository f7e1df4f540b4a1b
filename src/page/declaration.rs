// ABOUTME: Static per-page-type declarations and framework directory layout
// ABOUTME: Declares a page's source directory, view, document template, and kind at registration time

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Document template used for standard pages when none is declared.
pub const DEFAULT_DOCUMENT: &str = "html.twig";

/// Document template used for manageable pages when none is declared.
pub const DEFAULT_MANAGE_DOCUMENT: &str = "manage-html.twig";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    #[default]
    Standard,
    /// Rendered through the admin/management form
    Manageable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDeclaration {
    /// Directory holding the page's own files
    pub source_dir: PathBuf,
    /// Whole-document template; the framework default when `None`
    pub render_template: Option<PathBuf>,
    /// View fragment; `view.twig` in `source_dir` when `None`
    pub render_view: Option<PathBuf>,
    pub use_template: bool,
    pub kind: PageKind,
}

impl PageDeclaration {
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            render_template: None,
            render_view: None,
            use_template: true,
            kind: PageKind::Standard,
        }
    }

    pub fn with_view(mut self, view: impl Into<PathBuf>) -> Self {
        self.render_view = Some(view.into());
        self
    }

    pub fn with_template(mut self, template: impl Into<PathBuf>) -> Self {
        self.render_template = Some(template.into());
        self
    }

    pub fn without_template(mut self) -> Self {
        self.use_template = false;
        self
    }

    pub fn manageable(mut self) -> Self {
        self.kind = PageKind::Manageable;
        self
    }
}

/// Absolute directory layout the renderer resolves against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameworkPaths {
    pub project_root: PathBuf,
    pub pages_root: PathBuf,
    /// Directory holding the framework's default document templates
    pub views_dir: PathBuf,
}

impl FrameworkPaths {
    /// Layout with `pages/` and `views/` under the project root
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        Self {
            pages_root: project_root.join("pages"),
            views_dir: project_root.join("views"),
            project_root,
        }
    }

    pub fn with_pages_root(mut self, pages_root: impl Into<PathBuf>) -> Self {
        self.pages_root = pages_root.into();
        self
    }

    pub fn with_views_dir(mut self, views_dir: impl Into<PathBuf>) -> Self {
        self.views_dir = views_dir.into();
        self
    }

    /// Document template a page is constructed with. Declared templates are
    /// relative to the project root unless absolute.
    pub fn document_template(&self, declaration: &PageDeclaration) -> PathBuf {
        match &declaration.render_template {
            Some(template) => self.project_path(template),
            None => match declaration.kind {
                PageKind::Standard => self.views_dir.join(DEFAULT_DOCUMENT),
                PageKind::Manageable => self.views_dir.join(DEFAULT_MANAGE_DOCUMENT),
            },
        }
    }

    fn project_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }
}
