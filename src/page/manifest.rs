// ABOUTME: File-declared pages described by a page.yaml next to their views
// ABOUTME: Parses page manifests and provides a Page implementation that renders their variables and metadata

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::declaration::{PageDeclaration, PageKind};
use super::error::Result;
use super::meta::Meta;
use super::renderer::Page;
use super::state::PageState;
use super::Request;

/// Manifest file name looked up in a page directory.
pub const MANIFEST_FILE: &str = "page.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageManifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,

    #[serde(default = "default_use_template")]
    pub use_template: bool,

    #[serde(default)]
    pub kind: PageKind,

    #[serde(default)]
    pub variables: Map<String, JsonValue>,

    #[serde(default)]
    pub meta: Meta,
}

fn default_use_template() -> bool {
    true
}

impl Default for PageManifest {
    fn default() -> Self {
        Self {
            view: None,
            template: None,
            use_template: true,
            kind: PageKind::Standard,
            variables: Map::new(),
            meta: Meta::default(),
        }
    }
}

impl PageManifest {
    /// Parse a manifest from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load `page.yaml` from a page directory; a directory without one gets
    /// the default manifest
    pub fn load(page_dir: &Path) -> Result<Self> {
        let path = page_dir.join(MANIFEST_FILE);
        if !path.exists() {
            debug!("No manifest in {}, using defaults", page_dir.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        Self::from_yaml(&content)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Declaration for the page living in `page_dir`
    pub fn declaration(&self, page_dir: &Path) -> PageDeclaration {
        PageDeclaration {
            source_dir: page_dir.to_path_buf(),
            render_template: self.template.clone(),
            render_view: self.view.clone(),
            use_template: self.use_template,
            kind: self.kind,
        }
    }
}

/// Page whose handler applies manifest variables and metadata, then any
/// overrides supplied by the caller
pub struct ManifestPage {
    variables: Map<String, JsonValue>,
    meta: Meta,
    overrides: Map<String, JsonValue>,
}

impl ManifestPage {
    pub fn new(manifest: &PageManifest) -> Self {
        Self {
            variables: manifest.variables.clone(),
            meta: manifest.meta.clone(),
            overrides: Map::new(),
        }
    }

    pub fn with_overrides(mut self, overrides: Map<String, JsonValue>) -> Self {
        self.overrides = overrides;
        self
    }
}

impl Page for ManifestPage {
    fn invoke(&mut self, _request: &Request, state: &mut PageState) -> anyhow::Result<()> {
        state.render_with(self.variables.clone());
        *state.meta_mut() = self.meta.clone();
        state.render_with(self.overrides.clone());
        Ok(())
    }
}
