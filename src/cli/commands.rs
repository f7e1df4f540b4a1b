// ABOUTME: Command implementations for the pageframe CLI
// ABOUTME: Handles execution of render, resolve, and init commands against a pages tree

use anyhow::{Context, Result};
use bytes::Bytes;
use serde_json::{Map, Value as JsonValue};
use std::path::{Path, PathBuf};
use tracing::info;

use super::args::Args;
use super::config::Config;
use crate::page::{
    FrameworkPaths, ManifestPage, PageKind, PageManifest, PageParams, PageRenderer, Request,
    MANIFEST_FILE,
};
use crate::view::{ResolvedView, ViewLocator};

/// Options for the render command
pub struct RenderOptions {
    pub page: PathBuf,
    pub view: Option<PathBuf>,
    pub template: Option<PathBuf>,
    pub no_template: bool,
    pub manageable: bool,
    pub params: Vec<String>,
    pub vars: Vec<String>,
    pub path: Option<String>,
    pub output: Option<PathBuf>,
}

/// Render a page directory
pub fn render_page(options: RenderOptions, config: &Config) -> Result<()> {
    let paths = config.framework_paths()?;
    let page_dir = locate_page_dir(&options.page, &paths);
    info!("Rendering page: {}", page_dir.display());

    let mut manifest = PageManifest::load(&page_dir)
        .with_context(|| format!("Failed to load manifest for {}", page_dir.display()))?;
    apply_overrides(
        &mut manifest,
        options.view,
        options.template,
        options.no_template,
        options.manageable,
    );

    for (key, value) in &config.template_vars {
        manifest
            .variables
            .entry(key.clone())
            .or_insert_with(|| JsonValue::String(value.clone()));
    }

    let params: PageParams = Args::parse_variables(&options.params)?.into();
    let overrides: Map<String, JsonValue> = Args::parse_variables(&options.vars)?
        .into_iter()
        .map(|(key, value)| (key, JsonValue::String(value)))
        .collect();
    info!("Parsed {} params and {} view variables", params.len(), overrides.len());

    let request = build_request(options.path.as_deref(), &options.page)?;
    let renderer = PageRenderer::new(paths);
    let page = ManifestPage::new(&manifest).with_overrides(overrides);

    let rendered = renderer
        .construct(manifest.declaration(&page_dir), page, params)
        .render(&request)?;

    match options.output {
        Some(output_path) => {
            std::fs::write(&output_path, rendered.body()).with_context(|| {
                format!("Failed to write output file '{}'", output_path.display())
            })?;
            info!("Page written to: {}", output_path.display());
        }
        None => {
            print!("{}", rendered.text());
        }
    }

    Ok(())
}

/// Print the view a page would render
pub fn resolve_view(
    page: PathBuf,
    view: Option<PathBuf>,
    manageable: bool,
    config: &Config,
) -> Result<()> {
    let paths = config.framework_paths()?;
    let page_dir = locate_page_dir(&page, &paths);

    let mut manifest = PageManifest::load(&page_dir)?;
    apply_overrides(&mut manifest, view, None, false, manageable);

    let locator = ViewLocator::from_paths(&paths);
    match locator.resolve(&page_dir, manifest.view.as_deref(), manifest.kind) {
        ResolvedView::Found { path, origin } => {
            println!("{} ({})", path.display(), origin);
            Ok(())
        }
        ResolvedView::NotFound { declared } => Err(anyhow::anyhow!(
            "No view file found for {} in {}",
            declared.display(),
            page_dir.display()
        )),
    }
}

/// Scaffold a new page directory
pub fn init_page(name: String, manageable: bool, config: &Config) -> Result<()> {
    let paths = config.framework_paths()?;
    let page_dir = paths.pages_root.join(&name);
    info!("Initializing page '{}' in {}", name, page_dir.display());

    let manifest_path = page_dir.join(MANIFEST_FILE);
    if manifest_path.exists() {
        return Err(anyhow::anyhow!(
            "Page manifest already exists: {}",
            manifest_path.display()
        ));
    }

    std::fs::create_dir_all(&page_dir)?;

    let mut manifest = PageManifest::default();
    if manageable {
        manifest.kind = PageKind::Manageable;
    }
    manifest.meta.set_title(name.clone());
    manifest
        .variables
        .insert("heading".to_string(), JsonValue::String(name.clone()));
    std::fs::write(&manifest_path, manifest.to_yaml()?)?;

    let view_path = ViewLocator::default_view(&page_dir, manifest.kind);
    if !view_path.exists() {
        std::fs::write(&view_path, generate_view_template(manifest.kind))?;
    }

    info!("Created page manifest: {}", manifest_path.display());
    info!("Created view: {}", view_path.display());

    Ok(())
}

/// A page argument naming an existing directory is used as-is; anything else
/// is looked up under the pages root
fn locate_page_dir(page: &Path, paths: &FrameworkPaths) -> PathBuf {
    if page.is_dir() {
        page.to_path_buf()
    } else {
        paths.pages_root.join(page)
    }
}

fn apply_overrides(
    manifest: &mut PageManifest,
    view: Option<PathBuf>,
    template: Option<PathBuf>,
    no_template: bool,
    manageable: bool,
) {
    if view.is_some() {
        manifest.view = view;
    }
    if template.is_some() {
        manifest.template = template;
    }
    if no_template {
        manifest.use_template = false;
    }
    if manageable {
        manifest.kind = PageKind::Manageable;
    }
}

fn build_request(path: Option<&str>, page: &Path) -> Result<Request> {
    let uri = match path {
        Some(path) => path.to_string(),
        None => format!(
            "/{}",
            urlencoding::encode(&page.file_name().unwrap_or_default().to_string_lossy())
        ),
    };

    http::Request::builder()
        .method(http::Method::GET)
        .uri(&uri)
        .body(Bytes::new())
        .with_context(|| format!("Invalid request path '{}'", uri))
}

/// Generate the starter view for a new page
fn generate_view_template(kind: PageKind) -> String {
    match kind {
        PageKind::Standard => r#"<section>
  <h1>{{heading}}</h1>
  {{#if meta.description}}<p>{{meta.description}}</p>{{/if}}
</section>
"#
        .to_string(),
        PageKind::Manageable => r#"<form method="post">
  <h1>{{heading}}</h1>
  <button type="submit">Save</button>
</form>
"#
        .to_string(),
    }
}
