// ABOUTME: Integration tests for the page rendering pipeline
// ABOUTME: Tests handler invocation, context merging, document wrapping, and not-found degradation

use http::StatusCode;
use serde_json::json;

use pageframe::page::{
    FnPage, ManifestPage, Meta, MetaProvider, Page, PageDeclaration, PageError, PageManifest,
    PageParams, PageRegistry, PageState, Request,
};
use pageframe::template::TemplateError;

mod common;
use common::{request, TestProject};

/// Blog post page reading its slug from dynamic params
struct PostPage;

impl Page for PostPage {
    fn invoke(&mut self, _request: &Request, state: &mut PageState) -> anyhow::Result<()> {
        let slug = state
            .param("slug")
            .ok_or_else(|| anyhow::anyhow!("missing slug"))?
            .to_string();
        state.assign("slug", &slug)?;
        state.meta_mut().set_title(format!("Post {}", slug));
        Ok(())
    }
}

struct SiteMeta;

impl MetaProvider for SiteMeta {
    fn meta(&self) -> Meta {
        let mut meta = Meta::new();
        meta.set_title("Example Site").set_description("Shared");
        meta
    }
}

#[test]
fn test_render_wrapped_page() {
    let project = TestProject::with_documents();
    let page_dir = project.page_dir("post");
    project.write("pages/post/view.twig", "<article>{{slug}}</article>");

    let params: PageParams = [("slug", "hello")].into_iter().collect();
    let rendered = project
        .renderer()
        .construct(PageDeclaration::new(&page_dir), PostPage, params)
        .render(&request("/post/hello"))
        .unwrap();

    assert_eq!(
        rendered.text(),
        "<html><head><title>Post hello</title></head><body><article>hello</article></body></html>"
    );
    assert_eq!(rendered.status(), StatusCode::OK);
    assert_eq!(rendered.content_type(), Some("text/html"));
}

#[test]
fn test_render_without_document() {
    let project = TestProject::with_documents();
    let page_dir = project.page_dir("fragment");
    project.write("pages/fragment/view.twig", "<li>{{item}}</li>");

    let page = FnPage::new(|_: &Request, state: &mut PageState| {
        state.render_with([("item", json!("one"))]);
        Ok(())
    });

    let rendered = project
        .renderer()
        .construct(PageDeclaration::new(&page_dir).without_template(), page, PageParams::new())
        .render(&request("/fragment"))
        .unwrap();

    assert_eq!(rendered.text(), "<li>one</li>");
}

#[test]
fn test_last_write_wins_in_context() {
    let project = TestProject::with_documents();
    let page_dir = project.page_dir("titles");
    project.write("pages/titles/view.twig", "{{title}}|{{subtitle}}");

    let mut instance = project.renderer().construct(
        PageDeclaration::new(&page_dir).without_template(),
        FnPage::new(|_: &Request, state: &mut PageState| {
            state.render_with([("title", json!("B")), ("subtitle", json!("C"))]);
            Ok(())
        }),
        PageParams::new(),
    );
    instance.state_mut().render_with([("title", json!("A"))]);

    let rendered = instance.render(&request("/titles")).unwrap();

    assert_eq!(rendered.text(), "B|C");
}

#[test]
fn test_meta_not_overwritten_by_view_variable() {
    let project = TestProject::with_documents();
    let page_dir = project.page_dir("meta");
    project.write("pages/meta/view.twig", "{{meta.title}}");

    let page = FnPage::new(|_: &Request, state: &mut PageState| {
        state.render_with([("meta", json!({"title": "spoofed"}))]);
        state.meta_mut().set_title("Real");
        Ok(())
    });

    let rendered = project
        .renderer()
        .construct(PageDeclaration::new(&page_dir).without_template(), page, PageParams::new())
        .render(&request("/meta"))
        .unwrap();

    assert_eq!(rendered.text(), "Real");
}

#[test]
fn test_meta_provider_feeds_document() {
    let project = TestProject::with_documents();
    let page_dir = project.page_dir("home");
    project.write("pages/home/view.twig", "{{meta.description}}");

    let page = FnPage::new(|_: &Request, state: &mut PageState| {
        state.set_meta_provider(Box::new(SiteMeta));
        Ok(())
    });

    let rendered = project
        .renderer()
        .construct(PageDeclaration::new(&page_dir), page, PageParams::new())
        .render(&request("/"))
        .unwrap();

    assert_eq!(
        rendered.text(),
        "<html><head><title>Example Site</title></head><body>Shared</body></html>"
    );
}

#[test]
fn test_handler_meta_edits_after_provider() {
    let project = TestProject::with_documents();
    let page_dir = project.page_dir("home");
    project.write("pages/home/view.twig", "{{meta.description}}");

    let page = FnPage::new(|_: &Request, state: &mut PageState| {
        state.set_meta_provider(Box::new(SiteMeta));
        state.meta_mut().set_title("Handler title");
        Ok(())
    });

    let rendered = project
        .renderer()
        .construct(PageDeclaration::new(&page_dir), page, PageParams::new())
        .render(&request("/"))
        .unwrap();

    assert_eq!(
        rendered.text(),
        "<html><head><title>Handler title</title></head><body>Shared</body></html>"
    );
}

#[test]
fn test_declared_view_not_found_renders_empty_body() {
    let project = TestProject::with_documents();
    let page_dir = project.page_dir("ghost");

    let rendered = project
        .renderer()
        .construct(
            PageDeclaration::new(&page_dir).with_view("ghost.twig"),
            FnPage::new(|_: &Request, _: &mut PageState| Ok(())),
            PageParams::new(),
        )
        .render(&request("/ghost"))
        .unwrap();

    assert!(rendered.is_empty());
    assert_eq!(rendered.content_type(), Some("text/html"));
    assert_eq!(rendered.view(), None);
}

#[test]
fn test_missing_default_view_is_a_template_error() {
    let project = TestProject::with_documents();
    let page_dir = project.page_dir("empty");

    let result = project
        .renderer()
        .construct(
            PageDeclaration::new(&page_dir),
            FnPage::new(|_: &Request, _: &mut PageState| Ok(())),
            PageParams::new(),
        )
        .render(&request("/empty"));

    assert!(matches!(
        result,
        Err(PageError::TemplateError(TemplateError::ViewNotFound { .. }))
    ));
}

#[test]
fn test_manageable_page_uses_manage_document_and_form() {
    let project = TestProject::with_documents();
    let page_dir = project.page_dir("admin/users");
    project.write("pages/admin/users/manage-form.twig", "<form>{{count}}</form>");

    let page = FnPage::new(|_: &Request, state: &mut PageState| {
        state.assign("count", &3)?;
        Ok(())
    });

    let rendered = project
        .renderer()
        .construct(PageDeclaration::new(&page_dir).manageable(), page, PageParams::new())
        .render(&request("/admin/users"))
        .unwrap();

    assert_eq!(
        rendered.text(),
        "<html><body class=\"manage\"><form>3</form></body></html>"
    );
    assert_eq!(rendered.view(), Some(page_dir.join("manage-form.twig").as_path()));
}

#[test]
fn test_declared_document_template() {
    let project = TestProject::with_documents();
    let page_dir = project.page_dir("print");
    project.write("layouts/print.twig", "[{{> view}}]");
    project.write("pages/print/view.twig", "body");

    let rendered = project
        .renderer()
        .construct(
            PageDeclaration::new(&page_dir).with_template("layouts/print.twig"),
            FnPage::new(|_: &Request, _: &mut PageState| Ok(())),
            PageParams::new(),
        )
        .render(&request("/print"))
        .unwrap();

    assert_eq!(rendered.text(), "[body]");
}

#[test]
fn test_missing_document_template_fails_construction() {
    let project = TestProject::new();
    let page_dir = project.page_dir("home");

    let result = project.renderer().try_construct(
        PageDeclaration::new(&page_dir),
        FnPage::new(|_: &Request, _: &mut PageState| Ok(())),
        PageParams::new(),
    );

    assert!(matches!(result, Err(TemplateError::DocumentNotFound { .. })));
}

#[test]
fn test_handler_sets_status_and_headers() {
    let project = TestProject::with_documents();
    let page_dir = project.page_dir("gone");
    project.write("pages/gone/view.twig", "gone");

    let page = FnPage::new(|request: &Request, state: &mut PageState| {
        assert_eq!(request.uri().path(), "/gone");
        state.set_status(StatusCode::GONE);
        state.insert_header("cache-control", "no-store")?;
        Ok(())
    });

    let response = project
        .renderer()
        .construct(PageDeclaration::new(&page_dir).without_template(), page, PageParams::new())
        .render(&request("/gone"))
        .unwrap()
        .into_response();

    assert_eq!(response.status(), StatusCode::GONE);
    assert_eq!(response.headers()["cache-control"], "no-store");
    assert_eq!(response.body().as_ref(), b"gone");
}

#[test]
fn test_handler_failure_is_not_rendered() {
    let project = TestProject::with_documents();
    let page_dir = project.page_dir("post");
    project.write("pages/post/view.twig", "{{slug}}");

    let result = project
        .renderer()
        .construct(PageDeclaration::new(&page_dir), PostPage, PageParams::new())
        .render(&request("/post"));

    match result {
        Err(PageError::Handler(e)) => assert_eq!(e.to_string(), "missing slug"),
        other => panic!("expected handler error, got {:?}", other.map(|p| p.status())),
    }
}

#[test]
fn test_registry_renders_fresh_instances() {
    let project = TestProject::with_documents();
    let page_dir = project.page_dir("post");
    project.write("pages/post/view.twig", "{{slug}}");

    let mut registry = PageRegistry::new(project.renderer());
    registry
        .register(
            "post",
            PageDeclaration::new(&page_dir).without_template(),
            || PostPage,
        )
        .unwrap();

    for slug in ["one", "two"] {
        let params: PageParams = [("slug", slug)].into_iter().collect();
        let rendered = registry.render("post", params, &request("/post")).unwrap();
        assert_eq!(rendered.text(), slug);
    }
}

#[test]
fn test_manifest_page() {
    let project = TestProject::with_documents();
    let page_dir = project.page_dir("docs");
    project.write(
        "pages/docs/page.yaml",
        "view: /templates/docs.twig\nvariables:\n  heading: Docs\nmeta:\n  title: Documentation\n",
    );
    project.write("templates/docs.twig", "<h1>{{heading}}</h1>");

    let manifest = PageManifest::load(&page_dir).unwrap();
    let rendered = project
        .renderer()
        .construct(
            manifest.declaration(&page_dir),
            ManifestPage::new(&manifest),
            PageParams::new(),
        )
        .render(&request("/docs"))
        .unwrap();

    assert_eq!(
        rendered.text(),
        "<html><head><title>Documentation</title></head><body><h1>Docs</h1></body></html>"
    );
    assert_eq!(
        rendered.view(),
        Some(project.root().join("templates/docs.twig").as_path())
    );
}
