// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides shared functionality for laying out project trees with pages, views, and documents

#![allow(dead_code)]

use bytes::Bytes;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use pageframe::page::{FrameworkPaths, PageRenderer, Request};

pub const DOCUMENT: &str = "<html><head><title>{{meta.title}}</title></head><body>{{> view}}</body></html>";

pub const MANAGE_DOCUMENT: &str = "<html><body class=\"manage\">{{> view}}</body></html>";

/// A temporary project root with `pages/` and `views/`
pub struct TestProject {
    pub temp_dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let project = Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        };
        fs::create_dir_all(project.pages_root()).unwrap();
        fs::create_dir_all(project.views_dir()).unwrap();
        project
    }

    /// Project with the default standard and manageable documents in place
    pub fn with_documents() -> Self {
        let project = Self::new();
        project.write("views/html.twig", DOCUMENT);
        project.write("views/manage-html.twig", MANAGE_DOCUMENT);
        project
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn pages_root(&self) -> PathBuf {
        self.root().join("pages")
    }

    pub fn views_dir(&self) -> PathBuf {
        self.root().join("views")
    }

    pub fn page_dir(&self, name: &str) -> PathBuf {
        let dir = self.pages_root().join(name);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Write a file relative to the project root, creating parents
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    pub fn paths(&self) -> FrameworkPaths {
        FrameworkPaths::new(self.root())
    }

    pub fn renderer(&self) -> PageRenderer {
        PageRenderer::new(self.paths())
    }

    pub fn config_file(&self) -> PathBuf {
        let path = self.root().join("pageframe.yaml");
        fs::write(
            &path,
            format!("project_root: {}\nlogging:\n  level: warn\n", self.root().display()),
        )
        .unwrap();
        path
    }
}

pub fn request(uri: &str) -> Request {
    http::Request::builder()
        .uri(uri)
        .body(Bytes::new())
        .expect("Failed to build request")
}
