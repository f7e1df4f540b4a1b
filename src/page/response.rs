// ABOUTME: Rendered page output
// ABOUTME: Carries status, headers and body bytes, and converts into an http::Response

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, Response, StatusCode};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct RenderedPage {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
    view: Option<PathBuf>,
}

impl RenderedPage {
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes, view: Option<PathBuf>) -> Self {
        Self {
            status,
            headers,
            body,
            view,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Body as text; rendered templates are always UTF-8
    pub fn text(&self) -> &str {
        std::str::from_utf8(&self.body).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// View file the body was rendered from, `None` when no view was found
    pub fn view(&self) -> Option<&Path> {
        self.view.as_deref()
    }

    pub fn into_body(self) -> Bytes {
        self.body
    }

    pub fn into_response(self) -> Response<Bytes> {
        let mut response = Response::new(self.body);
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

impl From<RenderedPage> for Response<Bytes> {
    fn from(page: RenderedPage) -> Self {
        page.into_response()
    }
}
