// ABOUTME: Per-request mutable page state handed to page handlers
// ABOUTME: Holds dynamic params, accumulated view variables, metadata, and response status and headers

use http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use http::{HeaderMap, StatusCode};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use super::error::{PageError, Result};
use super::meta::{Meta, MetaProvider};
use super::params::PageParams;

pub struct PageState {
    params: PageParams,
    view_variables: Map<String, JsonValue>,
    meta: Meta,
    meta_provider: Option<Box<dyn MetaProvider>>,
    status: StatusCode,
    headers: HeaderMap,
}

impl PageState {
    pub fn new(params: PageParams) -> Self {
        Self {
            params,
            view_variables: Map::new(),
            meta: Meta::default(),
            meta_provider: None,
            status: StatusCode::OK,
            headers: HeaderMap::new(),
        }
    }

    /// Dynamic parameter supplied at construction
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    pub fn params(&self) -> &PageParams {
        &self.params
    }

    /// Merge variables into the view variables; later values win
    pub fn render_with<I, K>(&mut self, variables: I)
    where
        I: IntoIterator<Item = (K, JsonValue)>,
        K: Into<String>,
    {
        for (key, value) in variables {
            self.view_variables.insert(key.into(), value);
        }
    }

    /// Set a single view variable from any serializable value
    pub fn assign<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value).map_err(PageError::JsonError)?;
        self.view_variables.insert(key.to_string(), value);
        Ok(())
    }

    pub fn view_variables(&self) -> &Map<String, JsonValue> {
        &self.view_variables
    }

    /// Metadata injected into the render context
    pub fn meta(&self) -> Meta {
        match &self.meta_provider {
            Some(provider) => provider.meta(),
            None => self.meta.clone(),
        }
    }

    /// Page-owned metadata for in-place edits.
    ///
    /// A provider set through [`PageState::set_meta_provider`] is snapshotted
    /// into the owned `Meta` first, so edits layer on top of its values.
    pub fn meta_mut(&mut self) -> &mut Meta {
        if let Some(provider) = self.meta_provider.take() {
            self.meta = provider.meta();
        }
        &mut self.meta
    }

    pub fn set_meta_provider(&mut self, provider: Box<dyn MetaProvider>) {
        self.meta_provider = Some(provider);
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    }

    pub fn with_content_type(&mut self, content_type: &'static str) {
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    }

    pub fn insert_header(&mut self, name: &str, value: &str) -> Result<()> {
        let invalid = |reason: String| PageError::InvalidHeader {
            name: name.to_string(),
            reason,
        };
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(e.to_string()))?;
        let header_value = HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
        self.headers.insert(header_name, header_value);
        Ok(())
    }

    pub(crate) fn into_response_parts(self) -> (StatusCode, HeaderMap) {
        (self.status, self.headers)
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(PageParams::default())
    }
}
