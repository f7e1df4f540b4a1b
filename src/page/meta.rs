// ABOUTME: Page metadata injected into every render context
// ABOUTME: Provides the Meta value type and the MetaProvider interface pages compose

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Document-level metadata: title, description and `<meta>` tags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub robots: Option<String>,

    /// Additional `<meta name=... content=...>` pairs
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

impl Meta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = Some(description.into());
        self
    }

    pub fn add_keyword(&mut self, keyword: impl Into<String>) -> &mut Self {
        self.keywords.push(keyword.into());
        self
    }

    pub fn set_canonical(&mut self, url: impl Into<String>) -> &mut Self {
        self.canonical = Some(url.into());
        self
    }

    pub fn set_robots(&mut self, robots: impl Into<String>) -> &mut Self {
        self.robots = Some(robots.into());
        self
    }

    pub fn set_tag(&mut self, name: impl Into<String>, content: impl Into<String>) -> &mut Self {
        self.tags.insert(name.into(), content.into());
        self
    }
}

/// Source of a page's metadata
pub trait MetaProvider {
    fn meta(&self) -> Meta;
}

impl MetaProvider for Meta {
    fn meta(&self) -> Meta {
        self.clone()
    }
}
