// ABOUTME: Render context assembly for page templates
// ABOUTME: Merges accumulated view variables with page metadata into the JSON handed to handlebars

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use super::error::{Result, TemplateError};
use crate::page::Meta;

/// Key the page metadata is always injected under.
pub const META_KEY: &str = "meta";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderContext {
    variables: Map<String, JsonValue>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the context for a page render. `meta` is inserted after the view
    /// variables, so a view variable named `meta` never shadows it.
    pub fn for_page(view_variables: &Map<String, JsonValue>, meta: &Meta) -> Result<Self> {
        let mut context = Self {
            variables: view_variables.clone(),
        };
        context.set(META_KEY, meta)?;
        Ok(context)
    }

    /// Add or update a variable
    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value).map_err(TemplateError::JsonError)?;
        self.variables.insert(key.to_string(), value);
        Ok(())
    }

    /// Get a variable value
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.variables.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Convert context to JSON for handlebars rendering
    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(self.variables.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_meta_is_injected() {
        let mut meta = Meta::default();
        meta.set_title("Home");

        let context = RenderContext::for_page(&Map::new(), &meta).unwrap();

        assert_eq!(context.len(), 1);
        assert_eq!(context.get(META_KEY).unwrap()["title"], "Home");
    }

    #[test]
    fn test_meta_wins_over_view_variable() {
        let mut variables = Map::new();
        variables.insert("meta".to_string(), json!("shadowed"));
        variables.insert("title".to_string(), json!("A"));

        let mut meta = Meta::default();
        meta.set_description("about");

        let context = RenderContext::for_page(&variables, &meta).unwrap();

        assert_eq!(context.get("title"), Some(&json!("A")));
        assert_eq!(context.get(META_KEY).unwrap()["description"], "about");
        assert_eq!(
            context.get(META_KEY),
            Some(&serde_json::to_value(&meta).unwrap())
        );
    }

    #[test]
    fn test_context_json_conversion() {
        let mut context = RenderContext::new();
        context.set("count", &3).unwrap();
        let json = context.to_json();

        assert!(json.is_object());
        assert_eq!(json["count"], 3);
    }
}
