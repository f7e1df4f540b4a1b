// ABOUTME: View module for locating page view templates
// ABOUTME: Exports the view locator and its resolution outcome types

pub mod locator;

pub use locator::{ResolvedView, ViewLocator, ViewOrigin, DEFAULT_MANAGE_VIEW, DEFAULT_VIEW};
