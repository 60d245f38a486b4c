/*
 * registry.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Keyword handler dispatch.
//!
//! Every tag is handed to a [`KeywordHandler`] chosen by the tag's keyword.
//! The [`HandlerRegistry`] maps keywords to handler factories and falls back
//! to the [`DEFAULT_KEYWORD`] entry for keywords it does not know, which is
//! how bare variable references like `<* user.name *>` are dispatched.

use std::collections::HashMap;

use crate::context::TemplateContext;
use crate::error::{TemplateError, TemplateResult};
use crate::handlers::{EachHandler, EndeachHandler, VariableHandler};
use crate::renderer::Renderer;
use crate::scanner::Tag;

/// Keyword that opens a loop block.
pub const EACH: &str = "each";

/// Keyword that closes a loop block.
pub const ENDEACH: &str = "endeach";

/// Registry key used for every keyword without its own handler.
pub const DEFAULT_KEYWORD: &str = "default";

/// Output of a handler: the text it produced and the template text it left
/// unconsumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handled<'t> {
    pub value: String,
    pub remaining: &'t str,
}

impl<'t> Handled<'t> {
    pub fn new(value: impl Into<String>, remaining: &'t str) -> Self {
        Self {
            value: value.into(),
            remaining,
        }
    }
}

/// Trait for the handler of one tag keyword.
///
/// Handlers receive the tag, the template text following it, the active
/// context, and the renderer driving the current render. Handlers that
/// contain nested template text (like `each`) render it through `renderer`.
pub trait KeywordHandler {
    fn handle<'t>(
        &self,
        tag: &Tag<'_>,
        tail: &'t str,
        context: &TemplateContext<'_>,
        renderer: &Renderer,
    ) -> TemplateResult<Handled<'t>>;
}

/// Constructor for a fresh handler instance.
pub type HandlerFactory = fn() -> Box<dyn KeywordHandler>;

/// Maps tag keywords to handler factories.
#[derive(Debug, Clone, Default)]
pub struct HandlerRegistry {
    factories: HashMap<String, HandlerFactory>,
}

impl HandlerRegistry {
    /// Create a registry with no handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the standard registry: `each`, `endeach`, and variables as the
    /// default.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry
            .register(EACH, EachHandler::factory)
            .register(ENDEACH, EndeachHandler::factory)
            .register(DEFAULT_KEYWORD, VariableHandler::factory);
        registry
    }

    /// Register a handler factory for a keyword.
    ///
    /// Keywords are matched case-insensitively. Registering a keyword twice
    /// replaces the earlier factory.
    pub fn register(&mut self, keyword: &str, factory: HandlerFactory) -> &mut Self {
        self.factories.insert(keyword.to_lowercase(), factory);
        self
    }

    /// Whether a handler is registered for exactly this keyword.
    pub fn contains(&self, keyword: &str) -> bool {
        self.factories.contains_key(keyword)
    }

    /// Build the handler for a keyword, falling back to the default handler.
    pub fn resolve(&self, keyword: &str) -> TemplateResult<Box<dyn KeywordHandler>> {
        self.factories
            .get(keyword)
            .or_else(|| self.factories.get(DEFAULT_KEYWORD))
            .map(|factory| factory())
            .ok_or_else(|| TemplateError::UnknownKeyword {
                keyword: keyword.to_string(),
            })
    }
}
