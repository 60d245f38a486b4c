/*
 * renderer.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Template rendering engine.
//!
//! Rendering walks the template from left to right. Text before each tag is
//! copied through, the tag is replaced by whatever its handler produces, and
//! scanning resumes wherever the handler stopped consuming. Loop handlers
//! render their bodies by calling back into [`Renderer::render`] with a
//! child context.

use tracing::{debug, trace};

use crate::context::{TemplateContext, TemplateValue};
use crate::error::TemplateResult;
use crate::registry::HandlerRegistry;
use crate::scanner::find_tag;

/// Options controlling how lenient rendering is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Treat stray `endeach` tags and empty tags as errors instead of
    /// rendering them as nothing.
    pub strict: bool,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable strict mode.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Renders templates using a fixed set of keyword handlers.
///
/// A renderer holds configuration only. It can be reused for any number of
/// renders, including concurrent ones from different threads.
#[derive(Debug, Clone)]
pub struct Renderer {
    registry: HandlerRegistry,
    options: RenderOptions,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Create a renderer with the standard handlers and default options.
    pub fn new() -> Self {
        Self::with_registry(HandlerRegistry::standard())
    }

    /// Create a renderer with a custom handler registry.
    pub fn with_registry(registry: HandlerRegistry) -> Self {
        Self {
            registry,
            options: RenderOptions::default(),
        }
    }

    /// Replace the render options.
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Render a template against root data.
    pub fn render_value(&self, template: &str, data: &TemplateValue) -> TemplateResult<String> {
        debug!(
            bytes = template.len(),
            root = data.kind(),
            strict = self.options.strict,
            "Rendering template"
        );
        self.render(template, &TemplateContext::new(data))
    }

    /// Render a template in the given context.
    ///
    /// # Returns
    /// The complete output, or the first error raised by any tag. Nothing is
    /// returned for a render that fails partway through.
    pub fn render(&self, template: &str, context: &TemplateContext<'_>) -> TemplateResult<String> {
        let mut output = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(tag) = find_tag(rest) {
            let head = &rest[..tag.start];
            let tail = &rest[tag.end..];

            trace!(keyword = %tag.keyword, raw = tag.raw, depth = context.depth(), "Dispatching tag");
            let handler = self.registry.resolve(&tag.keyword)?;
            let handled = handler.handle(&tag, tail, context, self)?;

            output.push_str(head);
            output.push_str(&handled.value);
            rest = handled.remaining;
        }

        output.push_str(rest);
        Ok(output)
    }
}

/// Render a template against root data with the standard handlers.
pub fn render(template: &str, data: &TemplateValue) -> TemplateResult<String> {
    Renderer::new().render_value(template, data)
}
