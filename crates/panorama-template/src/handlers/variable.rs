/*
 * variable.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Variable interpolation: `<* user.name *>`.

use tracing::warn;

use crate::context::TemplateContext;
use crate::error::{TemplateError, TemplateResult};
use crate::registry::{Handled, KeywordHandler};
use crate::renderer::Renderer;
use crate::scanner::Tag;

/// Replaces a tag with the text of the value at its dotted path.
///
/// This is the default handler, so it sees every tag whose keyword has no
/// handler of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct VariableHandler;

impl VariableHandler {
    pub fn factory() -> Box<dyn KeywordHandler> {
        Box::new(VariableHandler)
    }
}

impl KeywordHandler for VariableHandler {
    fn handle<'t>(
        &self,
        tag: &Tag<'_>,
        tail: &'t str,
        context: &TemplateContext<'_>,
        renderer: &Renderer,
    ) -> TemplateResult<Handled<'t>> {
        if tag.raw.is_empty() {
            if renderer.options().strict {
                return Err(TemplateError::EmptyTag);
            }
            warn!("Empty tag renders as empty text");
            return Ok(Handled::new(String::new(), tail));
        }

        let value = context.resolve(tag.raw)?;
        let text = value
            .render()
            .ok_or_else(|| TemplateError::UnrenderableValue {
                path: tag.raw.to_string(),
            })?;

        Ok(Handled::new(text, tail))
    }
}
