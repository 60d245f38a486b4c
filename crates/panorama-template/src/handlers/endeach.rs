/*
 * endeach.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Loop terminator: `<* endeach *>`.

use tracing::warn;

use crate::context::TemplateContext;
use crate::error::{TemplateError, TemplateResult};
use crate::registry::{Handled, KeywordHandler};
use crate::renderer::Renderer;
use crate::scanner::Tag;

/// Handles an `endeach` that no `each` consumed.
///
/// Matched terminators are swallowed by [`super::EachHandler`] during block
/// extraction, so the renderer only dispatches here for a stray one. It
/// renders as nothing unless the renderer is strict.
#[derive(Debug, Clone, Copy, Default)]
pub struct EndeachHandler;

impl EndeachHandler {
    pub fn factory() -> Box<dyn KeywordHandler> {
        Box::new(EndeachHandler)
    }
}

impl KeywordHandler for EndeachHandler {
    fn handle<'t>(
        &self,
        _tag: &Tag<'_>,
        tail: &'t str,
        _context: &TemplateContext<'_>,
        renderer: &Renderer,
    ) -> TemplateResult<Handled<'t>> {
        if renderer.options().strict {
            return Err(TemplateError::StrayEndeach);
        }
        warn!("Ignoring endeach without a matching each");
        Ok(Handled::new(String::new(), tail))
    }
}
