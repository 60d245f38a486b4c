/*
 * each.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Loop blocks: `<* each items item *>...<* endeach *>`.

use tracing::trace;

use crate::context::{TemplateContext, TemplateValue};
use crate::error::{TemplateError, TemplateResult};
use crate::registry::{EACH, ENDEACH, Handled, KeywordHandler};
use crate::renderer::Renderer;
use crate::scanner::{Tag, find_tag};

/// A loop body split off from the text following its `each` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'t> {
    /// Text between the `each` tag and its matching `endeach`.
    pub body: &'t str,
    /// Text after the matching `endeach`.
    pub remaining: &'t str,
}

/// Split `tail` at the `endeach` matching an already-consumed `each` tag.
///
/// Nested `each`/`endeach` pairs inside the body are skipped by counting
/// open blocks. Tags with other keywords do not affect the count.
pub fn extract_block<'t>(tag: &Tag<'_>, tail: &'t str) -> TemplateResult<Block<'t>> {
    let mut open = 1usize;
    let mut offset = 0;

    while let Some(found) = find_tag(&tail[offset..]) {
        let start = offset + found.start;
        let end = offset + found.end;

        match found.keyword.as_str() {
            EACH => open += 1,
            ENDEACH => {
                open -= 1;
                if open == 0 {
                    return Ok(Block {
                        body: &tail[..start],
                        remaining: &tail[end..],
                    });
                }
            }
            _ => {}
        }

        offset = end;
    }

    Err(TemplateError::UnmatchedEach {
        tag: tag.raw.to_string(),
    })
}

/// Split an `each` tag into its list path and binding name.
fn loop_arguments<'a>(tag: &Tag<'a>) -> TemplateResult<(&'a str, &'a str)> {
    let mut args = tag.args();
    match (args.next(), args.next(), args.next()) {
        (Some(list_path), Some(name), None) => Ok((list_path, name)),
        _ => Err(TemplateError::MalformedEachTag {
            tag: tag.raw.to_string(),
        }),
    }
}

/// Renders its block once per element of a list, binding each element to a
/// name.
///
/// The binding is layered over the context active at the `each` tag, so
/// names from enclosing loops and the root data stay visible inside the
/// body.
#[derive(Debug, Clone, Copy, Default)]
pub struct EachHandler;

impl EachHandler {
    pub fn factory() -> Box<dyn KeywordHandler> {
        Box::new(EachHandler)
    }
}

impl KeywordHandler for EachHandler {
    fn handle<'t>(
        &self,
        tag: &Tag<'_>,
        tail: &'t str,
        context: &TemplateContext<'_>,
        renderer: &Renderer,
    ) -> TemplateResult<Handled<'t>> {
        let (list_path, name) = loop_arguments(tag)?;
        let block = extract_block(tag, tail)?;

        let items = match context.resolve(list_path)? {
            TemplateValue::List(items) => items,
            other => {
                trace!(path = list_path, kind = other.kind(), "Each list path is not a list");
                return Err(TemplateError::NotIterable {
                    path: list_path.to_string(),
                });
            }
        };

        trace!(
            path = list_path,
            binding = name,
            count = items.len(),
            depth = context.depth(),
            "Expanding each block"
        );

        let mut value = String::new();
        for item in items {
            let scope = context.bind(name, item);
            value.push_str(&renderer.render(block.body, &scope)?);
        }

        Ok(Handled::new(value, block.remaining))
    }
}
