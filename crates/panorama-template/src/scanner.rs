/*
 * scanner.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Tag scanner.
//!
//! Finds the leftmost `<* ... *>` tag in a string. The scanner never looks
//! past the first tag: callers scan the text after [`Tag::end`] to find the
//! next one.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<\*\s*(.*?)\s*\*>").unwrap());

/// A tag found by [`find_tag`].
///
/// Offsets are byte offsets into the string that was scanned, not into the
/// original template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag<'a> {
    /// Offset of the opening `<*`.
    pub start: usize,
    /// Offset just past the closing `*>`.
    pub end: usize,
    /// Interior text with the delimiters and surrounding whitespace removed.
    pub raw: &'a str,
    /// First whitespace-separated token of `raw`, lowercased.
    pub keyword: String,
}

impl<'a> Tag<'a> {
    /// The whitespace-separated tokens following the keyword.
    pub fn args(&self) -> impl Iterator<Item = &'a str> {
        self.raw.split_whitespace().skip(1)
    }
}

/// Find the leftmost tag in `text`, if any.
pub fn find_tag(text: &str) -> Option<Tag<'_>> {
    let captures = TAG_PATTERN.captures(text)?;
    let whole = captures.get(0)?;
    let raw = captures.get(1).map_or("", |m| m.as_str()).trim();

    Some(Tag {
        start: whole.start(),
        end: whole.end(),
        raw,
        keyword: keyword_of(raw),
    })
}

fn keyword_of(raw: &str) -> String {
    raw.split_whitespace()
        .next()
        .map(str::to_lowercase)
        .unwrap_or_default()
}
