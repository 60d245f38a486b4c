/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for template rendering.

use thiserror::Error;

/// Errors that can occur while rendering a template.
///
/// Every variant is fatal: the render that raised it produces no output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// A dotted path did not resolve against the context.
    #[error("Undefined variable: {path}")]
    UndefinedVariable { path: String },

    /// A map or list reached a tag that needs scalar text.
    #[error("Cannot render structured value as text: {path}")]
    UnrenderableValue { path: String },

    /// The list expression of an `each` tag is not a list.
    #[error("Value is not iterable: {path}")]
    NotIterable { path: String },

    /// An `each` tag has no matching `endeach`.
    #[error("No matching endeach found for tag: <* {tag} *>")]
    UnmatchedEach { tag: String },

    /// An `each` tag does not have the form `each <list> <name>`.
    #[error("Malformed each tag (expected `each <list> <name>`): <* {tag} *>")]
    MalformedEachTag { tag: String },

    /// An `endeach` with no open `each` (strict mode only).
    #[error("Found endeach without a matching each")]
    StrayEndeach,

    /// A tag with nothing between the delimiters (strict mode only).
    #[error("Empty tag")]
    EmptyTag,

    /// No handler is registered for the keyword and there is no default.
    #[error("No handler registered for keyword: {keyword}")]
    UnknownKeyword { keyword: String },
}

/// Result type for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;
