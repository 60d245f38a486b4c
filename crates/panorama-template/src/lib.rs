/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Tag-based text template engine for Panorama.
//!
//! Templates are plain text with embedded `<* ... *>` tags:
//!
//! - Variable interpolation: `<* name *>`
//! - Nested field access: `<* employee.salary *>`, `<* items.0 *>`
//! - Loops: `<* each items item *>...<* endeach *>`
//!
//! There are no conditionals and no expressions. New keywords are added by
//! registering a [`KeywordHandler`] with a [`HandlerRegistry`].
//!
//! # Architecture
//!
//! Templates are not compiled. The [`Renderer`] scans for the next tag with
//! [`find_tag`], dispatches it to the handler registered for its keyword, and
//! continues with whatever text the handler did not consume. The `each`
//! handler renders its body once per list element through the same renderer,
//! each time with a [`TemplateContext`] that binds the element on top of the
//! enclosing context.
//!
//! # Example
//!
//! ```
//! use panorama_template::{TemplateValue, render};
//! use serde_json::json;
//!
//! let data = TemplateValue::from(json!({"items": ["a", "b", "c"]}));
//! let output = render("<* each items x *><* x *>,<* endeach *>", &data)?;
//! assert_eq!(output, "a,b,c,");
//! # Ok::<(), panorama_template::TemplateError>(())
//! ```

pub mod context;
pub mod error;
pub mod handlers;
pub mod registry;
pub mod renderer;
pub mod scanner;

// Re-export main types at crate root
pub use context::{TemplateContext, TemplateValue};
pub use error::{TemplateError, TemplateResult};
pub use handlers::{EachHandler, EndeachHandler, VariableHandler};
pub use registry::{
    DEFAULT_KEYWORD, EACH, ENDEACH, Handled, HandlerFactory, HandlerRegistry, KeywordHandler,
};
pub use renderer::{RenderOptions, Renderer, render};
pub use scanner::{Tag, find_tag};
