/*
 * context.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Template value and context types.
//!
//! [`TemplateValue`] is the data tree a template is rendered against,
//! usually converted from a parsed JSON document. [`TemplateContext`] is the
//! scope chain used to resolve dotted paths: a root value plus one overlay
//! per enclosing `each` iteration.

use std::collections::HashMap;
use std::fmt;

use serde_json::Number;

use crate::error::{TemplateError, TemplateResult};

/// A value that can be used in template evaluation.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TemplateValue {
    /// A string value.
    String(String),

    /// A number, kept in its JSON form.
    Number(Number),

    /// A boolean value.
    Bool(bool),

    /// A list of values.
    List(Vec<TemplateValue>),

    /// A map of string keys to values.
    Map(HashMap<String, TemplateValue>),

    /// A null value.
    #[default]
    Null,
}

impl TemplateValue {
    /// Look up a single path segment on this value.
    ///
    /// Maps are indexed by key and lists by a decimal position. Scalars have
    /// no fields.
    pub fn field(&self, segment: &str) -> Option<&TemplateValue> {
        match self {
            TemplateValue::Map(m) => m.get(segment),
            TemplateValue::List(items) => segment
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get(index)),
            _ => None,
        }
    }

    /// Get a nested field by path.
    ///
    /// For example, `get_path(&["employee", "salary"])` on a Map containing
    /// `{"employee": {"salary": 50000}}` returns the salary value.
    pub fn get_path(&self, path: &[&str]) -> Option<&TemplateValue> {
        match path.split_first() {
            None => Some(self),
            Some((first, rest)) => self.field(first).and_then(|v| v.get_path(rest)),
        }
    }

    /// Render this value as text for output.
    ///
    /// Returns `None` for maps and lists, which have no textual form.
    ///
    /// - String: returned as-is
    /// - Number: its JSON text (`3`, `1.5`)
    /// - Bool: `true` or `false`
    /// - Null: empty
    pub fn render(&self) -> Option<String> {
        match self {
            TemplateValue::String(s) => Some(s.clone()),
            TemplateValue::Number(n) => Some(n.to_string()),
            TemplateValue::Bool(b) => Some(b.to_string()),
            TemplateValue::Null => Some(String::new()),
            TemplateValue::List(_) | TemplateValue::Map(_) => None,
        }
    }

    /// A short name for the kind of value, used in log output.
    pub fn kind(&self) -> &'static str {
        match self {
            TemplateValue::String(_) => "string",
            TemplateValue::Number(_) => "number",
            TemplateValue::Bool(_) => "bool",
            TemplateValue::List(_) => "list",
            TemplateValue::Map(_) => "map",
            TemplateValue::Null => "null",
        }
    }
}

impl From<serde_json::Value> for TemplateValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => TemplateValue::Null,
            serde_json::Value::Bool(b) => TemplateValue::Bool(b),
            serde_json::Value::Number(n) => TemplateValue::Number(n),
            serde_json::Value::String(s) => TemplateValue::String(s),
            serde_json::Value::Array(items) => {
                TemplateValue::List(items.into_iter().map(TemplateValue::from).collect())
            }
            serde_json::Value::Object(map) => TemplateValue::Map(
                map.into_iter()
                    .map(|(k, v)| (k, TemplateValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for TemplateValue {
    fn from(value: &str) -> Self {
        TemplateValue::String(value.to_string())
    }
}

impl From<String> for TemplateValue {
    fn from(value: String) -> Self {
        TemplateValue::String(value)
    }
}

impl From<bool> for TemplateValue {
    fn from(value: bool) -> Self {
        TemplateValue::Bool(value)
    }
}

impl From<i64> for TemplateValue {
    fn from(value: i64) -> Self {
        TemplateValue::Number(value.into())
    }
}

impl<T: Into<TemplateValue>> From<Vec<T>> for TemplateValue {
    fn from(items: Vec<T>) -> Self {
        TemplateValue::List(items.into_iter().map(Into::into).collect())
    }
}

/// The bindings visible at one level of the scope chain.
#[derive(Debug, Clone, Copy)]
enum Scope<'a> {
    /// Root data for the whole render.
    Root(&'a TemplateValue),
    /// A single name bound by an `each` iteration.
    Binding {
        name: &'a str,
        value: &'a TemplateValue,
    },
}

/// A context for template evaluation containing variable bindings.
///
/// Contexts are never modified after creation. Entering a loop iteration
/// builds a child with [`TemplateContext::bind`], which borrows its parent,
/// so the parent stays valid for the remaining iterations and for sibling
/// blocks.
#[derive(Debug, Clone, Copy)]
pub struct TemplateContext<'a> {
    scope: Scope<'a>,
    parent: Option<&'a TemplateContext<'a>>,
}

impl<'a> TemplateContext<'a> {
    /// Create a root context over the given data.
    ///
    /// Top-level names are the keys of `root` when it is a map. Any other
    /// root value makes every lookup fail.
    pub fn new(root: &'a TemplateValue) -> Self {
        Self {
            scope: Scope::Root(root),
            parent: None,
        }
    }

    /// Create a child context binding `name` to `value`.
    ///
    /// The child shadows `name` and inherits every other binding.
    pub fn bind(&'a self, name: &'a str, value: &'a TemplateValue) -> TemplateContext<'a> {
        TemplateContext {
            scope: Scope::Binding { name, value },
            parent: Some(self),
        }
    }

    /// Get a top-level variable, checking the innermost scope first.
    pub fn get(&self, key: &str) -> Option<&'a TemplateValue> {
        let found = match self.scope {
            Scope::Binding { name, value } if name == key => Some(value),
            Scope::Binding { .. } => None,
            Scope::Root(root) => match root {
                TemplateValue::Map(m) => m.get(key),
                _ => None,
            },
        };
        found.or_else(|| self.parent.and_then(|p| p.get(key)))
    }

    /// Get a variable by path segments (e.g., `["employee", "salary"]`).
    pub fn get_path(&self, path: &[&str]) -> Option<&'a TemplateValue> {
        let (first, rest) = path.split_first()?;
        self.get(first).and_then(|v| v.get_path(rest))
    }

    /// Resolve a dotted path (e.g., `"employee.salary"`).
    ///
    /// A missing key anywhere along the path is an error.
    pub fn resolve(&self, path: &str) -> TemplateResult<&'a TemplateValue> {
        let segments: Vec<&str> = path.split('.').collect();
        self.get_path(&segments)
            .ok_or_else(|| TemplateError::UndefinedVariable {
                path: path.to_string(),
            })
    }

    /// Number of `each` overlays above the root.
    pub fn depth(&self) -> usize {
        self.parent.map_or(0, |p| p.depth() + 1)
    }
}

impl fmt::Display for TemplateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.render() {
            Some(text) => f.write_str(&text),
            None => write!(f, "<{}>", self.kind()),
        }
    }
}
