/*
 * integration_tests.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Integration tests for panorama-template using test fixtures.
 */

use panorama_template::{
    Handled, HandlerRegistry, KeywordHandler, RenderOptions, Renderer, Tag, TemplateContext,
    TemplateError, TemplateResult, TemplateValue, render,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::path::Path;

/// Helper to get the path to test fixtures
fn fixture_path(name: &str) -> std::path::PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    Path::new(manifest_dir).join("test-fixtures").join(name)
}

/// Helper to load a fixture file as text
fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", name))
}

fn load_data(name: &str) -> TemplateValue {
    let json: serde_json::Value =
        serde_json::from_str(&load_fixture(name)).expect("fixture should be valid JSON");
    TemplateValue::from(json)
}

#[test]
fn test_simple_interpolation() {
    let template = load_fixture("simple.template");
    let data = TemplateValue::from(json!({"name": "World"}));

    let result = render(&template, &data).unwrap();
    assert_eq!(result, "Hello, World!");
}

#[test]
fn test_missing_variable_is_an_error() {
    let template = load_fixture("simple.template");
    let data = TemplateValue::from(json!({}));

    let err = render(&template, &data).unwrap_err();
    assert_eq!(
        err,
        TemplateError::UndefinedVariable {
            path: "name".to_string()
        }
    );
}

#[test]
fn test_full_page() {
    let template = load_fixture("page.panoramatemplate");
    let data = load_data("page.json");

    let result = render(&template, &data).unwrap();
    assert_eq!(result, load_fixture("page.expected.html"));
}

#[test]
fn test_unmatched_nested_each() {
    let template = load_fixture("unmatched.template");
    let data = TemplateValue::from(json!({"rows": [["a"]]}));

    let err = render(&template, &data).unwrap_err();
    assert_eq!(
        err,
        TemplateError::UnmatchedEach {
            tag: "each rows row".to_string()
        }
    );
}

#[test]
fn test_templates_without_tags_are_unchanged() {
    let data = TemplateValue::from(json!({"a": 1}));
    for template in [
        "",
        "plain text",
        "multi\nline\n",
        "almost <* a tag",
        "stars * and <angles>",
        "ünïcödé ✓",
    ] {
        assert_eq!(render(template, &data).unwrap(), template);
    }
}

#[test]
fn test_single_tag_substitution() {
    let data = TemplateValue::from(json!({"k": "v", "n": 7, "b": true}));
    for (key, text) in [("k", "v"), ("n", "7"), ("b", "true")] {
        let template = format!("head <* {} *> tail", key);
        assert_eq!(
            render(&template, &data).unwrap(),
            format!("head {} tail", text)
        );
    }
}

#[test]
fn test_loop_renders_body_once_per_element() {
    let items: Vec<String> = (0..25).map(|i| format!("item{}", i)).collect();
    let data = TemplateValue::from(json!({"items": items, "sep": ";"}));

    let result = render("<* each items x *><* x *><* sep *><* endeach *>", &data).unwrap();
    let expected: String = items.iter().map(|i| format!("{};", i)).collect();
    assert_eq!(result, expected);
}

#[test]
fn test_deep_nesting_requires_every_terminator() {
    let depth = 6;
    let mut data = json!(["leaf"]);
    for _ in 1..depth {
        data = json!([data]);
    }
    let data = TemplateValue::from(json!({ "l0": data }));

    let mut template = String::new();
    for level in 0..depth {
        let list = if level == 0 {
            "l0".to_string()
        } else {
            format!("l{}", level - 1)
        };
        template.push_str(&format!("<* each {} l{} *>", list, level));
    }
    template.push_str(&format!("<* l{} *>", depth - 1));
    let terminators: Vec<&str> = (0..depth).map(|_| "<* endeach *>").collect();

    let complete = format!("{}{}", template, terminators.concat());
    assert_eq!(render(&complete, &data).unwrap(), "leaf");

    let missing_one = format!("{}{}", template, terminators[1..].concat());
    assert!(matches!(
        render(&missing_one, &data),
        Err(TemplateError::UnmatchedEach { .. })
    ));
}

#[test]
fn test_list_index_access() {
    let data = TemplateValue::from(json!({"people": [{"name": "Ann"}, {"name": "Bo"}]}));
    assert_eq!(
        render("<* people.1.name *> & <* people.0.name *>", &data).unwrap(),
        "Bo & Ann"
    );
}

#[test]
fn test_strict_mode() {
    let data = TemplateValue::from(json!({"x": "1"}));
    let strict = Renderer::new().with_options(RenderOptions::new().with_strict(true));

    assert_eq!(strict.render_value("<* x *>", &data).unwrap(), "1");
    assert_eq!(
        strict.render_value("<* x *><* *>", &data).unwrap_err(),
        TemplateError::EmptyTag
    );
    assert_eq!(
        strict.render_value("<* x *><* endeach *>", &data).unwrap_err(),
        TemplateError::StrayEndeach
    );

    // Lenient rendering drops both
    assert_eq!(render("<* x *><* *><* endeach *>", &data).unwrap(), "1");
}

/// A `join` keyword: `<* join list sep *>` renders list items separated by
/// `sep`.
struct JoinHandler;

impl KeywordHandler for JoinHandler {
    fn handle<'t>(
        &self,
        tag: &Tag<'_>,
        tail: &'t str,
        context: &TemplateContext<'_>,
        _renderer: &Renderer,
    ) -> TemplateResult<Handled<'t>> {
        let args: Vec<&str> = tag.args().collect();
        let (path, sep) = (args[0], args.get(1).copied().unwrap_or(","));
        let TemplateValue::List(items) = context.resolve(path)? else {
            return Err(TemplateError::NotIterable {
                path: path.to_string(),
            });
        };
        let parts: Vec<String> = items.iter().filter_map(|v| v.render()).collect();
        Ok(Handled::new(parts.join(sep), tail))
    }
}

fn join_handler() -> Box<dyn KeywordHandler> {
    Box::new(JoinHandler)
}

#[test]
fn test_custom_keyword_inside_each() {
    let mut registry = HandlerRegistry::standard();
    registry.register("join", join_handler);
    let renderer = Renderer::with_registry(registry);

    let data = TemplateValue::from(json!({
        "rows": [{"cells": ["a", "b"]}, {"cells": ["c"]}]
    }));
    let result = renderer
        .render_value(
            "<* each rows r *>[<* join r.cells | *>]<* endeach *>",
            &data,
        )
        .unwrap();
    assert_eq!(result, "[a|b][c]");
}

#[test]
fn test_renderer_is_shareable_across_threads() {
    let renderer = Renderer::new();
    let data = TemplateValue::from(json!({"items": ["x", "y"]}));

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    renderer
                        .render_value("<* each items i *><* i *><* endeach *>", &data)
                        .unwrap()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), "xy");
        }
    });
}
