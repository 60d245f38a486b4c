/*
 * render.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Render command implementation
 */

//! Render command implementation.
//!
//! Reads a template and a JSON data file, renders the template, and writes
//! the result. Output is written only after the whole render succeeded, so a
//! failed render never leaves a truncated output file behind.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use panorama_template::{RenderOptions, Renderer, TemplateValue};

/// Arguments for the render command
#[derive(Debug)]
pub struct RenderArgs {
    /// Template file
    pub template: PathBuf,
    /// JSON data file
    pub data: PathBuf,
    /// Output file; stdout when absent or `-`
    pub output: Option<PathBuf>,
    /// File holding the expected output
    pub check: Option<PathBuf>,
    /// Strict rendering
    pub strict: bool,
}

/// Execute the render command
pub fn execute(args: RenderArgs) -> Result<()> {
    let template = fs::read_to_string(&args.template)
        .with_context(|| format!("Failed to read template: {}", args.template.display()))?;
    let data = load_data(&args.data)?;

    let renderer = Renderer::new().with_options(RenderOptions::new().with_strict(args.strict));
    let output = renderer
        .render_value(&template, &data)
        .with_context(|| format!("Failed to render template: {}", args.template.display()))?;
    debug!(bytes = output.len(), "Rendered template");

    if let Some(expected_path) = &args.check {
        check_output(&output, expected_path)?;
    }

    write_output(&output, args.output.as_deref())
}

/// Read and parse the JSON data file.
fn load_data(path: &Path) -> Result<TemplateValue> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file: {}", path.display()))?;
    let json: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse JSON data: {}", path.display()))?;
    Ok(TemplateValue::from(json))
}

/// Fail unless `output` matches the contents of `expected_path`.
fn check_output(output: &str, expected_path: &Path) -> Result<()> {
    let expected = fs::read_to_string(expected_path).with_context(|| {
        format!(
            "Failed to read expected output: {}",
            expected_path.display()
        )
    })?;

    if output != expected {
        let line = first_difference(output, &expected);
        anyhow::bail!(
            "Rendered output differs from {} (first difference on line {})",
            expected_path.display(),
            line
        );
    }

    info!("Output matches {}", expected_path.display());
    Ok(())
}

/// 1-based line number of the first line that differs.
fn first_difference(actual: &str, expected: &str) -> usize {
    let mut actual_lines = actual.split('\n');
    let mut expected_lines = expected.split('\n');
    let mut line = 1;
    loop {
        match (actual_lines.next(), expected_lines.next()) {
            (Some(a), Some(e)) if a == e => line += 1,
            _ => return line,
        }
    }
}

fn write_output(output: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) if path != Path::new("-") => {
            fs::write(path, output)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        _ => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(output.as_bytes())
                .and_then(|()| stdout.flush())
                .context("Failed to write output to stdout")?;
        }
    }
    Ok(())
}
