//! Panorama CLI - Main entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod render;

#[derive(Parser, Debug)]
#[command(name = "panorama")]
#[command(version)]
#[command(about = "Render a Panorama template with JSON data", long_about = None)]
struct Cli {
    /// Template file containing <* ... *> tags
    #[arg(value_name = "TEMPLATE")]
    template: PathBuf,

    /// JSON file with the data to render
    #[arg(value_name = "DATA")]
    data: PathBuf,

    /// Write output to FILE (omit or use '-' for stdout)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Compare the rendered output with this file and fail if they differ
    #[arg(long, value_name = "EXPECTED")]
    check: Option<PathBuf>,

    /// Treat stray endeach tags and empty tags as errors
    #[arg(long)]
    strict: bool,

    /// Show debug output while rendering
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.debug {
        "panorama=debug,panorama_template=trace"
    } else {
        "panorama=info,panorama_template=warn"
    };

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    render::execute(render::RenderArgs {
        template: cli.template,
        data: cli.data,
        output: cli.output,
        check: cli.check,
        strict: cli.strict,
    })
}
