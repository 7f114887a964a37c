//! Writes the service's OpenAPI document to disk for front-end client generation.

use anyhow::Context;
use bland_api::router::ApiDoc;
use clap::Parser;
use std::path::PathBuf;
use utoipa::OpenApi;

#[derive(Parser)]
#[command(about = "Generate the OpenAPI document for the Bland voice API")]
struct Args {
    /// Where to write the JSON document.
    #[arg(short, long, default_value = "openapi.json")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let spec_json = ApiDoc::openapi()
        .to_pretty_json()
        .context("Failed to serialize OpenAPI document")?;
    std::fs::write(&args.output, spec_json)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!("Wrote {}", args.output.display());
    Ok(())
}
