//! sinatra-gen
//!
//! Builds the unified model graph from a GraphQL schema and a database
//! catalog and writes it as JSON for the template emitters.
//!
//! Usage:
//!   sinatra-gen --catalog models.json --schema schema/*.graphql -o build/models.json

#![deny(missing_docs)]

use std::path::PathBuf;

use clap::Parser;

use sinatra_gen::config::DEFAULT_CONFIG_FILE;
use sinatra_gen::output::init_logger;
use sinatra_gen::{Catalog, Config, GeneratorError, SchemaDocument, build};

#[derive(Parser, Debug)]
#[command(name = "sinatra-gen")]
#[command(about = "Build the model graph of a database-first GraphQL API")]
struct Args {
    /// Generator configuration
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Database catalog exported by the ORM tooling
    #[arg(long)]
    catalog: PathBuf,

    /// GraphQL schema file(s)
    #[arg(short, long, required = true)]
    schema: Vec<PathBuf>,

    /// Output JSON file
    #[arg(short, long, default_value = "models.json")]
    output: PathBuf,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logger(args.verbose);

    let config = if args.config.exists() {
        Config::load(&args.config)?
    } else {
        tracing::info!(path = %args.config.display(), "no config file, using defaults");
        Config::with_defaults()
    };
    let ctx = config.context();
    let catalog = Catalog::load(&args.catalog)?;

    let mut sources = Vec::with_capacity(args.schema.len());
    for path in &args.schema {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GeneratorError::Parse(format!("could not read {}: {}", path.display(), e))
        })?;
        sources.push((path.display().to_string(), content));
    }
    let sources: Vec<(&str, &str)> = sources
        .iter()
        .map(|(name, content)| (name.as_str(), content.as_str()))
        .collect();
    let schema = SchemaDocument::parse(&sources)?;

    let model_build = build(&schema, &catalog, &ctx)?;
    if !model_build.write(&args.output)? {
        tracing::warn!(
            path = %args.output.display(),
            "no models generated; existing output was not modified"
        );
    }
    Ok(())
}
