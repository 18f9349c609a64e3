//! sinatra-schema-gen
//!
//! Writes the generated GraphQL schema documents for a database catalog.
//!
//! Usage:
//!   sinatra-schema-gen --catalog models.json --output-dir schema/

#![deny(missing_docs)]

use std::path::PathBuf;

use clap::Parser;

use sinatra_gen::config::DEFAULT_CONFIG_FILE;
use sinatra_gen::output::{init_logger, write_atomic};
use sinatra_gen::{Catalog, Config};
use sinatra_schema_gen::{Hooks, generate_schema};

#[derive(Parser, Debug)]
#[command(name = "sinatra-schema-gen")]
#[command(about = "Generate GraphQL schema documents from database models")]
struct Args {
    /// Generator configuration
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Database catalog exported by the ORM tooling
    #[arg(long)]
    catalog: PathBuf,

    /// Directory receiving the `*_gen.graphql` files; defaults to `schema.dirname`
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

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
    let catalog = Catalog::load(&args.catalog)?;

    let output_dir = args.output_dir.unwrap_or_else(|| match config.schema.dirname.as_str() {
        "" => PathBuf::from("schema"),
        dir => PathBuf::from(dir),
    });

    // render everything before touching the output directory
    let files = generate_schema(&catalog, &config, &Hooks::new());
    for file in &files {
        write_atomic(&output_dir.join(file.file_name()), &file.content)?;
    }

    tracing::info!(
        dir = %output_dir.display(),
        files = files.len(),
        "generated schema"
    );
    Ok(())
}
