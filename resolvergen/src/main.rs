//! resolvergen: Generate GraphQL resolver scaffolding from a schema
//!
//! Reads an SDL schema and writes one Go file per logical type into the
//! output directory. Files are only written when the whole run succeeded.

use clap::Parser;
use resolvergen::GeneratorConfig;
use resolvergen::emit::handlebars::HandlebarsEngine;
use resolvergen::error::GeneratorError;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "resolvergen")]
#[command(about = "Generate graph-gophers GraphQL resolvers from a schema")]
struct Args {
    /// GraphQL schema (SDL) file
    schema: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "resolvers")]
    out: PathBuf,

    /// Go package name of the generated files
    #[arg(long)]
    package: Option<String>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory of `<slot>.hbs` templates replacing the built-in ones
    #[arg(long)]
    templates: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,

    /// Generate without writing, listing the files that would be written
    #[arg(long)]
    check: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::builder()
        .parse(std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mut config = match &args.config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(package) = args.package {
        config.package = package;
    }

    let engine = match &args.templates {
        Some(dir) => HandlebarsEngine::with_overrides(dir)?,
        None => HandlebarsEngine::new()?,
    };

    let schema = std::fs::read_to_string(&args.schema)
        .map_err(|e| GeneratorError::io(&args.schema, e))?;
    let generated = resolvergen::generate(&schema, &config, &engine)?;

    if args.check {
        for name in generated.files.file_names() {
            println!("{}", args.out.join(name).display());
        }
    } else {
        let written = generated.files.write_to(&args.out)?;
        tracing::info!(
            files = written.len(),
            out = %args.out.display(),
            "generated resolvers"
        );
    }

    if !generated.warnings.is_empty() {
        tracing::warn!(count = generated.warnings.len(), "schema definitions skipped");
    }

    Ok(())
}
