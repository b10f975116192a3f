//! resolvergen: Generate GraphQL resolver scaffolding from a schema
//!
//! Reads an SDL schema and generates graph-gophers/graphql-go source:
//! - Stored structs and accessor resolvers for every object type
//! - Relay global ids for identity-node (Model) types
//! - Connection/Edge/PageInfo resolvers with pagination guards
//! - Query and mutation entry-point interfaces and the root `Resolver`
//!
//! The pipeline is parse, build and classify the entity model, render and
//! emit through a [`TemplateEngine`](emit::TemplateEngine).

pub mod backends;
pub mod classify;
pub mod config;
pub mod emit;
pub mod error;
pub mod introspection;
pub mod ir;
pub mod parser;
pub mod render;
pub mod typechain;

pub use config::GeneratorConfig;
pub use emit::files::GeneratedFiles;
pub use error::{GeneratorError, Warning};

use emit::TemplateEngine;

/// Output of one generation run
#[derive(Debug)]
pub struct Generated {
    pub files: GeneratedFiles,
    /// Definitions skipped along the way
    pub warnings: Vec<Warning>,
}

/// Run the whole pipeline on a schema document
///
/// Nothing is written; the caller decides what to do with the files.
pub fn generate(
    schema_text: &str,
    config: &GeneratorConfig,
    engine: &dyn TemplateEngine,
) -> Result<Generated, GeneratorError> {
    let parsed = parser::parse(schema_text)?;
    let model = classify::build_model(&parsed.schema, parsed.warnings, config)?;
    let printer = backends::get_printer("go")?;
    let files = emit::emit(&model, config, printer.as_ref(), engine)?;

    Ok(Generated {
        files,
        warnings: model.warnings,
    })
}
