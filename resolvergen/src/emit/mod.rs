//! Emission driver
//!
//! Walks the entity model in declaration order, picks a template slot per
//! type and hands the slot, the logical name, the role and the data context
//! to a [`TemplateEngine`]. Fragments sharing a logical name land in one
//! output unit.

pub mod context;
pub mod files;
pub mod handlebars;

use crate::backends::Printer;
use crate::config::GeneratorConfig;
use crate::error::GeneratorError;
use crate::ir::{EntityModel, Role, TypeDef};
use context::{ContextBuilder, RootContext};
use files::{GeneratedFiles, Units};
use serde::Serialize;
use std::fmt;

/// Name of the root entry-point resolver
pub const ROOT_RESOLVER: &str = "Resolver";

/// Role kind passed with the root resolver
pub const ROOT_KIND: &str = "RESOLVER";

/// A named template of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateSlot {
    Header,
    Type,
    Interface,
    Union,
    Enum,
    Scalar,
    Input,
    Payload,
    Query,
    Mutation,
    Args,
    Resolver,
}

impl TemplateSlot {
    pub const ALL: [TemplateSlot; 12] = [
        TemplateSlot::Header,
        TemplateSlot::Type,
        TemplateSlot::Interface,
        TemplateSlot::Union,
        TemplateSlot::Enum,
        TemplateSlot::Scalar,
        TemplateSlot::Input,
        TemplateSlot::Payload,
        TemplateSlot::Query,
        TemplateSlot::Mutation,
        TemplateSlot::Args,
        TemplateSlot::Resolver,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateSlot::Header => "header",
            TemplateSlot::Type => "type",
            TemplateSlot::Interface => "interface",
            TemplateSlot::Union => "union",
            TemplateSlot::Enum => "enum",
            TemplateSlot::Scalar => "scalar",
            TemplateSlot::Input => "input",
            TemplateSlot::Payload => "payload",
            TemplateSlot::Query => "query",
            TemplateSlot::Mutation => "mutation",
            TemplateSlot::Args => "args",
            TemplateSlot::Resolver => "resolver",
        }
    }

    /// Slot emitting a type of the given role
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Query => TemplateSlot::Query,
            Role::Mutation => TemplateSlot::Mutation,
            Role::Model | Role::Object => TemplateSlot::Type,
            Role::Payload => TemplateSlot::Payload,
            Role::Interface => TemplateSlot::Interface,
            Role::Union => TemplateSlot::Union,
            Role::Enum => TemplateSlot::Enum,
            Role::Input => TemplateSlot::Input,
            Role::Scalar => TemplateSlot::Scalar,
        }
    }
}

impl fmt::Display for TemplateSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A template engine
pub trait TemplateEngine {
    /// Execute `slot` for the type `logical_name` of role `kind`
    fn execute(
        &self,
        slot: TemplateSlot,
        logical_name: &str,
        kind: &str,
        context: &serde_json::Value,
    ) -> Result<Vec<u8>, GeneratorError>;
}

/// Output unit of a type: its name without `Edge`, then `Connection`
pub fn logical_name(type_name: &str) -> &str {
    let name = type_name.strip_suffix("Edge").unwrap_or(type_name);
    let name = name.strip_suffix("Connection").unwrap_or(name);
    if name.is_empty() { type_name } else { name }
}

/// Emit every type of a classified model
pub fn emit(
    model: &EntityModel,
    config: &GeneratorConfig,
    printer: &dyn Printer,
    engine: &dyn TemplateEngine,
) -> Result<GeneratedFiles, GeneratorError> {
    if model.has_entry_points() && model.get(ROOT_RESOLVER).is_some() {
        return Err(GeneratorError::Config(format!(
            "schema type `{ROOT_RESOLVER}` collides with the generated root resolver"
        )));
    }

    tracing::debug!(
        types = model.types.len(),
        models = model.models.len(),
        payloads = model.payloads.len(),
        "emitting entity model"
    );

    let builder = ContextBuilder { config, printer };
    let mut units = Units::new(printer.file_extension());

    for ty in &model.types {
        emit_type(ty, &builder, engine, &mut units)?;
    }

    if model.has_entry_points() {
        let root = RootContext {
            name: ROOT_RESOLVER.to_string(),
            query: entry_point(model, model.query_name.as_deref(), config),
            mutation: entry_point(model, model.mutation_name.as_deref(), config),
        };
        tracing::info!(kind = ROOT_KIND, name = ROOT_RESOLVER, "generating type");
        let code = execute(engine, TemplateSlot::Resolver, ROOT_RESOLVER, ROOT_KIND, &root)?;
        units.push(ROOT_RESOLVER, code);
    }

    units.finish(config, engine)
}

fn emit_type(
    ty: &TypeDef,
    builder: &ContextBuilder<'_>,
    engine: &dyn TemplateEngine,
    units: &mut Units,
) -> Result<(), GeneratorError> {
    let slot = TemplateSlot::for_role(ty.role);
    let unit = logical_name(&ty.name);
    let kind = ty.role.as_str();

    tracing::info!(kind, name = %ty.name, "generating type");
    tracing::debug!(name = %ty.name, %slot, unit, "selected template");

    let ctx = builder.type_context(ty);
    let code = execute(engine, slot, unit, kind, &ctx).map_err(|e| blame(e, &ty.name))?;
    units.push(unit, code);

    for args in &ctx.args {
        tracing::debug!(name = %args.name, field = %args.field, "generating argument struct");
        let code = execute(engine, TemplateSlot::Args, unit, kind, args)
            .map_err(|e| blame(e, &ty.name))?;
        units.push(unit, code);
    }

    Ok(())
}

/// Point a template failure at the type being emitted
fn blame(error: GeneratorError, type_name: &str) -> GeneratorError {
    match error {
        GeneratorError::Template { slot, message, .. } => GeneratorError::Template {
            slot,
            type_name: type_name.to_string(),
            message,
        },
        other => other,
    }
}

/// Interface name of an entry-point root that exists in the model
fn entry_point(
    model: &EntityModel,
    name: Option<&str>,
    config: &GeneratorConfig,
) -> Option<String> {
    let ty = model.get(name?)?;
    ty.is_entry_point().then(|| config.wrapper_name(&ty.name))
}

pub(crate) fn execute<T: Serialize>(
    engine: &dyn TemplateEngine,
    slot: TemplateSlot,
    name: &str,
    kind: &str,
    context: &T,
) -> Result<String, GeneratorError> {
    let failure = |message: String| GeneratorError::Template {
        slot: slot.to_string(),
        type_name: name.to_string(),
        message,
    };
    let value = serde_json::to_value(context).map_err(|e| failure(e.to_string()))?;
    let bytes = engine.execute(slot, name, kind, &value)?;
    String::from_utf8(bytes).map_err(|e| failure(e.to_string()))
}
