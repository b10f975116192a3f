//! Template data contexts
//!
//! Every template slot of a schema type receives the same [`TypeContext`];
//! lists that do not apply to the type's role are empty. Type and method
//! texts are printed before they reach the template.

use crate::backends::Printer;
use crate::config::GeneratorConfig;
use crate::ir::{FieldDef, Role, TypeDef};
use crate::render::resolver::{self, Args};
use crate::render::{Mode, render};
use heck::ToUpperCamelCase;
use serde::Serialize;

/// Data context of one schema type
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeContext {
    pub name: String,
    pub resolver_name: String,
    /// Description split into comment lines
    pub doc: Vec<String>,
    pub kind: &'static str,
    pub role: &'static str,
    pub is_model: bool,
    pub is_payload: bool,
    pub is_query: bool,
    pub is_mutation: bool,
    /// Stored struct members
    pub fields: Vec<FieldContext>,
    /// Relation members of a Model
    pub extra_fields: Vec<FieldContext>,
    /// Generated methods; interface and entry-point methods carry no code
    pub methods: Vec<MethodContext>,
    /// Relation methods the author implements
    pub extra_methods: Vec<MethodContext>,
    pub input_fields: Vec<FieldContext>,
    pub enum_values: Vec<EnumValueContext>,
    pub possible_types: Vec<PossibleTypeContext>,
    pub interfaces: Vec<String>,
    /// Named argument structs of mutation entries
    pub args: Vec<ArgsContext>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldContext {
    pub name: String,
    pub member: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub schema_type: String,
    pub doc: Vec<String>,
    pub deprecated: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodContext {
    pub name: String,
    pub signature: String,
    pub code: String,
    pub doc: Vec<String>,
    pub deprecated: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValueContext {
    pub name: String,
    pub constant: String,
    pub doc: Vec<String>,
    pub deprecated: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PossibleTypeContext {
    pub name: String,
    pub resolver_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgsContext {
    pub name: String,
    pub field: String,
    pub fields: Vec<FieldContext>,
}

/// Data context of the root resolver
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RootContext {
    pub name: String,
    pub query: Option<String>,
    pub mutation: Option<String>,
}

/// Data context of a file header
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderContext {
    pub package: String,
    pub unit: String,
    pub imports: Vec<ImportContext>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportContext {
    pub qualifier: String,
    pub path: String,
}

/// Builds contexts for one printer and configuration
pub struct ContextBuilder<'a> {
    pub config: &'a GeneratorConfig,
    pub printer: &'a dyn Printer,
}

impl ContextBuilder<'_> {
    pub fn type_context(&self, ty: &TypeDef) -> TypeContext {
        let mut ctx = TypeContext {
            name: ty.name.clone(),
            resolver_name: self.config.wrapper_name(&ty.name),
            doc: doc_lines(ty.description.as_deref()),
            kind: ty.kind.as_str(),
            role: ty.role.as_str(),
            is_model: ty.is_model(),
            is_payload: ty.is_payload(),
            is_query: ty.is_query(),
            is_mutation: ty.is_mutation(),
            fields: Vec::new(),
            extra_fields: Vec::new(),
            methods: Vec::new(),
            extra_methods: Vec::new(),
            input_fields: Vec::new(),
            enum_values: Vec::new(),
            possible_types: Vec::new(),
            interfaces: ty.interfaces.iter().cloned().collect(),
            args: Vec::new(),
        };

        match ty.role {
            Role::Model | Role::Object | Role::Payload => {
                let is_model = ty.is_model();
                ctx.fields = self.members(&ty.fields, Mode::Struct);
                ctx.extra_fields = self.members(&ty.extra_fields, Mode::Struct);
                ctx.methods = ty
                    .fields
                    .iter()
                    .map(|f| self.resolver_method(f, is_model))
                    .collect();
                ctx.extra_methods = ty
                    .extra_fields
                    .iter()
                    .map(|f| self.declared_method(f, Mode::ResolverReturn, self.inline_args(f)))
                    .collect();
            }
            Role::Interface => {
                ctx.methods = ty
                    .fields
                    .iter()
                    .map(|f| self.declared_method(f, Mode::InterfaceMethod, self.inline_args(f)))
                    .collect();
            }
            Role::Query => {
                ctx.methods = ty
                    .fields
                    .iter()
                    .map(|f| self.declared_method(f, Mode::QueryEntry, self.inline_args(f)))
                    .collect();
            }
            Role::Mutation => {
                for field in &ty.fields {
                    let args = if field.arguments.is_empty() {
                        Args::None
                    } else {
                        let args = self.args_context(field);
                        let named = Args::Named(args.name.clone());
                        ctx.args.push(args);
                        named
                    };
                    ctx.methods
                        .push(self.declared_method(field, Mode::QueryEntry, args));
                }
            }
            Role::Input => {
                ctx.input_fields = self.members(&ty.fields, Mode::ArgStruct);
            }
            Role::Enum => {
                ctx.enum_values = ty
                    .enum_values
                    .iter()
                    .map(|v| EnumValueContext {
                        name: v.name.clone(),
                        constant: format!("{}{}", ty.name, v.name.to_upper_camel_case()),
                        doc: doc_lines(v.description.as_deref()),
                        deprecated: v.is_deprecated,
                    })
                    .collect();
            }
            Role::Union => {
                ctx.possible_types = ty
                    .possible_types
                    .iter()
                    .map(|name| PossibleTypeContext {
                        name: name.clone(),
                        resolver_name: self.config.wrapper_name(name),
                    })
                    .collect();
            }
            Role::Scalar => {}
        }

        ctx
    }

    /// Argument struct of a mutation entry
    pub fn args_context(&self, field: &FieldDef) -> ArgsContext {
        ArgsContext {
            name: format!("{}Args", self.printer.member_name(&field.name)),
            field: field.name.clone(),
            fields: self.members(&field.arguments, Mode::ArgStruct),
        }
    }

    fn members(&self, fields: &[FieldDef], mode: Mode) -> Vec<FieldContext> {
        fields
            .iter()
            .map(|f| FieldContext {
                name: f.name.clone(),
                member: self.printer.member_name(&f.name),
                type_name: self
                    .printer
                    .type_expr(&render(&f.ty, mode, &f.name, &self.config.scalars)),
                schema_type: f.schema_type.clone(),
                doc: doc_lines(f.description.as_deref()),
                deprecated: f.deprecation_reason.clone(),
            })
            .collect()
    }

    fn inline_args(&self, field: &FieldDef) -> Args {
        resolver::inline_args(field, &self.config.scalars)
    }

    fn resolver_method(&self, field: &FieldDef, owner_is_model: bool) -> MethodContext {
        let method = resolver::method(field, owner_is_model, self.config);
        MethodContext {
            name: field.name.clone(),
            signature: self.printer.signature(&method.signature),
            code: self.printer.method(&method),
            doc: doc_lines(field.description.as_deref()),
            deprecated: field.deprecation_reason.clone(),
        }
    }

    fn declared_method(&self, field: &FieldDef, mode: Mode, args: Args) -> MethodContext {
        let signature = resolver::signature(field, mode, args, &self.config.scalars);
        MethodContext {
            name: field.name.clone(),
            signature: self.printer.signature(&signature),
            code: String::new(),
            doc: doc_lines(field.description.as_deref()),
            deprecated: field.deprecation_reason.clone(),
        }
    }
}

fn doc_lines(description: Option<&str>) -> Vec<String> {
    description
        .map(|d| d.trim().lines().map(|l| l.trim_end().to_string()).collect())
        .unwrap_or_default()
}
