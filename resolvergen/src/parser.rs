//! GraphQL SDL parsing
//!
//! Turns schema text into an [`introspection::Schema`](crate::introspection::Schema)
//! using `apollo-parser`. Named type references are resolved against every
//! declared type after the whole document has been read, so a field may
//! refer to a type declared further down.

use crate::error::{GeneratorError, Warning};
use crate::introspection::{EnumValue, Field, InputValue, Kind, Schema, SchemaType, TypeRef};
use apollo_parser::Parser;
use apollo_parser::cst;
use indexmap::IndexMap;

/// Built-in GraphQL scalar names.
const BUILTIN_SCALARS: &[&str] = &["String", "Int", "Float", "Boolean", "ID"];

/// Reason reported for `@deprecated` without an argument.
const DEFAULT_DEPRECATION_REASON: &str = "No longer supported";

/// Result of parsing: the schema plus the definitions that were skipped
#[derive(Debug)]
pub struct ParsedSchema {
    pub schema: Schema,
    pub warnings: Vec<Warning>,
}

/// Parse SDL text. Any syntax error is fatal.
pub fn parse(schema_text: &str) -> Result<ParsedSchema, GeneratorError> {
    if is_blank_document(schema_text) {
        return Ok(ParsedSchema {
            schema: Schema::default(),
            warnings: Vec::new(),
        });
    }

    let tree = Parser::new(schema_text).parse();

    let messages: Vec<String> = tree.errors().map(|e| e.message().to_string()).collect();
    if !messages.is_empty() {
        return Err(GeneratorError::SchemaParse { messages });
    }

    let doc = tree.document();
    let kinds = collect_kinds(&doc);

    let mut schema = Schema::default();
    let mut warnings = Vec::new();

    for def in doc.definitions() {
        let ty = match def {
            cst::Definition::SchemaDefinition(s) => {
                read_schema_definition(&s, &mut schema);
                continue;
            }
            cst::Definition::ScalarTypeDefinition(s) => {
                let mut ty = SchemaType::new(Kind::Scalar, extract_name(&s.name()));
                ty.description = extract_description(&s.description());
                ty
            }
            cst::Definition::ObjectTypeDefinition(o) => {
                let mut ty = SchemaType::new(Kind::Object, extract_name(&o.name()));
                ty.description = extract_description(&o.description());
                ty.fields = extract_fields(&o.fields_definition(), &kinds);
                ty.interfaces = extract_interfaces(&o.implements_interfaces());
                ty
            }
            cst::Definition::InterfaceTypeDefinition(i) => {
                let mut ty = SchemaType::new(Kind::Interface, extract_name(&i.name()));
                ty.description = extract_description(&i.description());
                ty.fields = extract_fields(&i.fields_definition(), &kinds);
                ty.interfaces = extract_interfaces(&i.implements_interfaces());
                ty
            }
            cst::Definition::UnionTypeDefinition(u) => {
                let mut ty = SchemaType::new(Kind::Union, extract_name(&u.name()));
                ty.description = extract_description(&u.description());
                ty.possible_types = u
                    .union_member_types()
                    .map(|m| m.named_types().map(|nt| extract_name(&nt.name())).collect())
                    .unwrap_or_default();
                ty
            }
            cst::Definition::EnumTypeDefinition(e) => extract_enum(&e),
            cst::Definition::InputObjectTypeDefinition(i) => {
                let mut ty = SchemaType::new(Kind::InputObject, extract_name(&i.name()));
                ty.description = extract_description(&i.description());
                ty.input_fields = i
                    .input_fields_definition()
                    .map(|ifd| {
                        ifd.input_value_definitions()
                            .map(|iv| extract_input_value(&iv, &kinds))
                            .collect()
                    })
                    .unwrap_or_default();
                ty
            }
            other => {
                warnings.push(unsupported(&other));
                continue;
            }
        };

        if ty.name.starts_with("__") {
            continue;
        }
        schema.types.push(ty);
    }

    // Without a schema block the conventional root names apply.
    if schema.query_type_name.is_none() && kinds.get("Query") == Some(&Kind::Object) {
        schema.query_type_name = Some("Query".to_string());
    }
    if schema.mutation_type_name.is_none() && kinds.get("Mutation") == Some(&Kind::Object) {
        schema.mutation_type_name = Some("Mutation".to_string());
    }

    Ok(ParsedSchema { schema, warnings })
}

/// First pass: every declared name and its kind
fn collect_kinds(doc: &cst::Document) -> IndexMap<String, Kind> {
    let mut kinds: IndexMap<String, Kind> = BUILTIN_SCALARS
        .iter()
        .map(|s| (s.to_string(), Kind::Scalar))
        .collect();

    for def in doc.definitions() {
        let (name, kind) = match def {
            cst::Definition::ScalarTypeDefinition(s) => (s.name(), Kind::Scalar),
            cst::Definition::ObjectTypeDefinition(o) => (o.name(), Kind::Object),
            cst::Definition::InterfaceTypeDefinition(i) => (i.name(), Kind::Interface),
            cst::Definition::UnionTypeDefinition(u) => (u.name(), Kind::Union),
            cst::Definition::EnumTypeDefinition(e) => (e.name(), Kind::Enum),
            cst::Definition::InputObjectTypeDefinition(i) => (i.name(), Kind::InputObject),
            _ => continue,
        };
        kinds.insert(extract_name(&name), kind);
    }

    kinds
}

fn read_schema_definition(def: &cst::SchemaDefinition, schema: &mut Schema) {
    for root in def.root_operation_type_definitions() {
        let Some(op) = root.operation_type() else {
            continue;
        };
        let name = root.named_type().map(|nt| extract_name(&nt.name()));
        if op.query_token().is_some() {
            schema.query_type_name = name;
        } else if op.mutation_token().is_some() {
            schema.mutation_type_name = name;
        }
    }
}

fn unsupported(def: &cst::Definition) -> Warning {
    let (kind, name) = match def {
        cst::Definition::DirectiveDefinition(d) => ("DIRECTIVE", Some(extract_name(&d.name()))),
        cst::Definition::OperationDefinition(o) => {
            ("OPERATION", o.name().map(|n| n.text().to_string()))
        }
        cst::Definition::FragmentDefinition(_) => ("FRAGMENT", None),
        cst::Definition::SchemaExtension(_) => ("SCHEMA_EXTENSION", None),
        cst::Definition::ObjectTypeExtension(o) => {
            ("TYPE_EXTENSION", Some(extract_name(&o.name())))
        }
        _ => ("TYPE_EXTENSION", None),
    };
    Warning::UnsupportedKind {
        name,
        kind: kind.to_string(),
    }
}

fn extract_name(name: &Option<cst::Name>) -> String {
    name.as_ref()
        .map(|n| n.text().to_string())
        .unwrap_or_default()
}

fn extract_description(desc: &Option<cst::Description>) -> Option<String> {
    desc.as_ref()
        .and_then(|d| d.string_value())
        .map(String::from)
        .filter(|s| !s.is_empty())
}

fn named_ref(name: String, kinds: &IndexMap<String, Kind>) -> TypeRef {
    let kind = kinds.get(&name).copied();
    TypeRef::Named { name, kind }
}

fn extract_type(ty: &Option<cst::Type>, kinds: &IndexMap<String, Kind>) -> TypeRef {
    match ty {
        None => TypeRef::named("String", Kind::Scalar),
        Some(t) => match t {
            cst::Type::NamedType(nt) => named_ref(extract_name(&nt.name()), kinds),
            cst::Type::ListType(lt) => extract_type(&lt.ty(), kinds).list(),
            cst::Type::NonNullType(nnt) => {
                if let Some(named) = nnt.named_type() {
                    named_ref(extract_name(&named.name()), kinds).non_null()
                } else if let Some(list) = nnt.list_type() {
                    extract_type(&list.ty(), kinds).list().non_null()
                } else {
                    TypeRef::named("String", Kind::Scalar).non_null()
                }
            }
        },
    }
}

fn extract_interfaces(implements: &Option<cst::ImplementsInterfaces>) -> Vec<String> {
    implements
        .as_ref()
        .map(|ii| ii.named_types().map(|nt| extract_name(&nt.name())).collect())
        .unwrap_or_default()
}

/// `Some(reason)` when the directives contain `@deprecated`
fn extract_deprecation(directives: &Option<cst::Directives>) -> Option<String> {
    let directive = directives
        .as_ref()?
        .directives()
        .find(|d| extract_name(&d.name()) == "deprecated")?;

    let reason = directive.arguments().and_then(|args| {
        args.arguments()
            .find(|a| extract_name(&a.name()) == "reason")
            .and_then(|a| match a.value() {
                Some(cst::Value::StringValue(s)) => Some(String::from(s)),
                _ => None,
            })
    });

    Some(reason.unwrap_or_else(|| DEFAULT_DEPRECATION_REASON.to_string()))
}

fn extract_fields(
    fields_def: &Option<cst::FieldsDefinition>,
    kinds: &IndexMap<String, Kind>,
) -> Vec<Field> {
    let Some(fd) = fields_def else {
        return Vec::new();
    };
    fd.field_definitions()
        .map(|f| {
            let deprecation_reason = extract_deprecation(&f.directives());
            Field {
                name: extract_name(&f.name()),
                description: extract_description(&f.description()),
                ty: extract_type(&f.ty(), kinds),
                args: f
                    .arguments_definition()
                    .map(|ad| {
                        ad.input_value_definitions()
                            .map(|iv| extract_input_value(&iv, kinds))
                            .collect()
                    })
                    .unwrap_or_default(),
                is_deprecated: deprecation_reason.is_some(),
                deprecation_reason,
            }
        })
        .collect()
}

fn extract_input_value(
    iv: &cst::InputValueDefinition,
    kinds: &IndexMap<String, Kind>,
) -> InputValue {
    InputValue {
        name: extract_name(&iv.name()),
        description: extract_description(&iv.description()),
        ty: extract_type(&iv.ty(), kinds),
    }
}

fn extract_enum(e: &cst::EnumTypeDefinition) -> SchemaType {
    let mut ty = SchemaType::new(Kind::Enum, extract_name(&e.name()));
    ty.description = extract_description(&e.description());
    ty.enum_values = e
        .enum_values_definition()
        .map(|evd| {
            evd.enum_value_definitions()
                .map(|ev| EnumValue {
                    name: ev
                        .enum_value()
                        .map(|v| v.text().to_string())
                        .unwrap_or_default(),
                    description: extract_description(&ev.description()),
                    is_deprecated: extract_deprecation(&ev.directives()).is_some(),
                })
                .collect()
        })
        .unwrap_or_default();
    ty
}

/// Only ignored tokens: whitespace, commas, a BOM and `#` comments
fn is_blank_document(text: &str) -> bool {
    text.lines().all(|line| {
        let code = line.split('#').next().unwrap_or_default();
        code.chars().all(|c| c.is_whitespace() || c == ',' || c == '\u{feff}')
    })
}
