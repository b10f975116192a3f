//! Type-chain building
//!
//! Flattens a schema type reference into a [`Typ`] chain. NON_NULL is a
//! modifier on the current node; every LIST adds one node.

use crate::config::GeneratorConfig;
use crate::error::GeneratorError;
use crate::introspection::{self, InputValue, Kind, TypeRef};
use crate::ir::{FieldDef, LIST_MARKER, Typ};

/// Build the chain for one type reference
///
/// `owner` and `field` only identify the reference in errors.
pub fn build(
    ty: &TypeRef,
    config: &GeneratorConfig,
    owner: &str,
    field: &str,
) -> Result<Typ, GeneratorError> {
    let mut head = Typ::leaf("", "");
    let mut node = &mut head;
    let mut remaining = ty;

    loop {
        match remaining {
            TypeRef::NonNull(inner) => {
                node.is_nullable = false;
                remaining = inner;
            }
            TypeRef::List(inner) => {
                node.native_name = LIST_MARKER.to_string();
                node.wire_name = LIST_MARKER.to_string();
                node = &mut **node.element.insert(Box::new(Typ::leaf("", "")));
                remaining = inner;
            }
            TypeRef::Named { name, kind } => {
                let (native, wire) =
                    resolve_leaf(name, *kind, config).ok_or_else(|| {
                        GeneratorError::UnresolvedType {
                            owner: owner.to_string(),
                            field: field.to_string(),
                            type_name: name.clone(),
                        }
                    })?;
                node.native_name = native;
                node.wire_name = wire;
                break;
            }
        }
    }

    Ok(head)
}

/// Native and wire names of a named leaf
fn resolve_leaf(
    name: &str,
    kind: Option<Kind>,
    config: &GeneratorConfig,
) -> Option<(String, String)> {
    if let Some(mapping) = config.scalars.lookup(name) {
        return Some((mapping.native.clone(), mapping.wire.clone()));
    }

    match kind? {
        Kind::Enum => Some((config.scalars.enum_native.clone(), name.to_string())),
        Kind::InputObject | Kind::Scalar => Some((name.to_string(), name.to_string())),
        Kind::Object | Kind::Interface | Kind::Union => {
            Some((name.to_string(), config.wrapper_name(name)))
        }
        Kind::List | Kind::NonNull => None,
    }
}

/// Build the field definition of a schema field, arguments included
pub fn build_field(
    field: &introspection::Field,
    owner: &str,
    config: &GeneratorConfig,
) -> Result<FieldDef, GeneratorError> {
    let arguments = field
        .args
        .iter()
        .map(|arg| {
            let mut def = build_input_value(arg, owner, config)?;
            def.owner = format!("{}.{}", owner, field.name);
            Ok(def)
        })
        .collect::<Result<Vec<_>, GeneratorError>>()?;

    Ok(FieldDef {
        name: field.name.clone(),
        owner: owner.to_string(),
        description: field.description.clone(),
        ty: build(&field.ty, config, owner, &field.name)?,
        schema_type: field.ty.to_string(),
        arguments,
        is_user_defined: false,
        deprecation_reason: field.deprecation_reason.clone(),
    })
}

/// Build the field definition of an argument or input field
pub fn build_input_value(
    value: &InputValue,
    owner: &str,
    config: &GeneratorConfig,
) -> Result<FieldDef, GeneratorError> {
    Ok(FieldDef {
        name: value.name.clone(),
        owner: owner.to_string(),
        description: value.description.clone(),
        ty: build(&value.ty, config, owner, &value.name)?,
        schema_type: value.ty.to_string(),
        arguments: Vec::new(),
        is_user_defined: false,
        deprecation_reason: None,
    })
}
