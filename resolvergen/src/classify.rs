//! Entity model construction and classification
//!
//! Scans the introspected schema into [`TypeDef`]s, then assigns every
//! object its role (query, mutation, payload, model or plain object) and
//! splits each Model's fields into generated primitives and hand-written
//! relations.

use crate::config::{GeneratorConfig, ScalarTable};
use crate::error::{GeneratorError, Warning};
use crate::introspection::{Kind, Schema};
use crate::ir::{EntityModel, FieldDef, Role, TypeDef};
use crate::typechain::{build_field, build_input_value};

/// Build and classify the entity model of a schema
pub fn build_model(
    schema: &Schema,
    warnings: Vec<Warning>,
    config: &GeneratorConfig,
) -> Result<EntityModel, GeneratorError> {
    let mut model = EntityModel {
        query_name: schema.query_type_name.clone(),
        mutation_name: schema.mutation_type_name.clone(),
        warnings,
        ..Default::default()
    };

    for ty in &schema.types {
        if ty.name.starts_with('_') {
            continue;
        }
        // Table scalars map onto target types and need no declaration
        if ty.kind == Kind::Scalar && config.scalars.contains(&ty.name) {
            continue;
        }

        let fields = if ty.kind == Kind::InputObject {
            ty.input_fields
                .iter()
                .map(|iv| build_input_value(iv, &ty.name, config))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            ty.fields(true)
                .map(|f| build_field(f, &ty.name, config))
                .collect::<Result<Vec<_>, _>>()?
        };

        model.types.push(TypeDef {
            name: ty.name.clone(),
            kind: ty.kind,
            description: ty.description.clone(),
            role: Role::from_kind(ty.kind),
            fields,
            extra_fields: Vec::new(),
            interfaces: ty.interfaces.iter().cloned().collect(),
            possible_types: ty.possible_types.clone(),
            enum_values: ty.enum_values.clone(),
        });
    }

    for warning in &model.warnings {
        tracing::warn!(%warning, "schema definition skipped");
    }

    classify(&mut model, config);
    Ok(model)
}

/// Assign object roles, index models and payloads, partition model fields
pub fn classify(model: &mut EntityModel, config: &GeneratorConfig) {
    let EntityModel {
        types,
        models,
        payloads,
        query_name,
        mutation_name,
        ..
    } = model;

    models.clear();
    payloads.clear();

    for (index, ty) in types.iter_mut().enumerate() {
        if ty.kind != Kind::Object {
            continue;
        }

        ty.role = if query_name.as_deref() == Some(ty.name.as_str()) {
            Role::Query
        } else if mutation_name.as_deref() == Some(ty.name.as_str()) {
            Role::Mutation
        } else if ty.name.ends_with(&config.payload_suffix) {
            payloads.insert(ty.name.clone(), index);
            Role::Payload
        } else if ty.interfaces.contains(&config.node_interface) {
            models.insert(ty.name.clone(), index);
            partition_fields(ty, &config.scalars);
            Role::Model
        } else {
            Role::Object
        };

        tracing::debug!(name = %ty.name, role = ty.role.as_str(), "classified type");
    }
}

/// Move relation fields of a Model into `extra_fields`
fn partition_fields(ty: &mut TypeDef, scalars: &ScalarTable) {
    // Re-classifying must not lose relations moved on a previous pass
    let mut all = std::mem::take(&mut ty.fields);
    all.append(&mut ty.extra_fields);

    let (fields, extra): (Vec<FieldDef>, Vec<FieldDef>) = all
        .into_iter()
        .map(|mut f| {
            f.is_user_defined = false;
            f
        })
        .partition(|f| is_primitive_field(f, scalars));

    ty.fields = fields;
    ty.extra_fields = extra
        .into_iter()
        .map(|mut f| {
            f.is_user_defined = true;
            f
        })
        .collect();
}

/// Whether a Model field can be resolved without hand-written code
///
/// ID and time fields are not bare primitives but are safe to generate.
pub fn is_primitive_field(field: &FieldDef, scalars: &ScalarTable) -> bool {
    let ty = &field.ty;
    if scalars.is_native(&ty.native_name) {
        return true;
    }
    !ty.is_list() && (scalars.is_id(&ty.wire_name) || scalars.is_time(&ty.wire_name))
}
