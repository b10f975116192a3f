//! Generator configuration
//!
//! One [`GeneratorConfig`] is built per run and passed by reference to every
//! stage. The defaults describe a graph-gophers/graphql-go server; a TOML file
//! can override individual keys and add scalar mappings.

use crate::error::GeneratorError;
use indexmap::{IndexMap, IndexSet};
use serde::Deserialize;
use std::path::Path;

/// How one schema scalar maps onto the target language
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScalarMapping {
    /// Type stored in generated structs
    pub native: String,
    /// Type returned by generated resolvers
    pub wire: String,
}

impl ScalarMapping {
    fn new(native: &str, wire: &str) -> Self {
        Self {
            native: native.to_string(),
            wire: wire.to_string(),
        }
    }
}

/// The scalar/primitive table
#[derive(Debug, Clone)]
pub struct ScalarTable {
    /// Wire type of the opaque global identifier
    pub id_type: String,
    /// Wire type of the time wrapper
    pub time_type: String,
    /// Function combining a type name and a raw id into a global id
    pub global_id_encoder: String,
    /// Field of the time wrapper holding the raw time value
    pub time_field: String,
    /// Native type of enum values
    pub enum_native: String,
    mappings: IndexMap<String, ScalarMapping>,
    natives: IndexSet<String>,
}

impl Default for ScalarTable {
    fn default() -> Self {
        let mappings = [
            ("String", ScalarMapping::new("string", "string")),
            ("Int", ScalarMapping::new("int32", "int32")),
            ("Float", ScalarMapping::new("float64", "float64")),
            ("Boolean", ScalarMapping::new("bool", "bool")),
            ("ID", ScalarMapping::new("graphql.ID", "graphql.ID")),
            ("Time", ScalarMapping::new("graphql.Time", "graphql.Time")),
        ]
        .into_iter()
        .map(|(name, mapping)| (name.to_string(), mapping))
        .collect();

        let natives = ["string", "int32", "float64", "bool"]
            .into_iter()
            .map(String::from)
            .collect();

        Self {
            id_type: "graphql.ID".to_string(),
            time_type: "graphql.Time".to_string(),
            global_id_encoder: "relay.ToGlobalID".to_string(),
            time_field: "Time".to_string(),
            enum_native: "string".to_string(),
            mappings,
            natives,
        }
    }
}

impl ScalarTable {
    /// Mapping for a schema scalar name
    pub fn lookup(&self, schema_name: &str) -> Option<&ScalarMapping> {
        self.mappings.get(schema_name)
    }

    /// Whether a schema scalar name is handled by the table
    pub fn contains(&self, schema_name: &str) -> bool {
        self.mappings.contains_key(schema_name)
    }

    /// Whether a target type name is already a plain target-native type
    pub fn is_native(&self, type_name: &str) -> bool {
        self.natives.contains(type_name)
    }

    /// Whether a wire type is the opaque global identifier
    pub fn is_id(&self, wire_name: &str) -> bool {
        wire_name == self.id_type
    }

    /// Whether a wire type is the time wrapper
    pub fn is_time(&self, wire_name: &str) -> bool {
        wire_name == self.time_type
    }

    /// Add or replace a scalar mapping
    pub fn insert(&mut self, schema_name: impl Into<String>, mapping: ScalarMapping) {
        self.mappings.insert(schema_name.into(), mapping);
    }

    /// Mark a target type as native
    pub fn add_native(&mut self, type_name: impl Into<String>) {
        self.natives.insert(type_name.into());
    }
}

/// The complete configuration of one generation run
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Go package clause of every generated file
    pub package: String,
    /// Interface marking identity-node (Model) types
    pub node_interface: String,
    /// Name suffix marking mutation payload types
    pub payload_suffix: String,
    /// Name suffix of generated accessor types
    pub resolver_suffix: String,
    /// Scalar/primitive table
    pub scalars: ScalarTable,
    /// Package qualifier -> import path, imported by files that use it
    pub imports: IndexMap<String, String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            package: "resolvers".to_string(),
            node_interface: "Node".to_string(),
            payload_suffix: "Payload".to_string(),
            resolver_suffix: "Resolver".to_string(),
            scalars: ScalarTable::default(),
            imports: [
                ("fmt", "fmt"),
                ("graphql", "github.com/graph-gophers/graphql-go"),
                ("relay", "github.com/graph-gophers/graphql-go/relay"),
            ]
            .into_iter()
            .map(|(qualifier, path)| (qualifier.to_string(), path.to_string()))
            .collect(),
        }
    }
}

impl GeneratorConfig {
    /// Name of the generated accessor type wrapping a schema type
    pub fn wrapper_name(&self, type_name: &str) -> String {
        format!("{}{}", type_name, self.resolver_suffix)
    }

    /// Parse a TOML document, applying it on top of the defaults
    pub fn from_toml_str(text: &str) -> Result<Self, GeneratorError> {
        let file: ConfigFile =
            toml::from_str(text).map_err(|e| GeneratorError::Config(e.to_string()))?;
        let mut config = Self::default();
        file.apply(&mut config);
        Ok(config)
    }

    /// Load a TOML configuration file
    pub fn load(path: &Path) -> Result<Self, GeneratorError> {
        let text = std::fs::read_to_string(path).map_err(|e| GeneratorError::io(path, e))?;
        Self::from_toml_str(&text)
    }
}

/// On-disk form; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    package: Option<String>,
    node_interface: Option<String>,
    payload_suffix: Option<String>,
    resolver_suffix: Option<String>,
    scalars: Option<ScalarOverrides>,
    #[serde(default)]
    imports: IndexMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScalarOverrides {
    id_type: Option<String>,
    time_type: Option<String>,
    global_id_encoder: Option<String>,
    time_field: Option<String>,
    #[serde(default)]
    mappings: IndexMap<String, ScalarMapping>,
    #[serde(default)]
    natives: Vec<String>,
}

impl ConfigFile {
    fn apply(self, config: &mut GeneratorConfig) {
        if let Some(package) = self.package {
            config.package = package;
        }
        if let Some(node_interface) = self.node_interface {
            config.node_interface = node_interface;
        }
        if let Some(payload_suffix) = self.payload_suffix {
            config.payload_suffix = payload_suffix;
        }
        if let Some(resolver_suffix) = self.resolver_suffix {
            config.resolver_suffix = resolver_suffix;
        }
        config.imports.extend(self.imports);

        let Some(scalars) = self.scalars else {
            return;
        };
        let table = &mut config.scalars;
        if let Some(id_type) = scalars.id_type {
            table.id_type = id_type;
        }
        if let Some(time_type) = scalars.time_type {
            table.time_type = time_type;
        }
        if let Some(encoder) = scalars.global_id_encoder {
            table.global_id_encoder = encoder;
        }
        if let Some(time_field) = scalars.time_field {
            table.time_field = time_field;
        }
        for (name, mapping) in scalars.mappings {
            table.insert(name, mapping);
        }
        for native in scalars.natives {
            table.add_native(native);
        }
    }
}
