//! Intermediate Representation (IR) for code generation
//!
//! The entity model of one schema: a [`TypeDef`] per emitted schema type,
//! a [`FieldDef`] per field or argument and a [`Typ`] chain per type
//! reference. Built and classified once, then only read by the renderer
//! and the emission driver.

use crate::error::Warning;
use crate::introspection::{EnumValue, Kind};
use indexmap::{IndexMap, IndexSet};

/// Name carried by list nodes of a type chain
pub const LIST_MARKER: &str = "[]";

/// One node of a linearized type chain
///
/// A chain has exactly one terminal node (`element == None`) and zero or
/// more list nodes above it. Nullability is independent at every depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Typ {
    /// Type stored in generated structs
    pub native_name: String,

    /// Type returned by generated resolvers
    pub wire_name: String,

    /// Whether this level may be null
    pub is_nullable: bool,

    /// Element type, present iff this node is a list
    pub element: Option<Box<Typ>>,
}

impl Typ {
    /// A nullable terminal node
    pub fn leaf(native_name: impl Into<String>, wire_name: impl Into<String>) -> Self {
        Self {
            native_name: native_name.into(),
            wire_name: wire_name.into(),
            is_nullable: true,
            element: None,
        }
    }

    pub fn is_list(&self) -> bool {
        self.element.is_some()
    }

    /// The terminal node of the chain
    pub fn terminal(&self) -> &Typ {
        let mut node = self;
        while let Some(element) = &node.element {
            node = element;
        }
        node
    }
}

/// A field of a type, or an argument of a field
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// Schema field name
    pub name: String,

    /// Name of the type declaring the field
    pub owner: String,

    /// Schema description
    pub description: Option<String>,

    /// Head of the owned type chain
    pub ty: Typ,

    /// Schema spelling of the type (`[String!]!`)
    pub schema_type: String,

    /// Arguments in declaration order; arguments never have arguments
    pub arguments: Vec<FieldDef>,

    /// Set by the classifier on relation fields of Models
    pub is_user_defined: bool,

    /// `@deprecated` reason
    pub deprecation_reason: Option<String>,
}

/// Role of a type in generated code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Query,
    Mutation,
    /// Plain object, including connection/edge/pageInfo types
    Object,
    /// Object implementing the identity-node interface
    Model,
    /// Mutation payload object
    Payload,
    Interface,
    Union,
    Enum,
    Input,
    Scalar,
}

impl Role {
    /// Initial role from the kind, before classification
    pub fn from_kind(kind: Kind) -> Self {
        match kind {
            Kind::Object | Kind::List | Kind::NonNull => Role::Object,
            Kind::Interface => Role::Interface,
            Kind::Union => Role::Union,
            Kind::Enum => Role::Enum,
            Kind::InputObject => Role::Input,
            Kind::Scalar => Role::Scalar,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Query => "QUERY",
            Role::Mutation => "MUTATION",
            Role::Object => "OBJECT",
            Role::Model => "MODEL",
            Role::Payload => "PAYLOAD",
            Role::Interface => "INTERFACE",
            Role::Union => "UNION",
            Role::Enum => "ENUM",
            Role::Input => "INPUT",
            Role::Scalar => "SCALAR",
        }
    }
}

/// One emitted schema type
#[derive(Debug, Clone)]
pub struct TypeDef {
    /// Schema type name
    pub name: String,

    /// Introspection kind
    pub kind: Kind,

    /// Schema description
    pub description: Option<String>,

    /// Role, final after classification
    pub role: Role,

    /// Fields (input fields for inputs) in declaration order
    pub fields: Vec<FieldDef>,

    /// Relation fields moved out of a Model's fields
    pub extra_fields: Vec<FieldDef>,

    /// Implemented interfaces
    pub interfaces: IndexSet<String>,

    /// Union members
    pub possible_types: Vec<String>,

    /// Enum values
    pub enum_values: Vec<EnumValue>,
}

impl TypeDef {
    pub fn is_query(&self) -> bool {
        self.role == Role::Query
    }

    pub fn is_mutation(&self) -> bool {
        self.role == Role::Mutation
    }

    pub fn is_model(&self) -> bool {
        self.role == Role::Model
    }

    pub fn is_payload(&self) -> bool {
        self.role == Role::Payload
    }

    /// Whether the type is an entry point (query or mutation root)
    pub fn is_entry_point(&self) -> bool {
        self.is_query() || self.is_mutation()
    }
}

/// The entity model of one generation run
#[derive(Debug, Default)]
pub struct EntityModel {
    /// Types in schema declaration order
    pub types: Vec<TypeDef>,

    /// Model name -> index into `types`, in insertion order
    pub models: IndexMap<String, usize>,

    /// Payload name -> index into `types`, in insertion order
    pub payloads: IndexMap<String, usize>,

    /// Query root type name
    pub query_name: Option<String>,

    /// Mutation root type name
    pub mutation_name: Option<String>,

    /// Definitions skipped while building the model
    pub warnings: Vec<Warning>,
}

impl EntityModel {
    /// Look up a type by name
    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Whether the generated code needs a root `Resolver`
    pub fn has_entry_points(&self) -> bool {
        self.types.iter().any(TypeDef::is_entry_point)
    }
}
