//! Introspected schema
//!
//! The shape the generator consumes: every named type with its kind,
//! fields, input fields, interfaces, possible types and enum values, plus
//! the query/mutation root names. Type references keep their NON_NULL/LIST
//! wrapping and are resolved to the kind of their named leaf.

use std::fmt;

/// The `__TypeKind` of a type or type reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

impl Kind {
    /// Introspection spelling (`INPUT_OBJECT`, `NON_NULL`, ...)
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Scalar => "SCALAR",
            Kind::Object => "OBJECT",
            Kind::Interface => "INTERFACE",
            Kind::Union => "UNION",
            Kind::Enum => "ENUM",
            Kind::InputObject => "INPUT_OBJECT",
            Kind::List => "LIST",
            Kind::NonNull => "NON_NULL",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference to a type, as written on a field or argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// `T!`
    NonNull(Box<TypeRef>),
    /// `[T]`
    List(Box<TypeRef>),
    /// A named type; `kind` is `None` when the name is not declared
    Named { name: String, kind: Option<Kind> },
}

impl TypeRef {
    /// Named reference of a known kind
    pub fn named(name: impl Into<String>, kind: Kind) -> Self {
        TypeRef::Named {
            name: name.into(),
            kind: Some(kind),
        }
    }

    /// `Some(NON_NULL)`, `Some(LIST)`, or the leaf's declared kind
    pub fn kind(&self) -> Option<Kind> {
        match self {
            TypeRef::NonNull(_) => Some(Kind::NonNull),
            TypeRef::List(_) => Some(Kind::List),
            TypeRef::Named { kind, .. } => *kind,
        }
    }

    /// Wrap in `!`
    pub fn non_null(self) -> Self {
        TypeRef::NonNull(Box::new(self))
    }

    /// Wrap in `[...]`
    pub fn list(self) -> Self {
        TypeRef::List(Box::new(self))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::NonNull(inner) => write!(f, "{inner}!"),
            TypeRef::List(inner) => write!(f, "[{inner}]"),
            TypeRef::Named { name, .. } => f.write_str(name),
        }
    }
}

/// An argument or input field
#[derive(Debug, Clone)]
pub struct InputValue {
    pub name: String,
    pub description: Option<String>,
    pub ty: TypeRef,
}

/// A field of an object or interface
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub description: Option<String>,
    pub ty: TypeRef,
    pub args: Vec<InputValue>,
    pub is_deprecated: bool,
    pub deprecation_reason: Option<String>,
}

/// An enum value
#[derive(Debug, Clone)]
pub struct EnumValue {
    pub name: String,
    pub description: Option<String>,
    pub is_deprecated: bool,
}

/// A named schema type
#[derive(Debug, Clone)]
pub struct SchemaType {
    pub kind: Kind,
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<Field>,
    pub input_fields: Vec<InputValue>,
    pub interfaces: Vec<String>,
    pub possible_types: Vec<String>,
    pub enum_values: Vec<EnumValue>,
}

impl SchemaType {
    /// An empty type of the given kind
    pub fn new(kind: Kind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            description: None,
            fields: Vec::new(),
            input_fields: Vec::new(),
            interfaces: Vec::new(),
            possible_types: Vec::new(),
            enum_values: Vec::new(),
        }
    }

    /// Fields, optionally without the deprecated ones
    pub fn fields(&self, include_deprecated: bool) -> impl Iterator<Item = &Field> {
        self.fields
            .iter()
            .filter(move |f| include_deprecated || !f.is_deprecated)
    }
}

/// A whole introspected schema, types in declaration order
#[derive(Debug, Clone, Default)]
pub struct Schema {
    pub query_type_name: Option<String>,
    pub mutation_type_name: Option<String>,
    pub types: Vec<SchemaType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_ref_accessors() {
        let ty = TypeRef::named("String", Kind::Scalar).non_null().list().non_null();

        assert_eq!(ty.kind(), Some(Kind::NonNull));
        assert_eq!(ty.to_string(), "[String!]!");
    }

    #[test]
    fn test_undeclared_leaf_has_no_kind() {
        let ty = TypeRef::Named {
            name: "Missing".to_string(),
            kind: None,
        };
        assert_eq!(ty.kind(), None);
        assert_eq!(ty.to_string(), "Missing");
    }

    #[test]
    fn test_fields_without_deprecated() {
        let mut ty = SchemaType::new(Kind::Object, "User");
        for (name, is_deprecated) in [("name", false), ("login", true)] {
            ty.fields.push(Field {
                name: name.to_string(),
                description: None,
                ty: TypeRef::named("String", Kind::Scalar),
                args: Vec::new(),
                is_deprecated,
                deprecation_reason: None,
            });
        }

        assert_eq!(ty.fields(true).count(), 2);
        let current: Vec<_> = ty.fields(false).map(|f| f.name.as_str()).collect();
        assert_eq!(current, vec!["name"]);
    }
}
