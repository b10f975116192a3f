//! Type rendering
//!
//! Turns a [`Typ`] chain into a target type expression for one of the five
//! contexts a type appears in. The result is a small tree; printing it is
//! left to a [`Printer`](crate::backends::Printer).

pub mod policy;
pub mod resolver;

use crate::config::ScalarTable;
use crate::ir::Typ;
use policy::FieldRule;

/// Context a type expression is rendered for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Field of a stored struct
    Struct,
    /// Field of a generated argument struct
    ArgStruct,
    /// Return type of a generated resolver method
    ResolverReturn,
    /// Method of a generated interface
    InterfaceMethod,
    /// Method of the query or mutation entry point
    QueryEntry,
}

impl Mode {
    /// Whether terminal primitives use their native name
    fn prefers_native(self) -> bool {
        matches!(self, Mode::Struct | Mode::ArgStruct)
    }
}

/// A rendered target type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// A named type
    Named(String),
    /// A pointer/reference to a type
    Indirect(Box<TypeExpr>),
    /// A sequence of a type
    Seq(Box<TypeExpr>),
}

impl TypeExpr {
    pub fn named(name: impl Into<String>) -> Self {
        TypeExpr::Named(name.into())
    }

    pub fn indirect(self) -> Self {
        TypeExpr::Indirect(Box::new(self))
    }

    pub fn seq(self) -> Self {
        TypeExpr::Seq(Box::new(self))
    }

    pub fn is_indirect(&self) -> bool {
        matches!(self, TypeExpr::Indirect(_))
    }

    /// The expression without its outermost indirection
    pub fn pointee(&self) -> &TypeExpr {
        match self {
            TypeExpr::Indirect(inner) => inner,
            other => other,
        }
    }
}

/// Render a chain for `mode`
///
/// `field_name` is the schema name of the field owning the chain; it
/// selects the pagination policies.
pub fn render(typ: &Typ, mode: Mode, field_name: &str, scalars: &ScalarTable) -> TypeExpr {
    let rule = policy::rule(None, field_name);
    render_node(typ, mode, rule, scalars)
}

fn render_node(
    typ: &Typ,
    mode: Mode,
    rule: Option<FieldRule>,
    scalars: &ScalarTable,
) -> TypeExpr {
    let primitive = scalars.is_native(&typ.native_name);

    let mut expr = match &typ.element {
        Some(element) => render_node(element, mode, rule, scalars).seq(),
        None if mode.prefers_native() && primitive => TypeExpr::named(&typ.native_name),
        None => TypeExpr::named(&typ.wire_name),
    };

    let indirect = match mode {
        Mode::Struct => typ.is_nullable && !typ.is_list() && !primitive,
        _ => typ.is_nullable,
    };
    if indirect {
        expr = expr.indirect();
    }

    match rule {
        Some(FieldRule::PageInfo)
            if !typ.is_list()
                && matches!(mode, Mode::Struct | Mode::ResolverReturn)
                && !expr.is_indirect() =>
        {
            expr.indirect()
        }
        Some(FieldRule::PaginationEdges) if typ.is_list() && mode == Mode::Struct => {
            expr.indirect()
        }
        _ => expr,
    }
}

/// Target-side member name of a schema field
///
/// The first letter is upper-cased; every spelling of `id` becomes `ID`.
pub fn exported_name(name: &str) -> String {
    if name.eq_ignore_ascii_case("id") {
        return "ID".to_string();
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::{Printer, go::GoPrinter};

    fn string(nullable: bool) -> Typ {
        Typ {
            is_nullable: nullable,
            ..Typ::leaf("string", "string")
        }
    }

    fn list_of(element: Typ, nullable: bool) -> Typ {
        Typ {
            native_name: "[]".to_string(),
            wire_name: "[]".to_string(),
            is_nullable: nullable,
            element: Some(Box::new(element)),
        }
    }

    fn object(name: &str, nullable: bool) -> Typ {
        Typ {
            is_nullable: nullable,
            ..Typ::leaf(name, format!("{name}Resolver"))
        }
    }

    fn go(typ: &Typ, mode: Mode, field: &str) -> String {
        GoPrinter.type_expr(&render(typ, mode, field, &ScalarTable::default()))
    }

    #[test]
    fn test_non_null_list_of_non_null_primitive() {
        let typ = list_of(string(false), false);
        assert_eq!(go(&typ, Mode::Struct, "tags"), "[]string");
        assert_eq!(go(&typ, Mode::ResolverReturn, "tags"), "[]string");
    }

    #[test]
    fn test_nullable_list_of_nullable_primitive() {
        let typ = list_of(string(true), true);
        assert_eq!(go(&typ, Mode::ResolverReturn, "tags"), "*[]*string");
        assert_eq!(go(&typ, Mode::InterfaceMethod, "tags"), "*[]*string");
        // Struct lists and primitives stay inline
        assert_eq!(go(&typ, Mode::Struct, "tags"), "[]string");
    }

    #[test]
    fn test_struct_mode_indirects_nullable_non_primitives() {
        let id = Typ::leaf("graphql.ID", "graphql.ID");
        assert_eq!(go(&id, Mode::Struct, "ownerId"), "*graphql.ID");
        assert_eq!(go(&object("Post", true), Mode::Struct, "post"), "*PostResolver");
        assert_eq!(go(&object("Post", false), Mode::Struct, "post"), "PostResolver");
    }

    #[test]
    fn test_only_primitives_use_native_names() {
        let typ = list_of(object("Post", false), false);
        assert_eq!(go(&typ, Mode::ResolverReturn, "posts"), "[]PostResolver");
        assert_eq!(go(&typ, Mode::QueryEntry, "posts"), "[]PostResolver");
        assert_eq!(go(&typ, Mode::Struct, "posts"), "[]PostResolver");

        let input = Typ::leaf("CreatePostInput", "CreatePostInput");
        assert_eq!(go(&input, Mode::ArgStruct, "input"), "*CreatePostInput");
    }

    #[test]
    fn test_enum_renders_native_in_structs() {
        let status = Typ::leaf("string", "Status");
        assert_eq!(go(&status, Mode::Struct, "status"), "string");
        assert_eq!(go(&status, Mode::ResolverReturn, "status"), "*Status");
    }

    #[test]
    fn test_arg_struct_indirects_every_nullable_level() {
        let first = Typ::leaf("int32", "int32");
        assert_eq!(go(&first, Mode::ArgStruct, "first"), "*int32");

        let ids = list_of(Typ::leaf("graphql.ID", "graphql.ID"), true);
        assert_eq!(go(&ids, Mode::ArgStruct, "ids"), "*[]*graphql.ID");
    }

    #[test]
    fn test_page_info_is_always_indirect() {
        let required = object("PageInfo", false);
        assert_eq!(go(&required, Mode::Struct, "pageInfo"), "*PageInfoResolver");
        assert_eq!(
            go(&required, Mode::ResolverReturn, "pageInfo"),
            "*PageInfoResolver"
        );

        let optional = object("PageInfo", true);
        assert_eq!(
            go(&optional, Mode::ResolverReturn, "pageInfo"),
            "*PageInfoResolver"
        );

        // Only stored and returned values are forced
        assert_eq!(
            go(&required, Mode::InterfaceMethod, "pageInfo"),
            "PageInfoResolver"
        );
    }

    #[test]
    fn test_edges_struct_list_is_indirect() {
        let typ = list_of(object("UserEdge", true), false);
        assert_eq!(go(&typ, Mode::Struct, "edges"), "*[]*UserEdgeResolver");
        assert_eq!(
            go(&typ, Mode::ResolverReturn, "edges"),
            "[]*UserEdgeResolver"
        );

        let nested = list_of(list_of(object("UserEdge", false), false), false);
        assert_eq!(go(&nested, Mode::Struct, "edges"), "*[]*[]UserEdgeResolver");
    }

    #[test]
    fn test_schema_reference_through_chain_and_renderer() {
        use crate::config::GeneratorConfig;
        use crate::introspection::{Kind, TypeRef};
        use crate::typechain;

        let config = GeneratorConfig::default();
        let string = || TypeRef::named("String", Kind::Scalar);
        let struct_of = |ty: TypeRef| {
            let typ = typechain::build(&ty, &config, "Post", "tags").unwrap();
            GoPrinter.type_expr(&render(&typ, Mode::Struct, "tags", &config.scalars))
        };

        assert_eq!(struct_of(string().non_null().list().non_null()), "[]string");
        assert_eq!(struct_of(string().list()), "[]string");
        assert_eq!(struct_of(TypeRef::named("ID", Kind::Scalar)), "*graphql.ID");
        assert_eq!(
            struct_of(TypeRef::named("Post", Kind::Object).list().list()),
            "[][]*PostResolver"
        );
    }

    #[test]
    fn test_exported_name() {
        assert_eq!(exported_name("id"), "ID");
        assert_eq!(exported_name("Id"), "ID");
        assert_eq!(exported_name("createdAt"), "CreatedAt");
        assert_eq!(exported_name("endCursor"), "EndCursor");
        assert_eq!(exported_name(""), "");
    }
}
