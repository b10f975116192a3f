//! Resolver method generation
//!
//! Builds the signature and body of the accessor method generated for one
//! field. Bodies are a short list of [`Stmt`]s over a small expression tree;
//! the statements are target-neutral and printed by a backend.

use super::policy::{self, FieldRule};
use super::{Mode, TypeExpr, render};
use crate::config::{GeneratorConfig, ScalarTable};
use crate::ir::FieldDef;

/// Value expression of a resolver body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Member `field` of the receiver's embedded `owner` value
    Stored { owner: String, field: String },
    /// A local bound by [`Stmt::Bind`]
    Var(String),
    /// Address of a value
    Ref(Box<Expr>),
    /// Value behind a reference
    Deref(Box<Expr>),
    /// Function call
    Call { function: String, args: Vec<Expr> },
    /// Type conversion
    Convert { ty: String, value: Box<Expr> },
    /// Composite literal; a `None` key is a positional element
    Composite {
        ty: TypeExpr,
        fields: Vec<(Option<String>, Expr)>,
    },
    /// String literal
    Str(String),
    /// Absent value of a nullable return
    Nil,
}

impl Expr {
    pub fn stored(owner: &str, field: &str) -> Self {
        Expr::Stored {
            owner: owner.to_string(),
            field: field.to_string(),
        }
    }

    pub fn reference(self) -> Self {
        Expr::Ref(Box::new(self))
    }

    pub fn deref(self) -> Self {
        Expr::Deref(Box::new(self))
    }

    /// An empty composite literal of `ty`
    pub fn empty(ty: TypeExpr) -> Self {
        Expr::Composite {
            ty,
            fields: Vec::new(),
        }
    }
}

/// Guard condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cond {
    /// String value is empty
    IsEmpty(Expr),
    /// Reference is unset
    IsUnset(Expr),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// Early return when `cond` holds
    Guard { cond: Cond, ret: Expr },
    /// Bind a local
    Bind { name: String, value: Expr },
    Return(Expr),
}

/// One method parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: TypeExpr,
}

/// How a method receives the field arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Args {
    None,
    /// Anonymous struct of arguments
    Inline(Vec<Param>),
    /// Named argument struct type
    Named(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Schema field name
    pub name: String,
    pub args: Args,
    pub returns: TypeExpr,
}

/// A generated accessor method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    /// Receiver type name
    pub receiver: String,
    pub signature: Signature,
    pub body: Vec<Stmt>,
}

/// Field arguments as an anonymous struct
pub fn inline_args(field: &FieldDef, scalars: &ScalarTable) -> Args {
    if field.arguments.is_empty() {
        return Args::None;
    }
    Args::Inline(
        field
            .arguments
            .iter()
            .map(|arg| Param {
                name: arg.name.clone(),
                ty: render(&arg.ty, Mode::ArgStruct, &arg.name, scalars),
            })
            .collect(),
    )
}

/// Method signature of a field rendered for `mode`
pub fn signature(field: &FieldDef, mode: Mode, args: Args, scalars: &ScalarTable) -> Signature {
    Signature {
        name: field.name.clone(),
        args,
        returns: render(&field.ty, mode, &field.name, scalars),
    }
}

/// Full accessor method of a field
pub fn method(field: &FieldDef, owner_is_model: bool, config: &GeneratorConfig) -> Method {
    let args = inline_args(field, &config.scalars);
    Method {
        receiver: config.wrapper_name(&field.owner),
        signature: signature(field, Mode::ResolverReturn, args, &config.scalars),
        body: generate(field, owner_is_model, config),
    }
}

/// Body of the accessor method of a field
pub fn generate(field: &FieldDef, owner_is_model: bool, config: &GeneratorConfig) -> Vec<Stmt> {
    if owner_is_model {
        model_body(field, config)
    } else {
        passthrough_body(field, &config.scalars)
    }
}

/// Non-Model owners return the stored value, with pagination guards
///
/// Identifiers are returned raw here; only Model owners encode global ids.
fn passthrough_body(field: &FieldDef, scalars: &ScalarTable) -> Vec<Stmt> {
    let stored = Expr::stored(&field.owner, &field.name);

    match policy::rule(Some(&field.owner), &field.name) {
        Some(FieldRule::PaginationEdges) if field.ty.is_list() => {
            // Stored edges are always behind a reference
            let returns = render(&field.ty, Mode::ResolverReturn, &field.name, scalars);
            let empty = Expr::empty(returns.pointee().clone());
            let (sentinel, value) = if returns.is_indirect() {
                (empty.reference(), stored.clone())
            } else {
                (empty, stored.clone().deref())
            };
            vec![
                Stmt::Guard {
                    cond: Cond::IsUnset(stored),
                    ret: sentinel,
                },
                Stmt::Return(value),
            ]
        }
        Some(FieldRule::PageInfo) => {
            let terminal = field.ty.terminal();
            let zero = Expr::Composite {
                ty: TypeExpr::named(&terminal.wire_name),
                fields: vec![(None, Expr::empty(TypeExpr::named(&terminal.native_name)))],
            };
            vec![
                Stmt::Guard {
                    cond: Cond::IsUnset(stored.clone()),
                    ret: zero.reference(),
                },
                Stmt::Return(stored),
            ]
        }
        Some(FieldRule::CursorByReference) => vec![Stmt::Return(stored.reference())],
        _ => vec![Stmt::Return(stored)],
    }
}

fn model_body(field: &FieldDef, config: &GeneratorConfig) -> Vec<Stmt> {
    let scalars = &config.scalars;
    let ty = &field.ty;
    let stored = Expr::stored(&field.owner, &field.name);
    let nullable = ty.is_nullable;

    if ty.is_list() {
        return vec![Stmt::Return(address_if(nullable, stored))];
    }

    if scalars.is_id(&ty.wire_name) {
        let encoded = Expr::Call {
            function: scalars.global_id_encoder.clone(),
            args: vec![Expr::Str(field.owner.clone()), stored.clone()],
        };
        // An unset nullable id resolves to null rather than an empty id
        let unset = if nullable {
            Expr::Nil
        } else {
            Expr::Convert {
                ty: scalars.id_type.clone(),
                value: Box::new(Expr::Str(String::new())),
            }
        };
        let mut body = vec![Stmt::Guard {
            cond: Cond::IsEmpty(stored),
            ret: unset,
        }];
        body.extend(by_reference_if(nullable, "id", encoded));
        return body;
    }

    if scalars.is_time(&ty.wire_name) {
        let raw = if nullable { stored.deref() } else { stored };
        let wrapped = Expr::Composite {
            ty: TypeExpr::named(&scalars.time_type),
            fields: vec![(Some(scalars.time_field.clone()), raw)],
        };
        return vec![Stmt::Return(address_if(nullable, wrapped))];
    }

    if scalars.is_native(&ty.wire_name) {
        return vec![Stmt::Return(address_if(nullable, stored))];
    }

    // Enum values are stored natively and converted to the schema type
    if scalars.is_native(&ty.native_name) {
        let converted = Expr::Convert {
            ty: ty.wire_name.clone(),
            value: Box::new(stored),
        };
        return by_reference_if(nullable, "value", converted);
    }

    let inner = if nullable { stored } else { stored.reference() };
    let wrapped = Expr::Composite {
        ty: TypeExpr::named(&ty.wire_name),
        fields: vec![(None, inner)],
    };
    vec![Stmt::Return(address_if(nullable, wrapped))]
}

fn address_if(nullable: bool, expr: Expr) -> Expr {
    if nullable { expr.reference() } else { expr }
}

/// Return a value that is not addressable, through a local when nullable
fn by_reference_if(nullable: bool, local: &str, value: Expr) -> Vec<Stmt> {
    if !nullable {
        return vec![Stmt::Return(value)];
    }
    vec![
        Stmt::Bind {
            name: local.to_string(),
            value,
        },
        Stmt::Return(Expr::Var(local.to_string()).reference()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::{Printer, go::GoPrinter};
    use crate::ir::Typ;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn field(owner: &str, name: &str, ty: Typ) -> FieldDef {
        FieldDef {
            name: name.to_string(),
            owner: owner.to_string(),
            description: None,
            ty,
            schema_type: String::new(),
            arguments: Vec::new(),
            is_user_defined: false,
            deprecation_reason: None,
        }
    }

    fn required(mut typ: Typ) -> Typ {
        typ.is_nullable = false;
        typ
    }

    fn body(field: &FieldDef, owner_is_model: bool) -> String {
        GoPrinter.body(&generate(field, owner_is_model, &GeneratorConfig::default()))
    }

    #[test]
    fn test_model_id_is_guarded_and_encoded() {
        let id = field("User", "id", required(Typ::leaf("graphql.ID", "graphql.ID")));
        assert_eq!(
            body(&id, true),
            indoc! {r#"
                if r.User.ID == "" {
                	return graphql.ID("")
                }

                return relay.ToGlobalID("User", r.User.ID)
            "#}
        );
    }

    #[test]
    fn test_nullable_model_id_returns_nil_or_reference() {
        let owner = field("User", "ownerId", Typ::leaf("graphql.ID", "graphql.ID"));
        assert_eq!(
            body(&owner, true),
            indoc! {r#"
                if r.User.OwnerId == "" {
                	return nil
                }

                id := relay.ToGlobalID("User", r.User.OwnerId)
                return &id
            "#}
        );
    }

    #[test]
    fn test_model_id_guard_precedes_encoding() {
        let id = field("User", "id", required(Typ::leaf("graphql.ID", "graphql.ID")));
        let stmts = generate(&id, true, &GeneratorConfig::default());

        assert_eq!(
            stmts[0],
            Stmt::Guard {
                cond: Cond::IsEmpty(Expr::stored("User", "id")),
                ret: Expr::Convert {
                    ty: "graphql.ID".to_string(),
                    value: Box::new(Expr::Str(String::new())),
                },
            }
        );
        let Stmt::Return(Expr::Call { function, args }) = &stmts[1] else {
            panic!("expected an encoded return, got {:?}", stmts[1]);
        };
        assert_eq!(function, "relay.ToGlobalID");
        assert_eq!(args[0], Expr::Str("User".to_string()));
    }

    #[test]
    fn test_model_time_wraps_raw_value() {
        let created = field("User", "createdAt", Typ::leaf("graphql.Time", "graphql.Time"));
        assert_eq!(
            body(&created, true),
            "return &graphql.Time{Time: *r.User.CreatedAt}\n"
        );

        let updated = field(
            "User",
            "updatedAt",
            required(Typ::leaf("graphql.Time", "graphql.Time")),
        );
        assert_eq!(
            body(&updated, true),
            "return graphql.Time{Time: r.User.UpdatedAt}\n"
        );
    }

    #[test]
    fn test_model_primitives_are_returned_raw() {
        let name = field("User", "name", required(Typ::leaf("string", "string")));
        assert_eq!(body(&name, true), "return r.User.Name\n");

        let bio = field("User", "bio", Typ::leaf("string", "string"));
        assert_eq!(body(&bio, true), "return &r.User.Bio\n");
    }

    #[test]
    fn test_model_wrapper_reference_is_inverse_of_nullability() {
        let required_post = field("Comment", "post", required(Typ::leaf("Post", "PostResolver")));
        assert_eq!(
            body(&required_post, true),
            "return PostResolver{&r.Comment.Post}\n"
        );

        let optional_post = field("Comment", "post", Typ::leaf("Post", "PostResolver"));
        assert_eq!(
            body(&optional_post, true),
            "return &PostResolver{r.Comment.Post}\n"
        );
    }

    #[test]
    fn test_model_enum_is_converted() {
        let status = field("User", "status", required(Typ::leaf("string", "Status")));
        assert_eq!(body(&status, true), "return Status(r.User.Status)\n");

        let role = field("User", "role", Typ::leaf("string", "Role"));
        assert_eq!(
            body(&role, true),
            indoc! {"
                value := Role(r.User.Role)
                return &value
            "}
        );
    }

    #[test]
    fn test_non_model_returns_stored_value() {
        let cursor = field("UserEdge", "cursor", required(Typ::leaf("string", "string")));
        assert_eq!(body(&cursor, false), "return r.UserEdge.Cursor\n");

        // Identifiers of non-Model owners are not encoded
        let id = field("Comment", "id", required(Typ::leaf("graphql.ID", "graphql.ID")));
        assert_eq!(body(&id, false), "return r.Comment.ID\n");
    }

    #[test]
    fn test_edges_guard_returns_empty_sequence() {
        let edges = field(
            "UserConnection",
            "edges",
            Typ {
                native_name: "[]".to_string(),
                wire_name: "[]".to_string(),
                is_nullable: true,
                element: Some(Box::new(Typ::leaf("UserEdge", "UserEdgeResolver"))),
            },
        );
        assert_eq!(
            body(&edges, false),
            indoc! {"
                if r.UserConnection.Edges == nil {
                	return &[]*UserEdgeResolver{}
                }

                return r.UserConnection.Edges
            "}
        );
    }

    #[test]
    fn test_required_edges_are_dereferenced() {
        let edges = field(
            "UserConnection",
            "edges",
            Typ {
                native_name: "[]".to_string(),
                wire_name: "[]".to_string(),
                is_nullable: false,
                element: Some(Box::new(required(Typ::leaf("UserEdge", "UserEdgeResolver")))),
            },
        );
        assert_eq!(
            body(&edges, false),
            indoc! {"
                if r.UserConnection.Edges == nil {
                	return []UserEdgeResolver{}
                }

                return *r.UserConnection.Edges
            "}
        );
    }

    #[test]
    fn test_page_info_guard_returns_zero_wrapper() {
        let page_info = field(
            "UserConnection",
            "pageInfo",
            required(Typ::leaf("PageInfo", "PageInfoResolver")),
        );
        assert_eq!(
            body(&page_info, false),
            indoc! {"
                if r.UserConnection.PageInfo == nil {
                	return &PageInfoResolver{PageInfo{}}
                }

                return r.UserConnection.PageInfo
            "}
        );
    }

    #[test]
    fn test_page_info_cursors_are_referenced() {
        let end = field("PageInfo", "endCursor", Typ::leaf("string", "string"));
        assert_eq!(body(&end, false), "return &r.PageInfo.EndCursor\n");

        let other = field("UserEdge", "endCursor", Typ::leaf("string", "string"));
        assert_eq!(body(&other, false), "return r.UserEdge.EndCursor\n");
    }

    #[test]
    fn test_method_signature_with_arguments() {
        let mut posts = field(
            "User",
            "posts",
            required(Typ::leaf("PostConnection", "PostConnectionResolver")),
        );
        posts.arguments = vec![field("User.posts", "first", Typ::leaf("int32", "int32"))];

        let method = method(&posts, false, &GeneratorConfig::default());
        assert_eq!(method.receiver, "UserResolver");
        assert_eq!(
            method.signature.args,
            Args::Inline(vec![Param {
                name: "first".to_string(),
                ty: TypeExpr::named("int32").indirect(),
            }])
        );
        assert_eq!(method.signature.returns, TypeExpr::named("PostConnectionResolver"));
    }
}
