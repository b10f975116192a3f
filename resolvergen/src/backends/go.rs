//! Go printer
//!
//! Prints for graph-gophers/graphql-go: pointers for indirection, slices
//! for sequences, tab indentation.

use super::Printer;
use crate::render::resolver::{Args, Cond, Expr, Method, Signature, Stmt};
use crate::render::{TypeExpr, exported_name};

/// Go source printer
pub struct GoPrinter;

impl GoPrinter {
    fn cond(&self, cond: &Cond) -> String {
        match cond {
            Cond::IsEmpty(expr) => format!("{} == \"\"", self.expr(expr)),
            Cond::IsUnset(expr) => format!("{} == nil", self.expr(expr)),
        }
    }

    fn args(&self, args: &Args) -> String {
        match args {
            Args::None => String::new(),
            Args::Named(name) => format!("args {name}"),
            Args::Inline(params) => {
                let members: Vec<String> = params
                    .iter()
                    .map(|p| format!("{} {}", self.member_name(&p.name), self.type_expr(&p.ty)))
                    .collect();
                format!("args struct{{ {} }}", members.join("; "))
            }
        }
    }
}

impl Printer for GoPrinter {
    fn name(&self) -> &str {
        "go"
    }

    fn file_extension(&self) -> &str {
        "go"
    }

    fn member_name(&self, field: &str) -> String {
        exported_name(field)
    }

    fn type_expr(&self, ty: &TypeExpr) -> String {
        match ty {
            TypeExpr::Named(name) => name.clone(),
            TypeExpr::Indirect(inner) => format!("*{}", self.type_expr(inner)),
            TypeExpr::Seq(inner) => format!("[]{}", self.type_expr(inner)),
        }
    }

    fn expr(&self, expr: &Expr) -> String {
        match expr {
            Expr::Stored { owner, field } => format!("r.{}.{}", owner, self.member_name(field)),
            Expr::Var(name) => name.clone(),
            Expr::Ref(inner) => format!("&{}", self.expr(inner)),
            Expr::Deref(inner) => format!("*{}", self.expr(inner)),
            Expr::Call { function, args } => {
                let args: Vec<String> = args.iter().map(|a| self.expr(a)).collect();
                format!("{}({})", function, args.join(", "))
            }
            Expr::Convert { ty, value } => format!("{}({})", ty, self.expr(value)),
            Expr::Composite { ty, fields } => {
                let fields: Vec<String> = fields
                    .iter()
                    .map(|(key, value)| match key {
                        Some(key) => format!("{}: {}", key, self.expr(value)),
                        None => self.expr(value),
                    })
                    .collect();
                format!("{}{{{}}}", self.type_expr(ty), fields.join(", "))
            }
            Expr::Str(value) => quote(value),
            Expr::Nil => "nil".to_string(),
        }
    }

    fn body(&self, body: &[Stmt]) -> String {
        let mut out = String::new();
        for stmt in body {
            match stmt {
                Stmt::Guard { cond, ret } => {
                    out.push_str(&format!("if {} {{\n", self.cond(cond)));
                    out.push_str(&format!("\treturn {}\n", self.expr(ret)));
                    out.push_str("}\n\n");
                }
                Stmt::Bind { name, value } => {
                    out.push_str(&format!("{} := {}\n", name, self.expr(value)));
                }
                Stmt::Return(expr) => {
                    out.push_str(&format!("return {}\n", self.expr(expr)));
                }
            }
        }
        out
    }

    fn signature(&self, signature: &Signature) -> String {
        format!(
            "{}({}) {}",
            self.member_name(&signature.name),
            self.args(&signature.args),
            self.type_expr(&signature.returns)
        )
    }

    fn method(&self, method: &Method) -> String {
        let mut out = format!(
            "func (r *{}) {} {{\n",
            method.receiver,
            self.signature(&method.signature)
        );
        for line in self.body(&method.body).lines() {
            if line.is_empty() {
                out.push('\n');
            } else {
                out.push('\t');
                out.push_str(line);
                out.push('\n');
            }
        }
        out.push('}');
        out
    }
}

/// Go interpreted string literal; source files are UTF-8 so printable
/// characters are kept as they are
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() && (c as u32) < 0x80 => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::resolver::Param;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_type_expr() {
        let ty = TypeExpr::named("string").indirect().seq().indirect();
        assert_eq!(GoPrinter.type_expr(&ty), "*[]*string");
    }

    #[test]
    fn test_composite_literals() {
        let keyed = Expr::Composite {
            ty: TypeExpr::named("graphql.Time"),
            fields: vec![(Some("Time".to_string()), Expr::stored("User", "createdAt"))],
        };
        assert_eq!(GoPrinter.expr(&keyed), "graphql.Time{Time: r.User.CreatedAt}");

        let empty = Expr::empty(TypeExpr::named("UserEdgeResolver").indirect().seq());
        assert_eq!(GoPrinter.expr(&empty.reference()), "&[]*UserEdgeResolver{}");
    }

    #[test]
    fn test_string_literal_is_quoted() {
        assert_eq!(GoPrinter.expr(&Expr::Str("User".to_string())), "\"User\"");
        assert_eq!(GoPrinter.expr(&Expr::Str(String::new())), "\"\"");
    }

    #[test]
    fn test_string_literal_uses_go_escapes() {
        let printed = GoPrinter.expr(&Expr::Str("Käse \"x\"\n\u{7}\u{85}".to_string()));
        assert_eq!(printed, r#""Käse \"x\"\n\x07\u0085""#);
    }

    #[test]
    fn test_nil() {
        assert_eq!(GoPrinter.expr(&Expr::Nil), "nil");
    }

    #[test]
    fn test_signature_with_inline_args() {
        let signature = Signature {
            name: "posts".to_string(),
            args: Args::Inline(vec![
                Param {
                    name: "first".to_string(),
                    ty: TypeExpr::named("int32").indirect(),
                },
                Param {
                    name: "after".to_string(),
                    ty: TypeExpr::named("string").indirect(),
                },
            ]),
            returns: TypeExpr::named("PostConnectionResolver").indirect(),
        };
        assert_eq!(
            GoPrinter.signature(&signature),
            "Posts(args struct{ First *int32; After *string }) *PostConnectionResolver"
        );
    }

    #[test]
    fn test_method_is_indented() {
        let method = Method {
            receiver: "UserConnectionResolver".to_string(),
            signature: Signature {
                name: "pageInfo".to_string(),
                args: Args::None,
                returns: TypeExpr::named("PageInfoResolver").indirect(),
            },
            body: vec![
                Stmt::Guard {
                    cond: Cond::IsUnset(Expr::stored("UserConnection", "pageInfo")),
                    ret: Expr::Composite {
                        ty: TypeExpr::named("PageInfoResolver"),
                        fields: vec![(None, Expr::empty(TypeExpr::named("PageInfo")))],
                    }
                    .reference(),
                },
                Stmt::Return(Expr::stored("UserConnection", "pageInfo")),
            ],
        };
        assert_eq!(
            GoPrinter.method(&method),
            indoc! {"
                func (r *UserConnectionResolver) PageInfo() *PageInfoResolver {
                	if r.UserConnection.PageInfo == nil {
                		return &PageInfoResolver{PageInfo{}}
                	}

                	return r.UserConnection.PageInfo
                }"}
        );
    }
}
