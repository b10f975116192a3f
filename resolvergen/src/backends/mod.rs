//! Printer implementations for code generation
//!
//! Each printer turns rendered types and resolver bodies into the source
//! text of one target language.

pub mod go;

use crate::error::GeneratorError;
use crate::render::TypeExpr;
use crate::render::resolver::{Expr, Method, Signature, Stmt};

/// A target-language printer
pub trait Printer: Send + Sync {
    /// Printer name (e.g., "go")
    fn name(&self) -> &str;

    /// File extension for generated files
    fn file_extension(&self) -> &str;

    /// Member name of a schema field
    fn member_name(&self, field: &str) -> String;

    /// Print a type expression
    fn type_expr(&self, ty: &TypeExpr) -> String;

    /// Print a value expression
    fn expr(&self, expr: &Expr) -> String;

    /// Print a method body, one statement per line, unindented
    fn body(&self, body: &[Stmt]) -> String;

    /// Print a method signature without receiver
    fn signature(&self, signature: &Signature) -> String;

    /// Print a full method declaration
    fn method(&self, method: &Method) -> String;
}

/// Get a printer by name
pub fn get_printer(name: &str) -> Result<Box<dyn Printer>, GeneratorError> {
    match name.to_lowercase().as_str() {
        "go" | "golang" => Ok(Box::new(go::GoPrinter)),
        other => Err(GeneratorError::Config(format!("unknown target: {other}"))),
    }
}
