//! Error types for code generation
//!
//! Fatal conditions are variants of [`GeneratorError`] and halt the run.
//! Recoverable conditions are [`Warning`]s, collected on the entity model
//! and logged.

use std::fmt;
use std::path::PathBuf;

/// Error type for code generation
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// The schema text is not valid GraphQL SDL
    #[error("schema parse error: {}", messages.join("; "))]
    SchemaParse {
        /// Every syntax error reported by the parser
        messages: Vec<String>,
    },

    /// A type reference names neither a known scalar nor a declared type
    #[error("unresolved type `{type_name}` referenced by `{owner}.{field}`")]
    UnresolvedType {
        /// Type declaring the field
        owner: String,
        /// Field (or argument) holding the reference
        field: String,
        /// The name that could not be resolved
        type_name: String,
    },

    /// The template engine failed while emitting a type
    #[error("template `{slot}` failed for type `{type_name}`: {message}")]
    Template {
        /// Template slot being executed
        slot: String,
        /// Type being emitted
        type_name: String,
        /// Engine diagnostic
        message: String,
    },

    /// Invalid configuration
    #[error("config error: {0}")]
    Config(String),

    /// Filesystem failure
    #[error("io error on {}: {source}", path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl GeneratorError {
    /// Wrap an io error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GeneratorError::Io {
            path: path.into(),
            source,
        }
    }
}

/// A non-fatal condition met while building the entity model
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A schema definition of a kind the generator does not handle; it is skipped
    UnsupportedKind {
        /// Definition name, when it has one
        name: Option<String>,
        /// Definition kind (e.g. `DIRECTIVE`)
        kind: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnsupportedKind { name: Some(name), kind } => {
                write!(f, "skipping unsupported {kind} `{name}`")
            }
            Warning::UnsupportedKind { name: None, kind } => {
                write!(f, "skipping unsupported {kind}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_type_message() {
        let err = GeneratorError::UnresolvedType {
            owner: "User".to_string(),
            field: "avatar".to_string(),
            type_name: "Image".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unresolved type `Image` referenced by `User.avatar`"
        );
    }

    #[test]
    fn test_parse_error_joins_messages() {
        let err = GeneratorError::SchemaParse {
            messages: vec!["expected a Name".to_string(), "expected `}`".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "schema parse error: expected a Name; expected `}`"
        );
    }

    #[test]
    fn test_warning_display() {
        let warning = Warning::UnsupportedKind {
            name: Some("auth".to_string()),
            kind: "DIRECTIVE".to_string(),
        };
        assert_eq!(warning.to_string(), "skipping unsupported DIRECTIVE `auth`");
    }
}
