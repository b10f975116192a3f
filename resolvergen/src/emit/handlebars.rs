//! Handlebars template engine
//!
//! Built-in templates are compiled into the binary. A template directory
//! may replace any slot with a `<slot>.hbs` file.

use super::{TemplateEngine, TemplateSlot};
use crate::error::GeneratorError;
use handlebars::Handlebars;
use std::path::Path;

fn builtin(slot: TemplateSlot) -> &'static str {
    match slot {
        TemplateSlot::Header => include_str!("../../templates/header.hbs"),
        TemplateSlot::Type => include_str!("../../templates/type.hbs"),
        TemplateSlot::Interface => include_str!("../../templates/interface.hbs"),
        TemplateSlot::Union => include_str!("../../templates/union.hbs"),
        TemplateSlot::Enum => include_str!("../../templates/enum.hbs"),
        TemplateSlot::Scalar => include_str!("../../templates/scalar.hbs"),
        TemplateSlot::Input => include_str!("../../templates/input.hbs"),
        TemplateSlot::Payload => include_str!("../../templates/payload.hbs"),
        TemplateSlot::Query => include_str!("../../templates/query.hbs"),
        TemplateSlot::Mutation => include_str!("../../templates/mutation.hbs"),
        TemplateSlot::Args => include_str!("../../templates/args.hbs"),
        TemplateSlot::Resolver => include_str!("../../templates/resolver.hbs"),
    }
}

/// [`TemplateEngine`] backed by the `handlebars` crate
pub struct HandlebarsEngine {
    registry: Handlebars<'static>,
}

impl HandlebarsEngine {
    /// Engine with the built-in templates
    pub fn new() -> Result<Self, GeneratorError> {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        registry.set_strict_mode(true);

        let mut engine = Self { registry };
        for slot in TemplateSlot::ALL {
            engine.register(slot, builtin(slot))?;
        }
        Ok(engine)
    }

    /// Engine with the built-in templates, overridden from `dir`
    pub fn with_overrides(dir: &Path) -> Result<Self, GeneratorError> {
        let mut engine = Self::new()?;
        for slot in TemplateSlot::ALL {
            let path = dir.join(format!("{}.hbs", slot.as_str()));
            if !path.is_file() {
                continue;
            }
            let source =
                std::fs::read_to_string(&path).map_err(|e| GeneratorError::io(&path, e))?;
            tracing::debug!(%slot, path = %path.display(), "template override");
            engine.register(slot, &source)?;
        }
        Ok(engine)
    }

    /// Replace the template of one slot
    pub fn register(&mut self, slot: TemplateSlot, source: &str) -> Result<(), GeneratorError> {
        self.registry
            .register_template_string(slot.as_str(), source)
            .map_err(|e| GeneratorError::Template {
                slot: slot.to_string(),
                type_name: String::new(),
                message: e.to_string(),
            })
    }
}

impl TemplateEngine for HandlebarsEngine {
    fn execute(
        &self,
        slot: TemplateSlot,
        logical_name: &str,
        _kind: &str,
        context: &serde_json::Value,
    ) -> Result<Vec<u8>, GeneratorError> {
        self.registry
            .render(slot.as_str(), context)
            .map(String::into_bytes)
            .map_err(|e| GeneratorError::Template {
                slot: slot.to_string(),
                type_name: logical_name.to_string(),
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(engine: &HandlebarsEngine, slot: TemplateSlot, ctx: serde_json::Value) -> String {
        String::from_utf8(engine.execute(slot, "Test", "OBJECT", &ctx).unwrap()).unwrap()
    }

    #[test]
    fn test_builtin_templates_compile() {
        assert!(HandlebarsEngine::new().is_ok());
    }

    #[test]
    fn test_output_is_not_html_escaped() {
        let engine = HandlebarsEngine::new().unwrap();
        let out = render(
            &engine,
            TemplateSlot::Args,
            json!({
                "name": "RenameArgs",
                "field": "rename",
                "fields": [{
                    "name": "ids",
                    "member": "Ids",
                    "type": "*[]*graphql.ID",
                    "schemaType": "[ID]",
                    "doc": ["Ids <to> rename & \"more\""],
                    "deprecated": null,
                }],
            }),
        );
        assert!(out.contains("type RenameArgs struct {"));
        assert!(out.contains("Ids *[]*graphql.ID"));
        assert!(out.contains("// Ids <to> rename & \"more\""));
    }

    #[test]
    fn test_strict_mode_reports_missing_keys() {
        let engine = HandlebarsEngine::new().unwrap();
        let err = engine
            .execute(TemplateSlot::Args, "Mutation", "MUTATION", &json!({}))
            .unwrap_err();
        match err {
            GeneratorError::Template { slot, type_name, .. } => {
                assert_eq!(slot, "args");
                assert_eq!(type_name, "Mutation");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_directory_overrides_one_slot() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("resolver.hbs"), "// root {{name}}\n").unwrap();

        let engine = HandlebarsEngine::with_overrides(dir.path()).unwrap();
        let out = render(
            &engine,
            TemplateSlot::Resolver,
            json!({ "name": "Resolver", "query": null, "mutation": null }),
        );
        assert_eq!(out, "// root Resolver\n");

        // Other slots keep the built-in template
        let header = render(
            &engine,
            TemplateSlot::Header,
            json!({ "package": "api", "unit": "User", "imports": [] }),
        );
        assert!(header.contains("package api"));
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("type.hbs"), "{{#each fields}}").unwrap();

        let err = HandlebarsEngine::with_overrides(dir.path()).err().unwrap();
        assert!(matches!(err, GeneratorError::Template { ref slot, .. } if slot == "type"));
    }
}
