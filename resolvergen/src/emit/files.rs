//! Output units
//!
//! Fragments are collected per logical name and turned into files once the
//! whole model has been emitted. Nothing touches the filesystem until
//! [`GeneratedFiles::write_to`] is called on a finished run.

use super::context::{HeaderContext, ImportContext};
use super::{TemplateEngine, TemplateSlot, execute};
use crate::config::GeneratorConfig;
use crate::error::GeneratorError;
use heck::ToSnakeCase;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

/// Role kind passed with file headers
pub const HEADER_KIND: &str = "HEADER";

/// Fragments of a run in progress, by logical name
#[derive(Debug, Default)]
pub(crate) struct Units {
    extension: String,
    units: IndexMap<String, Vec<String>>,
}

impl Units {
    pub(crate) fn new(extension: &str) -> Self {
        Self {
            extension: extension.to_string(),
            units: IndexMap::new(),
        }
    }

    /// Append a fragment to a unit; units keep first-seen order
    pub(crate) fn push(&mut self, unit: &str, code: String) {
        self.units.entry(unit.to_string()).or_default().push(code);
    }

    /// Prefix every unit with its header and name the files
    pub(crate) fn finish(
        self,
        config: &GeneratorConfig,
        engine: &dyn TemplateEngine,
    ) -> Result<GeneratedFiles, GeneratorError> {
        let mut files = IndexMap::new();

        for (unit, fragments) in self.units {
            let body = fragments
                .iter()
                .map(|f| f.trim_end())
                .filter(|f| !f.is_empty())
                .collect::<Vec<_>>()
                .join("\n\n");

            let header = HeaderContext {
                package: config.package.clone(),
                unit: unit.clone(),
                imports: config
                    .imports
                    .iter()
                    .filter(|(qualifier, _)| uses_qualifier(&body, qualifier))
                    .map(|(qualifier, path)| ImportContext {
                        qualifier: qualifier.clone(),
                        path: path.clone(),
                    })
                    .collect(),
            };
            let header = execute(engine, TemplateSlot::Header, &unit, HEADER_KIND, &header)?;

            let name = format!("{}.{}", unit.to_snake_case(), self.extension);
            tracing::debug!(file = %name, fragments = fragments.len(), "assembled unit");
            files.insert(name, format!("{}\n\n{}\n", header.trim_end(), body));
        }

        Ok(GeneratedFiles { files })
    }
}

/// Whether code outside comments refers to a package qualifier
fn uses_qualifier(code: &str, qualifier: &str) -> bool {
    let needle = format!("{qualifier}.");
    code.lines()
        .map(str::trim_start)
        .filter(|line| !line.starts_with("//"))
        .any(|line| {
            line.match_indices(&needle).any(|(at, _)| {
                line[..at]
                    .chars()
                    .next_back()
                    .is_none_or(|c| !(c.is_alphanumeric() || c == '_'))
            })
        })
}

/// The files of a finished run, by file name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedFiles {
    files: IndexMap<String, String>,
}

impl GeneratedFiles {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Content of one file
    pub fn get(&self, file_name: &str) -> Option<&str> {
        self.files.get(file_name).map(String::as_str)
    }

    /// File names and contents in emission order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(n, c)| (n.as_str(), c.as_str()))
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Write every file into `dir`, creating it if missing
    pub fn write_to(&self, dir: &Path) -> Result<Vec<PathBuf>, GeneratorError> {
        std::fs::create_dir_all(dir).map_err(|e| GeneratorError::io(dir, e))?;

        let mut written = Vec::with_capacity(self.files.len());
        for (name, content) in &self.files {
            let path = dir.join(name);
            std::fs::write(&path, content).map_err(|e| GeneratorError::io(&path, e))?;
            tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file");
            written.push(path);
        }
        Ok(written)
    }
}
