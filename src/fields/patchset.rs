//! Field patch file parsing

use std::path::Path;

use serde_json::Value;

use crate::artifact::api::IdentifierOverride;
use crate::fields::error::{FieldError, FieldResult};

/// Field label → new value pairs plus the target identifiers they apply to.
///
/// Parsed from a JSON object whose `project` and `version` keys address the
/// target; every other key is a field label. The two identifier keys are
/// stripped during parsing, so patch iteration never sees them as labels.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPatchSet {
    project: String,
    version: String,
    entries: Vec<(String, Value)>,
}

impl FieldPatchSet {
    /// Read and parse a patch file
    pub fn load(path: &Path) -> FieldResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| FieldError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let value: Value = serde_json::from_str(&text).map_err(|e| FieldError::Json {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_value(&path.display().to_string(), value)
    }

    /// Build a patch set from an already-parsed document; `origin` names the
    /// source in errors.
    pub fn from_value(origin: &str, value: Value) -> FieldResult<Self> {
        let missing = |key: &str| FieldError::MissingKey {
            path: origin.to_string(),
            key: key.to_string(),
        };

        let Value::Object(map) = value else {
            return Err(missing("project"));
        };

        let mut project = None;
        let mut version = None;
        let mut entries = Vec::new();

        // Entry order is the file's key order; serde_json preserves it
        for (key, val) in map {
            match key.as_str() {
                "project" => project = val.as_str().map(str::to_string),
                "version" => version = val.as_str().map(str::to_string),
                _ => entries.push((key, val)),
            }
        }

        Ok(Self {
            project: project.ok_or_else(|| missing("project"))?,
            version: version.ok_or_else(|| missing("version"))?,
            entries,
        })
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Label/value pairs in file order
    pub fn entries(&self) -> &[(String, Value)] {
        &self.entries
    }

    /// The (project, version) the patches apply to, with caller overrides
    /// taking precedence over the embedded identifiers
    pub fn effective_target<'a>(&'a self, overrides: &'a IdentifierOverride) -> (&'a str, &'a str) {
        (
            overrides.project.as_deref().unwrap_or(&self.project),
            overrides.version.as_deref().unwrap_or(&self.version),
        )
    }
}
