//! Artifact kinds and in-memory scan documents

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::artifact::error::{ArtifactError, ArtifactResult};

/// The structural shapes of scan documents the server ingests.
///
/// Each kind knows where its project/version identifiers live, so the rest of
/// the workflow never branches on file suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum ArtifactKind {
    /// Dependency BOM produced by a dry-run scan (`.jsonld`)
    #[strum(serialize = "BOM")]
    Bom,
    /// File signature scan (`.json`)
    #[strum(serialize = "signature scan")]
    SignatureScan,
}

impl ArtifactKind {
    /// Classify a scan file by its suffix
    pub fn from_path(path: &Path) -> ArtifactResult<Self> {
        let suffix = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        match suffix {
            "jsonld" => Ok(ArtifactKind::Bom),
            "json" => Ok(ArtifactKind::SignatureScan),
            _ => Err(ArtifactError::UnsupportedKind {
                path: path.display().to_string(),
                suffix: if suffix.is_empty() {
                    "(none)".to_string()
                } else {
                    format!(".{}", suffix)
                },
            }),
        }
    }

    /// Suffix used when writing a rewritten copy of the document
    pub fn suffix(self) -> &'static str {
        match self {
            ArtifactKind::Bom => "jsonld",
            ArtifactKind::SignatureScan => "json",
        }
    }

    /// Content type the ingestion endpoint expects for this kind
    pub fn content_type(self) -> &'static str {
        match self {
            ArtifactKind::Bom => "application/ld+json",
            ArtifactKind::SignatureScan => "application/json",
        }
    }
}

/// Caller-supplied project/version replacements.
///
/// Values present here win over the identifiers embedded in the artifact and
/// in a patch file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierOverride {
    pub project: Option<String>,
    pub version: Option<String>,
}

impl IdentifierOverride {
    pub fn new(project: Option<String>, version: Option<String>) -> Self {
        Self { project, version }
    }

    pub fn is_empty(&self) -> bool {
        self.project.is_none() && self.version.is_none()
    }
}

enum Identifier {
    Project,
    Version,
}

impl Identifier {
    /// Human-readable identifier location, per kind, for error messages
    fn location(&self, kind: ArtifactKind) -> &'static str {
        match (kind, self) {
            (ArtifactKind::Bom, Identifier::Project) => "name entry at [1].name",
            (ArtifactKind::Bom, Identifier::Version) => "revision entry at [1].revision",
            (ArtifactKind::SignatureScan, Identifier::Project) => "top-level 'project' key",
            (ArtifactKind::SignatureScan, Identifier::Version) => "top-level 'release' key",
        }
    }

    fn key(&self, kind: ArtifactKind) -> &'static str {
        match (kind, self) {
            (ArtifactKind::Bom, Identifier::Project) => "name",
            (ArtifactKind::Bom, Identifier::Version) => "revision",
            (ArtifactKind::SignatureScan, Identifier::Project) => "project",
            (ArtifactKind::SignatureScan, Identifier::Version) => "release",
        }
    }
}

/// A scan document held in memory, classified by kind.
///
/// The document is treated as an opaque payload except for the identifier
/// fields the kind exposes.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanArtifact {
    kind: ArtifactKind,
    source: PathBuf,
    document: Value,
}

impl ScanArtifact {
    pub(crate) fn new(kind: ArtifactKind, source: PathBuf, document: Value) -> Self {
        Self {
            kind,
            source,
            document,
        }
    }

    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Project name embedded in the document
    pub fn project_name(&self) -> ArtifactResult<&str> {
        self.identifier(Identifier::Project)
    }

    /// Version name embedded in the document
    pub fn version_name(&self) -> ArtifactResult<&str> {
        self.identifier(Identifier::Version)
    }

    fn identifier(&self, which: Identifier) -> ArtifactResult<&str> {
        let slot = match self.kind {
            ArtifactKind::Bom => self
                .document
                .get(1)
                .and_then(|entry| entry.get(which.key(self.kind))),
            ArtifactKind::SignatureScan => self.document.get(which.key(self.kind)),
        };
        slot.and_then(Value::as_str)
            .ok_or_else(|| ArtifactError::MalformedDocument {
                path: self.source.display().to_string(),
                location: which.location(self.kind).to_string(),
            })
    }

    fn write_identifier(&mut self, which: Identifier, value: &str) {
        let key = which.key(self.kind);
        let target = match self.kind {
            ArtifactKind::Bom => self.document.get_mut(1).and_then(Value::as_object_mut),
            ArtifactKind::SignatureScan => self.document.as_object_mut(),
        };
        if let Some(map) = target {
            map.insert(key.to_string(), Value::String(value.to_string()));
        }
    }

    /// Rewrite the identifier fields according to the override.
    ///
    /// A per-field no-op when the corresponding override value is absent.
    /// Idempotent. Returns whether anything was rewritten.
    pub fn apply_override(&mut self, overrides: &IdentifierOverride) -> bool {
        let mut changed = false;
        if let Some(project) = &overrides.project {
            log::debug!(
                "overriding project name {} with {}",
                self.project_name().unwrap_or("(unset)").to_string(),
                project
            );
            self.write_identifier(Identifier::Project, project);
            changed = true;
        }
        if let Some(version) = &overrides.version {
            log::debug!(
                "overriding version name {} with {}",
                self.version_name().unwrap_or("(unset)").to_string(),
                version
            );
            self.write_identifier(Identifier::Version, version);
            changed = true;
        }
        changed
    }

    /// Serialize the document for a rewritten upload copy
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.document).unwrap_or_else(|_| self.document.to_string())
    }
}
