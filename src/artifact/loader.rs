//! Scan file loading

use std::path::Path;

use crate::artifact::error::{ArtifactError, ArtifactResult};
use crate::artifact::types::{ArtifactKind, ScanArtifact};

impl ScanArtifact {
    /// Read a scan file, classify it by suffix, and verify its identifier
    /// fields are present.
    ///
    /// Fails with `UnsupportedKind` for suffixes other than `.jsonld` and
    /// `.json`, and with `MalformedDocument` when the kind-specific
    /// identifier locations are missing or not strings.
    pub fn load(path: &Path) -> ArtifactResult<Self> {
        let kind = ArtifactKind::from_path(path)?;

        let text = std::fs::read_to_string(path).map_err(|e| ArtifactError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let document = serde_json::from_str(&text).map_err(|e| ArtifactError::Json {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let artifact = ScanArtifact::new(kind, path.to_path_buf(), document);

        // Identifiers must be resolvable up front; everything downstream
        // assumes a mappable (project, version) pair.
        artifact.project_name()?;
        artifact.version_name()?;

        log::debug!(
            "loaded {} {} for project {}, version {}",
            artifact.kind(),
            path.display(),
            artifact.project_name().unwrap_or_default(),
            artifact.version_name().unwrap_or_default()
        );

        Ok(artifact)
    }
}
