//! Scan upload dispatch and temporary-file lifecycle

use std::path::PathBuf;

use crate::artifact::api::ScanArtifact;
use crate::hub::api::ScanTransport;
use crate::upload::error::{UploadError, UploadResult};

/// Outcome of one successful dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    /// The path actually submitted (the original, or the temp copy)
    pub uploaded_path: PathBuf,
    pub status: u16,
    pub used_temp_file: bool,
}

/// Submits artifacts to the ingestion endpoint.
///
/// An artifact whose identifiers were overridden is serialized to a freshly
/// named temporary file next to the original so the original is preserved;
/// the copy is deleted after the upload unless `keep_temp` asks otherwise.
pub struct UploadDispatcher<'a, T: ScanTransport> {
    transport: &'a T,
    keep_temp: bool,
}

impl<'a, T: ScanTransport> UploadDispatcher<'a, T> {
    pub fn new(transport: &'a T, keep_temp: bool) -> Self {
        Self {
            transport,
            keep_temp,
        }
    }

    /// Upload one artifact. `overridden` selects the temp-file route.
    ///
    /// Failures are per-artifact: the caller logs and counts them, the batch
    /// moves on. There is no automatic retry here.
    pub async fn dispatch(
        &self,
        artifact: &ScanArtifact,
        overridden: bool,
    ) -> UploadResult<UploadReceipt> {
        let project = artifact.project_name().unwrap_or("(unknown)").to_string();
        let version = artifact.version_name().unwrap_or("(unknown)").to_string();

        if !overridden {
            log::debug!(
                "Uploading scan file {} which is being mapped to project {}, version {}",
                artifact.source().display(),
                project,
                version
            );
            let status = self
                .transport
                .upload_scan(artifact.source(), artifact.kind())
                .await
                .map_err(|e| UploadError::UploadFailed {
                    path: artifact.source().display().to_string(),
                    source: e,
                })?;
            return Ok(UploadReceipt {
                uploaded_path: artifact.source().to_path_buf(),
                status,
                used_temp_file: false,
            });
        }

        let temp_path = temp_path_for(artifact);
        tokio::fs::write(&temp_path, artifact.to_pretty_json())
            .await
            .map_err(|e| UploadError::TempFile {
                path: temp_path.display().to_string(),
                message: e.to_string(),
            })?;

        log::debug!(
            "Uploading scan file {} using temporary file {} which is being mapped to project {}, version {}",
            artifact.source().display(),
            temp_path.display(),
            project,
            version
        );

        let result = self
            .transport
            .upload_scan(&temp_path, artifact.kind())
            .await;

        if self.keep_temp {
            log::debug!("preserving temp file {}", temp_path.display());
        } else {
            log::debug!("removing temp file {}", temp_path.display());
            if let Err(e) = tokio::fs::remove_file(&temp_path).await {
                log::warn!(
                    "Failed to remove temp file {}: {}",
                    temp_path.display(),
                    e
                );
            }
        }

        match result {
            Ok(status) => Ok(UploadReceipt {
                uploaded_path: temp_path,
                status,
                used_temp_file: true,
            }),
            Err(e) => Err(UploadError::UploadFailed {
                path: artifact.source().display().to_string(),
                source: e,
            }),
        }
    }
}

/// Unique sibling path sharing the original's suffix
fn temp_path_for(artifact: &ScanArtifact) -> PathBuf {
    let file_name = format!("{}.{}", uuid::Uuid::new_v4(), artifact.kind().suffix());
    match artifact.source().parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(file_name),
        _ => PathBuf::from(file_name),
    }
}
