//! Transport trait the workflow stages program against
//!
//! `HubSession` is the production implementation; tests substitute in-memory
//! fakes so dispatch and reconciliation run without a server.

use std::path::Path;

use async_trait::async_trait;

use crate::artifact::api::ArtifactKind;
use crate::hub::error::TransportResult;
use crate::hub::types::{FieldDefinition, RemoteField, RemoteObjectRef};

#[async_trait]
pub trait ScanTransport {
    /// Submit a scan file to the ingestion endpoint. Returns the HTTP status.
    async fn upload_scan(&self, path: &Path, kind: ArtifactKind) -> TransportResult<u16>;

    /// Resolve a project-version pair to its server-side resource
    async fn find_project_version(
        &self,
        project: &str,
        version: &str,
    ) -> TransportResult<RemoteObjectRef>;

    /// Fetch the custom field instances attached to a project-version
    async fn list_custom_fields(
        &self,
        target: &RemoteObjectRef,
    ) -> TransportResult<Vec<RemoteField>>;

    /// Write an updated field document back to its own location. Returns the
    /// HTTP status.
    async fn update_field(&self, location: &str, field: &RemoteField) -> TransportResult<u16>;

    /// Provision a custom field definition. Returns the HTTP status.
    async fn create_custom_field(&self, definition: &FieldDefinition) -> TransportResult<u16>;
}
