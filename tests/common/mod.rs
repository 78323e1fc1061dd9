//! Shared test helpers
//!
//! `FakeHub` is an in-memory `ScanTransport` with scripted lookup behavior,
//! recording every call so tests can assert on the full exchange.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use scansync::artifact::api::ArtifactKind;
use scansync::hub::api::{
    FieldDefinition, RemoteField, RemoteObjectRef, ScanTransport, TransportResult,
};
use scansync::hub::error::TransportError;

#[derive(Default)]
struct FakeHubState {
    lookup_calls: usize,
    lookups: Vec<(String, String)>,
    uploads: Vec<(PathBuf, ArtifactKind, String)>,
    updates: Vec<(String, RemoteField)>,
    created: Vec<FieldDefinition>,
}

pub struct FakeHub {
    lookup_failures: usize,
    fields: Vec<RemoteField>,
    update_status: u16,
    state: Mutex<FakeHubState>,
}

impl FakeHub {
    pub fn new() -> Self {
        Self {
            lookup_failures: 0,
            fields: Vec::new(),
            update_status: 200,
            state: Mutex::new(FakeHubState::default()),
        }
    }

    /// Fail the first `n` project-version lookups before succeeding
    pub fn with_lookup_failures(mut self, n: usize) -> Self {
        self.lookup_failures = n;
        self
    }

    pub fn with_fields(mut self, fields: Vec<RemoteField>) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_update_status(mut self, status: u16) -> Self {
        self.update_status = status;
        self
    }

    pub fn lookup_calls(&self) -> usize {
        self.state.lock().unwrap().lookup_calls
    }

    pub fn lookups(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().lookups.clone()
    }

    /// Uploads seen so far: path, kind, and the payload read before any
    /// temp-file cleanup could remove it
    pub fn uploads(&self) -> Vec<(PathBuf, ArtifactKind, String)> {
        self.state.lock().unwrap().uploads.clone()
    }

    pub fn updates(&self) -> Vec<(String, RemoteField)> {
        self.state.lock().unwrap().updates.clone()
    }

    pub fn created(&self) -> Vec<FieldDefinition> {
        self.state.lock().unwrap().created.clone()
    }
}

#[async_trait]
impl ScanTransport for FakeHub {
    async fn upload_scan(&self, path: &Path, kind: ArtifactKind) -> TransportResult<u16> {
        let content = std::fs::read_to_string(path).map_err(|e| TransportError::Io {
            message: format!("{}: {}", path.display(), e),
        })?;
        self.state
            .lock()
            .unwrap()
            .uploads
            .push((path.to_path_buf(), kind, content));
        Ok(201)
    }

    async fn find_project_version(
        &self,
        project: &str,
        version: &str,
    ) -> TransportResult<RemoteObjectRef> {
        let mut state = self.state.lock().unwrap();
        state.lookup_calls += 1;
        state
            .lookups
            .push((project.to_string(), version.to_string()));
        if state.lookup_calls <= self.lookup_failures {
            return Err(TransportError::VersionNotFound {
                project: project.to_string(),
                version: version.to_string(),
            });
        }
        Ok(RemoteObjectRef {
            project: project.to_string(),
            version: version.to_string(),
            href: "https://hub.example.com/api/versions/1".to_string(),
            custom_fields_href: "https://hub.example.com/api/versions/1/custom-fields"
                .to_string(),
        })
    }

    async fn list_custom_fields(
        &self,
        _target: &RemoteObjectRef,
    ) -> TransportResult<Vec<RemoteField>> {
        Ok(self.fields.clone())
    }

    async fn update_field(&self, location: &str, field: &RemoteField) -> TransportResult<u16> {
        self.state
            .lock()
            .unwrap()
            .updates
            .push((location.to_string(), field.clone()));
        Ok(self.update_status)
    }

    async fn create_custom_field(&self, definition: &FieldDefinition) -> TransportResult<u16> {
        self.state.lock().unwrap().created.push(definition.clone());
        Ok(201)
    }
}

/// A remote custom field document as the server would return it
pub fn remote_field(label: &str, href: &str) -> RemoteField {
    serde_json::from_value(json!({
        "label": label,
        "values": [],
        "fieldType": "TEXT",
        "_meta": {"href": href}
    }))
    .unwrap()
}
