//! Field reconciliation against a remote project-version

use crate::artifact::api::IdentifierOverride;
use crate::core::retry::{retry_async, RetryPolicy};
use crate::fields::error::{FieldError, FieldResult};
use crate::fields::patchset::FieldPatchSet;
use crate::fields::types::{FieldOutcome, ReconcileReport};
use crate::hub::api::ScanTransport;

/// Patches custom field values on a remote project-version.
///
/// The target object is created asynchronously server-side when a scan is
/// mapped, so the lookup runs under the injected retry policy before giving
/// up. Past that point every field is an independent unit of work.
pub struct FieldReconciler<'a, T: ScanTransport> {
    transport: &'a T,
    policy: RetryPolicy,
}

impl<'a, T: ScanTransport> FieldReconciler<'a, T> {
    pub fn new(transport: &'a T, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    pub async fn reconcile(
        &self,
        patch: &FieldPatchSet,
        overrides: &IdentifierOverride,
    ) -> FieldResult<ReconcileReport> {
        let (project, version) = patch.effective_target(overrides);

        log::info!(
            "Updating custom field values on project {}, version {}",
            project,
            version
        );

        let target = retry_async("project-version lookup", &self.policy, || {
            self.transport.find_project_version(project, version)
        })
        .await
        .map_err(|e| {
            log::debug!(
                "Failed to retrieve object for project {}, version {}: {}",
                project,
                version,
                e
            );
            FieldError::TargetNotFound {
                project: project.to_string(),
                version: version.to_string(),
                attempts: self.policy.max_attempts,
            }
        })?;

        let fields = self.transport.list_custom_fields(&target).await?;

        let mut report = ReconcileReport::default();
        for (label, new_value) in patch.entries() {
            let matched = fields
                .iter()
                .find(|f| f.label.to_lowercase() == label.to_lowercase());

            let Some(field) = matched else {
                log::error!(
                    "Failed to find a custom field with label={} at {}",
                    label,
                    target.href
                );
                report.record(label, FieldOutcome::NotFound);
                continue;
            };

            let mut updated = field.clone();
            updated.values = vec![new_value.clone()];
            log::debug!("Updating custom field {} with value {}", label, new_value);

            match self.transport.update_field(updated.location(), &updated).await {
                Ok(status) if (200..300).contains(&status) => {
                    log::info!(
                        "succeeded updating custom field {} at {} with new value {}",
                        label,
                        target.href,
                        new_value
                    );
                    report.record(label, FieldOutcome::Updated);
                }
                Ok(status) => {
                    log::error!(
                        "failed updating custom field {} at {} with new value {}. status code returned was: {}",
                        label,
                        target.href,
                        new_value,
                        status
                    );
                    report.record(label, FieldOutcome::UpdateFailed {
                        status: Some(status),
                    });
                }
                Err(e) => {
                    log::error!(
                        "failed updating custom field {} at {}: {}",
                        label,
                        target.href,
                        e
                    );
                    report.record(label, FieldOutcome::UpdateFailed { status: None });
                }
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::api::ArtifactKind;
    use crate::hub::api::{FieldDefinition, RemoteField, RemoteObjectRef, TransportResult};
    use crate::hub::error::TransportError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::path::Path;
    use std::sync::Mutex;
    use std::time::Duration;

    fn remote_field(label: &str, href: &str) -> RemoteField {
        serde_json::from_value(json!({
            "label": label,
            "values": ["old"],
            "fieldType": "TEXT",
            "_meta": {"href": href}
        }))
        .unwrap()
    }

    fn target_ref() -> RemoteObjectRef {
        RemoteObjectRef {
            project: "P".to_string(),
            version: "V".to_string(),
            href: "https://hub.example.com/api/versions/9".to_string(),
            custom_fields_href: "https://hub.example.com/api/versions/9/custom-fields".to_string(),
        }
    }

    struct ScriptedHub {
        /// Lookup attempts that fail before one succeeds
        lookup_failures: usize,
        lookup_calls: Mutex<usize>,
        lookups_seen: Mutex<Vec<(String, String)>>,
        fields: Vec<RemoteField>,
        update_status: u16,
        updates: Mutex<Vec<(String, RemoteField)>>,
    }

    impl ScriptedHub {
        fn new(lookup_failures: usize, fields: Vec<RemoteField>) -> Self {
            Self {
                lookup_failures,
                lookup_calls: Mutex::new(0),
                lookups_seen: Mutex::new(Vec::new()),
                fields,
                update_status: 200,
                updates: Mutex::new(Vec::new()),
            }
        }

        fn with_update_status(mut self, status: u16) -> Self {
            self.update_status = status;
            self
        }

        fn lookup_count(&self) -> usize {
            *self.lookup_calls.lock().unwrap()
        }

        fn updates(&self) -> Vec<(String, RemoteField)> {
            self.updates.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ScanTransport for ScriptedHub {
        async fn upload_scan(&self, _path: &Path, _kind: ArtifactKind) -> TransportResult<u16> {
            unreachable!("not exercised by reconciler tests")
        }

        async fn find_project_version(
            &self,
            project: &str,
            version: &str,
        ) -> TransportResult<RemoteObjectRef> {
            let mut calls = self.lookup_calls.lock().unwrap();
            *calls += 1;
            self.lookups_seen
                .lock()
                .unwrap()
                .push((project.to_string(), version.to_string()));
            if *calls <= self.lookup_failures {
                Err(TransportError::VersionNotFound {
                    project: project.to_string(),
                    version: version.to_string(),
                })
            } else {
                Ok(target_ref())
            }
        }

        async fn list_custom_fields(
            &self,
            _target: &RemoteObjectRef,
        ) -> TransportResult<Vec<RemoteField>> {
            Ok(self.fields.clone())
        }

        async fn update_field(&self, location: &str, field: &RemoteField) -> TransportResult<u16> {
            self.updates
                .lock()
                .unwrap()
                .push((location.to_string(), field.clone()));
            Ok(self.update_status)
        }

        async fn create_custom_field(&self, _definition: &FieldDefinition) -> TransportResult<u16> {
            unreachable!("not exercised by reconciler tests")
        }
    }

    fn fast_policy() -> RetryPolicy {
        RetryPolicy::new(4, Duration::from_millis(5))
    }

    fn patch(value: serde_json::Value) -> FieldPatchSet {
        FieldPatchSet::from_value("fields.json", value).unwrap()
    }

    #[tokio::test]
    async fn test_reconcile_updates_matching_field() {
        let hub = ScriptedHub::new(
            0,
            vec![remote_field("Build ID", "https://hub.example.com/api/fields/1")],
        );
        let reconciler = FieldReconciler::new(&hub, fast_policy());

        let report = reconciler
            .reconcile(
                &patch(json!({"project": "P", "version": "V", "Build ID": "123"})),
                &IdentifierOverride::default(),
            )
            .await
            .unwrap();

        assert_eq!(report.updated_count(), 1);
        assert!(report.is_clean());

        let updates = hub.updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].0, "https://hub.example.com/api/fields/1");
        assert_eq!(updates[0].1.values, vec![json!("123")]);
    }

    #[tokio::test]
    async fn test_label_match_is_case_insensitive() {
        let hub = ScriptedHub::new(
            0,
            vec![remote_field("Build ID", "https://hub.example.com/api/fields/1")],
        );
        let reconciler = FieldReconciler::new(&hub, fast_policy());

        let report = reconciler
            .reconcile(
                &patch(json!({"project": "P", "version": "V", "build id": "123"})),
                &IdentifierOverride::default(),
            )
            .await
            .unwrap();

        assert_eq!(report.updated_count(), 1);
        assert_eq!(hub.updates().len(), 1);
    }

    #[tokio::test]
    async fn test_identifier_keys_never_reach_the_server() {
        let hub = ScriptedHub::new(
            0,
            vec![
                remote_field("project", "https://hub.example.com/api/fields/1"),
                remote_field("version", "https://hub.example.com/api/fields/2"),
                remote_field("Build ID", "https://hub.example.com/api/fields/3"),
            ],
        );
        let reconciler = FieldReconciler::new(&hub, fast_policy());

        let report = reconciler
            .reconcile(
                &patch(json!({"project": "P", "version": "V", "Build ID": "123"})),
                &IdentifierOverride::default(),
            )
            .await
            .unwrap();

        // exactly one update attempt, for Build ID
        assert_eq!(report.outcomes().len(), 1);
        let updates = hub.updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].1.label, "Build ID");
    }

    #[tokio::test]
    async fn test_lookup_retries_until_success() {
        let hub = ScriptedHub::new(
            3,
            vec![remote_field("Build ID", "https://hub.example.com/api/fields/1")],
        );
        let reconciler = FieldReconciler::new(&hub, fast_policy());

        let report = reconciler
            .reconcile(
                &patch(json!({"project": "P", "version": "V", "Build ID": "123"})),
                &IdentifierOverride::default(),
            )
            .await
            .unwrap();

        assert_eq!(hub.lookup_count(), 4);
        assert_eq!(report.updated_count(), 1);
    }

    #[tokio::test]
    async fn test_lookup_exhaustion_is_fatal() {
        let hub = ScriptedHub::new(usize::MAX, Vec::new());
        let reconciler = FieldReconciler::new(&hub, fast_policy());

        let err = reconciler
            .reconcile(
                &patch(json!({"project": "P", "version": "V", "Build ID": "123"})),
                &IdentifierOverride::default(),
            )
            .await
            .unwrap_err();

        assert_eq!(hub.lookup_count(), 4);
        assert!(matches!(
            err,
            FieldError::TargetNotFound { attempts: 4, .. }
        ));
        assert!(hub.updates().is_empty());
    }

    #[tokio::test]
    async fn test_overrides_take_precedence_for_target() {
        let hub = ScriptedHub::new(
            0,
            vec![remote_field("Build ID", "https://hub.example.com/api/fields/1")],
        );
        let reconciler = FieldReconciler::new(&hub, fast_policy());

        reconciler
            .reconcile(
                &patch(json!({"project": "P", "version": "V", "Build ID": "123"})),
                &IdentifierOverride::new(Some("P2".to_string()), Some("V2".to_string())),
            )
            .await
            .unwrap();

        let lookups = hub.lookups_seen.lock().unwrap().clone();
        assert_eq!(lookups[0], ("P2".to_string(), "V2".to_string()));
    }

    #[tokio::test]
    async fn test_unmatched_label_is_nonfatal() {
        let hub = ScriptedHub::new(
            0,
            vec![remote_field("Build ID", "https://hub.example.com/api/fields/1")],
        );
        let reconciler = FieldReconciler::new(&hub, fast_policy());

        let report = reconciler
            .reconcile(
                &patch(json!({
                    "project": "P",
                    "version": "V",
                    "No Such Field": "x",
                    "Build ID": "123"
                })),
                &IdentifierOverride::default(),
            )
            .await
            .unwrap();

        assert_eq!(report.not_found_count(), 1);
        assert_eq!(report.updated_count(), 1);
        assert_eq!(
            report.outcomes()[0],
            ("No Such Field".to_string(), FieldOutcome::NotFound)
        );
    }

    #[tokio::test]
    async fn test_update_failure_is_recorded_per_field() {
        let hub = ScriptedHub::new(
            0,
            vec![
                remote_field("Build ID", "https://hub.example.com/api/fields/1"),
                remote_field("Branch", "https://hub.example.com/api/fields/2"),
            ],
        )
        .with_update_status(412);
        let reconciler = FieldReconciler::new(&hub, fast_policy());

        let report = reconciler
            .reconcile(
                &patch(json!({
                    "project": "P",
                    "version": "V",
                    "Build ID": "123",
                    "Branch": "main"
                })),
                &IdentifierOverride::default(),
            )
            .await
            .unwrap();

        // both fields were attempted despite the first failing
        assert_eq!(report.failed_count(), 2);
        assert_eq!(hub.updates().len(), 2);
        assert_eq!(
            report.outcomes()[0].1,
            FieldOutcome::UpdateFailed { status: Some(412) }
        );
    }
}
