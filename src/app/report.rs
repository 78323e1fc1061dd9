//! Aggregate run report
//!
//! Per-item failures never abort a run, so the only place they become
//! visible outside the logs is this report. Startup prints the summary and
//! decides the exit code from it.

use crate::fields::api::{CatalogReport, ReconcileReport};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub scans_uploaded: usize,
    pub scans_failed: usize,
    pub fields_updated: usize,
    pub fields_not_found: usize,
    pub field_updates_failed: usize,
    pub definitions_created: usize,
    pub definitions_failed: usize,
}

impl RunReport {
    pub fn absorb_reconcile(&mut self, report: &ReconcileReport) {
        self.fields_updated += report.updated_count();
        self.fields_not_found += report.not_found_count();
        self.field_updates_failed += report.failed_count();
    }

    pub fn absorb_catalog(&mut self, report: &CatalogReport) {
        self.definitions_created += report.created;
        self.definitions_failed += report.failed;
    }

    /// True when any per-item unit of work failed
    pub fn has_failures(&self) -> bool {
        self.scans_failed > 0 || self.field_updates_failed > 0 || self.definitions_failed > 0
    }

    /// One-line summary covering the stages that actually ran
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.scans_uploaded + self.scans_failed > 0 {
            parts.push(format!(
                "scans: {} uploaded, {} failed",
                self.scans_uploaded, self.scans_failed
            ));
        }
        if self.fields_updated + self.fields_not_found + self.field_updates_failed > 0 {
            parts.push(format!(
                "custom fields: {} updated, {} not found, {} failed",
                self.fields_updated, self.fields_not_found, self.field_updates_failed
            ));
        }
        if self.definitions_created + self.definitions_failed > 0 {
            parts.push(format!(
                "field definitions: {} created, {} failed",
                self.definitions_created, self.definitions_failed
            ));
        }
        if parts.is_empty() {
            "nothing to do".to_string()
        } else {
            parts.join("; ")
        }
    }
}
