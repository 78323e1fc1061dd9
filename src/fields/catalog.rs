//! Custom field provisioning for the `create-fields` command

use std::path::Path;

use crate::fields::error::{FieldError, FieldResult};
use crate::fields::types::CatalogReport;
use crate::hub::api::{FieldDefinition, ScanTransport};

fn text_field(label: &str, description: &str) -> FieldDefinition {
    FieldDefinition {
        object: "Project Version".to_string(),
        label: label.to_string(),
        description: description.to_string(),
        field_type: "TEXT".to_string(),
        position: 0,
        initial_options: Vec::new(),
    }
}

/// The field set provisioned when no definitions file is given: the build
/// traceability fields CI pipelines stamp onto a project-version.
pub fn default_definitions() -> Vec<FieldDefinition> {
    vec![
        text_field("Build ID", "Build ID"),
        text_field("Commit ID", "Commit ID"),
        text_field("Branch", "Branch"),
        text_field("Build Server", "Build server URL or ID"),
    ]
}

/// Read a JSON array of field definitions from disk
pub fn load_definitions(path: &Path) -> FieldResult<Vec<FieldDefinition>> {
    let text = std::fs::read_to_string(path).map_err(|e| FieldError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    serde_json::from_str(&text).map_err(|e| FieldError::Definitions {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Create each definition on the server, one call per definition.
///
/// Failures are counted, never batch-fatal, so one bad definition does not
/// block the rest of the set.
pub async fn provision_fields<T: ScanTransport>(
    transport: &T,
    definitions: &[FieldDefinition],
) -> CatalogReport {
    let mut report = CatalogReport::default();

    for definition in definitions {
        log::debug!(
            "Creating custom field '{}' on object type '{}'",
            definition.label,
            definition.object
        );
        match transport.create_custom_field(definition).await {
            Ok(status) if (200..300).contains(&status) => {
                log::info!(
                    "Result of creating custom field '{}' ({}) was: {}",
                    definition.label,
                    definition.object,
                    status
                );
                report.created += 1;
            }
            Ok(status) => {
                log::error!(
                    "Result of creating custom field '{}' ({}) was: {}",
                    definition.label,
                    definition.object,
                    status
                );
                report.failed += 1;
            }
            Err(e) => {
                log::error!("Failed creating custom field '{}': {}", definition.label, e);
                report.failed += 1;
            }
        }
    }

    report
}
