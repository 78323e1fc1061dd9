//! Fields API
//!
//! Public exports for patch sets, reconciliation and field provisioning.

pub use crate::fields::catalog::{default_definitions, load_definitions, provision_fields};
pub use crate::fields::error::{FieldError, FieldResult};
pub use crate::fields::patchset::FieldPatchSet;
pub use crate::fields::reconciler::FieldReconciler;
pub use crate::fields::types::{CatalogReport, FieldOutcome, ReconcileReport};
