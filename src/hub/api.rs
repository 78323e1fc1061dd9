//! Hub API
//!
//! Public exports for the hub transport layer, following the same api module
//! pattern as the other areas.

pub use crate::hub::config::HubConfig;
pub use crate::hub::error::{TransportError, TransportResult};
pub use crate::hub::session::HubSession;
pub use crate::hub::traits::ScanTransport;
pub use crate::hub::types::{
    FieldDefinition, RemoteField, RemoteObjectRef, ResourceLink, ResourceMeta,
};
