//! Upload API
//!
//! Public exports for upload dispatch.

pub use crate::upload::dispatcher::{UploadDispatcher, UploadReceipt};
pub use crate::upload::error::{UploadError, UploadResult};
