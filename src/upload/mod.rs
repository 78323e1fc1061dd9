//! Upload dispatch
//!
//! Submits loaded scan artifacts to the server, routing rewritten documents
//! through a uniquely-named temporary file that is cleaned up afterwards.

pub mod api;
pub mod dispatcher;
pub mod error;
