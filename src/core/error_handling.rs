//! Generic error handling utilities
//!
//! Provides unified fatal-error reporting that works across the area error
//! types while keeping their domain-specific logging patterns.

/// Trait for errors that can distinguish between user-actionable and system errors
///
/// User-actionable errors (bad flag values, malformed side files) should show
/// their specific message directly. System errors (network failures, IO) show
/// generic context and keep the detail at debug level.
///
/// When `is_user_actionable()` returns `true`, `user_message()` must return
/// `Some(message)`; when it returns `false`, `user_message()` must return
/// `None`.
pub trait ContextualError: std::error::Error {
    /// Returns true if this error carries a specific, user-actionable message
    /// that should be displayed directly
    fn is_user_actionable(&self) -> bool;

    /// The specific user message when this is a user-actionable error
    fn user_message(&self) -> Option<&str>;
}

/// Log a fatal error with appropriate detail level based on error specificity
pub fn log_error_with_context<E: ContextualError + std::fmt::Display + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    if error.is_user_actionable() {
        if let Some(user_msg) = error.user_message() {
            log::error!("FATAL: {}", user_msg);
        } else {
            log::error!("FATAL: {}", operation_context);
        }
    } else {
        log::error!("FATAL: {}", operation_context);
    }
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}
