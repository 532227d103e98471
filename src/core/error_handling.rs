//! Generic error reporting for fatal setup failures
//!
//! Errors that reach the command boundary are logged through
//! [`log_error_with_context`], which decides between showing the error's own
//! message and a generic operation label.

/// Trait for errors that can distinguish between user-actionable and system errors
///
/// When `is_user_actionable()` returns `true`, `user_message()` should return
/// `Some(message)`; otherwise it should return `None`.
pub trait ContextualError: std::error::Error {
    /// True when the message tells the user what to fix (bad path, bad flag)
    fn is_user_actionable(&self) -> bool;

    /// The message to show directly to the user, if any
    fn user_message(&self) -> Option<&str>;
}

/// Log a fatal error with detail appropriate to its kind.
///
/// User-actionable errors print their own message; system errors print the
/// operation label and leave the detail for debug level.
pub fn log_error_with_context<E: ContextualError + std::fmt::Display + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    match error.user_message() {
        Some(user_msg) if error.is_user_actionable() => log::error!("FATAL: {}", user_msg),
        _ => log::error!("FATAL: {}: {}", operation_context, error),
    }
    log::debug!("DEBUG_DETAILS: {:?}", error);
}

/// Render an error the same way for stderr when logging is unavailable
pub fn describe_error<E: ContextualError + std::fmt::Display>(
    error: &E,
    operation_context: &str,
) -> String {
    match error.user_message() {
        Some(user_msg) if error.is_user_actionable() => user_msg.to_string(),
        _ => format!("{}: {}", operation_context, error),
    }
}
