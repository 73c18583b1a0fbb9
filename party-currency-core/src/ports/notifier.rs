//! Notification sink for user feedback
//!
//! The feedback pipeline reports loading, success and error states through
//! this trait. The CLI renders them as spinners and colored lines; tests
//! record them.

/// A loading notification that is still showing
pub trait Pending: Send {
    /// Replace the loading state with a success message, or just clear it
    fn succeed(self: Box<Self>, message: Option<&str>);

    /// Replace the loading state with an error message
    fn fail(self: Box<Self>, message: &str);
}

pub trait Notifier: Send + Sync {
    /// Start a loading notification
    fn loading(&self, message: &str) -> Box<dyn Pending>;

    fn success(&self, message: &str);

    fn error(&self, message: &str);

    fn info(&self, message: &str);
}
