//! Shared error context behaviour

/// Common read surface of message and segment error contexts
pub trait ErrorContext {
    /// Message type or segment tag this context describes
    fn name(&self) -> &str;

    /// Free-text description of a failure that is not tied to a code
    fn message(&self) -> Option<&str> {
        None
    }

    /// Whether at least one violation has been recorded
    fn has_errors(&self) -> bool;
}
