//! Errors raised by the map itself. Producer failures are never wrapped;
//! they surface as the map's `E` type parameter.

use thiserror::Error;

/// An operation the lazy map refuses to perform.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedOperation {
    /// Entries handed out by a view are read-only projections of the map.
    #[error("Cannot replace value")]
    ReplaceValue,

    /// Answering would require evaluating every pending producer.
    #[error("Cannot check for values")]
    ContainsValue,
}

#[cfg(test)]
mod tests {
    use super::UnsupportedOperation;

    /// Invariant: Each refusal renders a message naming the refused operation.
    #[test]
    fn messages_name_the_operation() {
        assert_eq!(
            UnsupportedOperation::ReplaceValue.to_string(),
            "Cannot replace value"
        );
        assert_eq!(
            UnsupportedOperation::ContainsValue.to_string(),
            "Cannot check for values"
        );
    }
}
