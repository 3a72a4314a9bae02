//! Errors raised by the adapter itself.
//!
//! Failures reported by a cursor are never wrapped in [`Error`]: they reach
//! the consumer of [`Iter`](crate::Iter) exactly as the cursor produced them.

/// Error raised while constructing a [`Sequence`](crate::Sequence) or taking
/// its iterator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The candidate passed to [`iterate`](crate::iterate) was not a cursor.
    #[error("expected cursor-like object")]
    TypeMismatch,
    /// An iterator was already taken from this sequence.
    #[error("already iterating on cursor")]
    AlreadyIterating,
}

/// The adapter result type.
pub type Result<T> = std::result::Result<T, Error>;
