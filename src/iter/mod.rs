//! Composable async iteration over cursors.
//!
//! A [`Sequence`] wraps a [`Cursor`](crate::Cursor) and hands out a single
//! [`Iter`], which awaits one fetch at a time and yields either single items
//! or fixed-size batches. [`Blocking`] drives the same iterator from
//! synchronous code.

mod blocking;
mod chunk;
mod sequence;
mod stream;

pub use blocking::Blocking;
pub use chunk::Chunk;
pub use sequence::{iterate, Sequence};
pub use stream::Iter;

/// A trait for dealing with async iterators.
pub trait AsyncIterator {
    /// The type of the elements being iterated over.
    type Item;

    /// Advances the iterator and returns the next value.
    async fn next(&mut self) -> Option<Self::Item>;
}
