use std::fmt;
use std::future::poll_fn;
use std::iter::FusedIterator;
use std::pin::Pin;

use futures_core::stream::Stream;

use super::{Chunk, Iter};
use crate::cursor::Cursor;
use crate::runtime::block_on;

/// An [`Iter`] driven as a blocking [`Iterator`].
///
/// Every call to [`Iterator::next`] blocks the current thread until the
/// cursor resolves the fetches needed for one chunk. This lets plain `for`
/// loops and `collect` consume a cursor from synchronous code.
///
/// This `struct` is created by the [`blocking`] method on [`Sequence`] or
/// [`Iter`]. See their documentation for more.
///
/// [`blocking`]: crate::Sequence::blocking
/// [`Sequence`]: crate::Sequence
pub struct Blocking<C: Cursor> {
    iter: Iter<C>,
}

impl<C: Cursor> Blocking<C> {
    pub(crate) fn new(iter: Iter<C>) -> Self {
        Self { iter }
    }

    /// Returns the underlying async iterator.
    pub fn into_inner(self) -> Iter<C> {
        self.iter
    }
}

impl<C: Cursor> Iterator for Blocking<C> {
    type Item = Result<Chunk<C::Item>, C::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.iter.is_done() {
            return None;
        }
        let iter = &mut self.iter;
        block_on(poll_fn(|cx| Pin::new(&mut *iter).poll_next(cx)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<C: Cursor> FusedIterator for Blocking<C> {}

impl<C: Cursor> fmt::Debug for Blocking<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Blocking").field(&self.iter).finish()
    }
}
