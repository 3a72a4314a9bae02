use std::fmt;
use std::mem;

use tracing::debug;

use super::{Blocking, Iter};
use crate::cursor::{Cursor, IntoCursor};
use crate::error::{Error, Result};

/// Wrap a cursor-like value into a [`Sequence`].
///
/// `candidate` is checked before anything else happens: a `None` cursor
/// fails with [`Error::TypeMismatch`] and the cursor is never touched. A
/// `batch_size` of `None` or `Some(0)` means unbatched iteration; anything
/// larger groups items into batches of that size.
///
/// # Example
///
/// ```
/// use cursor_iter::cursor::{from_fn, Completion};
/// use cursor_iter::{iterate, Chunk, Error};
///
/// let mut items = vec![3, 2, 1];
/// let cursor = from_fn(move |completion: Completion<u32, ()>| match items.pop() {
///     Some(item) => completion.item(item),
///     None => completion.exhausted(),
/// });
///
/// let mut sequence = iterate(cursor, Some(2)).unwrap();
/// let batches: Vec<_> = sequence.blocking().unwrap().collect();
/// assert_eq!(batches, vec![Ok(Chunk::Batch(vec![1, 2])), Ok(Chunk::Batch(vec![3]))]);
///
/// // A sequence is single-pass.
/// assert_eq!(sequence.blocking().err(), Some(Error::AlreadyIterating));
/// ```
///
/// Values that are not cursors are rejected when the program is compiled:
///
/// ```compile_fail
/// let _ = cursor_iter::iterate(42u32, None);
/// ```
///
/// A `next` field that cannot be called does not make a cursor either:
///
/// ```compile_fail
/// struct NotACursor {
///     next: bool,
/// }
///
/// let _ = cursor_iter::iterate(NotACursor { next: true }, Some(2));
/// ```
pub fn iterate<T>(candidate: T, batch_size: Option<usize>) -> Result<Sequence<T::Cursor>>
where
    T: IntoCursor,
{
    let cursor = candidate.into_cursor()?;
    Ok(Sequence::with_batch_size(cursor, batch_size))
}

/// A single-pass view over a [`Cursor`].
///
/// The cursor moves into the [`Iter`] returned by the first call to
/// [`iter`](Sequence::iter) or [`blocking`](Sequence::blocking). From then on
/// the sequence only remembers that it was started; every later request for
/// an iterator fails with [`Error::AlreadyIterating`], whether or not the
/// first iterator has finished.
pub struct Sequence<C> {
    state: State<C>,
    batch_size: usize,
}

enum State<C> {
    NotStarted(C),
    Started,
}

impl<C: Cursor> Sequence<C> {
    /// Wrap `cursor` for unbatched iteration.
    pub fn new(cursor: C) -> Self {
        Self::with_batch_size(cursor, None)
    }

    /// Wrap `cursor`, grouping items into batches of `batch_size`.
    ///
    /// `None` and `Some(0)` fall back to a batch size of 1, which yields
    /// single items.
    pub fn with_batch_size(cursor: C, batch_size: Option<usize>) -> Self {
        let batch_size = batch_size.filter(|&size| size > 0).unwrap_or(1);
        Self {
            state: State::NotStarted(cursor),
            batch_size,
        }
    }

    /// The number of items grouped into each chunk.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Whether iteration yields [`Chunk::Batch`](crate::Chunk::Batch) values.
    pub fn is_batched(&self) -> bool {
        self.batch_size > 1
    }

    /// Whether an iterator has already been taken.
    pub fn is_started(&self) -> bool {
        matches!(self.state, State::Started)
    }

    /// Take the one and only iterator over the cursor.
    pub fn iter(&mut self) -> Result<Iter<C>> {
        match mem::replace(&mut self.state, State::Started) {
            State::NotStarted(cursor) => {
                debug!(batch_size = self.batch_size, "starting iteration");
                Ok(Iter::new(cursor, self.batch_size))
            }
            State::Started => {
                debug!("rejected second iterator");
                Err(Error::AlreadyIterating)
            }
        }
    }

    /// Take the one and only iterator, driven synchronously.
    ///
    /// Each step blocks the current thread on
    /// [`runtime::block_on`](crate::runtime::block_on), so the returned
    /// iterator must not be advanced from inside another `block_on`.
    pub fn blocking(&mut self) -> Result<Blocking<C>> {
        self.iter().map(Blocking::new)
    }
}

impl<C> fmt::Debug for Sequence<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("batch_size", &self.batch_size)
            .field("started", &matches!(self.state, State::Started))
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cursor::{from_fn, Completion};

    fn empty() -> impl Cursor<Item = u8, Error = ()> {
        from_fn(|completion: Completion<u8, ()>| completion.exhausted())
    }

    #[test]
    fn batch_size_defaults() {
        assert_eq!(Sequence::new(empty()).batch_size(), 1);
        assert_eq!(Sequence::with_batch_size(empty(), None).batch_size(), 1);
        assert_eq!(Sequence::with_batch_size(empty(), Some(0)).batch_size(), 1);
        assert!(!Sequence::with_batch_size(empty(), Some(1)).is_batched());

        let batched = Sequence::with_batch_size(empty(), Some(7));
        assert_eq!(batched.batch_size(), 7);
        assert!(batched.is_batched());
    }

    #[test]
    fn construction_does_not_touch_cursor() {
        let mut calls = 0;
        let sequence = Sequence::new(from_fn(|completion: Completion<u8, ()>| {
            calls += 1;
            completion.exhausted();
        }));
        drop(sequence);
        assert_eq!(calls, 0);
    }

    #[test]
    fn null_cursor_is_rejected() {
        let err = iterate(None::<Box<dyn Cursor<Item = u8, Error = ()>>>, Some(3)).unwrap_err();
        assert_eq!(err, Error::TypeMismatch);
    }

    #[test]
    fn one_way_guard() {
        let mut sequence = Sequence::new(empty());
        assert!(!sequence.is_started());
        let iter = sequence.iter().unwrap();
        assert!(sequence.is_started());
        assert_eq!(sequence.iter().err(), Some(Error::AlreadyIterating));
        drop(iter);
        assert_eq!(sequence.blocking().err(), Some(Error::AlreadyIterating));
        assert!(sequence.is_started());
    }

    #[test]
    fn debug_output() {
        let mut sequence = Sequence::with_batch_size(empty(), Some(2));
        assert_eq!(format!("{sequence:?}"), "Sequence { batch_size: 2, started: false }");
        let _ = sequence.iter();
        assert_eq!(format!("{sequence:?}"), "Sequence { batch_size: 2, started: true }");
    }
}
