use std::fmt;
use std::future::{poll_fn, Future};
use std::mem;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::stream::{FusedStream, Stream};
use futures_core::ready;
use tracing::{debug, trace};

use super::{AsyncIterator, Blocking, Chunk};
use crate::cursor::{fetch, Cursor, Fetch, Outcome};

/// The single iterator of a [`Sequence`](crate::Sequence).
///
/// Each step awaits one fetch (unbatched) or up to `batch_size` consecutive
/// fetches (batched), strictly one after another. Once the cursor reports
/// exhaustion the iterator is done for good and the cursor is not asked
/// again.
///
/// An error reported by the cursor is yielded as-is. In batched mode the
/// items gathered for the current batch before the error are discarded.
///
/// This `struct` is created by the [`iter`] method on [`Sequence`]. See its
/// documentation for more.
///
/// [`iter`]: crate::Sequence::iter
/// [`Sequence`]: crate::Sequence
#[must_use = "streams do nothing unless polled or .awaited"]
pub struct Iter<C: Cursor> {
    cursor: C,
    batch_size: usize,
    in_flight: Option<Fetch<C::Item, C::Error>>,
    batch: Vec<C::Item>,
    state: State,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// The cursor may still yield items.
    Active,
    /// The cursor signalled exhaustion.
    Done,
}

// The cursor is never polled in place, so pinning `Iter` pins nothing.
impl<C: Cursor> Unpin for Iter<C> {}

impl<C: Cursor> Iter<C> {
    pub(crate) fn new(cursor: C, batch_size: usize) -> Self {
        Self {
            cursor,
            batch_size,
            in_flight: None,
            batch: Vec::new(),
            state: State::Active,
        }
    }

    /// The number of items grouped into each chunk.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Whether chunks are yielded as [`Chunk::Batch`].
    pub fn is_batched(&self) -> bool {
        self.batch_size > 1
    }

    /// Whether the cursor has signalled exhaustion.
    pub fn is_done(&self) -> bool {
        self.state == State::Done
    }

    /// Drive this iterator from synchronous code.
    pub fn blocking(self) -> Blocking<C> {
        Blocking::new(self)
    }

    /// Poll the outstanding fetch, issuing one if none is in flight.
    fn poll_fetch(&mut self, cx: &mut Context<'_>) -> Poll<Outcome<C::Item, C::Error>> {
        let in_flight = match &mut self.in_flight {
            Some(in_flight) => in_flight,
            slot => {
                trace!(buffered = self.batch.len(), "fetching from cursor");
                slot.insert(fetch(&mut self.cursor))
            }
        };
        let outcome = ready!(Pin::new(in_flight).poll(cx));
        trace!(
            item = matches!(outcome, Ok(Some(_))),
            failed = outcome.is_err(),
            "fetch resolved"
        );
        self.in_flight = None;
        Poll::Ready(outcome)
    }

    fn take_batch(&mut self) -> Chunk<C::Item> {
        let batch = mem::take(&mut self.batch);
        debug!(len = batch.len(), "yielding batch");
        Chunk::Batch(batch)
    }
}

impl<C: Cursor> Stream for Iter<C> {
    type Item = Result<Chunk<C::Item>, C::Error>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if this.state == State::Done {
                return Poll::Ready(None);
            }

            match ready!(this.poll_fetch(cx)) {
                Ok(Some(item)) if !this.is_batched() => {
                    return Poll::Ready(Some(Ok(Chunk::Item(item))));
                }
                Ok(Some(item)) => {
                    this.batch.push(item);
                    if this.batch.len() == this.batch_size {
                        return Poll::Ready(Some(Ok(this.take_batch())));
                    }
                }
                Ok(None) => {
                    debug!(buffered = this.batch.len(), "cursor exhausted");
                    this.state = State::Done;
                    if this.batch.is_empty() {
                        return Poll::Ready(None);
                    }
                    // The short final batch; the next poll reports the end.
                    return Poll::Ready(Some(Ok(this.take_batch())));
                }
                Err(error) => {
                    this.batch.clear();
                    return Poll::Ready(Some(Err(error)));
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.state {
            State::Active => (0, None),
            State::Done => (0, Some(0)),
        }
    }
}

impl<C: Cursor> FusedStream for Iter<C> {
    fn is_terminated(&self) -> bool {
        self.is_done()
    }
}

impl<C: Cursor> AsyncIterator for Iter<C> {
    type Item = Result<Chunk<C::Item>, C::Error>;

    async fn next(&mut self) -> Option<Self::Item> {
        poll_fn(|cx| Pin::new(&mut *self).poll_next(cx)).await
    }
}

impl<C: Cursor> fmt::Debug for Iter<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("batch_size", &self.batch_size)
            .field("buffered", &self.batch.len())
            .field("in_flight", &self.in_flight.is_some())
            .field("state", &self.state)
            .finish()
    }
}
