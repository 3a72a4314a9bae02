#![allow(async_fn_in_trait)]
#![warn(future_incompatible, unreachable_pub)]
//#![deny(missing_debug_implementations)]
//#![warn(missing_docs)]

//! Single-pass iteration over callback-based cursors.
//!
//! A cursor is anything that produces items one at a time by calling back:
//! a database cursor, a paginated API client, a queue consumer. This crate
//! wraps such a cursor in a [`Sequence`] that can be consumed with ordinary
//! loops, either asynchronously through [`Iter`] or synchronously through
//! [`Blocking`], optionally grouping items into fixed-size batches.
//!
//! # Examples
//!
//! **Unbatched, async**
//!
//! ```rust
//! use cursor_iter::cursor::{from_fn, Completion};
//! use cursor_iter::prelude::*;
//! use cursor_iter::{runtime, Chunk, Sequence};
//!
//! let mut items = vec![3, 2, 1];
//! let cursor = from_fn(move |completion: Completion<u32, ()>| match items.pop() {
//!     Some(item) => completion.item(item),
//!     None => completion.exhausted(),
//! });
//!
//! let mut sequence = Sequence::new(cursor);
//! let mut iter = sequence.iter().unwrap();
//! runtime::block_on(async {
//!     while let Some(chunk) = iter.next().await {
//!         println!("{:?}", chunk.unwrap().into_item());
//!     }
//! });
//! ```
//!
//! **Batched, blocking**
//!
//! ```rust
//! use cursor_iter::cursor::{from_fn, Completion};
//! use cursor_iter::Sequence;
//!
//! let mut next = 0;
//! let cursor = from_fn(move |completion: Completion<u32, ()>| {
//!     next += 1;
//!     if next <= 5 { completion.item(next) } else { completion.exhausted() }
//! });
//!
//! let mut sequence = Sequence::with_batch_size(cursor, Some(2));
//! let sizes: Vec<usize> = sequence
//!     .blocking()
//!     .unwrap()
//!     .map(|batch| batch.unwrap().len())
//!     .collect();
//! assert_eq!(sizes, [2, 2, 1]);
//! ```
//!
//! **Async main**
//!
//! ```rust
//! use cursor_iter::cursor::{from_fn, Completion};
//! use cursor_iter::prelude::*;
//! use cursor_iter::Sequence;
//!
//! #[cursor_iter::main]
//! async fn main() {
//!     let cursor = from_fn(|completion: Completion<u32, ()>| completion.exhausted());
//!     let mut sequence = Sequence::new(cursor);
//!     let mut iter = sequence.iter().unwrap();
//!     assert!(iter.next().await.is_none());
//! }
//! ```
//!
//! # Design Decisions
//!
//! A sequence can be iterated exactly once. Taking its iterator moves the
//! cursor out of it, so there is never a second handle to the cursor's
//! state, and asking again fails with [`Error::AlreadyIterating`].
//!
//! Fetches are strictly sequential: an iterator never has more than one
//! [`Completion`] outstanding, and batches are gathered by awaiting one
//! fetch after another. Items come out in the order the cursor produced
//! them.
//!
//! Errors reported by a cursor are handed to the consumer unchanged. They
//! are not retried, logged or wrapped. When one interrupts a batch, the
//! items already gathered for that batch are dropped.
//!
//! Once a cursor signals exhaustion the iterator stays exhausted and the
//! cursor is not called again.

pub mod cursor;
pub mod error;
pub mod iter;
pub mod runtime;

pub use cursor::{Completion, Cursor, IntoCursor};
pub use error::{Error, Result};
pub use iter::{iterate, Blocking, Chunk, Iter, Sequence};

pub use cursor_iter_macro::attr_macro_main as main;
pub use cursor_iter_macro::attr_macro_test as test;

pub mod prelude {
    pub use crate::iter::AsyncIterator as _;
}
