//! Async execution support.
//!
//! Every fetch issued against a [`Cursor`](crate::Cursor) is a future that
//! only makes progress when something polls it. [`block_on()`] is the
//! smallest host that does so: it drives one future on the current thread,
//! parking the thread while the future is pending and resuming it when the
//! cursor resolves its completion, whether that happens synchronously or
//! from another thread.

#![deny(missing_debug_implementations, nonstandard_style)]
#![warn(missing_docs, unreachable_pub)]

mod block_on;

pub use block_on::block_on;

use std::cell::Cell;

std::thread_local! {
    /// Whether a `block_on` call is currently running on this thread.
    static RUNNING: Cell<bool> = const { Cell::new(false) };
}
