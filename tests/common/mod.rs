#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use cursor_iter::{Completion, Cursor};

/// The error reported by a [`VecCursor`] configured to fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("fetch {0} failed")]
pub struct FetchError(pub usize);

/// A cursor over a vector that answers each fetch from a short-lived thread,
/// the way a driver would call back once I/O completes.
pub struct VecCursor<T> {
    items: std::vec::IntoIter<T>,
    calls: Arc<AtomicUsize>,
    fail_on: Option<usize>,
    deferred: bool,
}

impl<T> VecCursor<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: items.into_iter(),
            calls: Arc::new(AtomicUsize::new(0)),
            fail_on: None,
            deferred: true,
        }
    }

    /// Resolve completions before `next` returns.
    pub fn immediate(mut self) -> Self {
        self.deferred = false;
        self
    }

    /// Fail the `call`-th fetch (1-based) instead of yielding an item.
    pub fn fail_on(mut self, call: usize) -> Self {
        self.fail_on = Some(call);
        self
    }

    /// A handle on the number of fetches issued so far.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl<T: Send + 'static> Cursor for VecCursor<T> {
    type Item = T;
    type Error = FetchError;

    fn next(&mut self, completion: Completion<T, FetchError>) {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        let outcome = match self.fail_on {
            Some(fail_on) if fail_on == call => Err(FetchError(call)),
            _ => Ok(self.items.next()),
        };
        if self.deferred {
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(1));
                completion.resolve(outcome);
            });
        } else {
            completion.resolve(outcome);
        }
    }
}

pub fn calls(handle: &Arc<AtomicUsize>) -> usize {
    handle.load(Ordering::SeqCst)
}
