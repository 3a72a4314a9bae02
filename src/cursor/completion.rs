use std::fmt;
use std::future::Future;
use std::mem;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll, Waker};

use super::Cursor;

/// What a single call to [`Cursor::next`] resolves to.
///
/// `Ok(Some(item))` carries one item, `Ok(None)` signals that the cursor is
/// exhausted and `Err(error)` is a failure reported by the cursor.
pub type Outcome<T, E> = Result<Option<T>, E>;

/// The internal state shared by a [`Completion`] and its [`Fetch`].
enum Slot<T, E> {
    /// The cursor has not resolved yet; holds the waker of the last poll.
    Waiting(Option<Waker>),
    /// The cursor resolved and the outcome has not been read yet.
    Resolved(Outcome<T, E>),
    /// The completion was dropped without being resolved.
    Abandoned,
    /// The outcome has been handed to the fetch.
    Taken,
}

type Shared<T, E> = Arc<Mutex<Slot<T, E>>>;

fn lock<T, E>(shared: &Shared<T, E>) -> MutexGuard<'_, Slot<T, E>> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Store `next` in the slot and wake whoever is waiting on it.
fn settle<T, E>(shared: &Shared<T, E>, next: Slot<T, E>) {
    let waker = match mem::replace(&mut *lock(shared), next) {
        Slot::Waiting(waker) => waker,
        _ => None,
    };
    if let Some(waker) = waker {
        waker.wake();
    }
}

/// The callback handed to [`Cursor::next`].
///
/// A completion resolves exactly once: every resolving method takes `self`.
/// It may be resolved before `next` returns or at any later point, from any
/// thread when `T` and `E` are `Send`.
///
/// Dropping a completion without resolving it breaks the cursor contract;
/// the fetch waiting on it panics when it next observes the slot.
pub struct Completion<T, E> {
    shared: Option<Shared<T, E>>,
}

impl<T, E> Completion<T, E> {
    fn new() -> (Self, Fetch<T, E>) {
        let shared = Arc::new(Mutex::new(Slot::Waiting(None)));
        let completion = Completion {
            shared: Some(Arc::clone(&shared)),
        };
        (completion, Fetch { shared })
    }

    /// Resolve the fetch with a complete outcome.
    pub fn resolve(mut self, outcome: Outcome<T, E>) {
        if let Some(shared) = self.shared.take() {
            settle(&shared, Slot::Resolved(outcome));
        }
    }

    /// Resolve the fetch with one item.
    pub fn item(self, item: T) {
        self.resolve(Ok(Some(item)))
    }

    /// Signal that the cursor has no more items.
    pub fn exhausted(self) {
        self.resolve(Ok(None))
    }

    /// Resolve the fetch with an error.
    pub fn fail(self, error: E) {
        self.resolve(Err(error))
    }
}

impl<T, E> Drop for Completion<T, E> {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.take() {
            settle(&shared, Slot::Abandoned);
        }
    }
}

impl<T, E> fmt::Debug for Completion<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("resolved", &self.shared.is_none())
            .finish()
    }
}

/// Issue one fetch against `cursor`.
///
/// [`Cursor::next`] is called exactly once, right away. The returned future
/// suspends the caller until the cursor resolves the completion it was
/// given, then yields the outcome or the cursor's error.
pub fn fetch<C>(cursor: &mut C) -> Fetch<C::Item, C::Error>
where
    C: Cursor + ?Sized,
{
    let (completion, fetch) = Completion::new();
    cursor.next(completion);
    fetch
}

/// A single in-flight call to [`Cursor::next`].
///
/// This `struct` is created by the [`fetch`] function. See its documentation
/// for more.
#[must_use = "futures do nothing unless polled or .awaited"]
pub struct Fetch<T, E> {
    shared: Shared<T, E>,
}

impl<T, E> Future for Fetch<T, E> {
    type Output = Outcome<T, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut slot = lock(&self.shared);
        match mem::replace(&mut *slot, Slot::Taken) {
            Slot::Waiting(_) => {
                *slot = Slot::Waiting(Some(cx.waker().clone()));
                Poll::Pending
            }
            Slot::Resolved(outcome) => Poll::Ready(outcome),
            Slot::Abandoned => {
                drop(slot);
                panic!("cursor dropped its completion without resolving it")
            }
            Slot::Taken => {
                drop(slot);
                panic!("fetch polled after completion")
            }
        }
    }
}

impl<T, E> fmt::Debug for Fetch<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &*lock(&self.shared) {
            Slot::Waiting(_) => "waiting",
            Slot::Resolved(_) => "resolved",
            Slot::Abandoned => "abandoned",
            Slot::Taken => "taken",
        };
        f.debug_struct("Fetch").field("state", &state).finish()
    }
}
