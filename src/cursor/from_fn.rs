use std::fmt;
use std::marker::PhantomData;

use super::{Completion, Cursor};

/// Create a cursor from a closure.
///
/// The closure is called once per fetch and must resolve the completion it
/// receives, exactly as [`Cursor::next`] would.
///
/// # Example
///
/// ```
/// use cursor_iter::cursor::{from_fn, Completion};
///
/// let mut items = vec![3, 2, 1];
/// let cursor = from_fn(move |completion: Completion<u32, ()>| match items.pop() {
///     Some(item) => completion.item(item),
///     None => completion.exhausted(),
/// });
/// # drop(cursor);
/// ```
pub fn from_fn<T, E, F>(f: F) -> FromFn<F, T, E>
where
    F: FnMut(Completion<T, E>),
{
    FromFn {
        f,
        _marker: PhantomData,
    }
}

/// A cursor backed by a closure.
///
/// This `struct` is created by the [`from_fn`] function. See its
/// documentation for more.
pub struct FromFn<F, T, E> {
    f: F,
    _marker: PhantomData<fn() -> (T, E)>,
}

impl<F, T, E> Cursor for FromFn<F, T, E>
where
    F: FnMut(Completion<T, E>),
{
    type Item = T;
    type Error = E;

    fn next(&mut self, completion: Completion<T, E>) {
        (self.f)(completion)
    }
}

impl<F, T, E> fmt::Debug for FromFn<F, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromFn").finish_non_exhaustive()
    }
}
