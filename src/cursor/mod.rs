//! Callback-based cursors.
//!
//! A [`Cursor`] hands out one item per call to [`Cursor::next`], reporting
//! the result through a [`Completion`] rather than a return value. The
//! [`fetch`] function turns one such call into a future, which is what the
//! iterators in [`crate::iter`] await.

mod completion;
mod from_fn;

pub use completion::{fetch, Completion, Fetch, Outcome};
pub use from_fn::{from_fn, FromFn};

use crate::error::{Error, Result};

/// A source of items that produces them one at a time through a callback.
///
/// Each call to `next` must resolve the given completion exactly once, with
/// an item, with the exhaustion signal, or with an error. The completion may
/// be resolved before `next` returns or later, from another thread.
///
/// Callers never issue a second `next` while a previous completion is still
/// outstanding.
pub trait Cursor {
    /// The type of the items produced by the cursor.
    type Item;

    /// The error reported when a fetch fails.
    type Error;

    /// Start fetching the next item.
    fn next(&mut self, completion: Completion<Self::Item, Self::Error>);
}

impl<C: Cursor + ?Sized> Cursor for &mut C {
    type Item = C::Item;
    type Error = C::Error;

    fn next(&mut self, completion: Completion<Self::Item, Self::Error>) {
        (**self).next(completion)
    }
}

impl<C: Cursor + ?Sized> Cursor for Box<C> {
    type Item = C::Item;
    type Error = C::Error;

    fn next(&mut self, completion: Completion<Self::Item, Self::Error>) {
        (**self).next(completion)
    }
}

/// Conversion into a [`Cursor`], checked when a sequence is constructed.
///
/// Every cursor converts into itself. An `Option` converts when it holds a
/// cursor and fails with [`Error::TypeMismatch`] when it is `None`.
pub trait IntoCursor {
    /// The cursor this value turns into.
    type Cursor: Cursor;

    /// Convert `self` into a cursor.
    fn into_cursor(self) -> Result<Self::Cursor>;
}

impl<C: Cursor> IntoCursor for C {
    type Cursor = C;

    fn into_cursor(self) -> Result<Self::Cursor> {
        Ok(self)
    }
}

impl<C: Cursor> IntoCursor for Option<C> {
    type Cursor = C;

    fn into_cursor(self) -> Result<Self::Cursor> {
        self.ok_or(Error::TypeMismatch)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::runtime::block_on;

    struct Countdown(u32);

    impl Cursor for Countdown {
        type Item = u32;
        type Error = ();

        fn next(&mut self, completion: Completion<u32, ()>) {
            match self.0 {
                0 => completion.exhausted(),
                n => {
                    self.0 -= 1;
                    completion.item(n);
                }
            }
        }
    }

    #[test]
    fn forwarding_impls() {
        let mut cursor = Countdown(2);
        assert_eq!(block_on(fetch(&mut &mut cursor)), Ok(Some(2)));

        let mut boxed: Box<dyn Cursor<Item = u32, Error = ()>> = Box::new(cursor);
        assert_eq!(block_on(fetch(&mut boxed)), Ok(Some(1)));
        assert_eq!(block_on(fetch(&mut boxed)), Ok(None));
    }

    #[test]
    fn into_cursor() {
        assert!(Countdown(1).into_cursor().is_ok());
        assert!(Some(Countdown(1)).into_cursor().is_ok());
        assert_eq!(
            None::<Countdown>.into_cursor().err(),
            Some(Error::TypeMismatch)
        );
    }
}
