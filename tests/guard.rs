mod common;

use common::{calls, VecCursor};
use cursor_iter::{iterate, Cursor, Error, Sequence};

#[test_log::test]
fn rejects_null_cursor() {
    let err = iterate(None::<VecCursor<u32>>, None).unwrap_err();
    assert_eq!(err, Error::TypeMismatch);
    assert_eq!(err.to_string(), "expected cursor-like object");

    let boxed: Option<Box<dyn Cursor<Item = u32, Error = common::FetchError>>> = None;
    assert_eq!(iterate(boxed, Some(2)).unwrap_err(), Error::TypeMismatch);
}

#[test_log::test]
fn accepts_cursors_without_fetching() {
    let cursor = VecCursor::new(vec![1u32]);
    let fetches = cursor.calls();

    let sequence = iterate(Some(cursor), Some(0)).unwrap();
    assert_eq!(sequence.batch_size(), 1);
    assert!(!sequence.is_started());
    assert_eq!(calls(&fetches), 0);

    let sequence = iterate(VecCursor::new(vec![1u32]), Some(4)).unwrap();
    assert!(sequence.is_batched());
}

#[test_log::test]
fn second_iterator_before_exhaustion() {
    let mut sequence = Sequence::new(VecCursor::new(vec![1u32, 2]));
    let mut first = sequence.blocking().unwrap();
    assert!(first.next().is_some());

    let err = sequence.iter().unwrap_err();
    assert!(err.to_string().contains("already iterating"));

    // The first iterator is unaffected.
    assert_eq!(first.count(), 1);
}

#[test_log::test]
fn second_iterator_after_exhaustion() {
    let mut sequence = Sequence::new(VecCursor::<u32>::new(vec![]));
    for _ in sequence.blocking().unwrap() {
        unreachable!("expected the sequence to be empty");
    }

    let err = sequence.blocking().unwrap_err();
    assert_eq!(err, Error::AlreadyIterating);
    assert!(err.to_string().contains("already iterating"));
}
