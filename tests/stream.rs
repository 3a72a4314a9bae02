mod common;

use common::VecCursor;
use cursor_iter::{Chunk, Sequence};
use futures_concurrency::future::Join;
use futures_lite::prelude::*;

#[cursor_iter::test]
async fn stream_combinators() -> anyhow::Result<()> {
    let mut sequence = Sequence::with_batch_size(VecCursor::new(vec![1, 2, 3, 4, 5]), Some(2));
    let lens: Vec<usize> = sequence
        .iter()?
        .map(|chunk| chunk.map(|chunk| chunk.len()).unwrap_or(0))
        .collect()
        .await;
    assert_eq!(lens, [2, 2, 1]);
    Ok(())
}

#[cursor_iter::test]
async fn sequences_run_concurrently() -> anyhow::Result<()> {
    let mut letters = Sequence::new(VecCursor::new(vec!['a', 'b', 'c']));
    let mut numbers = Sequence::with_batch_size(VecCursor::new(vec![1, 2, 3]), Some(2));

    let (letters, numbers) = (
        letters.iter()?.collect::<Vec<_>>(),
        numbers.iter()?.collect::<Vec<_>>(),
    )
        .join()
        .await;

    let letters: Vec<char> = letters
        .into_iter()
        .map(|chunk| chunk.map(Chunk::into_vec))
        .collect::<Result<Vec<_>, _>>()?
        .concat();
    assert_eq!(letters, ['a', 'b', 'c']);
    assert_eq!(
        numbers.into_iter().collect::<Result<Vec<_>, _>>()?,
        [Chunk::Batch(vec![1, 2]), Chunk::Batch(vec![3])]
    );
    Ok(())
}
