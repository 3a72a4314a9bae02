use std::slice;
use std::vec;

/// One value yielded by an [`Iter`](crate::Iter).
///
/// Unbatched iterators yield [`Chunk::Item`]; batched iterators yield
/// [`Chunk::Batch`], which is never empty and holds at most the configured
/// batch size.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Chunk<T> {
    /// A single item.
    Item(T),
    /// A group of consecutive items, in cursor order.
    Batch(Vec<T>),
}

impl<T> Chunk<T> {
    /// Returns the number of items in the chunk.
    pub fn len(&self) -> usize {
        match self {
            Chunk::Item(_) => 1,
            Chunk::Batch(items) => items.len(),
        }
    }

    /// Returns `true` if the chunk holds no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` for [`Chunk::Batch`].
    pub fn is_batch(&self) -> bool {
        matches!(self, Chunk::Batch(_))
    }

    /// Returns the items as a slice.
    pub fn as_slice(&self) -> &[T] {
        match self {
            Chunk::Item(item) => slice::from_ref(item),
            Chunk::Batch(items) => items,
        }
    }

    /// Returns the single item, or `None` for a batch.
    pub fn into_item(self) -> Option<T> {
        match self {
            Chunk::Item(item) => Some(item),
            Chunk::Batch(_) => None,
        }
    }

    /// Returns the items as a vector, in cursor order.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Chunk::Item(item) => vec![item],
            Chunk::Batch(items) => items,
        }
    }
}

impl<T> From<Chunk<T>> for Vec<T> {
    fn from(chunk: Chunk<T>) -> Self {
        chunk.into_vec()
    }
}

impl<T> IntoIterator for Chunk<T> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}
