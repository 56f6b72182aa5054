//! Snapshot-based enumerators over tree contents.

/// Lazy, restartable enumerator over an ordered snapshot of values.
///
/// A cursor clones the relevant sequence out of the container when it is
/// created, so structural mutation of the container never invalidates an
/// in-progress enumeration and is never reflected by it. Besides the std
/// [`Iterator`] impl, the cursor can [`peek`](Self::peek) without advancing
/// and [`rewind`](Self::rewind) to replay the same elements.
#[derive(Debug, Clone)]
pub struct Cursor<T> {
    items: Vec<T>,
    pos: usize,
}

impl<T> Cursor<T> {
    pub(crate) fn new(items: Vec<T>) -> Self {
        Self { items, pos: 0 }
    }

    /// True when at least one element remains.
    pub fn has_next(&self) -> bool {
        self.pos < self.items.len()
    }

    /// The element a call to `next` would yield, without advancing.
    pub fn peek(&self) -> Option<&T> {
        self.items.get(self.pos)
    }

    /// Restarts the enumeration from the first element of the snapshot.
    pub fn rewind(&mut self) {
        self.pos = 0;
    }

    /// Total number of elements in the snapshot, regardless of position.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Clone> Iterator for Cursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let item = self.items.get(self.pos).cloned();
        if item.is_some() {
            self.pos += 1;
        }
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.items.len() - self.pos;
        (remaining, Some(remaining))
    }
}
