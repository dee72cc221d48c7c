use core::slice;

use crate::raw::RawAllocator;
use crate::vec::GrowVec;

/// Forward iterator over the elements of a `GrowVec`
///
/// This iterator implements `Clone`, so a traversal can be restarted from any
/// saved position.
#[derive(Clone, Debug)]
pub struct GrowVecIter<'a, T> {
    inner: slice::Iter<'a, T>,
}

impl<'a, T> GrowVecIter<'a, T> {
    pub(crate) fn new(elements: &'a [T]) -> Self {
        Self {
            inner: elements.iter(),
        }
    }
}

impl<'a, T> Iterator for GrowVecIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for GrowVecIter<'_, T> {}

impl<'a, T: Copy, A: RawAllocator> IntoIterator for &'a GrowVec<T, A> {
    type Item = &'a T;
    type IntoIter = GrowVecIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T: Copy, A: RawAllocator> IntoIterator for &'a mut GrowVec<T, A> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
