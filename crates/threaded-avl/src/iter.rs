use std::iter::FusedIterator;

use crate::arena::Arena;
use crate::types::{Chain, Link};

/// Sorted-order iterator over an [`AvlSet`](crate::AvlSet), walking the
/// chain from both ends.
pub struct Iter<'a, T> {
    arena: &'a Arena<T>,
    front: Link,
    back: Link,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(arena: &'a Arena<T>, chain: Chain, len: usize) -> Self {
        Self {
            arena,
            front: chain.head,
            back: chain.tail,
            remaining: len,
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front.node()?;
        let node = &self.arena[id];
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back.node()?;
        let node = &self.arena[id];
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.v)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
