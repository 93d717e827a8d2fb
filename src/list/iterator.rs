use crate::list::{Links, NodeId};
use std::fmt;
use std::iter::FusedIterator;

/// An iterator over the elements of one list in a [`Links`] arena.
///
/// It uses a pair of nodes `start..end` to represent a half-open subrange
/// of the list, where `start` is inclusive and `end` is not. Initially `end`
/// is the ghost node.
pub struct Iter<'a, T: 'a> {
    links: &'a Links<T>,
    start: NodeId,
    end: NodeId,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new(links: &'a Links<T>, ghost: NodeId) -> Self {
        Self {
            links,
            start: links.next(ghost),
            end: ghost,
        }
    }
}

impl<'a, T: 'a> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.clone().collect::<Vec<_>>()).finish()
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    /// Return `*start` and reset the iterating range to `(start.next)..end`,
    /// or return `None` if `start..end` is already empty.
    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        let current = self.start;
        self.start = self.links.next(current);
        self.links.element(current)
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Iter<'a, T> {
    /// Reset the iterating range to `start..(end.prev)` and return `*end`,
    /// or return `None` if `start..end` is already empty.
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        self.end = self.links.prev(self.end);
        self.links.element(self.end)
    }
}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}
