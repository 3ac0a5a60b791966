//! Bidirectional cursor over the sorted-order chain.
//!
//! A [`Cursor`] borrows its set, so the set cannot be mutated while a cursor
//! exists and a cursor can never observe an erased node. To remember a
//! location across mutations, take a [`Position`] and hand it back to
//! [`AvlSet::cursor_at`], which rejects positions whose node has gone away.

use std::cmp::Ordering;
use std::fmt;
use std::ptr;

use crate::error::{Error, Result};
use crate::set::AvlSet;
use crate::types::Link;
use crate::util::{next_link, prev_link};

pub struct Cursor<'a, T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    set: &'a AvlSet<T, C>,
    at: Link,
}

impl<'a, T, C> Cursor<'a, T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    pub(crate) fn new(set: &'a AvlSet<T, C>, at: Link) -> Self {
        Self { set, at }
    }

    /// Steps to the next larger value. Parked at the back sentinel, stays.
    pub fn advance(&mut self) -> &mut Self {
        self.at = next_link(&self.set.arena, &self.set.chain, self.at);
        self
    }

    /// Steps to the next smaller value. Parked at the front sentinel, stays.
    pub fn retreat(&mut self) -> &mut Self {
        self.at = prev_link(&self.set.arena, &self.set.chain, self.at);
        self
    }

    /// Value under the cursor; [`Error::SentinelAccess`] on either sentinel.
    pub fn value(&self) -> Result<&'a T> {
        self.get().ok_or(Error::SentinelAccess)
    }

    pub fn get(&self) -> Option<&'a T> {
        let set = self.set;
        self.at.node().map(|id| &set.arena[id].v)
    }

    /// Parked one past the largest value.
    pub fn is_end(&self) -> bool {
        self.at == Link::Back
    }

    /// Parked one before the smallest value.
    pub fn is_rend(&self) -> bool {
        self.at == Link::Front
    }

    /// Detaches the cursor's location from the borrow of the set.
    pub fn position(&self) -> Position {
        let generation = match self.at {
            Link::Node(id) => self.set.arena.generation(id),
            Link::Front | Link::Back => 0,
        };
        Position {
            at: self.at,
            generation,
        }
    }
}

impl<T, C> Clone for Cursor<'_, T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, C> Copy for Cursor<'_, T, C> where C: Fn(&T, &T) -> Ordering {}

/// Two cursors are equal when they sit on the same node or sentinel of the
/// same set.
impl<T, C> PartialEq for Cursor<'_, T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.set, other.set) && self.at == other.at
    }
}

impl<T, C> Eq for Cursor<'_, T, C> where C: Fn(&T, &T) -> Ordering {}

impl<T, C> fmt::Debug for Cursor<'_, T, C>
where
    T: fmt::Debug,
    C: Fn(&T, &T) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.at {
            Link::Front => f.write_str("Cursor(rend)"),
            Link::Back => f.write_str("Cursor(end)"),
            Link::Node(_) => f.debug_tuple("Cursor").field(&self.get()).finish(),
        }
    }
}

/// A cursor location that does not borrow the set.
///
/// Only meaningful for the set it was taken from. Positions on a sentinel
/// never go stale; a position on a value goes stale once that value is
/// erased, once a two-children erase moves a neighbouring value into its
/// node, or once the set is cleared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    at: Link,
    generation: u32,
}

impl Position {
    pub(crate) fn link(self) -> Link {
        self.at
    }

    pub(crate) fn generation(self) -> u32 {
        self.generation
    }

    pub fn is_sentinel(self) -> bool {
        self.at.is_sentinel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AvlSet<i32> {
        [5, 3, 8, 1, 4, 7, 9].into_iter().collect()
    }

    #[test]
    fn test_advance_is_idempotent_at_end() {
        let set = sample();
        let mut c = set.rbegin();
        assert_eq!(c.value(), Ok(&9));
        c.advance();
        assert!(c.is_end());
        c.advance().advance();
        assert!(c == set.end());
        assert_eq!(c.value(), Err(Error::SentinelAccess));
    }

    #[test]
    fn test_retreat_is_idempotent_at_rend() {
        let set = sample();
        let mut c = set.begin();
        assert_eq!(c.value(), Ok(&1));
        c.retreat();
        assert!(c.is_rend());
        c.retreat();
        assert!(c == set.rend());
        assert_eq!(c.get(), None);
    }

    #[test]
    fn test_step_off_sentinels_back_into_values() {
        let set = sample();
        let mut c = set.end();
        c.retreat();
        assert_eq!(c.value(), Ok(&9));
        let mut c = set.rend();
        c.advance();
        assert_eq!(c.value(), Ok(&1));
    }

    #[test]
    fn test_cursor_equality_is_by_node() {
        let set = sample();
        let mut a = set.begin();
        a.advance();
        let b = set.find(&3);
        assert_eq!(a, b);
        assert_ne!(a, set.find(&4));

        let other = sample();
        assert!(set.end() != other.end());
    }

    #[test]
    fn test_debug_format() {
        let set = sample();
        assert_eq!(format!("{:?}", set.find(&4)), "Cursor(Some(4))");
        assert_eq!(format!("{:?}", set.end()), "Cursor(end)");
        assert_eq!(format!("{:?}", set.rend()), "Cursor(rend)");
    }

    #[test]
    fn test_position_round_trip() {
        let set = sample();
        let pos = set.find(&7).position();
        assert!(!pos.is_sentinel());
        let c = set.cursor_at(pos).unwrap();
        assert_eq!(c.value(), Ok(&7));
    }

    #[test]
    fn test_position_goes_stale_after_erase() {
        let mut set = sample();
        let pos = set.find(&1).position();
        let end = set.end().position();
        assert!(set.erase(&1));
        assert_eq!(set.cursor_at(pos).err(), Some(Error::StalePosition));
        assert!(set.cursor_at(end).unwrap().is_end());
    }

    #[test]
    fn test_position_goes_stale_after_two_children_erase() {
        let mut set = sample();
        let pos = set.find(&5).position();
        assert!(set.erase(&5));
        assert_eq!(set.cursor_at(pos).err(), Some(Error::StalePosition));
    }

    #[test]
    fn test_position_survives_unrelated_mutation() {
        let mut set = sample();
        let pos = set.find(&8).position();
        assert!(set.insert(10));
        assert!(set.insert(11));
        assert!(set.erase(&1));
        assert_eq!(set.cursor_at(pos).unwrap().value(), Ok(&8));
    }

    #[test]
    fn test_position_goes_stale_after_clear() {
        let mut set = sample();
        let pos = set.find(&9).position();
        set.clear();
        set.insert(9);
        assert_eq!(set.cursor_at(pos).err(), Some(Error::StalePosition));
    }
}
