use std::cmp::Ordering;
use std::fmt;

use crate::arena::Arena;
use crate::cursor::{Cursor, Position};
use crate::error::{Error, Result};
use crate::iter::Iter;
use crate::print::print_node;
use crate::types::{AvlNode, Chain, Link, NodeId};
use crate::util::{self, Removal};

fn default_comparator<T: Ord>(a: &T, b: &T) -> Ordering {
    a.cmp(b)
}

/// Ordered set backed by an AVL tree whose nodes are threaded, in sorted
/// order, into a doubly linked chain between two sentinels.
///
/// Lookups, inserts and erases are `O(log n)`; stepping a [`Cursor`] or an
/// [`Iter`] is `O(1)` since it follows chain links instead of re-descending
/// the tree.
#[derive(Clone)]
pub struct AvlSet<T, C = fn(&T, &T) -> Ordering>
where
    C: Fn(&T, &T) -> Ordering,
{
    pub(crate) root: Option<NodeId>,
    pub(crate) chain: Chain,
    pub(crate) arena: Arena<T>,
    comparator: C,
}

impl<T> AvlSet<T, fn(&T, &T) -> Ordering>
where
    T: Ord,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<T>)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut set = Self::new();
        set.arena = Arena::with_capacity(capacity);
        set
    }
}

impl<T> Default for AvlSet<T, fn(&T, &T) -> Ordering>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> AvlSet<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            root: None,
            chain: Chain::EMPTY,
            arena: Arena::new(),
            comparator,
        }
    }

    pub fn reserve(&mut self, additional: usize) {
        self.arena.reserve(additional);
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Height of the tree: `0` for a single element, `-1` when empty.
    pub fn height(&self) -> i32 {
        util::height(&self.arena, self.root)
    }

    /// Smallest value.
    pub fn front(&self) -> Result<&T> {
        let root = self.root.ok_or(Error::Underflow)?;
        Ok(&self.arena[util::front(&self.arena, root)].v)
    }

    /// Largest value.
    pub fn back(&self) -> Result<&T> {
        let root = self.root.ok_or(Error::Underflow)?;
        Ok(&self.arena[util::back(&self.arena, root)].v)
    }

    pub fn first(&self) -> Option<&T> {
        self.front().ok()
    }

    pub fn last(&self) -> Option<&T> {
        self.back().ok()
    }

    /// Cursor at the smallest value, or at the back sentinel when empty.
    pub fn begin(&self) -> Cursor<'_, T, C> {
        Cursor::new(self, self.chain.head)
    }

    /// Cursor at the back sentinel (one past the largest value).
    pub fn end(&self) -> Cursor<'_, T, C> {
        Cursor::new(self, Link::Back)
    }

    /// Cursor at the largest value, or at the front sentinel when empty.
    pub fn rbegin(&self) -> Cursor<'_, T, C> {
        Cursor::new(self, self.chain.tail)
    }

    /// Cursor at the front sentinel (one before the smallest value).
    pub fn rend(&self) -> Cursor<'_, T, C> {
        Cursor::new(self, Link::Front)
    }

    /// Cursor at `value`, or [`end()`](Self::end) if it is not stored.
    pub fn find(&self, value: &T) -> Cursor<'_, T, C> {
        self.cursor_or_end(util::find(&self.arena, self.root, value, &self.comparator))
    }

    /// Cursor at the greatest value `<= value`, or [`end()`](Self::end).
    pub fn find_or_next_lower(&self, value: &T) -> Cursor<'_, T, C> {
        self.cursor_or_end(util::find_or_next_lower(
            &self.arena,
            self.root,
            value,
            &self.comparator,
        ))
    }

    /// Cursor at the smallest value `>= value`, or [`end()`](Self::end).
    pub fn find_or_next_higher(&self, value: &T) -> Cursor<'_, T, C> {
        self.cursor_or_end(util::find_or_next_higher(
            &self.arena,
            self.root,
            value,
            &self.comparator,
        ))
    }

    fn cursor_or_end(&self, node: Option<NodeId>) -> Cursor<'_, T, C> {
        match node {
            Some(id) => Cursor::new(self, Link::Node(id)),
            None => self.end(),
        }
    }

    pub fn contains(&self, value: &T) -> bool {
        util::find(&self.arena, self.root, value, &self.comparator).is_some()
    }

    /// Re-attaches a [`Position`] taken from a cursor on this set.
    pub fn cursor_at(&self, position: Position) -> Result<Cursor<'_, T, C>> {
        match position.link() {
            Link::Node(id) if !self.arena.is_live(id, position.generation()) => {
                Err(Error::StalePosition)
            }
            link => Ok(Cursor::new(self, link)),
        }
    }

    /// Adds `value`; returns `false` and leaves the set untouched if an equal
    /// value is already present.
    pub fn insert(&mut self, value: T) -> bool {
        let Some(root) = self.root else {
            let id = self
                .arena
                .alloc(AvlNode::new(value, Link::Front, Link::Back));
            self.chain.head = Link::Node(id);
            self.chain.tail = Link::Node(id);
            self.root = Some(id);
            return true;
        };

        match util::insert(
            &mut self.arena,
            &mut self.chain,
            root,
            value,
            &self.comparator,
        ) {
            Some(root) => {
                self.root = Some(root);
                true
            }
            None => false,
        }
    }

    /// Removes `value`; returns `false` if it was not present.
    pub fn erase(&mut self, value: &T) -> bool {
        let Some(root) = self.root else {
            return false;
        };

        match util::erase(
            &mut self.arena,
            &mut self.chain,
            root,
            value,
            &self.comparator,
        ) {
            Removal::Missing => false,
            Removal::Removed(root) => {
                self.root = root;
                true
            }
        }
    }

    pub fn clear(&mut self) {
        if let Some(root) = self.root.take() {
            tracing::trace!(len = self.arena.len(), "clearing set");
            util::clear(&mut self.arena, root);
        }
        self.chain.reset();
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.arena, self.chain, self.len())
    }

    /// Verifies balance, heights, ordering, uniqueness and chain threading.
    pub fn assert_valid(&self) -> std::result::Result<(), String> {
        util::assert_avl_tree(&self.arena, &self.chain, self.root, &self.comparator)
    }
}

impl<'a, T, C> IntoIterator for &'a AvlSet<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T, C> Extend<T> for AvlSet<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T> FromIterator<T> for AvlSet<T, fn(&T, &T) -> Ordering>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T, C> PartialEq for AvlSet<T, C>
where
    T: PartialEq,
    C: Fn(&T, &T) -> Ordering,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T, C> Eq for AvlSet<T, C>
where
    T: Eq,
    C: Fn(&T, &T) -> Ordering,
{
}

impl<T, C> fmt::Debug for AvlSet<T, C>
where
    T: fmt::Debug,
    C: Fn(&T, &T) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Diagnostic dump of the tree shape with per-node heights.
impl<T, C> fmt::Display for AvlSet<T, C>
where
    T: fmt::Display,
    C: Fn(&T, &T) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&print_node(&self.arena, self.root, ""))
    }
}
