//! Node and link definitions.
//!
//! Every node lives in an [`Arena`](crate::arena::Arena) owned by the set and
//! is addressed by a [`NodeId`]. A node carries two independent link sets:
//!
//! - **Tree links** (`l` / `r`) — the AVL shape. A child link is the only
//!   thing that keeps a node alive; freeing walks these links.
//! - **Chain links** (`prev` / `next`) — the sorted-order doubly linked
//!   chain, bounded by the two sentinels. Plain indices, never used for
//!   deallocation.

/// Index of a node slot in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Target of a chain link: a stored node or one of the two sentinels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Link {
    /// One-before-the-beginning.
    Front,
    Node(NodeId),
    /// One-past-the-end.
    Back,
}

impl Link {
    #[inline]
    pub fn node(self) -> Option<NodeId> {
        match self {
            Link::Node(id) => Some(id),
            Link::Front | Link::Back => None,
        }
    }

    #[inline]
    pub fn is_sentinel(self) -> bool {
        self.node().is_none()
    }
}

/// Tree node threaded into the sorted-order chain.
#[derive(Clone, Debug)]
pub struct AvlNode<T> {
    pub v: T,
    /// Height of the subtree rooted here; a leaf is `0`.
    pub height: i32,
    pub l: Option<NodeId>,
    pub r: Option<NodeId>,
    pub prev: Link,
    pub next: Link,
}

impl<T> AvlNode<T> {
    pub fn new(v: T, prev: Link, next: Link) -> Self {
        Self {
            v,
            height: 0,
            l: None,
            r: None,
            prev,
            next,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.l.is_none() && self.r.is_none()
    }
}

/// The two sentinel records bounding the chain.
///
/// The front sentinel only ever needs its `next` link and the back sentinel
/// only its `prev` link, so each is stored as that single link. Both are
/// created with the set and live exactly as long as it does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Chain {
    /// `front_sentinel.next`
    pub head: Link,
    /// `back_sentinel.prev`
    pub tail: Link,
}

impl Chain {
    pub const EMPTY: Chain = Chain {
        head: Link::Back,
        tail: Link::Front,
    };

    pub fn reset(&mut self) {
        *self = Self::EMPTY;
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::EMPTY
    }
}
