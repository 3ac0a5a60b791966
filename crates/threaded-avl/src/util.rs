//! AVL primitives over the node arena.
//!
//! All structural functions take the subtree root they operate on and return
//! the (possibly different) root of that subtree after rebalancing; the
//! caller stores it back into the parent's child slot or the set's root
//! slot. Rotations only ever touch tree links. Chain links change only where
//! a node is created or physically removed.

use std::cmp::Ordering;

use crate::arena::Arena;
use crate::types::{AvlNode, Chain, Link, NodeId};

/// Height of an optional subtree; an absent subtree has height `-1`.
#[inline]
pub fn height<T>(arena: &Arena<T>, n: Option<NodeId>) -> i32 {
    n.map_or(-1, |id| arena[id].height)
}

#[inline]
pub fn update_height<T>(arena: &mut Arena<T>, n: NodeId) {
    let h = height(arena, arena[n].l).max(height(arena, arena[n].r)) + 1;
    arena[n].height = h;
}

/// `height(left) - height(right)`.
#[inline]
pub fn balance_factor<T>(arena: &Arena<T>, n: NodeId) -> i32 {
    height(arena, arena[n].l) - height(arena, arena[n].r)
}

/// Leftmost node of the subtree.
pub fn front<T>(arena: &Arena<T>, mut n: NodeId) -> NodeId {
    while let Some(l) = arena[n].l {
        n = l;
    }
    n
}

/// Rightmost node of the subtree.
pub fn back<T>(arena: &Arena<T>, mut n: NodeId) -> NodeId {
    while let Some(r) = arena[n].r {
        n = r;
    }
    n
}

pub fn find<T, C>(arena: &Arena<T>, root: Option<NodeId>, value: &T, cmp: &C) -> Option<NodeId>
where
    C: Fn(&T, &T) -> Ordering,
{
    let mut curr = root;
    while let Some(i) = curr {
        curr = match cmp(value, &arena[i].v) {
            Ordering::Equal => return Some(i),
            Ordering::Less => arena[i].l,
            Ordering::Greater => arena[i].r,
        };
    }
    None
}

/// Greatest node `<= value`.
pub fn find_or_next_lower<T, C>(
    arena: &Arena<T>,
    root: Option<NodeId>,
    value: &T,
    cmp: &C,
) -> Option<NodeId>
where
    C: Fn(&T, &T) -> Ordering,
{
    let mut curr = root;
    let mut found = None;
    while let Some(i) = curr {
        match cmp(value, &arena[i].v) {
            Ordering::Equal => return Some(i),
            Ordering::Less => curr = arena[i].l,
            Ordering::Greater => {
                found = Some(i);
                curr = arena[i].r;
            }
        }
    }
    found
}

/// Smallest node `>= value`.
pub fn find_or_next_higher<T, C>(
    arena: &Arena<T>,
    root: Option<NodeId>,
    value: &T,
    cmp: &C,
) -> Option<NodeId>
where
    C: Fn(&T, &T) -> Ordering,
{
    let mut curr = root;
    let mut found = None;
    while let Some(i) = curr {
        match cmp(value, &arena[i].v) {
            Ordering::Equal => return Some(i),
            Ordering::Greater => curr = arena[i].r,
            Ordering::Less => {
                found = Some(i);
                curr = arena[i].l;
            }
        }
    }
    found
}

// ---------------------------------------------------------------------------
// Chain links
// ---------------------------------------------------------------------------

#[inline]
pub fn next_link<T>(arena: &Arena<T>, chain: &Chain, at: Link) -> Link {
    match at {
        Link::Front => chain.head,
        Link::Node(id) => arena[id].next,
        Link::Back => Link::Back,
    }
}

#[inline]
pub fn prev_link<T>(arena: &Arena<T>, chain: &Chain, at: Link) -> Link {
    match at {
        Link::Front => Link::Front,
        Link::Node(id) => arena[id].prev,
        Link::Back => chain.tail,
    }
}

#[inline]
fn set_next<T>(arena: &mut Arena<T>, chain: &mut Chain, at: Link, to: Link) {
    match at {
        Link::Front => chain.head = to,
        Link::Node(id) => arena[id].next = to,
        Link::Back => debug_assert!(false, "back sentinel has no successor"),
    }
}

#[inline]
fn set_prev<T>(arena: &mut Arena<T>, chain: &mut Chain, at: Link, to: Link) {
    match at {
        Link::Back => chain.tail = to,
        Link::Node(id) => arena[id].prev = to,
        Link::Front => debug_assert!(false, "front sentinel has no predecessor"),
    }
}

/// Splices `n` out of the chain, joining its neighbours.
fn unlink<T>(arena: &mut Arena<T>, chain: &mut Chain, n: NodeId) {
    let prev = arena[n].prev;
    let next = arena[n].next;
    set_next(arena, chain, prev, next);
    set_prev(arena, chain, next, prev);
}

// ---------------------------------------------------------------------------
// Rotations
// ---------------------------------------------------------------------------

/// Single right rotation: the left child becomes the subtree root.
fn rotate_right<T>(arena: &mut Arena<T>, n: NodeId) -> NodeId {
    let Some(l) = arena[n].l else {
        return n;
    };
    arena[n].l = arena[l].r;
    arena[l].r = Some(n);
    update_height(arena, n);
    update_height(arena, l);
    l
}

/// Single left rotation: the right child becomes the subtree root.
fn rotate_left<T>(arena: &mut Arena<T>, n: NodeId) -> NodeId {
    let Some(r) = arena[n].r else {
        return n;
    };
    arena[n].r = arena[r].l;
    arena[r].l = Some(n);
    update_height(arena, n);
    update_height(arena, r);
    r
}

/// Restores the AVL condition at `n`, returning the new subtree root.
pub fn check_balance<T>(arena: &mut Arena<T>, n: NodeId) -> NodeId {
    let bf = balance_factor(arena, n);
    if bf > 1 {
        let Some(l) = arena[n].l else {
            return n;
        };
        if balance_factor(arena, l) >= 0 {
            tracing::trace!(pivot = n.0, "single right rotation");
        } else {
            tracing::trace!(pivot = n.0, "left-right double rotation");
            let nl = rotate_left(arena, l);
            arena[n].l = Some(nl);
        }
        rotate_right(arena, n)
    } else if bf < -1 {
        let Some(r) = arena[n].r else {
            return n;
        };
        if balance_factor(arena, r) <= 0 {
            tracing::trace!(pivot = n.0, "single left rotation");
        } else {
            tracing::trace!(pivot = n.0, "right-left double rotation");
            let nr = rotate_right(arena, r);
            arena[n].r = Some(nr);
        }
        rotate_left(arena, n)
    } else {
        n
    }
}

// ---------------------------------------------------------------------------
// Insert
// ---------------------------------------------------------------------------

/// Inserts `value` below `n`.
///
/// Returns the new subtree root, or `None` if an equal value is already
/// present (the tree is left untouched).
pub fn insert<T, C>(
    arena: &mut Arena<T>,
    chain: &mut Chain,
    n: NodeId,
    value: T,
    cmp: &C,
) -> Option<NodeId>
where
    C: Fn(&T, &T) -> Ordering,
{
    match cmp(&value, &arena[n].v) {
        Ordering::Equal => return None,
        Ordering::Less => match arena[n].l {
            Some(l) => {
                let l = insert(arena, chain, l, value, cmp)?;
                arena[n].l = Some(l);
            }
            None => {
                // Left neighbour in sorted order is whatever preceded `n`.
                let prev = arena[n].prev;
                let id = arena.alloc(AvlNode::new(value, prev, Link::Node(n)));
                set_next(arena, chain, prev, Link::Node(id));
                arena[n].prev = Link::Node(id);
                arena[n].l = Some(id);
            }
        },
        Ordering::Greater => match arena[n].r {
            Some(r) => {
                let r = insert(arena, chain, r, value, cmp)?;
                arena[n].r = Some(r);
            }
            None => {
                let next = arena[n].next;
                let id = arena.alloc(AvlNode::new(value, Link::Node(n), next));
                set_prev(arena, chain, next, Link::Node(id));
                arena[n].next = Link::Node(id);
                arena[n].r = Some(id);
            }
        },
    }

    let before = arena[n].height;
    update_height(arena, n);
    if arena[n].height != before {
        Some(check_balance(arena, n))
    } else {
        Some(n)
    }
}

// ---------------------------------------------------------------------------
// Erase
// ---------------------------------------------------------------------------

/// Outcome of [`erase`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Removal {
    /// No equal value below the given node.
    Missing,
    /// Removed; carries the new root of the subtree (absent if it emptied).
    Removed(Option<NodeId>),
}

pub fn erase<T, C>(
    arena: &mut Arena<T>,
    chain: &mut Chain,
    n: NodeId,
    value: &T,
    cmp: &C,
) -> Removal
where
    C: Fn(&T, &T) -> Ordering,
{
    match cmp(value, &arena[n].v) {
        Ordering::Less => {
            let Some(l) = arena[n].l else {
                return Removal::Missing;
            };
            match erase(arena, chain, l, value, cmp) {
                Removal::Missing => return Removal::Missing,
                Removal::Removed(l) => arena[n].l = l,
            }
        }
        Ordering::Greater => {
            let Some(r) = arena[n].r else {
                return Removal::Missing;
            };
            match erase(arena, chain, r, value, cmp) {
                Removal::Missing => return Removal::Missing,
                Removal::Removed(r) => arena[n].r = r,
            }
        }
        Ordering::Equal => match (arena[n].l, arena[n].r) {
            (Some(l), Some(r)) => {
                // Keep the node in place and pull a neighbour's value up
                // from the taller side.
                if balance_factor(arena, n) > 0 {
                    tracing::trace!(node = n.0, "erase: promoting predecessor");
                    let (l, v) = take_back(arena, chain, l);
                    arena[n].l = l;
                    arena[n].v = v;
                } else {
                    tracing::trace!(node = n.0, "erase: promoting successor");
                    let (r, v) = take_front(arena, chain, r);
                    arena[n].r = r;
                    arena[n].v = v;
                }
                arena.renew(n);
            }
            (l, r) => {
                unlink(arena, chain, n);
                arena.free(n);
                return Removal::Removed(l.or(r));
            }
        },
    }

    update_height(arena, n);
    Removal::Removed(Some(check_balance(arena, n)))
}

/// Physically removes the leftmost node of the subtree and returns its value
/// together with the new subtree root.
fn take_front<T>(arena: &mut Arena<T>, chain: &mut Chain, n: NodeId) -> (Option<NodeId>, T) {
    match arena[n].l {
        Some(l) => {
            let (l, v) = take_front(arena, chain, l);
            arena[n].l = l;
            update_height(arena, n);
            (Some(check_balance(arena, n)), v)
        }
        None => {
            let r = arena[n].r;
            unlink(arena, chain, n);
            (r, arena.free(n).v)
        }
    }
}

/// Mirror of [`take_front`] for the rightmost node.
fn take_back<T>(arena: &mut Arena<T>, chain: &mut Chain, n: NodeId) -> (Option<NodeId>, T) {
    match arena[n].r {
        Some(r) => {
            let (r, v) = take_back(arena, chain, r);
            arena[n].r = r;
            update_height(arena, n);
            (Some(check_balance(arena, n)), v)
        }
        None => {
            let l = arena[n].l;
            unlink(arena, chain, n);
            (l, arena.free(n).v)
        }
    }
}

/// Frees the whole subtree, children before parent.
pub fn clear<T>(arena: &mut Arena<T>, n: NodeId) {
    let (l, r) = (arena[n].l, arena[n].r);
    if let Some(l) = l {
        clear(arena, l);
    }
    if let Some(r) = r {
        clear(arena, r);
    }
    arena.free(n);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Checks every structural invariant of a threaded AVL tree.
pub fn assert_avl_tree<T, C>(
    arena: &Arena<T>,
    chain: &Chain,
    root: Option<NodeId>,
    cmp: &C,
) -> Result<(), String>
where
    C: Fn(&T, &T) -> Ordering,
{
    fn validate_shape<T>(arena: &Arena<T>, n: NodeId, in_order: &mut Vec<NodeId>) -> Result<i32, String> {
        let node = &arena[n];
        let lh = match node.l {
            Some(l) => validate_shape(arena, l, in_order)?,
            None => -1,
        };
        in_order.push(n);
        let rh = match node.r {
            Some(r) => validate_shape(arena, r, in_order)?,
            None => -1,
        };

        let expected = lh.max(rh) + 1;
        if node.height != expected {
            return Err(format!(
                "Height mismatch at {n:?}: expected {expected}, got {}",
                node.height
            ));
        }
        if (lh - rh).abs() > 1 {
            return Err(format!("AVL balance violated at {n:?}: bf={}", lh - rh));
        }
        Ok(expected)
    }

    let mut in_order = Vec::with_capacity(arena.len());
    if let Some(root) = root {
        validate_shape(arena, root, &mut in_order)?;
    }

    if in_order.len() != arena.len() {
        return Err(format!(
            "Size mismatch: {} reachable nodes, {} allocated",
            in_order.len(),
            arena.len()
        ));
    }

    for pair in in_order.windows(2) {
        if cmp(&arena[pair[0]].v, &arena[pair[1]].v) != Ordering::Less {
            return Err(format!(
                "Node order violated between {:?} and {:?}",
                pair[0], pair[1]
            ));
        }
    }

    let mut prev = Link::Front;
    let mut curr = chain.head;
    for &expected in &in_order {
        if curr != Link::Node(expected) {
            return Err(format!(
                "Chain diverges from in-order traversal: expected {expected:?}, got {curr:?}"
            ));
        }
        if arena[expected].prev != prev {
            return Err(format!("Broken prev link on {expected:?}"));
        }
        prev = curr;
        curr = arena[expected].next;
    }
    if curr != Link::Back {
        return Err(format!("Chain does not end at back sentinel: {curr:?}"));
    }
    if chain.tail != prev {
        return Err("Back sentinel prev link is stale".to_string());
    }

    Ok(())
}
