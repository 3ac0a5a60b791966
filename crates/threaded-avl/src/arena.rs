//! Generational slot arena backing the tree.
//!
//! Freed slots go onto a free list and are recycled by later allocations.
//! Each slot carries a generation counter that is bumped whenever the node
//! in it is freed or has its value replaced, so a detached
//! [`Position`](crate::Position) can tell whether the node it named is still
//! the node it was taken from.

use std::ops::{Index, IndexMut};

use crate::types::{AvlNode, NodeId};

#[derive(Clone, Debug)]
struct Slot<T> {
    generation: u32,
    node: Option<AvlNode<T>>,
}

#[derive(Clone, Debug)]
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    len: usize,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
        }
    }

    pub fn reserve(&mut self, additional: usize) {
        let spare = self.free.len();
        if additional > spare {
            self.slots.reserve(additional - spare);
        }
    }

    /// Number of live nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn alloc(&mut self, node: AvlNode<T>) -> NodeId {
        self.len += 1;
        if let Some(idx) = self.free.pop() {
            tracing::trace!(slot = idx, "reusing arena slot");
            self.slots[idx as usize].node = Some(node);
            return NodeId(idx);
        }
        let idx = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId(idx)
    }

    /// Releases the slot and hands back the node it held.
    pub fn free(&mut self, id: NodeId) -> AvlNode<T> {
        let slot = &mut self.slots[id.index()];
        let node = slot.node.take().expect("freeing a vacant slot");
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.0);
        self.len -= 1;
        node
    }

    /// Marks the node as a new identity without moving it.
    pub fn renew(&mut self, id: NodeId) {
        let slot = &mut self.slots[id.index()];
        slot.generation = slot.generation.wrapping_add(1);
    }

    #[inline]
    pub fn generation(&self, id: NodeId) -> u32 {
        self.slots[id.index()].generation
    }

    /// `true` while `id` holds a node whose generation is still `generation`.
    pub fn is_live(&self, id: NodeId, generation: u32) -> bool {
        self.slots
            .get(id.index())
            .is_some_and(|slot| slot.node.is_some() && slot.generation == generation)
    }
}

impl<T> Index<NodeId> for Arena<T> {
    type Output = AvlNode<T>;

    #[inline]
    fn index(&self, id: NodeId) -> &AvlNode<T> {
        self.slots[id.index()]
            .node
            .as_ref()
            .expect("dangling node id")
    }
}

impl<T> IndexMut<NodeId> for Arena<T> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut AvlNode<T> {
        self.slots[id.index()]
            .node
            .as_mut()
            .expect("dangling node id")
    }
}
