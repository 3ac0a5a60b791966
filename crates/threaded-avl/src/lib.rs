//! AVL-balanced ordered set with a threaded sorted-order chain.
//!
//! Every node of the tree is also a link in a doubly linked chain that runs,
//! in sorted order, between two permanent sentinels. Inserts and erases keep
//! both structures in step; rotations only reshape the tree, since they never
//! change the in-order sequence. Cursors and iterators walk the chain, so
//! each step is `O(1)` in both directions.
//!
//! Instead of raw pointers, nodes live in a generational arena owned by the
//! set and are addressed by `u32` indices. Child links own, chain links are
//! plain indices.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | `types` | node record, chain links, sentinels |
//! | `arena` | slot arena with free list and generations |
//! | `util` | heights, rotations, recursive insert/erase, validator |
//! | [`set`] | [`AvlSet`] |
//! | [`cursor`] | [`Cursor`], [`Position`] |
//! | [`iter`] | [`Iter`] |
//! | [`print`] | tree dumps |
//!
//! # Example
//!
//! ```
//! use threaded_avl::AvlSet;
//!
//! let mut set: AvlSet<i32> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
//! assert!(!set.insert(4));
//! assert!(set.erase(&5));
//!
//! let mut c = set.begin();
//! let mut seen = Vec::new();
//! while c != set.end() {
//!     seen.push(*c.value().unwrap());
//!     c.advance();
//! }
//! assert_eq!(seen, vec![1, 3, 4, 7, 8, 9]);
//! ```

mod arena;
pub mod cursor;
pub mod error;
pub mod iter;
pub mod print;
pub mod set;
mod types;
mod util;

pub use cursor::{Cursor, Position};
pub use error::{Error, Result};
pub use iter::Iter;
pub use set::AvlSet;
