//! Order-statistic sequence containers over size-augmented binary trees.
//!
//! A [`TreeList`] is a list addressed by ordinal position: access, insertion,
//! removal, splitting and splicing at an arbitrary index all run in time
//! proportional to the tree depth. Every node carries the size of its
//! subtree; that single augmentation drives the rank descent, the ordinal
//! queries and the accelerated iterator jumps.
//!
//! Rebalancing is a compile-time policy. [`SplayList`] splays around every
//! operation for amortised logarithmic cost; [`BasicList`] never
//! restructures and serves as the unbalanced baseline. Both share the same
//! node algebra and tree handle.
//!
//! ```
//! use rank_forest::SplayList;
//!
//! let mut list: SplayList<&str> = SplayList::new();
//! list.push_back("b");
//! list.push_front("a");
//! list.insert(2, "c");
//! assert_eq!(list[1], "b");
//!
//! let mut tail = list.split_off(1);
//! assert_eq!(list.len(), 1);
//! list.join_back(&mut tail);
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), ["a", "b", "c"]);
//! ```
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`arena`] | Slot storage with a free list; stable `u32` node handles |
//! | [`node`] | Node record and the structural algebra (rank descent, rotations, splay steps, swap, erase) |
//! | [`tree`] | [`RawTree`]: owns the arena, caches root and endpoints, whole-tree operations |
//! | [`strategy`] | The [`Strategy`] policy trait and the [`Basic`] / [`Splay`] implementations |
//! | [`iter`] | Iterators and cursors |
//! | [`list`] | The [`TreeList`] façade |

pub mod arena;
pub mod iter;
pub mod list;
pub mod node;
pub mod strategy;
pub mod tree;

pub use arena::Arena;
pub use iter::{Cursor, CursorMut, IntoIter, Iter};
pub use list::{AccessError, BasicList, SplayList, TreeList};
pub use node::{ChildType, InsertPosition, Node};
pub use strategy::{Basic, Splay, Strategy};
pub use tree::RawTree;
