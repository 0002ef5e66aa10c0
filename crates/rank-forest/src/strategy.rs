//! Rebalancing strategies.
//!
//! A strategy decides how the positional operations of the façade are
//! composed out of tree-handle primitives, and in particular when splaying
//! happens. The choice is a compile-time parameter of [`TreeList`]; there is
//! no dynamic dispatch on any of these paths.
//!
//! A strategy also names the node payload type (`Data`) and the user-visible
//! value type (`Value`), together with the projection between them. The two
//! shipped strategies store values directly and project by identity; a
//! custom strategy can carry extra per-node bookkeeping in `Data` and expose
//! only the value part.
//!
//! [`TreeList`]: crate::list::TreeList

use std::marker::PhantomData;

use crate::node::{self, InsertPosition, Node};
use crate::tree::RawTree;

/// Compile-time policy for [`TreeList`](crate::list::TreeList).
pub trait Strategy {
    /// Payload stored in every node.
    type Data;
    /// What accessors and iterators yield.
    type Value;

    fn value_in(data: &Self::Data) -> &Self::Value;
    fn value_in_mut(data: &mut Self::Data) -> &mut Self::Value;

    /// The node at ordinal `index`. Takes the tree exclusively so a
    /// strategy may restructure on access.
    fn node_at_index(tree: &mut RawTree<Self::Data>, index: usize) -> Option<u32>;

    /// Inserts `data` as the first element.
    fn emplace_front(tree: &mut RawTree<Self::Data>, data: Self::Data) -> u32;

    /// Inserts `data` as the last element.
    fn emplace_back(tree: &mut RawTree<Self::Data>, data: Self::Data) -> u32;

    /// Inserts `data` immediately before `node`, or at the back when `node`
    /// is `None`.
    fn emplace_before(tree: &mut RawTree<Self::Data>, node: Option<u32>, data: Self::Data) -> u32;

    /// Inserts a run of values before `node` and returns the first new
    /// node, or `None` when the input is empty (in which case the tree is
    /// untouched).
    fn insert_before<I>(tree: &mut RawTree<Self::Data>, node: Option<u32>, values: I) -> Option<u32>
    where
        I: IntoIterator<Item = Self::Data>;

    /// Removes and returns the first element. The tree must not be empty.
    fn erase_front(tree: &mut RawTree<Self::Data>) -> Self::Data;

    /// Removes and returns the last element. The tree must not be empty.
    fn erase_back(tree: &mut RawTree<Self::Data>) -> Self::Data;

    /// Removes `node`; returns its payload and its former successor.
    fn erase_node(tree: &mut RawTree<Self::Data>, node: u32) -> (Self::Data, Option<u32>);

    /// Removes the nodes of `[begin, end)`, where `end == None` means
    /// past-the-end. An empty range is a no-op.
    fn erase_range(tree: &mut RawTree<Self::Data>, begin: Option<u32>, end: Option<u32>);

    /// Clears the tree and refills it from `values`.
    fn assign<I>(tree: &mut RawTree<Self::Data>, values: I)
    where
        I: IntoIterator<Item = Self::Data>,
    {
        tree.destroy_all_nodes();
        Self::insert_before(tree, None, values);
    }
}

// ── shared composition helpers ────────────────────────────────────────────

fn emplace_before_plain<T>(tree: &mut RawTree<T>, node: Option<u32>, data: T) -> u32 {
    let pos = match node {
        Some(n) => node::prev_insert_position(&tree.arena, n),
        None => tree.last_insert_position(),
    };
    tree.emplace(pos, data)
}

/// Inserts a run before `node`: the first value goes through a positional
/// emplace, every further value chains as the right child of the previous
/// one (which is always a fresh leaf), and sizes are refreshed once at the
/// end. Returns `(first_new, last_new)`.
fn chain_before<T, I>(tree: &mut RawTree<T>, node: Option<u32>, values: I) -> (Option<u32>, Option<u32>)
where
    I: IntoIterator<Item = T>,
{
    let mut iter = values.into_iter();
    let Some(first_value) = iter.next() else {
        return (None, None);
    };
    let first_new = emplace_before_plain(tree, node, first_value);
    let mut tail = first_new;
    for value in iter {
        let n = tree.arena.insert(Node::new(value));
        tree.link(InsertPosition::right_of(tail), n, false);
        tail = n;
    }
    if tail != first_new {
        // The chained nodes are leaves of a single root-ward path; refresh
        // from the deepest stale node.
        let p = tree.arena.parent(tail).expect("a chained node has a parent");
        node::update_sizes_upwards(&mut tree.arena, p);
    }
    (Some(first_new), Some(tail))
}

/// Restructures so that the nodes of `[begin, end)` form one subtree, then
/// detaches and destroys them. Cost is a couple of splays plus a post-order
/// walk of the erased range.
///
/// Routes all four endpoint cases: with a predecessor of `begin` and a
/// present `end` the range is `prev.right` after the two splays; without a
/// predecessor it is `end.left`; without `end` it is `prev.right` after one
/// splay; with neither it is the whole tree.
fn detach_range_and_destroy<T>(tree: &mut RawTree<T>, begin: Option<u32>, end: Option<u32>) {
    if begin == end {
        return;
    }
    let begin = begin.expect("a non-empty range has a first node");
    if let Some(end) = end {
        tree.splay(end, None);
    }
    let prev = node::prev(&tree.arena, begin);
    let sub = if let Some(prev) = prev {
        tree.splay(prev, end);
        tree.arena
            .right(prev)
            .expect("the erased range hangs off the predecessor")
    } else if let Some(end) = end {
        tree.arena
            .left(end)
            .expect("the erased range hangs under the successor")
    } else {
        tree.root.expect("a non-empty range implies a non-empty tree")
    };
    tree.unlink(sub, true);
    tree.destroy_detached(sub);
}

// ── baseline strategy ─────────────────────────────────────────────────────

/// Unbalanced baseline: every operation is the plain composition of handle
/// primitives. No balancing is attempted, so worst-case depth is linear,
/// but no read ever restructures the tree.
pub struct Basic<T>(PhantomData<T>);

impl<T> Strategy for Basic<T> {
    type Data = T;
    type Value = T;

    #[inline]
    fn value_in(data: &T) -> &T {
        data
    }

    #[inline]
    fn value_in_mut(data: &mut T) -> &mut T {
        data
    }

    fn node_at_index(tree: &mut RawTree<T>, index: usize) -> Option<u32> {
        tree.node_at_index(index)
    }

    fn emplace_front(tree: &mut RawTree<T>, data: T) -> u32 {
        let pos = tree.first_insert_position();
        tree.emplace(pos, data)
    }

    fn emplace_back(tree: &mut RawTree<T>, data: T) -> u32 {
        let pos = tree.last_insert_position();
        tree.emplace(pos, data)
    }

    fn emplace_before(tree: &mut RawTree<T>, node: Option<u32>, data: T) -> u32 {
        emplace_before_plain(tree, node, data)
    }

    fn insert_before<I>(tree: &mut RawTree<T>, node: Option<u32>, values: I) -> Option<u32>
    where
        I: IntoIterator<Item = T>,
    {
        chain_before(tree, node, values).0
    }

    fn erase_front(tree: &mut RawTree<T>) -> T {
        let first = tree.first.expect("erase_front on a non-empty tree");
        tree.erase_take(first)
    }

    fn erase_back(tree: &mut RawTree<T>) -> T {
        let last = tree.last.expect("erase_back on a non-empty tree");
        tree.erase_take(last)
    }

    fn erase_node(tree: &mut RawTree<T>, node: u32) -> (T, Option<u32>) {
        let succ = node::next(&tree.arena, node);
        (tree.erase_take(node), succ)
    }

    fn erase_range(tree: &mut RawTree<T>, begin: Option<u32>, end: Option<u32>) {
        detach_range_and_destroy(tree, begin, end);
    }
}

// ── splay strategy ────────────────────────────────────────────────────────

/// Splay policy: every operation additionally splays a node chosen near the
/// disturbance, giving amortised logarithmic cost and keeping recently
/// touched positions near the root.
pub struct Splay<T>(PhantomData<T>);

impl<T> Strategy for Splay<T> {
    type Data = T;
    type Value = T;

    #[inline]
    fn value_in(data: &T) -> &T {
        data
    }

    #[inline]
    fn value_in_mut(data: &mut T) -> &mut T {
        data
    }

    fn node_at_index(tree: &mut RawTree<T>, index: usize) -> Option<u32> {
        let n = tree.node_at_index(index)?;
        tree.splay(n, None);
        Some(n)
    }

    fn emplace_front(tree: &mut RawTree<T>, data: T) -> u32 {
        let Some(first) = tree.first else {
            return tree.emplace(InsertPosition::root(), data);
        };
        // After the splay the first node is the root and has no left child.
        tree.splay(first, None);
        tree.emplace(InsertPosition::left_of(first), data)
    }

    fn emplace_back(tree: &mut RawTree<T>, data: T) -> u32 {
        let Some(last) = tree.last else {
            return tree.emplace(InsertPosition::root(), data);
        };
        tree.splay(last, None);
        tree.emplace(InsertPosition::right_of(last), data)
    }

    fn emplace_before(tree: &mut RawTree<T>, node: Option<u32>, data: T) -> u32 {
        let n = emplace_before_plain(tree, node, data);
        tree.splay(n, None);
        n
    }

    fn insert_before<I>(tree: &mut RawTree<T>, node: Option<u32>, values: I) -> Option<u32>
    where
        I: IntoIterator<Item = T>,
    {
        let (first_new, last_new) = chain_before(tree, node, values);
        if let Some(tail) = last_new {
            tree.splay(tail, None);
        }
        first_new
    }

    fn erase_front(tree: &mut RawTree<T>) -> T {
        let first = tree.first.expect("erase_front on a non-empty tree");
        tree.splay(first, None);
        tree.erase_take(first)
    }

    fn erase_back(tree: &mut RawTree<T>) -> T {
        let last = tree.last.expect("erase_back on a non-empty tree");
        tree.splay(last, None);
        tree.erase_take(last)
    }

    fn erase_node(tree: &mut RawTree<T>, node: u32) -> (T, Option<u32>) {
        let succ = node::next(&tree.arena, node);
        let (_, update_from) = tree.erase(node, true);
        let data = tree.arena.remove(node).data;
        // The erase disturbed the path above `update_from`; splaying it
        // rebalances exactly that path.
        if let Some(u) = update_from {
            tree.splay(u, None);
        }
        (data, succ)
    }

    fn erase_range(tree: &mut RawTree<T>, begin: Option<u32>, end: Option<u32>) {
        detach_range_and_destroy(tree, begin, end);
    }
}
