//! The tree handle: node storage plus the cached root and endpoints.
//!
//! `RawTree` owns an [`Arena`] and keeps `root`, `first` (leftmost) and
//! `last` (rightmost) up to date across every structural operation. The
//! rebalancing strategies compose their work out of the operations here;
//! none of them touch the endpoint caches directly.

use crate::arena::Arena;
use crate::node::{self, InsertPosition, Node};

pub struct RawTree<T> {
    pub arena: Arena<T>,
    pub root: Option<u32>,
    pub first: Option<u32>,
    pub last: Option<u32>,
}

impl<T> RawTree<T> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            first: None,
            last: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.size_of(self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Position at which a new node becomes the first element.
    pub fn first_insert_position(&self) -> InsertPosition {
        match self.first {
            Some(f) => InsertPosition::left_of(f),
            None => InsertPosition::root(),
        }
    }

    /// Position at which a new node becomes the last element.
    pub fn last_insert_position(&self) -> InsertPosition {
        match self.last {
            Some(l) => InsertPosition::right_of(l),
            None => InsertPosition::root(),
        }
    }

    /// The node at ordinal `index`, by plain rank descent.
    pub fn node_at_index(&self, index: usize) -> Option<u32> {
        self.root
            .and_then(|root| node::node_at_index(&self.arena, root, index))
    }

    // ── structural operations ─────────────────────────────────────────────

    /// Attaches the subtree rooted at `n` (internal sizes assumed correct)
    /// at `pos`, retargeting `first`/`last` when the position is at the
    /// corresponding end.
    pub fn link(&mut self, pos: InsertPosition, n: u32, update_sizes: bool) {
        match pos.node {
            None => {
                debug_assert!(self.root.is_none());
                self.root = Some(n);
                self.first = Some(node::first_in(&self.arena, n));
                self.last = Some(node::last_in(&self.arena, n));
            }
            Some(p) => {
                node::link(&mut self.arena, n, pos, update_sizes);
                if pos.left && Some(p) == self.first {
                    self.first = Some(node::first_in(&self.arena, n));
                }
                if !pos.left && Some(p) == self.last {
                    self.last = Some(node::last_in(&self.arena, n));
                }
            }
        }
    }

    /// Attaches `n` so that its ordinal becomes `index`.
    pub fn link_at_index(&mut self, index: usize, n: u32, update_sizes: bool) {
        match self.root {
            None => {
                debug_assert_eq!(index, 0);
                self.link(InsertPosition::root(), n, update_sizes);
            }
            Some(root) => {
                debug_assert!(index <= self.arena.size(root));
                let pos = node::insert_position_for_index(&self.arena, root, index);
                self.link(pos, n, update_sizes);
            }
        }
    }

    /// Allocates a node for `data` and links it at `pos`. Allocation happens
    /// before any structural change.
    pub fn emplace(&mut self, pos: InsertPosition, data: T) -> u32 {
        let n = self.arena.insert(Node::new(data));
        self.link(pos, n, true);
        n
    }

    /// Allocates a node for `data` and inserts it at ordinal `index`.
    pub fn emplace_at_index(&mut self, index: usize, data: T) -> u32 {
        let n = self.arena.insert(Node::new(data));
        self.link_at_index(index, n, true);
        n
    }

    /// Detaches the subtree rooted at `n`. When an endpoint lay inside the
    /// subtree it retargets to the detached subtree's former parent; when
    /// `n` was the root the handle becomes empty.
    pub fn unlink(&mut self, n: u32, update_sizes: bool) -> InsertPosition {
        let p = self.arena.parent(n);
        if self.first.map_or(false, |f| node::is_under(&self.arena, f, n)) {
            self.first = p;
        }
        if self.last.map_or(false, |l| node::is_under(&self.arena, l, n)) {
            self.last = p;
        }
        if self.root == Some(n) {
            self.root = None;
        }
        node::unlink(&mut self.arena, n, update_sizes)
    }

    /// Detaches a node at `index` and returns it with its former position.
    pub fn unlink_at_index(&mut self, index: usize, update_sizes: bool) -> (u32, InsertPosition) {
        let n = self.node_at_index(index).expect("unlink index in range");
        let pos = self.unlink(n, update_sizes);
        (n, pos)
    }

    /// Splices `n` out (see [`node::erase`]); its slot stays allocated so the
    /// caller can take the payload or relink the node. Returns
    /// `(replacement, update_from)`.
    pub fn erase(&mut self, n: u32, update_sizes: bool) -> (Option<u32>, Option<u32>) {
        if self.first == Some(n) {
            self.first = node::next(&self.arena, n);
        }
        if self.last == Some(n) {
            self.last = node::prev(&self.arena, n);
        }
        let (replacement, update_from) = node::erase(&mut self.arena, n, update_sizes);
        if self.root == Some(n) {
            self.root = replacement;
        }
        (replacement, update_from)
    }

    /// Splices `n` out, frees its slot and returns its payload.
    pub fn erase_take(&mut self, n: u32) -> T {
        self.erase(n, true);
        self.arena.remove(n).data
    }

    /// Splays `n` to the root (`top == None`) or directly below `top`,
    /// refreshing sizes along the way.
    pub fn splay(&mut self, n: u32, top: Option<u32>) {
        node::splay_with_sizes(&mut self.arena, n, top);
        if top.is_none() {
            self.root = Some(n);
        }
    }

    /// Left rotation about `n` with the size refresh done here, demoted node
    /// first.
    pub fn rotate_left(&mut self, n: u32) {
        let was_root = self.root == Some(n);
        node::rotate_left(&mut self.arena, n);
        node::update_size(&mut self.arena, n);
        let promoted = self.arena.parent(n).expect("rotation promotes the child over n");
        node::update_size(&mut self.arena, promoted);
        if was_root {
            self.root = Some(promoted);
        }
    }

    /// Right rotation about `n`. Mirror of [`Self::rotate_left`].
    pub fn rotate_right(&mut self, n: u32) {
        let was_root = self.root == Some(n);
        node::rotate_right(&mut self.arena, n);
        node::update_size(&mut self.arena, n);
        let promoted = self.arena.parent(n).expect("rotation promotes the child over n");
        node::update_size(&mut self.arena, promoted);
        if was_root {
            self.root = Some(promoted);
        }
    }

    /// Structural swap of two nodes, keeping root/first/last pointing at the
    /// same sequence positions.
    pub fn swap_nodes(&mut self, a: u32, b: u32) {
        if self.root == Some(a) {
            self.root = Some(b);
        } else if self.root == Some(b) {
            self.root = Some(a);
        }
        if self.first == Some(a) {
            self.first = Some(b);
        } else if self.first == Some(b) {
            self.first = Some(a);
        }
        if self.last == Some(a) {
            self.last = Some(b);
        } else if self.last == Some(b) {
            self.last = Some(a);
        }
        node::swap_nodes(&mut self.arena, a, b);
    }

    /// Frees every node; the handle becomes empty.
    pub fn destroy_all_nodes(&mut self) {
        self.arena.clear();
        self.root = None;
        self.first = None;
        self.last = None;
    }

    /// Post-order destruction of an already-detached subtree.
    pub fn destroy_detached(&mut self, n: u32) {
        debug_assert!(self.arena.parent(n).is_none());
        let mut doomed = Vec::new();
        node::traverse_postorder(&self.arena, Some(n), &mut |m| doomed.push(m));
        for m in doomed {
            self.arena.remove(m);
        }
    }

    // ── whole-tree operations ─────────────────────────────────────────────

    /// Moves `other`'s nodes into this tree as one subtree attached at
    /// `pos`. Record migration is a single bulk pass; the structural link is
    /// one operation, so the moved nodes stay one subtree.
    pub fn link_subtree(&mut self, pos: InsertPosition, mut other: RawTree<T>) {
        let Some(other_root) = other.root.take() else {
            return;
        };
        let order = node::collect_preorder(&other.arena, other_root);
        let mut map = vec![u32::MAX; other.arena.slot_count()];
        for &old in &order {
            map[old as usize] = self.arena.insert(other.arena.remove(old));
        }
        for &old in &order {
            let new = map[old as usize];
            let (p, l, r) = {
                let nd = self.arena.node(new);
                (nd.parent, nd.left, nd.right)
            };
            let remap = |link: Option<u32>| link.map(|i| map[i as usize]);
            self.arena
                .set_parent(new, if old == other_root { None } else { remap(p) });
            self.arena.set_left(new, remap(l));
            self.arena.set_right(new, remap(r));
        }
        self.link(pos, map[other_root as usize], true);
    }

    /// Detaches the subtree rooted at `n` into a tree handle of its own.
    /// Inverse of [`Self::link_subtree`].
    pub fn unlink_subtree(&mut self, n: u32) -> RawTree<T> {
        self.unlink(n, true);
        let order = node::collect_preorder(&self.arena, n);
        let mut out = RawTree::new();
        let mut map = vec![u32::MAX; self.arena.slot_count()];
        for &old in &order {
            map[old as usize] = out.arena.insert(self.arena.remove(old));
        }
        for &old in &order {
            let new = map[old as usize];
            let (p, l, r) = {
                let nd = out.arena.node(new);
                (nd.parent, nd.left, nd.right)
            };
            let remap = |link: Option<u32>| link.map(|i| map[i as usize]);
            out.arena.set_parent(new, if old == n { None } else { remap(p) });
            out.arena.set_left(new, remap(l));
            out.arena.set_right(new, remap(r));
        }
        let new_root = map[n as usize];
        out.root = Some(new_root);
        out.first = Some(node::first_in(&out.arena, new_root));
        out.last = Some(node::last_in(&out.arena, new_root));
        out
    }

    /// Checks every structural invariant; test support.
    #[doc(hidden)]
    pub fn check_invariants(&self) {
        match self.root {
            None => {
                assert!(self.first.is_none(), "first set on an empty tree");
                assert!(self.last.is_none(), "last set on an empty tree");
                assert_eq!(self.arena.len(), 0, "leaked slots in an empty tree");
            }
            Some(root) => {
                assert!(self.arena.parent(root).is_none(), "root has a parent");
                let mut count = 0usize;
                let mut stack = vec![root];
                while let Some(n) = stack.pop() {
                    count += 1;
                    let mut expect = 1;
                    if let Some(l) = self.arena.left(n) {
                        assert_eq!(self.arena.parent(l), Some(n), "left child parent link");
                        expect += self.arena.size(l);
                        stack.push(l);
                    }
                    if let Some(r) = self.arena.right(n) {
                        assert_eq!(self.arena.parent(r), Some(n), "right child parent link");
                        expect += self.arena.size(r);
                        stack.push(r);
                    }
                    assert_eq!(self.arena.size(n), expect, "stale size at node {n}");
                }
                assert_eq!(count, self.arena.len(), "unreachable slots in the arena");
                assert_eq!(self.first, Some(node::first_in(&self.arena, root)));
                assert_eq!(self.last, Some(node::last_in(&self.arena, root)));
            }
        }
    }
}

impl<T: Clone> RawTree<T> {
    /// Deep copy: fresh nodes, same shape, sizes copied verbatim.
    pub fn clone_tree(&self) -> RawTree<T> {
        let mut out = RawTree::new();
        let Some(root) = self.root else {
            return out;
        };
        let order = node::collect_preorder(&self.arena, root);
        let mut map = vec![u32::MAX; self.arena.slot_count()];
        for &old in &order {
            let src = self.arena.node(old);
            let new = out.arena.insert(Node {
                parent: None,
                left: None,
                right: None,
                size: src.size,
                data: src.data.clone(),
            });
            map[old as usize] = new;
        }
        for &old in &order {
            let src = self.arena.node(old);
            let new = map[old as usize];
            let remap = |link: Option<u32>| link.map(|i| map[i as usize]);
            if old != root {
                out.arena.set_parent(new, remap(src.parent));
            }
            out.arena.set_left(new, remap(src.left));
            out.arena.set_right(new, remap(src.right));
        }
        out.root = Some(map[root as usize]);
        out.first = self.first.map(|f| map[f as usize]);
        out.last = self.last.map(|l| map[l as usize]);
        out
    }
}

impl<T> Default for RawTree<T> {
    fn default() -> Self {
        Self::new()
    }
}
