use std::cmp::Ordering;
use std::fmt;

use crate::arena::{Arena, Id, Node};
use crate::error::InsertError;
use crate::iter::Iter;
use crate::rng::{PrioritySource, XorShift64};

/// Randomized ordered dictionary (treap).
///
/// A binary search tree ordered by key and simultaneously heap-ordered by a
/// random priority per node, which keeps the expected depth logarithmic
/// without explicit rebalancing.
///
/// - Keys are unique; inserting an equal key is rejected.
/// - The comparator is supplied per call and must define the same strict
///   total order for every call on one tree.
/// - [`lookup`](Self::lookup) is self-adjusting (it may promote the found
///   node toward the root) and therefore takes `&mut self`.
/// - Nodes live in an index arena; removal recycles slots through a free
///   list.
pub struct Treap<K, V, R = XorShift64> {
    arena: Arena<K, V>,
    root: Id,
    len: usize,
    rng: R,
}

impl<K, V> Treap<K, V> {
    /// Empty tree with the default-seeded priority generator.
    pub fn new() -> Self {
        Self::with_priorities(XorShift64::default())
    }

    /// Empty tree whose priority draws are reproducible from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_priorities(XorShift64::new(seed))
    }
}

impl<K, V> Default for Treap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, R> Treap<K, V, R> {
    /// Empty tree drawing priorities from `rng`.
    pub fn with_priorities(rng: R) -> Self {
        Self {
            arena: Arena::new(),
            root: Id::NIL,
            len: 0,
            rng,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every node and resets the arena.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = Id::NIL;
        self.len = 0;
    }

    /// Leftmost entry, by the order the tree was built under. Pure read: no
    /// priority adjustment, in contrast to [`lookup`](Self::lookup).
    pub fn first(&self) -> Option<(&K, &V)> {
        let first = self.leftmost(self.root);
        if first.is_nil() {
            return None;
        }
        let node = self.node(first);
        Some((&node.key, &node.value))
    }

    /// Removes and returns the leftmost entry.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let first = self.leftmost(self.root);
        if first.is_nil() {
            return None;
        }
        // The leftmost node has no left child, so no push-down is needed:
        // its right subtree takes its place directly.
        let right = self.node(first).r;
        self.splice(first, right);
        let node = self.arena.free(first);
        self.len -= 1;
        Some((node.key, node.value))
    }

    /// Removes the entry whose key compares `Equal` to `key`, returning the
    /// stored key and value.
    pub fn remove<F>(&mut self, cmp: F, key: &K) -> Option<(K, V)>
    where
        F: Fn(&K, &K) -> Ordering,
    {
        let target = self.find(&cmp, key);
        if target.is_nil() {
            return None;
        }
        Some(self.unlink(target))
    }

    /// In-order iterator over `(&K, &V)`, ascending by the comparator the
    /// tree was built under. Borrowing `&self` rules out mutation while the
    /// traversal is live.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.arena, self.leftmost(self.root), self.len)
    }

    #[inline(always)]
    fn node(&self, x: Id) -> &Node<K, V> {
        self.arena.node(x)
    }

    #[inline(always)]
    fn node_mut(&mut self, x: Id) -> &mut Node<K, V> {
        self.arena.node_mut(x)
    }

    fn find<F>(&self, cmp: &F, key: &K) -> Id
    where
        F: Fn(&K, &K) -> Ordering,
    {
        let mut cur = self.root;
        while !cur.is_nil() {
            let node = self.node(cur);
            cur = match cmp(key, &node.key) {
                Ordering::Less => node.l,
                Ordering::Greater => node.r,
                Ordering::Equal => return cur,
            };
        }
        Id::NIL
    }

    fn leftmost(&self, from: Id) -> Id {
        let mut last = Id::NIL;
        let mut cur = from;
        while !cur.is_nil() {
            last = cur;
            cur = self.node(cur).l;
        }
        last
    }

    /// Single rotation: `q` trades places with its parent. The middle
    /// subtree changes sides, the grandparent link (or the root) is
    /// redirected, and every affected back-link is fixed. Keys and
    /// priorities play no part here.
    fn rotate_up(&mut self, q: Id) {
        let p = self.node(q).p;
        debug_assert!(!p.is_nil());
        let g = self.node(p).p;

        if g.is_nil() {
            self.root = q;
        } else {
            let gn = self.node_mut(g);
            if gn.l == p {
                gn.l = q;
            } else {
                gn.r = q;
            }
        }
        self.node_mut(q).p = g;

        let mid = if self.node(p).l == q {
            // Right rotation.
            let mid = self.node(q).r;
            self.node_mut(q).r = p;
            self.node_mut(p).l = mid;
            mid
        } else {
            // Left rotation.
            let mid = self.node(q).l;
            self.node_mut(q).l = p;
            self.node_mut(p).r = mid;
            mid
        };
        self.node_mut(p).p = q;
        if !mid.is_nil() {
            self.node_mut(mid).p = p;
        }
    }

    /// Rotates `q` upward until its parent's priority is at least its own.
    /// Only the edge above `q` may violate the heap order on entry.
    fn sift_up(&mut self, q: Id) {
        loop {
            let p = self.node(q).p;
            if p.is_nil() || self.node(p).prio >= self.node(q).prio {
                return;
            }
            self.rotate_up(q);
        }
    }

    /// Rotates `target` down until it has at most one child, splices it
    /// out, and recycles its slot.
    fn unlink(&mut self, target: Id) -> (K, V) {
        loop {
            let node = self.node(target);
            let (l, r) = (node.l, node.r);
            if l.is_nil() || r.is_nil() {
                break;
            }
            // Pull up whichever child has the higher priority, so the heap
            // order stays intact among the nodes left above the target.
            if self.node(l).prio > self.node(r).prio {
                self.rotate_up(l);
            } else {
                self.rotate_up(r);
            }
        }

        let node = self.node(target);
        let child = if node.l.is_nil() { node.r } else { node.l };
        self.splice(target, child);
        let node = self.arena.free(target);
        self.len -= 1;
        (node.key, node.value)
    }

    /// Replaces `target` (at most one child) with `child` in its parent's
    /// eyes, or at the root.
    fn splice(&mut self, target: Id, child: Id) {
        let p = self.node(target).p;
        if !child.is_nil() {
            self.node_mut(child).p = p;
        }
        if p.is_nil() {
            self.root = child;
        } else {
            let pn = self.node_mut(p);
            if pn.l == target {
                pn.l = child;
            } else {
                pn.r = child;
            }
        }
    }
}

impl<K, V, R: PrioritySource> Treap<K, V, R> {
    /// Inserts `key`/`value` with a freshly drawn priority.
    ///
    /// An equal key already in the tree is rejected with
    /// [`InsertError::DuplicateKey`]; arena growth failure is reported as
    /// [`InsertError::Alloc`]. In both cases the tree is unchanged.
    pub fn insert<F>(&mut self, cmp: F, key: K, value: V) -> Result<(), InsertError>
    where
        F: Fn(&K, &K) -> Ordering,
    {
        let mut parent = Id::NIL;
        let mut went_left = false;
        let mut cur = self.root;
        while !cur.is_nil() {
            let node = self.node(cur);
            parent = cur;
            match cmp(&key, &node.key) {
                Ordering::Less => {
                    went_left = true;
                    cur = node.l;
                }
                Ordering::Greater => {
                    went_left = false;
                    cur = node.r;
                }
                Ordering::Equal => return Err(InsertError::DuplicateKey),
            }
        }

        let prio = self.rng.next_priority();
        let mut node = Node::new(key, value, prio);
        node.p = parent;
        let id = self.arena.alloc(node)?;

        if parent.is_nil() {
            self.root = id;
        } else if went_left {
            self.node_mut(parent).l = id;
        } else {
            self.node_mut(parent).r = id;
        }
        self.len += 1;
        self.sift_up(id);
        Ok(())
    }

    /// Finds the value stored under `key`.
    ///
    /// On a hit a fresh priority is drawn; when it beats the node's current
    /// priority the node is promoted by rotation. Frequently looked-up keys
    /// therefore drift toward the root, which is why this takes `&mut self`.
    /// The promotion is probabilistic on purpose: priorities only ever
    /// increase, and most hits leave the structure untouched.
    pub fn lookup<F>(&mut self, cmp: F, key: &K) -> Option<&V>
    where
        F: Fn(&K, &K) -> Ordering,
    {
        let found = self.find(&cmp, key);
        if found.is_nil() {
            return None;
        }

        let drawn = self.rng.next_priority();
        if drawn > self.node(found).prio {
            self.node_mut(found).prio = drawn;
            self.sift_up(found);
        }
        Some(&self.node(found).value)
    }
}

impl<'a, K, V, R> IntoIterator for &'a Treap<K, V, R> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, R> fmt::Debug for Treap<K, V, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
