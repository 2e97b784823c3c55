use std::iter::FusedIterator;

use crate::arena::{Arena, Id};

/// In-order iterator over a treap's entries.
///
/// Advances through parent back-links, so no heap allocation or explicit
/// stack is needed; each entry is visited exactly once and the whole walk is
/// O(n).
pub struct Iter<'a, K, V> {
    arena: &'a Arena<K, V>,
    next: Id,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(arena: &'a Arena<K, V>, first: Id, remaining: usize) -> Self {
        Self {
            arena,
            next: first,
            remaining,
        }
    }

    fn successor(&self, of: Id) -> Id {
        let r = self.arena.node(of).r;
        if !r.is_nil() {
            // Leftmost descendant of the right subtree.
            let mut cur = r;
            loop {
                let l = self.arena.node(cur).l;
                if l.is_nil() {
                    return cur;
                }
                cur = l;
            }
        }
        // Climb until we arrive from a left child.
        let mut cur = of;
        let mut p = self.arena.node(cur).p;
        while !p.is_nil() && self.arena.node(p).r == cur {
            cur = p;
            p = self.arena.node(p).p;
        }
        p
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next.is_nil() {
            return None;
        }
        let arena = self.arena;
        let node = arena.node(self.next);
        self.next = self.successor(self.next);
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}
