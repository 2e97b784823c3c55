use std::collections::TryReserveError;

/// Index of a node slot. `NIL` is the absent link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Id(u32);

impl Id {
    pub(crate) const NIL: Self = Self(u32::MAX);

    #[inline(always)]
    pub(crate) fn is_nil(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline(always)]
    fn idx(self) -> usize {
        self.0 as usize
    }
}

pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) prio: u64,
    pub(crate) p: Id,
    pub(crate) l: Id,
    pub(crate) r: Id,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(key: K, value: V, prio: u64) -> Self {
        Self {
            key,
            value,
            prio,
            p: Id::NIL,
            l: Id::NIL,
            r: Id::NIL,
        }
    }
}

enum Slot<K, V> {
    Occupied(Node<K, V>),
    // Next slot on the free list.
    Free(Id),
}

/// Slot vector with an intrusive free list.
///
/// Ids handed out by `alloc` stay stable until the matching `free`; freed
/// slots are recycled before the vector grows again.
pub(crate) struct Arena<K, V> {
    slots: Vec<Slot<K, V>>,
    free_head: Id,
}

impl<K, V> Arena<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: Id::NIL,
        }
    }

    pub(crate) fn alloc(&mut self, node: Node<K, V>) -> Result<Id, TryReserveError> {
        if self.free_head.is_nil() {
            debug_assert!(self.slots.len() < u32::MAX as usize);
            self.slots.try_reserve(1)?;
            let id = Id(self.slots.len() as u32);
            self.slots.push(Slot::Occupied(node));
            return Ok(id);
        }

        let id = self.free_head;
        match std::mem::replace(&mut self.slots[id.idx()], Slot::Occupied(node)) {
            Slot::Free(next) => self.free_head = next,
            Slot::Occupied(_) => unreachable!("free list points at an occupied slot"),
        }
        Ok(id)
    }

    pub(crate) fn free(&mut self, id: Id) -> Node<K, V> {
        let slot = std::mem::replace(&mut self.slots[id.idx()], Slot::Free(self.free_head));
        self.free_head = id;
        match slot {
            Slot::Occupied(node) => node,
            Slot::Free(_) => unreachable!("double free of arena slot"),
        }
    }

    pub(crate) fn node(&self, id: Id) -> &Node<K, V> {
        match &self.slots[id.idx()] {
            Slot::Occupied(node) => node,
            Slot::Free(_) => unreachable!("live link points at a free slot"),
        }
    }

    pub(crate) fn node_mut(&mut self, id: Id) -> &mut Node<K, V> {
        match &mut self.slots[id.idx()] {
            Slot::Occupied(node) => node,
            Slot::Free(_) => unreachable!("live link points at a free slot"),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_head = Id::NIL;
    }
}
