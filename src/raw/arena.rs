use super::handle::NodeId;

/// Flat slot storage for nodes, addressed by [`NodeId`].
///
/// The tree and the catalogue are add-only structures (no delete operation),
/// so slots are never reclaimed and ids stay valid for the arena's lifetime.
pub(crate) struct Arena<T> {
    slots: Vec<T>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub(crate) fn alloc(&mut self, element: T) -> NodeId {
        // Strict less-than so the slot count never exceeds `NodeId::MAX`.
        assert!(
            self.slots.len() < NodeId::MAX,
            "`Arena::alloc()` - arena is at maximum capacity ({})",
            NodeId::MAX
        );
        self.slots.push(element);
        NodeId::from_index(self.slots.len() - 1)
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> &T {
        &self.slots[id.to_index()]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut T {
        &mut self.slots[id.to_index()]
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}
