//! Entity trait: identity + continuity across state changes.
//!
//! Collections held by the dashboard are verbatim snapshots of the last
//! successful fetch. The only local edits allowed on them are the three
//! splice operations in [`Splice`], all keyed by entity id.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// In-place edits of an entity collection by identifier match.
pub trait Splice<T: Entity> {
    /// Insert a freshly created record at the front.
    fn prepend(&mut self, item: T);

    /// Replace the record with the same id, keeping its position.
    ///
    /// Returns `false` when no record matched (the collection is unchanged).
    fn replace_by_id(&mut self, item: T) -> bool;

    /// Drop every record with the given id. Returns how many were removed.
    fn remove_by_id(&mut self, id: &T::Id) -> usize;
}

impl<T: Entity> Splice<T> for Vec<T> {
    fn prepend(&mut self, item: T) {
        self.insert(0, item);
    }

    fn replace_by_id(&mut self, item: T) -> bool {
        match self.iter_mut().find(|slot| slot.id() == item.id()) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    fn remove_by_id(&mut self, id: &T::Id) -> usize {
        let before = self.len();
        self.retain(|item| item.id() != id);
        before - self.len()
    }
}
