//! Selection bookkeeping keyed by stable identifiers.

use crate::minutia::MinutiaId;
use std::collections::BTreeSet;

#[derive(Clone, Debug, Default)]
pub(crate) struct Selection {
    ids: BTreeSet<MinutiaId>,
}

impl Selection {
    /// Adds `id`; a non-additive select first drops everything else.
    pub(crate) fn select(&mut self, id: MinutiaId, additive: bool) {
        if !additive {
            self.ids.clear();
        }
        self.ids.insert(id);
    }

    /// Flips membership of `id` and returns whether it is now selected.
    pub(crate) fn toggle(&mut self, id: MinutiaId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub(crate) fn contains(&self, id: MinutiaId) -> bool {
        self.ids.contains(&id)
    }

    pub(crate) fn remove(&mut self, id: MinutiaId) {
        self.ids.remove(&id);
    }

    pub(crate) fn clear(&mut self) {
        self.ids.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.ids.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = MinutiaId> + '_ {
        self.ids.iter().copied()
    }
}
