//! Checkbox selection for bulk operations.

use crate::domain::model::EntityId;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<EntityId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips one checkbox. Returns whether the id is selected afterwards.
    pub fn toggle(&mut self, id: &EntityId) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.clone());
            true
        }
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &EntityId> {
        self.ids.iter()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// True when `visible` is non-empty and every id in it is selected.
    pub fn all_selected<'a>(&self, visible: impl IntoIterator<Item = &'a EntityId>) -> bool {
        let mut any = false;
        for id in visible {
            if !self.ids.contains(id) {
                return false;
            }
            any = true;
        }
        any
    }

    /// Header checkbox. `visible` must be the ids matching the current filter: when all of them
    /// are selected they are all deselected, otherwise all of them are selected. Ids outside
    /// `visible` are never touched. Returns whether the visible set is selected afterwards.
    pub fn toggle_all<'a>(&mut self, visible: &[&'a EntityId]) -> bool {
        if self.all_selected(visible.iter().copied()) {
            for id in visible {
                self.ids.remove(*id);
            }
            false
        } else {
            self.ids.extend(visible.iter().map(|id| (*id).clone()));
            !visible.is_empty()
        }
    }

    pub fn remove_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a EntityId>) {
        for id in ids {
            self.ids.remove(id);
        }
    }

    /// Keeps only ids that are still in the loaded collection.
    pub fn retain_loaded<'a>(&mut self, loaded: impl IntoIterator<Item = &'a EntityId>) {
        let loaded: BTreeSet<&EntityId> = loaded.into_iter().collect();
        self.ids.retain(|id| loaded.contains(id));
    }
}
