//! Multi-select state and move-set resolution for drag operations.

use std::collections::HashSet;

use super::domain::ApplicantId;

/// Tracks multi-select mode and the selected card set. The set only ever
/// references currently-existing applicants; deletion paths prune it.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    multi_select: bool,
    selected: HashSet<ApplicantId>,
}

impl Selection {
    pub fn is_multi_select(&self) -> bool {
        self.multi_select
    }

    /// Entering or leaving multi-select mode starts from an empty selection.
    pub fn toggle_multi_select(&mut self) {
        self.multi_select = !self.multi_select;
        self.selected.clear();
    }

    pub fn selected(&self) -> &HashSet<ApplicantId> {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, id: &ApplicantId) -> bool {
        self.selected.contains(id)
    }

    /// Click toggle: select if absent, deselect if present.
    pub fn toggle(&mut self, id: &ApplicantId) {
        if !self.selected.remove(id) {
            self.selected.insert(id.clone());
        }
    }

    pub fn insert(&mut self, id: &ApplicantId) {
        self.selected.insert(id.clone());
    }

    /// Drop a (possibly deleted) id from the set regardless of mode.
    pub fn prune(&mut self, id: &ApplicantId) {
        self.selected.remove(id);
    }

    /// Drop every id not accepted by `exists`. Used after wholesale
    /// replacements of the applicant list.
    pub fn retain<F>(&mut self, exists: F)
    where
        F: Fn(&ApplicantId) -> bool,
    {
        self.selected.retain(|id| exists(id));
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// The set of ids a drag of `dragged` affects. In multi-select mode with
    /// a non-empty selection this is the selection plus the dragged card
    /// (dragging an unselected card still carries it along); otherwise just
    /// the dragged card. Preview and commit both resolve through here so the
    /// two can never diverge.
    pub fn resolve_move_set(&self, dragged: &ApplicantId) -> HashSet<ApplicantId> {
        if self.multi_select && !self.selected.is_empty() {
            let mut set = self.selected.clone();
            set.insert(dragged.clone());
            set
        } else {
            HashSet::from([dragged.clone()])
        }
    }
}
