//! Drag gesture handling.
//!
//! The gesture layer is an external input source; it only reports that a
//! card was picked up, is hovering over a target, or was released. Hovering
//! previews the move locally (no remote traffic); release commits it
//! through the persistence contract. Both resolve the affected card set
//! through the same selection rule, so preview and commit never diverge.

use std::collections::HashSet;

use super::domain::{ApplicantId, StageId};
use super::repository::BoardRepository;
use super::sync::{Board, DragSession};

/// What the gesture layer reports the drag is over: another card, or a
/// column background (which is how drops land on empty columns).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    Card(ApplicantId),
    Column(StageId),
}

impl<R: BoardRepository> Board<R> {
    /// A card was picked up. In multi-select mode an unselected dragged
    /// card joins the selection so the preview badge matches the move set.
    pub fn drag_start(&mut self, id: &ApplicantId) {
        if self.applicant(id).is_none() {
            return;
        }
        if self.selection().is_multi_select() && !self.selection().contains(id) {
            self.selection_mut().insert(id);
        }
        self.drag = Some(DragSession::default());
    }

    /// Hover preview: retarget the move set locally when the drag crosses
    /// into another column. Purely local; first-time stage changes record
    /// the card's origin stage so the commit can diff (and a cancel can
    /// restore).
    pub fn drag_over(&mut self, active: &ApplicantId, target: &DropTarget) {
        let Some(new_stage) = self.preview_target_stage(active, target) else {
            return;
        };
        let move_set = self.selection().resolve_move_set(active);
        self.preview_move(&move_set, &new_stage);
    }

    /// The drag was released. `None` means the drag was cancelled (dropped
    /// outside every target): the preview is restored and nothing is
    /// persisted. Otherwise the final move or reorder is applied and
    /// committed; any remote failure rolls the whole drag back via refetch.
    pub async fn drag_end(&mut self, active: &ApplicantId, target: Option<DropTarget>) {
        let session = self.drag.take().unwrap_or_default();

        let Some(target) = target else {
            self.restore_preview(session);
            return;
        };

        match target {
            DropTarget::Column(stage) => {
                if self.state().stage(&stage).is_none() {
                    self.commit_preview_only(session, active).await;
                    return;
                }
                let move_set = self.selection().resolve_move_set(active);
                self.commit_stage_move(session, &move_set, &stage).await;
            }
            DropTarget::Card(over) => {
                if &over == active {
                    // Dropped on itself: nothing to reorder, but a preview
                    // may still have crossed columns.
                    self.commit_preview_only(session, active).await;
                    return;
                }
                let Some(over_stage) = self.applicant(&over).map(|a| a.stage.clone()) else {
                    self.commit_preview_only(session, active).await;
                    return;
                };
                let active_stage = self.applicant(active).map(|a| a.stage.clone());
                if active_stage.as_ref() == Some(&over_stage) {
                    // Same column: commit any stage changes the preview
                    // accumulated, then reorder and persist positions.
                    self.commit_preview_only(session, active).await;
                    self.reorder(active, &over, &over_stage).await;
                } else {
                    let move_set = self.selection().resolve_move_set(active);
                    self.commit_stage_move(session, &move_set, &over_stage).await;
                }
            }
        }
    }

    /// Resolve the stage a hover would retarget to, or `None` when the
    /// hover changes nothing (same column, unknown target).
    fn preview_target_stage(&self, active: &ApplicantId, target: &DropTarget) -> Option<StageId> {
        let active_stage = &self.applicant(active)?.stage;
        match target {
            DropTarget::Column(stage) => {
                let stage = self.state().stage(stage)?.id.clone();
                (active_stage != &stage).then_some(stage)
            }
            DropTarget::Card(over) => {
                let over_stage = &self.applicant(over)?.stage;
                (active_stage != over_stage).then(|| over_stage.clone())
            }
        }
    }

    /// Local stage retargeting for the move set, recording origins in the
    /// drag session the first time each card moves.
    fn preview_move(&mut self, move_set: &HashSet<ApplicantId>, stage: &StageId) {
        let mut origins = Vec::new();
        for id in move_set {
            if let Some(current) = self.applicant(id).map(|a| a.stage.clone()) {
                if &current != stage {
                    origins.push((id.clone(), current));
                }
            }
        }
        let session = self.drag.get_or_insert_with(DragSession::default);
        for (id, origin) in &origins {
            session.origin_stages.entry(id.clone()).or_insert_with(|| origin.clone());
        }
        let ids: Vec<ApplicantId> = origins.into_iter().map(|(id, _)| id).collect();
        self.set_stage_local(&ids, stage);
    }

    /// Put every previewed card back on its origin stage (cancelled drag).
    fn restore_preview(&mut self, session: DragSession) {
        for (id, origin) in session.origin_stages {
            self.set_stage_local(&[id], &origin);
        }
    }

    /// Apply the final stage move locally, then persist exactly the net
    /// changes relative to the drag's origin stages.
    async fn commit_stage_move(
        &mut self,
        mut session: DragSession,
        move_set: &HashSet<ApplicantId>,
        stage: &StageId,
    ) {
        let ids: Vec<ApplicantId> = move_set.iter().cloned().collect();
        for id in &ids {
            if let Some(current) = self.applicant(id).map(|a| a.stage.clone()) {
                if &current != stage {
                    session.origin_stages.entry(id.clone()).or_insert(current);
                }
            }
        }
        self.set_stage_local(&ids, stage);

        let changed = self.net_changes(&session, stage);
        self.persist_stage_changes(changed, stage).await;
    }

    /// Persist preview-only stage changes (the drop target itself added
    /// nothing new).
    async fn commit_preview_only(&mut self, session: DragSession, active: &ApplicantId) {
        let Some(stage) = self.applicant(active).map(|a| a.stage.clone()) else {
            return;
        };
        let changed = self.net_changes(&session, &stage);
        self.persist_stage_changes(changed, &stage).await;
    }

    /// Ids whose current stage differs from their drag-origin stage and now
    /// sits on the commit target.
    fn net_changes(&self, session: &DragSession, stage: &StageId) -> Vec<ApplicantId> {
        session
            .origin_stages
            .iter()
            .filter(|(id, origin)| {
                self.applicant(id)
                    .map(|a| &a.stage == stage && &a.stage != *origin)
                    .unwrap_or(false)
            })
            .map(|(id, _)| id.clone())
            .collect()
    }
}
