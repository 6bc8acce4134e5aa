//! Optimistic mutation coordinator.
//!
//! Every board mutation applies to local state first, then issues the
//! matching remote call when a repository is attached. A failed remote call
//! discards the optimistic result by re-fetching the authoritative rows
//! (blind rollback, never inverse patching). Without a repository the
//! optimistic update is final and the board runs purely locally.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use super::domain::{
    applied_date_today, Applicant, ApplicantId, ApplicantPatch, EvaluationProgress, NewApplicant,
    StageId, StageInfo,
};
use super::ordering::group_by_stage;
use super::repository::{
    ApplicantRow, BoardRepository, ChangeNotice, NewApplicantRow, NewStageRow, PositionUpdate,
    RepositoryError, StageRow,
};
use super::seed::{default_stages, sample_applicants};
use super::selection::Selection;
use super::store::{BoardState, StageRuleViolation};

/// In-flight drag bookkeeping: the dragged card plus the origin stage of
/// every card the hover preview has retargeted so far. The commit diffs
/// current stages against these origins; a cancelled drag restores them.
#[derive(Debug, Default)]
pub(super) struct DragSession {
    pub(super) origin_stages: HashMap<ApplicantId, StageId>,
}

/// The board core: authoritative state, selection, and the optional remote
/// persistence collaborator.
///
/// All mutation funnels through `&mut self` methods from a single
/// event-processing task; repository calls are the only suspension points
/// and each optimistic local apply completes before its remote call is
/// issued. A rollback triggered by an older failed call can overwrite a
/// newer in-flight optimistic update; that race is accepted, not designed
/// against.
pub struct Board<R> {
    state: BoardState,
    selection: Selection,
    repository: Option<Arc<R>>,
    pub(super) drag: Option<DragSession>,
}

/// Placeholder repository type for boards that never sync. A detached
/// board holds no repository, so these methods are unreachable; they exist
/// only to satisfy the trait bound.
pub struct NullRepository;

impl BoardRepository for NullRepository {
    async fn list_applicants(&self) -> Result<Vec<ApplicantRow>, RepositoryError> {
        Err(RepositoryError::Unavailable("detached board".to_string()))
    }

    async fn insert_applicant(&self, _draft: NewApplicantRow) -> Result<ApplicantRow, RepositoryError> {
        Err(RepositoryError::Unavailable("detached board".to_string()))
    }

    async fn delete_applicant(&self, _id: &ApplicantId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("detached board".to_string()))
    }

    async fn update_applicant(
        &self,
        _id: &ApplicantId,
        _patch: ApplicantPatch,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("detached board".to_string()))
    }

    async fn update_stage_for_ids(
        &self,
        _ids: &[ApplicantId],
        _stage: &StageId,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("detached board".to_string()))
    }

    async fn update_positions(&self, _updates: &[PositionUpdate]) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("detached board".to_string()))
    }

    async fn list_stages(&self) -> Result<Vec<StageRow>, RepositoryError> {
        Err(RepositoryError::Unavailable("detached board".to_string()))
    }

    async fn insert_stage(&self, _draft: NewStageRow) -> Result<StageRow, RepositoryError> {
        Err(RepositoryError::Unavailable("detached board".to_string()))
    }

    async fn delete_stage(&self, _id: &StageId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("detached board".to_string()))
    }

    async fn rename_stage(&self, _id: &StageId, _title: &str) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("detached board".to_string()))
    }
}

/// A board with no remote persistence attached.
pub type LocalBoard = Board<NullRepository>;

impl LocalBoard {
    /// Board over the built-in seed data, no persistence.
    pub fn sample() -> Self {
        Self::detached(BoardState::new(default_stages(), sample_applicants()))
    }

    /// Local-only board over caller-supplied state.
    pub fn detached(state: BoardState) -> Self {
        Board {
            state,
            selection: Selection::default(),
            repository: None,
            drag: None,
        }
    }
}

impl<R: BoardRepository> Board<R> {
    /// Board backed by a remote store, starting from the given state.
    pub fn with_repository(state: BoardState, repository: Arc<R>) -> Self {
        Self {
            state,
            selection: Selection::default(),
            repository: Some(repository),
            drag: None,
        }
    }

    /// Hydrate a board from the remote store. A failed listing falls back
    /// to the built-in seed data, mirroring local-only behavior.
    pub async fn load(repository: Arc<R>) -> Self {
        let stages = match repository.list_stages().await {
            Ok(rows) => rows.into_iter().map(StageInfo::from).collect(),
            Err(error) => {
                warn!(%error, "failed to load stages, falling back to defaults");
                default_stages()
            }
        };
        let applicants = match repository.list_applicants().await {
            Ok(rows) => rows.into_iter().map(Applicant::from).collect(),
            Err(error) => {
                warn!(%error, "failed to load applicants, falling back to sample data");
                sample_applicants()
            }
        };

        let mut state = BoardState::new(stages, applicants);
        let order = state.stage_order();
        let grouped = group_by_stage(state.applicants(), &order);
        state.replace_applicants(grouped);

        Self::with_repository(state, repository)
    }
}

impl<R: BoardRepository> Board<R> {
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn applicants(&self) -> &[Applicant] {
        self.state.applicants()
    }

    pub fn applicants_in(&self, stage: &StageId) -> Vec<&Applicant> {
        self.state.applicants_in(stage)
    }

    pub fn applicant(&self, id: &ApplicantId) -> Option<&Applicant> {
        self.state.applicant(id)
    }

    pub fn stages(&self) -> &[StageInfo] {
        self.state.stages()
    }

    pub fn stage_title(&self, id: &StageId) -> &str {
        self.state.stage_title(id)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn toggle_multi_select(&mut self) {
        self.selection.toggle_multi_select();
    }

    pub fn toggle_selected(&mut self, id: &ApplicantId) {
        if self.state.applicant(id).is_some() {
            self.selection.toggle(id);
        }
    }

    pub(super) fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    /// Local-only stage retargeting used by drag previews and restores.
    pub(super) fn set_stage_local(&mut self, ids: &[ApplicantId], stage: &StageId) {
        self.state.set_stage_for_ids(ids, stage);
    }

    /// Blind rollback: replace both collections with a fresh remote fetch
    /// and regroup canonically. Listing failures leave the optimistic state
    /// in place; there is nothing better to show.
    async fn refresh_from_remote(&mut self) {
        let Some(repository) = self.repository.clone() else {
            return;
        };
        match repository.list_stages().await {
            Ok(rows) => {
                self.state
                    .replace_stages(rows.into_iter().map(StageInfo::from).collect());
            }
            Err(error) => warn!(%error, "rollback stage refetch failed"),
        }
        match repository.list_applicants().await {
            Ok(rows) => {
                let applicants: Vec<Applicant> = rows.into_iter().map(Applicant::from).collect();
                let order = self.state.stage_order();
                self.state.replace_applicants(group_by_stage(&applicants, &order));
            }
            Err(error) => warn!(%error, "rollback applicant refetch failed"),
        }
        self.prune_selection();
    }

    fn prune_selection(&mut self) {
        let state = &self.state;
        self.selection.retain(|id| state.applicant(id).is_some());
    }

    /// Create a card at the top of its column. The card is visible
    /// immediately under a temporary id; a confirmed insert swaps in the
    /// server row without disturbing the card's position.
    pub async fn add_applicant(&mut self, draft: NewApplicant) -> ApplicantId {
        let temp_id = ApplicantId::temporary();
        let applicant = Applicant {
            id: temp_id.clone(),
            name: draft.name.clone(),
            stage: draft.stage.clone(),
            registration_type: draft.registration_type,
            applied_date: applied_date_today(),
            evaluation: EvaluationProgress::default(),
        };
        self.state.insert_front(applicant);

        if let Some(repository) = self.repository.clone() {
            let row = NewApplicantRow {
                name: draft.name,
                stage: draft.stage.0,
                registration_type: draft.registration_type,
                applied_date: applied_date_today(),
                evaluation_current: 0,
                evaluation_total: 1,
                position: 0,
            };
            match repository.insert_applicant(row).await {
                Ok(confirmed) => {
                    self.state.replace_applicant(&temp_id, Applicant::from(confirmed));
                }
                Err(error) => {
                    warn!(%error, "applicant insert failed, rolling back");
                    self.refresh_from_remote().await;
                }
            }
        }
        temp_id
    }

    /// Remove a card. The selection is pruned on every removal path.
    pub async fn delete_applicant(&mut self, id: &ApplicantId) {
        if self.state.remove(id).is_none() {
            return;
        }
        self.selection.prune(id);

        if let Some(repository) = self.repository.clone() {
            if let Err(error) = repository.delete_applicant(id).await {
                warn!(%error, applicant = %id, "applicant delete failed, rolling back");
                self.refresh_from_remote().await;
            }
        }
    }

    /// Partial field update (rename, evaluation progress, ...).
    pub async fn update_applicant(&mut self, id: &ApplicantId, patch: ApplicantPatch) {
        if patch.is_empty() || !self.state.apply_patch(id, &patch) {
            return;
        }
        if let Some(repository) = self.repository.clone() {
            if let Err(error) = repository.update_applicant(id, patch).await {
                warn!(%error, applicant = %id, "applicant update failed, rolling back");
                self.refresh_from_remote().await;
            }
        }
    }

    /// Move a single card to another stage. Moving onto the current stage
    /// is a no-op and issues no remote call.
    pub async fn move_applicant(&mut self, id: &ApplicantId, stage: &StageId) {
        if !self.state.set_stage(id, stage) {
            return;
        }
        if let Some(repository) = self.repository.clone() {
            let patch = ApplicantPatch::stage(stage.clone());
            if let Err(error) = repository.update_applicant(id, patch).await {
                warn!(%error, applicant = %id, "stage move failed, rolling back");
                self.refresh_from_remote().await;
            }
        }
    }

    /// Move a set of cards atomically. Only cards whose stage actually
    /// changes are written; partial remote failure is treated as total
    /// failure and rolled back wholesale.
    pub async fn move_applicants(&mut self, ids: &[ApplicantId], stage: &StageId) {
        let changed = self.state.set_stage_for_ids(ids, stage);
        if changed.is_empty() {
            return;
        }
        if let Some(repository) = self.repository.clone() {
            if let Err(error) = repository.update_stage_for_ids(&changed, stage).await {
                warn!(%error, moved = changed.len(), "bulk stage move failed, rolling back");
                self.refresh_from_remote().await;
            }
        }
    }

    /// Reorder within one column: move `active` to `over`'s slot, keeping
    /// every other column's relative order intact. Missing ids are a silent
    /// no-op. Positions are persisted per entity for the affected slice.
    pub async fn reorder(&mut self, active: &ApplicantId, over: &ApplicantId, stage: &StageId) {
        let order = self.state.stage_order();
        let Some(reordered) =
            super::ordering::reorder_within_stage(self.state.applicants(), &order, stage, active, over)
        else {
            return;
        };
        self.state.replace_applicants(reordered);
        self.persist_positions(stage).await;
    }

    /// Write slice-local positions for one stage. Shared by reorder and the
    /// drag-end commit.
    pub(super) async fn persist_positions(&mut self, stage: &StageId) {
        let Some(repository) = self.repository.clone() else {
            return;
        };
        let updates: Vec<PositionUpdate> = self
            .state
            .applicants_in(stage)
            .iter()
            .enumerate()
            .map(|(index, applicant)| PositionUpdate {
                id: applicant.id.clone(),
                position: index as u32,
            })
            .collect();
        if updates.is_empty() {
            return;
        }
        if let Err(error) = repository.update_positions(&updates).await {
            warn!(%error, stage = %stage, "position update failed, rolling back");
            self.refresh_from_remote().await;
        }
    }

    /// Commit the net stage changes accumulated by a drag preview: one
    /// update for a single card, a bulk update for several. Any failure
    /// rolls back the whole drag.
    pub(super) async fn persist_stage_changes(&mut self, changed: Vec<ApplicantId>, stage: &StageId) {
        if changed.is_empty() {
            return;
        }
        let Some(repository) = self.repository.clone() else {
            return;
        };
        let result = if changed.len() == 1 {
            repository
                .update_applicant(&changed[0], ApplicantPatch::stage(stage.clone()))
                .await
        } else {
            repository.update_stage_for_ids(&changed, stage).await
        };
        if let Err(error) = result {
            warn!(%error, moved = changed.len(), "drag commit failed, rolling back");
            self.refresh_from_remote().await;
        }
    }

    /// Create a column immediately before the fixed `hired` column.
    pub async fn add_column(&mut self, title: &str, color: &str) -> StageId {
        let temp_id = StageId::custom();
        self.state.push_stage(StageInfo {
            id: temp_id.clone(),
            title: title.to_string(),
            color: color.to_string(),
            is_fixed: false,
        });

        if let Some(repository) = self.repository.clone() {
            let draft = NewStageRow {
                title: title.to_string(),
                color: color.to_string(),
            };
            match repository.insert_stage(draft).await {
                Ok(confirmed) => {
                    self.state.replace_stage(&temp_id, StageInfo::from(confirmed));
                }
                Err(error) => {
                    warn!(%error, "column insert failed, rolling back");
                    self.refresh_from_remote().await;
                }
            }
        }
        temp_id
    }

    /// Rename a column. Best effort: the remote write failure is logged but
    /// not rolled back.
    pub async fn rename_column(&mut self, id: &StageId, title: &str) {
        if !self.state.rename_stage(id, title) {
            return;
        }
        if let Some(repository) = self.repository.clone() {
            if let Err(error) = repository.rename_stage(id, title).await {
                warn!(%error, stage = %id, "column rename not persisted");
            }
        }
    }

    /// Delete a column. Refused with a user-visible violation while the
    /// column is fixed or still populated; a remote failure after the
    /// optimistic removal re-fetches the stage list.
    pub async fn delete_column(&mut self, id: &StageId) -> Result<(), StageRuleViolation> {
        self.state.remove_stage(id)?;

        if let Some(repository) = self.repository.clone() {
            if let Err(error) = repository.delete_stage(id).await {
                warn!(%error, stage = %id, "column delete failed, rolling back");
                match repository.list_stages().await {
                    Ok(rows) => self
                        .state
                        .replace_stages(rows.into_iter().map(StageInfo::from).collect()),
                    Err(error) => warn!(%error, "stage refetch failed"),
                }
            }
        }
        Ok(())
    }

    /// Apply a collaborator push: wholesale replacement of the affected
    /// collection, regrouped canonically, selection pruned. No diffing
    /// against local optimistic state.
    pub fn apply_change(&mut self, notice: ChangeNotice) {
        match notice {
            ChangeNotice::Applicants(rows) => {
                debug!(rows = rows.len(), "applying applicant push");
                let applicants: Vec<Applicant> = rows.into_iter().map(Applicant::from).collect();
                let order = self.state.stage_order();
                self.state.replace_applicants(group_by_stage(&applicants, &order));
                self.prune_selection();
            }
            ChangeNotice::Stages(rows) => {
                debug!(rows = rows.len(), "applying stage push");
                self.state
                    .replace_stages(rows.into_iter().map(StageInfo::from).collect());
                let order = self.state.stage_order();
                let grouped = group_by_stage(self.state.applicants(), &order);
                self.state.replace_applicants(grouped);
            }
        }
    }
}
