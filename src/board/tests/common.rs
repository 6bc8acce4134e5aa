use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::board::domain::{
    Applicant, ApplicantId, ApplicantPatch, EvaluationProgress, RegistrationType, StageId,
    StageInfo,
};
use crate::board::repository::{
    ApplicantRow, BoardRepository, NewApplicantRow, NewStageRow, PositionUpdate, RepositoryError,
    StageRow,
};
use crate::board::store::BoardState;
use crate::board::sync::Board;

pub(super) fn stage(id: &str, title: &str, is_fixed: bool) -> StageInfo {
    StageInfo {
        id: StageId::from(id),
        title: title.to_string(),
        color: "#3B82F6".to_string(),
        is_fixed,
    }
}

pub(super) fn fixture_stages() -> Vec<StageInfo> {
    vec![
        stage("application", "Application Review", false),
        stage("screen_call", "Recruiter Screen", false),
        stage("hired", "Hired", true),
    ]
}

pub(super) fn applicant(id: &str, name: &str, stage: &str, current: u32, total: u32) -> Applicant {
    Applicant {
        id: ApplicantId::from(id),
        name: name.to_string(),
        stage: StageId::from(stage),
        registration_type: RegistrationType::Posted,
        applied_date: format!("2025. 09. {:02}", (id.len() % 28) + 1),
        evaluation: EvaluationProgress::new(current, total),
    }
}

pub(super) fn fixture_applicants() -> Vec<Applicant> {
    vec![
        applicant("A1", "Kim", "application", 1, 2),
        applicant("A2", "Lee", "application", 2, 2),
        applicant("A3", "Park", "application", 0, 1),
        applicant("B1", "Choi", "screen_call", 1, 1),
        applicant("B2", "Jung", "screen_call", 0, 2),
        applicant("H1", "Ahn", "hired", 1, 1),
    ]
}

pub(super) fn fixture_state() -> BoardState {
    BoardState::new(fixture_stages(), fixture_applicants())
}

pub(super) fn ids(applicants: &[Applicant]) -> Vec<&str> {
    applicants.iter().map(|a| a.id.as_str()).collect()
}

pub(super) fn rows_for(state: &BoardState) -> (Vec<StageRow>, Vec<ApplicantRow>) {
    let stages = state
        .stages()
        .iter()
        .enumerate()
        .map(|(position, s)| StageRow::from_stage(s, position as u32))
        .collect();
    let applicants = state
        .applicants()
        .iter()
        .enumerate()
        .map(|(position, a)| ApplicantRow::from_applicant(a, position as u32))
        .collect();
    (stages, applicants)
}

/// Mutex-guarded in-memory store mirroring the remote row tables, recording
/// every call so tests can assert what traffic a gesture produced.
#[derive(Default)]
pub(super) struct MemoryRepository {
    applicants: Mutex<Vec<ApplicantRow>>,
    stages: Mutex<Vec<StageRow>>,
    calls: Mutex<Vec<&'static str>>,
    sequence: AtomicU64,
}

impl MemoryRepository {
    pub(super) fn seeded(state: &BoardState) -> Arc<Self> {
        let (stages, applicants) = rows_for(state);
        let repository = Self::default();
        *repository.stages.lock().expect("stage mutex poisoned") = stages;
        *repository.applicants.lock().expect("applicant mutex poisoned") = applicants;
        Arc::new(repository)
    }

    pub(super) fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().expect("call mutex poisoned").clone()
    }

    pub(super) fn clear_calls(&self) {
        self.calls.lock().expect("call mutex poisoned").clear();
    }

    pub(super) fn applicant_rows(&self) -> Vec<ApplicantRow> {
        let mut rows = self.applicants.lock().expect("applicant mutex poisoned").clone();
        rows.sort_by_key(|row| row.position);
        rows
    }

    pub(super) fn stage_rows(&self) -> Vec<StageRow> {
        let mut rows = self.stages.lock().expect("stage mutex poisoned").clone();
        rows.sort_by_key(|row| row.position);
        rows
    }

    pub(super) fn row_stage(&self, id: &str) -> Option<String> {
        self.applicants
            .lock()
            .expect("applicant mutex poisoned")
            .iter()
            .find(|row| row.id == id)
            .map(|row| row.stage.clone())
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().expect("call mutex poisoned").push(call);
    }

    fn next_id(&self, prefix: &str) -> String {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        format!("{prefix}-{sequence:04}")
    }
}

impl BoardRepository for MemoryRepository {
    async fn list_applicants(&self) -> Result<Vec<ApplicantRow>, RepositoryError> {
        self.record("list_applicants");
        Ok(self.applicant_rows())
    }

    async fn insert_applicant(&self, draft: NewApplicantRow) -> Result<ApplicantRow, RepositoryError> {
        self.record("insert_applicant");
        let row = ApplicantRow {
            id: self.next_id("srv"),
            name: draft.name,
            stage: draft.stage,
            registration_type: draft.registration_type,
            applied_date: draft.applied_date,
            evaluation_current: draft.evaluation_current,
            evaluation_total: draft.evaluation_total,
            position: draft.position,
        };
        self.applicants
            .lock()
            .expect("applicant mutex poisoned")
            .push(row.clone());
        Ok(row)
    }

    async fn delete_applicant(&self, id: &ApplicantId) -> Result<(), RepositoryError> {
        self.record("delete_applicant");
        let mut rows = self.applicants.lock().expect("applicant mutex poisoned");
        let before = rows.len();
        rows.retain(|row| row.id != id.as_str());
        if rows.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn update_applicant(
        &self,
        id: &ApplicantId,
        patch: ApplicantPatch,
    ) -> Result<(), RepositoryError> {
        self.record("update_applicant");
        let mut rows = self.applicants.lock().expect("applicant mutex poisoned");
        let row = rows
            .iter_mut()
            .find(|row| row.id == id.as_str())
            .ok_or(RepositoryError::NotFound)?;
        if let Some(name) = patch.name {
            row.name = name;
        }
        if let Some(stage) = patch.stage {
            row.stage = stage.0;
        }
        if let Some(registration_type) = patch.registration_type {
            row.registration_type = registration_type;
        }
        if let Some(applied_date) = patch.applied_date {
            row.applied_date = applied_date;
        }
        if let Some(evaluation) = patch.evaluation {
            row.evaluation_current = evaluation.current;
            row.evaluation_total = evaluation.total;
        }
        Ok(())
    }

    async fn update_stage_for_ids(
        &self,
        ids: &[ApplicantId],
        stage: &StageId,
    ) -> Result<(), RepositoryError> {
        self.record("update_stage_for_ids");
        let mut rows = self.applicants.lock().expect("applicant mutex poisoned");
        for row in rows.iter_mut() {
            if ids.iter().any(|id| id.as_str() == row.id) {
                row.stage = stage.0.clone();
            }
        }
        Ok(())
    }

    async fn update_positions(&self, updates: &[PositionUpdate]) -> Result<(), RepositoryError> {
        self.record("update_positions");
        let mut rows = self.applicants.lock().expect("applicant mutex poisoned");
        for update in updates {
            if let Some(row) = rows.iter_mut().find(|row| row.id == update.id.as_str()) {
                row.position = update.position;
            }
        }
        Ok(())
    }

    async fn list_stages(&self) -> Result<Vec<StageRow>, RepositoryError> {
        self.record("list_stages");
        Ok(self.stage_rows())
    }

    async fn insert_stage(&self, draft: NewStageRow) -> Result<StageRow, RepositoryError> {
        self.record("insert_stage");
        let mut rows = self.stages.lock().expect("stage mutex poisoned");
        // New stages slot in ahead of the fixed tail, like the real store.
        let position = rows
            .iter()
            .filter(|row| row.is_fixed)
            .map(|row| row.position)
            .min()
            .unwrap_or_else(|| rows.len() as u32);
        for row in rows.iter_mut() {
            if row.position >= position {
                row.position += 1;
            }
        }
        let row = StageRow {
            id: self.next_id("stage"),
            title: draft.title,
            color: draft.color,
            position,
            is_fixed: false,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn delete_stage(&self, id: &StageId) -> Result<(), RepositoryError> {
        self.record("delete_stage");
        let mut rows = self.stages.lock().expect("stage mutex poisoned");
        let before = rows.len();
        rows.retain(|row| row.id != id.as_str());
        if rows.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn rename_stage(&self, id: &StageId, title: &str) -> Result<(), RepositoryError> {
        self.record("rename_stage");
        let mut rows = self.stages.lock().expect("stage mutex poisoned");
        let row = rows
            .iter_mut()
            .find(|row| row.id == id.as_str())
            .ok_or(RepositoryError::NotFound)?;
        row.title = title.to_string();
        Ok(())
    }
}

/// Delegating store that fails the named operations, so tests can drive
/// the rollback paths while listings still serve the remote truth.
pub(super) struct FailingRepository {
    pub(super) inner: Arc<MemoryRepository>,
    failing: Mutex<HashSet<&'static str>>,
}

impl FailingRepository {
    pub(super) fn wrapping(inner: Arc<MemoryRepository>) -> Arc<Self> {
        Arc::new(Self {
            inner,
            failing: Mutex::new(HashSet::new()),
        })
    }

    pub(super) fn fail_on(&self, call: &'static str) {
        self.failing.lock().expect("failure mutex poisoned").insert(call);
    }

    fn check(&self, call: &'static str) -> Result<(), RepositoryError> {
        if self.failing.lock().expect("failure mutex poisoned").contains(call) {
            return Err(RepositoryError::Unavailable(format!("{call} offline")));
        }
        Ok(())
    }
}

impl BoardRepository for FailingRepository {
    async fn list_applicants(&self) -> Result<Vec<ApplicantRow>, RepositoryError> {
        self.check("list_applicants")?;
        self.inner.list_applicants().await
    }

    async fn insert_applicant(&self, draft: NewApplicantRow) -> Result<ApplicantRow, RepositoryError> {
        self.check("insert_applicant")?;
        self.inner.insert_applicant(draft).await
    }

    async fn delete_applicant(&self, id: &ApplicantId) -> Result<(), RepositoryError> {
        self.check("delete_applicant")?;
        self.inner.delete_applicant(id).await
    }

    async fn update_applicant(
        &self,
        id: &ApplicantId,
        patch: ApplicantPatch,
    ) -> Result<(), RepositoryError> {
        self.check("update_applicant")?;
        self.inner.update_applicant(id, patch).await
    }

    async fn update_stage_for_ids(
        &self,
        ids: &[ApplicantId],
        stage: &StageId,
    ) -> Result<(), RepositoryError> {
        self.check("update_stage_for_ids")?;
        self.inner.update_stage_for_ids(ids, stage).await
    }

    async fn update_positions(&self, updates: &[PositionUpdate]) -> Result<(), RepositoryError> {
        self.check("update_positions")?;
        self.inner.update_positions(updates).await
    }

    async fn list_stages(&self) -> Result<Vec<StageRow>, RepositoryError> {
        self.check("list_stages")?;
        self.inner.list_stages().await
    }

    async fn insert_stage(&self, draft: NewStageRow) -> Result<StageRow, RepositoryError> {
        self.check("insert_stage")?;
        self.inner.insert_stage(draft).await
    }

    async fn delete_stage(&self, id: &StageId) -> Result<(), RepositoryError> {
        self.check("delete_stage")?;
        self.inner.delete_stage(id).await
    }

    async fn rename_stage(&self, id: &StageId, title: &str) -> Result<(), RepositoryError> {
        self.check("rename_stage")?;
        self.inner.rename_stage(id, title).await
    }
}

pub(super) fn synced_board() -> (Board<MemoryRepository>, Arc<MemoryRepository>) {
    let state = fixture_state();
    let repository = MemoryRepository::seeded(&state);
    (Board::with_repository(state, repository.clone()), repository)
}

pub(super) fn failing_board() -> (Board<FailingRepository>, Arc<FailingRepository>) {
    let state = fixture_state();
    let inner = MemoryRepository::seeded(&state);
    let repository = FailingRepository::wrapping(inner);
    (Board::with_repository(state, repository.clone()), repository)
}
