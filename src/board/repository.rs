//! Persistence collaborator boundary.
//!
//! The remote store is row-oriented: applicants and stages live in two
//! tables ordered by a `position` column. Every call is fallible and
//! reports failure through `Result` so the sync coordinator can branch on
//! it; nothing at this boundary panics or is allowed to escape the
//! coordinator.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use super::domain::{
    Applicant, ApplicantId, ApplicantPatch, EvaluationProgress, RegistrationType, StageId,
    StageInfo,
};

/// Applicant table row as stored remotely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantRow {
    pub id: String,
    pub name: String,
    pub stage: String,
    pub registration_type: RegistrationType,
    pub applied_date: String,
    pub evaluation_current: u32,
    pub evaluation_total: u32,
    pub position: u32,
}

impl From<ApplicantRow> for Applicant {
    fn from(row: ApplicantRow) -> Self {
        Applicant {
            id: ApplicantId(row.id),
            name: row.name,
            stage: StageId(row.stage),
            registration_type: row.registration_type,
            applied_date: row.applied_date,
            evaluation: EvaluationProgress::new(row.evaluation_current, row.evaluation_total),
        }
    }
}

impl ApplicantRow {
    /// Echo a domain record back as a row, e.g. from in-memory stores.
    pub fn from_applicant(applicant: &Applicant, position: u32) -> Self {
        Self {
            id: applicant.id.0.clone(),
            name: applicant.name.clone(),
            stage: applicant.stage.0.clone(),
            registration_type: applicant.registration_type,
            applied_date: applicant.applied_date.clone(),
            evaluation_current: applicant.evaluation.current,
            evaluation_total: applicant.evaluation.total,
            position,
        }
    }
}

/// Insert payload for a new applicant row; the server assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewApplicantRow {
    pub name: String,
    pub stage: String,
    pub registration_type: RegistrationType,
    pub applied_date: String,
    pub evaluation_current: u32,
    pub evaluation_total: u32,
    pub position: u32,
}

/// Stage table row as stored remotely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageRow {
    pub id: String,
    pub title: String,
    pub color: String,
    pub position: u32,
    pub is_fixed: bool,
}

impl From<StageRow> for StageInfo {
    fn from(row: StageRow) -> Self {
        StageInfo {
            id: StageId(row.id),
            title: row.title,
            color: row.color,
            is_fixed: row.is_fixed,
        }
    }
}

impl StageRow {
    pub fn from_stage(stage: &StageInfo, position: u32) -> Self {
        Self {
            id: stage.id.0.clone(),
            title: stage.title.clone(),
            color: stage.color.clone(),
            position,
            is_fixed: stage.is_fixed,
        }
    }
}

/// Insert payload for a new stage row; positioned before the fixed tail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStageRow {
    pub title: String,
    pub color: String,
}

/// One per-entity position write issued after a reorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionUpdate {
    pub id: ApplicantId,
    pub position: u32,
}

/// Collaborator-pushed replacement row sets (e.g. edits from other
/// clients). The core replaces its local collection wholesale; it never
/// diffs a push against optimistic state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeNotice {
    Applicants(Vec<ApplicantRow>),
    Stages(Vec<StageRow>),
}

/// Error enumeration for remote persistence failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("row not found")]
    NotFound,
    #[error("remote rejected the write: {0}")]
    Rejected(String),
    #[error("remote store unavailable: {0}")]
    Unavailable(String),
}

/// Row-oriented remote store the board persists through. Implementations
/// are expected to resolve row listings ordered by `position`.
pub trait BoardRepository: Send + Sync {
    fn list_applicants(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<ApplicantRow>, RepositoryError>> + Send;

    fn insert_applicant(
        &self,
        draft: NewApplicantRow,
    ) -> impl std::future::Future<Output = Result<ApplicantRow, RepositoryError>> + Send;

    fn delete_applicant(
        &self,
        id: &ApplicantId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    fn update_applicant(
        &self,
        id: &ApplicantId,
        patch: ApplicantPatch,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    fn update_stage_for_ids(
        &self,
        ids: &[ApplicantId],
        stage: &StageId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    fn update_positions(
        &self,
        updates: &[PositionUpdate],
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    fn list_stages(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<StageRow>, RepositoryError>> + Send;

    fn insert_stage(
        &self,
        draft: NewStageRow,
    ) -> impl std::future::Future<Output = Result<StageRow, RepositoryError>> + Send;

    fn delete_stage(
        &self,
        id: &StageId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    fn rename_stage(
        &self,
        id: &StageId,
        title: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Change-notification channel for pushes from other clients. Stores
    /// without realtime support return `None`.
    fn subscribe(&self) -> Option<mpsc::UnboundedReceiver<ChangeNotice>> {
        None
    }
}
