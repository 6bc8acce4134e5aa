//! Recruiting-pipeline board core.
//!
//! Applicant cards live in a single flat ordered list partitioned into
//! stage columns; the modules here own that list, the reorder algorithm
//! that keeps it canonically grouped, multi-select drag resolution, view
//! projections, and the optimistic-sync layer over the remote store.

pub mod domain;
mod drag;
mod ordering;
pub mod projection;
pub mod repository;
pub mod seed;
mod selection;
pub mod store;
mod sync;

#[cfg(test)]
mod tests;

pub use domain::{
    applied_date_today, Applicant, ApplicantId, ApplicantPatch, EvaluationCategory,
    EvaluationProgress, NewApplicant, RegistrationType, StageId, StageInfo,
};
pub use drag::DropTarget;
pub use ordering::{group_by_stage, reorder_within_stage};
pub use projection::{BoardFilter, BoardSort, EvaluationFilter, SortField, SortOrder};
pub use repository::{
    ApplicantRow, BoardRepository, ChangeNotice, NewApplicantRow, NewStageRow, PositionUpdate,
    RepositoryError, StageRow,
};
pub use seed::{default_stages, sample_applicants, HIRED_STAGE, STAGE_COLORS};
pub use selection::Selection;
pub use store::{BoardState, StageRuleViolation};
pub use sync::{Board, LocalBoard, NullRepository};
