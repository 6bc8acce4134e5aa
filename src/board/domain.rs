use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for applicant cards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicantId(pub String);

/// Identifier wrapper for pipeline stages. The stage set is runtime-mutable,
/// so stage identity is an opaque key resolved against the stage registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StageId(pub String);

static LOCAL_ID_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_local_suffix() -> String {
    let seq = LOCAL_ID_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{}_{seq}", Utc::now().timestamp_millis())
}

impl ApplicantId {
    /// Client-generated placeholder id, replaced by the server-assigned id
    /// once the insert is confirmed.
    pub fn temporary() -> Self {
        Self(format!("new_{}", next_local_suffix()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl StageId {
    /// Placeholder id for a user-created column.
    pub fn custom() -> Self {
        Self(format!("custom_{}", next_local_suffix()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplicantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ApplicantId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for StageId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// How the applicant entered the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationType {
    Direct,
    Posted,
}

impl RegistrationType {
    pub const fn label(self) -> &'static str {
        match self {
            RegistrationType::Direct => "direct",
            RegistrationType::Posted => "posted",
        }
    }
}

/// Completed vs. expected evaluation rounds for one applicant.
///
/// `total` is always at least one, so `ratio` never divides by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationProgress {
    pub current: u32,
    pub total: u32,
}

impl EvaluationProgress {
    pub fn new(current: u32, total: u32) -> Self {
        let total = total.max(1);
        Self {
            current: current.min(total),
            total,
        }
    }

    pub fn ratio(self) -> f64 {
        f64::from(self.current) / f64::from(self.total)
    }

    pub fn category(self) -> EvaluationCategory {
        if self.current == 0 {
            EvaluationCategory::NotStarted
        } else if self.current < self.total {
            EvaluationCategory::InProgress
        } else {
            EvaluationCategory::Completed
        }
    }
}

impl Default for EvaluationProgress {
    fn default() -> Self {
        Self::new(0, 1)
    }
}

/// Coarse evaluation bucket used by the highlight filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationCategory {
    NotStarted,
    InProgress,
    Completed,
}

/// A candidate card tracked through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applicant {
    pub id: ApplicantId,
    pub name: String,
    pub stage: StageId,
    pub registration_type: RegistrationType,
    pub applied_date: String,
    pub evaluation: EvaluationProgress,
}

/// Draft fields for a new applicant card; everything else is defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewApplicant {
    pub name: String,
    pub registration_type: RegistrationType,
    pub stage: StageId,
}

/// Partial update applied to an existing applicant card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<StageId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_type: Option<RegistrationType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<EvaluationProgress>,
}

impl ApplicantPatch {
    pub fn stage(stage: StageId) -> Self {
        Self {
            stage: Some(stage),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.stage.is_none()
            && self.registration_type.is_none()
            && self.applied_date.is_none()
            && self.evaluation.is_none()
    }
}

/// A named pipeline column. At most the trailing stages are fixed; a fixed
/// stage cannot be deleted and custom stages insert ahead of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageInfo {
    pub id: StageId,
    pub title: String,
    pub color: String,
    pub is_fixed: bool,
}

/// Today's date in the zero-padded `YYYY. MM. DD` display format the board
/// uses for applied dates. Lexical order matches chronological order.
pub fn applied_date_today() -> String {
    Local::now().format("%Y. %m. %d").to_string()
}
