//! Authoritative in-memory collection of applicant cards and stage columns.
//!
//! `BoardState` is the only mutation surface over the flat applicant list and
//! the stage registry; the sync coordinator layers persistence on top of it.

use super::domain::{Applicant, ApplicantId, ApplicantPatch, StageId, StageInfo};

/// Business-rule refusals for stage (column) management.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StageRuleViolation {
    #[error("the '{0}' column is fixed and cannot be deleted")]
    Fixed(StageId),
    #[error("the '{stage}' column still holds {occupants} applicant(s)")]
    NotEmpty { stage: StageId, occupants: usize },
    #[error("unknown column '{0}'")]
    Unknown(StageId),
}

/// Owned board collections with pure query and mutation operations.
#[derive(Debug, Clone, Default)]
pub struct BoardState {
    applicants: Vec<Applicant>,
    stages: Vec<StageInfo>,
}

impl BoardState {
    pub fn new(stages: Vec<StageInfo>, applicants: Vec<Applicant>) -> Self {
        Self { applicants, stages }
    }

    pub fn applicants(&self) -> &[Applicant] {
        &self.applicants
    }

    /// Applicants of one stage, order preserved from the authoritative list.
    pub fn applicants_in(&self, stage: &StageId) -> Vec<&Applicant> {
        self.applicants.iter().filter(|a| &a.stage == stage).collect()
    }

    pub fn applicant(&self, id: &ApplicantId) -> Option<&Applicant> {
        self.applicants.iter().find(|a| &a.id == id)
    }

    pub fn stages(&self) -> &[StageInfo] {
        &self.stages
    }

    pub fn stage(&self, id: &StageId) -> Option<&StageInfo> {
        self.stages.iter().find(|s| &s.id == id)
    }

    pub fn stage_title(&self, id: &StageId) -> &str {
        self.stage(id).map(|s| s.title.as_str()).unwrap_or("")
    }

    /// Canonical stage sequence defining cross-stage concatenation order.
    pub fn stage_order(&self) -> Vec<StageId> {
        self.stages.iter().map(|s| s.id.clone()).collect()
    }

    /// New cards land at the head of the list (top of their column).
    pub fn insert_front(&mut self, applicant: Applicant) {
        self.applicants.insert(0, applicant);
    }

    pub fn remove(&mut self, id: &ApplicantId) -> Option<Applicant> {
        let index = self.applicants.iter().position(|a| &a.id == id)?;
        Some(self.applicants.remove(index))
    }

    /// Apply a partial field update. Returns `false` when the id is unknown.
    pub fn apply_patch(&mut self, id: &ApplicantId, patch: &ApplicantPatch) -> bool {
        let Some(applicant) = self.applicants.iter_mut().find(|a| &a.id == id) else {
            return false;
        };
        if let Some(name) = &patch.name {
            applicant.name = name.clone();
        }
        if let Some(stage) = &patch.stage {
            applicant.stage = stage.clone();
        }
        if let Some(registration_type) = patch.registration_type {
            applicant.registration_type = registration_type;
        }
        if let Some(applied_date) = &patch.applied_date {
            applicant.applied_date = applied_date.clone();
        }
        if let Some(evaluation) = patch.evaluation {
            applicant.evaluation = evaluation;
        }
        true
    }

    /// Retarget one card. Returns `true` only when the stage actually
    /// changed; moving a card onto its current stage is not a mutation.
    pub fn set_stage(&mut self, id: &ApplicantId, stage: &StageId) -> bool {
        match self.applicants.iter_mut().find(|a| &a.id == id) {
            Some(applicant) if &applicant.stage != stage => {
                applicant.stage = stage.clone();
                true
            }
            _ => false,
        }
    }

    /// Retarget a set of cards, returning the ids whose stage actually
    /// changed. Unaffected entities must not reach the persistence layer.
    pub fn set_stage_for_ids(&mut self, ids: &[ApplicantId], stage: &StageId) -> Vec<ApplicantId> {
        let mut changed = Vec::new();
        for applicant in &mut self.applicants {
            if ids.contains(&applicant.id) && &applicant.stage != stage {
                applicant.stage = stage.clone();
                changed.push(applicant.id.clone());
            }
        }
        changed
    }

    /// Swap a temp-id card for its server-confirmed record without
    /// disturbing its position in the list.
    pub fn replace_applicant(&mut self, temp_id: &ApplicantId, confirmed: Applicant) -> bool {
        match self.applicants.iter_mut().find(|a| &a.id == temp_id) {
            Some(slot) => {
                *slot = confirmed;
                true
            }
            None => false,
        }
    }

    pub fn replace_applicants(&mut self, applicants: Vec<Applicant>) {
        self.applicants = applicants;
    }

    pub fn replace_stages(&mut self, stages: Vec<StageInfo>) {
        self.stages = stages;
    }

    /// Insert a new column immediately before the first fixed stage, or at
    /// the end when no stage is fixed.
    pub fn push_stage(&mut self, info: StageInfo) {
        match self.stages.iter().position(|s| s.is_fixed) {
            Some(index) => self.stages.insert(index, info),
            None => self.stages.push(info),
        }
    }

    pub fn rename_stage(&mut self, id: &StageId, title: &str) -> bool {
        match self.stages.iter_mut().find(|s| &s.id == id) {
            Some(stage) => {
                stage.title = title.to_string();
                true
            }
            None => false,
        }
    }

    /// Swap a temp-id column for its server-confirmed record in place.
    pub fn replace_stage(&mut self, temp_id: &StageId, confirmed: StageInfo) -> bool {
        match self.stages.iter_mut().find(|s| &s.id == temp_id) {
            Some(slot) => {
                *slot = confirmed;
                true
            }
            None => false,
        }
    }

    /// Delete a column. Refused while the column is fixed or still holds
    /// applicants; refusals leave both collections untouched.
    pub fn remove_stage(&mut self, id: &StageId) -> Result<StageInfo, StageRuleViolation> {
        let index = self
            .stages
            .iter()
            .position(|s| &s.id == id)
            .ok_or_else(|| StageRuleViolation::Unknown(id.clone()))?;
        if self.stages[index].is_fixed {
            return Err(StageRuleViolation::Fixed(id.clone()));
        }
        let occupants = self.applicants.iter().filter(|a| &a.stage == id).count();
        if occupants > 0 {
            return Err(StageRuleViolation::NotEmpty {
                stage: id.clone(),
                occupants,
            });
        }
        Ok(self.stages.remove(index))
    }
}
