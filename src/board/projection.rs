//! View derivations: search/category highlighting and display sorting.
//!
//! Projections never touch the authoritative collection; sorting operates on
//! a copy and the highlight set is recomputed per render.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::domain::{Applicant, ApplicantId, EvaluationCategory};

/// Evaluation-category predicate for the highlight filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationFilter {
    #[default]
    All,
    Completed,
    InProgress,
    NotStarted,
}

impl EvaluationFilter {
    fn matches(self, category: EvaluationCategory) -> bool {
        match self {
            EvaluationFilter::All => true,
            EvaluationFilter::Completed => category == EvaluationCategory::Completed,
            EvaluationFilter::InProgress => category == EvaluationCategory::InProgress,
            EvaluationFilter::NotStarted => category == EvaluationCategory::NotStarted,
        }
    }
}

/// Search query + evaluation-category filter.
#[derive(Debug, Clone, Default)]
pub struct BoardFilter {
    query: String,
    evaluation: EvaluationFilter,
}

impl BoardFilter {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn evaluation(&self) -> EvaluationFilter {
        self.evaluation
    }

    pub fn set_evaluation(&mut self, filter: EvaluationFilter) {
        self.evaluation = filter;
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.evaluation = EvaluationFilter::All;
    }

    /// A filter is active once there is a non-blank query or a narrowed
    /// evaluation category.
    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty() || self.evaluation != EvaluationFilter::All
    }

    /// Ids matching BOTH the search predicate (vacuously true on a blank
    /// query, otherwise case-insensitive substring on name or id) AND the
    /// evaluation-category predicate.
    pub fn highlighted_ids(&self, applicants: &[Applicant]) -> HashSet<ApplicantId> {
        let query = self.query.trim().to_lowercase();

        applicants
            .iter()
            .filter(|applicant| {
                let matches_search = query.is_empty()
                    || applicant.name.to_lowercase().contains(&query)
                    || applicant.id.as_str().to_lowercase().contains(&query);
                matches_search && self.evaluation.matches(applicant.evaluation.category())
            })
            .map(|applicant| applicant.id.clone())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Name,
    AppliedDate,
    EvaluationProgress,
}

impl SortField {
    pub const fn label(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::AppliedDate => "applied date",
            SortField::EvaluationProgress => "evaluation progress",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Display-sort settings. Inactive sort leaves the authoritative order
/// visible unchanged.
#[derive(Debug, Clone)]
pub struct BoardSort {
    field: SortField,
    order: SortOrder,
    active: bool,
}

impl Default for BoardSort {
    fn default() -> Self {
        Self {
            field: SortField::AppliedDate,
            order: SortOrder::Desc,
            active: false,
        }
    }
}

impl BoardSort {
    pub fn field(&self) -> SortField {
        self.field
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn activate(&mut self, field: SortField) {
        self.field = field;
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn toggle_order(&mut self) {
        self.order = match self.order {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        };
    }

    /// Comparator sort on a copy of `list`; the input (and the authoritative
    /// collection behind it) is never reordered. Name comparison is
    /// case-insensitive; applied dates compare lexically (the display format
    /// is zero-padded for exactly this reason); evaluation compares
    /// completion ratios.
    pub fn sorted(&self, list: &[Applicant]) -> Vec<Applicant> {
        let mut sorted: Vec<Applicant> = list.to_vec();
        if !self.active {
            return sorted;
        }

        sorted.sort_by(|a, b| {
            let comparison = match self.field {
                SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
                SortField::AppliedDate => a.applied_date.cmp(&b.applied_date),
                SortField::EvaluationProgress => {
                    a.evaluation.ratio().total_cmp(&b.evaluation.ratio())
                }
            };
            match self.order {
                SortOrder::Asc => comparison,
                SortOrder::Desc => comparison.reverse(),
            }
        });
        sorted
    }
}
