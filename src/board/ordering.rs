//! Partitioned stable-reorder over the flat applicant list.
//!
//! The authoritative collection is a single ordered `Vec`; position within a
//! stage is encoded purely by relative order among same-stage entries. Every
//! function here preserves the invariant that the full list is the
//! concatenation of per-stage slices in canonical stage order.

use super::domain::{Applicant, ApplicantId, StageId};

/// Remove-then-insert list move (not a swap).
pub(crate) fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from == to || from >= items.len() || to >= items.len() {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

/// Rebuild the full list grouped by canonical stage order, preserving
/// relative order within each stage. Entities referencing a stage missing
/// from `stage_order` are appended after the known stages in their original
/// relative order, so the result always carries the same multiset of
/// entities as the input.
pub fn group_by_stage(list: &[Applicant], stage_order: &[StageId]) -> Vec<Applicant> {
    let mut grouped: Vec<Applicant> = Vec::with_capacity(list.len());
    for stage in stage_order {
        grouped.extend(list.iter().filter(|a| &a.stage == stage).cloned());
    }
    if grouped.len() < list.len() {
        grouped.extend(
            list.iter()
                .filter(|a| !stage_order.contains(&a.stage))
                .cloned(),
        );
    }
    grouped
}

/// Move `active` to `over`'s position within the slice of `stage`, then
/// reconstruct the full list in canonical stage order.
///
/// Returns `None` when the instruction is a no-op: `active == over`, or
/// either id is absent from the target stage's slice. Missing ids are a
/// validation-level condition, not an error.
pub fn reorder_within_stage(
    list: &[Applicant],
    stage_order: &[StageId],
    stage: &StageId,
    active: &ApplicantId,
    over: &ApplicantId,
) -> Option<Vec<Applicant>> {
    if active == over {
        return None;
    }

    let mut slice: Vec<Applicant> = list.iter().filter(|a| &a.stage == stage).cloned().collect();
    let others: Vec<Applicant> = list.iter().filter(|a| &a.stage != stage).cloned().collect();

    let old_index = slice.iter().position(|a| &a.id == active)?;
    let new_index = slice.iter().position(|a| &a.id == over)?;

    array_move(&mut slice, old_index, new_index);

    let mut rebuilt: Vec<Applicant> = Vec::with_capacity(list.len());
    for ordered in stage_order {
        if ordered == stage {
            rebuilt.extend(slice.iter().cloned());
        } else {
            rebuilt.extend(others.iter().filter(|a| &a.stage == ordered).cloned());
        }
    }
    if rebuilt.len() < list.len() {
        rebuilt.extend(
            others
                .iter()
                .filter(|a| !stage_order.contains(&a.stage))
                .cloned(),
        );
        if !stage_order.contains(stage) {
            // Target stage itself unknown: its reordered slice still has to land somewhere.
            rebuilt.extend(slice.iter().cloned());
        }
    }
    Some(rebuilt)
}
