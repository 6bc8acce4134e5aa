use super::common::*;
use crate::board::domain::{ApplicantId, ApplicantPatch, EvaluationProgress, StageId};
use crate::board::store::StageRuleViolation;

#[test]
fn applicants_in_returns_exactly_the_stage_slice_in_order() {
    let state = fixture_state();
    let slice: Vec<&str> = state
        .applicants_in(&StageId::from("application"))
        .iter()
        .map(|a| a.id.as_str())
        .collect();
    assert_eq!(slice, vec!["A1", "A2", "A3"]);

    for applicant in state.applicants() {
        let in_slice = slice.contains(&applicant.id.as_str());
        assert_eq!(in_slice, applicant.stage.as_str() == "application");
    }
}

#[test]
fn new_cards_land_at_the_head_of_the_list() {
    let mut state = fixture_state();
    state.insert_front(applicant("N1", "New", "application", 0, 1));
    assert_eq!(state.applicants()[0].id.as_str(), "N1");
    assert_eq!(state.applicants().len(), 7);
}

#[test]
fn set_stage_reports_false_when_nothing_changes() {
    let mut state = fixture_state();
    assert!(!state.set_stage(&ApplicantId::from("A1"), &StageId::from("application")));
    assert!(!state.set_stage(&ApplicantId::from("ghost"), &StageId::from("screen_call")));
    assert!(state.set_stage(&ApplicantId::from("A1"), &StageId::from("screen_call")));
}

#[test]
fn set_stage_for_ids_reports_only_the_ids_that_moved() {
    let mut state = fixture_state();
    let ids = [
        ApplicantId::from("A1"),
        ApplicantId::from("B1"), // already there
        ApplicantId::from("ghost"),
    ];
    let changed = state.set_stage_for_ids(&ids, &StageId::from("screen_call"));
    assert_eq!(changed, vec![ApplicantId::from("A1")]);
}

#[test]
fn patch_updates_only_the_provided_fields() {
    let mut state = fixture_state();
    let patch = ApplicantPatch {
        name: Some("Kim Jiwon".to_string()),
        evaluation: Some(EvaluationProgress::new(2, 2)),
        ..ApplicantPatch::default()
    };
    assert!(state.apply_patch(&ApplicantId::from("A1"), &patch));

    let updated = state.applicant(&ApplicantId::from("A1")).expect("present");
    assert_eq!(updated.name, "Kim Jiwon");
    assert_eq!(updated.evaluation, EvaluationProgress::new(2, 2));
    assert_eq!(updated.stage.as_str(), "application");
}

#[test]
fn replace_applicant_swaps_the_record_without_moving_it() {
    let mut state = fixture_state();
    let confirmed = applicant("srv-1", "Lee", "application", 2, 2);
    assert!(state.replace_applicant(&ApplicantId::from("A2"), confirmed));
    assert_eq!(ids(state.applicants()), vec!["A1", "srv-1", "A3", "B1", "B2", "H1"]);
}

#[test]
fn custom_columns_insert_before_the_fixed_stage() {
    let mut state = fixture_state();
    state.push_stage(stage("loop_back", "Loop Back", false));
    let order: Vec<&str> = state.stages().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(order, vec!["application", "screen_call", "loop_back", "hired"]);
}

#[test]
fn fixed_column_deletion_is_refused() {
    let mut state = fixture_state();
    let before = state.stages().to_vec();
    match state.remove_stage(&StageId::from("hired")) {
        Err(StageRuleViolation::Fixed(id)) => assert_eq!(id.as_str(), "hired"),
        other => panic!("expected fixed-stage refusal, got {other:?}"),
    }
    assert_eq!(state.stages(), &before[..]);
}

#[test]
fn populated_column_deletion_is_refused_and_state_untouched() {
    let mut state = fixture_state();
    let stages_before = state.stages().to_vec();
    let applicants_before = state.applicants().to_vec();
    match state.remove_stage(&StageId::from("screen_call")) {
        Err(StageRuleViolation::NotEmpty { stage, occupants }) => {
            assert_eq!(stage.as_str(), "screen_call");
            assert_eq!(occupants, 2);
        }
        other => panic!("expected non-empty refusal, got {other:?}"),
    }
    assert_eq!(state.stages(), &stages_before[..]);
    assert_eq!(state.applicants(), &applicants_before[..]);
}

#[test]
fn empty_custom_column_can_be_deleted() {
    let mut state = fixture_state();
    state.push_stage(stage("loop_back", "Loop Back", false));
    let removed = state.remove_stage(&StageId::from("loop_back")).expect("deletable");
    assert_eq!(removed.id.as_str(), "loop_back");
    assert!(state.stage(&StageId::from("loop_back")).is_none());
}

#[test]
fn unknown_column_deletion_is_refused() {
    let mut state = fixture_state();
    assert!(matches!(
        state.remove_stage(&StageId::from("ghost")),
        Err(StageRuleViolation::Unknown(_))
    ));
}

#[test]
fn rename_reports_unknown_columns() {
    let mut state = fixture_state();
    assert!(state.rename_stage(&StageId::from("screen_call"), "Phone Screen"));
    assert_eq!(state.stage_title(&StageId::from("screen_call")), "Phone Screen");
    assert!(!state.rename_stage(&StageId::from("ghost"), "Nope"));
}
