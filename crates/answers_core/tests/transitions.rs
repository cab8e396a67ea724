use answers_core::{
    build_document, transition, AnswersDocument, AnswersEvent, AnswersState, AnswersStatus,
    PiiField, QuestionnaireTemplate, Respondent, TransitionError,
};
use std::sync::Arc;

fn template(id: &str, shape: &[usize]) -> QuestionnaireTemplate {
    QuestionnaireTemplate::from_shape(id, shape)
}

fn seeded(shape: &[usize]) -> Arc<AnswersState> {
    let initial = Arc::new(AnswersState::default());
    transition(&initial, &AnswersEvent::CreateStructure(template("q1", shape))).unwrap()
}

fn remote_document(id: &str, shape: &[usize]) -> AnswersDocument {
    let mut document = build_document(&template("q1", shape));
    document.id = id.to_string();
    document.submitted_at = "2024-05-01T10:00:00Z".to_string();
    document.respondent = Respondent {
        name: "Remote".to_string(),
        email: "remote@example.com".to_string(),
    };
    document
}

#[test]
fn update_answer_shares_untouched_sections() {
    let before = seeded(&[2, 1]);
    let after = transition(&before, &AnswersEvent::update_answer(1, 0, "yes")).unwrap();

    assert_eq!(after.data.answer(1, 0), Some("yes"));
    assert_eq!(before.data.answer(1, 0), Some(""));
    assert!(Arc::ptr_eq(&before.data.sections[0], &after.data.sections[0]));
    assert!(!Arc::ptr_eq(&before.data.sections[1], &after.data.sections[1]));
    assert_eq!(before.data.questionnaire_id, after.data.questionnaire_id);
    assert_eq!(before.data.respondent, after.data.respondent);
    assert_eq!(after.data.shape(), vec![2, 1]);
}

#[test]
fn update_answer_changes_only_the_addressed_slot() {
    let before = seeded(&[3]);
    let after = transition(&before, &AnswersEvent::update_answer(0, 1, "middle")).unwrap();

    assert_eq!(after.data.answer(0, 0), Some(""));
    assert_eq!(after.data.answer(0, 1), Some("middle"));
    assert_eq!(after.data.answer(0, 2), Some(""));
    assert_eq!(after.status, before.status);
    assert_eq!(after.local_storage_synced, before.local_storage_synced);
}

#[test]
fn out_of_range_update_is_an_error_and_keeps_state() {
    let before = seeded(&[1]);

    let err = transition(&before, &AnswersEvent::update_answer(0, 1, "x")).unwrap_err();
    assert!(matches!(err, TransitionError::AnswerSlotOutOfRange { .. }));

    let err = transition(&before, &AnswersEvent::update_answer(2, 0, "x")).unwrap_err();
    assert!(matches!(err, TransitionError::AnswerSlotOutOfRange { .. }));
    assert_eq!(before.data.answer(0, 0), Some(""));
}

#[test]
fn update_on_initial_state_is_out_of_range() {
    let initial = Arc::new(AnswersState::default());
    let err = transition(&initial, &AnswersEvent::update_answer(0, 0, "x")).unwrap_err();
    assert_eq!(
        err,
        TransitionError::AnswerSlotOutOfRange {
            section_index: 0,
            answers_index: 0,
            section_count: 0,
            slot_count: None,
        }
    );
}

#[test]
fn update_pii_sets_name_and_email() {
    let state = seeded(&[1]);
    let state = transition(&state, &AnswersEvent::update_pii(PiiField::Name, "Ada")).unwrap();
    let state = transition(
        &state,
        &AnswersEvent::update_pii(PiiField::Email, "ada@example.com"),
    )
    .unwrap();

    assert_eq!(state.data.respondent.name, "Ada");
    assert_eq!(state.data.respondent.email, "ada@example.com");
    assert_eq!(state.data.answer(0, 0), Some(""));
}

#[test]
fn update_pii_shares_all_sections() {
    let before = seeded(&[1, 1]);
    let after = transition(&before, &AnswersEvent::update_pii(PiiField::Name, "Ada")).unwrap();

    for (old, new) in before.data.sections.iter().zip(after.data.sections.iter()) {
        assert!(Arc::ptr_eq(old, new));
    }
    assert!(before.data.respondent.name.is_empty());
}

#[test]
fn create_structure_is_a_no_op_once_synced() {
    let initial = Arc::new(AnswersState::default());
    let restored = transition(
        &initial,
        &AnswersEvent::RestoreFromCache(remote_document("cached", &[1])),
    )
    .unwrap();

    let shapes: [&[usize]; 3] = [&[], &[5], &[2, 2]];
    for shape in shapes {
        let next = transition(&restored, &AnswersEvent::CreateStructure(template("q2", shape)))
            .unwrap();
        assert!(Arc::ptr_eq(&restored, &next));
    }
}

#[test]
fn create_structure_resets_status_when_unsynced() {
    let state = seeded(&[1]);
    let submitted = transition(&state, &AnswersEvent::SubmitSuccess).unwrap();
    assert_eq!(submitted.status, Some(AnswersStatus::Submitted));

    let reseeded = transition(&submitted, &AnswersEvent::CreateStructure(template("q3", &[2])))
        .unwrap();
    assert_eq!(reseeded.status, None);
    assert_eq!(reseeded.local_storage_synced, None);
    assert_eq!(reseeded.data.questionnaire_id, "q3");
    assert_eq!(reseeded.data.shape(), vec![2]);
}

#[test]
fn restore_from_cache_replaces_data_and_sets_synced() {
    let state = seeded(&[2, 1]);
    let state = transition(&state, &AnswersEvent::update_answer(0, 0, "local")).unwrap();
    let cached = remote_document("cached", &[3]);

    let restored = transition(&state, &AnswersEvent::RestoreFromCache(cached.clone())).unwrap();

    assert_eq!(*restored.data, cached);
    assert_eq!(restored.local_storage_synced, Some(true));
    assert!(restored.is_local_storage_synced());
}

#[test]
fn restore_from_cache_keeps_status() {
    let state = transition(&seeded(&[1]), &AnswersEvent::SubmitSuccess).unwrap();
    let restored = transition(
        &state,
        &AnswersEvent::RestoreFromCache(remote_document("cached", &[1])),
    )
    .unwrap();
    assert_eq!(restored.status, Some(AnswersStatus::Submitted));
}

#[test]
fn malformed_cache_surfaces_on_later_edit() {
    let state = seeded(&[2]);
    let restored = transition(
        &state,
        &AnswersEvent::RestoreFromCache(AnswersDocument::default()),
    )
    .unwrap();

    let err = transition(&restored, &AnswersEvent::update_answer(0, 1, "x")).unwrap_err();
    assert!(matches!(err, TransitionError::AnswerSlotOutOfRange { .. }));
}

#[test]
fn fetch_success_replaces_data_only() {
    let state = transition(&seeded(&[1]), &AnswersEvent::SubmitSuccess).unwrap();
    let remote = remote_document("server-1", &[1, 1]);

    let fetched = transition(&state, &AnswersEvent::FetchSuccess(remote.clone())).unwrap();

    assert_eq!(*fetched.data, remote);
    assert_eq!(fetched.status, Some(AnswersStatus::Submitted));
    assert_eq!(fetched.local_storage_synced, None);
}

#[test]
fn fetch_success_does_not_lift_seeding_guard() {
    let initial = Arc::new(AnswersState::default());
    let restored = transition(
        &initial,
        &AnswersEvent::RestoreFromCache(remote_document("cached", &[1])),
    )
    .unwrap();
    let fetched = transition(
        &restored,
        &AnswersEvent::FetchSuccess(remote_document("server", &[2])),
    )
    .unwrap();

    assert_eq!(fetched.local_storage_synced, Some(true));
    let next = transition(&fetched, &AnswersEvent::CreateStructure(template("q1", &[4])))
        .unwrap();
    assert!(Arc::ptr_eq(&fetched, &next));
}

#[test]
fn unrecognized_event_returns_same_reference() {
    let state = seeded(&[1]);
    let next = transition(
        &state,
        &AnswersEvent::Unrecognized {
            kind: "SOMETHING_ELSE".to_string(),
        },
    )
    .unwrap();
    assert!(Arc::ptr_eq(&state, &next));
}

#[test]
fn previous_states_stay_valid_across_a_sequence() {
    let s0 = seeded(&[2, 2]);
    let s1 = transition(&s0, &AnswersEvent::update_answer(0, 0, "a")).unwrap();
    let s2 = transition(&s1, &AnswersEvent::update_answer(1, 1, "b")).unwrap();
    let s3 = transition(&s2, &AnswersEvent::update_answer(0, 0, "c")).unwrap();

    assert_eq!(s0.data.answer(0, 0), Some(""));
    assert_eq!(s1.data.answer(0, 0), Some("a"));
    assert_eq!(s1.data.answer(1, 1), Some(""));
    assert_eq!(s2.data.answer(1, 1), Some("b"));
    assert_eq!(s3.data.answer(0, 0), Some("c"));
    assert_eq!(s3.data.answer(1, 1), Some("b"));
    assert!(Arc::ptr_eq(&s2.data.sections[1], &s3.data.sections[1]));
}

#[test]
fn repeated_submit_keeps_the_same_reference() {
    let submitted = transition(&seeded(&[1]), &AnswersEvent::SubmitSuccess).unwrap();
    let again = transition(&submitted, &AnswersEvent::SubmitSuccess).unwrap();
    assert!(Arc::ptr_eq(&submitted, &again));
}

#[test]
fn same_value_edits_keep_the_same_reference() {
    let state = transition(&seeded(&[2]), &AnswersEvent::update_answer(0, 1, "yes")).unwrap();
    let state = transition(&state, &AnswersEvent::update_pii(PiiField::Name, "Ada")).unwrap();

    let same_answer = transition(&state, &AnswersEvent::update_answer(0, 1, "yes")).unwrap();
    assert!(Arc::ptr_eq(&state, &same_answer));
    assert!(Arc::ptr_eq(&state.data.sections[0], &same_answer.data.sections[0]));

    let same_name = transition(&state, &AnswersEvent::update_pii(PiiField::Name, "Ada")).unwrap();
    assert!(Arc::ptr_eq(&state, &same_name));
}

#[test]
fn same_value_edit_after_submit_still_demotes() {
    let submitted = transition(&seeded(&[1]), &AnswersEvent::SubmitSuccess).unwrap();

    let edited = transition(&submitted, &AnswersEvent::update_answer(0, 0, "")).unwrap();
    assert!(!Arc::ptr_eq(&submitted, &edited));
    assert_eq!(edited.status, Some(AnswersStatus::Edited));
    assert!(Arc::ptr_eq(&submitted.data, &edited.data));

    let pii = transition(&submitted, &AnswersEvent::update_pii(PiiField::Email, "")).unwrap();
    assert_eq!(pii.status, Some(AnswersStatus::Edited));
}
