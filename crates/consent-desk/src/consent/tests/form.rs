use super::common::*;
use crate::consent::domain::{DraftConsent, DraftField};
use crate::consent::store::SubmissionStore;
use crate::consent::{
    AdminFilterView, FormController, FormStatus, InMemorySubmissionStore, SubmissionError,
};
use chrono::Local;
use std::sync::Arc;

#[tokio::test]
async fn new_form_starts_idle_and_dated_today() {
    let form = FormController::new(Arc::new(InMemorySubmissionStore::new()));
    assert_eq!(form.status(), &FormStatus::Idle);
    assert_eq!(
        form.draft().date,
        Local::now().date_naive().format("%Y-%m-%d").to_string()
    );
    assert!(form.errors().is_empty());
}

#[tokio::test]
async fn update_field_has_no_validation_side_effect() {
    let mut form = FormController::new(Arc::new(InMemorySubmissionStore::new()));
    form.update_field(DraftField::Email, "not-an-email");
    form.update_field(DraftField::Consent, true);

    assert!(form.errors().is_empty());
    assert_eq!(form.draft().email, "not-an-email");
    assert!(form.draft().consent);
    assert_eq!(form.status(), &FormStatus::Idle);
}

#[tokio::test]
async fn invalid_submission_never_reaches_the_store() {
    let store = Arc::new(InMemorySubmissionStore::new());
    let mut form = FormController::with_draft(store.clone(), DraftConsent::default());

    match form.submit().await {
        Err(SubmissionError::ValidationFailed(report)) => {
            assert!(report.message(DraftField::Surname).is_some());
        }
        other => panic!("expected validation failure, got {other:?}"),
    }

    assert!(store.is_empty().expect("store reachable"));
    assert_eq!(form.status(), &FormStatus::Idle);
    assert_eq!(form.errors().len(), 8);
}

#[tokio::test]
async fn successful_submission_is_terminal() {
    let store = Arc::new(InMemorySubmissionStore::new());
    let mut form = FormController::with_draft(store.clone(), valid_draft());

    let reference_id = form.submit().await.expect("valid draft submits");
    assert_eq!(
        form.status(),
        &FormStatus::Submitted {
            reference_id: reference_id.clone()
        }
    );
    assert_eq!(store.len().expect("store reachable"), 1);

    match form.submit().await {
        Err(SubmissionError::AlreadySubmitted { reference_id: again }) => {
            assert_eq!(again, reference_id)
        }
        other => panic!("expected terminal state, got {other:?}"),
    }
    assert_eq!(store.len().expect("store reachable"), 1);
}

#[tokio::test]
async fn store_failure_keeps_the_draft_for_retry() {
    let store = Arc::new(FlakyStore::failing(1, InMemorySubmissionStore::new()));
    let mut form = FormController::with_draft(store.clone(), valid_draft());

    match form.submit().await {
        Err(SubmissionError::SubmissionFailed(_)) => {}
        other => panic!("expected store failure, got {other:?}"),
    }
    assert_eq!(form.status(), &FormStatus::Failed);
    assert_eq!(form.draft(), &valid_draft());

    let reference_id = form.submit().await.expect("retry succeeds");
    assert_eq!(form.status().label(), "submitted");
    let records = store.inner.list_all().await.expect("list");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, reference_id);
    assert_eq!(records[0].surname, "Doe");
}

#[tokio::test]
async fn two_sessions_yield_distinct_ids_listed_newest_first() {
    let store = Arc::new(InMemorySubmissionStore::with_sample_records());

    let mut first = FormController::with_draft(store.clone(), valid_draft());
    let first_id = first.submit().await.expect("first submits");

    let mut second = FormController::with_draft(store.clone(), valid_draft());
    second.update_field(DraftField::OtherNames, "Jack");
    let second_id = second.submit().await.expect("second submits");

    assert_ne!(first_id, second_id);

    let mut view = AdminFilterView::new(store);
    let records = view.load().await.expect("listing loads");
    assert_eq!(records.len(), 4);
    assert_eq!(records[0].id, second_id);
    assert_eq!(records[1].id, first_id);
    assert!(records
        .windows(2)
        .all(|pair| pair[0].created_at >= pair[1].created_at));
}
