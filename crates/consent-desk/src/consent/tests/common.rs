use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::consent::domain::{ConsentRecord, DraftConsent, NewConsent, ReferenceId};
use crate::consent::store::{StoreError, SubmissionStore};
use crate::consent::{ConfiguredCredentials, ConsentService, InMemorySubmissionStore};

pub(super) const ADMIN_IDENTIFIER: &str = "admin@events.example";
pub(super) const ADMIN_SECRET: &str = "correct horse battery staple";

pub(super) fn valid_draft() -> DraftConsent {
    DraftConsent {
        surname: "Doe".to_string(),
        other_names: "John".to_string(),
        po_box: "12345".to_string(),
        town: "Nairobi".to_string(),
        telephone: "0712345678".to_string(),
        email: "john@x.com".to_string(),
        id_number: "123".to_string(),
        event_name: "Summit".to_string(),
        event_location: "KICC".to_string(),
        date: "2024-07-15".to_string(),
        consent: true,
    }
}

pub(super) fn credentials() -> ConfiguredCredentials {
    ConfiguredCredentials::new(ADMIN_IDENTIFIER, ADMIN_SECRET)
}

pub(super) fn build_service() -> (
    Arc<ConsentService<InMemorySubmissionStore, ConfiguredCredentials>>,
    Arc<InMemorySubmissionStore>,
) {
    let store = Arc::new(InMemorySubmissionStore::with_sample_records());
    let service = Arc::new(ConsentService::new(store.clone(), Arc::new(credentials())));
    (service, store)
}

/// Store whose every call fails.
#[derive(Debug, Default)]
pub(super) struct UnavailableStore;

#[async_trait]
impl SubmissionStore for UnavailableStore {
    async fn create(&self, _consent: NewConsent) -> Result<ReferenceId, StoreError> {
        Err(StoreError::Unavailable("offline".to_string()))
    }

    async fn list_all(&self) -> Result<Vec<ConsentRecord>, StoreError> {
        Err(StoreError::Unavailable("offline".to_string()))
    }
}

/// Fails the first `failures` calls, then delegates to an in-memory store.
#[derive(Debug)]
pub(super) struct FlakyStore {
    pub(super) inner: InMemorySubmissionStore,
    failures: AtomicUsize,
}

impl FlakyStore {
    pub(super) fn failing(times: usize, inner: InMemorySubmissionStore) -> Self {
        Self {
            inner,
            failures: AtomicUsize::new(times),
        }
    }

    pub(super) fn fail_next(&self, times: usize) {
        self.failures.store(times, Ordering::SeqCst);
    }

    fn trip(&self) -> Result<(), StoreError> {
        let remaining = self.failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures.store(remaining - 1, Ordering::SeqCst);
            return Err(StoreError::Unavailable("connection reset".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl SubmissionStore for FlakyStore {
    async fn create(&self, consent: NewConsent) -> Result<ReferenceId, StoreError> {
        self.trip()?;
        self.inner.create(consent).await
    }

    async fn list_all(&self) -> Result<Vec<ConsentRecord>, StoreError> {
        self.trip()?;
        self.inner.list_all().await
    }
}

pub(super) async fn response_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}
