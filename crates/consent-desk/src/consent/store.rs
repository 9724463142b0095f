use async_trait::async_trait;

use super::domain::{ConsentRecord, NewConsent, ReferenceId};

/// Backing log of consent records. Implementations must accept any well-formed `NewConsent`.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Appends a record and returns its freshly assigned reference id.
    async fn create(&self, consent: NewConsent) -> Result<ReferenceId, StoreError>;

    /// Every stored record in insertion order.
    async fn list_all(&self) -> Result<Vec<ConsentRecord>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("submission store unavailable: {0}")]
    Unavailable(String),
    #[error("submission store rejected the request: {0}")]
    Rejected(String),
}
