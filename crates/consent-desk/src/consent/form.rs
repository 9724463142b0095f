use std::sync::Arc;

use chrono::Local;
use serde::Serialize;
use tracing::{info, warn};

use super::domain::{DraftConsent, DraftField, FieldValue, ReferenceId};
use super::draft::{self, ValidationReport};
use super::store::{StoreError, SubmissionStore};

/// Where a form session is in its submission lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FormStatus {
    Idle,
    Submitting,
    Submitted { reference_id: ReferenceId },
    Failed,
}

impl FormStatus {
    pub fn label(&self) -> &'static str {
        match self {
            FormStatus::Idle => "idle",
            FormStatus::Submitting => "submitting",
            FormStatus::Submitted { .. } => "submitted",
            FormStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("{} field(s) failed validation", .0.len())]
    ValidationFailed(ValidationReport),
    #[error("submission failed: {0}")]
    SubmissionFailed(#[from] StoreError),
    #[error("draft already submitted as {reference_id}")]
    AlreadySubmitted { reference_id: ReferenceId },
}

/// Owns one draft for the duration of a form session.
pub struct FormController<S: ?Sized> {
    store: Arc<S>,
    draft: DraftConsent,
    errors: ValidationReport,
    status: FormStatus,
}

impl<S> FormController<S>
where
    S: SubmissionStore + ?Sized,
{
    /// Opens a blank form dated today.
    pub fn new(store: Arc<S>) -> Self {
        Self::with_draft(store, DraftConsent::starting_on(Local::now().date_naive()))
    }

    pub fn with_draft(store: Arc<S>, draft: DraftConsent) -> Self {
        Self {
            store,
            draft,
            errors: ValidationReport::default(),
            status: FormStatus::Idle,
        }
    }

    pub fn draft(&self) -> &DraftConsent {
        &self.draft
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    /// Violations found by the most recent submit attempt.
    pub fn errors(&self) -> &ValidationReport {
        &self.errors
    }

    pub fn update_field(&mut self, field: DraftField, value: impl Into<FieldValue>) {
        self.draft = draft::reduce(&self.draft, field, value.into());
    }

    pub fn validate(&self) -> ValidationReport {
        draft::validate(&self.draft)
    }

    pub async fn submit(&mut self) -> Result<ReferenceId, SubmissionError> {
        if let FormStatus::Submitted { reference_id } = &self.status {
            return Err(SubmissionError::AlreadySubmitted {
                reference_id: reference_id.clone(),
            });
        }

        let report = self.validate();
        self.errors = report.clone();
        let Some(consent) = draft::to_new_consent(&self.draft) else {
            info!(
                fields = ?report.fields().collect::<Vec<_>>(),
                "consent draft rejected by validation"
            );
            return Err(SubmissionError::ValidationFailed(report));
        };

        self.status = FormStatus::Submitting;
        match self.store.create(consent).await {
            Ok(reference_id) => {
                info!(reference_id = %reference_id, "consent recorded");
                self.status = FormStatus::Submitted {
                    reference_id: reference_id.clone(),
                };
                Ok(reference_id)
            }
            Err(err) => {
                warn!(error = %err, "consent submission failed; draft kept for retry");
                self.status = FormStatus::Failed;
                Err(SubmissionError::SubmissionFailed(err))
            }
        }
    }
}
