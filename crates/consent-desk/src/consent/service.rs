use std::sync::Arc;

use tracing::{info, warn};

use super::admin::AdminFilterView;
use super::auth::{AuthError, CredentialVerifier};
use super::domain::DraftConsent;
use super::form::FormController;
use super::store::SubmissionStore;

/// Composes the submission store and credential verifier behind the form and admin views.
pub struct ConsentService<S, V> {
    store: Arc<S>,
    verifier: Arc<V>,
}

impl<S, V> ConsentService<S, V>
where
    S: SubmissionStore + 'static,
    V: CredentialVerifier + 'static,
{
    pub fn new(store: Arc<S>, verifier: Arc<V>) -> Self {
        Self { store, verifier }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Fresh form session with today's date pre-filled.
    pub fn open_form(&self) -> FormController<S> {
        FormController::new(self.store.clone())
    }

    /// Form session resuming an existing draft.
    pub fn form_for(&self, draft: DraftConsent) -> FormController<S> {
        FormController::with_draft(self.store.clone(), draft)
    }

    pub fn admin_view(&self) -> AdminFilterView<S> {
        AdminFilterView::new(self.store.clone())
    }

    pub async fn login(&self, identifier: &str, secret: &str) -> Result<(), AuthError> {
        match self.verifier.authenticate(identifier, secret).await {
            Ok(true) => {
                info!("admin login accepted");
                Ok(())
            }
            Ok(false) => {
                warn!("admin login rejected");
                Err(AuthError::InvalidCredentials)
            }
            Err(err) => {
                warn!(error = %err, "admin login could not be verified");
                Err(err)
            }
        }
    }
}
