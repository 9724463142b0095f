use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::admin::ConsentFilter;
use super::auth::{AuthError, CredentialVerifier};
use super::domain::{ConsentRecord, DraftConsent, ReferenceId};
use super::release::ReleaseForm;
use super::service::ConsentService;
use super::store::SubmissionStore;
use crate::error::AppError;

pub const ADMIN_IDENTIFIER_HEADER: &str = "x-admin-identifier";
pub const ADMIN_SECRET_HEADER: &str = "x-admin-secret";

/// Router builder exposing the public form and the admin listing.
pub fn consent_router<S, V>(service: Arc<ConsentService<S, V>>) -> Router
where
    S: SubmissionStore + 'static,
    V: CredentialVerifier + 'static,
{
    Router::new()
        .route("/api/v1/release-form", get(release_form_handler))
        .route("/api/v1/consents", post(submit_handler::<S, V>))
        .route("/api/v1/admin/login", post(login_handler::<S, V>))
        .route("/api/v1/admin/consents", get(list_handler::<S, V>))
        .route("/api/v1/admin/events", get(events_handler::<S, V>))
        .with_state(service)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub reference_id: ReferenceId,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub secret: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConsentListing {
    pub total: usize,
    pub matched: usize,
    pub records: Vec<ConsentRecord>,
}

pub(crate) async fn release_form_handler() -> Json<ReleaseForm> {
    Json(ReleaseForm::standard())
}

pub(crate) async fn submit_handler<S, V>(
    State(service): State<Arc<ConsentService<S, V>>>,
    payload: Result<Json<DraftConsent>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmissionReceipt>), AppError>
where
    S: SubmissionStore + 'static,
    V: CredentialVerifier + 'static,
{
    let Json(draft) = payload?;
    let mut form = service.form_for(draft);
    let reference_id = form.submit().await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmissionReceipt {
            reference_id,
            status: form.status().label().to_string(),
        }),
    ))
}

pub(crate) async fn login_handler<S, V>(
    State(service): State<Arc<ConsentService<S, V>>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError>
where
    S: SubmissionStore + 'static,
    V: CredentialVerifier + 'static,
{
    let Json(request) = payload?;
    service.login(&request.identifier, &request.secret).await?;
    Ok(Json(json!({ "authenticated": true })))
}

pub(crate) async fn list_handler<S, V>(
    State(service): State<Arc<ConsentService<S, V>>>,
    headers: HeaderMap,
    query: Result<Query<ConsentFilter>, QueryRejection>,
) -> Result<Json<ConsentListing>, AppError>
where
    S: SubmissionStore + 'static,
    V: CredentialVerifier + 'static,
{
    authorize(&service, &headers).await?;
    let Query(filter) = query?;

    let mut view = service.admin_view();
    view.load().await?;
    let records: Vec<ConsentRecord> = view.filter(&filter).into_iter().cloned().collect();

    Ok(Json(ConsentListing {
        total: view.records().len(),
        matched: records.len(),
        records,
    }))
}

pub(crate) async fn events_handler<S, V>(
    State(service): State<Arc<ConsentService<S, V>>>,
    headers: HeaderMap,
) -> Result<Json<Vec<String>>, AppError>
where
    S: SubmissionStore + 'static,
    V: CredentialVerifier + 'static,
{
    authorize(&service, &headers).await?;

    let mut view = service.admin_view();
    view.load().await?;
    Ok(Json(view.distinct_event_names().into_iter().collect()))
}

async fn authorize<S, V>(
    service: &ConsentService<S, V>,
    headers: &HeaderMap,
) -> Result<(), AppError>
where
    S: SubmissionStore + 'static,
    V: CredentialVerifier + 'static,
{
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };

    let (Some(identifier), Some(secret)) = (
        header(ADMIN_IDENTIFIER_HEADER),
        header(ADMIN_SECRET_HEADER),
    ) else {
        return Err(AuthError::InvalidCredentials.into());
    };

    service.login(&identifier, &secret).await?;
    Ok(())
}
