//! Model release consent collection.
//!
//! A form session (`FormController`) owns a draft, validates it and submits it to a
//! `SubmissionStore`. The admin side (`AdminFilterView`) loads the whole log once and
//! narrows it with independent search, date and event predicates.

pub mod admin;
pub mod auth;
pub mod domain;
pub mod draft;
pub mod form;
pub mod memory;
pub mod release;
pub mod router;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use admin::{AdminFilterView, ConsentFilter, FetchError};
pub use auth::{AuthError, ConfiguredCredentials, CredentialVerifier};
pub use domain::{ConsentRecord, DraftConsent, DraftField, FieldValue, NewConsent, ReferenceId};
pub use draft::{reduce, validate, ValidationReport};
pub use form::{FormController, FormStatus, SubmissionError};
pub use memory::{sample_records, InMemorySubmissionStore};
pub use release::ReleaseForm;
pub use router::consent_router;
pub use service::ConsentService;
pub use store::{StoreError, SubmissionStore};
