use chrono::NaiveDate;
use consent_desk::config::AppConfig;
use consent_desk::consent::{ConfiguredCredentials, ConsentService, InMemorySubmissionStore};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type DeskService = ConsentService<InMemorySubmissionStore, ConfiguredCredentials>;

/// Wires the configured store and admin credentials into the consent service.
pub(crate) fn build_service(config: &AppConfig) -> Arc<DeskService> {
    let store = Arc::new(InMemorySubmissionStore::from_config(&config.store));
    let verifier = Arc::new(ConfiguredCredentials::from_config(&config.admin));
    Arc::new(ConsentService::new(store, verifier))
}

/// Service over the sample records, used by the offline CLI commands.
pub(crate) fn sample_service() -> Arc<DeskService> {
    Arc::new(ConsentService::new(
        Arc::new(InMemorySubmissionStore::with_sample_records()),
        Arc::new(ConfiguredCredentials::default()),
    ))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    let value = raw.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .filter(|date| date.format("%Y-%m-%d").to_string() == value)
        .ok_or_else(|| format!("failed to parse '{raw}' as YYYY-MM-DD"))
}
