use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use tracing::{info, warn};

use super::domain::{parse_form_date, ConsentRecord};
use super::store::{StoreError, SubmissionStore};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("could not load consent records: {0}")]
    Store(#[from] StoreError),
}

/// Search criteria for the admin listing. Blank criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConsentFilter {
    pub search: String,
    #[serde(deserialize_with = "deserialize_filter_date")]
    pub date: Option<NaiveDate>,
    pub event: String,
}

impl ConsentFilter {
    pub fn new(search: impl Into<String>, date: Option<NaiveDate>, event: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            date,
            event: event.into(),
        }
    }

    pub fn matches(&self, record: &ConsentRecord) -> bool {
        self.matches_search(record) && self.matches_date(record) && self.matches_event(record)
    }

    fn matches_search(&self, record: &ConsentRecord) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        record.full_name().to_lowercase().contains(&needle)
            || record.email.to_lowercase().contains(&needle)
    }

    fn matches_date(&self, record: &ConsentRecord) -> bool {
        self.date.map_or(true, |date| record.date == date)
    }

    fn matches_event(&self, record: &ConsentRecord) -> bool {
        self.event.is_empty()
            || record
                .event_name
                .to_lowercase()
                .contains(&self.event.to_lowercase())
    }
}

fn deserialize_filter_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_form_date(value).map(Some).ok_or_else(|| {
            serde::de::Error::custom(format!("failed to parse '{value}' as YYYY-MM-DD"))
        }),
    }
}

/// Admin-side snapshot of the consent log with client-side filtering.
pub struct AdminFilterView<S: ?Sized> {
    store: Arc<S>,
    records: Vec<ConsentRecord>,
    loaded: bool,
}

impl<S> AdminFilterView<S>
where
    S: SubmissionStore + ?Sized,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            records: Vec::new(),
            loaded: false,
        }
    }

    /// Fetches every record, newest first. Keeps the previous snapshot on failure.
    pub async fn load(&mut self) -> Result<&[ConsentRecord], FetchError> {
        let mut records = match self.store.list_all().await {
            Ok(records) => records,
            Err(err) => {
                warn!(error = %err, "consent listing unavailable");
                return Err(FetchError::Store(err));
            }
        };
        records.sort_by(|left, right| right.created_at.cmp(&left.created_at));

        info!(count = records.len(), "consent records loaded");
        self.records = records;
        self.loaded = true;
        Ok(&self.records)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn records(&self) -> &[ConsentRecord] {
        &self.records
    }

    pub fn filter(&self, filter: &ConsentFilter) -> Vec<&ConsentRecord> {
        self.records
            .iter()
            .filter(|record| filter.matches(record))
            .collect()
    }

    pub fn distinct_event_names(&self) -> BTreeSet<String> {
        self.records
            .iter()
            .map(|record| record.event_name.clone())
            .collect()
    }
}
