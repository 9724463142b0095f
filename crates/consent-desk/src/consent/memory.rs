use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use tracing::debug;

use super::domain::{ConsentRecord, NewConsent, ReferenceId};
use super::store::{StoreError, SubmissionStore};
use crate::config::StoreConfig;

/// Process-lifetime append log. Cloning shares the same log.
#[derive(Debug, Clone, Default)]
pub struct InMemorySubmissionStore {
    log: Arc<Mutex<Log>>,
    latency: Duration,
}

#[derive(Debug, Default)]
struct Log {
    records: Vec<ConsentRecord>,
    last_sequence: u64,
    last_created_at: Option<DateTime<Utc>>,
}

impl Log {
    fn append(
        &mut self,
        consent: NewConsent,
        now: DateTime<Utc>,
    ) -> Result<ReferenceId, StoreError> {
        let next = self.last_sequence.checked_add(1).ok_or_else(|| {
            StoreError::Rejected(format!(
                "reference sequence exhausted after {}",
                ReferenceId::from_sequence(self.last_sequence)
            ))
        })?;
        let sequence = (now.timestamp_millis().max(0) as u64).max(next);
        let created_at = match self.last_created_at {
            Some(last) if now <= last => last + chrono::Duration::microseconds(1),
            _ => now,
        };

        let id = ReferenceId::from_sequence(sequence);
        self.records
            .push(ConsentRecord::from_new(id.clone(), created_at, consent));
        self.last_sequence = sequence;
        self.last_created_at = Some(created_at);
        Ok(id)
    }

    fn seed(&mut self, record: ConsentRecord) {
        if let Some(sequence) = record.id.sequence() {
            self.last_sequence = self.last_sequence.max(sequence);
        }
        self.last_created_at = Some(match self.last_created_at {
            Some(last) => last.max(record.created_at),
            None => record.created_at,
        });
        self.records.push(record);
    }
}

impl InMemorySubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with the two demonstration records.
    pub fn with_sample_records() -> Self {
        Self::with_records(sample_records())
    }

    pub fn with_records(records: impl IntoIterator<Item = ConsentRecord>) -> Self {
        let mut log = Log::default();
        for record in records {
            log.seed(record);
        }

        Self {
            log: Arc::new(Mutex::new(log)),
            latency: Duration::ZERO,
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        let store = if config.seed_sample_data {
            Self::with_sample_records()
        } else {
            Self::new()
        };
        store.with_latency(config.latency)
    }

    /// Delays every call by `latency` to mimic a network round trip.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        self.locked().map(|log| log.records.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        self.len().map(|len| len == 0)
    }

    async fn round_trip(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn locked(&self) -> Result<std::sync::MutexGuard<'_, Log>, StoreError> {
        self.log
            .lock()
            .map_err(|_| StoreError::Unavailable("submission log lock poisoned".to_string()))
    }
}

#[async_trait]
impl SubmissionStore for InMemorySubmissionStore {
    async fn create(&self, consent: NewConsent) -> Result<ReferenceId, StoreError> {
        self.round_trip().await;
        let id = self.locked()?.append(consent, Utc::now())?;
        debug!(reference_id = %id, "consent appended to in-memory log");
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<ConsentRecord>, StoreError> {
        self.round_trip().await;
        Ok(self.locked()?.records.clone())
    }
}

fn sample_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn sample_instant(date: NaiveDate, hour: u32, minute: u32) -> DateTime<Utc> {
    date.and_hms_opt(hour, minute, 0)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .unwrap_or_default()
}

/// Demonstration records: John Doe at the Youth Summit and Jane Smith at the Tech Conference.
pub fn sample_records() -> Vec<ConsentRecord> {
    let summit_day = sample_date(2024, 7, 15);
    let conference_day = sample_date(2024, 7, 16);

    vec![
        ConsentRecord {
            id: ReferenceId("REF-1689345001".to_string()),
            surname: "Doe".to_string(),
            other_names: "John".to_string(),
            po_box: "12345".to_string(),
            town: "Nairobi".to_string(),
            telephone: "0712345678".to_string(),
            email: "john.doe@example.com".to_string(),
            id_number: "12345678".to_string(),
            event_name: "Youth Summit 2024".to_string(),
            event_location: "KICC".to_string(),
            date: summit_day,
            created_at: sample_instant(summit_day, 10, 30),
        },
        ConsentRecord {
            id: ReferenceId("REF-1689345002".to_string()),
            surname: "Smith".to_string(),
            other_names: "Jane".to_string(),
            po_box: "54321".to_string(),
            town: "Mombasa".to_string(),
            telephone: "0787654321".to_string(),
            email: "jane.smith@example.com".to_string(),
            id_number: "87654321".to_string(),
            event_name: "Tech Conference".to_string(),
            event_location: "Sarova Whitesands".to_string(),
            date: conference_day,
            created_at: sample_instant(conference_day, 11, 0),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_consent(surname: &str) -> NewConsent {
        NewConsent {
            surname: surname.to_string(),
            other_names: "Test".to_string(),
            po_box: String::new(),
            town: String::new(),
            telephone: "0700000000".to_string(),
            email: "test@example.com".to_string(),
            id_number: "1".to_string(),
            event_name: "Summit".to_string(),
            event_location: String::new(),
            date: sample_date(2024, 7, 15),
        }
    }

    #[tokio::test]
    async fn create_issues_increasing_ids_and_timestamps() {
        let store = InMemorySubmissionStore::with_sample_records();

        let first = store.create(new_consent("One")).await.expect("create");
        let second = store.create(new_consent("Two")).await.expect("create");

        assert!(first.as_str().starts_with(ReferenceId::PREFIX));
        assert!(second.sequence() > first.sequence());
        assert!(first.sequence() > Some(1689345002));

        let records = store.list_all().await.expect("list");
        assert_eq!(records.len(), 4);
        assert!(records[3].created_at > records[2].created_at);
        assert_eq!(records[2].id, first);
        assert_eq!(records[3].id, second);
    }

    #[test]
    fn append_never_reuses_a_sequence_within_one_millisecond() {
        let mut log = Log::default();
        let now = Utc::now();
        let first = log.append(new_consent("One"), now).expect("append");
        let second = log.append(new_consent("Two"), now).expect("append");

        assert_ne!(first, second);
        assert!(log.records[1].created_at > log.records[0].created_at);
    }

    #[test]
    fn clones_share_the_log() {
        let store = InMemorySubmissionStore::new();
        let clone = store.clone();
        clone
            .locked()
            .expect("lock")
            .append(new_consent("Shared"), Utc::now())
            .expect("append");
        assert_eq!(store.len().expect("len"), 1);
    }

    #[tokio::test]
    async fn exhausted_sequence_is_rejected_instead_of_wrapping() {
        let mut record = sample_records().remove(0);
        record.id = ReferenceId::from_sequence(u64::MAX);
        let store = InMemorySubmissionStore::with_records([record]);

        match store.create(new_consent("Overflow")).await {
            Err(StoreError::Rejected(_)) => {}
            other => panic!("expected rejection, got {other:?}"),
        }
        assert_eq!(store.len().expect("len"), 1);
    }

    #[test]
    fn poisoned_log_reports_unavailable() {
        let store = InMemorySubmissionStore::with_sample_records();
        let shared = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = shared.log.lock().expect("lock");
            panic!("poison the log");
        })
        .join();

        assert!(matches!(store.len(), Err(StoreError::Unavailable(_))));
        assert!(matches!(store.is_empty(), Err(StoreError::Unavailable(_))));
    }
}
