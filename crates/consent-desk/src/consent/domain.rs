use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier handed back to the person who signed, shaped `REF-<n>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReferenceId(pub String);

impl ReferenceId {
    pub const PREFIX: &'static str = "REF-";

    pub fn from_sequence(value: u64) -> Self {
        Self(format!("{}{value}", Self::PREFIX))
    }

    /// Numeric part of the identifier, if it carries one.
    pub fn sequence(&self) -> Option<u64> {
        self.0.strip_prefix(Self::PREFIX)?.parse().ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A recorded consent. Never mutated after the store creates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentRecord {
    pub id: ReferenceId,
    pub surname: String,
    pub other_names: String,
    pub po_box: String,
    pub town: String,
    pub telephone: String,
    pub email: String,
    pub id_number: String,
    pub event_name: String,
    pub event_location: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl ConsentRecord {
    pub fn from_new(id: ReferenceId, created_at: DateTime<Utc>, consent: NewConsent) -> Self {
        let NewConsent {
            surname,
            other_names,
            po_box,
            town,
            telephone,
            email,
            id_number,
            event_name,
            event_location,
            date,
        } = consent;

        Self {
            id,
            surname,
            other_names,
            po_box,
            town,
            telephone,
            email,
            id_number,
            event_name,
            event_location,
            date,
            created_at,
        }
    }

    /// Display name in "given names surname" order.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.other_names, self.surname)
    }
}

/// Validated draft contents handed to the store; the consent flag is not carried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewConsent {
    pub surname: String,
    pub other_names: String,
    pub po_box: String,
    pub town: String,
    pub telephone: String,
    pub email: String,
    pub id_number: String,
    pub event_name: String,
    pub event_location: String,
    pub date: NaiveDate,
}

/// In-progress form state. Every field is kept as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftConsent {
    pub surname: String,
    pub other_names: String,
    pub po_box: String,
    pub town: String,
    pub telephone: String,
    pub email: String,
    pub id_number: String,
    pub event_name: String,
    pub event_location: String,
    pub date: String,
    #[serde(deserialize_with = "deserialize_consent_flag")]
    pub consent: bool,
}

impl DraftConsent {
    /// Blank draft with the date pre-filled, as the form opens.
    pub fn starting_on(date: NaiveDate) -> Self {
        Self {
            date: date.format(DATE_FORMAT).to_string(),
            ..Self::default()
        }
    }

    pub fn text(&self, field: DraftField) -> Option<&str> {
        let value = match field {
            DraftField::Surname => &self.surname,
            DraftField::OtherNames => &self.other_names,
            DraftField::PoBox => &self.po_box,
            DraftField::Town => &self.town,
            DraftField::Telephone => &self.telephone,
            DraftField::Email => &self.email,
            DraftField::IdNumber => &self.id_number,
            DraftField::EventName => &self.event_name,
            DraftField::EventLocation => &self.event_location,
            DraftField::Date => &self.date,
            DraftField::Consent => return None,
        };
        Some(value.as_str())
    }
}

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a zero-padded `YYYY-MM-DD` date. `2024-7-5` is rejected.
pub(crate) fn parse_form_date(value: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(value, DATE_FORMAT).ok()?;
    (date.format(DATE_FORMAT).to_string() == value).then_some(date)
}

fn deserialize_consent_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(FieldValue::deserialize(deserializer)?.into_flag())
}

/// Fields of the consent form, in the order the form presents them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    Surname,
    OtherNames,
    PoBox,
    Town,
    Telephone,
    Email,
    IdNumber,
    EventName,
    EventLocation,
    Date,
    Consent,
}

impl DraftField {
    pub const ALL: [DraftField; 11] = [
        DraftField::Surname,
        DraftField::OtherNames,
        DraftField::PoBox,
        DraftField::Town,
        DraftField::Telephone,
        DraftField::Email,
        DraftField::IdNumber,
        DraftField::EventName,
        DraftField::EventLocation,
        DraftField::Date,
        DraftField::Consent,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DraftField::Surname => "Surname",
            DraftField::OtherNames => "Other Names",
            DraftField::PoBox => "P.O. Box",
            DraftField::Town => "Town",
            DraftField::Telephone => "Telephone",
            DraftField::Email => "Email",
            DraftField::IdNumber => "ID/Passport Number",
            DraftField::EventName => "Event Name",
            DraftField::EventLocation => "Event Location",
            DraftField::Date => "Date",
            DraftField::Consent => "Consent",
        }
    }
}

/// Value written into a draft field by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    /// Text counts as set for `true`, `on`, `yes` and `1`, ignoring case.
    pub fn into_flag(self) -> bool {
        match self {
            FieldValue::Flag(flag) => flag,
            FieldValue::Text(text) => matches!(
                text.trim().to_ascii_lowercase().as_str(),
                "true" | "on" | "yes" | "1"
            ),
        }
    }

    pub fn into_text(self) -> String {
        match self {
            FieldValue::Text(text) => text,
            FieldValue::Flag(flag) => flag.to_string(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}
