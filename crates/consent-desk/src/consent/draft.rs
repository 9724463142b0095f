//! Pure draft operations: the field reducer and validation rules.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::domain::{parse_form_date, DraftConsent, DraftField, FieldValue, NewConsent};

/// Returns a copy of `draft` with one field replaced. Never fails.
pub fn reduce(draft: &DraftConsent, field: DraftField, value: FieldValue) -> DraftConsent {
    let mut next = draft.clone();

    let slot = match field {
        DraftField::Consent => {
            next.consent = value.into_flag();
            return next;
        }
        DraftField::Surname => &mut next.surname,
        DraftField::OtherNames => &mut next.other_names,
        DraftField::PoBox => &mut next.po_box,
        DraftField::Town => &mut next.town,
        DraftField::Telephone => &mut next.telephone,
        DraftField::Email => &mut next.email,
        DraftField::IdNumber => &mut next.id_number,
        DraftField::EventName => &mut next.event_name,
        DraftField::EventLocation => &mut next.event_location,
        DraftField::Date => &mut next.date,
    };
    *slot = value.into_text();
    next
}

/// Field-scoped violations found in a draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationReport {
    errors: BTreeMap<DraftField, String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn message(&self, field: DraftField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = DraftField> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DraftField, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }

    fn reject(&mut self, field: DraftField, message: &str) {
        self.errors.insert(field, message.to_string());
    }
}

fn email_shape() -> &'static Regex {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    SHAPE.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"))
}

/// Loose `text@text.text` check used by the form.
pub fn looks_like_email(value: &str) -> bool {
    email_shape().is_match(value)
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    parse_form_date(value.trim())
}

/// Checks every rule and reports all violations at once.
pub fn validate(draft: &DraftConsent) -> ValidationReport {
    let mut report = ValidationReport::default();

    if is_blank(&draft.surname) {
        report.reject(DraftField::Surname, "Surname is required.");
    }
    if is_blank(&draft.other_names) {
        report.reject(DraftField::OtherNames, "Other names are required.");
    }
    if is_blank(&draft.email) {
        report.reject(DraftField::Email, "Email is required.");
    } else if !looks_like_email(&draft.email) {
        report.reject(DraftField::Email, "Email is invalid.");
    }
    if is_blank(&draft.telephone) {
        report.reject(DraftField::Telephone, "Telephone number is required.");
    }
    if is_blank(&draft.id_number) {
        report.reject(DraftField::IdNumber, "ID/Passport number is required.");
    }
    if is_blank(&draft.event_name) {
        report.reject(DraftField::EventName, "Event name is required.");
    }
    if is_blank(&draft.date) {
        report.reject(DraftField::Date, "Date is required.");
    } else if parse_date(&draft.date).is_none() {
        report.reject(DraftField::Date, "Date is invalid.");
    }
    if !draft.consent {
        report.reject(DraftField::Consent, "You must give your consent to proceed.");
    }

    report
}

/// Strips the consent flag and parses the date. `None` when the draft does not validate.
pub fn to_new_consent(draft: &DraftConsent) -> Option<NewConsent> {
    if !validate(draft).is_valid() {
        return None;
    }

    Some(NewConsent {
        surname: draft.surname.clone(),
        other_names: draft.other_names.clone(),
        po_box: draft.po_box.clone(),
        town: draft.town.clone(),
        telephone: draft.telephone.clone(),
        email: draft.email.clone(),
        id_number: draft.id_number.clone(),
        event_name: draft.event_name.clone(),
        event_location: draft.event_location.clone(),
        date: parse_date(&draft.date)?,
    })
}
