//! Core record types for contactbook.
//!
//! This module defines the contact record, its stable identifier, the
//! in-progress draft edited by the form, and the field names used to address
//! individual fields.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

/// Stable identifier of a record.
///
/// Records are addressed by id rather than by their position in the list, so
/// a position taken from a filtered listing can't land on the wrong record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for RecordId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// One of the three user-editable record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Given name.
    FirstName,
    /// Family name.
    LastName,
    /// Phone number, free-form.
    Phone,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Field; 3] = [Field::FirstName, Field::LastName, Field::Phone];

    /// The persisted (camelCase) name of the field.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Phone => "phone",
        }
    }

    /// Human-readable label used by the form.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::Phone => "Phone No",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "firstName" | "first_name" => Ok(Self::FirstName),
            "lastName" | "last_name" => Ok(Self::LastName),
            "phone" => Ok(Self::Phone),
            other => Err(Error::UnknownField(other.to_string())),
        }
    }
}

/// A stored contact record.
///
/// Serialized with the camelCase field names of the persisted slot layout.
/// Entries written without an `id` get a fresh one when loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Stable identifier.
    #[serde(default)]
    pub id: RecordId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Phone number.
    pub phone: String,
}

impl Record {
    /// Create a record with a freshly generated id.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id: RecordId::new(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: phone.into(),
        }
    }

    /// Build a record from a completed draft under the given id.
    #[must_use]
    pub fn from_draft(id: RecordId, draft: Draft) -> Self {
        Self {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            phone: draft.phone,
        }
    }

    /// Copy the editable fields into a draft.
    #[must_use]
    pub fn to_draft(&self) -> Draft {
        Draft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone: self.phone.clone(),
        }
    }

    /// Compare the editable fields, ignoring the id.
    #[must_use]
    pub fn same_fields(&self, other: &Record) -> bool {
        self.first_name == other.first_name
            && self.last_name == other.last_name
            && self.phone == other.phone
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} - {}", self.first_name, self.last_name, self.phone)
    }
}

/// The in-progress record held by the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Phone number.
    pub phone: String,
}

impl Draft {
    /// The empty draft the form starts from and resets to.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a draft from the three field values.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: phone.into(),
        }
    }

    /// Read one field.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Phone => &self.phone,
        }
    }

    /// Overwrite one field.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Phone => &mut self.phone,
        };
        *slot = value.into();
    }

    /// Fields that fail the presence check, in form order.
    ///
    /// A blank string is missing. The phone field also treats `"0"` as
    /// missing, matching the falsy zero of a numeric input.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| {
                let value = self.get(*field);
                value.is_empty() || (*field == Field::Phone && value == "0")
            })
            .collect()
    }

    /// Whether every field passes the presence check.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Whether every field is blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first_name.is_empty() && self.last_name.is_empty() && self.phone.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serializes_camel_case() {
        let record = Record::new("Ann", "Lee", "555");
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["firstName"], "Ann");
        assert_eq!(json["lastName"], "Lee");
        assert_eq!(json["phone"], "555");
        assert_eq!(json["id"], record.id.to_string());
    }

    #[test]
    fn test_record_without_id_gets_one() {
        let json = r#"{"firstName":"Ann","lastName":"Lee","phone":"555"}"#;
        let a: Record = serde_json::from_str(json).unwrap();
        let b: Record = serde_json::from_str(json).unwrap();

        assert_eq!(a.first_name, "Ann");
        assert_ne!(a.id, b.id);
        assert!(a.same_fields(&b));
    }

    #[test]
    fn test_record_id_parse() {
        let id = RecordId::new();
        let parsed: RecordId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
        assert!("not-a-uuid".parse::<RecordId>().is_err());
    }

    #[test]
    fn test_record_display() {
        let record = Record::new("Ann", "Lee", "555");
        assert_eq!(record.to_string(), "Ann Lee - 555");
    }

    #[test]
    fn test_field_parse() {
        assert_eq!("firstName".parse::<Field>().unwrap(), Field::FirstName);
        assert_eq!("last_name".parse::<Field>().unwrap(), Field::LastName);
        assert_eq!("phone".parse::<Field>().unwrap(), Field::Phone);
        assert!(matches!(
            "email".parse::<Field>(),
            Err(Error::UnknownField(name)) if name == "email"
        ));
    }

    #[test]
    fn test_empty_draft() {
        let draft = Draft::empty();
        assert!(draft.is_empty());
        assert_eq!(draft.missing_fields(), Field::ALL.to_vec());
    }

    #[test]
    fn test_draft_set_and_get() {
        let mut draft = Draft::empty();
        draft.set(Field::LastName, "Ng");
        assert_eq!(draft.get(Field::LastName), "Ng");
        assert_eq!(draft.get(Field::FirstName), "");
    }

    #[test]
    fn test_missing_phone() {
        let draft = Draft::new("Ann", "Lee", "");
        assert_eq!(draft.missing_fields(), vec![Field::Phone]);
        assert!(!draft.is_complete());
    }

    #[test]
    fn test_zero_phone_is_missing() {
        let draft = Draft::new("Ann", "Lee", "0");
        assert_eq!(draft.missing_fields(), vec![Field::Phone]);

        // Only the bare zero is falsy.
        assert!(Draft::new("Ann", "Lee", "00").is_complete());
        assert!(Draft::new("Ann", "Lee", "000").is_complete());
    }

    #[test]
    fn test_zero_name_is_present() {
        assert!(Draft::new("0", "0", "1").is_complete());
    }

    #[test]
    fn test_draft_round_trip_through_record() {
        let draft = Draft::new("Bo", "Ng", "000");
        let id = RecordId::new();
        let record = Record::from_draft(id, draft.clone());

        assert_eq!(record.id, id);
        assert_eq!(record.to_draft(), draft);
    }
}
