//! Patient record model.
//!
//! A [`Patient`] is an immutable value: the raw identity attributes are never
//! mutated after construction, and the normalized view is computed once and
//! cached behind a [`OnceLock`].

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::matching::normalize::normalize;

/// The identity fields carried by every patient record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    FirstName,
    LastName,
    Dob,
    Sex,
    PhoneNumber,
    Address,
    City,
    Zipcode,
}

impl Field {
    /// All fields in canonical scoring order.
    pub const ALL: [Self; 8] = [
        Self::FirstName,
        Self::LastName,
        Self::Dob,
        Self::Sex,
        Self::PhoneNumber,
        Self::Address,
        Self::City,
        Self::Zipcode,
    ];

    /// Get the field name as a string.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Dob => "dob",
            Self::Sex => "sex",
            Self::PhoneNumber => "phone_number",
            Self::Address => "address",
            Self::City => "city",
            Self::Zipcode => "zipcode",
        }
    }

    /// Parse a field from its string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "first_name" => Some(Self::FirstName),
            "last_name" => Some(Self::LastName),
            "dob" => Some(Self::Dob),
            "sex" => Some(Self::Sex),
            "phone_number" | "phone" => Some(Self::PhoneNumber),
            "address" => Some(Self::Address),
            "city" => Some(Self::City),
            "zipcode" | "zip" => Some(Self::Zipcode),
            _ => None,
        }
    }

    /// The normalization rule intrinsic to this field.
    ///
    /// Unlike the *declared* kind (configuration, consumed by the similarity
    /// dispatcher fallback), the normalization rule is fixed by what the field
    /// semantically is: a date of birth is normalized as a date no matter how
    /// a deployment declares it for comparison purposes.
    #[must_use]
    pub const fn normalization_kind(self) -> FieldKind {
        match self {
            Self::Dob => FieldKind::Date,
            Self::PhoneNumber => FieldKind::Phone,
            Self::Address => FieldKind::Address,
            _ => FieldKind::General,
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Semantic kind of a field, driving normalization and fallback comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Dates in `DD-MMM-YYYY` form are rewritten to `YYYY-MM-DD`.
    Date,
    /// Digits only.
    Phone,
    /// Base-address extraction plus abbreviation standardization.
    Address,
    /// Person-name text; compared with Jaro-Winkler family metrics.
    Name,
    /// Equal-or-nothing comparison.
    Exact,
    /// Free text.
    General,
}

/// A patient record from one source system.
///
/// Attributes are semantic strings; an empty string means the value is
/// absent. The normalized view is derived lazily and exactly once per record
/// via [`Patient::normalized`]; nothing else is ever cached or mutated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Patient {
    /// Source-local identifier.
    pub patient_id: String,
    pub first_name: String,
    pub last_name: String,
    /// Date of birth, ideally `YYYY-MM-DD` or `DD-MMM-YYYY`.
    pub dob: String,
    pub sex: String,
    pub phone_number: String,
    pub address: String,
    pub city: String,
    pub zipcode: String,
    #[serde(skip)]
    normalized: OnceLock<NormalizedValues>,
}

impl Patient {
    /// Create an empty record with the given source-local identifier.
    #[must_use]
    pub fn new(patient_id: impl Into<String>) -> Self {
        Self {
            patient_id: patient_id.into(),
            ..Self::default()
        }
    }

    /// Raw value of a field.
    #[must_use]
    pub fn raw(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Dob => &self.dob,
            Field::Sex => &self.sex,
            Field::PhoneNumber => &self.phone_number,
            Field::Address => &self.address,
            Field::City => &self.city,
            Field::Zipcode => &self.zipcode,
        }
    }

    /// The normalized view of this record, computed on first access.
    pub fn normalized(&self) -> &NormalizedValues {
        self.normalized
            .get_or_init(|| NormalizedValues::compute(self))
    }
}

// The cache is derived state; equality is over identity and raw attributes.
impl PartialEq for Patient {
    fn eq(&self, other: &Self) -> bool {
        self.patient_id == other.patient_id
            && Field::ALL.iter().all(|&f| self.raw(f) == other.raw(f))
    }
}

impl Eq for Patient {}

/// Normalized field values for one record, one entry per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizedValues {
    first_name: String,
    last_name: String,
    dob: String,
    sex: String,
    phone_number: String,
    address: String,
    city: String,
    zipcode: String,
}

impl NormalizedValues {
    fn compute(patient: &Patient) -> Self {
        let norm = |field: Field| normalize(patient.raw(field), field.normalization_kind());
        Self {
            first_name: norm(Field::FirstName),
            last_name: norm(Field::LastName),
            dob: norm(Field::Dob),
            sex: norm(Field::Sex),
            phone_number: norm(Field::PhoneNumber),
            address: norm(Field::Address),
            city: norm(Field::City),
            zipcode: norm(Field::Zipcode),
        }
    }

    /// Normalized value of a field.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Dob => &self.dob,
            Field::Sex => &self.sex,
            Field::PhoneNumber => &self.phone_number,
            Field::Address => &self.address,
            Field::City => &self.city,
            Field::Zipcode => &self.zipcode,
        }
    }
}
