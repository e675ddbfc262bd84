#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Voter record, header metadata and output column types.
//!
//! Every page of an electoral roll yields one [`HeaderInfo`] and any number
//! of [`VoterRecord`] values. Records share their page's header through an
//! [`Arc`], and serialize in the fixed [`Column::ALL`] order so CSV and JSON
//! consumers always see the same layout.

use std::borrow::Cow;
use std::sync::Arc;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use strum_macros::{AsRefStr, Display, EnumString, IntoStaticStr};

/// Prefix of the sentinel stored for a header field that was not found.
pub const UNKNOWN_PREFIX: &str = "UNKNOWN-";

/// Gender as printed on the roll, normalized to a single letter.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Gender {
    /// Printed as `पु` or `पुरुष`.
    #[serde(rename = "M")]
    #[strum(serialize = "M")]
    Male,
    /// Printed as `म`, `स्त्री` or `फ`.
    #[serde(rename = "F")]
    #[strum(serialize = "F")]
    Female,
}

impl Gender {
    /// Every marker token the roll uses, longest first so that alternations
    /// built from this list prefer `पुरुष` over its prefix `पु`.
    pub const MARKERS: &[&str] = &["स्त्री", "पुरुष", "पु", "म", "फ"];

    /// Maps a printed gender marker to a [`Gender`].
    ///
    /// Returns `None` for anything outside [`Self::MARKERS`].
    #[must_use]
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker.trim() {
            "पु" | "पुरुष" => Some(Self::Male),
            "म" | "स्त्री" | "फ" => Some(Self::Female),
            _ => None,
        }
    }
}

/// The eight page-header fields carried on every record.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum HeaderField {
    District,
    BodyNumber,
    Ward,
    PollingCenter,
    PartNumber,
    RoomNumber,
    SectionNumber,
    Locality,
}

impl HeaderField {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::District,
            Self::BodyNumber,
            Self::Ward,
            Self::PollingCenter,
            Self::PartNumber,
            Self::RoomNumber,
            Self::SectionNumber,
            Self::Locality,
        ]
    }

    /// The `UNKNOWN-<key>` value stored when this field is missing.
    #[must_use]
    pub fn unknown_sentinel(self) -> String {
        format!("{UNKNOWN_PREFIX}{self}")
    }
}

/// Polling-station metadata pulled from one page's header.
///
/// Every field is always populated: missing values hold
/// [`HeaderField::unknown_sentinel`] so output columns can tell "not found"
/// apart from "found but blank".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderInfo {
    pub district: String,
    pub body_number: String,
    pub ward: String,
    pub polling_center: String,
    pub part_number: String,
    pub room_number: String,
    pub section_number: String,
    pub locality: String,
}

impl HeaderInfo {
    /// Builds a header by asking `lookup` for each field in turn.
    ///
    /// `None` and blank answers become the field's sentinel.
    #[must_use]
    pub fn from_lookup(mut lookup: impl FnMut(HeaderField) -> Option<String>) -> Self {
        let mut value = |field: HeaderField| {
            lookup(field)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| field.unknown_sentinel())
        };

        Self {
            district: value(HeaderField::District),
            body_number: value(HeaderField::BodyNumber),
            ward: value(HeaderField::Ward),
            polling_center: value(HeaderField::PollingCenter),
            part_number: value(HeaderField::PartNumber),
            room_number: value(HeaderField::RoomNumber),
            section_number: value(HeaderField::SectionNumber),
            locality: value(HeaderField::Locality),
        }
    }

    /// A header where every field holds its sentinel.
    #[must_use]
    pub fn unknown() -> Self {
        Self::from_lookup(|_| None)
    }

    /// Returns the value stored for `field`.
    #[must_use]
    pub fn get(&self, field: HeaderField) -> &str {
        match field {
            HeaderField::District => &self.district,
            HeaderField::BodyNumber => &self.body_number,
            HeaderField::Ward => &self.ward,
            HeaderField::PollingCenter => &self.polling_center,
            HeaderField::PartNumber => &self.part_number,
            HeaderField::RoomNumber => &self.room_number,
            HeaderField::SectionNumber => &self.section_number,
            HeaderField::Locality => &self.locality,
        }
    }

    /// Whether `field` was actually found on the page.
    #[must_use]
    pub fn is_known(&self, field: HeaderField) -> bool {
        self.get(field) != field.unknown_sentinel()
    }
}

impl Default for HeaderInfo {
    fn default() -> Self {
        Self::unknown()
    }
}

/// Output columns, in the order consumers expect them.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Column {
    Age,
    BodyNumber,
    District,
    FatherOrHusbandName,
    FatherOrHusbandNameHindi,
    FatherOrHusbandNameLower,
    Gender,
    HouseNo,
    Locality,
    PartNumber,
    PollingCenter,
    RoomNumber,
    SectionNumber,
    SrNo,
    VoterName,
    VoterNameHindi,
    VoterNameLower,
    Ward,
    SourceFile,
    Tag,
}

impl Column {
    /// Every column in serialization order.
    pub const ALL: &[Self] = &[
        Self::Age,
        Self::BodyNumber,
        Self::District,
        Self::FatherOrHusbandName,
        Self::FatherOrHusbandNameHindi,
        Self::FatherOrHusbandNameLower,
        Self::Gender,
        Self::HouseNo,
        Self::Locality,
        Self::PartNumber,
        Self::PollingCenter,
        Self::RoomNumber,
        Self::SectionNumber,
        Self::SrNo,
        Self::VoterName,
        Self::VoterNameHindi,
        Self::VoterNameLower,
        Self::Ward,
        Self::SourceFile,
        Self::Tag,
    ];

    /// The column's header name (e.g. `"fatherOrHusbandNameHindi"`).
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// Identity of a record within one source document.
///
/// Serial numbers restart across sections, so the serial alone is not
/// unique; the lowercase Latin voter name disambiguates.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DedupKey {
    pub sr_no: String,
    pub voter_name_lower: String,
}

/// One voter entry extracted from an electoral roll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoterRecord {
    /// Serial number as printed on the roll (never renumbered).
    pub sr_no: String,
    /// House number or short address token; empty when not printed.
    pub house_no: String,
    pub voter_name_hindi: String,
    /// Title-cased Latin transliteration of [`Self::voter_name_hindi`].
    pub voter_name: String,
    pub voter_name_lower: String,
    pub father_or_husband_name_hindi: String,
    pub father_or_husband_name: String,
    pub father_or_husband_name_lower: String,
    pub gender: Gender,
    pub age: u8,
    /// Header of the page the record was printed on.
    pub header: Arc<HeaderInfo>,
    pub source_file: String,
    /// Constant tag configured for the whole run.
    pub tag: String,
}

impl VoterRecord {
    /// Returns this record's deduplication key.
    #[must_use]
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey {
            sr_no: self.sr_no.clone(),
            voter_name_lower: self.voter_name_lower.clone(),
        }
    }

    /// Returns the value of `column` as text.
    #[must_use]
    pub fn field(&self, column: Column) -> Cow<'_, str> {
        match column {
            Column::Age => Cow::Owned(self.age.to_string()),
            Column::BodyNumber => Cow::Borrowed(&self.header.body_number),
            Column::District => Cow::Borrowed(&self.header.district),
            Column::FatherOrHusbandName => Cow::Borrowed(&self.father_or_husband_name),
            Column::FatherOrHusbandNameHindi => Cow::Borrowed(&self.father_or_husband_name_hindi),
            Column::FatherOrHusbandNameLower => Cow::Borrowed(&self.father_or_husband_name_lower),
            Column::Gender => Cow::Borrowed(self.gender.as_ref()),
            Column::HouseNo => Cow::Borrowed(&self.house_no),
            Column::Locality => Cow::Borrowed(&self.header.locality),
            Column::PartNumber => Cow::Borrowed(&self.header.part_number),
            Column::PollingCenter => Cow::Borrowed(&self.header.polling_center),
            Column::RoomNumber => Cow::Borrowed(&self.header.room_number),
            Column::SectionNumber => Cow::Borrowed(&self.header.section_number),
            Column::SrNo => Cow::Borrowed(&self.sr_no),
            Column::VoterName => Cow::Borrowed(&self.voter_name),
            Column::VoterNameHindi => Cow::Borrowed(&self.voter_name_hindi),
            Column::VoterNameLower => Cow::Borrowed(&self.voter_name_lower),
            Column::Ward => Cow::Borrowed(&self.header.ward),
            Column::SourceFile => Cow::Borrowed(&self.source_file),
            Column::Tag => Cow::Borrowed(&self.tag),
        }
    }

    /// All column values in [`Column::ALL`] order.
    #[must_use]
    pub fn row(&self) -> Vec<Cow<'_, str>> {
        Column::ALL.iter().map(|&c| self.field(c)).collect()
    }
}

impl Serialize for VoterRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("VoterRecord", Column::ALL.len())?;
        for &column in Column::ALL {
            match column {
                Column::Age => state.serialize_field(column.name(), &self.age)?,
                Column::Gender => state.serialize_field(column.name(), &self.gender)?,
                _ => state.serialize_field(column.name(), &*self.field(column))?,
            }
        }
        state.end()
    }
}
