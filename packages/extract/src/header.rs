//! Polling-station metadata from page header text.
//!
//! Each [`HeaderField`] has its own keyword-anchored pattern, so a field
//! that is missing or garbled never affects the others.  Several fields
//! usually share one printed line; a captured value is cut at the first
//! word that is itself a header keyword.

use std::sync::LazyLock;

use regex::Regex;
use voter_roll_record_models::{HeaderField, HeaderInfo};

use crate::devanagari::{DIGIT, LETTER};

/// Every keyword that opens a header field.
const KEYWORDS: &[&str] = &[
    "जिला",
    "ज़िला",
    "\u{095B}िला",
    "जनपद",
    "निकाय",
    "वार्ड",
    "मतदान",
    "केंद्र",
    "केन्द्र",
    "भाग",
    "कक्ष",
    "अनुभाग",
    "मोहल्ला",
    "मोहल्ले",
    "क्षेत्र",
    "ग्राम",
];

/// Optional number qualifier after a keyword (`संख्या`, `सं०`, `नं०`).
const QUALIFIER: &str = r"(?:[ \t]+(?:संख्या|सं०|सं\.|नं०|नं\.|क्रमांक))?";

/// Separator between keyword and value: spaces and an optional colon.
const SEPARATOR: &str = r"[ \t]*[:\-]?[ \t]*";

fn words() -> String {
    format!(r"{LETTER}+(?:[ \t]+{LETTER}+)*")
}

fn digits() -> String {
    format!(r"{DIGIT}+")
}

/// `3-बाबू कृष्ण नगर`: a number, a hyphen and a name.
fn numbered() -> String {
    format!(r"{DIGIT}+[ \t]*-[ \t]*{}", words())
}

fn field_regex(keyword: &str, value: &str) -> Regex {
    Regex::new(&format!(
        r"\b{keyword}{QUALIFIER}{SEPARATOR}(?P<value>{value})"
    ))
    .expect("valid regex")
}

static DISTRICT_RE: LazyLock<Regex> = LazyLock::new(|| {
    field_regex(
        "(?:जिला|ज़िला|\u{095B}िला|जनपद)",
        &format!("{}|{}", numbered(), words()),
    )
});

static BODY_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    field_regex(
        "(?:नगर[ \t]+)?निकाय",
        &format!("{}|{}", numbered(), digits()),
    )
});

static WARD_RE: LazyLock<Regex> =
    LazyLock::new(|| field_regex("वार्ड", &format!("{}|{}", numbered(), digits())));

static POLLING_CENTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    field_regex(
        "(?:मतदान[ \t]+)?(?:केंद्र|केन्द्र)(?:[ \t]+का[ \t]+नाम)?",
        &format!("{}|{}", numbered(), words()),
    )
});

static PART_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| field_regex("भाग", &digits()));

static ROOM_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| field_regex("कक्ष", &digits()));

static SECTION_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| field_regex("अनुभाग", &format!("{}|{}", numbered(), digits())));

static LOCALITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    field_regex(
        "(?:मोहल्ला|मोहल्ले[ \t]+का[ \t]+नाम|क्षेत्र|ग्राम)",
        &format!("{}|{}", numbered(), words()),
    )
});

fn field_pattern(field: HeaderField) -> &'static Regex {
    match field {
        HeaderField::District => &*DISTRICT_RE,
        HeaderField::BodyNumber => &*BODY_NUMBER_RE,
        HeaderField::Ward => &*WARD_RE,
        HeaderField::PollingCenter => &*POLLING_CENTER_RE,
        HeaderField::PartNumber => &*PART_NUMBER_RE,
        HeaderField::RoomNumber => &*ROOM_NUMBER_RE,
        HeaderField::SectionNumber => &*SECTION_NUMBER_RE,
        HeaderField::Locality => &*LOCALITY_RE,
    }
}

/// Extracts the header metadata from a page's (repaired) text.
///
/// Each field takes the first match on the page.  Fields that never match
/// hold their `UNKNOWN-<key>` sentinel.
#[must_use]
pub fn extract_header(page_text: &str) -> HeaderInfo {
    let header = HeaderInfo::from_lookup(|field| find_field(page_text, field));

    let found = HeaderField::all()
        .iter()
        .filter(|&&f| header.is_known(f))
        .count();
    log::debug!(
        "Header extraction found {found}/{} fields",
        HeaderField::all().len()
    );

    header
}

/// Returns the first value for `field` in `text`, if any.
#[must_use]
pub fn find_field(text: &str, field: HeaderField) -> Option<String> {
    let caps = field_pattern(field).captures(text)?;
    let value = truncate_at_keyword(caps.name("value")?.as_str());
    if value.is_empty() { None } else { Some(value) }
}

/// Cuts `value` before the first word that is a header keyword.
fn truncate_at_keyword(value: &str) -> String {
    value
        .split_whitespace()
        .take_while(|word| !KEYWORDS.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}
