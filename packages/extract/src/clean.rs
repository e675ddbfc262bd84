//! Name cleaning and record validation.

use std::collections::BTreeSet;

use voter_roll_record_models::{Column, VoterRecord};

use crate::devanagari::{collapse_whitespace, is_devanagari, is_devanagari_digit};
use crate::tables::Limits;

/// A problem found on a candidate entry or built record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationIssue {
    /// A required field is blank.
    #[error("Missing required field {0}")]
    MissingField(Column),

    /// The age lies outside the accepted range.
    #[error("Age {0} out of range")]
    AgeOutOfRange(u32),

    /// The cleaned Hindi voter name is shorter than the minimum.
    #[error("Voter name too short ({chars} characters)")]
    NameTooShort {
        /// Character count of the cleaned name.
        chars: usize,
    },

    /// Transliteration produced no Latin text for a non-empty name.
    #[error("Transliteration failed for {0}")]
    TransliterationFailed(Column),

    /// No father/husband name could be attributed.
    #[error("Missing father/husband name")]
    MissingRelativeName,
}

impl ValidationIssue {
    /// Whether the issue excludes the record from output.
    ///
    /// Problems with the father/husband name only lower the quality score.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::MissingRelativeName
                | Self::TransliterationFailed(
                    Column::FatherOrHusbandName | Column::FatherOrHusbandNameLower
                )
        )
    }
}

/// Outcome of [`validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    /// `true` when no issue is fatal.
    pub valid: bool,
    pub issues: Vec<ValidationIssue>,
}

impl Validation {
    /// Builds a validation result from the issues found.
    #[must_use]
    pub fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        Self {
            valid: !issues.iter().any(ValidationIssue::is_fatal),
            issues,
        }
    }

    /// Diagnostic score: 100 minus 10 per issue, never below zero.
    #[must_use]
    pub fn quality_score(&self) -> u8 {
        let penalty = self.issues.len().saturating_mul(10);
        u8::try_from(100usize.saturating_sub(penalty)).unwrap_or(0)
    }
}

/// Strips non-name characters and relational stop words from name text.
#[derive(Debug, Clone, Default)]
pub struct FieldCleaner {
    stop_words: BTreeSet<String>,
}

impl FieldCleaner {
    #[must_use]
    pub fn new(stop_words: impl IntoIterator<Item = String>) -> Self {
        Self {
            stop_words: stop_words.into_iter().collect(),
        }
    }

    /// Keeps only Devanagari letters and signs, drops stop words and
    /// collapses whitespace.
    ///
    /// Digits and dandas are removed along with everything outside the
    /// Devanagari block.
    #[must_use]
    pub fn clean_name(&self, text: &str) -> String {
        let letters: String = text
            .chars()
            .map(|c| if is_name_char(c) { c } else { ' ' })
            .collect();

        let kept: Vec<&str> = letters
            .split_whitespace()
            .filter(|word| !self.stop_words.contains(*word))
            .collect();

        collapse_whitespace(&kept.join(" "))
    }
}

fn is_name_char(c: char) -> bool {
    is_devanagari(c) && !is_devanagari_digit(c) && !matches!(c, '\u{0964}' | '\u{0965}')
}

/// Checks a built record against the record invariants.
#[must_use]
pub fn validate(record: &VoterRecord, limits: &Limits) -> Validation {
    let mut issues = Vec::new();

    if record.sr_no.trim().is_empty() {
        issues.push(ValidationIssue::MissingField(Column::SrNo));
    }

    let hindi = record.voter_name_hindi.trim();
    if hindi.is_empty() {
        issues.push(ValidationIssue::MissingField(Column::VoterNameHindi));
    } else {
        let chars = hindi.chars().filter(|c| !c.is_whitespace()).count();
        if chars < limits.min_name_chars {
            issues.push(ValidationIssue::NameTooShort { chars });
        }
        if record.voter_name.trim().is_empty() {
            issues.push(ValidationIssue::TransliterationFailed(Column::VoterName));
        }
    }

    if !limits.accepts_age(u32::from(record.age)) {
        issues.push(ValidationIssue::AgeOutOfRange(u32::from(record.age)));
    }

    if record.father_or_husband_name_hindi.trim().is_empty() {
        issues.push(ValidationIssue::MissingRelativeName);
    } else if record.father_or_husband_name.trim().is_empty() {
        issues.push(ValidationIssue::TransliterationFailed(
            Column::FatherOrHusbandName,
        ));
    }

    Validation::from_issues(issues)
}
