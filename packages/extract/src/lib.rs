#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Voter record extraction from electoral-roll page text.
//!
//! Electoral rolls are published as fixed-layout PDFs whose embedded
//! Devanagari font has no usable Unicode mapping, so extracted text arrives
//! full of `(cid:N)` glyph placeholders and matras detached from their
//! consonants.  This crate turns that text into validated, deduplicated
//! [`VoterRecord`] values with Latin transliterations of every name.
//!
//! The pipeline per page is:
//!
//! 1. [`glyph::GlyphRepairer`] restores canonical Devanagari per line.
//! 2. [`header::extract_header`] pulls the polling-station metadata.
//! 3. [`segment::Segmenter`] finds every voter entry on each line.
//! 4. [`names::NameSplitter`] separates voter and father/husband names.
//! 5. [`clean::FieldCleaner`] and [`clean::validate`] gate the record.
//! 6. [`transliterate::Transliterator`] renders names in Latin script.
//!
//! [`Engine`] wires these together; [`dedup::dedup`] runs once per document
//! after every page is done.  PDF text extraction itself happens upstream.

pub mod clean;
pub mod dedup;
pub mod devanagari;
pub mod engine;
pub mod export;
pub mod glyph;
pub mod header;
pub mod names;
pub mod segment;
pub mod table;
pub mod tables;
pub mod transliterate;

pub use engine::{DocumentExtraction, Engine, ExtractionSummary, PageExtraction, PageInput, Rejection};
pub use tables::{EngineTables, Limits};
pub use voter_roll_record_models::{Gender, HeaderField, HeaderInfo, VoterRecord};

/// Defects in the engine's lookup tables, reported once at construction.
#[derive(Debug, thiserror::Error)]
pub enum TablesError {
    /// The tables document is not valid TOML or has the wrong shape.
    #[error("Invalid tables TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// A table the engine cannot work without is empty.
    #[error("Table '{0}' is empty")]
    EmptyTable(&'static str),

    /// A table holds a blank key or value.
    #[error("Table '{table}' contains a blank entry")]
    EmptyKey {
        /// Name of the offending table.
        table: &'static str,
    },

    /// A glyph table key is not a numeric glyph code.
    #[error("Glyph code '{0}' is not a number")]
    InvalidGlyphCode(String),

    /// A broken-sequence rule whose replacement contains its own pattern
    /// would never settle.
    #[error("Broken-sequence rule '{from}' -> '{to}' reintroduces its pattern")]
    UnstableFix {
        /// Pattern of the rule.
        from: String,
        /// Replacement of the rule.
        to: String,
    },

    /// `min_age` is greater than `max_age`.
    #[error("Invalid age range {min}..={max}")]
    InvalidAgeRange {
        /// Configured minimum age.
        min: u8,
        /// Configured maximum age.
        max: u8,
    },
}

/// Errors writing extracted records out.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The CSV writer failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
