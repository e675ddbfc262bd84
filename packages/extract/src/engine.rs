//! Page and document extraction drivers.
//!
//! [`Engine`] owns the compiled lookup tables and runs the full pipeline
//! over a page: repair, header extraction, segmentation, name splitting,
//! cleaning, transliteration and validation.  Pages share no state, so
//! callers may extract them on separate threads and hand the results to
//! [`Engine::merge_pages`] for the single deduplication pass.

use std::sync::Arc;

use serde::Serialize;
use voter_roll_record_models::{HeaderInfo, VoterRecord};

use crate::clean::{self, FieldCleaner, Validation, ValidationIssue};
use crate::glyph::GlyphRepairer;
use crate::header::extract_header;
use crate::names::{NameSplit, NameSplitter, SplitBasis};
use crate::segment::{CandidateMatch, Segmenter};
use crate::tables::{EngineTables, Limits};
use crate::transliterate::Transliterator;
use crate::{dedup, table, TablesError};

/// Extracted content of one PDF page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInput {
    /// The page's text, one physical line per `\n`.
    pub text: String,
    /// Table grids found on the page, as rows of cells.
    pub tables: Vec<Vec<Vec<String>>>,
}

impl PageInput {
    /// A page with text only.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tables: Vec::new(),
        }
    }

    /// Adds a table grid to the page.
    #[must_use]
    pub fn with_table(mut self, rows: Vec<Vec<String>>) -> Self {
        self.tables.push(rows);
        self
    }
}

/// An entry that was found on a page but not turned into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub sr_no: String,
    /// Cleaned Hindi voter name, empty when the entry never got that far.
    pub voter_name_hindi: String,
    pub issues: Vec<ValidationIssue>,
}

/// Result of extracting one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageExtraction {
    pub header: Arc<HeaderInfo>,
    /// Valid records in page order, not yet deduplicated.
    pub records: Vec<VoterRecord>,
    pub rejected: Vec<Rejection>,
    /// Name splits with several candidate boundaries.
    pub ambiguous_splits: usize,
    /// Name splits made without any relation indicator.
    pub default_splits: usize,
    /// Kept records that carry non-fatal validation issues.
    pub soft_issues: usize,
}

/// Counters describing one document's extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionSummary {
    pub pages: usize,
    pub pages_with_records: usize,
    /// Records in the final, deduplicated output.
    pub records: usize,
    pub rejected: usize,
    pub duplicates: usize,
    pub ambiguous_splits: usize,
    pub default_splits: usize,
    pub soft_issues: usize,
}

/// Result of extracting a whole document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentExtraction {
    /// Deduplicated records in document order.
    pub records: Vec<VoterRecord>,
    pub rejected: Vec<Rejection>,
    pub summary: ExtractionSummary,
}

/// The voter record extraction engine.
#[derive(Debug, Clone)]
pub struct Engine {
    repairer: GlyphRepairer,
    segmenter: Segmenter,
    splitter: NameSplitter,
    cleaner: FieldCleaner,
    transliterator: Transliterator,
    limits: Limits,
}

impl Engine {
    /// Validates `tables` and builds an engine from them.
    ///
    /// # Errors
    ///
    /// Returns [`TablesError`] if any table is empty or malformed.
    pub fn new(tables: EngineTables) -> Result<Self, TablesError> {
        tables.validate()?;

        let repairer = GlyphRepairer::from_tables(&tables)?;
        let EngineTables {
            relation_indicators,
            stop_words,
            curated_names,
            limits,
            ..
        } = tables;

        Ok(Self {
            repairer,
            segmenter: Segmenter::new(&limits),
            splitter: NameSplitter::new(relation_indicators),
            cleaner: FieldCleaner::new(stop_words),
            transliterator: Transliterator::new(curated_names),
            limits,
        })
    }

    /// Builds an engine from the tables compiled into the crate.
    ///
    /// # Errors
    ///
    /// Returns [`TablesError`] if the embedded tables are malformed.
    pub fn with_embedded_tables() -> Result<Self, TablesError> {
        Self::new(EngineTables::embedded()?)
    }

    #[must_use]
    pub const fn limits(&self) -> &Limits {
        &self.limits
    }

    #[must_use]
    pub const fn repairer(&self) -> &GlyphRepairer {
        &self.repairer
    }

    #[must_use]
    pub const fn transliterator(&self) -> &Transliterator {
        &self.transliterator
    }

    /// Extracts every voter record printed on one page.
    ///
    /// Never fails: lines and entries that cannot be read are skipped or
    /// reported in [`PageExtraction::rejected`].
    #[must_use]
    pub fn extract_page(&self, page: &PageInput, source_file: &str) -> PageExtraction {
        let text_lines: Vec<String> = page
            .text
            .lines()
            .map(|line| self.repairer.repair(line))
            .filter(|line| !line.is_empty())
            .collect();

        let header = Arc::new(extract_header(&text_lines.join("\n")));

        let table_lines = page
            .tables
            .iter()
            .flat_map(|rows| table::rows_to_lines(rows))
            .map(|line| self.repairer.repair(&line))
            .filter(|line| !line.is_empty());

        let mut result = PageExtraction {
            header: Arc::clone(&header),
            records: Vec::new(),
            rejected: Vec::new(),
            ambiguous_splits: 0,
            default_splits: 0,
            soft_issues: 0,
        };

        for line in text_lines.into_iter().chain(table_lines) {
            if line.chars().count() < self.limits.min_line_chars {
                continue;
            }

            let segmentation = self.segmenter.segment(&line);

            result
                .rejected
                .extend(segmentation.discarded.into_iter().map(|d| Rejection {
                    sr_no: d.serial_no,
                    voter_name_hindi: String::new(),
                    issues: vec![d.issue],
                }));

            for candidate in &segmentation.candidates {
                let split = self.splitter.split(&candidate.name_run);
                match split.basis {
                    SplitBasis::Ambiguous => result.ambiguous_splits += 1,
                    SplitBasis::Default => result.default_splits += 1,
                    _ => {}
                }

                match self.build_record(candidate, &split, &header, source_file) {
                    Ok((record, validation)) => {
                        if !validation.issues.is_empty() {
                            log::trace!(
                                "Keeping entry {} at quality {}: {:?}",
                                record.sr_no,
                                validation.quality_score(),
                                validation.issues
                            );
                            result.soft_issues += 1;
                        }
                        result.records.push(record);
                    }
                    Err(rejection) => result.rejected.push(rejection),
                }
            }
        }

        log::debug!(
            "{source_file}: page yielded {} records, {} rejected",
            result.records.len(),
            result.rejected.len()
        );

        result
    }

    /// Cleans, transliterates and validates one entry into a record.
    ///
    /// A kept record comes back with its [`Validation`], whose issues are
    /// all soft.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] carrying every issue found when the record
    /// has a fatal one.
    pub fn build_record(
        &self,
        candidate: &CandidateMatch,
        split: &NameSplit,
        header: &Arc<HeaderInfo>,
        source_file: &str,
    ) -> Result<(VoterRecord, Validation), Rejection> {
        let voter_name_hindi = self.cleaner.clean_name(&split.voter);
        let relative_hindi = self.cleaner.clean_name(&split.relative);

        let voter_name = self.transliterator.transliterate(&voter_name_hindi);
        let relative_name = self.transliterator.transliterate(&relative_hindi);

        let record = VoterRecord {
            sr_no: candidate.serial_no.clone(),
            house_no: candidate.house_no.clone().unwrap_or_default(),
            voter_name_lower: voter_name.to_lowercase(),
            voter_name,
            voter_name_hindi,
            father_or_husband_name_lower: relative_name.to_lowercase(),
            father_or_husband_name: relative_name,
            father_or_husband_name_hindi: relative_hindi,
            gender: candidate.gender,
            age: candidate.age,
            header: Arc::clone(header),
            source_file: source_file.to_string(),
            tag: self.limits.tag.clone(),
        };

        let validation = clean::validate(&record, &self.limits);
        if validation.valid {
            return Ok((record, validation));
        }

        log::debug!(
            "Rejecting entry {} ({:?}): {:?}",
            record.sr_no,
            record.voter_name_hindi,
            validation.issues
        );

        Err(Rejection {
            sr_no: record.sr_no,
            voter_name_hindi: record.voter_name_hindi,
            issues: validation.issues,
        })
    }

    /// Extracts all pages of one document and deduplicates the result.
    #[must_use]
    pub fn extract_document(&self, pages: &[PageInput], source_file: &str) -> DocumentExtraction {
        let extracted = pages
            .iter()
            .map(|page| self.extract_page(page, source_file))
            .collect();
        self.merge_pages(extracted)
    }

    /// Concatenates page results in order and deduplicates the records.
    #[must_use]
    pub fn merge_pages(&self, pages: Vec<PageExtraction>) -> DocumentExtraction {
        let mut summary = ExtractionSummary {
            pages: pages.len(),
            ..ExtractionSummary::default()
        };

        let mut records = Vec::new();
        let mut rejected = Vec::new();

        for page in pages {
            if !page.records.is_empty() {
                summary.pages_with_records += 1;
            }
            summary.ambiguous_splits += page.ambiguous_splits;
            summary.default_splits += page.default_splits;
            summary.soft_issues += page.soft_issues;
            records.extend(page.records);
            rejected.extend(page.rejected);
        }

        let (records, duplicates) = dedup::dedup(records);
        summary.records = records.len();
        summary.rejected = rejected.len();
        summary.duplicates = duplicates;

        log::info!(
            "Extracted {} records from {} pages ({} rejected, {} duplicates, {} uncertain name splits)",
            summary.records,
            summary.pages,
            summary.rejected,
            summary.duplicates,
            summary.ambiguous_splits + summary.default_splits
        );

        DocumentExtraction {
            records,
            rejected,
            summary,
        }
    }
}
