//! Config-driven lookup tables for the extraction engine.
//!
//! [`EngineTables`] captures everything about a family of roll PDFs that
//! tends to need tuning (font glyph codes, known broken sequences, name
//! heuristics, curated spellings) in a serializable struct. The default
//! tables are baked into the binary from `tables/default.toml` via
//! [`include_str!`]; callers may load their own with
//! [`EngineTables::from_toml_str`].

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::TablesError;

/// Default tables embedded at compile time.
const DEFAULT_TABLES: &str = include_str!("../tables/default.toml");

/// The complete set of lookup tables handed to [`crate::Engine::new`].
#[derive(Debug, Clone, Deserialize)]
pub struct EngineTables {
    /// Font glyph code (the `N` in `(cid:N)`) to replacement text.
    pub glyphs: BTreeMap<String, String>,
    /// Broken Devanagari sequences and their repairs, applied in order.
    #[serde(default)]
    pub broken_sequences: Vec<SequenceFix>,
    /// Substrings marking the first word of a father/husband name.
    pub relation_indicators: Vec<String>,
    /// Relational words removed from cleaned name fields.
    #[serde(default)]
    pub stop_words: Vec<String>,
    /// Devanagari name to preferred Latin spelling.
    pub curated_names: BTreeMap<String, String>,
    /// Numeric thresholds and the output tag.
    #[serde(default)]
    pub limits: Limits,
}

/// One broken-sequence repair rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SequenceFix {
    /// Corrupted text as it appears after glyph substitution.
    pub from: String,
    /// Corrected text.
    pub to: String,
}

/// Thresholds applied while segmenting and validating records.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Youngest age accepted on a record (inclusive).
    pub min_age: u8,
    /// Oldest age accepted on a record (inclusive).
    pub max_age: u8,
    /// Repaired lines shorter than this many characters are skipped.
    pub min_line_chars: usize,
    /// Minimum length of the cleaned Hindi voter name.
    pub min_name_chars: usize,
    /// Constant written to the `tag` column of every record.
    pub tag: String,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            min_age: 18,
            max_age: 120,
            min_line_chars: 10,
            min_name_chars: 2,
            tag: "1".to_string(),
        }
    }
}

impl Limits {
    /// Whether `age` falls inside `[min_age, max_age]`.
    #[must_use]
    pub fn accepts_age(&self, age: u32) -> bool {
        (u32::from(self.min_age)..=u32::from(self.max_age)).contains(&age)
    }
}

impl EngineTables {
    /// Parses the tables embedded in the crate.
    ///
    /// # Errors
    ///
    /// Returns [`TablesError::Toml`] if the embedded file is malformed.
    pub fn embedded() -> Result<Self, TablesError> {
        Self::from_toml_str(DEFAULT_TABLES)
    }

    /// Parses tables from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`TablesError::Toml`] if the document does not match the
    /// [`EngineTables`] layout.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, TablesError> {
        Ok(toml::de::from_str(toml_str)?)
    }

    /// Checks the tables for defects that would make extraction silently
    /// wrong on every record.
    ///
    /// # Errors
    ///
    /// Returns the first [`TablesError`] found.
    pub fn validate(&self) -> Result<(), TablesError> {
        self.glyph_codes()?;

        for fix in &self.broken_sequences {
            if fix.from.is_empty() {
                return Err(TablesError::EmptyKey {
                    table: "broken_sequences",
                });
            }
            if fix.to.contains(&fix.from) {
                return Err(TablesError::UnstableFix {
                    from: fix.from.clone(),
                    to: fix.to.clone(),
                });
            }
        }

        check_words("relation_indicators", &self.relation_indicators)?;
        if self.stop_words.iter().any(|w| w.trim().is_empty()) {
            return Err(TablesError::EmptyKey {
                table: "stop_words",
            });
        }

        if self.curated_names.is_empty() {
            return Err(TablesError::EmptyTable("curated_names"));
        }
        if self
            .curated_names
            .iter()
            .any(|(k, v)| k.trim().is_empty() || v.trim().is_empty())
        {
            return Err(TablesError::EmptyKey {
                table: "curated_names",
            });
        }

        if self.limits.min_age > self.limits.max_age {
            return Err(TablesError::InvalidAgeRange {
                min: self.limits.min_age,
                max: self.limits.max_age,
            });
        }

        Ok(())
    }

    /// Returns the glyph table keyed by numeric code.
    ///
    /// # Errors
    ///
    /// Returns [`TablesError::EmptyTable`] for an empty table and
    /// [`TablesError::InvalidGlyphCode`] for a key that is not a number.
    pub fn glyph_codes(&self) -> Result<BTreeMap<u32, String>, TablesError> {
        if self.glyphs.is_empty() {
            return Err(TablesError::EmptyTable("glyphs"));
        }

        self.glyphs
            .iter()
            .map(|(code, replacement)| {
                code.trim()
                    .parse::<u32>()
                    .map(|c| (c, replacement.clone()))
                    .map_err(|_| TablesError::InvalidGlyphCode(code.clone()))
            })
            .collect()
    }
}

fn check_words(table: &'static str, words: &[String]) -> Result<(), TablesError> {
    if words.is_empty() {
        return Err(TablesError::EmptyTable(table));
    }
    if words.iter().any(|w| w.trim().is_empty()) {
        return Err(TablesError::EmptyKey { table });
    }
    Ok(())
}
