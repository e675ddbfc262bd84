//! Glyph repair for text extracted with a non-Unicode Devanagari font.
//!
//! The rolls' embedded font maps most glyphs to private codes, which text
//! extraction emits as `(cid:N)`.  [`GlyphRepairer::repair`] substitutes
//! those codes, drops the ones it does not know, then rewrites the broken
//! sequences left behind when a matra lands on the wrong side of a space.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::devanagari::collapse_whitespace;
use crate::tables::{EngineTables, SequenceFix};
use crate::TablesError;

/// A `(cid:N)` glyph placeholder.
static CID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(cid:([0-9]+)\)").expect("valid regex"));

/// Upper bound on broken-sequence passes per call.
const MAX_FIX_PASSES: usize = 16;

/// Restores canonical Devanagari from glyph-corrupted text.
#[derive(Debug, Clone)]
pub struct GlyphRepairer {
    glyphs: BTreeMap<u32, String>,
    fixes: Vec<SequenceFix>,
}

impl GlyphRepairer {
    /// Builds a repairer from a glyph code table and ordered fix rules.
    #[must_use]
    pub const fn new(glyphs: BTreeMap<u32, String>, fixes: Vec<SequenceFix>) -> Self {
        Self { glyphs, fixes }
    }

    /// Builds a repairer from the glyph and broken-sequence tables.
    ///
    /// # Errors
    ///
    /// Returns [`TablesError`] if the glyph table is empty or has a
    /// non-numeric code.
    pub fn from_tables(tables: &EngineTables) -> Result<Self, TablesError> {
        Ok(Self::new(
            tables.glyph_codes()?,
            tables.broken_sequences.clone(),
        ))
    }

    /// Repairs one line (or any text) of extracted output.
    ///
    /// Glyph codes are replaced first, then leftover codes removed, then
    /// whitespace collapsed, and finally the broken-sequence rules applied
    /// until the text stops changing.  The result is trimmed with single
    /// spaces, so `repair(repair(x)) == repair(x)`.
    #[must_use]
    pub fn repair(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return String::new();
        }

        let substituted = CID_RE.replace_all(text, |caps: &Captures<'_>| {
            caps[1]
                .parse::<u32>()
                .ok()
                .and_then(|code| self.glyphs.get(&code))
                .cloned()
                .unwrap_or_default()
        });

        let mut current = collapse_whitespace(&strip_residual_codes(&substituted));

        for _ in 0..MAX_FIX_PASSES {
            let next = collapse_whitespace(&strip_residual_codes(&self.apply_fixes(&current)));
            if next == current {
                return current;
            }
            current = next;
        }

        log::warn!(
            "Broken-sequence rules did not settle after {MAX_FIX_PASSES} passes on {current:?}"
        );
        current
    }

    fn apply_fixes(&self, text: &str) -> String {
        self.fixes
            .iter()
            .fold(text.to_string(), |acc, fix| acc.replace(&fix.from, &fix.to))
    }
}

/// Removes `(cid:N)` tokens until none remain.
///
/// Mapped parentheses can splice a fresh token together out of the text
/// around a removed one, hence the loop.
fn strip_residual_codes(text: &str) -> String {
    let mut current = text.to_string();
    while CID_RE.is_match(&current) {
        current = CID_RE.replace_all(&current, "").into_owned();
    }
    current
}
