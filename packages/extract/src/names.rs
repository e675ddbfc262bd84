//! Splitting a name run into the voter's name and the father/husband name.
//!
//! Roll entries print the two names one after the other with nothing in
//! between, so the boundary is guessed from relation indicators: family
//! names and kinship suffixes that usually open the second name.  The
//! guess is often wrong when a surname doubles as a given name, so every
//! split reports the [`SplitBasis`] it rests on.

use strum_macros::{AsRefStr, Display};

/// What a [`NameSplit`] boundary was decided by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum SplitBasis {
    /// Exactly one word after the first held a relation indicator.
    Indicator,
    /// Several words (or the first word) held indicators; the earliest
    /// eligible one was used.
    Ambiguous,
    /// No indicator: the first word was taken as the voter's name.
    Default,
    /// A single word: no father/husband name.
    SingleWord,
}

impl SplitBasis {
    /// Whether the boundary is a guess worth flagging.
    #[must_use]
    pub const fn is_uncertain(self) -> bool {
        matches!(self, Self::Ambiguous | Self::Default)
    }
}

/// A name run divided into its two names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameSplit {
    pub voter: String,
    pub relative: String,
    pub basis: SplitBasis,
}

/// Splits name runs at relation-indicator words.
#[derive(Debug, Clone)]
pub struct NameSplitter {
    indicators: Vec<String>,
}

impl NameSplitter {
    #[must_use]
    pub fn new(indicators: impl IntoIterator<Item = String>) -> Self {
        Self {
            indicators: indicators
                .into_iter()
                .filter(|i| !i.trim().is_empty())
                .collect(),
        }
    }

    /// Whether `word` contains any relation indicator.
    #[must_use]
    pub fn is_indicator_word(&self, word: &str) -> bool {
        self.indicators.iter().any(|i| word.contains(i.as_str()))
    }

    /// Splits `blob` into voter and father/husband names.
    ///
    /// The first indicator-bearing word after the first word starts the
    /// father/husband name.  Without one, the first word alone is the
    /// voter's name.  A single word is entirely the voter's name.
    #[must_use]
    pub fn split(&self, blob: &str) -> NameSplit {
        let words: Vec<&str> = blob.split_whitespace().collect();

        if words.len() < 2 {
            return NameSplit {
                voter: words.join(" "),
                relative: String::new(),
                basis: SplitBasis::SingleWord,
            };
        }

        let hits: Vec<usize> = words
            .iter()
            .enumerate()
            .filter(|(_, w)| self.is_indicator_word(w))
            .map(|(i, _)| i)
            .collect();

        let (boundary, basis) = match hits.iter().copied().find(|&i| i >= 1) {
            Some(i) if hits.len() == 1 => (i, SplitBasis::Indicator),
            Some(i) => (i, SplitBasis::Ambiguous),
            None if hits.is_empty() => (1, SplitBasis::Default),
            None => (1, SplitBasis::Ambiguous),
        };

        if basis == SplitBasis::Ambiguous {
            log::debug!("Ambiguous name split of {blob:?} at word {boundary}");
        }

        NameSplit {
            voter: words[..boundary].join(" "),
            relative: words[boundary..].join(" "),
            basis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn splitter() -> NameSplitter {
        NameSplitter::new(["सिंह", "कुमार", "प्रसाद", "लाल", "राम"].map(String::from))
    }

    #[test]
    fn two_words_without_indicator_split_one_one() {
        let split = splitter().split("सुनिता मोहन");
        assert_eq!(split.voter, "सुनिता");
        assert_eq!(split.relative, "मोहन");
        assert_eq!(split.basis, SplitBasis::Default);
    }

    #[test]
    fn splits_at_indicator_in_second_position() {
        let split = splitter().split("गीता प्रसाद मौर्य");
        assert_eq!(split.voter, "गीता");
        assert_eq!(split.relative, "प्रसाद मौर्य");
        assert_eq!(split.basis, SplitBasis::Indicator);
    }

    #[test]
    fn splits_at_later_indicator() {
        let split = splitter().split("अनिल विजय प्रसाद");
        assert_eq!(split.voter, "अनिल विजय");
        assert_eq!(split.relative, "प्रसाद");
        assert_eq!(split.basis, SplitBasis::Indicator);
    }

    #[test]
    fn indicator_matches_inside_a_word() {
        let split = splitter().split("सुनिता राजकुमार");
        assert_eq!(split.voter, "सुनिता");
        assert_eq!(split.relative, "राजकुमार");
        assert_eq!(split.basis, SplitBasis::Indicator);
    }

    #[test]
    fn first_word_is_never_the_boundary() {
        let split = splitter().split("रामू मोहन");
        assert_eq!(split.voter, "रामू");
        assert_eq!(split.relative, "मोहन");
        assert_eq!(split.basis, SplitBasis::Ambiguous);
    }

    #[test]
    fn several_indicators_are_ambiguous() {
        let split = splitter().split("विजय कुमार रामपाल सिंह");
        assert_eq!(split.voter, "विजय");
        assert_eq!(split.relative, "कुमार रामपाल सिंह");
        assert_eq!(split.basis, SplitBasis::Ambiguous);
        assert!(split.basis.is_uncertain());
    }

    #[test]
    fn single_word_has_no_relative() {
        let split = splitter().split(" गीता ");
        assert_eq!(split.voter, "गीता");
        assert_eq!(split.relative, "");
        assert_eq!(split.basis, SplitBasis::SingleWord);

        let empty = splitter().split("");
        assert_eq!(empty.voter, "");
        assert_eq!(empty.basis, SplitBasis::SingleWord);
    }
}
