//! Record segmentation of continuous roll lines.
//!
//! A single extracted line often holds several voter entries back to back
//! with nothing but the entries' own structure between them:
//!
//! ```text
//! 49 कृष्णा राजकुमार रामपाल सिंह पु 46 50 नगर सुनिता राजकुमार म 43
//! ```
//!
//! The [`Segmenter`] scans a line with an ordered list of
//! [`MatchStrategy`] patterns, strictest first, and stops at the first
//! strategy that yields an acceptable entry.  Matches never overlap: the
//! scan resumes after the end of each match.

use std::sync::LazyLock;

use regex::Regex;
use strum_macros::{AsRefStr, Display};
use voter_roll_record_models::Gender;

use crate::clean::ValidationIssue;
use crate::devanagari::{parse_number, ALNUM, DIGIT, LETTER};
use crate::tables::Limits;

/// Alternation of every gender marker, longest first.
fn gender_alternation() -> String {
    Gender::MARKERS
        .iter()
        .map(|m| regex::escape(m))
        .collect::<Vec<_>>()
        .join("|")
}

/// Words of name letters, at least two letters in all, as short as
/// possible.
fn name_run() -> String {
    format!(r"(?:{LETTER}{{2,}}|{LETTER}\s+{LETTER}+)(?:\s+{LETTER}+)*?")
}

/// Serial, optional house token, voter name run, relative name run,
/// gender, age.  Both runs land in one `names` group for the splitter.
static STRICT_RE: LazyLock<Regex> = LazyLock::new(|| {
    let run = name_run();
    Regex::new(&format!(
        r"\b(?P<serial>{DIGIT}{{1,4}})\s+(?:(?P<house>{ALNUM}{{1,8}})\s+)?(?P<names>{run}\s+{run})\s+(?P<gender>{})\s+(?P<age>{DIGIT}{{1,3}})\b",
        gender_alternation()
    ))
    .expect("valid regex")
});

/// Serial, a single name run, gender, age.
static FALLBACK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\b(?P<serial>{DIGIT}{{1,4}})\s+(?P<names>{})\s+(?P<gender>{})\s+(?P<age>{DIGIT}{{1,3}})\b",
        name_run(),
        gender_alternation()
    ))
    .expect("valid regex")
});

/// The patterns tried on a line, most constrained first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum MatchStrategy {
    /// Two name runs and an optional house token.
    Strict,
    /// A single name run, no house token.
    Fallback,
}

impl MatchStrategy {
    /// Order in which strategies are tried.
    pub const ORDER: [Self; 2] = [Self::Strict, Self::Fallback];

    fn regex(self) -> &'static Regex {
        match self {
            Self::Strict => &*STRICT_RE,
            Self::Fallback => &*FALLBACK_RE,
        }
    }
}

/// One voter entry found on a line, before splitting and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateMatch {
    /// Serial number as printed.
    pub serial_no: String,
    /// House number or address token, when printed.
    pub house_no: Option<String>,
    /// Voter and father/husband names as one run, still to be split.
    pub name_run: String,
    pub gender: Gender,
    pub age: u8,
}

/// A match dropped during segmentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discard {
    pub serial_no: String,
    pub issue: ValidationIssue,
}

/// Result of scanning one line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmentation {
    /// Accepted entries in line order.
    pub candidates: Vec<CandidateMatch>,
    /// Entries the winning (or last tried) strategy dropped.
    pub discarded: Vec<Discard>,
    /// Strategy that produced [`Self::candidates`], if any did.
    pub strategy: Option<MatchStrategy>,
}

/// Splits a repaired line into [`CandidateMatch`] values.
#[derive(Debug, Clone)]
pub struct Segmenter {
    min_age: u8,
    max_age: u8,
}

impl Segmenter {
    /// Builds a segmenter accepting ages in `limits`' range.
    #[must_use]
    pub const fn new(limits: &Limits) -> Self {
        Self {
            min_age: limits.min_age,
            max_age: limits.max_age,
        }
    }

    /// Scans `line` with each strategy in [`MatchStrategy::ORDER`].
    ///
    /// The first strategy that accepts at least one entry wins; later ones
    /// are not tried.  Entries with an age outside the configured range
    /// are discarded silently and reported in
    /// [`Segmentation::discarded`].
    #[must_use]
    pub fn segment(&self, line: &str) -> Segmentation {
        let mut result = Segmentation::default();

        for strategy in MatchStrategy::ORDER {
            let (candidates, discarded) = self.scan(strategy, line);
            if !candidates.is_empty() {
                return Segmentation {
                    candidates,
                    discarded,
                    strategy: Some(strategy),
                };
            }
            result.discarded = discarded;
        }

        result
    }

    fn scan(&self, strategy: MatchStrategy, line: &str) -> (Vec<CandidateMatch>, Vec<Discard>) {
        let mut candidates = Vec::new();
        let mut discarded = Vec::new();

        let re = strategy.regex();
        let mut pos = 0;

        while let Some(caps) = re.captures_at(line, pos) {
            let (Some(whole), Some(serial)) = (caps.get(0), caps.name("serial")) else {
                break;
            };

            // The age of an entry that failed to match is not a serial.
            if follows_gender_marker(&line[..whole.start()]) {
                log::trace!("Skipping serial {:?} after a gender marker", serial.as_str());
                pos = serial.end();
                continue;
            }
            pos = whole.end();

            let serial_no = serial.as_str().to_string();

            let Some(gender) = Gender::from_marker(&caps["gender"]) else {
                continue;
            };

            let age = parse_number(&caps["age"]).unwrap_or(0);
            let Some(age) = self.accept_age(age) else {
                log::debug!("Discarding entry {serial_no}: age {age} out of range");
                discarded.push(Discard {
                    serial_no,
                    issue: ValidationIssue::AgeOutOfRange(age),
                });
                continue;
            };

            candidates.push(CandidateMatch {
                serial_no,
                house_no: caps.name("house").map(|m| m.as_str().to_string()),
                name_run: caps["names"].to_string(),
                gender,
                age,
            });
        }

        (candidates, discarded)
    }

    fn accept_age(&self, age: u32) -> Option<u8> {
        u8::try_from(age)
            .ok()
            .filter(|a| (self.min_age..=self.max_age).contains(a))
    }
}

fn follows_gender_marker(before: &str) -> bool {
    before
        .split_whitespace()
        .next_back()
        .is_some_and(|word| Gender::from_marker(word).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segmenter() -> Segmenter {
        Segmenter::new(&Limits::default())
    }

    #[test]
    fn splits_two_concatenated_entries() {
        let line = "49 कृष्णा राजकुमार रामपाल सिंह पु 46 50 नगर सुनिता राजकुमार म 43";
        let result = segmenter().segment(line);

        assert_eq!(result.strategy, Some(MatchStrategy::Strict));
        assert_eq!(result.candidates.len(), 2);

        let first = &result.candidates[0];
        assert_eq!(first.serial_no, "49");
        assert_eq!(first.house_no.as_deref(), Some("कृष्णा"));
        assert_eq!(first.name_run, "राजकुमार रामपाल सिंह");
        assert_eq!(first.gender, Gender::Male);
        assert_eq!(first.age, 46);

        let second = &result.candidates[1];
        assert_eq!(second.serial_no, "50");
        assert_eq!(second.house_no.as_deref(), Some("नगर"));
        assert_eq!(second.name_run, "सुनिता राजकुमार");
        assert_eq!(second.gender, Gender::Female);
        assert_eq!(second.age, 43);
    }

    #[test]
    fn segments_unrepaired_scenario_line() {
        let line = "49 कृष्णा राजकुमार रामपाल सिसंह पु 46 50 नगर सुनिता राजकुमार म 43";
        let result = segmenter().segment(line);
        let serials: Vec<_> = result.candidates.iter().map(|c| c.serial_no.as_str()).collect();
        assert_eq!(serials, ["49", "50"]);
        assert_eq!(result.candidates[0].age, 46);
        assert_eq!(result.candidates[1].gender, Gender::Female);
    }

    #[test]
    fn house_token_is_optional() {
        let result = segmenter().segment("7 सीता राम म 30");
        assert_eq!(result.candidates.len(), 1);
        let c = &result.candidates[0];
        assert_eq!(c.house_no, None);
        assert_eq!(c.name_run, "सीता राम");
    }

    #[test]
    fn falls_back_to_single_name_run() {
        let result = segmenter().segment("12 गीता म 55");
        assert_eq!(result.strategy, Some(MatchStrategy::Fallback));
        assert_eq!(result.candidates.len(), 1);
        assert_eq!(result.candidates[0].name_run, "गीता");
        assert_eq!(result.candidates[0].house_no, None);
    }

    #[test]
    fn keeps_multi_word_voter_names_in_the_run() {
        let result = segmenter().segment("2 ए01 सुनील कांत मोहन लाल म 38");
        assert_eq!(result.candidates.len(), 1);
        let c = &result.candidates[0];
        assert_eq!(c.house_no.as_deref(), Some("ए01"));
        assert_eq!(c.name_run, "सुनील कांत मोहन लाल");
    }

    #[test]
    fn age_of_an_unmatched_entry_is_not_a_serial() {
        let result = segmenter().segment("12 गीता म 55 13 सीता राम म 30");
        assert_eq!(result.strategy, Some(MatchStrategy::Strict));
        assert_eq!(result.candidates.len(), 1);
        let c = &result.candidates[0];
        assert_eq!(c.serial_no, "13");
        assert_eq!(c.house_no, None);
        assert_eq!(c.name_run, "सीता राम");
        assert_eq!(c.age, 30);
    }

    #[test]
    fn fallback_skips_serials_after_gender_markers() {
        let result = segmenter().segment("12 म 55 कमला म 40 13 गीता म 52");
        assert_eq!(result.strategy, Some(MatchStrategy::Fallback));
        let serials: Vec<_> = result.candidates.iter().map(|c| c.serial_no.as_str()).collect();
        assert_eq!(serials, ["13"]);
    }

    #[test]
    fn one_letter_runs_are_not_names() {
        let result = segmenter().segment("8 र पु 40");
        assert!(result.candidates.is_empty());

        let result = segmenter().segment("9 र मोहन पु 40");
        assert_eq!(result.candidates.len(), 1);
        assert_eq!(result.candidates[0].name_run, "र मोहन");
    }

    #[test]
    fn discards_out_of_range_ages() {
        let line = "1 अमित कुमार रमेश पु 17 2 सुधा देवी मोहन म 121 3 विजय लाल श्याम पु 18";
        let result = segmenter().segment(line);
        let serials: Vec<_> = result.candidates.iter().map(|c| c.serial_no.as_str()).collect();
        assert_eq!(serials, ["3"]);
        assert_eq!(result.discarded.len(), 2);
        assert_eq!(result.discarded[0].issue, ValidationIssue::AgeOutOfRange(17));
        assert_eq!(result.discarded[1].issue, ValidationIssue::AgeOutOfRange(121));
    }

    #[test]
    fn accepts_boundary_ages() {
        let result = segmenter().segment("1 अमित रमेश पु 18 2 सुधा मोहन म 120");
        let ages: Vec<_> = result.candidates.iter().map(|c| c.age).collect();
        assert_eq!(ages, [18, 120]);
    }

    #[test]
    fn reads_devanagari_digits() {
        let result = segmenter().segment("४९ राजकुमार रामपाल पु ४६");
        assert_eq!(result.candidates.len(), 1);
        assert_eq!(result.candidates[0].serial_no, "४९");
        assert_eq!(result.candidates[0].age, 46);
    }

    #[test]
    fn recognises_long_gender_markers() {
        let result = segmenter().segment("5 कमला देवी श्याम स्त्री 61 6 मोहन लाल हरि पुरुष 70");
        let genders: Vec<_> = result.candidates.iter().map(|c| c.gender).collect();
        assert_eq!(genders, [Gender::Female, Gender::Male]);
    }

    #[test]
    fn unknown_marker_yields_nothing() {
        let result = segmenter().segment("5 कमला देवी श्याम महिला 61");
        assert!(result.candidates.is_empty());
        assert_eq!(result.strategy, None);
    }

    #[test]
    fn noise_line_yields_nothing() {
        let result = segmenter().segment("मतदाता सूची भाग संख्या 12");
        assert!(result.candidates.is_empty());
        assert!(result.discarded.is_empty());
    }
}
