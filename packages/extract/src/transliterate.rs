//! Devanagari to Latin transliteration of names.
//!
//! Names are romanized syllable by syllable with ITRANS-style tables, the
//! inherent `a` is dropped where Hindi does not pronounce it, and the
//! result is normalized into a plain title-cased spelling.  A curated
//! table overrides the automatic spelling for common names, either for a
//! whole name or for single words of a compound one.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::devanagari::{collapse_whitespace, is_devanagari};

/// Anusvara and chandrabindu markers, both rendered as `n`.
static NASAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.[nN]").expect("valid regex"));

/// Remaining ITRANS marker characters.
static MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\^~.']").expect("valid regex"));

/// Anything that cannot appear in a Latin name.
static NON_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z\-\s]").expect("valid regex"));

const VIRAMA: char = '\u{094D}';
const NUKTA: char = '\u{093C}';

/// Renders Devanagari names in Latin script.
#[derive(Debug, Clone, Default)]
pub struct Transliterator {
    curated: BTreeMap<String, String>,
}

impl Transliterator {
    /// Builds a transliterator with curated spellings keyed by Devanagari
    /// name.
    #[must_use]
    pub fn new(curated: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            curated: curated
                .into_iter()
                .map(|(hindi, latin)| (normalize(&hindi), latin.trim().to_string()))
                .filter(|(hindi, latin)| !hindi.is_empty() && !latin.is_empty())
                .collect(),
        }
    }

    /// Transliterates `text`, returning an empty string when nothing
    /// Devanagari is left to render.
    ///
    /// Output is title-cased, with no doubled vowels and only ASCII
    /// letters, hyphens and single spaces.
    #[must_use]
    pub fn transliterate(&self, text: &str) -> String {
        let text = normalize(text);
        if text.is_empty() {
            return String::new();
        }

        if let Some(latin) = self.curated.get(&text) {
            return latin.clone();
        }

        text.split(' ')
            .map(|word| {
                self.curated
                    .get(word)
                    .cloned()
                    .unwrap_or_else(|| polish(&romanize(word)))
            })
            .filter(|word| !word.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// NFC form with everything outside the Devanagari block removed.
fn normalize(text: &str) -> String {
    let composed: String = text
        .nfc()
        .map(|c| if is_devanagari(c) { c } else { ' ' })
        .collect();
    collapse_whitespace(&composed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Vowel {
    /// The unwritten `a` every bare consonant carries.
    Inherent,
    Explicit(&'static str),
    /// Suppressed by a virama.
    None,
}

#[derive(Debug, Clone)]
struct Syllable {
    onset: String,
    consonants: usize,
    vowel: Vowel,
    coda: String,
}

impl Syllable {
    fn has_vowel(&self) -> bool {
        self.vowel != Vowel::None
    }
}

/// Romanizes one word into ITRANS-style text, markers included.
fn romanize(word: &str) -> String {
    let mut syllables = parse_syllables(word);
    delete_schwas(&mut syllables);

    syllables
        .iter()
        .map(|s| {
            let vowel = match s.vowel {
                Vowel::Inherent => "a",
                Vowel::Explicit(v) => v,
                Vowel::None => "",
            };
            format!("{}{vowel}{}", s.onset, s.coda)
        })
        .collect()
}

fn parse_syllables(word: &str) -> Vec<Syllable> {
    let chars: Vec<char> = word.chars().collect();
    let mut syllables: Vec<Syllable> = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        i += 1;

        if let Some(first) = consonant(c) {
            let mut onset = with_nukta(c, first, &chars, &mut i).to_string();
            let mut consonants = 1;

            while chars.get(i) == Some(&VIRAMA) {
                match chars.get(i + 1).and_then(|&n| consonant(n).map(|r| (n, r))) {
                    Some((next, roman)) => {
                        i += 2;
                        onset.push_str(with_nukta(next, roman, &chars, &mut i));
                        consonants += 1;
                    }
                    None => break,
                }
            }

            let vowel = match chars.get(i) {
                Some(&VIRAMA) => {
                    i += 1;
                    Vowel::None
                }
                Some(&m) => matra(m).map_or(Vowel::Inherent, |v| {
                    i += 1;
                    Vowel::Explicit(v)
                }),
                None => Vowel::Inherent,
            };

            syllables.push(Syllable {
                onset,
                consonants,
                vowel,
                coda: take_coda(&chars, &mut i),
            });
        } else if let Some(v) = independent_vowel(c).or_else(|| matra(c)) {
            syllables.push(Syllable {
                onset: String::new(),
                consonants: 0,
                vowel: Vowel::Explicit(v),
                coda: take_coda(&chars, &mut i),
            });
        } else if let Some(mark) = sign(c) {
            match syllables.last_mut() {
                Some(last) => last.coda.push_str(mark),
                None => syllables.push(Syllable {
                    onset: String::new(),
                    consonants: 0,
                    vowel: Vowel::None,
                    coda: mark.to_string(),
                }),
            }
        } else if c == '\u{0950}' {
            syllables.push(Syllable {
                onset: "OM".to_string(),
                consonants: 0,
                vowel: Vowel::None,
                coda: String::new(),
            });
        }
        // Stray nukta, virama, avagraha and digits carry no sound.
    }

    syllables
}

/// Applies a following nukta to a consonant, advancing past it.
fn with_nukta(base: char, roman: &'static str, chars: &[char], i: &mut usize) -> &'static str {
    if chars.get(*i) == Some(&NUKTA) {
        *i += 1;
        nukta_form(base).unwrap_or(roman)
    } else {
        roman
    }
}

fn take_coda(chars: &[char], i: &mut usize) -> String {
    let mut coda = String::new();
    while let Some(mark) = chars.get(*i).and_then(|&c| sign(c)) {
        coda.push_str(mark);
        *i += 1;
    }
    coda
}

/// Drops inherent vowels Hindi leaves unpronounced.
///
/// Works right to left: a word-final inherent `a` after a single
/// consonant goes, as does a medial one between two voiced syllables.
/// The syllable before a dropped vowel always keeps its own.
fn delete_schwas(syllables: &mut [Syllable]) {
    let Some(last) = syllables.len().checked_sub(1) else {
        return;
    };

    let mut i = last;
    while i >= 1 {
        let s = &syllables[i];
        let deletable = s.vowel == Vowel::Inherent && s.coda.is_empty();

        let delete = deletable
            && if i == last {
                s.consonants == 1
            } else {
                syllables[i - 1].has_vowel() && syllables[i + 1].has_vowel()
            };

        if delete {
            syllables[i].vowel = Vowel::None;
            if i < 2 {
                break;
            }
            i -= 2;
        } else {
            i -= 1;
        }
    }
}

/// Turns ITRANS-style text into a plain title-cased Latin spelling.
fn polish(text: &str) -> String {
    let text = NASAL_RE.replace_all(text, "n");
    let text = MARKER_RE.replace_all(&text, "").to_lowercase();
    let text = collapse_doubled_vowels(&text);
    let text = NON_NAME_RE.replace_all(&text, " ");

    collapse_whitespace(&text)
        .split(' ')
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn collapse_doubled_vowels(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev = None;
    for c in text.chars() {
        if matches!(c, 'a' | 'e' | 'i' | 'o' | 'u') && prev == Some(c) {
            continue;
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

const fn consonant(c: char) -> Option<&'static str> {
    Some(match c {
        'क' => "k",
        'ख' => "kh",
        'ग' => "g",
        'घ' => "gh",
        'ङ' => "~N",
        'च' => "ch",
        'छ' => "chh",
        'ज' => "j",
        'झ' => "jh",
        'ञ' => "~n",
        'ट' => "T",
        'ठ' => "Th",
        'ड' => "D",
        'ढ' => "Dh",
        'ण' => "N",
        'त' => "t",
        'थ' => "th",
        'द' => "d",
        'ध' => "dh",
        'न' | 'ऩ' => "n",
        'प' => "p",
        'फ' => "ph",
        'ब' => "b",
        'भ' => "bh",
        'म' => "m",
        'य' => "y",
        'र' | 'ऱ' => "r",
        'ल' | 'ळ' | 'ऴ' => "l",
        'व' => "v",
        'श' => "sh",
        'ष' => "Sh",
        'स' => "s",
        'ह' => "h",
        '\u{0958}' => "q",
        '\u{0959}' => "K",
        '\u{095A}' => "G",
        '\u{095B}' => "z",
        '\u{095C}' => ".D",
        '\u{095D}' => ".Dh",
        '\u{095E}' => "f",
        '\u{095F}' => "Y",
        _ => return None,
    })
}

const fn nukta_form(base: char) -> Option<&'static str> {
    Some(match base {
        'क' => "q",
        'ख' => "K",
        'ग' => "G",
        'ज' => "z",
        'ड' => ".D",
        'ढ' => ".Dh",
        'फ' => "f",
        'य' => "Y",
        _ => return None,
    })
}

const fn independent_vowel(c: char) -> Option<&'static str> {
    Some(match c {
        'अ' => "a",
        'आ' => "aa",
        'इ' => "i",
        'ई' => "ii",
        'उ' => "u",
        'ऊ' => "uu",
        'ऋ' => "R^i",
        'ॠ' => "R^I",
        'ऌ' => "L^i",
        'ए' | 'ऍ' | 'ऎ' => "e",
        'ऐ' => "ai",
        'ओ' | 'ऑ' | 'ऒ' => "o",
        'औ' => "au",
        _ => return None,
    })
}

const fn matra(c: char) -> Option<&'static str> {
    Some(match c {
        'ा' => "aa",
        'ि' => "i",
        'ी' => "ii",
        'ु' => "u",
        'ू' => "uu",
        'ृ' => "R^i",
        'ॄ' => "R^I",
        'े' | 'ॅ' | 'ॆ' => "e",
        'ै' => "ai",
        'ो' | 'ॉ' | 'ॊ' => "o",
        'ौ' => "au",
        _ => return None,
    })
}

const fn sign(c: char) -> Option<&'static str> {
    match c {
        'ं' => Some(".n"),
        'ँ' => Some(".N"),
        'ः' => Some("H"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transliterator() -> Transliterator {
        Transliterator::new(
            [("राम", "Ram"), ("सिंह", "Singh"), ("कृष्ण", "Krishna")]
                .map(|(h, l)| (h.to_string(), l.to_string())),
        )
    }

    #[test]
    fn drops_word_final_inherent_vowel() {
        let t = transliterator();
        assert_eq!(t.transliterate("रामपाल"), "Rampal");
        assert_eq!(t.transliterate("राजकुमार"), "Rajkumar");
        assert_eq!(t.transliterate("नगर"), "Nagar");
        assert_eq!(t.transliterate("मोहन"), "Mohan");
    }

    #[test]
    fn keeps_explicit_final_vowel() {
        let t = transliterator();
        assert_eq!(t.transliterate("सुनिता"), "Sunita");
        assert_eq!(t.transliterate("कमला"), "Kamla");
        assert_eq!(t.transliterate("शर्मा"), "Sharma");
    }

    #[test]
    fn romanizes_conjuncts_and_nasals() {
        let t = transliterator();
        assert_eq!(t.transliterate("कृष्णा"), "Krishna");
        assert_eq!(t.transliterate("संजय"), "Sanjay");
        assert_eq!(t.transliterate("प्रकाश"), "Prakash");
        assert_eq!(t.transliterate("मिश्र"), "Mishra");
    }

    #[test]
    fn collapses_long_vowels() {
        let t = transliterator();
        assert_eq!(t.transliterate("गीता"), "Gita");
        assert_eq!(t.transliterate("पूजा"), "Puja");
    }

    #[test]
    fn curated_name_is_returned_verbatim() {
        let t = transliterator();
        assert_eq!(t.transliterate("राम"), "Ram");
        assert_eq!(t.transliterate("कृष्ण"), "Krishna");
    }

    #[test]
    fn curated_words_apply_inside_compound_names() {
        let t = transliterator();
        assert_eq!(t.transliterate("रामपाल सिंह"), "Rampal Singh");
        assert_eq!(t.transliterate("राम मोहन"), "Ram Mohan");
    }

    #[test]
    fn handles_nukta_in_either_form() {
        let t = transliterator();
        assert_eq!(t.transliterate("ज़ाकिर"), "Zakir");
        assert_eq!(t.transliterate("\u{095B}ाकिर"), "Zakir");
    }

    #[test]
    fn strips_non_devanagari_input() {
        let t = transliterator();
        assert_eq!(t.transliterate("मोहन 42, (x)"), "Mohan");
        assert_eq!(t.transliterate("abc 123"), "");
        assert_eq!(t.transliterate(""), "");
    }

    #[test]
    fn output_is_plain_title_case() {
        let t = transliterator();
        let out = t.transliterate("ठाकुर चाँद डोगरा");
        assert!(
            out.chars().all(|c| c.is_ascii_alphabetic() || c == ' ' || c == '-'),
            "{out}"
        );
        for word in out.split(' ') {
            assert!(word.chars().next().is_some_and(char::is_uppercase), "{out}");
        }
        assert_eq!(out, "Thakur Chand Dogra");
    }

    #[test]
    fn transliteration_is_deterministic() {
        let t = transliterator();
        for name in ["राजकुमार", "सुनिता देवी", "कृष्णा", "उपाध्याय"] {
            assert_eq!(t.transliterate(name), t.transliterate(name));
        }
    }
}
