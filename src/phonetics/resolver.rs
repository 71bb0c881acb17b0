//! Word resolver: turns chapter text into one diacritic-bearing phoneme stream.
//!
//! Text is split into word and separator tokens. Words found in the lexicon
//! are replaced by their normalized transcription; everything else, separators
//! included, is copied through verbatim. Only transcriptions contribute stress.

use crate::defaults::STRESS_DIACRITIC;
use crate::phonetics::normalizer::normalize;
use crate::phonetics::stress::PhonemeStream;
use crate::phonetics::symbols::{count_nuclei, is_unstressed_function_word, is_vowel};
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

/// Read-only word → raw transcription lookup.
///
/// Keys are uppercase word forms.
pub trait Lexicon {
    fn transcription(&self, upper_word: &str) -> Option<&str>;
}

impl Lexicon for HashMap<String, String> {
    fn transcription(&self, upper_word: &str) -> Option<&str> {
        self.get(upper_word).map(String::as_str)
    }
}

/// A run of word characters or a run of everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Word(&'a str),
    Separator(&'a str),
}

/// ASCII letters, digits and underscore.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Split at every word/non-word boundary. Concatenating the tokens gives back
/// the input exactly.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut current: Option<bool> = None;

    for (i, c) in text.char_indices() {
        let word = is_word_char(c);
        match current {
            Some(kind) if kind != word => {
                tokens.push(make_token(&text[start..i], kind));
                start = i;
            }
            _ => {}
        }
        current = Some(word);
    }
    if let Some(kind) = current {
        tokens.push(make_token(&text[start..], kind));
    }
    tokens
}

fn make_token(s: &str, word: bool) -> Token<'_> {
    if word { Token::Word(s) } else { Token::Separator(s) }
}

/// Why a dictionary entry could not be used.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranscriptionError {
    #[error("transcription is empty after normalization")]
    Empty,
    #[error("transcription contains undecodable character {0:?}")]
    Undecodable(char),
}

/// Normalize a raw entry and reject results that cannot be rendered.
pub fn transcribe(raw: &str) -> Result<String, TranscriptionError> {
    let ipa = normalize(raw);
    if ipa.trim().is_empty() {
        return Err(TranscriptionError::Empty);
    }
    if let Some(bad) = ipa.chars().find(|c| *c == '\u{fffd}' || c.is_control()) {
        return Err(TranscriptionError::Undecodable(bad));
    }
    Ok(ipa)
}

/// Whether a canonical transcription has exactly one syllable nucleus.
pub fn is_monosyllabic(ipa: &str) -> bool {
    let chars: Vec<char> = ipa.chars().collect();
    count_nuclei(&chars) == 1
}

/// Stress the only vowel of a monosyllable that the dictionary left bare.
///
/// Function words stay unstressed whatever their transcription looks like.
pub fn add_monosyllabic_stress(ipa: &str, word: &str) -> String {
    if is_unstressed_function_word(word)
        || ipa.contains(STRESS_DIACRITIC)
        || !is_monosyllabic(ipa)
    {
        return ipa.to_string();
    }
    let Some((pos, vowel)) = ipa.char_indices().find(|(_, c)| is_vowel(*c)) else {
        return ipa.to_string();
    };
    let split = pos + vowel.len_utf8();
    let mut out = String::with_capacity(ipa.len() + STRESS_DIACRITIC.len_utf8());
    out.push_str(&ipa[..split]);
    out.push(STRESS_DIACRITIC);
    out.push_str(&ipa[split..]);
    out
}

/// Counters gathered while resolving a text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolveReport {
    /// Word tokens seen.
    pub words: usize,
    /// Words replaced by a transcription.
    pub resolved: usize,
    /// Words absent from the lexicon.
    pub missing: usize,
    /// Words whose entry was unusable and fell back to the original token.
    pub fallbacks: usize,
    /// Distinct uppercase forms of missing words.
    pub missing_words: BTreeSet<String>,
}

impl ResolveReport {
    pub fn merge(&mut self, other: &ResolveReport) {
        self.words += other.words;
        self.resolved += other.resolved;
        self.missing += other.missing;
        self.fallbacks += other.fallbacks;
        self.missing_words
            .extend(other.missing_words.iter().cloned());
    }
}

/// A whole text after word resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedText {
    /// Diacritic-bearing stream: transcriptions with their stress marks,
    /// everything else as it appeared in the input.
    pub marked: String,
    /// `marked` with stress split off the transcriptions only.
    pub stream: PhonemeStream,
    pub report: ResolveReport,
}

impl ResolvedText {
    fn push_verbatim(&mut self, text: &str) {
        self.marked.push_str(text);
        self.stream.push_verbatim(text);
    }

    fn push_transcription(&mut self, ipa: &str) {
        self.marked.push_str(ipa);
        self.stream.push_marked(ipa);
    }
}

/// Resolve every word of `text` against `lexicon`.
pub fn resolve(text: &str, lexicon: &dyn Lexicon) -> ResolvedText {
    let mut resolved = ResolvedText {
        marked: String::with_capacity(text.len() * 2),
        ..ResolvedText::default()
    };

    for token in tokenize(text) {
        let word = match token {
            Token::Separator(s) => {
                resolved.push_verbatim(s);
                continue;
            }
            Token::Word(w) => w,
        };
        resolved.report.words += 1;

        let upper = word.to_uppercase();
        let Some(raw) = lexicon.transcription(&upper) else {
            resolved.report.missing += 1;
            resolved.report.missing_words.insert(upper);
            resolved.push_verbatim(word);
            continue;
        };

        match transcribe(raw) {
            Ok(ipa) => {
                resolved.report.resolved += 1;
                resolved.push_transcription(&add_monosyllabic_stress(&ipa, word));
            }
            Err(_) => {
                resolved.report.fallbacks += 1;
                resolved.push_verbatim(word);
            }
        }
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    const S: char = STRESS_DIACRITIC;

    fn lexicon(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn tokenize_preserves_separators() {
        let tokens = tokenize("Hello, world!");
        assert_eq!(
            tokens,
            vec![
                Token::Word("Hello"),
                Token::Separator(", "),
                Token::Word("world"),
                Token::Separator("!"),
            ]
        );
    }

    #[test]
    fn tokenize_splits_contractions() {
        let tokens = tokenize("don't");
        assert_eq!(
            tokens,
            vec![Token::Word("don"), Token::Separator("'"), Token::Word("t")]
        );
    }

    #[test]
    fn tokenize_round_trips_non_ascii() {
        let text = "  café — naïve\n\n12_3 ";
        let joined: String = tokenize(text)
            .iter()
            .map(|t| match t {
                Token::Word(s) | Token::Separator(s) => *s,
            })
            .collect();
        assert_eq!(joined, text);
    }

    #[test]
    fn tokenize_empty_text() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn monosyllable_gets_stress_after_first_vowel() {
        assert_eq!(add_monosyllabic_stress("kæt", "cat"), format!("kæ{S}t"));
        assert_eq!(add_monosyllabic_stress("taɪm", "time"), format!("ta{S}ɪm"));
    }

    #[test]
    fn function_words_never_get_stress() {
        for (ipa, word) in [("ðə", "the"), ("kæn", "can"), ("ɪt", "It"), ("soʊ", "so")] {
            assert_eq!(add_monosyllabic_stress(ipa, word), ipa, "{word}");
        }
    }

    #[test]
    fn existing_stress_is_kept() {
        let ipa = format!("kæ{S}t");
        assert_eq!(add_monosyllabic_stress(&ipa, "cat"), ipa);
    }

    #[test]
    fn polysyllables_are_left_alone() {
        assert_eq!(add_monosyllabic_stress("bʌtər", "butter"), "bʌtər");
    }

    #[test]
    fn vowelless_transcription_is_left_alone() {
        assert_eq!(add_monosyllabic_stress("ʃː", "shh"), "ʃː");
    }

    #[test]
    fn resolve_replaces_known_words_and_keeps_punctuation() {
        let lex = lexicon(&[("CAT", "kæt"), ("SAT", "sæt")]);
        let out = resolve("The cat sat.", &lex);
        assert_eq!(out.marked, format!("The kæ{S}t sæ{S}t."));
        assert_eq!(out.report.words, 3);
        assert_eq!(out.report.resolved, 2);
        assert_eq!(out.report.missing, 1);
        assert!(out.report.missing_words.contains("THE"));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let lex = lexicon(&[("CAT", "kæt")]);
        assert_eq!(resolve("CaT", &lex).marked, format!("kæ{S}t"));
    }

    #[test]
    fn missing_words_keep_original_case() {
        let lex = lexicon(&[]);
        assert_eq!(resolve("McGregor's Farm", &lex).marked, "McGregor's Farm");
    }

    #[test]
    fn combining_acute_in_untranslated_text_is_not_stress() {
        let lex = lexicon(&[("CAT", "kæt")]);
        let out = resolve(&format!("cafe{S} cat"), &lex);
        assert_eq!(out.stream.plain(), format!("cafe{S} kæt"));
        assert_eq!(out.stream.stressed.iter().copied().collect::<Vec<_>>(), vec![7]);
        assert_eq!(out.report.missing, 1);
    }

    #[test]
    fn precomposed_stressed_entry_carries_stress() {
        let lex = lexicon(&[("ABOUT", "əbáʊt")]);
        let out = resolve("about", &lex);
        assert_eq!(out.stream.plain(), "əbaʊt");
        assert_eq!(out.stream.stressed.iter().copied().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn malformed_entry_falls_back_to_word() {
        let lex = lexicon(&[("BAD", "Ì"), ("UGLY", "a\u{fffd}b"), ("CAT", "kæt")]);
        let out = resolve("bad ugly cat", &lex);
        assert_eq!(out.marked, format!("bad ugly kæ{S}t"));
        assert_eq!(out.report.fallbacks, 2);
        assert_eq!(out.report.resolved, 1);
    }

    #[test]
    fn mojibake_entries_are_normalized() {
        let lex = lexicon(&[("BACK", "bÃ¦k")]);
        assert_eq!(resolve("back", &lex).marked, format!("bæ{S}k"));
    }

    #[test]
    fn transcribe_rejects_empty() {
        assert_eq!(transcribe("  "), Err(TranscriptionError::Empty));
    }

    #[test]
    fn report_merge_adds_counts() {
        let mut a = ResolveReport {
            words: 2,
            resolved: 1,
            missing: 1,
            fallbacks: 0,
            missing_words: BTreeSet::from(["X".to_string()]),
        };
        let b = ResolveReport {
            words: 3,
            resolved: 1,
            missing: 1,
            fallbacks: 1,
            missing_words: BTreeSet::from(["Y".to_string()]),
        };
        a.merge(&b);
        assert_eq!(a.words, 5);
        assert_eq!(a.fallbacks, 1);
        assert_eq!(a.missing_words.len(), 2);
    }
}
