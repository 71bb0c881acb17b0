//! Phonological rules: flapping, glottal stops and aspiration.
//!
//! Each pass is a pure function over the plain stream. Precedence is expressed
//! by what the caller passes in as `excluding`: glottal detection never sees a
//! flapped /t/, aspiration never sees either.

use crate::phonetics::stress::SyllableRange;
use crate::phonetics::symbols::{is_approximant, is_space, is_vowel, is_voiceless_plosive};
use std::collections::{BTreeMap, BTreeSet};

/// Aspiration strength of a voiceless plosive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aspiration {
    Strong,
    Weak,
}

/// Result of the three rule passes for one conversion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationSet {
    pub flaps: BTreeSet<usize>,
    pub glottals: BTreeSet<usize>,
    pub aspiration: BTreeMap<usize, Aspiration>,
}

/// Nearest character before `index` that is not a space.
fn prev_non_space(chars: &[char], index: usize) -> Option<char> {
    chars[..index].iter().rev().copied().find(|c| !is_space(*c))
}

/// Nearest character after `index` that is not a space.
fn next_non_space(chars: &[char], index: usize) -> Option<char> {
    chars.get(index + 1..)?.iter().copied().find(|c| !is_space(*c))
}

fn in_any_range(ranges: &[SyllableRange], index: usize) -> bool {
    ranges.iter().any(|r| r.contains(index))
}

/// Intervocalic /t/ before an unstressed vowel becomes a tap.
///
/// The left neighbour may also be /r/ ("party"). Neighbours are looked up
/// across spaces so a word-final /t/ before a vowel-initial word can flap.
pub fn detect_flaps(chars: &[char], ranges: &[SyllableRange]) -> BTreeSet<usize> {
    let mut flaps = BTreeSet::new();
    for (i, &c) in chars.iter().enumerate() {
        if c != 't' {
            continue;
        }
        let prev_ok = prev_non_space(chars, i).is_some_and(|p| is_vowel(p) || p == 'r');
        let next_ok = next_non_space(chars, i).is_some_and(is_vowel);
        if !(prev_ok && next_ok) {
            continue;
        }
        let next_vowel = (i + 1..chars.len())
            .find(|&j| is_vowel(chars[j]))
            .unwrap_or(chars.len());
        if !in_any_range(ranges, next_vowel) {
            flaps.insert(i);
        }
    }
    flaps
}

/// Glottal realizations of /t/, skipping anything in `flaps`.
pub fn detect_glottal_stops(chars: &[char], flaps: &BTreeSet<usize>) -> BTreeSet<usize> {
    (0..chars.len())
        .filter(|&i| chars[i] == 't' && !flaps.contains(&i))
        .filter(|&i| glottal_rule(chars, i).is_some())
        .collect()
}

/// Which glottal-stop context applies to the /t/ at `i`, first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlottalContext {
    /// "button": before a syllabic /n/.
    SyllabicN,
    /// "settle": before a word-final syllabic /l/.
    SyllabicL,
    /// "atmosphere": before /m/.
    BeforeM,
    /// "that book": word-final before a consonant.
    WordFinalBeforeConsonant,
    /// Nothing follows at all.
    EndOfStream,
    /// "winter": after /n/ before a consonant, within one word.
    AfterN,
    /// "quartz": after /r/ before a consonant, within one word.
    AfterR,
}

pub fn glottal_rule(chars: &[char], i: usize) -> Option<GlottalContext> {
    let len = chars.len();
    let at = |j: usize| chars.get(j).copied();
    let prev = prev_non_space(chars, i);
    let next = next_non_space(chars, i);

    // 1. Syllabic /n/ directly after the /t/, nothing vowel-bearing after it.
    if at(i + 1) == Some('n') && !at(i + 2).is_some_and(is_vowel) {
        return Some(GlottalContext::SyllabicN);
    }

    // 2. Syllabic /l/ at the end of the word.
    if at(i + 1) == Some('l') && at(i + 2).is_none_or(is_space) {
        return Some(GlottalContext::SyllabicL);
    }

    // 3. Before /m/.
    if next == Some('m') {
        return Some(GlottalContext::BeforeM);
    }

    // 4. Word-final: the consonant run after the /t/ ends at a space or the
    //    end of the stream.
    if let (Some(_), Some(n)) = (prev, next)
        && !is_vowel(n)
        && n != 'h'
    {
        if at(i + 1).is_none_or(is_space) {
            return Some(GlottalContext::WordFinalBeforeConsonant);
        }
        let run_end = (i + 1..len)
            .find(|&j| is_vowel(chars[j]) || is_space(chars[j]))
            .unwrap_or(len);
        if run_end == len || is_space(chars[run_end]) {
            return Some(GlottalContext::WordFinalBeforeConsonant);
        }
    }

    // 5. End of stream.
    if next.is_none() {
        return Some(GlottalContext::EndOfStream);
    }

    // 6./7. After /n/ or /r/ in the same word, before a consonant.
    let same_word_prev = i.checked_sub(1).map(|j| chars[j]).filter(|c| !is_space(*c));
    if next.is_some_and(|n| !is_vowel(n)) {
        match same_word_prev {
            Some('n') => return Some(GlottalContext::AfterN),
            Some('r') => return Some(GlottalContext::AfterR),
            _ => {}
        }
    }

    None
}

/// Aspiration of /p t k/, skipping positions in `flaps` or `glottals`.
pub fn detect_aspiration(
    chars: &[char],
    ranges: &[SyllableRange],
    flaps: &BTreeSet<usize>,
    glottals: &BTreeSet<usize>,
) -> BTreeMap<usize, Aspiration> {
    chars
        .iter()
        .enumerate()
        .filter(|(i, c)| is_voiceless_plosive(**c) && !flaps.contains(i) && !glottals.contains(i))
        .filter_map(|(i, _)| aspiration_at(chars, i, ranges).map(|a| (i, a)))
        .collect()
}

/// Aspiration strength of the plosive at `i`, `None` when unaspirated.
pub fn aspiration_at(chars: &[char], i: usize, ranges: &[SyllableRange]) -> Option<Aspiration> {
    let prev = prev_non_space(chars, i);
    if prev == Some('s') {
        return None;
    }

    let next = next_non_space(chars, i)?;
    if !is_vowel(next) && !is_approximant(next) {
        return None;
    }

    // Onset of the syllable holding this plosive: back up over consonants.
    let mut onset = i;
    while onset > 0 && !is_vowel(chars[onset - 1]) && !is_space(chars[onset - 1]) {
        onset -= 1;
    }
    if ranges.iter().any(|r| r.start == onset) {
        return Some(Aspiration::Strong);
    }

    let word_initial = i == 0 || is_space(chars[i - 1]);
    if word_initial {
        return Some(Aspiration::Strong);
    }

    Some(Aspiration::Weak)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phonetics::stress::PhonemeStream;

    fn analyze(marked: &str) -> (Vec<char>, Vec<SyllableRange>) {
        let stream = PhonemeStream::from_marked(marked);
        let ranges = stream.syllable_ranges();
        (stream.chars, ranges)
    }

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn intervocalic_t_before_unstressed_vowel_flaps() {
        // bʌ́tər: t sits between ʌ and an unstressed ə.
        let (c, r) = analyze("bʌ\u{0301}tər");
        assert_eq!(detect_flaps(&c, &r), BTreeSet::from([2]));
    }

    #[test]
    fn t_before_stressed_vowel_does_not_flap() {
        let (c, r) = analyze("ətæ\u{0301}k");
        assert!(detect_flaps(&c, &r).is_empty());
    }

    #[test]
    fn flap_after_r() {
        let (c, r) = analyze("pɑ\u{0301}rti");
        assert_eq!(detect_flaps(&c, &r), BTreeSet::from([3]));
    }

    #[test]
    fn flap_across_word_boundary() {
        let (c, r) = analyze("gɛ\u{0301}t ɪt");
        assert_eq!(detect_flaps(&c, &r), BTreeSet::from([2]));
    }

    #[test]
    fn no_flap_next_to_consonant() {
        let (c, r) = analyze("stɑ\u{0301}p");
        assert!(detect_flaps(&c, &r).is_empty());
    }

    #[test]
    fn glottal_before_syllabic_n() {
        let c = chars("bʌtn");
        assert_eq!(glottal_rule(&c, 2), Some(GlottalContext::SyllabicN));
        let c = chars("bʌtn.");
        assert_eq!(glottal_rule(&c, 2), Some(GlottalContext::SyllabicN));
    }

    #[test]
    fn no_syllabic_n_when_vowel_follows() {
        let c = chars("ətnɪ");
        assert_ne!(glottal_rule(&c, 1), Some(GlottalContext::SyllabicN));
    }

    #[test]
    fn glottal_before_word_final_l() {
        let c = chars("sɛtl ɪt");
        assert_eq!(glottal_rule(&c, 2), Some(GlottalContext::SyllabicL));
    }

    #[test]
    fn glottal_before_m() {
        let c = chars("ætməs");
        assert_eq!(glottal_rule(&c, 1), Some(GlottalContext::BeforeM));
    }

    #[test]
    fn glottal_word_final_before_consonant_word() {
        let c = chars("ðæt bʊk");
        assert_eq!(
            glottal_rule(&c, 2),
            Some(GlottalContext::WordFinalBeforeConsonant)
        );
    }

    #[test]
    fn glottal_word_final_cluster_at_stream_end() {
        let c = chars("tʃæptɚ");
        assert_eq!(
            glottal_rule(&c, 4),
            Some(GlottalContext::WordFinalBeforeConsonant)
        );
    }

    #[test]
    fn glottal_at_end_of_stream() {
        let c = chars("kæt");
        assert_eq!(glottal_rule(&c, 2), Some(GlottalContext::EndOfStream));
    }

    #[test]
    fn no_glottal_before_vowel_initial_word() {
        let c = chars("ðæt æpl");
        assert_eq!(glottal_rule(&c, 2), None);
    }

    #[test]
    fn no_glottal_before_h() {
        let c = chars("ðæt hæt");
        assert_eq!(glottal_rule(&c, 2), None);
    }

    #[test]
    fn glottal_after_n_within_word() {
        let c = chars("wɪntrɪ");
        assert_eq!(glottal_rule(&c, 3), Some(GlottalContext::AfterN));
    }

    #[test]
    fn after_n_rule_does_not_cross_words() {
        let c = chars("ɪn trɪ");
        assert_eq!(glottal_rule(&c, 3), None);
    }

    #[test]
    fn glottal_after_r_within_word() {
        let c = chars("kwɔrtrɪ");
        assert_eq!(glottal_rule(&c, 4), Some(GlottalContext::AfterR));
    }

    #[test]
    fn glottal_skips_flapped_positions() {
        let c = chars("kæt");
        let flaps = BTreeSet::from([2]);
        assert!(detect_glottal_stops(&c, &flaps).is_empty());
    }

    #[test]
    fn aspiration_strong_word_initial() {
        let (c, r) = analyze("pɪn");
        assert_eq!(aspiration_at(&c, 0, &r), Some(Aspiration::Strong));
    }

    #[test]
    fn aspiration_none_after_s() {
        let (c, r) = analyze("spɪn");
        assert_eq!(aspiration_at(&c, 1, &r), None);
    }

    #[test]
    fn aspiration_none_before_obstruent() {
        let (c, r) = analyze("æpt");
        assert_eq!(aspiration_at(&c, 1, &r), None);
    }

    #[test]
    fn aspiration_none_at_stream_end() {
        let (c, r) = analyze("kʌp");
        assert_eq!(aspiration_at(&c, 2, &r), None);
    }

    #[test]
    fn aspiration_strong_at_stressed_onset() {
        // əpɪ́r: p is the onset of the stressed syllable.
        let (c, r) = analyze("əpɪ\u{0301}r");
        assert_eq!(aspiration_at(&c, 1, &r), Some(Aspiration::Strong));
    }

    #[test]
    fn aspiration_weak_in_unstressed_medial_onset() {
        let (c, r) = analyze("hæ\u{0301}pi");
        assert_eq!(aspiration_at(&c, 2, &r), Some(Aspiration::Weak));
    }

    #[test]
    fn aspiration_before_approximant() {
        let (c, r) = analyze("trɪ\u{0301}p");
        assert_eq!(aspiration_at(&c, 0, &r), Some(Aspiration::Strong));
    }

    #[test]
    fn aspiration_skips_claimed_positions() {
        let (c, r) = analyze("tɪ\u{0301}kɪt");
        let flaps = BTreeSet::from([0]);
        let glottals = BTreeSet::from([2]);
        let aspiration = detect_aspiration(&c, &r, &flaps, &glottals);
        assert!(!aspiration.contains_key(&0));
        assert!(!aspiration.contains_key(&2));
    }

    #[test]
    fn glottal_and_flap_sets_are_disjoint() {
        let (c, r) = analyze("bʌ\u{0301}tər ɪz ə kæ\u{0301}t ɪn ðə wɪ\u{0301}ntər");
        let flaps = detect_flaps(&c, &r);
        let glottals = detect_glottal_stops(&c, &flaps);
        assert!(flaps.is_disjoint(&glottals));
        assert!(!flaps.is_empty());
    }
}
