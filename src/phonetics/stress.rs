//! Stress and syllable analysis.
//!
//! Splits resolved transcriptions into a plain stream plus a side table of
//! stressed positions, then derives the syllable around each stressed vowel.
//! Text copied through verbatim is appended as is, combining marks included.
//! Every index produced here addresses the plain stream.

use crate::defaults::STRESS_DIACRITIC;
use crate::phonetics::symbols::{is_space, is_vowel};
use std::collections::BTreeSet;

/// Inclusive bounds of a stressed syllable in the plain stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyllableRange {
    pub start: usize,
    pub end: usize,
}

impl SyllableRange {
    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }
}

/// A chapter's phoneme stream with stress diacritics removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhonemeStream {
    /// Plain characters, no stress diacritics.
    pub chars: Vec<char>,
    /// Plain indices that carried a stress diacritic.
    pub stressed: BTreeSet<usize>,
    /// Plain index → index in the diacritic-bearing stream.
    pub source_offsets: Vec<usize>,
    /// Characters of the diacritic-bearing stream consumed so far.
    source_len: usize,
}

impl PhonemeStream {
    /// Build a stream from a single transcription.
    pub fn from_marked(marked: &str) -> Self {
        let mut stream = Self::default();
        stream.push_marked(marked);
        stream
    }

    /// Append a transcription, moving its stress diacritics into the side table.
    ///
    /// A diacritic marks the character before it within `marked`. One at the
    /// start of `marked` has nothing to attach to and is dropped.
    pub fn push_marked(&mut self, marked: &str) {
        let first = self.chars.len();
        for c in marked.chars() {
            let source_index = self.source_len;
            self.source_len += 1;
            if c == STRESS_DIACRITIC {
                if self.chars.len() > first {
                    self.stressed.insert(self.chars.len() - 1);
                }
            } else {
                self.chars.push(c);
                self.source_offsets.push(source_index);
            }
        }
    }

    /// Append text that is not a transcription. Nothing in it is read as stress.
    pub fn push_verbatim(&mut self, text: &str) {
        for c in text.chars() {
            self.chars.push(c);
            self.source_offsets.push(self.source_len);
            self.source_len += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn plain(&self) -> String {
        self.chars.iter().collect()
    }

    /// One syllable range per stressed position, in stream order.
    pub fn syllable_ranges(&self) -> Vec<SyllableRange> {
        self.stressed
            .iter()
            .map(|&v| SyllableRange {
                start: syllable_start(&self.chars, v),
                end: syllable_end(&self.chars, v),
            })
            .collect()
    }
}

/// First index of the word containing `index`.
fn word_start(chars: &[char], index: usize) -> usize {
    let mut start = index;
    while start > 0 && !is_space(chars[start - 1]) {
        start -= 1;
    }
    start
}

/// Last index of the word containing `index`.
fn word_end(chars: &[char], index: usize) -> usize {
    let mut end = index;
    while end + 1 < chars.len() && !is_space(chars[end + 1]) {
        end += 1;
    }
    end
}

/// Start of the syllable whose nucleus is at `vowel`.
///
/// A single consonant between the previous vowel and `vowel` is taken as the
/// onset. With two or more, the first one stays behind as the previous coda.
pub fn syllable_start(chars: &[char], vowel: usize) -> usize {
    if vowel == 0 {
        return 0;
    }
    let start = word_start(chars, vowel);
    let previous_vowel = (start..vowel).rev().find(|&i| is_vowel(chars[i]));
    match previous_vowel {
        Some(prev) => {
            let consonants = vowel - prev - 1;
            if consonants <= 1 { prev + 1 } else { prev + 2 }
        }
        None => start,
    }
}

/// End of the syllable whose nucleus is at `vowel`.
///
/// Mirror of [`syllable_start`]: a single consonant before the next vowel
/// belongs to that vowel's onset, otherwise the first consonant is our coda.
pub fn syllable_end(chars: &[char], vowel: usize) -> usize {
    let end = word_end(chars, vowel);
    let next_vowel = (vowel + 1..=end).find(|&i| is_vowel(chars[i]));
    match next_vowel {
        Some(next) => {
            let consonants = next - vowel - 1;
            if consonants <= 1 { vowel } else { vowel + 1 }
        }
        None => end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const S: char = STRESS_DIACRITIC;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn diacritics_are_stripped_into_side_table() {
        let stream = PhonemeStream::from_marked(&format!("tʃæ{S}ptər"));
        assert_eq!(stream.plain(), "tʃæptər");
        assert_eq!(stream.stressed.iter().copied().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn source_offsets_skip_diacritics() {
        let stream = PhonemeStream::from_marked(&format!("ka{S}t a{S}t"));
        assert_eq!(stream.plain(), "kat at");
        assert_eq!(stream.source_offsets, vec![0, 1, 3, 4, 5, 7]);
        assert_eq!(stream.stressed.iter().copied().collect::<Vec<_>>(), vec![1, 4]);
    }

    #[test]
    fn leading_diacritic_is_dropped() {
        let stream = PhonemeStream::from_marked(&format!("{S}at"));
        assert_eq!(stream.plain(), "at");
        assert!(stream.stressed.is_empty());
    }

    #[test]
    fn verbatim_text_keeps_combining_acute() {
        let mut stream = PhonemeStream::default();
        stream.push_verbatim(&format!("cafe{S} "));
        stream.push_marked(&format!("{S}ka{S}t"));
        assert_eq!(stream.plain(), format!("cafe{S} kat"));
        assert_eq!(stream.stressed.iter().copied().collect::<Vec<_>>(), vec![7]);
        assert_eq!(stream.source_offsets, vec![0, 1, 2, 3, 4, 5, 7, 8, 10]);
    }

    #[test]
    fn syllable_without_previous_vowel_starts_at_word_start() {
        let c = chars("hi strɪŋ");
        assert_eq!(syllable_start(&c, 6), 3);
    }

    #[test]
    fn single_consonant_is_onset() {
        // ə-tæk: the t joins the stressed syllable.
        let c = chars("ətæk");
        assert_eq!(syllable_start(&c, 2), 1);
    }

    #[test]
    fn consonant_cluster_leaves_first_behind() {
        // æ-p|t-ər: with two consonants the syllable starts after the p.
        let c = chars("tʃæptər");
        assert_eq!(syllable_start(&c, 5), 4);
    }

    #[test]
    fn adjacent_vowels_start_at_vowel() {
        let c = chars("əbaʊt");
        assert_eq!(syllable_start(&c, 3), 3);
    }

    #[test]
    fn syllable_end_before_single_consonant() {
        let c = chars("bʌtər");
        assert_eq!(syllable_end(&c, 1), 1);
    }

    #[test]
    fn syllable_end_keeps_first_cluster_consonant() {
        let c = chars("tʃæptər");
        assert_eq!(syllable_end(&c, 2), 3);
    }

    #[test]
    fn syllable_end_defaults_to_word_end() {
        let c = chars("kæts ɪn");
        assert_eq!(syllable_end(&c, 1), 3);
    }

    #[test]
    fn ranges_follow_stressed_positions() {
        let stream = PhonemeStream::from_marked(&format!("ətæ{S}k"));
        assert_eq!(
            stream.syllable_ranges(),
            vec![SyllableRange { start: 1, end: 3 }]
        );
    }

    #[test]
    fn range_contains_is_inclusive() {
        let range = SyllableRange { start: 2, end: 4 };
        assert!(!range.contains(1));
        assert!(range.contains(2));
        assert!(range.contains(4));
        assert!(!range.contains(5));
    }
}
