//! Phoneme classification shared by the analysis passes.

/// Vowel-bearing symbols. Anything else in the stream (consonants, spaces,
/// punctuation, untranslated text) counts as a non-vowel.
const VOWELS: &[char] = &[
    'a', 'e', 'i', 'o', 'u', 'æ', 'ɪ', 'ɛ', 'ɔ', 'ʊ', 'ʌ', 'ɜ', 'ə', 'ɒ', 'ɑ',
];

/// Two-symbol glides counted as a single nucleus.
const DIPHTHONGS: &[[char; 2]] = &[
    ['a', 'ɪ'],
    ['e', 'ɪ'],
    ['ɔ', 'ɪ'],
    ['a', 'ʊ'],
    ['o', 'ʊ'],
    ['ɪ', 'ə'],
    ['ɛ', 'ə'],
    ['ʊ', 'ə'],
];

/// Function words that never receive synthesized monosyllabic stress.
const UNSTRESSED_FUNCTION_WORDS: &[&str] = &[
    "A", "AN", "THE", "CAN", "DO", "DOES", "DID", "WILL", "WOULD", "SHALL", "SHOULD", "COULD",
    "HAVE", "HAS", "HAD", "IS", "ARE", "WAS", "WERE", "AM", "BE", "BEEN", "BEING", "TO", "OF",
    "FOR", "AT", "IN", "ON", "BY", "WITH", "FROM", "UP", "OUT", "OFF", "IT", "HE", "SHE", "WE",
    "YOU", "I", "AND", "OR", "BUT", "IF", "AS", "SO",
];

/// Plosives that can carry aspiration.
const VOICELESS_PLOSIVES: &[char] = &['p', 't', 'k'];

/// Approximants that still license aspiration on a preceding plosive.
const APPROXIMANTS: &[char] = &['r', 'w', 'j', 'l'];

pub fn is_vowel(c: char) -> bool {
    VOWELS.contains(&c)
}

pub fn is_voiceless_plosive(c: char) -> bool {
    VOICELESS_PLOSIVES.contains(&c)
}

pub fn is_approximant(c: char) -> bool {
    APPROXIMANTS.contains(&c)
}

/// Word separator used by the syllable and rule passes.
pub fn is_space(c: char) -> bool {
    c == ' '
}

/// Case-insensitive membership in the unstressed function-word list.
pub fn is_unstressed_function_word(word: &str) -> bool {
    let upper = word.to_uppercase();
    UNSTRESSED_FUNCTION_WORDS.contains(&upper.as_str())
}

/// Number of diphthong occurrences, matched left to right without overlap.
pub fn count_diphthongs(chars: &[char]) -> usize {
    let mut count = 0;
    let mut i = 0;
    while i + 1 < chars.len() {
        if DIPHTHONGS.contains(&[chars[i], chars[i + 1]]) {
            count += 1;
            i += 2;
        } else {
            i += 1;
        }
    }
    count
}

/// Syllable nuclei: vowel symbols minus diphthong glides.
pub fn count_nuclei(chars: &[char]) -> usize {
    let vowels = chars.iter().filter(|c| is_vowel(**c)).count();
    vowels.saturating_sub(count_diphthongs(chars))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn ipa_vowels_are_recognized() {
        for c in "aeiouæɪɛɔʊʌɜəɒɑ".chars() {
            assert!(is_vowel(c), "{c} should be a vowel");
        }
    }

    #[test]
    fn consonants_and_separators_are_not_vowels() {
        for c in "ptkbdgʃʒθðnmŋlrwjhɾʔ ,.'\u{0301}".chars() {
            assert!(!is_vowel(c), "{c:?} should not be a vowel");
        }
    }

    #[test]
    fn diphthongs_do_not_overlap() {
        // "aɪə" holds aɪ and ɪə, but only one can be taken left to right.
        assert_eq!(count_diphthongs(&chars("aɪə")), 1);
        assert_eq!(count_diphthongs(&chars("eɪaʊ")), 2);
        assert_eq!(count_diphthongs(&chars("kæt")), 0);
    }

    #[test]
    fn nuclei_fold_diphthongs() {
        assert_eq!(count_nuclei(&chars("taɪm")), 1);
        assert_eq!(count_nuclei(&chars("kæt")), 1);
        assert_eq!(count_nuclei(&chars("əbaʊt")), 2);
        assert_eq!(count_nuclei(&chars("bʌtn")), 1);
        assert_eq!(count_nuclei(&chars("ʃhh")), 0);
    }

    #[test]
    fn function_words_match_any_case() {
        assert!(is_unstressed_function_word("the"));
        assert!(is_unstressed_function_word("The"));
        assert!(is_unstressed_function_word("SHOULD"));
        assert!(!is_unstressed_function_word("cat"));
        assert!(!is_unstressed_function_word(""));
    }

    #[test]
    fn plosives_and_approximants() {
        assert!(is_voiceless_plosive('p'));
        assert!(is_voiceless_plosive('k'));
        assert!(!is_voiceless_plosive('b'));
        assert!(is_approximant('w'));
        assert!(!is_approximant('n'));
    }
}
