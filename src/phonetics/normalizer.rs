//! Transcription normalizer.
//!
//! Dictionary dumps carry IPA that was UTF-8 encoded, decoded as
//! Windows-1252 and re-encoded, so `ə` shows up as `É™`. The table below maps
//! those sequences back to single codepoints. Entries are applied in order and
//! every pattern comes before any shorter pattern it contains.
//!
//! The result is canonically decomposed, so a precomposed stressed vowel such
//! as `á` reaches the stress pass as `a` followed by the combining acute.

use unicode_normalization::UnicodeNormalization;

/// Broken sequence → canonical replacement.
const SUBSTITUTIONS: &[(&str, &str)] = &[
    // Combining acute (CC 81) whose second byte survived as a C1 control.
    ("Ì\u{0081}", "\u{0301}"),
    // A combining mark whose continuation byte was undecodable.
    ("Ì\u{fffd}", ""),
    // Glides with a broken stress byte between the two halves.
    ("aÌÊŠ", "aʊ"),
    ("oÌÊŠ", "oʊ"),
    // Open-mid back rounded with a trailing broken caron.
    ("É\"ÌŒ", "ɔ"),
    ("É\u{201d}ÌŒ", "ɔ"),
    // Vowels followed by the lead byte of a broken combining mark.
    ("Ã¦Ì", "æ"),
    ("É™Ì", "ə"),
    ("ÉªÌ", "ɪ"),
    ("ÉžÌ", "ɾ"),
    ("ÉœÌ", "ɜ"),
    ("eÌª", "eɪ"),
    ("aÉª", "aɪ"),
    // Single symbols.
    ("Ã¦", "æ"),
    ("É™", "ə"),
    ("Éª", "ɪ"),
    ("É\u{2018}", "ɑ"),
    ("É'", "ɑ"),
    ("É\u{2019}", "ɒ"),
    ("É\"", "ɒ"),
    ("É\u{201d}", "ɔ"),
    ("Ê\u{0192}", "ʃ"),
    ("Ê'", "ʃ"),
    ("Ê\u{2019}", "ʒ"),
    ("Ê\"", "ʒ"),
    ("É¾", "ɾ"),
    ("Éž", "ɾ"),
    ("Éœ", "ɜ"),
    ("ÊŠ", "ʊ"),
    ("Ê\u{2039}", "ʋ"),
    ("ÊŒ", "ʌ"),
    ("É›", "ɛ"),
    ("Å‹", "ŋ"),
    ("Î¸", "θ"),
    ("Ã°", "ð"),
];

/// Lead byte of a broken two-byte combining mark.
const BROKEN_COMBINING_LEAD: char = 'Ì';

/// C1 control characters only appear as leftovers of broken decoding.
fn is_c1_control(c: char) -> bool {
    ('\u{0080}'..='\u{009f}').contains(&c)
}

/// Decode a raw dictionary entry into canonical IPA.
///
/// Unmapped sequences pass through untouched; the canonical stress diacritic
/// is preserved.
pub fn normalize(raw: &str) -> String {
    let mut text = raw.to_string();
    for (broken, fixed) in SUBSTITUTIONS {
        if text.contains(broken) {
            text = text.replace(broken, fixed);
        }
    }
    // Stripped before decomposing: `Ì` itself decomposes to I + U+0300.
    text.retain(|c| c != BROKEN_COMBINING_LEAD && !is_c1_control(c));
    text.nfd().collect()
}
