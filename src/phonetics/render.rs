//! Markup renderer.
//!
//! One forward pass over the plain stream. Symbol substitutions are applied
//! in place; stress emphasis and aspiration are written through a [`Markup`]
//! back-end so the same pass serves HTML, terminals and plain text.

use crate::defaults::{
    FLAP_SYMBOL, GLOTTAL_STOP_SYMBOL, STRESS_GLYPH, STRESS_STYLE, STRONG_ASPIRATION_COLOR,
    WEAK_ASPIRATION_COLOR,
};
use crate::phonetics::options::StressMode;
use crate::phonetics::rules::{AnnotationSet, Aspiration};
use crate::phonetics::stress::SyllableRange;
use crate::phonetics::symbols::is_space;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Span markers for one output format.
///
/// Stress spans always enclose aspiration spans, never the reverse, so a
/// back-end can close an aspiration span without disturbing an open stress
/// span.
pub trait Markup: Send + Sync {
    fn open_stress(&self, out: &mut String);
    fn close_stress(&self, out: &mut String);
    fn open_aspiration(&self, strength: Aspiration, out: &mut String);
    fn close_aspiration(&self, out: &mut String);

    /// Emit one literal character. Back-ends that need escaping override this.
    fn write_char(&self, c: char, out: &mut String) {
        out.push(c);
    }

    fn name(&self) -> &'static str;
}

/// Inline-styled HTML spans.
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlMarkup {
    pub stress_style: String,
    pub strong_aspiration_color: String,
    pub weak_aspiration_color: String,
}

impl Default for HtmlMarkup {
    fn default() -> Self {
        Self {
            stress_style: STRESS_STYLE.to_string(),
            strong_aspiration_color: STRONG_ASPIRATION_COLOR.to_string(),
            weak_aspiration_color: WEAK_ASPIRATION_COLOR.to_string(),
        }
    }
}

impl Markup for HtmlMarkup {
    fn open_stress(&self, out: &mut String) {
        out.push_str(&format!("<span style=\"{}\">", self.stress_style));
    }

    fn close_stress(&self, out: &mut String) {
        out.push_str("</span>");
    }

    fn open_aspiration(&self, strength: Aspiration, out: &mut String) {
        let color = match strength {
            Aspiration::Strong => &self.strong_aspiration_color,
            Aspiration::Weak => &self.weak_aspiration_color,
        };
        out.push_str(&format!(
            "<span style=\"text-decoration: underline; text-decoration-color: {color}; text-decoration-thickness: 2px;\">"
        ));
    }

    fn close_aspiration(&self, out: &mut String) {
        out.push_str("</span>");
    }

    fn write_char(&self, c: char, out: &mut String) {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }

    fn name(&self) -> &'static str {
        "html"
    }
}

const BOLD: &str = "\x1b[1m";
const BOLD_OFF: &str = "\x1b[22m";
const UNDERLINE_RED: &str = "\x1b[4;31m";
const UNDERLINE_YELLOW: &str = "\x1b[4;33m";
// Underline off + default foreground; leaves bold untouched.
const UNDERLINE_OFF: &str = "\x1b[24;39m";

/// ANSI escape sequences for terminal output.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnsiMarkup;

impl Markup for AnsiMarkup {
    fn open_stress(&self, out: &mut String) {
        out.push_str(BOLD);
    }

    fn close_stress(&self, out: &mut String) {
        out.push_str(BOLD_OFF);
    }

    fn open_aspiration(&self, strength: Aspiration, out: &mut String) {
        out.push_str(match strength {
            Aspiration::Strong => UNDERLINE_RED,
            Aspiration::Weak => UNDERLINE_YELLOW,
        });
    }

    fn close_aspiration(&self, out: &mut String) {
        out.push_str(UNDERLINE_OFF);
    }

    fn name(&self) -> &'static str {
        "ansi"
    }
}

/// No span markers at all.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlainMarkup;

impl Markup for PlainMarkup {
    fn open_stress(&self, _out: &mut String) {}
    fn close_stress(&self, _out: &mut String) {}
    fn open_aspiration(&self, _strength: Aspiration, _out: &mut String) {}
    fn close_aspiration(&self, _out: &mut String) {}

    fn name(&self) -> &'static str {
        "plain"
    }
}

/// Selectable output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkupFormat {
    #[default]
    Html,
    Ansi,
    Plain,
}

impl FromStr for MarkupFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "ansi" | "terminal" => Ok(Self::Ansi),
            "plain" | "text" => Ok(Self::Plain),
            other => Err(format!(
                "unknown markup format '{other}' (expected html, ansi or plain)"
            )),
        }
    }
}

impl fmt::Display for MarkupFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Html => write!(f, "html"),
            Self::Ansi => write!(f, "ansi"),
            Self::Plain => write!(f, "plain"),
        }
    }
}

/// Serialize the annotated plain stream.
pub fn render(
    chars: &[char],
    ranges: &[SyllableRange],
    annotations: &AnnotationSet,
    stress_mode: StressMode,
    markup: &dyn Markup,
) -> String {
    let bold = stress_mode == StressMode::Bold;
    let marks = stress_mode == StressMode::Marks;
    let in_bold_run = |i: usize| {
        bold && !is_space(chars[i]) && ranges.iter().any(|r| r.contains(i))
    };

    let mut out = String::with_capacity(chars.len() * 2);
    for (i, &base) in chars.iter().enumerate() {
        let c = if annotations.flaps.contains(&i) {
            FLAP_SYMBOL
        } else if annotations.glottals.contains(&i) {
            GLOTTAL_STOP_SYMBOL
        } else {
            base
        };

        let stressed = in_bold_run(i);
        if stressed && (i == 0 || !in_bold_run(i - 1)) {
            markup.open_stress(&mut out);
        }

        let aspiration = annotations.aspiration.get(&i).copied();
        if let Some(strength) = aspiration {
            markup.open_aspiration(strength, &mut out);
        }

        if marks && ranges.iter().any(|r| r.start == i) {
            out.push(STRESS_GLYPH);
        }

        markup.write_char(c, &mut out);

        if aspiration.is_some() {
            markup.close_aspiration(&mut out);
        }

        if stressed && (i + 1 == chars.len() || !in_bold_run(i + 1)) {
            markup.close_stress(&mut out);
        }
    }
    out
}
