//! Conversion engine.
//!
//! Composes the passes for one text: resolve words, split off stress, run the
//! rule passes in precedence order, render. All intermediate state is local
//! to a call; the only shared input is the read-only dictionary.

use crate::dictionary::{DictionaryHandle, PronunciationDictionary};
use crate::error::{IpaError, Result};
use crate::phonetics::options::ConversionOptions;
use crate::phonetics::render::{HtmlMarkup, Markup, render};
use crate::phonetics::resolver::{Lexicon, ResolveReport, resolve};
use crate::phonetics::rules::{
    AnnotationSet, detect_aspiration, detect_flaps, detect_glottal_stops,
};
use crate::phonetics::stress::{PhonemeStream, SyllableRange};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Everything computed for one text before rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Analysis {
    pub stream: PhonemeStream,
    pub ranges: Vec<SyllableRange>,
    pub annotations: AnnotationSet,
    pub report: ResolveReport,
}

/// Rendered markup plus the resolver's counters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conversion {
    pub markup: String,
    pub report: ResolveReport,
}

/// Run the enabled rule passes. A disabled pass yields an empty set and so
/// claims nothing for the passes after it.
pub fn annotate(
    stream: &PhonemeStream,
    ranges: &[SyllableRange],
    options: &ConversionOptions,
) -> AnnotationSet {
    let chars = &stream.chars;
    let flaps = if options.show_flapping {
        detect_flaps(chars, ranges)
    } else {
        BTreeSet::new()
    };
    let glottals = if options.show_glottal_stop {
        detect_glottal_stops(chars, &flaps)
    } else {
        BTreeSet::new()
    };
    let aspiration = if options.show_aspiration {
        detect_aspiration(chars, ranges, &flaps, &glottals)
    } else {
        BTreeMap::new()
    };
    AnnotationSet {
        flaps,
        glottals,
        aspiration,
    }
}

/// Text → annotated IPA markup.
pub struct Converter {
    markup: Box<dyn Markup>,
}

impl std::fmt::Debug for Converter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Converter")
            .field("markup", &self.markup.name())
            .finish()
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(Box::new(HtmlMarkup::default()))
    }
}

impl Converter {
    pub fn new(markup: Box<dyn Markup>) -> Self {
        Self { markup }
    }

    pub fn markup_name(&self) -> &'static str {
        self.markup.name()
    }

    /// Resolve and annotate without rendering.
    pub fn analyze(
        &self,
        lexicon: &dyn Lexicon,
        text: &str,
        options: &ConversionOptions,
    ) -> Analysis {
        let resolved = resolve(text, lexicon);
        let stream = resolved.stream;
        let ranges = stream.syllable_ranges();
        let annotations = annotate(&stream, &ranges, options);
        Analysis {
            stream,
            ranges,
            annotations,
            report: resolved.report,
        }
    }

    pub fn convert_with_report(
        &self,
        lexicon: &dyn Lexicon,
        text: &str,
        options: &ConversionOptions,
    ) -> Conversion {
        let analysis = self.analyze(lexicon, text, options);
        let markup = render(
            &analysis.stream.chars,
            &analysis.ranges,
            &analysis.annotations,
            options.stress_mode,
            self.markup.as_ref(),
        );
        Conversion {
            markup,
            report: analysis.report,
        }
    }

    /// Convert `text` against a loaded dictionary.
    ///
    /// With every option off the output equals the input for text with no
    /// dictionary words, except that `HtmlMarkup` escapes `&`, `<` and `>`.
    pub fn convert(&self, lexicon: &dyn Lexicon, text: &str, options: &ConversionOptions) -> String {
        self.convert_with_report(lexicon, text, options).markup
    }

    /// Convert only if the handle's dictionary is ready.
    ///
    /// Fails with `DictionaryNotReady` rather than treating every word as
    /// missing.
    pub fn convert_ready(
        &self,
        handle: &DictionaryHandle,
        text: &str,
        options: &ConversionOptions,
    ) -> Result<String> {
        let dictionary = handle.ready()?;
        Ok(self.convert(dictionary.as_ref(), text, options))
    }
}

/// One `(title, text)` pair from a document source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    pub title: String,
    pub text: String,
}

impl Chapter {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedChapter {
    pub title: String,
    pub markup: String,
    pub report: ResolveReport,
}

/// Convert chapters concurrently on the blocking pool, keeping input order.
pub async fn convert_chapters(
    converter: Arc<Converter>,
    dictionary: Arc<PronunciationDictionary>,
    chapters: Vec<Chapter>,
    options: ConversionOptions,
) -> Result<Vec<ConvertedChapter>> {
    let tasks: Vec<_> = chapters
        .into_iter()
        .map(|chapter| {
            let converter = converter.clone();
            let dictionary = dictionary.clone();
            tokio::task::spawn_blocking(move || {
                let conversion =
                    converter.convert_with_report(dictionary.as_ref(), &chapter.text, &options);
                ConvertedChapter {
                    title: chapter.title,
                    markup: conversion.markup,
                    report: conversion.report,
                }
            })
        })
        .collect();

    let mut converted = Vec::with_capacity(tasks.len());
    for task in tasks {
        converted.push(
            task.await
                .map_err(|e| IpaError::Other(format!("Chapter conversion task panicked: {}", e)))?,
        );
    }
    Ok(converted)
}
