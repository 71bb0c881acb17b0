//! Pronunciation dictionary and its loading lifecycle.
//!
//! The dictionary maps uppercase word forms to raw transcriptions. It is built
//! once, then shared read-only behind an `Arc`. [`DictionaryHandle`] tracks
//! whether it is available yet so callers can tell "not loaded" apart from
//! "word not found".

use crate::error::{IpaError, Result};
use crate::phonetics::resolver::Lexicon;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::watch;

/// Immutable word → transcription store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PronunciationDictionary {
    entries: HashMap<String, String>,
}

impl PronunciationDictionary {
    /// Build from `(word, transcription)` pairs. Keys are uppercased; a later
    /// duplicate replaces an earlier one.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.as_ref().to_uppercase(), v.into()))
                .collect(),
        }
    }

    /// Raw transcription for `word`, any case.
    pub fn lookup(&self, word: &str) -> Option<&str> {
        self.entries.get(&word.to_uppercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse dictionary content in the given format.
    pub fn parse(content: &str, format: DictionaryFormat) -> Result<Self> {
        match format {
            DictionaryFormat::Json => parse_json_object(content),
            DictionaryFormat::Script => {
                let start = content.find('{');
                let end = content.rfind('}');
                match (start, end) {
                    (Some(start), Some(end)) if start < end => {
                        parse_json_object(&content[start..=end])
                    }
                    _ => Err(IpaError::DictionaryFormat {
                        message: "no object literal found in script".to_string(),
                    }),
                }
            }
            DictionaryFormat::Text => Ok(parse_text(content)),
        }
    }

    /// Read and parse a dictionary file, detecting its format.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| IpaError::DictionaryLoad {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let format = DictionaryFormat::detect(path, &content);
        Self::parse(&content, format).map_err(|e| IpaError::DictionaryLoad {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

impl Lexicon for PronunciationDictionary {
    fn transcription(&self, upper_word: &str) -> Option<&str> {
        self.entries.get(upper_word).map(String::as_str)
    }
}

/// On-disk dictionary layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictionaryFormat {
    /// `{"WORD": "transcription", ...}`
    Json,
    /// A script assigning such an object to a global, e.g. `m={...}`.
    Script,
    /// `WORD transcription` per line.
    Text,
}

impl DictionaryFormat {
    /// Pick a format from the file extension, falling back to the content.
    pub fn detect(path: &Path, content: &str) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::Json,
            Some("js") => Self::Script,
            _ if content.trim_start().starts_with('{') => Self::Json,
            _ => Self::Text,
        }
    }
}

fn parse_json_object(content: &str) -> Result<PronunciationDictionary> {
    let object: HashMap<String, serde_json::Value> =
        serde_json::from_str(content).map_err(|e| IpaError::DictionaryFormat {
            message: e.to_string(),
        })?;
    Ok(PronunciationDictionary::from_entries(
        object
            .into_iter()
            .filter_map(|(word, value)| match value {
                serde_json::Value::String(s) => Some((word, s)),
                _ => None,
            }),
    ))
}

/// Lines of `WORD transcription`. Slash-wrapped transcriptions are unwrapped
/// and only the first of comma-separated alternatives is kept. Blank lines,
/// `#` comments and lines without a transcription are skipped.
fn parse_text(content: &str) -> PronunciationDictionary {
    PronunciationDictionary::from_entries(content.lines().filter_map(|line| {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        let (word, rest) = line.split_once(char::is_whitespace)?;
        let first = rest.split(',').next()?.trim();
        let transcription = first
            .strip_prefix('/')
            .and_then(|s| s.strip_suffix('/'))
            .unwrap_or(first)
            .trim();
        if transcription.is_empty() {
            return None;
        }
        Some((word.to_string(), transcription.to_string()))
    }))
}

/// Where the shared dictionary is in its lifecycle.
#[derive(Debug, Clone, Default)]
pub enum DictionaryState {
    #[default]
    Unloaded,
    Loading,
    Ready(Arc<PronunciationDictionary>),
    Failed { path: String, message: String },
}

impl DictionaryState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unloaded => "unloaded",
            Self::Loading => "loading",
            Self::Ready(_) => "ready",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Shared handle to the process-wide dictionary.
///
/// Clones observe the same state. Loading happens on tokio's blocking pool.
#[derive(Debug, Clone)]
pub struct DictionaryHandle {
    state: Arc<watch::Sender<DictionaryState>>,
}

impl Default for DictionaryHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl DictionaryHandle {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(DictionaryState::Unloaded);
        Self {
            state: Arc::new(tx),
        }
    }

    /// A handle that is already ready.
    pub fn with_dictionary(dictionary: PronunciationDictionary) -> Self {
        let handle = Self::new();
        handle.install(dictionary);
        handle
    }

    /// Put an already-built dictionary in place.
    pub fn install(&self, dictionary: PronunciationDictionary) -> Arc<PronunciationDictionary> {
        let dictionary = Arc::new(dictionary);
        self.state
            .send_replace(DictionaryState::Ready(dictionary.clone()));
        dictionary
    }

    pub fn state(&self) -> DictionaryState {
        self.state.borrow().clone()
    }

    pub fn state_name(&self) -> &'static str {
        self.state.borrow().name()
    }

    pub fn is_ready(&self) -> bool {
        matches!(*self.state.borrow(), DictionaryState::Ready(_))
    }

    /// The dictionary if it is ready, `DictionaryNotReady` otherwise.
    pub fn ready(&self) -> Result<Arc<PronunciationDictionary>> {
        match &*self.state.borrow() {
            DictionaryState::Ready(dictionary) => Ok(dictionary.clone()),
            DictionaryState::Failed { path, message } => Err(IpaError::DictionaryLoad {
                path: path.clone(),
                message: message.clone(),
            }),
            other => Err(IpaError::DictionaryNotReady {
                state: other.name().to_string(),
            }),
        }
    }

    /// Load `path` on the blocking pool and publish the result.
    pub async fn load_file(&self, path: PathBuf) -> Result<Arc<PronunciationDictionary>> {
        self.state.send_replace(DictionaryState::Loading);

        let display = path.display().to_string();
        let loaded = tokio::task::spawn_blocking(move || PronunciationDictionary::from_file(&path))
            .await
            .map_err(|e| IpaError::Other(format!("Dictionary load task panicked: {}", e)))
            .and_then(|result| result);

        match loaded {
            Ok(dictionary) => Ok(self.install(dictionary)),
            Err(e) => {
                let message = match &e {
                    IpaError::DictionaryLoad { message, .. } => message.clone(),
                    other => other.to_string(),
                };
                self.state.send_replace(DictionaryState::Failed {
                    path: display,
                    message,
                });
                Err(e)
            }
        }
    }

    /// Start loading in the background. The returned task resolves with the
    /// same result that [`wait_ready`](Self::wait_ready) will observe.
    pub fn spawn_load(
        &self,
        path: PathBuf,
    ) -> tokio::task::JoinHandle<Result<Arc<PronunciationDictionary>>> {
        // Mark loading before returning so waiters never see a stale Unloaded.
        self.state.send_replace(DictionaryState::Loading);
        let handle = self.clone();
        tokio::spawn(async move { handle.load_file(path).await })
    }

    /// Wait until the dictionary is ready or has failed to load.
    ///
    /// A handle that is `Unloaded` has nothing in flight and reports
    /// `DictionaryNotReady` immediately.
    pub async fn wait_ready(&self) -> Result<Arc<PronunciationDictionary>> {
        let mut rx = self.state.subscribe();
        loop {
            let loading = matches!(*rx.borrow_and_update(), DictionaryState::Loading);
            if !loading {
                return self.ready();
            }
            rx.changed().await.map_err(|_| IpaError::DictionaryNotReady {
                state: "loading".to_string(),
            })?;
        }
    }
}
