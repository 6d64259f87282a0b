// ============================================================
// Layer 4 - Noun Lemmatizer
// ============================================================
// Maps a token to its dictionary base form, treating every word
// as a noun:
//
//   "Questions" → "question"    (case-folded, plural "s")
//   "classes"   → "class"       ("sses" → "ss")
//   "flies"     → "fly"         ("ies"  → "y")
//   "boxes"     → "box"         ("xes/zes/ches/shes" drop "es")
//   "children"  → "child"       (irregular, from the lexicon)
//   "news"      → "news"        (invariant, from the lexicon)
//
// The linguistic resources live in a lexicon file with two
// sections, [exceptions] and [invariant]. A default English
// lexicon is compiled into the binary; a custom one can be
// supplied on the command line. Lemmatization never runs without
// a lexicon: loading errors abort the run.
//
// The process keeps one read-only Lemmatizer, installed at
// startup and shared for the lifetime of the program.

use anyhow::{ensure, Context, Result};
use std::{
    collections::{HashMap, HashSet},
    fs,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use crate::domain::error::PipelineError;

const DEFAULT_LEXICON: &str = include_str!("../../resources/english_lexicon.txt");

static GLOBAL: OnceLock<Installed> = OnceLock::new();

struct Installed {
    /// `None` for the embedded lexicon.
    source:     Option<PathBuf>,
    lemmatizer: Lemmatizer,
}

/// Load the lexicon (custom path or the embedded default) and
/// install it as the process-wide lemmatizer.
///
/// The first successful call wins. Later calls asking for the same
/// lexicon get the installed instance; asking for a different one
/// is an error.
pub fn install(lexicon_path: Option<&Path>) -> Result<&'static Lemmatizer> {
    let installed = match GLOBAL.get() {
        Some(existing) => existing,
        None => {
            let lemmatizer = match lexicon_path {
                Some(path) => Lemmatizer::from_path(path)?,
                None       => Lemmatizer::english()?,
            };
            tracing::info!(
                "Lemmatizer ready: {} exceptions, {} invariant words",
                lemmatizer.exceptions.len(),
                lemmatizer.invariant.len(),
            );
            GLOBAL.get_or_init(|| Installed {
                source: lexicon_path.map(Path::to_path_buf),
                lemmatizer,
            })
        }
    };

    ensure!(
        installed.source.as_deref() == lexicon_path,
        "Lexicon {} was requested, but {} is already installed",
        describe(lexicon_path),
        describe(installed.source.as_deref()),
    );
    Ok(&installed.lemmatizer)
}

fn describe(source: Option<&Path>) -> String {
    match source {
        Some(path) => format!("'{}'", path.display()),
        None       => "the embedded English lexicon".to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct Lemmatizer {
    exceptions: HashMap<String, String>,
    invariant:  HashSet<String>,
}

#[derive(Clone, Copy)]
enum Section {
    Exceptions,
    Invariant,
}

impl Lemmatizer {
    /// Lemmatizer backed by the embedded English lexicon.
    pub fn english() -> Result<Self> {
        Self::parse(DEFAULT_LEXICON).context("Embedded English lexicon is malformed")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Cannot read lexicon '{}'", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid lexicon '{}'", path.display()))
    }

    /// Parse lexicon text. Line numbers in errors are 1-based.
    pub fn parse(text: &str) -> Result<Self, PipelineError> {
        let mut exceptions = HashMap::new();
        let mut invariant  = HashSet::new();
        let mut section: Option<Section> = None;

        for (i, raw) in text.lines().enumerate() {
            let line_no = i + 1;
            let line    = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') {
                section = match line {
                    "[exceptions]" => Some(Section::Exceptions),
                    "[invariant]"  => Some(Section::Invariant),
                    other => {
                        return Err(PipelineError::Lexicon {
                            line:   line_no,
                            reason: format!("unknown section {other}"),
                        })
                    }
                };
                continue;
            }

            let fields: Vec<&str> = line.split_whitespace().collect();
            match (section, fields.as_slice()) {
                (Some(Section::Exceptions), [inflected, lemma]) => {
                    exceptions.insert(inflected.to_lowercase(), lemma.to_lowercase());
                }
                (Some(Section::Invariant), [word]) => {
                    invariant.insert(word.to_lowercase());
                }
                (Some(Section::Exceptions), _) => {
                    return Err(PipelineError::Lexicon {
                        line:   line_no,
                        reason: "expected '<inflected> <lemma>'".to_string(),
                    })
                }
                (Some(Section::Invariant), _) => {
                    return Err(PipelineError::Lexicon {
                        line:   line_no,
                        reason: "expected a single word".to_string(),
                    })
                }
                (None, _) => {
                    return Err(PipelineError::Lexicon {
                        line:   line_no,
                        reason: "entry appears before any section header".to_string(),
                    })
                }
            }
        }

        if section.is_none() {
            return Err(PipelineError::Lexicon {
                line:   0,
                reason: "lexicon declares no sections".to_string(),
            });
        }

        Ok(Self { exceptions, invariant })
    }

    /// Case-fold `word` and return its base form.
    pub fn lemmatize(&self, word: &str) -> String {
        let word = word.to_lowercase();

        // Punctuation, numbers and symbols pass through.
        if !word.chars().any(char::is_alphabetic) {
            return word;
        }
        if let Some(lemma) = self.exceptions.get(&word) {
            return lemma.clone();
        }
        if self.invariant.contains(&word) {
            return word;
        }

        detach_suffix(&word).unwrap_or(word)
    }
}

/// Regular noun inflections. Returns None when no rule applies.
/// All suffixes are ASCII, so byte slicing at the suffix boundary
/// is always on a char boundary.
fn detach_suffix(word: &str) -> Option<String> {
    let len = word.chars().count();

    if word.ends_with("sses") {
        return Some(word[..word.len() - 2].to_string());
    }
    if word.ends_with("ies") && len > 4 {
        return Some(format!("{}y", &word[..word.len() - 3]));
    }
    for suffix in ["xes", "zes", "ches", "shes"] {
        if word.ends_with(suffix) && len > suffix.len() {
            return Some(word[..word.len() - 2].to_string());
        }
    }
    if word.ends_with("men") && len > 4 {
        return Some(format!("{}man", &word[..word.len() - 3]));
    }
    if word.ends_with('s')
        && len > 3
        && !["ss", "us", "is"].iter().any(|s| word.ends_with(s))
    {
        return Some(word[..word.len() - 1].to_string());
    }
    None
}
