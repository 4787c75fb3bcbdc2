//! Static signal tables
//!
//! A signal table maps category ids (industry slugs, search intents) to the
//! keywords and regex patterns that vote for them. Built-in tables are
//! compiled once on first use and shared for the life of the process;
//! project config can layer extra keywords or whole new categories on top.
//!
//! All matching happens against normalised text (see [`normalize`]): lowercase,
//! every run of non-alphanumeric characters collapsed to one space, padded
//! with a space on both ends. Patterns are written against that form.

pub mod industries;
pub mod intents;

use crate::error::{MoatscopeError, Result};
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

pub use industries::industry_table;
pub use intents::intent_table;

/// Importance weight used when an industry says nothing about a moat
pub const DEFAULT_IMPORTANCE: f64 = 1.0;

/// A regex compiled on first use, for `static` signal patterns
pub(crate) struct LazyRegex {
    cell: OnceLock<Regex>,
    pattern: &'static str,
}

impl LazyRegex {
    pub(crate) const fn new(pattern: &'static str) -> Self {
        Self {
            cell: OnceLock::new(),
            pattern,
        }
    }

    pub(crate) fn get(&self) -> &Regex {
        self.cell
            .get_or_init(|| Regex::new(self.pattern).expect("valid built-in regex"))
    }

    /// Distinct matched strings, in order of first appearance
    pub(crate) fn distinct_matches(&self, text: &str) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();
        for m in self.get().find_iter(text) {
            let s = m.as_str().trim().to_string();
            if !found.contains(&s) {
                found.push(s);
            }
        }
        found
    }
}

/// Normalise free text for keyword and pattern matching
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push(' ');
    let mut last_space = true;
    for c in text.chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
            last_space = false;
        } else if !last_space {
            out.push(' ');
            last_space = true;
        }
    }
    if !last_space {
        out.push(' ');
    }
    out
}

/// A keyword with its pre-padded match forms
#[derive(Debug, Clone)]
pub struct Keyword {
    pub term: String,
    padded: String,
    plural: String,
}

impl Keyword {
    pub fn new(raw: &str) -> Option<Self> {
        let term = normalize(raw).trim().to_string();
        if term.is_empty() {
            return None;
        }
        Some(Self {
            padded: format!(" {term} "),
            plural: format!(" {term}s "),
            term,
        })
    }

    /// Whole-word (or whole-phrase) match; a trailing plural `s` is accepted
    pub fn is_in(&self, normalized: &str) -> bool {
        normalized.contains(&self.padded) || normalized.contains(&self.plural)
    }
}

/// A labelled regex signal
#[derive(Debug, Clone)]
pub struct PatternSignal {
    pub label: String,
    pub regex: Regex,
}

impl PatternSignal {
    pub fn new(label: &str, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| {
            MoatscopeError::Config(format!("invalid pattern '{pattern}' for '{label}': {e}"))
        })?;
        Ok(Self {
            label: label.to_string(),
            regex,
        })
    }
}

/// One category in a signal table
#[derive(Debug, Clone)]
pub struct SignalEntry {
    pub id: String,
    pub name: String,
    pub keywords: Vec<Keyword>,
    pub patterns: Vec<PatternSignal>,
    /// Per-moat importance weights (industries only)
    pub importance: Vec<(String, f64)>,
    /// Noun used to fill `{category}` in prompt templates
    pub category_noun: String,
    /// Audience used to fill `{audience}` in prompt templates
    pub audience: String,
}

/// Matches of one entry against a piece of normalised text
#[derive(Debug, Clone, Default)]
pub struct EntryMatches {
    pub keywords: Vec<String>,
    pub patterns: Vec<String>,
}

impl EntryMatches {
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty() && self.patterns.is_empty()
    }
}

impl SignalEntry {
    /// Find the keywords and patterns of this entry present in `normalized`
    pub fn matches(&self, normalized: &str) -> EntryMatches {
        EntryMatches {
            keywords: self
                .keywords
                .iter()
                .filter(|k| k.is_in(normalized))
                .map(|k| k.term.clone())
                .collect(),
            patterns: self
                .patterns
                .iter()
                .filter(|p| p.regex.is_match(normalized))
                .map(|p| p.label.clone())
                .collect(),
        }
    }

    /// Importance of a moat category for this entry (1.0 when unspecified)
    pub fn importance_of(&self, moat_id: &str) -> f64 {
        self.importance
            .iter()
            .find(|(id, _)| id == moat_id)
            .map(|(_, w)| *w)
            .unwrap_or(DEFAULT_IMPORTANCE)
    }
}

/// Static definition of an entry, compiled into a [`SignalEntry`]
pub(crate) struct EntryDef {
    pub id: &'static str,
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub patterns: &'static [(&'static str, &'static str)],
    pub importance: &'static [(&'static str, f64)],
    pub category_noun: &'static str,
    pub audience: &'static str,
}

impl EntryDef {
    fn compile(&self) -> SignalEntry {
        SignalEntry {
            id: self.id.to_string(),
            name: self.name.to_string(),
            keywords: self.keywords.iter().filter_map(|k| Keyword::new(k)).collect(),
            patterns: self
                .patterns
                .iter()
                .map(|(label, pattern)| PatternSignal {
                    label: label.to_string(),
                    regex: Regex::new(pattern).expect("valid built-in regex"),
                })
                .collect(),
            importance: self
                .importance
                .iter()
                .map(|(id, w)| (id.to_string(), *w))
                .collect(),
            category_noun: self.category_noun.to_string(),
            audience: self.audience.to_string(),
        }
    }
}

/// Category returned when nothing in the table matches
#[derive(Debug, Clone)]
pub struct Fallback {
    pub id: String,
    pub name: String,
    pub category_noun: String,
    pub audience: String,
}

/// Extra signals for one category, read from project config
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TableExtension {
    /// Display name (only used when the extension introduces a new category)
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub extra_keywords: Vec<String>,

    #[serde(default)]
    pub extra_patterns: Vec<String>,
}

/// An immutable, ordered set of categories
#[derive(Debug, Clone)]
pub struct SignalTable {
    kind: &'static str,
    entries: Vec<SignalEntry>,
    fallback: Fallback,
}

impl SignalTable {
    pub(crate) fn compile(kind: &'static str, defs: &[EntryDef], fallback: Fallback) -> Self {
        Self {
            kind,
            entries: defs.iter().map(EntryDef::compile).collect(),
            fallback,
        }
    }

    /// Table kind, e.g. "industry" or "intent"
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn entries(&self) -> &[SignalEntry] {
        &self.entries
    }

    pub fn fallback(&self) -> &Fallback {
        &self.fallback
    }

    /// Look up an entry by id (case-insensitive, surrounding whitespace ignored)
    pub fn get(&self, id: &str) -> Option<&SignalEntry> {
        let wanted = id.trim().to_lowercase();
        self.entries.iter().find(|e| e.id == wanted)
    }

    /// Index of an entry by id
    pub fn position(&self, id: &str) -> Option<usize> {
        let wanted = id.trim().to_lowercase();
        self.entries.iter().position(|e| e.id == wanted)
    }

    /// Like [`get`](Self::get) but an unknown id is an error
    pub fn require(&self, id: &str) -> Result<&SignalEntry> {
        self.get(id).ok_or_else(|| MoatscopeError::UnknownCategory {
            table: self.kind.to_string(),
            id: id.to_string(),
        })
    }

    /// Copy of this table with config extensions applied.
    ///
    /// Known ids gain the extra keywords/patterns; unknown ids become new
    /// categories appended after the built-in ones (sorted by id so the
    /// result does not depend on map iteration order).
    pub fn with_extensions(&self, extensions: &BTreeMap<String, TableExtension>) -> Result<Self> {
        let mut table = self.clone();
        for (raw_id, ext) in extensions {
            let id = normalize(raw_id).trim().replace(' ', "-");
            if id.is_empty() {
                return Err(MoatscopeError::Config(format!(
                    "empty {} id in config",
                    self.kind
                )));
            }
            let mut patterns = Vec::with_capacity(ext.extra_patterns.len());
            for (i, pattern) in ext.extra_patterns.iter().enumerate() {
                patterns.push(PatternSignal::new(&format!("{id}-custom-{}", i + 1), pattern)?);
            }
            let keywords = ext.extra_keywords.iter().filter_map(|k| Keyword::new(k));

            match table.entries.iter_mut().find(|e| e.id == id) {
                Some(entry) => {
                    entry.keywords.extend(keywords);
                    entry.patterns.extend(patterns);
                }
                None => {
                    let name = ext.name.clone().unwrap_or_else(|| id.clone());
                    table.entries.push(SignalEntry {
                        category_noun: name.to_lowercase(),
                        audience: table.fallback.audience.clone(),
                        id,
                        name,
                        keywords: keywords.collect(),
                        patterns,
                        importance: Vec::new(),
                    });
                }
            }
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_punctuation() {
        assert_eq!(normalize("Best CRM-software, for  you!"), " best crm software for you ");
        assert_eq!(normalize(""), " ");
        assert_eq!(normalize("hubspot.com"), " hubspot com ");
    }

    #[test]
    fn test_keyword_whole_word_and_plural() {
        let kw = Keyword::new("tool").expect("keyword");
        assert!(kw.is_in(&normalize("a great tool")));
        assert!(kw.is_in(&normalize("great tools here")));
        assert!(!kw.is_in(&normalize("toolbox")));

        let phrase = Keyword::new("Project Management").expect("keyword");
        assert!(phrase.is_in(&normalize("best project-management app")));
        assert!(Keyword::new("  !! ").is_none());
    }

    #[test]
    fn test_extension_adds_keywords_and_categories() {
        let mut ext = BTreeMap::new();
        ext.insert(
            "saas".to_string(),
            TableExtension {
                extra_keywords: vec!["martech".into()],
                ..Default::default()
            },
        );
        ext.insert(
            "Pet Care".to_string(),
            TableExtension {
                name: Some("Pet Care".into()),
                extra_keywords: vec!["dog food".into()],
                extra_patterns: vec![r"\bvets?\b".into()],
            },
        );
        let table = industry_table().with_extensions(&ext).expect("extend table");
        let saas = table.get("saas").expect("saas entry");
        assert!(saas.keywords.iter().any(|k| k.term == "martech"));

        let pets = table.get("pet-care").expect("new entry");
        assert_eq!(pets.name, "Pet Care");
        assert_eq!(pets.patterns.len(), 1);
        assert_eq!(table.entries().len(), industry_table().entries().len() + 1);
    }

    #[test]
    fn test_extension_rejects_bad_pattern() {
        let mut ext = BTreeMap::new();
        ext.insert(
            "saas".to_string(),
            TableExtension {
                extra_patterns: vec!["(unclosed".into()],
                ..Default::default()
            },
        );
        let err = industry_table().with_extensions(&ext).unwrap_err();
        assert!(matches!(err, MoatscopeError::Config(_)));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert!(industry_table().get(" SaaS ").is_some());
        assert!(industry_table().get("unknown").is_none());
        assert!(industry_table().require("unknown").is_err());
    }
}
