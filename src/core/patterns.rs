// src/core/patterns.rs

// Named extraction patterns applied to downloaded bundles. A pattern is
// anything implementing `Matcher`; the stock implementation is a
// case-insensitive regex with a single capture group.

use crate::core::error::ReconError;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::fmt;
use std::sync::Arc;

/// Extracts a single value from a piece of text.
pub trait Matcher: Send + Sync {
    /// Returns the first capture of the first match, or `None` when absent.
    fn find(&self, text: &str) -> Option<String>;
}

/// Regex-backed matcher returning capture group 1.
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    regex: Regex,
}

impl RegexMatcher {
    /// Compiles `source` case-insensitively and checks it has exactly one capture group.
    pub fn new(name: &str, source: &str) -> Result<Self, ReconError> {
        let regex = RegexBuilder::new(source)
            .case_insensitive(true)
            .build()
            .map_err(|source| ReconError::InvalidRegex { name: name.to_string(), source })?;
        // captures_len counts the implicit whole-match group.
        let groups = regex.captures_len() - 1;
        if groups != 1 {
            return Err(ReconError::CaptureGroups { name: name.to_string(), found: groups });
        }
        Ok(Self { regex })
    }
}

impl Matcher for RegexMatcher {
    fn find(&self, text: &str) -> Option<String> {
        self.regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

/// A named matcher.
#[derive(Clone)]
pub struct PatternEntry {
    pub name: String,
    pub matcher: Arc<dyn Matcher>,
}

impl fmt::Debug for PatternEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternEntry").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Ordered, named collection of matchers. Cheap to clone into worker tasks.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    entries: Vec<PatternEntry>,
}

/// Source of the stock `authDomain` rule.
pub const AUTH_DOMAIN_PATTERN: &str = r#"authDomain\s*[:=]\s*["']([^"']+)["']"#;

static DEFAULT_PATTERNS: Lazy<PatternSet> = Lazy::new(|| {
    let mut set = PatternSet::new();
    // The stock source is a literal known to compile with one group.
    if let Ok(matcher) = RegexMatcher::new("authDomain", AUTH_DOMAIN_PATTERN) {
        set.entries.push(PatternEntry { name: "authDomain".to_string(), matcher: Arc::new(matcher) });
    }
    set
});

impl PatternSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in pattern set.
    pub fn defaults() -> Self {
        DEFAULT_PATTERNS.clone()
    }

    /// Parses `NAME=REGEX` definitions into a set, preserving their order.
    pub fn from_definitions<I, S>(definitions: I) -> Result<Self, ReconError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for definition in definitions {
            let definition = definition.as_ref();
            let (name, source) = definition
                .split_once('=')
                .ok_or_else(|| ReconError::MalformedPattern(definition.to_string()))?;
            let name = name.trim();
            if source.is_empty() {
                return Err(ReconError::MalformedPattern(definition.to_string()));
            }
            let matcher = RegexMatcher::new(name, source)?;
            set.insert(name, matcher)?;
        }
        Ok(set)
    }

    /// Appends a named matcher. Names double as output file stems, so they are
    /// restricted to ASCII alphanumerics, `-` and `_`.
    pub fn insert(&mut self, name: &str, matcher: impl Matcher + 'static) -> Result<(), ReconError> {
        let valid = !name.is_empty()
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ReconError::InvalidPatternName(name.to_string()));
        }
        if self.entries.iter().any(|entry| entry.name == name) {
            return Err(ReconError::DuplicatePattern(name.to_string()));
        }
        self.entries.push(PatternEntry { name: name.to_string(), matcher: Arc::new(matcher) });
        Ok(())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Runs every matcher against `text`, one result per pattern.
    pub fn apply(&self, text: &str) -> Vec<(String, Option<String>)> {
        self.entries
            .iter()
            .map(|entry| (entry.name.clone(), entry.matcher.find(text)))
            .collect()
    }
}
