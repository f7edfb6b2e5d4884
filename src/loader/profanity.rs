//! Profanity filtering of headwords and synonyms.
//!
//! Rules come from a JSON index of `{id, match, tags, severity}` records. A rule
//! only takes part in matching when one of its tags is among the configured
//! categories.

use std::collections::HashSet;

use regex::Regex;
use serde::Deserialize;

use crate::config::FilterConfig;
use crate::error::{Result, ThesaurizeError};
use crate::loader::source;

/// One entry of the rule index, before its pattern is compiled.
#[derive(Debug, Deserialize)]
struct RawRule {
    id: String,
    #[serde(rename = "match")]
    pattern: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    severity: i64,
}

/// A compiled profanity rule.
#[derive(Debug, Clone)]
pub struct ProfanityRule {
    pub id: String,
    pub matcher: Regex,
    pub tags: Vec<String>,
    /// Informational only.
    pub severity: i64,
}

impl RawRule {
    fn compile(self) -> Result<ProfanityRule> {
        let matcher = Regex::new(&self.pattern).map_err(|e| {
            ThesaurizeError::format(format!("invalid pattern in rule '{}': {e}", self.id))
        })?;
        Ok(ProfanityRule {
            id: self.id,
            matcher,
            tags: self.tags,
            severity: self.severity,
        })
    }
}

impl ProfanityRule {
    /// Whether any of this rule's tags is in `categories`.
    pub fn is_active(&self, categories: &HashSet<String>) -> bool {
        self.tags.iter().any(|tag| categories.contains(tag))
    }
}

/// Classifies words as disallowed.
#[derive(Debug, Clone, Default)]
pub struct ProfanityFilter {
    rules: Vec<ProfanityRule>,
    categories: HashSet<String>,
}

impl ProfanityFilter {
    /// Fetch the rule index named by `config` and build a filter from it.
    pub fn from_config(config: &FilterConfig) -> Result<Self> {
        log::info!("Loading profanity index from {}", config.index_url);
        let bytes = source::fetch(&config.index_url)
            .map_err(|e| ThesaurizeError::fetch(format!("unable to get filter index: {e}")))?;
        Self::from_json(&bytes, config.categories.iter().cloned())
    }

    /// Build a filter from a JSON rule index.
    pub fn from_json<I, S>(bytes: &[u8], categories: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let raw: Vec<RawRule> = serde_json::from_slice(bytes)
            .map_err(|e| ThesaurizeError::format(format!("invalid filter index: {e}")))?;
        let rules = raw
            .into_iter()
            .map(RawRule::compile)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(rules, categories))
    }

    /// Build a filter from compiled rules.
    pub fn new<I, S>(rules: Vec<ProfanityRule>, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let categories: HashSet<String> = categories.into_iter().map(Into::into).collect();
        let active = rules.iter().filter(|rule| rule.is_active(&categories)).count();
        log::debug!("Profanity filter has {active} active rule(s) out of {}", rules.len());

        ProfanityFilter { rules, categories }
    }

    /// Whether an active rule matches `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.rules
            .iter()
            .any(|rule| rule.is_active(&self.categories) && rule.matcher.is_match(text))
    }

    /// Number of loaded rules, active or not.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules are loaded.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"[
        {"id": "darn", "match": "^darn(ed)?$", "tags": ["mild"], "severity": 1},
        {"id": "heck", "match": "heck", "tags": ["mild", "religious"], "severity": 1},
        {"id": "fudge", "match": "^fudge$", "tags": ["food"], "severity": 0}
    ]"#;

    #[test]
    fn test_active_categories() {
        let filter = ProfanityFilter::from_json(INDEX.as_bytes(), ["mild"]).unwrap();
        assert_eq!(filter.len(), 3);
        assert!(filter.is_match("darn"));
        assert!(filter.is_match("darned"));
        assert!(filter.is_match("what the heck"));
        assert!(!filter.is_match("fudge"));
        assert!(!filter.is_match("happy"));
    }

    #[test]
    fn test_no_categories_matches_nothing() {
        let filter = ProfanityFilter::from_json(INDEX.as_bytes(), Vec::<String>::new()).unwrap();
        assert!(!filter.is_match("darn"));
    }

    #[test]
    fn test_invalid_pattern() {
        let index = r#"[{"id": "bad", "match": "(", "tags": ["mild"], "severity": 1}]"#;
        let result = ProfanityFilter::from_json(index.as_bytes(), ["mild"]);
        assert!(matches!(result, Err(ThesaurizeError::Format(_))));
    }

    #[test]
    fn test_invalid_json() {
        let result = ProfanityFilter::from_json(b"{not json", ["mild"]);
        assert!(matches!(result, Err(ThesaurizeError::Format(_))));
    }

    #[test]
    fn test_unreachable_index() {
        let config = FilterConfig::new(["mild"], "file:///nonexistent/index.json");
        let result = ProfanityFilter::from_config(&config);
        assert!(matches!(result, Err(ThesaurizeError::Fetch(_))));
    }
}
