//! Lexeme categories used to partition the synonym store.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ThesaurizeError};

/// Coarse part-of-speech grouping of a synonym set.
///
/// Declaration order is the candidate priority order: a noun candidate always
/// wins over a verb candidate, and so on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lexeme {
    Noun,
    Verb,
    #[serde(rename = "adj")]
    Adjective,
    #[serde(rename = "adv")]
    Adverb,
}

impl Lexeme {
    /// Every category, in priority order.
    pub const ORDER: [Lexeme; 4] = [Lexeme::Noun, Lexeme::Verb, Lexeme::Adjective, Lexeme::Adverb];

    /// Name used in store keys and in the thesaurus data file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Lexeme::Noun => "noun",
            Lexeme::Verb => "verb",
            Lexeme::Adjective => "adj",
            Lexeme::Adverb => "adv",
        }
    }

    /// Store key of the synonym set for `headword` in this category.
    pub fn key(&self, headword: &str) -> String {
        format!("{}:{headword}", self.as_str())
    }
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lexeme {
    type Err = ThesaurizeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "noun" => Ok(Lexeme::Noun),
            "verb" => Ok(Lexeme::Verb),
            "adj" | "adjective" => Ok(Lexeme::Adjective),
            "adv" | "adverb" => Ok(Lexeme::Adverb),
            other => Err(ThesaurizeError::parse(format!("unknown lexeme '{other}'"))),
        }
    }
}
