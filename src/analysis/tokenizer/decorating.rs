//! Decoration-preserving whitespace tokenizer.

use std::sync::LazyLock;

use regex::Regex;

use super::Tokenizer;
use crate::analysis::token::{Capitalization, Token, TokenStream};

/// Leading or trailing run of non-word characters.
static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\W+)|(\W+)$").expect("punctuation pattern is valid"));

/// Uppercase run that starts on a word boundary.
static CAPITAL_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]+").expect("capital pattern is valid"));

/// A tokenizer that splits text on whitespace and records, for every unit, the
/// punctuation wrapped around it and how it was capitalized.
///
/// Hyphenated words such as `well-known` stay a single unit; a run of hyphens at
/// the end of a unit is recorded as trailing punctuation.
///
/// Capitalization is a surface heuristic based on the first uppercase run that
/// starts on a word boundary: no run leaves the word as written, a run of one
/// letter is [`Capitalization::FirstLetter`], and a longer run is
/// [`Capitalization::AllUpper`]. Names like `McDonald` therefore come back as
/// `Mcdonald`, and acronyms come back fully uppercased.
#[derive(Clone, Debug, Default)]
pub struct DecoratingTokenizer;

impl DecoratingTokenizer {
    /// Create a new decorating tokenizer.
    pub fn new() -> Self {
        DecoratingTokenizer
    }

    /// Split a single whitespace-free unit into its normalized word and decorations.
    pub fn tokenize_word(unit: &str, position: usize) -> Token {
        let mut pre = "";
        let mut post = "";
        let mut word_start = 0;
        let mut word_end = unit.len();

        let matches: Vec<_> = PUNCTUATION.find_iter(unit).take(2).collect();
        match matches.as_slice() {
            [only] if only.start() == 0 => {
                pre = only.as_str();
                word_start = only.end();
            }
            [only] => {
                post = only.as_str();
                word_end = only.start();
            }
            [first, second] => {
                pre = first.as_str();
                post = second.as_str();
                word_start = first.end();
                word_end = second.start();
            }
            _ => {}
        }

        let word = &unit[word_start..word_end.max(word_start)];
        let capitalization = classify_capitalization(word);
        let text = match capitalization {
            Capitalization::None => word.to_string(),
            _ => word.to_lowercase(),
        };

        Token::new(text, position)
            .with_capitalization(capitalization)
            .with_pre_punctuation(pre)
            .with_post_punctuation(post)
    }
}

/// Classify the capitalization of a word by the length of its first
/// boundary-anchored uppercase run.
pub fn classify_capitalization(word: &str) -> Capitalization {
    match CAPITAL_RUN.find(word).map(|m| m.len()) {
        None | Some(0) => Capitalization::None,
        Some(1) => Capitalization::FirstLetter,
        Some(_) => Capitalization::AllUpper,
    }
}

impl Tokenizer for DecoratingTokenizer {
    fn tokenize(&self, text: &str) -> TokenStream {
        let tokens: Vec<Token> = text
            .split_whitespace()
            .enumerate()
            .map(|(position, unit)| Self::tokenize_word(unit, position))
            .collect();

        Box::new(tokens.into_iter())
    }

    fn name(&self) -> &'static str {
        "decorating"
    }
}
