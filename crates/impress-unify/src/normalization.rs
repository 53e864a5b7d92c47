//! Value normalization into comparison keys

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::config::{Preprocessor, UnifyOptions};
use crate::error::Result;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Maps raw values to normalized keys.
///
/// The strip/remove character classes are compiled once and reused for
/// every value of a call.
#[derive(Debug)]
pub struct Normalizer {
    lowercase: bool,
    edge_pattern: Option<Regex>,
    internal_pattern: Option<Regex>,
    preprocessor: Option<Preprocessor>,
}

impl Normalizer {
    pub fn new(options: &UnifyOptions) -> Result<Self> {
        let edge_pattern = match char_class(&options.strip_chars) {
            Some(class) => Some(Regex::new(&format!("^{class}+|{class}+$"))?),
            None => None,
        };
        let internal_pattern = match char_class(&options.remove_internal_chars) {
            Some(class) => Some(Regex::new(&class)?),
            None => None,
        };

        Ok(Self {
            lowercase: options.lowercase,
            edge_pattern,
            internal_pattern,
            preprocessor: options.preprocessor.clone(),
        })
    }

    /// Normalize a raw value into its comparison key.
    ///
    /// An empty result means the value normalizes to nothing.
    pub fn normalize(&self, raw: &str) -> Result<String> {
        let mut key = match &self.preprocessor {
            Some(preprocessor) => preprocessor.apply(raw)?,
            None => raw.to_string(),
        };

        key = fold_diacritics(&key);

        if self.lowercase {
            key = key.to_lowercase();
        }

        if let Some(edges) = &self.edge_pattern {
            key = edges.replace_all(&key, "").into_owned();
        }

        if let Some(internal) = &self.internal_pattern {
            key = internal.replace_all(&key, "").into_owned();
        }

        Ok(collapse_whitespace(&key))
    }
}

/// Build an escaped character class from a set of literal characters.
///
/// Returns `None` for an empty set, which matches nothing.
fn char_class(chars: &str) -> Option<String> {
    if chars.is_empty() {
        return None;
    }
    let escaped: String = chars
        .chars()
        .map(|c| regex::escape(c.encode_utf8(&mut [0; 4])))
        .collect();
    Some(format!("[{escaped}]"))
}

/// Decompose (NFKD) and drop combining diacritical marks
fn fold_diacritics(s: &str) -> String {
    s.nfkd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect()
}

/// Collapse whitespace runs into a single space and trim
fn collapse_whitespace(s: &str) -> String {
    WHITESPACE_RUN.replace_all(s, " ").trim().to_string()
}
