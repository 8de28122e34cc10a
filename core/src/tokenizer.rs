use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref DELIMITERS: Regex = Regex::new(r"[ ,.!?]+").expect("valid regex");
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &["the", "and", "or", "in", "on", "of", "with"];
        words.iter().copied().collect()
    };
}

pub fn is_stopword(term: &str) -> bool { STOPWORDS.contains(term) }

/// Split raw text on space, comma, period, `!` and `?`, dropping empty fragments.
pub fn split_tokens(text: &str) -> Vec<&str> {
    DELIMITERS.split(text).filter(|s| !s.is_empty()).collect()
}

/// Lowercase (ASCII only), strip one trailing "es" or "ed", then drop stop words.
///
/// Returns an empty string when the token should not be indexed.
pub fn normalize(token: &str) -> String {
    let lowered = token.to_ascii_lowercase();
    let stem = lowered
        .strip_suffix("es")
        .or_else(|| lowered.strip_suffix("ed"))
        .unwrap_or(lowered.as_str());
    if is_stopword(stem) {
        return String::new();
    }
    stem.to_string()
}

/// Split and normalize text, keeping only terms worth indexing.
pub fn tokenize(text: &str) -> Vec<String> {
    split_tokens(text)
        .into_iter()
        .map(normalize)
        .filter(|term| !term.is_empty())
        .collect()
}
