//! Pure text cleanup between OCR and classification.

use std::{collections::HashSet, sync::LazyLock};

use regex::Regex;

static INGREDIENTS_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)ingredients?\s*[:\-]\s*").expect("valid label regex"));

static TOKEN_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,\n;]").expect("valid separator regex"));

static CONTAINS_PHRASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^contains\s").expect("valid contains regex"));

static TRAILING_INCLUDING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)including$").expect("valid including regex"));

/// OCR output shorter than this (after trimming) is treated as "nothing detected".
const MIN_TEXT_CHARS: usize = 2;

pub fn has_enough_text(raw_text: &str) -> bool {
    raw_text.trim().chars().count() >= MIN_TEXT_CHARS
}

/// Removes the first `Ingredients:` / `ingredient -` label.
pub fn strip_ingredients_label(raw_text: &str) -> String {
    INGREDIENTS_LABEL.replacen(raw_text, 1, "").into_owned()
}

/// Splits on comma, semicolon or newline, trims, and drops single-character pieces.
pub fn split_candidates(text: &str) -> Vec<String> {
    TOKEN_SEPARATOR
        .split(text)
        .map(str::trim)
        .filter(|piece| piece.chars().count() > 1)
        .map(str::to_string)
        .collect()
}

pub fn normalize(raw_text: &str) -> Vec<String> {
    split_candidates(&strip_ingredients_label(raw_text))
}

/// Keeps the first occurrence of every token.
pub fn dedupe(tokens: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    tokens
        .into_iter()
        .filter(|token| seen.insert(token.clone()))
        .collect()
}

/// Post-correction filter producing the canonical ingredient list.
pub fn canonicalize(tokens: Vec<String>, max_ingredients: usize) -> Vec<String> {
    tokens
        .into_iter()
        .map(|token| token.trim().to_string())
        .filter(|token| token.chars().count() > 2)
        .filter(|token| !CONTAINS_PHRASE.is_match(token))
        .filter(|token| !TRAILING_INCLUDING.is_match(token))
        .take(max_ingredients)
        .collect()
}
