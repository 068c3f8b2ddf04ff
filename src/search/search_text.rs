use crate::search::traits::ExternalText;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Operator joining tokens in a full-text query; any token may match.
const TOKEN_SEPARATOR: &str = " | ";

/// Free text typed into the browse search box, trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SearchText(String);

impl ExternalText for SearchText {
    fn cleaned(&self) -> Self {
        SearchText(self.clean(&self.0))
    }
}

impl SearchText {
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        Some(SearchText(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Words used for full-text matching. Punctuation never survives, so
    /// tokens are safe to hand to a text-query parser.
    pub fn tokens(&self) -> Vec<String> {
        self.cleaned()
            .0
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    /// Tokens joined with the OR operator, e.g. `denim | jacket`.
    pub fn text_query(&self) -> Option<String> {
        let tokens = self.tokens();
        if tokens.is_empty() {
            return None;
        }
        Some(tokens.join(TOKEN_SEPARATOR))
    }

    /// Pattern for a substring match of the whole text.
    pub fn like_pattern(&self) -> String {
        contains_pattern(&self.0)
    }
}

/// `LIKE` pattern matching `value` anywhere, with `value` taken literally.
pub fn contains_pattern(value: &str) -> String {
    format!("%{}%", escape_like(value))
}

/// Escapes `LIKE` wildcards using the default `\` escape character.
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl Display for SearchText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
