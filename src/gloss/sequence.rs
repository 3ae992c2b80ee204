/*!
 * Gloss output values.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator emitted between a condition clause and its main clause
pub const CLAUSE_SEPARATOR: &str = ",";

/// Marker emitted for any negation token
pub const NEGATION_MARKER: &str = "NOT";

/// A single sign written as text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlossToken(String);

impl GlossToken {
    /// Uppercase a word into a gloss
    pub fn from_word(word: &str) -> Self {
        Self(word.to_uppercase())
    }

    pub fn separator() -> Self {
        Self(CLAUSE_SEPARATOR.to_string())
    }

    pub fn negation() -> Self {
        Self(NEGATION_MARKER.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_separator(&self) -> bool {
        self.0 == CLAUSE_SEPARATOR
    }
}

impl fmt::Display for GlossToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for GlossToken {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Ordered glosses for one sentence
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlossSequence(Vec<GlossToken>);

impl GlossSequence {
    pub fn new(tokens: Vec<GlossToken>) -> Self {
        Self(tokens)
    }

    /// Join a condition clause and a main clause.
    ///
    /// An empty condition yields the main clause unchanged; otherwise the two
    /// are separated by exactly one comma.
    pub fn join_clauses(condition: GlossSequence, main: GlossSequence) -> Self {
        if condition.is_empty() {
            return main;
        }

        let mut tokens = condition.0;
        tokens.reserve(main.len() + 1);
        tokens.push(GlossToken::separator());
        tokens.extend(main.0);
        Self(tokens)
    }

    pub fn tokens(&self) -> &[GlossToken] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GlossToken> {
        self.0.iter()
    }

    /// Plain string view, handy for printing and assertions
    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(|t| t.as_str().to_string()).collect()
    }
}

impl fmt::Display for GlossSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

impl FromIterator<GlossToken> for GlossSequence {
    fn from_iter<I: IntoIterator<Item = GlossToken>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for GlossSequence {
    type Item = GlossToken;
    type IntoIter = std::vec::IntoIter<GlossToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a GlossSequence {
    type Item = &'a GlossToken;
    type IntoIter = std::slice::Iter<'a, GlossToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
