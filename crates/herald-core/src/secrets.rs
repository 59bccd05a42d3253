//! Secret redaction.
//!
//! Secrets are literal tokens that must never appear verbatim in rendered
//! output. Matching is case-sensitive, leftmost-first and non-overlapping;
//! when several secrets start at the same offset the longest one wins.
//! An occurrence lying wholly inside a mask token is left alone, so a secret
//! that happens to be part of the mask (`cure`) does not re-trigger. One that
//! straddles a mask boundary is still replaced. Redaction is idempotent as
//! long as no secret contains a bracket.

use std::borrow::Cow;
use std::collections::BTreeSet;

/// Replacement written in place of each secret occurrence.
pub const MASK: &str = "[secure]";

/// Set of secret tokens owned by one logger instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretSet {
    tokens: BTreeSet<String>,
}

impl SecretSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Union `secrets` into the set. Values are compared in their string
    /// form; empty strings are ignored.
    pub fn add<I, S>(&mut self, secrets: I)
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.tokens.extend(
            secrets
                .into_iter()
                .map(|s| s.to_string())
                .filter(|s| !s.is_empty()),
        );
    }

    /// Remove every secret.
    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    /// Number of distinct secrets.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the set holds no secret.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Whether `token` is registered.
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    /// Mask every secret occurrence in `text`.
    pub fn redact<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.tokens.is_empty() || !self.tokens.iter().any(|t| text.contains(t.as_str())) {
            return Cow::Borrowed(text);
        }

        let masks: Vec<(usize, usize)> = text
            .match_indices(MASK)
            .map(|(at, _)| (at, at + MASK.len()))
            .collect();
        let mut out = String::with_capacity(text.len());
        let mut pos = 0;

        while let Some((start, len)) = self.next_match(text, pos, &masks) {
            out.push_str(&text[pos..start]);
            out.push_str(MASK);
            pos = start + len;
        }
        out.push_str(&text[pos..]);

        if out == text {
            Cow::Borrowed(text)
        } else {
            Cow::Owned(out)
        }
    }

    /// Earliest match at or after `from` as `(offset, length)`, longest on
    /// ties. Occurrences lying wholly inside a mask are skipped.
    fn next_match(&self, text: &str, from: usize, masks: &[(usize, usize)]) -> Option<(usize, usize)> {
        self.tokens
            .iter()
            .filter_map(|token| {
                first_outside_masks(text, token, from, masks).map(|at| (at, token.len()))
            })
            .min_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)))
    }
}

fn first_outside_masks(text: &str, token: &str, from: usize, masks: &[(usize, usize)]) -> Option<usize> {
    let mut at = from;
    while let Some(found) = text[at..].find(token) {
        let start = at + found;
        let end = start + token.len();
        if !masks.iter().any(|&(m0, m1)| m0 <= start && end <= m1) {
            return Some(start);
        }
        // Step one char so overlapping occurrences are still seen
        at = start + text[start..].chars().next().map_or(1, char::len_utf8);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(tokens: &[&str]) -> SecretSet {
        let mut secrets = SecretSet::new();
        secrets.add(tokens.iter().copied());
        secrets
    }

    #[test]
    fn test_redacts_every_occurrence() {
        let secrets = set(&["pw123"]);
        assert_eq!(
            secrets.redact("token=pw123 again pw123"),
            "token=[secure] again [secure]"
        );
    }

    #[test]
    fn test_no_secrets_borrows() {
        let secrets = SecretSet::new();
        assert!(matches!(secrets.redact("plain"), Cow::Borrowed("plain")));
        let secrets = set(&["x1"]);
        assert!(matches!(secrets.redact("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_case_sensitive() {
        let secrets = set(&["Key"]);
        assert_eq!(secrets.redact("key Key KEY"), "key [secure] KEY");
    }

    #[test]
    fn test_longest_match_at_same_offset() {
        let secrets = set(&["abc", "abcdef"]);
        assert_eq!(secrets.redact("xabcdefx"), "x[secure]x");
    }

    #[test]
    fn test_leftmost_non_overlapping() {
        let secrets = set(&["aba"]);
        assert_eq!(secrets.redact("ababa"), "[secure]ba");
    }

    #[test]
    fn test_idempotent_when_secret_inside_mask() {
        let secrets = set(&["cure", "pw"]);
        let once = secrets.redact("pw cure");
        assert_eq!(once, "[secure] [secure]");
        let twice = secrets.redact(&once);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_secret_straddling_literal_mask() {
        let secrets = set(&["e]pw"]);
        let out = secrets.redact("[secure]pw");
        assert_eq!(out, "[secur[secure]");
        assert!(!out.contains("e]pw"));
    }

    #[test]
    fn test_overlapping_occurrence_after_mask() {
        let secrets = set(&["ure]x"]);
        assert_eq!(secrets.redact("[secure]x"), "[sec[secure]");
    }

    #[test]
    fn test_numbers_compare_as_strings() {
        let mut secrets = SecretSet::new();
        secrets.add([4242, 7]);
        assert!(secrets.contains("4242"));
        assert_eq!(secrets.redact("pin 4242"), "pin [secure]");
    }

    #[test]
    fn test_add_is_union_and_clear_empties() {
        let mut secrets = set(&["a1", "b2"]);
        secrets.add(["b2", "c3", ""]);
        assert_eq!(secrets.len(), 3);
        secrets.clear();
        assert!(secrets.is_empty());
        assert_eq!(secrets.redact("a1"), "a1");
    }

    #[test]
    fn test_multibyte_text() {
        let secrets = set(&["sécret"]);
        assert_eq!(secrets.redact("✔ le sécret ✔"), "✔ le [secure] ✔");
    }
}
