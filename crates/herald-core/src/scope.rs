//! Scope chains.

use std::fmt;

/// Delimiter between scope segments in rendered output.
pub const SCOPE_DELIMITER: &str = ">";

/// Ordered scope segments. Empty means unscoped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeChain {
    segments: Vec<String>,
}

impl ScopeChain {
    /// An unscoped chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a chain from names, skipping blank ones.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut chain = Self::new();
        chain.extend(names);
        chain
    }

    /// A new chain with `names` appended in order. Blank names are skipped.
    pub fn pushed<I, S>(&self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut chain = self.clone();
        chain.extend(names);
        chain
    }

    fn extend<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.segments.extend(
            names
                .into_iter()
                .map(|name| name.as_ref().trim().to_string())
                .filter(|name| !name.is_empty()),
        );
    }

    /// Drop every segment.
    pub fn clear(&mut self) {
        self.segments.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Bracketed path such as `[a>b]`, or `None` when unscoped.
    pub fn render(&self) -> Option<String> {
        if self.segments.is_empty() {
            None
        } else {
            Some(format!("[{}]", self.segments.join(SCOPE_DELIMITER)))
        }
    }
}

impl fmt::Display for ScopeChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join(SCOPE_DELIMITER))
    }
}
