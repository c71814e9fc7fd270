//! Command-line flag rendering

use indexmap::IndexMap;

use crate::ssh::sanitize::ArgumentQuoting;

/// Ordered mapping from flag name to flag value
///
/// Rendered as `" " + key + " " + value` per entry, in insertion order.
/// Inserting a key that is already present updates its value and keeps its
/// original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet {
    entries: IndexMap<String, String>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a flag, builder style
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render every entry verbatim
    ///
    /// Keys and values are not escaped; whatever they contain ends up on
    /// the remote command line.
    pub fn render(&self) -> String {
        self.render_with(ArgumentQuoting::Verbatim)
    }

    /// Render with values passed through `quoting`; keys stay verbatim
    pub fn render_with(&self, quoting: ArgumentQuoting) -> String {
        self.entries
            .iter()
            .map(|(key, value)| format!(" {} {}", key, quoting.apply(value)))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for AttributeSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (key, value) in iter {
            set.insert(key, value);
        }
        set
    }
}
