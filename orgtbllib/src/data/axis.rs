//! Row and column keys.
//!
//! An [`Axis`] is an ordered list of [`Key`]s sharing one set of level
//! names. A single-level axis has one name and one label per key; a
//! multi-level (hierarchical) axis has one label per level.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::OrgtblError;
use crate::format::labels::tuple_label;
use crate::Result;

/// A row or column key: one label per axis level.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "KeyRepr", into = "KeyRepr")]
pub struct Key(Vec<String>);

impl Key {
    /// Create a key from its per-level labels.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Key(labels.into_iter().map(Into::into).collect())
    }

    /// Create a single-level key.
    pub fn single(label: impl Into<String>) -> Self {
        Key(vec![label.into()])
    }

    /// Labels, outermost level first.
    pub fn labels(&self) -> &[String] {
        &self.0
    }

    /// Label at the given level (empty if out of range).
    pub fn level(&self, level: usize) -> &str {
        self.0.get(level).map(String::as_str).unwrap_or("")
    }

    /// Number of levels in this key.
    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Key {
    /// Single-level keys print as their label; multi-level keys print in
    /// canonical tuple form, e.g. `('a', 'b')`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [label] => f.write_str(label),
            labels => f.write_str(&tuple_label(labels)),
        }
    }
}

impl From<&str> for Key {
    fn from(label: &str) -> Self {
        Key::single(label)
    }
}

impl From<String> for Key {
    fn from(label: String) -> Self {
        Key::single(label)
    }
}

impl From<Vec<String>> for Key {
    fn from(labels: Vec<String>) -> Self {
        Key(labels)
    }
}

impl From<(&str, &str)> for Key {
    fn from((outer, inner): (&str, &str)) -> Self {
        Key::new([outer, inner])
    }
}

/// Serialized form of a key: a bare string for single-level keys,
/// an array of labels otherwise.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum KeyRepr {
    One(String),
    Many(Vec<String>),
}

impl From<KeyRepr> for Key {
    fn from(repr: KeyRepr) -> Self {
        match repr {
            KeyRepr::One(label) => Key::single(label),
            KeyRepr::Many(labels) => Key(labels),
        }
    }
}

impl From<Key> for KeyRepr {
    fn from(key: Key) -> Self {
        let mut labels = key.0;
        if labels.len() == 1 {
            KeyRepr::One(labels.remove(0))
        } else {
            KeyRepr::Many(labels)
        }
    }
}

/// An ordered sequence of keys with named levels.
///
/// Keys need not be unique; see [`Axis::duplicates`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AxisRepr")]
pub struct Axis {
    /// Level names, outermost first (empty string for an unnamed level)
    names: Vec<String>,
    /// Keys in display order
    keys: Vec<Key>,
}

#[derive(Deserialize)]
struct AxisRepr {
    names: Vec<String>,
    keys: Vec<Key>,
}

impl TryFrom<AxisRepr> for Axis {
    type Error = OrgtblError;

    fn try_from(repr: AxisRepr) -> Result<Self> {
        Axis::new(repr.names, repr.keys)
    }
}

impl Axis {
    /// Create an axis, checking that every key has one label per level.
    ///
    /// An empty `names` list is treated as a single unnamed level.
    pub fn new<N, S>(names: N, keys: Vec<Key>) -> Result<Self>
    where
        N: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            names.push(String::new());
        }

        if let Some(bad) = keys.iter().find(|k| k.depth() != names.len()) {
            return Err(OrgtblError::KeyDepth {
                key: bad.to_string(),
                expected: names.len(),
                found: bad.depth(),
            });
        }

        Ok(Axis { names, keys })
    }

    /// Create a single-level axis.
    pub fn flat<I, S>(name: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Axis {
            names: vec![name.into()],
            keys: labels.into_iter().map(Key::single).collect(),
        }
    }

    /// Create an unnamed single-level axis labelled `0..len`.
    pub fn range(len: usize) -> Self {
        Axis::flat("", (0..len).map(|i| i.to_string()))
    }

    /// Level names, outermost first.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of levels.
    pub fn levels(&self) -> usize {
        self.names.len()
    }

    /// Keys in order.
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True if the axis has no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Position of the first occurrence of `key`.
    pub fn position(&self, key: &Key) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }

    /// Keys that occur more than once, each reported once, in order of
    /// their second occurrence.
    pub fn duplicates(&self) -> Vec<Key> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut duplicates = Vec::new();

        for key in &self.keys {
            if !seen.insert(key) && reported.insert(key) {
                duplicates.push(key.clone());
            }
        }

        duplicates
    }
}
