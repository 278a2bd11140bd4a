//! Parameter paths
//!
//! A parameter path is the ordered list of keys leading from the top of a
//! config document to a nested entry, e.g. `["instruments", "sg", "address"]`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator used when a path is written as a single dotted string
pub const DOTTED_SEPARATOR: char = '.';

/// Ordered sequence of keys addressing a nested config entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamPath(Vec<String>);

impl ParamPath {
    pub fn new(keys: Vec<String>) -> Self {
        Self(keys)
    }

    /// Split a dotted string (`a.b.c`) into a path
    pub fn parse_dotted(s: &str) -> Self {
        if s.is_empty() {
            return Self::default();
        }
        s.split(DOTTED_SEPARATOR).map(str::to_string).collect()
    }

    /// Build a path from command-line words.
    ///
    /// A single word is treated as a dotted path; several words are taken
    /// as individual keys so that keys containing dots stay addressable.
    pub fn from_args(args: &[String]) -> Self {
        match args {
            [single] => Self::parse_dotted(single),
            many => many.iter().cloned().collect(),
        }
    }

    pub fn keys(&self) -> &[String] {
        &self.0
    }

    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ParamPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" -> "))
    }
}

impl FromIterator<String> for ParamPath {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for ParamPath {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for ParamPath {
    fn from(keys: Vec<String>) -> Self {
        Self(keys)
    }
}

impl From<&[&str]> for ParamPath {
    fn from(keys: &[&str]) -> Self {
        keys.iter().copied().collect()
    }
}
