//! Command-line argument sets and their canonical rendering.
//!
//! An [`ArgumentSet`] is an unordered map of flag name to value. Its
//! rendering is the one place an order is imposed: keys are always
//! emitted in ascending byte order, so two sets with the same entries
//! render identically however they were built.

use std::collections::HashMap;
use std::fmt::{self, Write};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Unordered flag name -> value map.
///
/// An empty value renders as a bare flag (`--no-fast-pskip`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentSet {
    args: HashMap<String, String>,
}

impl ArgumentSet {
    /// Create an empty argument set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a flag, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.args.insert(key.into(), value.into())
    }

    /// Insert a flag that takes no value.
    pub fn insert_flag(&mut self, key: impl Into<String>) -> Option<String> {
        self.args.insert(key.into(), String::new())
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Remove a flag, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.args.remove(key)
    }

    /// Look up a flag's value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.args.get(key).map(String::as_str)
    }

    /// Whether the flag is present.
    pub fn contains(&self, key: &str) -> bool {
        self.args.contains_key(key)
    }

    /// Number of flags.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// True when there are no flags.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Overlay `other` on top of this set; its values win.
    pub fn merge(&mut self, other: &ArgumentSet) {
        for (key, value) in &other.args {
            self.args.insert(key.clone(), value.clone());
        }
    }

    /// Entries in ascending key order.
    pub fn sorted(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .args
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Render the set as flags, one leading space per flag.
    ///
    /// With `prefix` set every key gets that prefix. Otherwise
    /// single-character keys get `-` and longer keys get `--`.
    pub fn write_to<W: Write>(&self, out: &mut W, prefix: Option<&str>) -> fmt::Result {
        for (key, value) in self.sorted() {
            let dashes = match prefix {
                Some(prefix) => prefix,
                None if key.chars().count() == 1 => "-",
                None => "--",
            };
            write!(out, " {}{}", dashes, key)?;
            if !value.is_empty() {
                write!(out, " {}", value)?;
            }
        }
        Ok(())
    }

    /// Render the set with the default short/long prefixes.
    pub fn render(&self) -> String {
        let mut text = String::new();
        // Writing into a String cannot fail
        let _ = self.write_to(&mut text, None);
        text
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ArgumentSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            args: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for ArgumentSet {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

/// Serializes as a map with sorted keys so saved files are reproducible.
impl Serialize for ArgumentSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.sorted())
    }
}

/// A flag value as written by hand: `crf = 16` means the same as `crf = "16"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ArgValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl From<ArgValue> for String {
    fn from(value: ArgValue) -> Self {
        match value {
            ArgValue::Text(text) => text,
            ArgValue::Integer(n) => n.to_string(),
            ArgValue::Float(x) => x.to_string(),
            ArgValue::Bool(b) => b.to_string(),
        }
    }
}

impl<'de> Deserialize<'de> for ArgumentSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let args = HashMap::<String, ArgValue>::deserialize(deserializer)?;
        Ok(args.into_iter().collect())
    }
}
