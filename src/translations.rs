//! Accumulated translation data.

use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Raw phrase → translation pairs as read from one source
pub type Dictionary = BTreeMap<String, String>;

/// Merged translation mapping built up across load phases
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Translations(BTreeMap<String, String>);

impl Translations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a dictionary on top of the current data.
    ///
    /// A pair whose translation equals its phrase removes any earlier
    /// translation of that phrase; anything else overwrites.
    pub fn add_data(&mut self, data: Dictionary) {
        for (phrase, translation) in data {
            if phrase == translation {
                self.0.remove(&phrase);
                continue;
            }
            self.0.insert(phrase, translation);
        }
    }

    pub fn get(&self, phrase: &str) -> Option<&str> {
        self.0.get(phrase).map(String::as_str)
    }

    /// Translated phrase, or the phrase itself when no translation is loaded
    pub fn translate<'a>(&'a self, phrase: &'a str) -> &'a str {
        self.get(phrase).unwrap_or(phrase)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.0.iter()
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl From<Dictionary> for Translations {
    fn from(data: Dictionary) -> Self {
        Self(data)
    }
}

impl<'a> IntoIterator for &'a Translations {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Translations {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
