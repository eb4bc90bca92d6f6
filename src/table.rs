use std::collections::btree_map::{self, Entry};
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::usv;

/// The name shown for codepoints the table knows nothing about.
pub const UNKNOWN_NAME: &str = "(Unknown)";

/// A dense codepoint → name mapping.
///
/// Tables are built by the [`Synthesizer`](crate::Synthesizer) or loaded
/// from the [`UcdCache`](crate::UcdCache) and are not modified afterwards;
/// share one between readers with an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UcdTable {
    names: BTreeMap<u32, String>,
}

impl UcdTable {
    pub fn new() -> UcdTable {
        UcdTable::default()
    }

    /// Set the name of `codepoint`, replacing any previous one.
    pub fn insert(&mut self, codepoint: u32, name: String) {
        self.names.insert(codepoint, name);
    }

    /// Set the name of `codepoint` only if it has none yet, returning
    /// whether the name was stored.
    pub fn insert_vacant(&mut self, codepoint: u32, name: String) -> bool {
        match self.names.entry(codepoint) {
            Entry::Occupied(_) => false,
            Entry::Vacant(v) => {
                v.insert(name);
                true
            }
        }
    }

    pub fn get(&self, codepoint: u32) -> Option<&str> {
        self.names.get(&codepoint).map(|s| &**s)
    }

    /// Look a name up by its USV label (`"00F1"`, `"1d510"`, ...).
    pub fn get_label(&self, label: &str) -> Option<&str> {
        usv::parse(label).and_then(|cp| self.get(cp))
    }

    /// The name of `c`, or `(Unknown)`.
    pub fn name(&self, c: char) -> &str {
        self.get(c as u32).unwrap_or(UNKNOWN_NAME)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Entries in codepoint order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.names.iter(),
        }
    }
}

pub struct Iter<'a> {
    inner: btree_map::Iter<'a, u32, String>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (u32, &'a str);
    fn next(&mut self) -> Option<(u32, &'a str)> {
        self.inner.next().map(|(&cp, name)| (cp, &**name))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
