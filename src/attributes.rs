//! Document attributes: named string values that parameterize a conversion.
//!
//! Attributes come from three places, applied in this order:
//!
//! * the converter defaults (e.g. the release version),
//! * the per-call overrides supplied by the caller,
//! * the document header (frontmatter).
//!
//! Caller values beat defaults. A caller value ending in `@` is a *soft* value:
//! the `@` is dropped and the document header may replace it. Hard caller values
//! always win over the header.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Captures;
use regex::Regex;
use serde::Deserialize;
use serde::Serialize;

use crate::render::fence::Fence;
use crate::Error;

/// Matches `{name}` and the escaped form `\{name}`.
static REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\\)?\{([A-Za-z0-9_][A-Za-z0-9_-]*)\}").unwrap());

const SOFT_SUFFIX: char = '@';

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes {
    map: BTreeMap<String, String>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.map.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.map.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.map.iter()
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.map
    }

    /// Copy every entry of `other` into `self`; `other` wins on collision.
    pub fn merge(&mut self, other: &Attributes) {
        for (k, v) in other.iter() {
            self.map.insert(k.clone(), v.clone());
        }
    }

    /// Build a new map of `base` overlaid with `overrides`, leaving `base` untouched.
    pub fn merged(base: &Attributes, overrides: &Attributes) -> Attributes {
        let mut x = base.clone();
        x.merge(overrides);
        x
    }

    /// Combine caller supplied attributes with the ones declared in a document header.
    ///
    /// Soft caller values (trailing `@`) yield to the header, hard ones don't.
    /// The returned map never contains the soft marker.
    pub fn resolve(api: &Attributes, header: &Attributes) -> Attributes {
        let mut resolved = Attributes::new();
        let mut hard = Vec::new();

        for (k, v) in api.iter() {
            match v.strip_suffix(SOFT_SUFFIX) {
                Some(soft) => {
                    resolved.insert(k.clone(), soft);
                }
                None => {
                    resolved.insert(k.clone(), v.clone());
                    hard.push(k.as_str());
                }
            }
        }

        for (k, v) in header.iter() {
            if hard.contains(&k.as_str()) {
                log::debug!("header attribute {} ignored, set by caller", k);
                continue;
            }
            resolved.insert(k.clone(), v.clone());
        }

        resolved
    }

    /// Parse a `key=value` pair. A bare `key` sets the attribute to an empty value.
    pub fn parse_pair(s: &str) -> Result<(String, String), Error> {
        let (k, v) = match s.split_once('=') {
            Some((k, v)) => (k.trim(), v),
            None => (s.trim(), ""),
        };

        if k.is_empty() {
            return Err(Error::InvalidAttribute(s.to_string()));
        }

        Ok((k.to_string(), v.to_string()))
    }

    /// Replace attribute references in `text` with their values.
    ///
    /// Unknown references are kept verbatim, `\{name}` renders as `{name}`.
    /// Fenced code blocks are copied untouched.
    pub fn substitute(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut fence = Fence::default();

        for line in text.split_inclusive('\n') {
            if fence.feed(line) {
                out.push_str(line);
            } else {
                out.push_str(&self.substitute_line(line));
            }
        }

        out
    }

    fn substitute_line(&self, line: &str) -> String {
        REFERENCE
            .replace_all(line, |caps: &Captures| {
                let name = &caps[2];

                if caps.get(1).is_some() {
                    return format!("{{{}}}", name);
                }

                match self.get(name) {
                    Some(value) => value.to_string(),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let map = iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Attributes { map }
    }
}

impl<K, V> Extend<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl IntoIterator for Attributes {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.into_iter()
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}
