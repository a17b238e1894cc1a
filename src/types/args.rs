//! Ordered key/value arguments for path and query substitution

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::{Result, RiftError};

/// Bytes escaped in a value substituted into a path segment.
pub(crate) const PATH_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Bytes escaped in a query key or value.
const QUERY_COMPONENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'`');

/// Ordered list of uniquely keyed arguments.
///
/// Used both for `{name}` placeholders in an operation template and for
/// query parameters. Iteration follows insertion order, so a URL built from
/// the same list is always the same string.
///
/// Values are stored raw and percent-encoded when the URL is built; pass
/// them unencoded.
///
/// ```rust
/// # use riftgate::types::ArgList;
/// let args = ArgList::new()
///     .arg("summonerId", 123)
///     .arg("season", "SEASON2015");
/// assert_eq!(args.get("summonerId"), Some("123"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgList {
    entries: Vec<(String, String)>,
}

impl ArgList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a flat `[key, value, key, value, ...]` slice.
    ///
    /// Fails with [`RiftError::ArgumentCount`] when the slice has odd length.
    pub fn from_pairs<S: AsRef<str>>(items: &[S]) -> Result<Self> {
        if items.len() % 2 != 0 {
            return Err(RiftError::ArgumentCount(items.len()));
        }
        let mut args = Self::new();
        for pair in items.chunks_exact(2) {
            args.insert(pair[0].as_ref(), pair[1].as_ref());
        }
        Ok(args)
    }

    /// Add an argument, builder style.
    pub fn arg(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    /// Add an argument. An existing key keeps its position and takes the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        let value = value.to_string();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize as `k=v&k=v` in insertion order, percent-encoding both sides.
    pub fn to_query_string(&self) -> String {
        self.iter()
            .map(|(k, v)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(k, QUERY_COMPONENT),
                    utf8_percent_encode(v, QUERY_COMPONENT)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for ArgList {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = Self::new();
        for (k, v) in iter {
            args.insert(k, v);
        }
        args
    }
}
