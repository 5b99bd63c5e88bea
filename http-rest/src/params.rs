//! route parameters and the capability extracting them.

use std::{
    collections::{HashMap, hash_map},
    sync::Arc,
};

use http::Extensions;

/// Function extracting route parameters from the per request scope.
///
/// The scope is the [Extensions] of inbound request where router integration can store matched
/// parameters. It's configured once with [Wrapper::params] and shared by all requests.
///
/// [Wrapper::params]: crate::Wrapper::params
pub type ParamsFn = Arc<dyn Fn(&Extensions) -> Params + Send + Sync>;

/// Map of route parameter name to value. Keys are unique.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Params {
    map: HashMap<String, String>,
}

impl Params {
    pub fn new() -> Self {
        Self { map: HashMap::new() }
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if there are no parameters in the map.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the value of parameter registered under the given key.
    pub fn get(&self, key: impl AsRef<str>) -> Option<&str> {
        self.map.get(key.as_ref()).map(String::as_str)
    }

    /// Inserts a key value parameter pair into the map. Existing value of the same key is
    /// replaced and returned.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.map.insert(key.into(), value.into())
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.map.iter(),
        }
    }
}

impl From<HashMap<String, String>> for Params {
    fn from(map: HashMap<String, String>) -> Self {
        Self { map }
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl IntoIterator for Params {
    type Item = (String, String);
    type IntoIter = hash_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.into_iter()
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct Iter<'a> {
    inner: hash_map::Iter<'a, String, String>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
