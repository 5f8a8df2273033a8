//! Builder for request parameters.
//!
//! Parameters are an ordered list of unique keys mapped to scalar values
//! rendered as strings. The same list is sent as a query string for GET and
//! DELETE requests and as a form-encoded body otherwise.

use std::fmt::{self, Display};

/// Ordered, key-unique request parameters.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    /// Create a new, empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Set a key, replacing any value already stored under it.
    pub fn push<T>(&mut self, key: impl Into<String>, value: T)
    where
        T: Display,
    {
        let key = key.into();
        let value = value.to_string();
        match self.pairs.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => slot.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Set a key only when the value is present.
    pub fn push_opt<T>(&mut self, key: impl Into<String>, value: Option<T>)
    where
        T: Display,
    {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    /// Set a key using a mapping function when the value is present.
    pub fn push_opt_with<T, F>(&mut self, key: impl Into<String>, value: Option<T>, mut map: F)
    where
        F: FnMut(T) -> String,
    {
        if let Some(value) = value {
            self.push(key, map(value));
        }
    }

    /// Set a key only if it is not already present.
    ///
    /// Returns true when the value was stored.
    pub fn push_absent<T>(&mut self, key: impl Into<String>, value: T) -> bool
    where
        T: Display,
    {
        let key = key.into();
        if self.contains(&key) {
            return false;
        }
        self.pairs.push((key, value.to_string()));
        true
    }

    /// Chainable form of [`Params::push`].
    #[must_use]
    pub fn with<T>(mut self, key: impl Into<String>, value: T) -> Self
    where
        T: Display,
    {
        self.push(key, value);
        self
    }

    /// Copy every pair of `other` into this set, replacing duplicates.
    pub fn extend(&mut self, other: Self) {
        for (key, value) in other.pairs {
            self.push(key, value);
        }
    }

    /// Value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    /// Returns true if `key` is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(existing, _)| existing == key)
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if no parameters have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Borrow the collected key/value pairs.
    #[must_use]
    pub fn as_pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}

impl Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (index, (key, value)) in self.pairs.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {value:?}")?;
        }
        f.write_str("}")
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Display,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.push(key, value);
        }
        params
    }
}
