//! Target selectors.

use std::fmt::Display;

/// A target selector such as `@e[type=cow]`.
///
/// Selectors are immutable: adding or removing arguments returns a new selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    name: String,
    arguments: Vec<(String, String)>,
}

impl Selector {
    /// Create a selector without arguments.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            arguments: Vec::new(),
        }
    }

    /// Create a selector with arguments.
    #[must_use]
    pub fn with_arguments<K, V>(name: &str, arguments: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Display,
    {
        Self::new(name).with(arguments)
    }

    /// Get the selector variable, e.g. `@e`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get an argument value by key.
    #[must_use]
    pub fn argument(&self, key: &str) -> Option<&str> {
        self.arguments
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Return a new selector with the given arguments merged in.
    ///
    /// A key that is already present keeps its position and takes the new value.
    #[must_use]
    pub fn with<K, V>(&self, arguments: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Display,
    {
        let mut selector = self.clone();
        for (key, value) in arguments {
            let key = key.into();
            let value = value.to_string();
            match selector.arguments.iter_mut().find(|(k, _)| *k == key) {
                Some((_, existing)) => *existing = value,
                None => selector.arguments.push((key, value)),
            }
        }
        selector
    }

    /// Return a new selector without the given argument.
    #[must_use]
    pub fn without(&self, key: &str) -> Self {
        let mut selector = self.clone();
        selector.arguments.retain(|(k, _)| k != key);
        selector
    }
}

impl Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)?;
        if !self.arguments.is_empty() {
            let arguments = self
                .arguments
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join(",");
            write!(f, "[{arguments}]")?;
        }
        Ok(())
    }
}
