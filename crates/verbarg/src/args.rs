use indexmap::IndexMap;
use serde::Serialize;

/// Result of a successful parse.
///
/// `values` maps a parameter's canonical key to the supplied value. A key
/// with an empty value means a flag-style parameter was present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedArgs {
    pub verb: String,
    pub values: IndexMap<String, String>,
}

impl ParsedArgs {
    pub fn new(verb: impl Into<String>) -> Self {
        Self {
            verb: verb.into(),
            values: IndexMap::new(),
        }
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// The value for `key`, or `""` for a flag that was present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Supplied pairs in the order they first appeared on the command line.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub(crate) fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }
}
