//! Verb and parameter declarations.
//!
//! These are plain data: they can be built in code with the chaining helpers
//! below or deserialized from a manifest.

use serde::{Deserialize, Serialize};

/// One named parameter of a verb.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ParamDef {
    /// Canonical key the value is stored under in [`crate::ParsedArgs`].
    pub key: String,
    /// Accepted spellings on the command line. All are equivalent.
    pub aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub optional: bool,
    /// Whether the next token is consumed as the value.
    #[serde(default)]
    pub takes_value: bool,
}

impl ParamDef {
    /// A mandatory flag-style parameter. Chain [`ParamDef::optional`] and
    /// [`ParamDef::takes_value`] to change either property.
    pub fn new<I, S>(key: impl Into<String>, aliases: I, description: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.into(),
            aliases: aliases.into_iter().map(Into::into).collect(),
            description: description.into(),
            optional: false,
            takes_value: false,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn takes_value(mut self) -> Self {
        self.takes_value = true;
        self
    }

    /// Whether `token` is one of this parameter's aliases (exact match).
    pub fn matches(&self, token: &str) -> bool {
        self.aliases.iter().any(|a| a == token)
    }
}

/// One verb (subcommand) and its parameter schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct VerbDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<ParamDef>,
}

impl VerbDef {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: Vec::new(),
        }
    }

    pub fn param(mut self, param: ParamDef) -> Self {
        self.params.push(param);
        self
    }

    pub fn params(mut self, params: impl IntoIterator<Item = ParamDef>) -> Self {
        self.params.extend(params);
        self
    }

    /// First parameter (declaration order) accepting `token`.
    pub fn find_param(&self, token: &str) -> Option<&ParamDef> {
        self.params.iter().find(|p| p.matches(token))
    }
}
