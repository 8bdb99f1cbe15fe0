use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use thiserror::Error;

use crate::schema::VerbDef;

/// Reserved verb, always registered first with no parameters.
pub const HELP_VERB: &str = "help";

const HELP_DESCRIPTION: &str = "Print this help message.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("verb name must not be empty")]
    EmptyVerbName,
    #[error("'{0}' is a reserved verb")]
    ReservedVerb(String),
    #[error("verb '{0}' is registered more than once")]
    DuplicateVerb(String),
    #[error("verb '{verb}' has a parameter with an empty key")]
    EmptyKey { verb: String },
    #[error("verb '{verb}' declares parameter '{key}' more than once")]
    DuplicateKey { verb: String, key: String },
    #[error("parameter '{key}' of verb '{verb}' has no aliases")]
    NoAliases { verb: String, key: String },
    #[error("parameter '{key}' of verb '{verb}' has an empty alias")]
    EmptyAlias { verb: String, key: String },
    #[error("alias conflict in verb '{verb}': '{alias}' maps to both '{first}' and '{second}'")]
    AmbiguousAlias {
        verb: String,
        alias: String,
        first: String,
        second: String,
    },
}

/// The set of known verbs, in registration order.
///
/// Immutable once built; pass it by reference to [`crate::parse`] or
/// [`crate::process_args`].
#[derive(Debug, Clone)]
pub struct Registry {
    program: String,
    verbs: IndexMap<String, VerbDef>,
}

impl Registry {
    pub fn builder(program: impl Into<String>) -> RegistryBuilder {
        RegistryBuilder {
            program: program.into(),
            verbs: Vec::new(),
        }
    }

    /// Program name shown in usage text.
    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get(&self, verb: &str) -> Option<&VerbDef> {
        self.verbs.get(verb)
    }

    pub fn is_verb_valid(&self, verb: &str) -> bool {
        self.verbs.contains_key(verb)
    }

    /// All verbs including `help`, in registration order.
    pub fn verbs(&self) -> impl Iterator<Item = &VerbDef> {
        self.verbs.values()
    }

    pub fn len(&self) -> usize {
        self.verbs.len()
    }

    /// Always false: `help` is registered unconditionally.
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct RegistryBuilder {
    program: String,
    verbs: Vec<VerbDef>,
}

impl RegistryBuilder {
    pub fn verb(mut self, verb: VerbDef) -> Self {
        self.verbs.push(verb);
        self
    }

    pub fn verbs(mut self, verbs: impl IntoIterator<Item = VerbDef>) -> Self {
        self.verbs.extend(verbs);
        self
    }

    /// Validate the declarations and freeze them into a [`Registry`].
    pub fn build(self) -> Result<Registry, RegistryError> {
        let mut verbs: IndexMap<String, VerbDef> = IndexMap::new();
        verbs.insert(
            HELP_VERB.to_string(),
            VerbDef::new(HELP_VERB, HELP_DESCRIPTION),
        );

        for verb in self.verbs {
            if verb.name.trim().is_empty() {
                return Err(RegistryError::EmptyVerbName);
            }
            if verb.name == HELP_VERB {
                return Err(RegistryError::ReservedVerb(verb.name));
            }
            if verbs.contains_key(&verb.name) {
                return Err(RegistryError::DuplicateVerb(verb.name));
            }
            validate_params(&verb)?;
            tracing::trace!(verb = %verb.name, params = verb.params.len(), "registered verb");
            verbs.insert(verb.name.clone(), verb);
        }

        Ok(Registry {
            program: self.program,
            verbs,
        })
    }
}

fn validate_params(verb: &VerbDef) -> Result<(), RegistryError> {
    let mut keys: HashSet<&str> = HashSet::new();
    let mut alias_map: HashMap<&str, &str> = HashMap::new();

    for param in &verb.params {
        if param.key.trim().is_empty() {
            return Err(RegistryError::EmptyKey {
                verb: verb.name.clone(),
            });
        }
        if !keys.insert(param.key.as_str()) {
            return Err(RegistryError::DuplicateKey {
                verb: verb.name.clone(),
                key: param.key.clone(),
            });
        }
        if param.aliases.is_empty() {
            return Err(RegistryError::NoAliases {
                verb: verb.name.clone(),
                key: param.key.clone(),
            });
        }
        for alias in &param.aliases {
            if alias.is_empty() {
                return Err(RegistryError::EmptyAlias {
                    verb: verb.name.clone(),
                    key: param.key.clone(),
                });
            }
            if let Some(prev) = alias_map.insert(alias.as_str(), param.key.as_str()) {
                return Err(RegistryError::AmbiguousAlias {
                    verb: verb.name.clone(),
                    alias: alias.clone(),
                    first: prev.to_string(),
                    second: param.key.clone(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ParamDef;

    fn sock() -> ParamDef {
        ParamDef::new("unixsock", ["unixsock", "sock"], "Socket path").takes_value()
    }

    #[test]
    fn help_is_always_first() {
        let registry = Registry::builder("bip")
            .verb(VerbDef::new("node", "Creates a node."))
            .verb(VerbDef::new("fssd", "Filesystem service."))
            .build()
            .unwrap();
        let names: Vec<&str> = registry.verbs().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["help", "node", "fssd"]);
        assert!(registry.get(HELP_VERB).unwrap().params.is_empty());
        assert!(registry.is_verb_valid("node"));
        assert!(!registry.is_verb_valid("mond"));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn rejects_duplicate_verb() {
        let err = Registry::builder("bip")
            .verb(VerbDef::new("node", ""))
            .verb(VerbDef::new("node", ""))
            .build()
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateVerb("node".to_string()));
    }

    #[test]
    fn rejects_reserved_and_empty_names() {
        let err = Registry::builder("bip")
            .verb(VerbDef::new("help", ""))
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::ReservedVerb(_)));

        let err = Registry::builder("bip")
            .verb(VerbDef::new(" ", ""))
            .build()
            .unwrap_err();
        assert_eq!(err, RegistryError::EmptyVerbName);
    }

    #[test]
    fn rejects_overlapping_aliases() {
        let err = Registry::builder("bip")
            .verb(
                VerbDef::new("statd", "")
                    .param(sock())
                    .param(ParamDef::new("interval", ["interval", "sock"], "").optional()),
            )
            .build()
            .unwrap_err();
        match err {
            RegistryError::AmbiguousAlias {
                alias,
                first,
                second,
                ..
            } => {
                assert_eq!(alias, "sock");
                assert_eq!(first, "unixsock");
                assert_eq!(second, "interval");
            }
            other => panic!("expected AmbiguousAlias, got: {other:?}"),
        }
    }

    #[test]
    fn rejects_bad_parameters() {
        let err = Registry::builder("bip")
            .verb(VerbDef::new("fssd", "").param(sock()).param(sock()))
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateKey { .. }));

        let err = Registry::builder("bip")
            .verb(VerbDef::new("fssd", "").param(ParamDef::new("k", Vec::<String>::new(), "")))
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::NoAliases { .. }));

        let err = Registry::builder("bip")
            .verb(VerbDef::new("fssd", "").param(ParamDef::new("k", ["k", ""], "")))
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::EmptyAlias { .. }));

        let err = Registry::builder("bip")
            .verb(VerbDef::new("fssd", "").param(ParamDef::new("", ["k"], "")))
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::EmptyKey { .. }));
    }

    #[test]
    fn error_messages_name_the_offender() {
        let err = Registry::builder("bip")
            .verb(VerbDef::new("fssd", "").param(ParamDef::new("k", ["a", "a"], "")))
            .build()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "alias conflict in verb 'fssd': 'a' maps to both 'k' and 'k'"
        );
    }
}
