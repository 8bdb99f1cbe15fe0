//! Matching `argv` against the registry.
//!
//! [`parse`] decides the outcome without printing; [`process_args`] runs the
//! same decision and writes the diagnostics and help text a user expects,
//! returning the exit code the program should terminate with.

use std::io::{self, Write};

use thiserror::Error;

use crate::args::ParsedArgs;
use crate::help;
use crate::registry::{HELP_VERB, Registry};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("too few arguments")]
    TooFewArguments,
    #[error("'{verb}' is not a valid verb!")]
    UnknownVerb { verb: String },
    #[error("'{literal}' is not a valid parameter for verb '{verb}'")]
    UnknownParameter { verb: String, literal: String },
    #[error("parameter '{literal}' of verb '{verb}' expects a value")]
    MissingValue {
        verb: String,
        key: String,
        literal: String,
    },
    #[error(
        "mandatory parameter '{key}' ({}) is missing for verb '{verb}'",
        .aliases.join(", ")
    )]
    MissingMandatory {
        verb: String,
        key: String,
        aliases: Vec<String>,
    },
}

impl ParseError {
    /// The `ERROR: ...` line shown to the user, if this error has one.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::TooFewArguments => None,
            other => Some(format!("ERROR: {other}")),
        }
    }
}

/// A parse that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Matched(ParsedArgs),
    /// `help` without a target.
    Usage,
    /// `help <verb>` for a registered verb.
    VerbHelp(String),
}

/// Process exit code. Every display or error path is `Failure`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Success,
    Failure,
}

impl Exit {
    pub fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
        }
    }
}

impl From<Exit> for std::process::ExitCode {
    fn from(exit: Exit) -> Self {
        match exit {
            Exit::Success => Self::SUCCESS,
            Exit::Failure => Self::FAILURE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Processed {
    /// Present only when `exit` is `Success`.
    pub args: Option<ParsedArgs>,
    pub exit: Exit,
}

impl Processed {
    fn failure() -> Self {
        Self {
            args: None,
            exit: Exit::Failure,
        }
    }
}

/// Match `argv` (program name first) against `registry`.
pub fn parse(registry: &Registry, argv: &[String]) -> Result<Outcome, ParseError> {
    let Some(verb) = argv.get(1) else {
        return Err(ParseError::TooFewArguments);
    };

    if verb == HELP_VERB {
        let Some(target) = argv.get(2) else {
            return Ok(Outcome::Usage);
        };
        if !registry.is_verb_valid(target) {
            return Err(ParseError::UnknownVerb {
                verb: target.clone(),
            });
        }
        return Ok(Outcome::VerbHelp(target.clone()));
    }

    let Some(def) = registry.get(verb) else {
        return Err(ParseError::UnknownVerb { verb: verb.clone() });
    };
    tracing::debug!(verb = %def.name, "resolved verb");

    let mut parsed = ParsedArgs::new(verb.as_str());
    // Parameter waiting for its value, with the literal that selected it.
    let mut pending: Option<(&str, &str)> = None;

    for token in &argv[2..] {
        if let Some((key, _)) = pending.take() {
            tracing::trace!(key, value = %token, "consumed value");
            parsed.insert(key, token.as_str());
            continue;
        }

        let Some(param) = def.find_param(token) else {
            return Err(ParseError::UnknownParameter {
                verb: verb.clone(),
                literal: token.clone(),
            });
        };
        tracing::debug!(literal = %token, key = %param.key, "matched parameter");

        if param.takes_value {
            pending = Some((param.key.as_str(), token.as_str()));
        } else {
            parsed.insert(&param.key, "");
        }
    }

    if let Some((key, literal)) = pending {
        return Err(ParseError::MissingValue {
            verb: verb.clone(),
            key: key.to_string(),
            literal: literal.to_string(),
        });
    }

    if let Some(missing) = def
        .params
        .iter()
        .find(|p| !p.optional && !parsed.has_key(&p.key))
    {
        return Err(ParseError::MissingMandatory {
            verb: verb.clone(),
            key: missing.key.clone(),
            aliases: missing.aliases.clone(),
        });
    }

    Ok(Outcome::Matched(parsed))
}

/// Parse `argv` and write whatever the user should see to `out`.
pub fn process_args<W: Write>(
    registry: &Registry,
    argv: &[String],
    out: &mut W,
) -> io::Result<Processed> {
    let err = match parse(registry, argv) {
        Ok(Outcome::Matched(args)) => {
            return Ok(Processed {
                args: Some(args),
                exit: Exit::Success,
            });
        }
        Ok(Outcome::Usage) => {
            help::print_usage_message(registry, out)?;
            return Ok(Processed::failure());
        }
        Ok(Outcome::VerbHelp(verb)) => {
            if let Some(def) = registry.get(&verb) {
                help::print_help_for_verb(def, out)?;
            }
            return Ok(Processed::failure());
        }
        Err(err) => err,
    };

    tracing::debug!(error = %err, "argument processing failed");
    if let Some(message) = err.message() {
        writeln!(out, "{message}")?;
    }
    match &err {
        ParseError::TooFewArguments | ParseError::UnknownParameter { .. } => {
            help::print_usage_message(registry, out)?;
        }
        ParseError::UnknownVerb { .. } => {
            help::print_list_of_verbs(registry, out)?;
        }
        ParseError::MissingValue { verb, .. } | ParseError::MissingMandatory { verb, .. } => {
            if let Some(def) = registry.get(verb) {
                help::print_help_for_verb(def, out)?;
            }
        }
    }
    Ok(Processed::failure())
}
