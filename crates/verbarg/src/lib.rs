//! Verb-based argument parsing and help rendering.
//!
//! A program declares its verbs (subcommands) and their parameters once, builds
//! a [`Registry`], and hands `argv` to [`process_args`] (printing diagnostics)
//! or [`parse`] (typed result only).
//!
//! ```
//! use verbarg::{Exit, ParamDef, Registry, VerbDef};
//!
//! let registry = Registry::builder("bip")
//!     .verb(
//!         VerbDef::new("fssd", "Runs the filesystem service.")
//!             .param(ParamDef::new("unixsock", ["unixsock", "sock"], "Socket path.").takes_value())
//!             .param(ParamDef::new("workdir", ["workdir", "wdir"], "Work dir.").takes_value()),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let argv: Vec<String> = ["bip", "fssd", "sock", "/tmp/a.sock", "wdir", "/var/data"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//! let mut out = Vec::new();
//! let processed = verbarg::process_args(&registry, &argv, &mut out).unwrap();
//! assert_eq!(processed.exit, Exit::Success);
//! assert_eq!(processed.args.unwrap().get("workdir"), Some("/var/data"));
//! ```

pub mod args;
pub mod help;
pub mod parse;
pub mod registry;
pub mod schema;

pub use args::ParsedArgs;
pub use parse::{Exit, Outcome, ParseError, Processed, parse, process_args};
pub use registry::{HELP_VERB, Registry, RegistryBuilder, RegistryError};
pub use schema::{ParamDef, VerbDef};
