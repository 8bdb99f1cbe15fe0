//! Verb tables for the bip services.
//!
//! The services themselves are not implemented; each action only reports what
//! it was asked to do.

use anyhow::{Result, bail};
use verbarg::{ParamDef, ParsedArgs, Registry, RegistryError, VerbDef};

pub const PROGRAM: &str = "bip";

const UNIXSOCK_ALIASES: [&str; 4] = ["unixsock", "sock", "sockpath", "unixsockpath"];

fn unixsock() -> ParamDef {
    ParamDef::new(
        "unixsock",
        UNIXSOCK_ALIASES,
        "Path of the unix socket to listen on.",
    )
    .takes_value()
}

fn pcapfile() -> ParamDef {
    ParamDef::new("pcapfile", ["pcapfile", "pcap"], "Pcap file to read from.")
        .optional()
        .takes_value()
}

pub fn verbs() -> Vec<VerbDef> {
    vec![
        VerbDef::new("node", "Creates a node.").params([
            ParamDef::new(
                "interface",
                ["interface", "int"],
                "Interface to capture packets from.",
            )
            .optional()
            .takes_value(),
            pcapfile(),
        ]),
        VerbDef::new("noded", "Runs the node daemon.").params([
            ParamDef::new(
                "interface",
                ["interface", "int", "iface"],
                "Interface to capture packets from.",
            )
            .optional()
            .takes_value(),
            pcapfile(),
            ParamDef::new("verbose", ["verbose", "v"], "Log every captured packet.").optional(),
        ]),
        VerbDef::new("fssd", "Runs the filesystem service daemon.").params([
            unixsock(),
            ParamDef::new(
                "workdir",
                ["workdir", "wdir", "wpath"],
                "Directory the service stores its files in.",
            )
            .takes_value(),
        ]),
        VerbDef::new("statd", "Runs the statistics daemon.").params([
            unixsock(),
            ParamDef::new(
                "interval",
                ["interval", "period"],
                "Seconds between two reports.",
            )
            .optional()
            .takes_value(),
        ]),
        VerbDef::new("mond", "Runs the monitoring daemon.").params([
            ParamDef::new("target", ["target", "addr"], "Address of the node to monitor.")
                .takes_value(),
            ParamDef::new("once", ["once"], "Probe once and exit.").optional(),
        ]),
    ]
}

pub fn registry() -> Result<Registry, RegistryError> {
    Registry::builder(PROGRAM).verbs(verbs()).build()
}

/// Run the stub action for a parsed invocation.
pub fn dispatch(args: &ParsedArgs) -> Result<()> {
    match args.verb.as_str() {
        "node" => {
            if args.has_key("interface") {
                tracing::info!(interface = ?args.get("interface"), "capturing from interface");
            } else if args.has_key("pcapfile") {
                tracing::info!(pcapfile = ?args.get("pcapfile"), "reading capture file");
            }
            not_implemented(args)
        }
        "noded" | "fssd" | "statd" | "mond" => not_implemented(args),
        other => bail!("no action registered for verb '{other}'"),
    }
}

fn not_implemented(args: &ParsedArgs) -> Result<()> {
    for (key, value) in args.iter() {
        tracing::info!(verb = %args.verb, key, value, "parameter");
    }
    println!("{}: '{}' is not implemented yet.", PROGRAM, args.verb);
    Ok(())
}
