mod services;

use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt};
use verbarg::Exit;

fn main() -> Result<ExitCode> {
    init_tracing();

    let registry = services::registry().context("invalid verb table")?;
    let argv: Vec<String> = std::env::args_os()
        .map(|arg| {
            arg.into_string().unwrap_or_else(|raw| {
                let lossy = raw.to_string_lossy().into_owned();
                tracing::warn!(arg = %lossy, "argument is not valid UTF-8, using lossy conversion");
                lossy
            })
        })
        .collect();

    let stdout = std::io::stdout();
    let processed = verbarg::process_args(&registry, &argv, &mut stdout.lock())
        .context("failed to write to stdout")?;

    let Some(args) = processed.args else {
        return Ok(processed.exit.into());
    };
    tracing::debug!(verb = %args.verb, "dispatching");
    services::dispatch(&args)?;

    Ok(Exit::Success.into())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
