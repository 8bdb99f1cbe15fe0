mod check;
mod manifest;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt};
use verbarg::help;

use crate::manifest::{DEFAULT_MANIFEST_NAME, load_manifest};

#[derive(Parser)]
#[command(name = "verbarg")]
#[command(version, about = "Inspect and exercise verb tables", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter verbs.json
    Init(InitArgs),

    /// Validate a verb table and summarize it
    Check(CheckArgs),

    /// Render usage, or the parameter help of one verb
    Render(RenderArgs),

    /// Parse arguments against a verb table
    Parse(ParseArgs),
}

#[derive(Parser)]
struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Program name shown in usage text
    #[arg(short, long, default_value = "my-cli")]
    program: String,

    /// Overwrite an existing manifest
    #[arg(long)]
    force: bool,
}

#[derive(Parser)]
struct CheckArgs {
    /// Path to the verb manifest
    #[arg(short, long, default_value = DEFAULT_MANIFEST_NAME, value_name = "FILE")]
    manifest: PathBuf,

    /// Only output JSON (no human-readable output)
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct RenderArgs {
    /// Path to the verb manifest
    #[arg(short, long, default_value = DEFAULT_MANIFEST_NAME, value_name = "FILE")]
    manifest: PathBuf,

    /// Verb to describe (default: full usage)
    #[arg(value_name = "VERB")]
    verb: Option<String>,
}

#[derive(Parser)]
struct ParseArgs {
    /// Path to the verb manifest
    #[arg(short, long, default_value = DEFAULT_MANIFEST_NAME, value_name = "FILE")]
    manifest: PathBuf,

    /// Print the parsed arguments as JSON
    #[arg(long)]
    json: bool,

    /// Arguments as the program would receive them, without the program name
    #[arg(last = true, value_name = "ARGS")]
    args: Vec<String>,
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Init(args) => init(args),
        Commands::Check(args) => check_command(args),
        Commands::Render(args) => render_command(args),
        Commands::Parse(args) => parse_command(args),
    }
}

fn init(args: InitArgs) -> Result<ExitCode> {
    let dir = args.dir.unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create directory: {}", dir.display()))?;

    let dest = manifest::write_default_manifest(&dir, &args.program, args.force)?;
    eprintln!("Created: {}", dest.display());
    eprintln!("\nNext steps:");
    eprintln!("  1. Declare your verbs and parameters in {DEFAULT_MANIFEST_NAME}");
    eprintln!("  2. Run: verbarg check");
    eprintln!("  3. Run: verbarg parse -- <verb> [param value]...");

    Ok(ExitCode::SUCCESS)
}

fn check_command(args: CheckArgs) -> Result<ExitCode> {
    tracing::debug!("executing check command");

    let loaded = load_manifest(&args.manifest)?;
    let report = check::check_manifest(&loaded)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(ExitCode::SUCCESS);
    }

    eprintln!("=== Verb Table ===");
    eprintln!("Manifest: {}", report.manifest);
    eprintln!("Program: {}", report.program);
    eprintln!("Verbs: {}", report.verbs.len());
    for verb in &report.verbs {
        let mandatory = if verb.mandatory.is_empty() {
            "-".to_string()
        } else {
            verb.mandatory.join(", ")
        };
        eprintln!(
            "  {:<20} mandatory: {}  optional: {}  aliases: {}",
            verb.name,
            mandatory,
            verb.optional.len(),
            verb.aliases
        );
    }
    eprintln!("OK: verb table is valid");

    Ok(ExitCode::SUCCESS)
}

fn render_command(args: RenderArgs) -> Result<ExitCode> {
    let registry = load_manifest(&args.manifest)?.registry()?;

    let text = match args.verb.as_deref() {
        None => help::render_usage(&registry),
        Some(name) => {
            let Some(verb) = registry.get(name) else {
                bail!("'{name}' is not a valid verb");
            };
            help::render_verb_help(verb)
        }
    };
    print!("{text}");

    Ok(ExitCode::SUCCESS)
}

fn parse_command(args: ParseArgs) -> Result<ExitCode> {
    tracing::debug!("executing parse command");

    let registry = load_manifest(&args.manifest)?.registry()?;
    let argv: Vec<String> = std::iter::once(registry.program().to_string())
        .chain(args.args)
        .collect();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let processed =
        verbarg::process_args(&registry, &argv, &mut out).context("failed to write to stdout")?;

    if let Some(parsed) = &processed.args {
        if args.json {
            writeln!(out, "{}", serde_json::to_string_pretty(parsed)?)?;
        } else {
            writeln!(out, "verb={}", parsed.verb)?;
            for (key, value) in parsed.iter() {
                writeln!(out, "{key}={value}")?;
            }
        }
    }

    Ok(processed.exit.into())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
