use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::debug;

use parserfn::{Config, Lang, Resolver};

/// Resolve {{#function: ... #}} calls in wiki markup.
#[derive(Parser, Debug)]
#[command(name = "parserfn", version, about)]
struct Cli {
    /// Markup file to resolve (reads stdin when omitted)
    input: Option<PathBuf>,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Wiki root consulted by {{#ifexist: ... #}}
    #[arg(long)]
    root: Option<PathBuf>,

    /// Maximum call nesting depth
    #[arg(long)]
    max_depth: Option<usize>,

    /// Language of error messages (en, pt-br)
    #[arg(long)]
    lang: Option<Lang>,

    /// Wrap error messages in <wrap SEVERITY> tags
    #[arg(long)]
    wrap_errors: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load configuration: {}", path.display()))?,
        None => Config::default(),
    };
    apply_overrides(&mut config, &cli);
    config.validate()?;
    debug!(?config, "effective configuration");

    let source = match &cli.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read '{}'", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let output = Resolver::from_config(&config).resolve_all(&source);

    match &cli.output {
        Some(path) => fs::write(path, output)
            .with_context(|| format!("Failed to write '{}'", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(root) = &cli.root {
        config.wiki_root = Some(root.clone());
    }
    if let Some(depth) = cli.max_depth {
        config.max_depth = depth;
    }
    if let Some(lang) = cli.lang {
        config.lang = lang;
    }
    if cli.wrap_errors {
        config.wrap_errors = true;
    }
}
