use clap::{ArgAction, Parser, Subcommand};
use hrml_query::{Batch, Query};
use std::io::Read;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hrml")]
#[command(about = "HRML — tag markup attribute queries")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Answer the queries in a batch file, one answer per line
    Run {
        /// Batch input file (stdin if omitted or `-`)
        path: Option<String>,
    },

    /// Print the tag tree built from a batch file's markup
    Tree {
        /// Batch input file (stdin if omitted or `-`)
        path: Option<String>,
    },

    /// Check a batch file for markup and query problems without answering
    Check {
        /// Batch input file (stdin if omitted or `-`)
        path: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(default_level(cli.verbose, &cli.command));

    match cli.command {
        Command::Run { path } => cmd_run(path.as_deref()),
        Command::Tree { path } => cmd_tree(path.as_deref()),
        Command::Check { path } => cmd_check(path.as_deref()),
    }
}

/// Filter used when `RUST_LOG` is unset.
///
/// `check` prints markup diagnostics itself, so its default drops the
/// builder's warnings to avoid reporting each problem twice.
fn default_level(verbose: u8, command: &Command) -> &'static str {
    match (verbose, command) {
        (0, Command::Check { .. }) => "error",
        (0, _) => "warn",
        (1, _) => "info",
        (2, _) => "debug",
        _ => "trace",
    }
}

/// Log to stderr so answers on stdout stay clean. `RUST_LOG` wins over `-v`.
fn init_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn display_name(path: Option<&str>) -> &str {
    match path {
        None | Some("-") => "<stdin>",
        Some(p) => p,
    }
}

fn read_source(path: Option<&str>) -> String {
    let p = match path {
        None | Some("-") => {
            let mut source = String::new();
            if let Err(e) = std::io::stdin().read_to_string(&mut source) {
                eprintln!("Error reading stdin: {e}");
                std::process::exit(1);
            }
            return source;
        }
        Some(p) => Path::new(p),
    };

    if !p.exists() {
        eprintln!("Error: file not found: {}", p.display());
        std::process::exit(1);
    }
    match std::fs::read_to_string(p) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading {}: {e}", p.display());
            std::process::exit(1);
        }
    }
}

fn parse_batch(source: &str) -> Batch<'_> {
    match Batch::parse(source) {
        Ok(batch) => batch,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn cmd_run(path: Option<&str>) {
    let source = read_source(path);
    let batch = parse_batch(&source);

    let report = batch.run();
    tracing::info!(
        queries = report.answers.len(),
        warnings = report.diagnostics.len(),
        "answered {}",
        display_name(path)
    );

    for answer in &report.answers {
        println!("{answer}");
    }
}

fn cmd_tree(path: Option<&str>) {
    let source = read_source(path);
    let batch = parse_batch(&source);

    print!("{}", batch.build().tree);
}

fn cmd_check(path: Option<&str>) {
    let source = read_source(path);
    let batch = parse_batch(&source);

    let mut problems: Vec<String> = batch
        .build()
        .diagnostics
        .iter()
        .map(ToString::to_string)
        .collect();

    problems.extend(
        batch
            .queries
            .iter()
            .filter_map(|q| Query::parse(q).err())
            .map(|e| e.to_string()),
    );

    if batch.queries.len() < batch.query_count {
        problems.push(format!(
            "Input error: expected {} queries, found {}",
            batch.query_count,
            batch.queries.len()
        ));
    }

    if !problems.is_empty() {
        for problem in &problems {
            eprintln!("{problem}");
        }
        std::process::exit(1);
    }

    eprintln!("OK: {}", display_name(path));
}
