//! verdict CLI - driving adapter for the verdict matching engine.
//!
//! Subcommands:
//! - `assert <matcher> <expected> [--actual <json>] [--path <path>]` - run one assertion
//! - `parse <literal>` - show how a typed literal parses
//! - `paths <json-file>` - list leaf paths of a JSON document
//! - `check <table-file> <json-file> [--fully]` - run an assertion table
//! - `operators` - list operator names and aliases
//!
//! Exit codes: 0 pass, 1 assertion failure, 2 usage or loading error.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use slog::{info, o, Drain, Level, LevelFilter, Logger};
use verdict::{Engine, Operator, Value};
use verdict_table::{load_table, TableChecker};

const EXIT_FAILED: u8 = 1;
const EXIT_ERROR: u8 = 2;

/// Typed matching engine for table-driven test assertions.
#[derive(Parser, Debug)]
#[command(name = "verdict", version, about)]
struct Cli {
    /// Log every step of evaluation to stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assert a JSON value against a matcher and expected literal
    Assert {
        /// Operator name, e.g. `equal`, `=~`, `size is`
        matcher: String,
        /// Expected literal, e.g. `645((int))`
        expected: String,
        /// Actual value as JSON (read from stdin when omitted)
        #[arg(long)]
        actual: Option<String>,
        /// Dot path to assert on inside the actual value
        #[arg(long)]
        path: Option<String>,
    },

    /// Parse a typed literal and print its value and type
    Parse {
        /// Literal, e.g. `[1((int)),x]((array))`
        literal: String,
    },

    /// Print every leaf path of a JSON document
    Paths {
        /// Path to the JSON file
        file: PathBuf,
    },

    /// Check an assertion table file against a JSON document
    Check {
        /// Table file (.json, otherwise YAML)
        table: PathBuf,
        /// JSON document to check
        body: PathBuf,
        /// Require every leaf of the document to be asserted
        #[arg(long)]
        fully: bool,
    },

    /// List operator names and aliases
    Operators,
}

/// Outcome of a command that ran to completion.
enum Verdict {
    Pass,
    Fail(String),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let engine = Engine::new(build_logger(cli.debug));

    match run(&engine, cli.command) {
        Ok(Verdict::Pass) => ExitCode::SUCCESS,
        Ok(Verdict::Fail(reason)) => {
            eprintln!("FAIL: {reason}");
            ExitCode::from(EXIT_FAILED)
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run(engine: &Engine, command: Commands) -> Result<Verdict> {
    match command {
        Commands::Assert {
            matcher,
            expected,
            actual,
            path,
        } => cmd_assert(engine, &matcher, &expected, actual, path.as_deref()),
        Commands::Parse { literal } => cmd_parse(engine, &literal),
        Commands::Paths { file } => cmd_paths(engine, &file),
        Commands::Check { table, body, fully } => cmd_check(engine, &table, &body, fully),
        Commands::Operators => Ok(cmd_operators()),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════════

fn cmd_assert(
    engine: &Engine,
    matcher: &str,
    expected: &str,
    actual: Option<String>,
    path: Option<&str>,
) -> Result<Verdict> {
    let json = match actual {
        Some(json) => json,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read actual value from stdin")?;
            buf
        }
    };
    let value = parse_json(&json).context("actual value is not valid JSON")?;

    let target = match path {
        Some(path) => match engine.resolve(&value, path) {
            Some(found) => found,
            None => return Ok(Verdict::Fail(format!("unknown key: {path}"))),
        },
        None => &value,
    };

    Ok(match engine.assert(matcher, target, expected) {
        Ok(()) => {
            println!("ok");
            Verdict::Pass
        }
        Err(e) => Verdict::Fail(e.to_string()),
    })
}

fn cmd_parse(engine: &Engine, literal: &str) -> Result<Verdict> {
    let value = engine
        .parse_literal(literal)
        .with_context(|| format!("cannot parse literal \"{literal}\""))?;
    println!("{value} ({})", value.type_name());
    Ok(Verdict::Pass)
}

fn cmd_paths(engine: &Engine, file: &Path) -> Result<Verdict> {
    let value = load_json(file)?;
    for path in engine.leaf_paths(&value) {
        println!("{path}");
    }
    Ok(Verdict::Pass)
}

fn cmd_check(engine: &Engine, table: &Path, body: &Path, fully: bool) -> Result<Verdict> {
    let table = load_table(table)
        .with_context(|| format!("failed to load table \"{}\"", table.display()))?;
    let value = load_json(body)?;

    let checker = TableChecker::new(engine.clone());
    Ok(match checker.check_value(&value, &table, fully) {
        Ok(()) => {
            info!(engine.logger(), "table passed"; "rows" => table.len());
            println!("ok ({} rows)", table.len());
            Verdict::Pass
        }
        Err(e) => Verdict::Fail(e.to_string()),
    })
}

fn cmd_operators() -> Verdict {
    for op in Operator::ALL {
        let aliases: Vec<String> = op
            .aliases()
            .iter()
            .map(|alias| format!("\"{alias}\""))
            .collect();
        println!("{op:<14} {}", aliases.join(", "));
    }
    Verdict::Pass
}

// ═══════════════════════════════════════════════════════════════════════════════
// Loading
// ═══════════════════════════════════════════════════════════════════════════════

fn parse_json(text: &str) -> Result<Value> {
    let json: serde_json::Value = serde_json::from_str(text)?;
    Ok(Value::from(json))
}

fn load_json(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read \"{}\"", path.display()))?;
    parse_json(&content).with_context(|| format!("JSON parse error in \"{}\"", path.display()))
}

fn build_logger(debug: bool) -> Logger {
    let decorator = slog_term::PlainSyncDecorator::new(std::io::stderr());
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let level = if debug { Level::Debug } else { Level::Info };
    Logger::root(LevelFilter::new(drain, level).fuse(), o!())
}
