// src/main.rs

//! The main entry point for the `spineljson` command-line evaluator.
//!
//! Each argument after the options is evaluated as one expression, e.g.
//! `spineljson "JSON_VALUE(JSON '{\"a\":1}', '$.a')"`. With no expressions,
//! one expression per non-empty stdin line is evaluated until end of input.

use anyhow::{Context, Result};
use spineljson::cli;
use spineljson::config::Config;
use spineljson::core::Engine;
use std::env;
use std::io::{self, BufRead, Write};
use tracing::info;
use tracing_subscriber::{filter::EnvFilter, prelude::*};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    // Handle the --version flag.
    if args.iter().any(|arg| arg == "--version") {
        println!("{}", cli::version_line());
        return Ok(());
    }

    // Split the options from the expressions to evaluate.
    let mut config_path: Option<&str> = None;
    let mut expressions: Vec<&str> = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            match iter.next() {
                Some(path) => config_path = Some(path),
                None => {
                    eprintln!("--config flag requires a value");
                    std::process::exit(2);
                }
            }
        } else {
            expressions.push(arg);
        }
    }

    // Without a --config flag the built-in defaults apply.
    let config = match config_path {
        Some(path) => match Config::from_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Failed to load configuration from \"{path}\": {e:#}");
                std::process::exit(2);
            }
        },
        None => Config::default(),
    };

    // Logs go to stderr so they never mix with results on stdout.
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| config.log_level.clone());
    tracing_subscriber::registry()
        .with(EnvFilter::new(log_level))
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(io::stderr),
        )
        .init();

    let engine = Engine::new(config);
    info!(
        version = cli::VERSION,
        profile = cli::BUILD_PROFILE,
        "spineljson engine ready"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failures = 0usize;

    if expressions.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.context("Failed to read from stdin")?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (text, ok) = cli::run_line(&engine, line);
            writeln!(out, "{text}")?;
            failures += usize::from(!ok);
        }
    } else {
        for expr in expressions {
            let (text, ok) = cli::run_line(&engine, expr);
            writeln!(out, "{text}")?;
            failures += usize::from(!ok);
        }
    }
    out.flush()?;

    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}
