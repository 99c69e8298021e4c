#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives the combat calculator.
//!
//! Selections are seeded from a URL query, named actions are dispatched in
//! order and the resulting matchup report is printed together with the
//! canonical query string.

mod actions;
mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use combat_calculator_catalog::{builtin_catalog, load_catalog};
use combat_calculator_core::{ActionError, Catalog, Event};
use combat_calculator_system_duel::DuelEngine;
use combat_calculator_url::{initial_state, AddressBar, QueryParams, UrlSync};
use combat_calculator_world::{self as world, Collaborators};
use tracing_subscriber::EnvFilter;

use crate::{actions::parse_action, report::render_report};

const DEFAULT_LOG_FILTER: &str = "combat_calculator=info";

/// Compare two units head to head and print the resulting combat tables.
#[derive(Debug, Parser)]
#[command(name = "combat-calculator", version)]
struct Args {
    /// Catalog manifest to load instead of the built-in one.
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Query string or full URL the selections are seeded from.
    #[arg(long, value_name = "QUERY", default_value = "")]
    url: String,

    /// Named action to dispatch, e.g. `selectUnitA=u_tank`. Repeatable.
    #[arg(long = "action", value_name = "NAME=PAYLOAD")]
    actions: Vec<String>,
}

/// Address bar that records every write it receives.
#[derive(Debug, Default)]
struct HistoryLog {
    writes: usize,
}

impl AddressBar for HistoryLog {
    fn replace(&mut self, params: &QueryParams) {
        self.writes += 1;
        tracing::info!(query = %params.to_query_string(), "address bar updated");
    }
}

/// Entry point for the combat calculator command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let catalog = resolve_catalog(&args)?;
    let output = run(&args, &catalog)?;
    print!("{output}");
    Ok(())
}

fn resolve_catalog(args: &Args) -> Result<Catalog> {
    match &args.catalog {
        Some(path) => load_catalog(path)
            .with_context(|| format!("failed to load catalog from {}", path.display())),
        None => builtin_catalog().context("built-in catalog is invalid"),
    }
}

fn run(args: &Args, catalog: &Catalog) -> Result<String> {
    let engine = DuelEngine::new();
    let collaborators = Collaborators::new(catalog, &engine);

    let seed = QueryParams::parse(&args.url);
    let mut state = initial_state(&seed, &collaborators);
    let mut sync = UrlSync::new(seed);
    let mut address_bar = HistoryLog::default();
    let _ = sync.publish(&state, &mut address_bar);

    let mut events = Vec::new();
    for argument in &args.actions {
        let command = match parse_action(argument) {
            Ok(command) => command,
            Err(error) => {
                reject_action(argument, error)?;
                continue;
            }
        };

        events.clear();
        world::apply(&mut state, &collaborators, command, &mut events);
        for event in &events {
            if let Event::LevelRejected { side, unit, .. } = event {
                tracing::warn!(%side, %unit, "level ignored; unit is not selected on that side");
            } else {
                tracing::debug!(?event, "combat event");
            }
        }
        let _ = sync.publish(&state, &mut address_bar);
    }
    tracing::info!(
        actions = args.actions.len(),
        writes = address_bar.writes,
        "dispatch finished"
    );

    let mut output = String::new();
    render_report(&mut output, &state, catalog).context("failed to render report")?;
    output.push_str(&format!("url: ?{}\n", sync.published().to_query_string()));
    Ok(output)
}

/// Unknown or malformed actions abort debug builds and are skipped in release builds.
fn reject_action(argument: &str, error: ActionError) -> Result<()> {
    if cfg!(debug_assertions) {
        return Err(anyhow::Error::new(error).context(format!("cannot dispatch `{argument}`")));
    }
    tracing::warn!(action = argument, %error, "ignoring action");
    Ok(())
}
