// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pokedex Command Line
//!
//! Reads newline-delimited JSON requests from stdin and prints one JSON
//! response per request on stdout. Logs go to stderr.
//!
//! ```text
//! {"command": "HatchEgg", "data": {"pokedexNumber": 1, "name": "Bulbasaur", "type": "Grass"}}
//! {"command": "ThrowPokeball", "data": {"pokedexNumber": 1, "id": 1}}
//! {"query": "LookupPokemon", "data": {"pokedexNumber": 1}}
//! ```
//!
//! Run with: `cargo run --bin pokedex < requests.ndjson`
//!
//! Configuration (all optional):
//! - `POKEDEX_SNAPSHOT_THRESHOLD`: versions between snapshots, `<= 0` for every command
//! - `POKEDEX_CATCH_THRESHOLD`: throws succeed iff the draw exceeds it (default 0.5)
//! - `POKEDEX_RANDOM_SEED`: seed for reproducible runs
//! - `RUST_LOG`: log filter

use anyhow::{Context, Result};
use pokemon_aggregate::aggregate::{DomainError, LookupPokemonQuery};
use pokemon_aggregate::domain::{decode, Validate, ValidationError};
use pokemon_aggregate::{
    ErrorCategory, InMemoryEventStore, PokemonRuntime, RuntimeConfig, ServiceError,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};

/// One input line
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Request {
    #[serde(default)]
    command: Option<String>,

    #[serde(default)]
    query: Option<String>,

    #[serde(default)]
    data: Value,
}

fn failure(err: &ServiceError<DomainError>) -> Value {
    let field = match err {
        ServiceError::Validation(err) => err.field(),
        _ => None,
    };

    json!({
        "ok": false,
        "category": err.category(),
        "field": field,
        "error": err.to_string(),
    })
}

async fn run_command(runtime: &PokemonRuntime, name: &str, data: Value) -> Value {
    let command = match runtime.schemas().decode_command(name, data) {
        Ok(command) => command,
        Err(err) => return failure(&err.into()),
    };
    let stream_id = command.stream_id();

    match runtime.execute(&stream_id, command).await {
        Ok(outcome) => json!({
            "ok": true,
            "stream": stream_id,
            "version": outcome.version,
            "state": outcome.state,
            "events": outcome.events,
            "snapshot": outcome.snapshot,
        }),
        Err(err) => failure(&err),
    }
}

async fn run_query(runtime: &PokemonRuntime, name: &str, data: Value) -> Value {
    if name != LookupPokemonQuery::SHAPE {
        return failure(&ValidationError::UnknownQuery(name.to_string()).into());
    }

    let query = match decode::<LookupPokemonQuery>(data) {
        Ok(query) => query,
        Err(err) => return failure(&err.into()),
    };
    let stream_id = query.stream_id();

    match runtime.load(&stream_id).await {
        Ok(loaded) => json!({
            "ok": true,
            "stream": stream_id,
            "version": loaded.version,
            "state": loaded.state,
        }),
        Err(err) => failure(&err),
    }
}

async fn dispatch(runtime: &PokemonRuntime, request: Request) -> Value {
    match (request.command, request.query) {
        (Some(name), None) => run_command(runtime, &name, request.data).await,
        (None, Some(name)) => run_query(runtime, &name, request.data).await,
        _ => json!({
            "ok": false,
            "category": ErrorCategory::InvalidInput,
            "error": "request needs exactly one of `command` or `query`",
        }),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = RuntimeConfig::from_env().context("Invalid configuration")?;
    info!(?config, "Configuration loaded");

    let store = Arc::new(InMemoryEventStore::new());
    let runtime = PokemonRuntime::from_config(&config, store.clone())
        .context("Failed to build runtime")?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        if line.trim().is_empty() {
            continue;
        }
        debug!(%line, "Request");

        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => dispatch(&runtime, request).await,
            Err(err) => json!({
                "ok": false,
                "category": ErrorCategory::InvalidInput,
                "error": format!("Malformed request: {err}"),
            }),
        };

        stdout
            .write_all(format!("{response}\n").as_bytes())
            .await
            .context("Failed to write response")?;
    }
    stdout.flush().await?;

    info!(
        streams = store.stream_ids().await.len(),
        snapshots = store.snapshots().await.len(),
        "Input exhausted"
    );

    Ok(())
}
