// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use serde_json::json;
use sklad_ingest::{sync_catalog, Store, SyncError, SyncOptions};
use sklad_model::GoodId;
use std::path::PathBuf;
use std::process::ExitCode as ProcessExitCode;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExitCode {
    Success = 0,
    Validation = 3,
    Internal = 10,
}

#[derive(Parser)]
#[command(name = "sklad")]
#[command(about = "Schema-validated goods catalog sync into SQLite")]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate one catalog document and upsert it into the store.
    Sync {
        #[arg(long)]
        document: PathBuf,
        #[arg(long)]
        schema: PathBuf,
        #[arg(long)]
        db: PathBuf,
    },
    /// Print table presence, row counts and sample rows of a store.
    InspectDb {
        #[arg(long)]
        db: PathBuf,
        #[arg(long)]
        good: Option<i64>,
        #[arg(long, default_value_t = 5)]
        sample_rows: usize,
    },
}

enum CliFailure {
    Validation(String),
    Internal(String),
}

fn main() -> ProcessExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    match run() {
        Ok(()) => ProcessExitCode::from(ExitCode::Success as u8),
        Err(CliFailure::Validation(msg)) => {
            eprintln!("{msg}");
            ProcessExitCode::from(ExitCode::Validation as u8)
        }
        Err(CliFailure::Internal(msg)) => {
            eprintln!("{msg}");
            ProcessExitCode::from(ExitCode::Internal as u8)
        }
    }
}

fn run() -> Result<(), CliFailure> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Sync {
            document,
            schema,
            db,
        } => run_sync(document, schema, db, cli.json),
        Commands::InspectDb {
            db,
            good,
            sample_rows,
        } => inspect_db(db, good, sample_rows, cli.json),
    }
}

fn run_sync(
    document: PathBuf,
    schema: PathBuf,
    db: PathBuf,
    machine_json: bool,
) -> Result<(), CliFailure> {
    let report = sync_catalog(&SyncOptions {
        document_path: document,
        schema_path: schema,
        db_path: db.clone(),
    })
    .map_err(|err| match err {
        SyncError::Validation(_) => CliFailure::Validation(err.to_string()),
        other => CliFailure::Internal(other.to_string()),
    })?;

    if machine_json {
        let payload = json!({
            "good_id": report.good_id.as_i64(),
            "locations_written": report.locations_written,
            "db": db.display().to_string(),
        });
        println!(
            "{}",
            serde_json::to_string(&payload).map_err(|e| CliFailure::Internal(e.to_string()))?
        );
    } else {
        println!("synced good {}", report.good_id);
        println!("stock rows written: {}", report.locations_written);
        println!("db: {}", db.display());
    }
    Ok(())
}

fn inspect_db(
    db: PathBuf,
    good: Option<i64>,
    sample_rows: usize,
    machine_json: bool,
) -> Result<(), CliFailure> {
    let store = Store::open(&db).map_err(|e| CliFailure::Internal(e.to_string()))?;
    let tables = store
        .table_names()
        .map_err(|e| CliFailure::Internal(e.to_string()))?;
    let good_count = store
        .good_count()
        .map_err(|e| CliFailure::Internal(e.to_string()))?;

    let sample = match good {
        Some(id) => store
            .stock_for(GoodId::new(id))
            .map_err(|e| CliFailure::Internal(e.to_string()))?
            .into_iter()
            .take(sample_rows)
            .collect::<Vec<_>>(),
        None => Vec::new(),
    };

    if machine_json {
        let payload = json!({
            "tables": tables,
            "good_count": good_count,
            "stock_sample": sample,
        });
        println!(
            "{}",
            serde_json::to_string(&payload).map_err(|e| CliFailure::Internal(e.to_string()))?
        );
        return Ok(());
    }

    println!(
        "tables={}",
        serde_json::to_string(&tables).map_err(|e| CliFailure::Internal(e.to_string()))?
    );
    println!("good_count={good_count}");
    for row in sample {
        println!(
            "stock id_good={} location={} amount={}",
            row.good_id, row.location, row.amount
        );
    }
    Ok(())
}
