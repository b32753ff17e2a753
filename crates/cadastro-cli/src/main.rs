mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{customers, lookup, Context};
use crate::error::{exit_code_for, report_error};
use cadastro_config as config;
use cadastro_store::{paths, Store};

#[derive(Debug, Parser)]
#[command(name = "cadastro", version, about = "cadastro CLI")]
struct Cli {
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Register a new customer
    Add(customers::AddArgs),
    /// Update fields of an existing customer
    Edit(customers::EditArgs),
    Show(customers::ShowArgs),
    List(customers::ListArgs),
    /// Find a customer by CPF or name fragment
    Search(customers::SearchArgs),
    Delete(customers::DeleteArgs),
    /// Resolve a CEP to a street address
    Lookup(lookup::LookupArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        db_path,
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
    if verbose {
        match config::resolve_config_path(config_path) {
            Ok(path) => {
                if path.exists() {
                    debug!(path = %path.display(), "config resolved");
                } else {
                    debug!(path = %path.display(), "config missing, using defaults");
                }
            }
            Err(err) => {
                debug!(error = %err, "config unavailable");
            }
        }
    }

    let db_path = paths::resolve_db_path(db_path).with_context(|| "resolve database path")?;
    if verbose {
        debug!(path = %db_path.display(), "database path resolved");
    }

    let store =
        Store::open(&db_path).with_context(|| format!("open database {}", db_path.display()))?;
    store.migrate().with_context(|| "run migrations")?;

    let ctx = Context {
        store: &store,
        json,
        config: &app_config,
    };

    match command {
        Command::Add(args) => customers::add_customer(&ctx, args),
        Command::Edit(args) => customers::edit_customer(&ctx, args),
        Command::Show(args) => customers::show_customer(&ctx, args),
        Command::List(args) => customers::list_customers(&ctx, args),
        Command::Search(args) => customers::search_customers(&ctx, args),
        Command::Delete(args) => customers::delete_customer(&ctx, args),
        Command::Lookup(args) => lookup::lookup_cep(&ctx, args),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init();
}
