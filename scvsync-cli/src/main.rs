mod extract;
mod filter;
mod reconcile;

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "scvsync";

    /// Optional TOML file overriding the laboratories and column layouts.
    pub const CONFIG_ARG: &str = "config";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("Databio")
        .about("Keep a consortium's ClinVar submissions in sync with its consensus variant classifications.")
        .subcommand_required(true)
        .subcommand(extract::cli::create_extract_cli())
        .subcommand(reconcile::cli::create_reconcile_cli())
        .subcommand(filter::cli::create_filter_cli())
}

fn main() -> Result<()> {
    // log records from the library crates are bridged into tracing; RUST_LOG sets verbosity
    tracing_subscriber::fmt::init();

    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // CLINVAR XML -> ASSERTION TABLE
        //
        Some((extract::cli::EXTRACT_CMD, matches)) => {
            extract::handlers::run_extract(matches)?;
        }

        //
        // CONSENSUS RECONCILIATION
        //
        Some((reconcile::cli::RECONCILE_CMD, matches)) => {
            reconcile::handlers::run_reconcile(matches)?;
        }

        //
        // VALIDATED SHEET FILTER
        //
        Some((filter::cli::FILTER_CMD, matches)) => {
            filter::handlers::run_filter(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
