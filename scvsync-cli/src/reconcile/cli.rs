use clap::{Arg, ArgAction, Command, arg};

pub use scvsync_match::consts::*;

use crate::consts::CONFIG_ARG;

pub fn create_reconcile_cli() -> Command {
    Command::new(RECONCILE_CMD)
        .author("Databio")
        .about("Reconcile the consensus table with the ClinVar accessions and write per-laboratory submission sheets.")
        .arg(arg!(--consensus <consensus> "Consensus table").required(true))
        .arg(arg!(--assertions <assertions> "Assertion table written by `extract`").required(true))
        .arg(arg!(--"local-dir" <dir> "Directory with the laboratories' local variant tables").required(true))
        .arg(arg!(--"output-dir" <dir> "Directory for the submission sheets").required(true))
        .arg(arg!(--release <release> "Release name used in every file name").required(true))
        .arg(
            Arg::new("exclude")
                .long("exclude")
                .value_delimiter(',')
                .help("Consensus classifications to leave out, comma separated"),
        )
        .arg(
            arg!(--"update-only")
                .help("Only write lines for existing accessions; no Deletes sheet")
                .action(ArgAction::SetTrue),
        )
        .arg(arg!(--config <config> "TOML file overriding laboratories and column layouts").id(CONFIG_ARG))
}
