use clap::{Command, arg};

pub use scvsync_io::consts::*;

use crate::consts::CONFIG_ARG;

pub fn create_filter_cli() -> Command {
    Command::new(FILTER_CMD)
        .author("Databio")
        .about("Keep only the sheet rows whose HGVS notation passed external validation.")
        .arg(arg!(--input <dir> "Directory with the submission sheets and <SHORT>_validated.tsv files").required(true))
        .arg(arg!(--release <release> "Release name of the sheets").required(true))
        .arg(arg!(--config <config> "TOML file overriding the laboratories").id(CONFIG_ARG))
}
