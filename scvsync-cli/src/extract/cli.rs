use clap::{Command, arg};

pub use scvsync_extract::consts::*;

pub fn create_extract_cli() -> Command {
    Command::new(EXTRACT_CMD)
        .author("Databio")
        .about("Flatten the shared-submission assertions of a ClinVar XML release into a tab-separated table.")
        .arg(arg!(--input <input> "ClinVar release XML, optionally gzip'd").required(true))
        .arg(arg!(--output <output> "Assertion table to write").required(true))
}
