use std::fs::read_to_string;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::CoreError;
use crate::labs::{LabRegistry, Laboratory};
use crate::layout::{ConsensusLayout, LocalTableLayout};

///
/// Everything about the input files that is not a path: which laboratories take part
/// and where their data sits in the tab-separated inputs.
///
/// Every section is optional in the TOML file; missing sections fall back to the
/// consortium defaults.
///
/// ```toml
/// [[laboratories]]
/// name = "LabA"
/// short_code = "LABA"
/// local_table = "vkgl_laba.tsv"
/// classification_column = 13
///
/// [consensus]
/// classification = 11
/// ```
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
pub struct SubmissionConfig {
    #[serde(default)]
    pub laboratories: Option<Vec<Laboratory>>,
    #[serde(default)]
    pub consensus: ConsensusLayout,
    #[serde(default)]
    pub local: LocalTableLayout,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
    #[error("Invalid laboratory configuration: {0}")]
    Laboratories(#[from] CoreError),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl SubmissionConfig {
    ///
    /// Build the laboratory registry, either from the configured laboratories or the
    /// built-in consortium members.
    ///
    pub fn registry(&self) -> ConfigResult<LabRegistry> {
        match &self.laboratories {
            Some(labs) => Ok(LabRegistry::new(labs.clone())?),
            None => Ok(LabRegistry::default()),
        }
    }

    ///
    /// Load the config from an optional path; `None` yields the defaults.
    ///
    pub fn from_optional_path(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => {
                let config = SubmissionConfig::try_from(path)?;
                log::info!("Loaded submission config from {}", path.display());
                Ok(config)
            }
            None => Ok(SubmissionConfig::default()),
        }
    }
}

impl TryFrom<&Path> for SubmissionConfig {
    type Error = ConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let config = toml::from_str(&toml_str)?;
        Ok(config)
    }
}
