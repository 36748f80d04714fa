/**
 * config.rs
 * Parser for .pteronode.yaml credential files
 *
 * Format:
 * ```yaml
 * panel: https://panel.test.com
 * api-key: ptla_xxxxxxxxxxxx
 * ```
 *
 * The config file is optional; credentials may instead be supplied via the
 * --panel and --api_key flags. Missing both is a fatal pre-flight error.
 */

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::errors::PteroError;

/// Default credential file path, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = ".pteronode.yaml";

/// Panel credentials loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Credentials {
    /// Panel base URL, e.g. https://panel.test.com
    pub panel: String,
    /// Application API key
    #[serde(rename = "api-key")]
    pub api_key: String,
}

impl Credentials {
    /// Load credentials from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PteroError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(PteroError::ConfigNotFound(
                path.to_string_lossy().to_string(),
            ));
        }

        let content = fs::read_to_string(path)?;
        let creds: Credentials = serde_yaml::from_str(&content)?;

        Ok(creds)
    }

    /// Resolve credentials from a config file with flag fallback.
    ///
    /// The file takes precedence when it exists; otherwise both flags must be
    /// present or the resolution fails with `MissingCredentials`.
    pub fn resolve<P: AsRef<Path>>(
        config_path: P,
        panel_flag: Option<&str>,
        api_key_flag: Option<&str>,
    ) -> Result<Self, PteroError> {
        match Self::load(config_path) {
            Ok(creds) => Ok(creds),
            Err(PteroError::ConfigNotFound(_)) => match (panel_flag, api_key_flag) {
                (Some(panel), Some(key)) => Ok(Credentials {
                    panel: panel.to_string(),
                    api_key: key.to_string(),
                }),
                _ => Err(PteroError::MissingCredentials(
                    "could not read credentials from config file and the \
                     --panel or --api_key flags were missing"
                        .to_string(),
                )),
            },
            Err(e) => Err(e),
        }
    }
}
