use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::Path;

use thiserror::Error;

use fleetcmd_model::Credentials;

pub const CLIENT_ID_VAR: &str = "FLEETCMD_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "FLEETCMD_CLIENT_SECRET";
pub const BASE_URL_VAR: &str = "FLEETCMD_BASE_URL";

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("failed to read env file {path}: {source}")]
    Unreadable {
        path: String,
        source: std::io::Error,
    },
    #[error("missing credentials: {0} is not set")]
    MissingVar(&'static str),
}

/// Credential and config lookup over an optional env file plus process env.
///
/// Entries from the file win over process variables. A missing file is not
/// an error; any other read failure is.
#[derive(Debug, Default)]
pub struct EnvSource {
    file_vars: HashMap<String, String>,
}

impl EnvSource {
    pub fn load(path: &Path) -> Result<Self, EnvError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(EnvError::Unreadable {
                    path: path.display().to_string(),
                    source,
                });
            }
        };
        Ok(Self {
            file_vars: parse(&content),
        })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.file_vars
            .get(key)
            .cloned()
            .or_else(|| std::env::var(key).ok())
    }

    pub fn credentials(&self) -> Result<Credentials, EnvError> {
        let client_id = self
            .get(CLIENT_ID_VAR)
            .ok_or(EnvError::MissingVar(CLIENT_ID_VAR))?;
        let client_secret = self
            .get(CLIENT_SECRET_VAR)
            .ok_or(EnvError::MissingVar(CLIENT_SECRET_VAR))?;
        Ok(Credentials::new(client_id, client_secret))
    }
}

fn parse(content: &str) -> HashMap<String, String> {
    let mut vars = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        vars.insert(key.to_string(), unquote(value.trim()).to_string());
    }
    vars
}

fn unquote(value: &str) -> &str {
    if value.len() >= 2 {
        for quote in ['"', '\''] {
            if value.starts_with(quote) && value.ends_with(quote) {
                return &value[1..value.len() - 1];
            }
        }
    }
    value
}
