use crate::client::DEFAULT_API_BASE_URL;
use clap::{Arg, ArgMatches, Command};
use std::env::var_os;
use std::path::PathBuf;

pub const ARG_API_URL: &str = "api-url";
pub const ARG_STORAGE: &str = "storage";

/// Storage file used when `--storage` is not given, relative to `$HOME`.
const DEFAULT_STORAGE_FILE: &str = ".eventbook/storage.json";

#[derive(Debug, Clone)]
pub struct Options {
    pub api_base_url: String,
    pub storage_path: PathBuf,
}

impl Options {
    /// Parse API and storage arguments from matches.
    ///
    /// # Errors
    /// Returns an error if the API URL is blank.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let api_base_url = matches
            .get_one::<String>(ARG_API_URL)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --{ARG_API_URL}"))?;

        let storage_path = matches
            .get_one::<String>(ARG_STORAGE)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .map_or_else(default_storage_path, PathBuf::from);

        Ok(Self {
            api_base_url,
            storage_path,
        })
    }
}

fn default_storage_path() -> PathBuf {
    var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_default()
        .join(DEFAULT_STORAGE_FILE)
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_URL)
                .long(ARG_API_URL)
                .help("Event Book API base URL")
                .env("EVENTBOOK_API_URL")
                .global(true)
                .default_value(DEFAULT_API_BASE_URL),
        )
        .arg(
            Arg::new(ARG_STORAGE)
                .long(ARG_STORAGE)
                .help("Path of the local storage file holding the session")
                .long_help(
                    "Path of the local storage file holding the session. Defaults to ~/.eventbook/storage.json. The file contains the bearer token and is created with owner-only permissions.",
                )
                .env("EVENTBOOK_STORAGE")
                .global(true),
        )
}
