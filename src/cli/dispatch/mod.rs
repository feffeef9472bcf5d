//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to the action to run, resolving the shared
//! API and storage settings once.

use crate::cli::actions::{Action, get, login};
use crate::cli::commands::{self, api};
use crate::cli::globals::GlobalArgs;
use anyhow::{Context, Result, bail};

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let Some((name, sub)) = matches.subcommand() else {
        bail!("missing subcommand");
    };

    let api_opts = api::Options::parse(sub)?;
    let globals = GlobalArgs::new(api_opts.api_base_url, api_opts.storage_path);

    match name {
        "login" => {
            let login_opts = commands::login::Options::parse(sub);
            Ok(Action::Login(login::Args {
                globals,
                email: login_opts.email,
                password: login_opts.password,
            }))
        }
        "logout" => Ok(Action::Logout(globals)),
        "session" => Ok(Action::Session(globals)),
        "get" => {
            let path = sub
                .get_one::<String>(commands::ARG_PATH)
                .cloned()
                .context("missing required argument: <path>")?;
            Ok(Action::Get(get::Args { globals, path }))
        }
        other => bail!("unknown subcommand: {other}"),
    }
}
