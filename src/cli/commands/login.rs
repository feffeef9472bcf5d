use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;

pub const ARG_EMAIL: &str = "email";
pub const ARG_PASSWORD: &str = "password";

#[derive(Debug, Clone)]
pub struct Options {
    pub email: Option<String>,
    pub password: Option<SecretString>,
}

impl Options {
    /// Missing values are prompted for when the action runs.
    #[must_use]
    pub fn parse(matches: &ArgMatches) -> Self {
        Self {
            email: matches.get_one::<String>(ARG_EMAIL).cloned(),
            password: matches
                .get_one::<String>(ARG_PASSWORD)
                .cloned()
                .map(SecretString::from),
        }
    }
}

#[must_use]
pub fn command() -> Command {
    Command::new("login")
        .about("Sign in with email and password")
        .arg(
            Arg::new(ARG_EMAIL)
                .short('e')
                .long(ARG_EMAIL)
                .help("Account email, prompted for when missing")
                .env("EVENTBOOK_EMAIL"),
        )
        .arg(
            Arg::new(ARG_PASSWORD)
                .long(ARG_PASSWORD)
                .help("Account password, prompted for when missing")
                .env("EVENTBOOK_PASSWORD")
                .hide_env_values(true),
        )
}
