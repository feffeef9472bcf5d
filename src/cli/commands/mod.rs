pub mod api;
pub mod logging;
pub mod login;

use clap::{
    Arg, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

pub const ARG_PATH: &str = "path";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("eventbook")
        .about("Acity Event Book sign-in client")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(login::command())
        .subcommand(Command::new("logout").about("Clear the stored session"))
        .subcommand(Command::new("session").about("Show the stored session"))
        .subcommand(
            Command::new("get")
                .about("Send an authenticated GET request and print the response")
                .arg(
                    Arg::new(ARG_PATH)
                        .help("Path relative to the API base URL, e.g. /events")
                        .required(true),
                ),
        );

    let command = api::with_args(command);
    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    const CLEAN_ENV: [(&str, Option<&str>); 6] = [
        ("EVENTBOOK_API_URL", None),
        ("EVENTBOOK_STORAGE", None),
        ("EVENTBOOK_LOG_LEVEL", None),
        ("EVENTBOOK_LOG_FORMAT", None),
        ("EVENTBOOK_EMAIL", None),
        ("EVENTBOOK_PASSWORD", None),
    ];

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "eventbook");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("Acity Event Book sign-in client".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_subcommand_required() {
        temp_env::with_vars(CLEAN_ENV, || {
            let result = new().try_get_matches_from(vec!["eventbook"]);
            assert!(result.is_err());
        });
    }

    #[test]
    fn test_defaults() {
        temp_env::with_vars(CLEAN_ENV, || {
            let matches = new().get_matches_from(vec!["eventbook", "session"]);
            let Some(("session", sub)) = matches.subcommand() else {
                panic!("expected session subcommand");
            };
            assert_eq!(
                sub.get_one::<String>(api::ARG_API_URL).cloned(),
                Some(crate::client::DEFAULT_API_BASE_URL.to_string())
            );
            assert_eq!(sub.get_one::<String>(api::ARG_STORAGE), None);
            assert_eq!(
                sub.get_one::<String>(logging::ARG_LOG_FORMAT).cloned(),
                Some("text".to_string())
            );
        });
    }

    #[test]
    fn test_login_args() {
        temp_env::with_vars(CLEAN_ENV, || {
            let matches = new().get_matches_from(vec![
                "eventbook",
                "login",
                "--email",
                "a@b.com",
                "--password",
                "secret",
                "--api-url",
                "http://localhost:5000/api",
            ]);
            let Some(("login", sub)) = matches.subcommand() else {
                panic!("expected login subcommand");
            };
            let options = login::Options::parse(sub);
            assert_eq!(options.email.as_deref(), Some("a@b.com"));
            assert_eq!(
                options.password.as_ref().map(|p| p.expose_secret().to_string()),
                Some("secret".to_string())
            );
            assert_eq!(
                sub.get_one::<String>(api::ARG_API_URL).cloned(),
                Some("http://localhost:5000/api".to_string())
            );
        });
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("EVENTBOOK_API_URL", Some("https://api.example.test")),
                ("EVENTBOOK_STORAGE", Some("/tmp/eventbook.json")),
                ("EVENTBOOK_EMAIL", Some("env@b.com")),
                ("EVENTBOOK_PASSWORD", Some("from-env")),
                ("EVENTBOOK_LOG_LEVEL", Some("info")),
                ("EVENTBOOK_LOG_FORMAT", Some("json")),
            ],
            || {
                let matches = new().get_matches_from(vec!["eventbook", "login"]);
                let Some(("login", sub)) = matches.subcommand() else {
                    panic!("expected login subcommand");
                };
                assert_eq!(
                    sub.get_one::<String>(api::ARG_API_URL).cloned(),
                    Some("https://api.example.test".to_string())
                );
                assert_eq!(
                    sub.get_one::<String>(api::ARG_STORAGE).cloned(),
                    Some("/tmp/eventbook.json".to_string())
                );
                assert_eq!(login::Options::parse(sub).email.as_deref(), Some("env@b.com"));
                assert_eq!(sub.get_one::<u8>(logging::ARG_VERBOSITY).copied(), Some(2));
                assert_eq!(
                    sub.get_one::<String>(logging::ARG_LOG_FORMAT).cloned(),
                    Some("json".to_string())
                );
            },
        );
    }

    #[test]
    fn test_check_log_level_verbosity() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, _) in levels.iter().enumerate() {
            temp_env::with_vars(CLEAN_ENV, || {
                let mut args = vec!["eventbook".to_string(), "session".to_string()];
                if index > 0 {
                    args.push(format!("-{}", "v".repeat(index)));
                }

                let matches = new().get_matches_from(args);
                let Some(("session", sub)) = matches.subcommand() else {
                    panic!("expected session subcommand");
                };
                assert_eq!(
                    sub.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(u8::try_from(index).unwrap_or(u8::MAX))
                );
            });
        }
    }

    #[test]
    fn test_get_requires_path() {
        temp_env::with_vars(CLEAN_ENV, || {
            assert!(new().try_get_matches_from(vec!["eventbook", "get"]).is_err());
            let matches = new().get_matches_from(vec!["eventbook", "get", "/events"]);
            let Some(("get", sub)) = matches.subcommand() else {
                panic!("expected get subcommand");
            };
            assert_eq!(
                sub.get_one::<String>(ARG_PATH).cloned(),
                Some("/events".to_string())
            );
        });
    }
}
