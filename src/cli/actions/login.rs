use crate::cli::globals::GlobalArgs;
use crate::components::AuthNavbar;
use crate::login::{LoginFlow, LoginValues, Mount, Submission, view};
use crate::notify::TerminalNotifier;
use crate::router::{History, Navigator, paths};
use anyhow::{Context, Result, bail};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use secrecy::SecretString;
use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::Arc;
use tracing::debug;

/// Attempts allowed when credentials are typed at the prompt.
const MAX_PROMPT_ATTEMPTS: u32 = 3;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub email: Option<String>,
    pub password: Option<SecretString>,
}

/// Execute the login action.
/// # Errors
/// Returns an error if the client cannot be built, stdin cannot be read, or
/// every attempt is rejected.
pub async fn execute(args: Args) -> Result<()> {
    let store = args.globals.session_store();
    let client = args.globals.client(store.clone())?;
    let history = Arc::new(History::new(paths::LOGIN));
    let flow = LoginFlow::new(
        client,
        args.globals.auth(),
        Arc::new(TerminalNotifier::default()),
        history.clone(),
    );

    if flow.mount() == Mount::Redirected {
        println!("{}", AuthNavbar.render());
        println!("Already signed in, continuing to {}", history.location());
        return Ok(());
    }

    print!("{}", view::header());

    let interactive = args.email.is_none() || args.password.is_none();
    let attempts = if interactive { MAX_PROMPT_ATTEMPTS } else { 1 };
    let (mut email, mut password) = (args.email, args.password);

    for attempt in 1..=attempts {
        let values = LoginValues {
            email: match email.take() {
                Some(email) => email,
                None => prompt("Email: ")?.trim().to_string(),
            },
            password: match password.take() {
                Some(password) => password,
                None => prompt_password("Password: ")?,
            },
        };

        match flow.submit(values).await {
            Submission::Succeeded(_) => {
                println!("Signed in, now at {}", history.location());
                return Ok(());
            }
            Submission::Blocked(_) | Submission::Failed(_) => {
                debug!(attempt, "login attempt rejected");
                print!("{}", view::errors(&flow.form().errors));
            }
            Submission::Busy => bail!("a login is already in progress"),
        }
    }

    print!("{}", view::footer());
    bail!("login failed")
}

fn prompt(label: &str) -> Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{label}")?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    if line.is_empty() {
        bail!("stdin closed before credentials were entered");
    }

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Reads a password without echoing it. Piped stdin has no echo to hide and
/// is read as a plain line.
fn prompt_password(label: &str) -> Result<SecretString> {
    if !io::stdin().is_terminal() {
        return prompt(label).map(SecretString::from);
    }

    let mut stdout = io::stdout();
    write!(stdout, "{label}")?;
    stdout.flush()?;

    let mut password = String::new();
    let entry = {
        let _raw = RawMode::enable()?;
        loop {
            if let Event::Key(key) = event::read().context("failed to read from terminal")? {
                match apply_key(&mut password, key) {
                    Entry::Editing => {}
                    done => break done,
                }
            }
        }
    };
    writeln!(stdout)?;

    match entry {
        Entry::Cancelled => bail!("password entry cancelled"),
        _ => Ok(SecretString::from(password)),
    }
}

/// Raw mode for the lifetime of the guard, restored on every exit path.
struct RawMode;

impl RawMode {
    fn enable() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Entry {
    Editing,
    Submitted,
    Cancelled,
}

fn apply_key(password: &mut String, key: KeyEvent) -> Entry {
    if key.kind == KeyEventKind::Release {
        return Entry::Editing;
    }

    match key.code {
        KeyCode::Enter => Entry::Submitted,
        KeyCode::Esc => Entry::Cancelled,
        KeyCode::Char('c' | 'd') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Entry::Cancelled
        }
        KeyCode::Backspace => {
            password.pop();
            Entry::Editing
        }
        KeyCode::Char(c) => {
            password.push(c);
            Entry::Editing
        }
        _ => Entry::Editing,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::SessionStore;
    use secrecy::ExposeSecret;
    use serde_json::json;
    use std::net::TcpListener;
    use std::path::PathBuf;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    struct DirGuard(PathBuf);

    impl Drop for DirGuard {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }

    fn globals(api: &str) -> (GlobalArgs, DirGuard) {
        let dir = std::env::temp_dir().join(format!("eventbook-cli-{}", uuid::Uuid::new_v4()));
        let globals = GlobalArgs::new(api.to_string(), dir.join("storage.json"));
        (globals, DirGuard(dir))
    }

    fn stored_token(store: &SessionStore) -> Option<String> {
        store
            .get()
            .unwrap()
            .map(|token| token.expose_secret().to_string())
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn password_keys_edit_without_echo() {
        let mut password = String::new();
        for c in "secrex".chars() {
            assert_eq!(apply_key(&mut password, press(KeyCode::Char(c))), Entry::Editing);
        }
        assert_eq!(apply_key(&mut password, press(KeyCode::Backspace)), Entry::Editing);
        assert_eq!(apply_key(&mut password, press(KeyCode::Char('t'))), Entry::Editing);
        assert_eq!(apply_key(&mut password, press(KeyCode::Enter)), Entry::Submitted);
        assert_eq!(password, "secret");
    }

    #[test]
    fn password_entry_can_be_cancelled() {
        let mut password = String::new();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(apply_key(&mut password, ctrl_c), Entry::Cancelled);
        assert_eq!(apply_key(&mut password, press(KeyCode::Esc)), Entry::Cancelled);
        assert!(password.is_empty());
    }

    #[test]
    fn key_release_is_ignored() {
        let mut password = String::new();
        let release = KeyEvent::new_with_kind(
            KeyCode::Char('a'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        );
        assert_eq!(apply_key(&mut password, release), Entry::Editing);
        assert!(password.is_empty());
    }

    #[tokio::test]
    async fn login_with_flags_persists_session() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "cli-token" })))
            .expect(1)
            .mount(&server)
            .await;

        let (globals, _guard) = globals(&format!("{}/api", server.uri()));
        execute(Args {
            globals: globals.clone(),
            email: Some("a@b.com".to_string()),
            password: Some(SecretString::from("secret")),
        })
        .await?;

        assert_eq!(
            stored_token(&globals.session_store()).as_deref(),
            Some("cli-token")
        );
        Ok(())
    }

    #[tokio::test]
    async fn rejected_login_with_flags_fails_once() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid credentials" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let (globals, _guard) = globals(&format!("{}/api", server.uri()));
        let result = execute(Args {
            globals: globals.clone(),
            email: Some("a@b.com".to_string()),
            password: Some(SecretString::from("secret")),
        })
        .await;

        assert!(result.is_err());
        assert_eq!(stored_token(&globals.session_store()), None);
        Ok(())
    }

    #[tokio::test]
    async fn existing_session_skips_the_request() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let (globals, _guard) = globals(&format!("{}/api", server.uri()));
        globals.auth().login(json!({ "token": "already" }))?;

        execute(Args {
            globals,
            email: Some("a@b.com".to_string()),
            password: Some(SecretString::from("secret")),
        })
        .await?;
        Ok(())
    }
}
