use crate::forms::{self, Field, FormErrors, Rule};
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::sync::LazyLock;
use tracing::error;

pub const EMAIL: &str = "email";
pub const PASSWORD: &str = "password";

const EMAIL_PATTERN: &str = r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$";
const PASSWORD_MIN_LENGTH: usize = 6;
const INVALID_EMAIL: &str = "Invalid email address";

static EMAIL_REGEX: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN));

/// Credentials for one submission attempt. The password never appears in
/// `Debug` output; it is only exposed when the request body is serialized.
#[derive(Clone, Debug)]
pub struct LoginValues {
    pub email: String,
    pub password: SecretString,
}

impl LoginValues {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Field errors for these values; empty when submission may proceed.
    #[must_use]
    pub fn validate(&self) -> FormErrors {
        let email = match EMAIL_REGEX.as_ref() {
            Ok(regex) => email_field(regex),
            Err(err) => {
                // fail closed: no email can be checked, so none is accepted
                error!("email pattern does not compile: {err}");
                let mut errors = FormErrors::default();
                errors.set(EMAIL, INVALID_EMAIL);
                return errors;
            }
        };
        forms::validate(&[
            (&email, self.email.as_str()),
            (&password_field(), self.password.expose_secret()),
        ])
    }
}

impl Serialize for LoginValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("LoginValues", 2)?;
        state.serialize_field(EMAIL, &self.email)?;
        state.serialize_field(PASSWORD, self.password.expose_secret())?;
        state.end()
    }
}

fn email_field(regex: &Regex) -> Field {
    Field::new(
        EMAIL,
        vec![
            Rule::Required("Email is required"),
            Rule::Pattern {
                regex: regex.clone(),
                message: INVALID_EMAIL,
            },
        ],
    )
}

fn password_field() -> Field {
    Field::new(
        PASSWORD,
        vec![
            Rule::Required("Password is required"),
            Rule::MinLength {
                min: PASSWORD_MIN_LENGTH,
                message: "Password must be at least 6 characters",
            },
        ],
    )
}
