//! Text rendering of the login view for terminal shells.

use crate::components::AuthNavbar;
use crate::forms::{FormErrors, SUBMIT};
use crate::login::form::{EMAIL, PASSWORD};
use crate::router::{Link, paths};

pub const HEADING: &str = "Login";
pub const SUBTITLE: &str = "Welcome back, please enter your details";
pub const SIGNUP_PROMPT: &str = "Don't have an account?";
pub const SIGNUP_LINK: Link = Link::new(paths::SIGNUP, "Sign Up");

/// Page header: navbar, heading and subtitle.
#[must_use]
pub fn header() -> String {
    format!("{}\n\n{HEADING}\n{SUBTITLE}\n", AuthNavbar.render())
}

/// Inline errors in field order, then the submission error.
#[must_use]
pub fn errors(errors: &FormErrors) -> String {
    [EMAIL, PASSWORD, SUBMIT]
        .into_iter()
        .filter_map(|field| errors.get(field))
        .map(|message| format!("  ! {message}\n"))
        .collect()
}

#[must_use]
pub fn footer() -> String {
    format!("{SIGNUP_PROMPT} {SIGNUP_LINK}\n")
}
