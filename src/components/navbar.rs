use crate::router::{Link, paths};

pub const BRAND: &str = "Acity Event Book";

/// Navigation bar shown on auth views: a single brand link to the root view.
#[derive(Clone, Copy, Debug, Default)]
pub struct AuthNavbar;

impl AuthNavbar {
    #[must_use]
    pub const fn link(&self) -> Link {
        Link::new(paths::ROOT, BRAND)
    }

    #[must_use]
    pub fn render(&self) -> String {
        format!("[book] {}", self.link())
    }
}
