mod navbar;

pub use navbar::{AuthNavbar, BRAND};
