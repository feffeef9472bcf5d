//! # Eventbook (login flow and authenticated HTTP client)
//!
//! `eventbook` is the client side of Acity Event Book authentication. It owns
//! the request client every caller goes through and the login flow that drives
//! a single sign-in attempt.
//!
//! ## Request Client
//!
//! [`client::ApiClient`] reads the stored credential before each request and
//! attaches it as `Authorization: Bearer <token>`. Every failed response is
//! normalized into a [`client::NormalizedError`] (`{message, code}`) so callers
//! only ever handle one error shape.
//!
//! ## Login Flow
//!
//! [`login::LoginFlow`] validates the form, posts `{email, password}` to
//! `/auth/login`, hands the session payload to [`auth::AuthContext`] and
//! navigates to `/`. Failures are shown as notifications and attached to the
//! form as a submission error. While a request is in flight the form stays
//! disabled, so at most one submission runs per flow.
//!
//! The credential is a static bearer token. There is no refresh, expiry or
//! multi-step protocol, and nothing here should ever log the token.

pub mod auth;
pub mod cli;
pub mod client;
pub mod components;
pub mod forms;
pub mod login;
pub mod notify;
pub mod router;
pub mod storage;

pub const GIT_COMMIT_HASH: &str = env!("EVENTBOOK_GIT_SHA");

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
