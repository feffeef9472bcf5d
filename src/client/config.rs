//! Fixed request client configuration. The base URL is chosen once at startup
//! (CLI flag or environment) and never negotiated at runtime.

/// Event Book API used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "https://webtechexam.onrender.com/api";

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub user_agent: String,
}

impl ClientConfig {
    /// Config for `api_base_url`, falling back to the default when blank.
    #[must_use]
    pub fn new(api_base_url: &str) -> Self {
        Self {
            api_base_url: normalize_base_url(api_base_url)
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            user_agent: crate::APP_USER_AGENT.to_string(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

fn normalize_base_url(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Joins `path` onto `base_url` with exactly one slash between them.
pub(crate) fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}
