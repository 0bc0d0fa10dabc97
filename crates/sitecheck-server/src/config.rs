use std::path::PathBuf;
use std::time::Duration;

pub const CONFIG_SCHEMA_VERSION: &str = "1";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: String,
    pub database_path: PathBuf,
    /// Base URL of the external identity provider; bearer tokens are
    /// verified against `{auth_base_url}/user`.
    pub auth_base_url: Option<String>,
    pub max_body_bytes: usize,
    pub request_timeout: Duration,
    pub default_page_size: usize,
    pub max_page_size: usize,
    /// How many checklists each dashboard rail returns.
    pub dashboard_take: usize,
    /// Look-back window for the dashboard's recently-viewed rail.
    pub recent_view_window: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            database_path: PathBuf::from("sitecheck.sqlite"),
            auth_base_url: None,
            max_body_bytes: 16 * 1024,
            request_timeout: Duration::from_secs(5),
            default_page_size: 100,
            max_page_size: 500,
            dashboard_take: 5,
            recent_view_window: Duration::from_secs(48 * 3600),
        }
    }
}

pub fn validate_startup_config_contract(api: &ApiConfig) -> Result<(), String> {
    if api.max_body_bytes == 0 {
        return Err("max_body_bytes must be > 0".to_string());
    }
    if api.request_timeout.is_zero() {
        return Err("request_timeout must be > 0".to_string());
    }
    if api.default_page_size == 0 || api.default_page_size > api.max_page_size {
        return Err("page size contract requires 0 < default <= max".to_string());
    }
    if api.dashboard_take == 0 {
        return Err("dashboard_take must be > 0".to_string());
    }
    if let Some(url) = api.auth_base_url.as_deref() {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err("auth_base_url must be an http(s) URL".to_string());
        }
    }
    Ok(())
}
