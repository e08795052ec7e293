/// Fallback when no API URL is baked in at build time
const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Base URL of the booking API, taken from `BOOKING_API_URL` at build time.
pub fn api_base_url() -> &'static str {
    option_env!("BOOKING_API_URL")
        .map(|url| url.trim_end_matches('/'))
        .filter(|url| !url.is_empty())
        .unwrap_or(DEFAULT_API_URL)
}

/// Absolute URL for an API path such as `/api/service`
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base_url(), path)
}
