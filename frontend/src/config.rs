use shared::constants::API_BASE_URL;
use web_sys::window;

pub fn get_api_base_url() -> String {
    // The backend serves the built frontend, so API calls go back to wherever
    // the page was loaded from. `trunk serve` on :8080 talks to the backend
    // on :3000 instead.
    if let Some(window) = window() {
        if let Ok(host) = window.location().host() {
            if !host.ends_with(":8080") {
                let protocol = window.location().protocol().unwrap_or_else(|_| "http:".to_string());
                return format!("{}//{}", protocol, host);
            }
        }
    }

    API_BASE_URL.to_string()
}

pub fn api_url(path: &str) -> String {
    format!("{}{}", get_api_base_url(), path)
}
