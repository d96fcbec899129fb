//! Backend endpoint resolution.
//!
//! The base URL is picked once at startup: when the machine identifies
//! itself as `localhost` we talk to a local development backend, otherwise
//! (including when no host name can be determined) we use the deployed
//! instance.

const LOCAL_BASE_URL: &str = "http://localhost:8000";
const DEPLOYED_BASE_URL: &str = "https://ai-and-robot-book4-backend.onrender.com";

/// The fixed set of backend endpoints, derived from one base URL.
///
/// `search` and `chapters` exist for parity with the backend API; the chat
/// flow only ever calls `chat` and `health`.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub chat: String,
    pub health: String,
    pub search: String,
    pub chapters: String,
}

impl Endpoints {
    /// Resolve endpoints from the current execution environment.
    pub fn resolve() -> Self {
        Self::with_base(base_url_for_host(host_name().as_deref()))
    }

    /// Build the endpoint set from an explicit base URL.
    pub fn with_base(base: &str) -> Self {
        Self {
            chat: format!("{}/chat", base),
            health: format!("{}/health", base),
            search: format!("{}/search-content", base),
            chapters: format!("{}/chapters", base),
        }
    }
}

/// Pick the base URL for a host name. `None` means the environment did not
/// expose one, which falls back to the deployed address.
pub fn base_url_for_host(host: Option<&str>) -> &'static str {
    match host {
        Some("localhost") => LOCAL_BASE_URL,
        _ => DEPLOYED_BASE_URL,
    }
}

fn host_name() -> Option<String> {
    std::env::var("HOSTNAME").ok().filter(|h| !h.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localhost_selects_local_backend() {
        assert_eq!(base_url_for_host(Some("localhost")), LOCAL_BASE_URL);
    }

    #[test]
    fn other_hosts_select_deployed_backend() {
        assert_eq!(base_url_for_host(Some("render-web-1")), DEPLOYED_BASE_URL);
    }

    #[test]
    fn missing_host_falls_back_to_deployed() {
        assert_eq!(base_url_for_host(None), DEPLOYED_BASE_URL);
    }

    #[test]
    fn endpoints_concatenate_fixed_suffixes() {
        let api = Endpoints::with_base("http://127.0.0.1:9999");
        assert_eq!(api.chat, "http://127.0.0.1:9999/chat");
        assert_eq!(api.health, "http://127.0.0.1:9999/health");
        assert_eq!(api.search, "http://127.0.0.1:9999/search-content");
        assert_eq!(api.chapters, "http://127.0.0.1:9999/chapters");
    }
}
