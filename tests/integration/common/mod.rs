//! Shared helpers for integration tests

use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use teachportal_client::PortalClient;
use teachportal_common::Config;
use teachportal_session::{MemorySessionStore, SessionManager};

/// Config pointed at a wiremock server
pub fn test_config(base_url: &str) -> Config {
    Config {
        api_url: base_url.to_string(),
        session_file: PathBuf::from("/tmp/unused-session"),
        request_timeout_secs: 5,
        rust_log: String::new(),
    }
}

/// In-memory session manager
pub fn test_session() -> SessionManager {
    SessionManager::new(Arc::new(MemorySessionStore::new()))
}

/// Client wired to a wiremock server, with a flag that records whether the
/// auth-failure handler fired
pub fn test_client(base_url: &str, session: SessionManager) -> (PortalClient, Arc<AtomicBool>) {
    let redirected = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&redirected);
    let client = PortalClient::new(&test_config(base_url), session).with_auth_failure_handler(
        Arc::new(move || {
            flag.store(true, std::sync::atomic::Ordering::SeqCst);
        }),
    );
    (client, redirected)
}

/// Unsigned three-part token whose middle segment is `claims_json`
pub fn forge_token(claims_json: &str) -> String {
    format!("h.{}.s", URL_SAFE_NO_PAD.encode(claims_json))
}
