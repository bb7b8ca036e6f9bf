//! Process-wide outbound HTTP client.
//!
//! Created once at start and shared by the auth and payment adapters so
//! connections are pooled across invocations.

use std::time::Duration;

use once_cell::sync::OnceCell;

static SHARED_CLIENT: OnceCell<reqwest::Client> = OnceCell::new();

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Returns the shared client, building it on first use.
///
/// `timeout` only applies to the first call; later calls get the client
/// that already exists.
pub fn shared_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    SHARED_CLIENT
        .get_or_try_init(|| {
            reqwest::Client::builder()
                .timeout(timeout)
                .redirect(reqwest::redirect::Policy::none())
                .user_agent(USER_AGENT)
                .build()
        })
        .cloned()
}
