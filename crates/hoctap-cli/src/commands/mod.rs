//! Subcommand implementations.

pub mod account;
pub mod chat;
pub mod checkin;
pub mod init;
pub mod learn;
pub mod notifications;
pub mod payments;
pub mod progress;
pub mod quiz;
pub mod route;
pub mod validate;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use hoctap_client::config::load_config_from;
use hoctap_client::{ApiClient, HoctapConfig};
use hoctap_core::error::ApiResult;

/// Loaded config plus a client bound to the durable session.
pub struct Context {
    pub config: HoctapConfig,
    pub api: Arc<ApiClient>,
}

pub fn connect(config_path: Option<PathBuf>) -> Result<Context> {
    let config = load_config_from(config_path.as_deref())?;
    let session = config.open_session();
    let api = Arc::new(config.api_client(session));
    Ok(Context { config, api })
}

/// Turn an API failure into the message a learner should read.
pub trait Friendly<T> {
    fn friendly(self) -> Result<T>;
}

impl<T> Friendly<T> for ApiResult<T> {
    fn friendly(self) -> Result<T> {
        self.map_err(|e| {
            tracing::debug!("api error: {e}");
            if e.is_session_expired() {
                anyhow::anyhow!("{} Chạy `hoctap login`.", e.user_message())
            } else {
                anyhow::anyhow!(e.user_message())
            }
        })
    }
}
