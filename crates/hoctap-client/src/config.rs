//! Client configuration and factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use hoctap_core::session::Session;

use crate::chat::ChatAssistant;
use crate::http::ApiClient;
use crate::storage::FileTokenStore;

/// Settings for the generative chat assistant.
///
/// Note: Custom Debug impl masks the API key.
#[derive(Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    pub api_key: String,
    #[serde(default = "default_chat_model")]
    pub model: String,
    #[serde(default)]
    pub base_url: Option<String>,
}

impl std::fmt::Debug for ChatConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatConfig")
            .field("api_key", &"***")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn default_chat_model() -> String {
    "gemini-1.5-flash".to_string()
}

/// Top-level hoctap configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoctapConfig {
    /// Backend base URL, e.g. `https://api.hoctap.vn/api`.
    #[serde(default = "default_api_url")]
    pub api_base_url: String,
    /// Per-request timeout.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Notification refresh interval.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    /// Where tokens are kept between runs.
    #[serde(default)]
    pub session_file: Option<PathBuf>,
    /// Chat assistant; absent disables `hoctap chat`.
    #[serde(default)]
    pub chat: Option<ChatConfig>,
}

fn default_api_url() -> String {
    "http://localhost:5000/api".to_string()
}
fn default_timeout() -> u64 {
    30
}
fn default_poll_interval() -> u64 {
    60
}

impl Default for HoctapConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_url(),
            timeout_secs: default_timeout(),
            poll_interval_secs: default_poll_interval(),
            session_file: None,
            chat: None,
        }
    }
}

impl HoctapConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    /// Configured session file, else `~/.config/hoctap/session.json`, else
    /// `.hoctap-session.json` in the current directory.
    pub fn session_path(&self) -> PathBuf {
        self.session_file
            .clone()
            .or_else(|| config_dir().map(|d| d.join("session.json")))
            .unwrap_or_else(|| PathBuf::from(".hoctap-session.json"))
    }

    /// Session context backed by the durable session file.
    pub fn open_session(&self) -> Arc<Session> {
        Arc::new(Session::new(Arc::new(FileTokenStore::new(self.session_path()))))
    }

    pub fn api_client(&self, session: Arc<Session>) -> ApiClient {
        ApiClient::with_timeout(
            &self.api_base_url,
            Duration::from_secs(self.timeout_secs),
            session,
        )
    }

    pub fn chat_assistant(&self) -> Result<ChatAssistant> {
        let chat = self
            .chat
            .as_ref()
            .context("chat is not configured; add a [chat] section with api_key")?;
        anyhow::ensure!(!chat.api_key.is_empty(), "chat api_key is empty");
        Ok(ChatAssistant::new(
            &chat.api_key,
            &chat.model,
            chat.base_url.clone(),
        ))
    }
}

/// Expand `${VAR}` references from the environment. Unset variables expand
/// to the empty string; an unterminated reference is left as is.
fn resolve_env_vars(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        let name = &rest[start + 2..start + len];
        out.push_str(&std::env::var(name).unwrap_or_default());
        rest = &rest[start + len + 1..];
    }
    out.push_str(rest);
    out
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `hoctap.toml` in the current directory
/// 2. `~/.config/hoctap/config.toml`
///
/// Environment variable overrides: `HOCTAP_API_URL`, `HOCTAP_CHAT_KEY`.
pub fn load_config() -> Result<HoctapConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<HoctapConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => [Some(PathBuf::from("hoctap.toml")), config_dir().map(|d| d.join("config.toml"))]
            .into_iter()
            .flatten()
            .find(|p| p.exists()),
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<HoctapConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => HoctapConfig::default(),
    };

    if let Ok(url) = std::env::var("HOCTAP_API_URL") {
        config.api_base_url = url;
    }
    if let Ok(key) = std::env::var("HOCTAP_CHAT_KEY") {
        match config.chat.as_mut() {
            Some(chat) => chat.api_key = key,
            None => {
                config.chat = Some(ChatConfig {
                    api_key: key,
                    model: default_chat_model(),
                    base_url: None,
                })
            }
        }
    }

    config.api_base_url = resolve_env_vars(&config.api_base_url);
    if let Some(chat) = config.chat.as_mut() {
        chat.api_key = resolve_env_vars(&chat.api_key);
        chat.base_url = chat.base_url.as_deref().map(resolve_env_vars);
    }
    config.session_file = config
        .session_file
        .map(|p| PathBuf::from(resolve_env_vars(&p.to_string_lossy())));

    Ok(config)
}

fn config_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("hoctap"))
}
