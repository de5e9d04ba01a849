//! hoctap-client: typed REST client for the hoctap learning backend.
//!
//! Wraps every backend endpoint in a typed [`ApiClient`] method, persists the
//! session tokens on disk, polls notifications on a cancellable interval and
//! keeps per-domain [`app::AppState`] slices for front ends.

pub mod admin;
pub mod app;
pub mod auth;
pub mod catalog;
pub mod chat;
pub mod checkin;
pub mod config;
pub mod content;
pub mod http;
pub mod lessons;
pub mod mock;
pub mod notifications;
pub mod payments;
pub mod storage;
pub mod user;

pub use app::AppState;
pub use auth::LoginOutcome;
pub use catalog::TopicLoader;
pub use chat::{ChatAssistant, ChatTurn, Speaker};
pub use config::{load_config, load_config_from, HoctapConfig};
pub use http::ApiClient;
pub use notifications::{NotificationCenter, PollHandle};
pub use storage::FileTokenStore;
