//! hoctap-core: domain model and client-side logic.
//!
//! Quiz randomization, level/streak presentation math, the role-gated route
//! table, the session context and per-domain slice state. No network I/O
//! happens here; `hoctap-client` supplies it.

pub mod error;
pub mod forms;
pub mod model;
pub mod notifications;
pub mod parser;
pub mod progress;
pub mod quiz;
pub mod routing;
pub mod session;
pub mod store;
pub mod traits;

pub use error::{ApiError, ApiResult, ValidationError};
pub use session::Session;
