//! API error types and the user-facing message normalizer.
//!
//! Every backend call ends in an [`ApiResult`]. Callers never inspect raw
//! response shapes: the HTTP layer classifies failures into [`ApiError`] and
//! the UI layer turns them into display strings with [`ApiError::user_message`].

use thiserror::Error;

/// Result of a backend call.
pub type ApiResult<T> = Result<T, ApiError>;

/// Fallback shown when nothing more specific is known.
pub const GENERIC_MESSAGE: &str = "Đã xảy ra lỗi. Vui lòng thử lại sau.";
pub const NETWORK_MESSAGE: &str =
    "Không thể kết nối đến máy chủ. Vui lòng kiểm tra kết nối mạng.";
pub const BAD_REQUEST_MESSAGE: &str = "Dữ liệu không hợp lệ.";
pub const SESSION_EXPIRED_MESSAGE: &str = "Phiên đăng nhập đã hết hạn. Vui lòng đăng nhập lại.";
pub const FORBIDDEN_MESSAGE: &str = "Bạn không có quyền thực hiện thao tác này.";
pub const BUSY_MESSAGE: &str = "Hệ thống đang bận hoặc AI tạm thời không khả dụng. Vui lòng thử lại sau.";
pub const CAPTCHA_MESSAGE: &str = "Vui lòng xác minh bạn không phải là robot.";

/// Errors that can occur when talking to the backend or the chat service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No response was received (DNS, connection refused, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// HTTP 400, with the server's validation message if it sent one.
    #[error("bad request: {}", .0.as_deref().unwrap_or("no message"))]
    BadRequest(Option<String>),

    /// HTTP 401.
    #[error("session expired")]
    Unauthorized,

    /// HTTP 403.
    #[error("permission denied")]
    Forbidden,

    /// HTTP 429 or 503.
    #[error("service busy (HTTP {status})")]
    Busy { status: u16 },

    /// Any other non-success status.
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status {
        status: u16,
        message: Option<String>,
    },

    /// The envelope came back with `success: false`.
    #[error("rejected: {}", .0.as_deref().unwrap_or("no message"))]
    Rejected(Option<String>),

    /// The body could not be decoded into the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Register / forgot-password submitted without a bot-check token.
    #[error("captcha token missing")]
    MissingCaptcha,

    /// Durable token storage could not be read or written.
    #[error("storage error: {0}")]
    Storage(String),

    /// Client-side form validation failed; nothing was sent.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError::Storage(format!("{e:#}"))
    }
}

impl ApiError {
    /// Classify a non-success HTTP status with the message the payload carried.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            400 => ApiError::BadRequest(message),
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden,
            429 | 503 => ApiError::Busy { status },
            _ => ApiError::Status { status, message },
        }
    }

    /// The display string for a toast or inline form error.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => NETWORK_MESSAGE.to_string(),
            ApiError::BadRequest(message) => non_empty(message)
                .unwrap_or(BAD_REQUEST_MESSAGE)
                .to_string(),
            ApiError::Unauthorized => SESSION_EXPIRED_MESSAGE.to_string(),
            ApiError::Forbidden => FORBIDDEN_MESSAGE.to_string(),
            ApiError::Busy { .. } => BUSY_MESSAGE.to_string(),
            ApiError::Rejected(message) => non_empty(message).unwrap_or(GENERIC_MESSAGE).to_string(),
            ApiError::Status { .. } | ApiError::Decode(_) | ApiError::Storage(_) => {
                GENERIC_MESSAGE.to_string()
            }
            ApiError::MissingCaptcha => CAPTCHA_MESSAGE.to_string(),
            ApiError::Validation(e) => e.user_message().to_string(),
        }
    }

    /// Callers redirect to the login screen when this is true.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

fn non_empty(message: &Option<String>) -> Option<&str> {
    message.as_deref().map(str::trim).filter(|m| !m.is_empty())
}

/// Form validation failures detected before a request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("email is required")]
    EmptyEmail,
    #[error("email is malformed")]
    InvalidEmail,
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("full name is required")]
    EmptyName,
    #[error("{0} is required")]
    Required(&'static str),
}

impl ValidationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::EmptyEmail => "Vui lòng nhập email.",
            ValidationError::InvalidEmail => "Email không hợp lệ.",
            ValidationError::PasswordTooShort { .. } => "Mật khẩu phải có ít nhất 6 ký tự.",
            ValidationError::PasswordMismatch => "Mật khẩu xác nhận không khớp.",
            ValidationError::EmptyName => "Vui lòng nhập họ tên.",
            ValidationError::Required(_) => "Vui lòng điền đầy đủ thông tin.",
        }
    }
}
