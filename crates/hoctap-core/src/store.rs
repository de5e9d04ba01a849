//! Per-domain client state: last server response plus loading/error flags.

use serde::Serialize;

use crate::error::{ApiError, ApiResult};

/// State of one domain slice.
///
/// Data is only ever replaced wholesale by a successful response; a failure
/// keeps the previous data and records the display message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for Slice<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> Slice<T> {
    /// A request is in flight.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn succeed(&mut self, data: T) {
        self.data = Some(data);
        self.loading = false;
        self.error = None;
    }

    pub fn fail(&mut self, error: &ApiError) {
        self.loading = false;
        self.error = Some(error.user_message());
    }

    /// Apply a finished request. Returns the error message on failure so the
    /// caller can surface it as a toast.
    pub fn settle(&mut self, result: ApiResult<T>) -> Option<String> {
        match result {
            Ok(data) => {
                self.succeed(data);
                None
            }
            Err(e) => {
                tracing::warn!("request failed: {e}");
                self.fail(&e);
                self.error.clone()
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn get(&self) -> Option<&T> {
        self.data.as_ref()
    }
}
