//! Daily check-in.

use serde_json::json;

use hoctap_core::error::ApiResult;
use hoctap_core::model::{CheckInReward, CheckInStatus};

use crate::http::ApiClient;

impl ApiClient {
    pub async fn check_in_status(&self) -> ApiResult<CheckInStatus> {
        self.get("/check-in/status").await
    }

    /// Record today's check-in. A second call on the same day comes back as a
    /// `success: false` rejection carrying the server's message.
    pub async fn check_in(&self) -> ApiResult<CheckInReward> {
        let reward: CheckInReward = self.post("/check-in", &json!({})).await?;
        tracing::info!(streak = reward.streak, xp_gained = reward.xp_gained, "checked in");
        Ok(reward)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use hoctap_core::error::ApiError;
    use hoctap_core::session::Session;

    use super::*;

    #[tokio::test]
    async fn status_and_reward() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/check-in/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "checkedInToday": false,
                "streak": 4,
                "lastCheckIn": "2024-03-01T08:00:00Z"
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/check-in"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "xpGained": 10.0,
                "streak": 5,
                "userLevel": 2,
                "xp": 40.0
            })))
            .mount(&server)
            .await;

        let api = ApiClient::new(&server.uri(), Arc::new(Session::in_memory()));
        let status = api.check_in_status().await.unwrap();
        assert!(!status.checked_in_today);
        assert_eq!(status.streak, 4);
        assert!(status.last_check_in.is_some());

        let reward = api.check_in().await.unwrap();
        assert_eq!(reward.streak, 5);
        assert_eq!(reward.user_level, Some(2));
    }

    #[tokio::test]
    async fn second_check_in_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/check-in"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "message": "Bạn đã điểm danh hôm nay"
            })))
            .mount(&server)
            .await;

        let api = ApiClient::new(&server.uri(), Arc::new(Session::in_memory()));
        let err = api.check_in().await.unwrap_err();
        assert_eq!(err, ApiError::Rejected(Some("Bạn đã điểm danh hôm nay".into())));
        assert_eq!(err.user_message(), "Bạn đã điểm danh hôm nay");
    }
}
