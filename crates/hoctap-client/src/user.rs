//! Profile and onboarding choices.

use serde::Serialize;
use serde_json::json;

use hoctap_core::error::ApiResult;
use hoctap_core::model::User;

use crate::http::ApiClient;

/// Partial profile update; unset fields are left alone by the server.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl ApiClient {
    /// Fetch the signed-in profile and cache it on the session.
    pub async fn me(&self) -> ApiResult<User> {
        let user: User = self.get_field("/users/profile", "user").await?;
        self.session().set_user(user.clone());
        Ok(user)
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> ApiResult<User> {
        self.put_user("/users/profile", update).await
    }

    /// Onboarding step one.
    pub async fn choose_topic(&self, topic_id: &str) -> ApiResult<User> {
        self.put_user("/users/preferences", &json!({ "preferredTopic": topic_id }))
            .await
    }

    pub async fn choose_level(&self, level: &str) -> ApiResult<User> {
        self.put_user("/users/preferences", &json!({ "level": level }))
            .await
    }

    /// Final onboarding step; afterwards the user lands on the learn page.
    pub async fn choose_skills(&self, skills: &[String]) -> ApiResult<User> {
        self.put_user("/users/preferences", &json!({ "preferredSkills": skills }))
            .await
    }

    async fn put_user<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<User> {
        let payload: serde_json::Value = self.put(path, body).await?;
        let user: User = crate::http::take_field(payload, "user")?;
        self.session().set_user(user.clone());
        Ok(user)
    }
}
