//! Administrator endpoints: accounts, packages, broadcast notifications.

use serde::Serialize;
use serde_json::json;

use hoctap_core::error::ApiResult;
use hoctap_core::model::{Package, Role, User};

use crate::http::{Ack, ApiClient};

/// Body for a broadcast notification.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    pub title: String,
    pub message: String,
    /// Restrict to one account; `None` sends to everyone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl ApiClient {
    pub async fn users(&self) -> ApiResult<Vec<User>> {
        self.get_field("/admin/users", "users").await
    }

    pub async fn change_role(&self, user_id: &str, role: Role) -> ApiResult<User> {
        let payload: serde_json::Value = self
            .put(&format!("/admin/users/{user_id}/role"), &json!({ "role": role }))
            .await?;
        crate::http::take_field(payload, "user")
    }

    pub async fn delete_user(&self, user_id: &str) -> ApiResult<()> {
        let _: Ack = self.delete(&format!("/admin/users/{user_id}")).await?;
        Ok(())
    }

    pub async fn admin_packages(&self) -> ApiResult<Vec<Package>> {
        self.get_field("/admin/packages", "packages").await
    }

    pub async fn create_package(&self, package: &Package) -> ApiResult<Package> {
        let payload: serde_json::Value = self.post("/admin/packages", package).await?;
        crate::http::take_field(payload, "package")
    }

    pub async fn update_package(&self, package: &Package) -> ApiResult<Package> {
        let payload: serde_json::Value = self
            .put(&format!("/admin/packages/{}", package.id), package)
            .await?;
        crate::http::take_field(payload, "package")
    }

    pub async fn delete_package(&self, id: &str) -> ApiResult<()> {
        let _: Ack = self.delete(&format!("/admin/packages/{id}")).await?;
        Ok(())
    }

    pub async fn send_notification(&self, notification: &NewNotification) -> ApiResult<()> {
        let _: Ack = self.post("/admin/notifications", notification).await?;
        Ok(())
    }
}
