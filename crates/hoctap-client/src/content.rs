//! Staff content management.

use hoctap_core::error::ApiResult;
use hoctap_core::model::{ContentItem, ContentKind, StaffStats};

use crate::http::{Ack, ApiClient};

impl ApiClient {
    pub async fn list_content(&self, kind: ContentKind) -> ApiResult<Vec<ContentItem>> {
        self.get_field(&format!("/staff/{}", kind.path_segment()), "items")
            .await
    }

    pub async fn create_content(&self, kind: ContentKind, item: &ContentItem) -> ApiResult<ContentItem> {
        let payload: serde_json::Value = self
            .post(&format!("/staff/{}", kind.path_segment()), item)
            .await?;
        crate::http::take_field(payload, "item")
    }

    pub async fn update_content(&self, kind: ContentKind, item: &ContentItem) -> ApiResult<ContentItem> {
        let payload: serde_json::Value = self
            .put(&format!("/staff/{}/{}", kind.path_segment(), item.id), item)
            .await?;
        crate::http::take_field(payload, "item")
    }

    pub async fn delete_content(&self, kind: ContentKind, id: &str) -> ApiResult<()> {
        let _: Ack = self
            .delete(&format!("/staff/{}/{id}", kind.path_segment()))
            .await?;
        Ok(())
    }

    pub async fn staff_stats(&self) -> ApiResult<StaffStats> {
        self.get_field("/staff/stats", "stats").await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use hoctap_core::error::ApiError;
    use hoctap_core::session::Session;

    use super::*;

    fn client(server: &MockServer) -> ApiClient {
        ApiClient::new(&server.uri(), Arc::new(Session::in_memory()))
    }

    #[tokio::test]
    async fn philosophy_crud() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/staff/philosophy"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "items": [{"_id": "c1", "title": "Vật chất và ý thức", "body": "..."}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/staff/philosophy/c1"))
            .and(body_partial_json(json!({"title": "Vật chất và ý thức (sửa)"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "item": {"_id": "c1", "title": "Vật chất và ý thức (sửa)", "body": "..."}
            })))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/staff/philosophy/c1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;

        let api = client(&server);
        let mut items = api.list_content(ContentKind::Philosophy).await.unwrap();
        assert_eq!(items.len(), 1);

        items[0].title = "Vật chất và ý thức (sửa)".into();
        let updated = api
            .update_content(ContentKind::Philosophy, &items[0])
            .await
            .unwrap();
        assert_eq!(updated.title, "Vật chất và ý thức (sửa)");

        api.delete_content(ContentKind::Philosophy, "c1").await.unwrap();
    }

    #[tokio::test]
    async fn create_omits_empty_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/staff/marxist-economics"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "success": true,
                "item": {"_id": "c9", "title": "Tư bản bất biến"}
            })))
            .mount(&server)
            .await;

        let item = ContentItem {
            id: String::new(),
            title: "Tư bản bất biến".into(),
            body: String::new(),
            level: None,
        };
        assert!(serde_json::to_value(&item).unwrap().get("id").is_none());

        let created = client(&server)
            .create_content(ContentKind::MarxistEconomics, &item)
            .await
            .unwrap();
        assert_eq!(created.id, "c9");
    }

    #[tokio::test]
    async fn learners_are_forbidden() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/staff/stats"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let err = client(&server).staff_stats().await.unwrap_err();
        assert_eq!(err, ApiError::Forbidden);
    }
}
