//! Topics, levels and skills offered during onboarding.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use hoctap_core::error::ApiResult;
use hoctap_core::model::{Level, Skill, Topic};

use crate::http::ApiClient;

impl ApiClient {
    pub async fn topics(&self) -> ApiResult<Vec<Topic>> {
        self.get_field("/topics", "topics").await
    }

    pub async fn levels(&self) -> ApiResult<Vec<Level>> {
        self.get_field("/levels", "levels").await
    }

    pub async fn skills(&self) -> ApiResult<Vec<Skill>> {
        self.get_field("/skills", "skills").await
    }
}

/// Topic-list fetch that supersedes itself.
///
/// Each [`load`](TopicLoader::load) cancels the fetch started before it, and
/// dropping the loader cancels whatever is in flight. A cancelled fetch
/// resolves to `Ok(None)` so callers never apply a stale list.
pub struct TopicLoader {
    api: Arc<ApiClient>,
    current: std::sync::Mutex<CancellationToken>,
}

impl TopicLoader {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            current: std::sync::Mutex::new(CancellationToken::new()),
        }
    }

    pub async fn load(&self) -> ApiResult<Option<Vec<Topic>>> {
        let token = {
            let mut current = self.current.lock().unwrap_or_else(|p| p.into_inner());
            current.cancel();
            *current = CancellationToken::new();
            current.clone()
        };

        tokio::select! {
            _ = token.cancelled() => {
                tracing::debug!("topic fetch superseded");
                Ok(None)
            }
            result = self.api.topics() => result.map(Some),
        }
    }

    /// Abort the in-flight fetch, if any.
    pub fn cancel(&self) {
        self.current
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .cancel();
    }
}

impl Drop for TopicLoader {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use hoctap_core::session::Session;

    use super::*;

    fn topics_body() -> serde_json::Value {
        json!({
            "success": true,
            "topics": [
                {"_id": "t1", "name": "Kinh tế chính trị"},
                {"_id": "t2", "name": "Triết học"}
            ]
        })
    }

    #[tokio::test]
    async fn catalog_lists() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/topics"))
            .respond_with(ResponseTemplate::new(200).set_body_json(topics_body()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/levels"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "levels": [{"_id": "beginner", "name": "Cơ bản"}]
            })))
            .mount(&server)
            .await;

        let api = ApiClient::new(&server.uri(), Arc::new(Session::in_memory()));
        assert_eq!(api.topics().await.unwrap().len(), 2);
        assert_eq!(api.levels().await.unwrap()[0].name, "Cơ bản");
    }

    #[tokio::test]
    async fn newer_load_supersedes_older() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/topics"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(topics_body())
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(&server)
            .await;

        let api = Arc::new(ApiClient::new(&server.uri(), Arc::new(Session::in_memory())));
        let loader = TopicLoader::new(api);

        let first = loader.load();
        let second = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            loader.load().await
        };
        let (first, second) = tokio::join!(first, second);

        assert_eq!(first.unwrap(), None);
        assert_eq!(second.unwrap().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn explicit_cancel_yields_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/topics"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(topics_body())
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(&server)
            .await;

        let api = Arc::new(ApiClient::new(&server.uri(), Arc::new(Session::in_memory())));
        let loader = TopicLoader::new(api);

        let load = loader.load();
        let cancel = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            loader.cancel();
        };
        let (result, ()) = tokio::join!(load, cancel);
        assert_eq!(result.unwrap(), None);
    }
}
