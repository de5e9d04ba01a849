//! Notification endpoints, the panel controller and its refresh poller.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use hoctap_core::error::ApiResult;
use hoctap_core::model::Notification;
use hoctap_core::notifications::NotificationPanel;
use hoctap_core::traits::NotificationFeed;

use crate::http::{Ack, ApiClient};

impl ApiClient {
    pub async fn notifications(&self) -> ApiResult<Vec<Notification>> {
        self.get_field("/notifications", "notifications").await
    }

    pub async fn mark_notification_read(&self, id: &str) -> ApiResult<()> {
        let _: Ack = self
            .put(&format!("/notifications/{id}/read"), &json!({}))
            .await?;
        Ok(())
    }

    pub async fn mark_all_notifications_read(&self) -> ApiResult<()> {
        let _: Ack = self.put("/notifications/read-all", &json!({})).await?;
        Ok(())
    }
}

#[async_trait]
impl NotificationFeed for ApiClient {
    async fn fetch(&self) -> ApiResult<Vec<Notification>> {
        self.notifications().await
    }

    async fn mark_read(&self, id: &str) -> ApiResult<()> {
        self.mark_notification_read(id).await
    }

    async fn mark_all_read(&self) -> ApiResult<()> {
        self.mark_all_notifications_read().await
    }
}

/// Owns the panel state and keeps it in step with a [`NotificationFeed`].
///
/// Every mutation is followed by a full refetch; whichever fetch lands last
/// defines the list. Subscribers see the unread count after each refresh.
pub struct NotificationCenter {
    feed: Arc<dyn NotificationFeed>,
    panel: Mutex<NotificationPanel>,
    unread: watch::Sender<usize>,
}

impl NotificationCenter {
    pub fn new(feed: Arc<dyn NotificationFeed>) -> Self {
        let (unread, _) = watch::channel(0);
        Self {
            feed,
            panel: Mutex::new(NotificationPanel::new()),
            unread,
        }
    }

    fn panel(&self) -> MutexGuard<'_, NotificationPanel> {
        self.panel.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Refetch the list. On failure the previous list stays in place.
    pub async fn refresh(&self) -> ApiResult<usize> {
        let items = self.feed.fetch().await.inspect_err(|e| {
            tracing::warn!("notification refresh failed: {e}");
        })?;
        let unread = {
            let mut panel = self.panel();
            panel.replace(items);
            panel.unread_count()
        };
        self.unread.send_replace(unread);
        Ok(unread)
    }

    /// Mark one read, then refetch whether or not the mark succeeded.
    pub async fn mark_read(&self, id: &str) -> ApiResult<usize> {
        if let Err(e) = self.feed.mark_read(id).await {
            tracing::warn!(id, "mark read failed: {e}");
        }
        self.refresh().await
    }

    pub async fn mark_all_read(&self) -> ApiResult<usize> {
        if let Err(e) = self.feed.mark_all_read().await {
            tracing::warn!("mark all read failed: {e}");
        }
        self.refresh().await
    }

    pub fn items(&self) -> Vec<Notification> {
        self.panel().items().to_vec()
    }

    pub fn unread_count(&self) -> usize {
        self.panel().unread_count()
    }

    pub fn toggle(&self, id: &str) -> bool {
        self.panel().toggle(id)
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.panel().is_expanded(id)
    }

    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.unread.subscribe()
    }

    /// Fetch now and then every `every` until the handle is stopped or dropped.
    pub fn start_polling(self: &Arc<Self>, every: Duration) -> PollHandle {
        let token = CancellationToken::new();
        let center = Arc::clone(self);
        let cancel = token.clone();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        tracing::debug!("polling notifications");
                        tokio::select! {
                            _ = cancel.cancelled() => break,
                            _ = center.refresh() => {}
                        }
                    }
                }
            }
            tracing::debug!("notification poller stopped");
        });

        PollHandle {
            token,
            task: Some(task),
        }
    }
}

/// Keeps the poller alive. Dropping it cancels polling.
pub struct PollHandle {
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl PollHandle {
    /// Cancel and wait for the poll task to finish.
    pub async fn stop(mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use hoctap_core::session::Session;

    use super::*;
    use crate::mock::{notification, MockNotificationFeed};

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn polls_immediately_then_every_interval() {
        let feed = Arc::new(MockNotificationFeed::new(vec![notification("n1", "A", false)]));
        let center = Arc::new(NotificationCenter::new(feed.clone()));

        let handle = center.start_polling(Duration::from_secs(60));
        settle().await;
        assert_eq!(feed.fetch_count(), 1);
        assert_eq!(center.unread_count(), 1);

        feed.push(notification("n2", "B", false));
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(feed.fetch_count(), 2);
        assert_eq!(center.unread_count(), 2);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(feed.fetch_count(), 2);

        handle.stop().await;
        tokio::time::sleep(Duration::from_secs(300)).await;
        assert_eq!(feed.fetch_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_handle_stops_polling() {
        let feed = Arc::new(MockNotificationFeed::new(vec![]));
        let center = Arc::new(NotificationCenter::new(feed.clone()));

        let handle = center.start_polling(Duration::from_secs(60));
        settle().await;
        drop(handle);

        tokio::time::sleep(Duration::from_secs(600)).await;
        assert_eq!(feed.fetch_count(), 1);
    }

    #[tokio::test]
    async fn failed_mark_still_refetches() {
        let feed = Arc::new(MockNotificationFeed::failing_marks(vec![
            notification("n1", "A", false),
            notification("n2", "B", false),
        ]));
        let center = NotificationCenter::new(feed.clone());

        let unread = center.mark_read("n1").await.unwrap();
        assert_eq!(unread, 2);
        assert_eq!(feed.mark_count(), 1);
        assert_eq!(feed.fetch_count(), 1);

        center.mark_all_read().await.unwrap();
        assert_eq!(feed.fetch_count(), 2);
    }

    #[tokio::test]
    async fn mark_all_then_refetch_shows_zero_unread() {
        let feed = Arc::new(MockNotificationFeed::new(vec![
            notification("n1", "A", false),
            notification("n2", "B", true),
        ]));
        let center = NotificationCenter::new(feed);
        let mut rx = center.subscribe();

        assert_eq!(center.refresh().await.unwrap(), 1);
        assert_eq!(*rx.borrow_and_update(), 1);

        assert_eq!(center.mark_all_read().await.unwrap(), 0);
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), 0);
    }

    #[tokio::test]
    async fn expand_state_survives_refresh() {
        let feed = Arc::new(MockNotificationFeed::new(vec![
            notification("n1", "A", false),
            notification("n2", "B", false),
        ]));
        let center = NotificationCenter::new(feed);
        center.refresh().await.unwrap();

        assert!(center.toggle("n1"));
        center.mark_read("n1").await.unwrap();
        assert!(center.is_expanded("n1"));
        assert!(!center.is_expanded("n2"));
        assert_eq!(center.unread_count(), 1);
    }

    #[tokio::test]
    async fn api_client_is_a_feed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/notifications"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "notifications": [
                    {"_id": "n1", "title": "Bài học mới", "message": "Đã mở khóa", "isRead": false,
                     "createdAt": "2024-03-01T08:00:00Z"}
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/notifications/n1/read"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;

        let api = Arc::new(ApiClient::new(&server.uri(), Arc::new(Session::in_memory())));
        let center = NotificationCenter::new(api);
        assert_eq!(center.refresh().await.unwrap(), 1);
        center.mark_read("n1").await.unwrap();
        assert_eq!(center.items()[0].title, "Bài học mới");
    }
}
