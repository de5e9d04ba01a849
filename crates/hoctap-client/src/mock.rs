//! In-memory notification feed for tests and offline demos.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use hoctap_core::error::{ApiError, ApiResult};
use hoctap_core::model::Notification;
use hoctap_core::traits::NotificationFeed;

/// A [`NotificationFeed`] that serves a fixed list and applies read marks to
/// it the way the backend would.
pub struct MockNotificationFeed {
    items: Mutex<Vec<Notification>>,
    /// When set, every mark call fails with a network error.
    fail_marks: bool,
    fetch_count: AtomicU32,
    mark_count: AtomicU32,
}

impl MockNotificationFeed {
    pub fn new(items: Vec<Notification>) -> Self {
        Self {
            items: Mutex::new(items),
            fail_marks: false,
            fetch_count: AtomicU32::new(0),
            mark_count: AtomicU32::new(0),
        }
    }

    /// A feed whose mark-read calls always fail.
    pub fn failing_marks(items: Vec<Notification>) -> Self {
        Self {
            fail_marks: true,
            ..Self::new(items)
        }
    }

    /// Simulate a new notification arriving server-side.
    pub fn push(&self, notification: Notification) {
        self.items
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .insert(0, notification);
    }

    pub fn fetch_count(&self) -> u32 {
        self.fetch_count.load(Ordering::Relaxed)
    }

    pub fn mark_count(&self) -> u32 {
        self.mark_count.load(Ordering::Relaxed)
    }
}

/// Build a notification for tests.
pub fn notification(id: &str, title: &str, is_read: bool) -> Notification {
    Notification {
        id: id.to_string(),
        title: title.to_string(),
        message: format!("{title} - chi tiết"),
        is_read,
        created_at: None,
    }
}

#[async_trait]
impl NotificationFeed for MockNotificationFeed {
    async fn fetch(&self) -> ApiResult<Vec<Notification>> {
        self.fetch_count.fetch_add(1, Ordering::Relaxed);
        Ok(self
            .items
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone())
    }

    async fn mark_read(&self, id: &str) -> ApiResult<()> {
        self.mark_count.fetch_add(1, Ordering::Relaxed);
        if self.fail_marks {
            return Err(ApiError::Network("mock failure".into()));
        }
        let mut items = self.items.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(n) = items.iter_mut().find(|n| n.id == id) {
            n.is_read = true;
        }
        Ok(())
    }

    async fn mark_all_read(&self) -> ApiResult<()> {
        self.mark_count.fetch_add(1, Ordering::Relaxed);
        if self.fail_marks {
            return Err(ApiError::Network("mock failure".into()));
        }
        for n in self
            .items
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .iter_mut()
        {
            n.is_read = true;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn marks_apply_to_served_list() {
        let feed = MockNotificationFeed::new(vec![
            notification("n1", "Bài học mới", false),
            notification("n2", "Khuyến mãi", false),
        ]);
        feed.mark_read("n1").await.unwrap();
        let items = feed.fetch().await.unwrap();
        assert!(items[0].is_read);
        assert!(!items[1].is_read);

        feed.mark_all_read().await.unwrap();
        assert!(feed.fetch().await.unwrap().iter().all(|n| n.is_read));
        assert_eq!(feed.fetch_count(), 2);
        assert_eq!(feed.mark_count(), 2);
    }

    #[tokio::test]
    async fn failing_marks_leave_list_untouched() {
        let feed = MockNotificationFeed::failing_marks(vec![notification("n1", "A", false)]);
        assert!(feed.mark_read("n1").await.is_err());
        assert!(!feed.fetch().await.unwrap()[0].is_read);
    }
}
