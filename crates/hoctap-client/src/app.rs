//! Application state: one [`Slice`] per domain plus the actions that fill them.
//!
//! Actions never return errors. A failure is logged, normalized into the
//! slice's `error`, and queued as a toast; a 401 additionally queues a
//! redirect to the login screen.

use std::sync::Arc;

use serde::Serialize;

use hoctap_core::error::{ApiError, ApiResult};
use hoctap_core::model::{
    CheckInStatus, LearningPath, Level, Notification, Package, PaymentLink, Skill, Topic, User,
};
use hoctap_core::progress::LevelUpTracker;
use hoctap_core::routing::LOGIN_PATH;
use hoctap_core::store::Slice;

use crate::http::ApiClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

/// Side effects the UI consumes after an action.
#[derive(Debug, Default)]
struct Effects {
    toasts: Vec<Toast>,
    redirect: Option<String>,
    celebrate: Option<u32>,
}

impl Effects {
    fn error(&mut self, e: &ApiError) {
        if e.is_session_expired() {
            self.redirect = Some(LOGIN_PATH.to_string());
        }
        self.toasts.push(Toast {
            kind: ToastKind::Error,
            message: e.user_message(),
        });
    }

    fn success(&mut self, message: impl Into<String>) {
        self.toasts.push(Toast {
            kind: ToastKind::Success,
            message: message.into(),
        });
    }
}

fn apply<T>(slice: &mut Slice<T>, result: ApiResult<T>, effects: &mut Effects) {
    if let Err(e) = &result {
        effects.error(e);
    }
    slice.settle(result);
}

pub struct AppState {
    api: Arc<ApiClient>,
    pub profile: Slice<User>,
    pub learning_path: Slice<LearningPath>,
    pub topics: Slice<Vec<Topic>>,
    pub levels: Slice<Vec<Level>>,
    pub skills: Slice<Vec<Skill>>,
    pub check_in: Slice<CheckInStatus>,
    pub notifications: Slice<Vec<Notification>>,
    pub packages: Slice<Vec<Package>>,
    pub admin_users: Slice<Vec<User>>,
    effects: Effects,
}

impl AppState {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            profile: Slice::default(),
            learning_path: Slice::default(),
            topics: Slice::default(),
            levels: Slice::default(),
            skills: Slice::default(),
            check_in: Slice::default(),
            notifications: Slice::default(),
            packages: Slice::default(),
            admin_users: Slice::default(),
            effects: Effects::default(),
        }
    }

    pub fn api(&self) -> &Arc<ApiClient> {
        &self.api
    }

    /// Drain queued toasts, oldest first.
    pub fn take_toasts(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.effects.toasts)
    }

    /// Where the UI should navigate, if an action demanded it.
    pub fn take_redirect(&mut self) -> Option<String> {
        self.effects.redirect.take()
    }

    /// A newly reached level that has not been celebrated yet.
    pub fn take_celebration(&mut self) -> Option<u32> {
        self.effects.celebrate.take()
    }

    fn track_level(&mut self, level: Option<u32>) {
        let Some(level) = level else { return };
        match LevelUpTracker::new(self.api.session().store()).should_celebrate(level) {
            Ok(true) => {
                tracing::info!(level, "level up");
                self.effects.celebrate = Some(level);
            }
            Ok(false) => {}
            Err(e) => tracing::warn!("failed to record level: {e:#}"),
        }
    }

    pub async fn load_profile(&mut self) {
        self.profile.begin();
        let result = self.api.me().await;
        let level = result.as_ref().ok().and_then(|u| u.user_level);
        apply(&mut self.profile, result, &mut self.effects);
        self.track_level(level);
    }

    /// Profile, learning path and check-in status, fetched concurrently.
    pub async fn load_dashboard(&mut self) {
        self.profile.begin();
        self.learning_path.begin();
        self.check_in.begin();

        let (me, path, status) = futures::join!(
            self.api.me(),
            self.api.learning_path(),
            self.api.check_in_status()
        );

        let level = me.as_ref().ok().and_then(|u| u.user_level);
        apply(&mut self.profile, me, &mut self.effects);
        apply(&mut self.learning_path, path, &mut self.effects);
        apply(&mut self.check_in, status, &mut self.effects);
        self.track_level(level);
    }

    /// Onboarding choices, fetched concurrently.
    pub async fn load_catalog(&mut self) {
        self.topics.begin();
        self.levels.begin();
        self.skills.begin();

        let (topics, levels, skills) =
            futures::join!(self.api.topics(), self.api.levels(), self.api.skills());

        apply(&mut self.topics, topics, &mut self.effects);
        apply(&mut self.levels, levels, &mut self.effects);
        apply(&mut self.skills, skills, &mut self.effects);
    }

    pub async fn load_notifications(&mut self) {
        self.notifications.begin();
        let result = self.api.notifications().await;
        apply(&mut self.notifications, result, &mut self.effects);
    }

    pub async fn load_packages(&mut self) {
        self.packages.begin();
        let result = self.api.packages().await;
        apply(&mut self.packages, result, &mut self.effects);
    }

    pub async fn load_admin_users(&mut self) {
        self.admin_users.begin();
        let result = self.api.users().await;
        apply(&mut self.admin_users, result, &mut self.effects);
    }

    /// Daily check-in. Updates the streak locally and celebrates a level-up.
    pub async fn check_in(&mut self) {
        match self.api.check_in().await {
            Ok(reward) => {
                self.effects.success(format!(
                    "Điểm danh thành công! +{} XP",
                    reward.xp_gained
                ));
                let status = self.check_in.data.get_or_insert_with(CheckInStatus::default);
                status.checked_in_today = true;
                status.streak = reward.streak;
                if let Some(user) = self.profile.data.as_mut() {
                    user.streak = reward.streak;
                    if reward.user_level.is_some() {
                        user.user_level = reward.user_level;
                    }
                    if reward.xp.is_some() {
                        user.xp = reward.xp;
                    }
                }
                self.track_level(reward.user_level);
            }
            Err(e) => {
                tracing::warn!("check-in failed: {e}");
                self.effects.error(&e);
            }
        }
    }

    /// Start a package purchase. The returned link is where the user pays.
    pub async fn buy(&mut self, package_id: &str) -> Option<PaymentLink> {
        match self.api.create_payment(package_id).await {
            Ok(link) => Some(link),
            Err(e) => {
                tracing::warn!(package_id, "payment creation failed: {e}");
                self.effects.error(&e);
                None
            }
        }
    }

    /// Log out and forget every slice.
    pub async fn logout(&mut self) {
        if let Err(e) = self.api.logout().await {
            tracing::warn!("logout failed: {e}");
        }
        self.profile.reset();
        self.learning_path.reset();
        self.topics.reset();
        self.levels.reset();
        self.skills.reset();
        self.check_in.reset();
        self.notifications.reset();
        self.packages.reset();
        self.admin_users.reset();
        self.effects.success("Đã đăng xuất");
    }
}
