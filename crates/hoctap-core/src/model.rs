//! Core data model types for hoctap.
//!
//! These mirror the backend's JSON payloads (camelCase on the wire). Values
//! are replaced wholesale on every fetch; nothing here is persisted except
//! the tokens handled by [`crate::session`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// The question text.
    pub content: String,
    /// Answer options in presentation order.
    #[serde(default)]
    pub options: Vec<String>,
    /// Must equal one element of `options`.
    pub correct_answer: String,
    /// Optional explanation shown after answering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// An ordered bank of independent questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// Account role. Accounts without a role are regular learners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Staff,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Staff => write!(f, "staff"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "staff" => Ok(Role::Staff),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// The signed-in user's profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub is_verified: bool,
    /// Proficiency level chosen during onboarding.
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub preferred_skills: Vec<String>,
    #[serde(default)]
    pub preferred_topic: Option<String>,
    /// Gamification level, starts at 1.
    #[serde(default)]
    pub user_level: Option<u32>,
    #[serde(default)]
    pub xp: Option<f64>,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl User {
    pub fn role(&self) -> Role {
        self.role.unwrap_or_default()
    }

    /// Staff and admins skip onboarding and the verification gate.
    pub fn is_privileged(&self) -> bool {
        self.role() != Role::User
    }

    pub fn has_completed_onboarding(&self) -> bool {
        self.level.as_deref().is_some_and(|l| !l.is_empty()) && !self.preferred_skills.is_empty()
    }
}

/// Access and refresh tokens returned by every login flavour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    pub token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// What the identity provider's popup hands back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FederatedProfile {
    pub email: String,
    pub display_name: String,
    #[serde(rename = "photoURL", default)]
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Front/back study card attached to a lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub flashcards: Vec<Flashcard>,
}

/// Unlock status of one path entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathStatus {
    Locked,
    Active,
    Completed,
}

impl fmt::Display for PathStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStatus::Locked => write!(f, "locked"),
            PathStatus::Active => write!(f, "active"),
            PathStatus::Completed => write!(f, "completed"),
        }
    }
}

/// One entry of a learning path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathItem {
    pub lesson_id: String,
    pub title: String,
    pub status: PathStatus,
    #[serde(default)]
    pub order: u32,
}

/// Server-ordered sequence of lesson assignments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPath {
    #[serde(default)]
    pub items: Vec<PathItem>,
}

impl LearningPath {
    /// The lesson the learner should open next.
    pub fn next_lesson(&self) -> Option<&PathItem> {
        self.items.iter().find(|i| i.status == PathStatus::Active)
    }

    pub fn completed_count(&self) -> usize {
        self.items
            .iter()
            .filter(|i| i.status == PathStatus::Completed)
            .count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInStatus {
    #[serde(default)]
    pub checked_in_today: bool,
    /// Consecutive days checked in.
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub last_check_in: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInReward {
    #[serde(default)]
    pub xp_gained: f64,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub user_level: Option<u32>,
    #[serde(default)]
    pub xp: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A purchasable premium package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    /// Price in VND.
    pub price: u64,
    pub duration_days: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Payment gateway checkout link for a package purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLink {
    pub checkout_url: String,
    pub order_code: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentState {
    Pending,
    Paid,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatus {
    pub order_code: u64,
    pub status: PaymentState,
}

/// Which body of theory a content item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentKind {
    MarxistEconomics,
    Philosophy,
}

impl ContentKind {
    /// Path segment under `/staff/` on the backend.
    pub fn path_segment(&self) -> &'static str {
        match self {
            ContentKind::MarxistEconomics => "marxist-economics",
            ContentKind::Philosophy => "philosophy",
        }
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "marxist-economics" | "economics" | "marxist" => Ok(ContentKind::MarxistEconomics),
            "philosophy" => Ok(ContentKind::Philosophy),
            other => Err(format!("unknown content kind: {other}")),
        }
    }
}

/// Staff-managed study content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    #[serde(alias = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub level: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffStats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub total_lessons: u64,
    #[serde(default)]
    pub completed_lessons: u64,
    #[serde(default)]
    pub active_subscriptions: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_display_and_parse() {
        assert_eq!(Role::Staff.to_string(), "staff");
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn user_without_role_is_learner() {
        let user: User = serde_json::from_value(serde_json::json!({
            "_id": "u1",
            "email": "a@b.vn",
            "preferredSkills": []
        }))
        .unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.role(), Role::User);
        assert!(!user.is_privileged());
        assert!(!user.has_completed_onboarding());
    }

    #[test]
    fn onboarding_needs_level_and_skills() {
        let mut user = User {
            level: Some("beginner".into()),
            ..Default::default()
        };
        assert!(!user.has_completed_onboarding());
        user.preferred_skills.push("reading".into());
        assert!(user.has_completed_onboarding());
        user.level = Some(String::new());
        assert!(!user.has_completed_onboarding());
    }

    #[test]
    fn federated_profile_wire_names() {
        let profile = FederatedProfile {
            email: "a@b.vn".into(),
            display_name: "An".into(),
            photo_url: Some("https://img".into()),
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["displayName"], "An");
        assert_eq!(json["photoURL"], "https://img");
    }

    #[test]
    fn learning_path_next_lesson() {
        let path = LearningPath {
            items: vec![
                PathItem {
                    lesson_id: "l1".into(),
                    title: "Hàng hóa".into(),
                    status: PathStatus::Completed,
                    order: 1,
                },
                PathItem {
                    lesson_id: "l2".into(),
                    title: "Tiền tệ".into(),
                    status: PathStatus::Active,
                    order: 2,
                },
                PathItem {
                    lesson_id: "l3".into(),
                    title: "Giá trị thặng dư".into(),
                    status: PathStatus::Locked,
                    order: 3,
                },
            ],
        };
        assert_eq!(path.next_lesson().unwrap().lesson_id, "l2");
        assert_eq!(path.completed_count(), 1);
    }

    #[test]
    fn question_wire_names() {
        let q: Question = serde_json::from_value(serde_json::json!({
            "content": "2 + 2?",
            "options": ["3", "4"],
            "correctAnswer": "4"
        }))
        .unwrap();
        assert_eq!(q.correct_answer, "4");
        assert!(q.explanation.is_none());
    }
}
