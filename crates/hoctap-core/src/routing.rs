//! Role-gated route table, navigation guard and post-login routing.

use std::collections::HashMap;

use serde::Serialize;

use crate::model::{Role, User};
use crate::session::Viewer;

pub const LOGIN_PATH: &str = "/login";
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";
pub const RESEND_VERIFICATION_PATH: &str = "/resend-verification";
pub const ADMIN_HOME: &str = "/admin";
pub const STAFF_HOME: &str = "/staff";
pub const ONBOARDING_START: &str = "/choose-topic";
pub const LEARN_HOME: &str = "/learn";

/// Who may enter a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    Guest,
    User,
    Staff,
    Admin,
}

impl Access {
    fn permits(&self, role: Role) -> bool {
        match self {
            Access::Guest | Access::User => true,
            // Admins may enter the staff area.
            Access::Staff => matches!(role, Role::Staff | Role::Admin),
            Access::Admin => role == Role::Admin,
        }
    }
}

/// One entry of the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDef {
    pub name: &'static str,
    pub pattern: &'static str,
    pub access: Access,
}

const fn route(name: &'static str, pattern: &'static str, access: Access) -> RouteDef {
    RouteDef {
        name,
        pattern,
        access,
    }
}

pub const ROUTES: &[RouteDef] = &[
    route("landing", "/", Access::Guest),
    route("home", "/home", Access::Guest),
    route("login", "/login", Access::Guest),
    route("register", "/register", Access::Guest),
    route("forgot-password", "/forgot-password", Access::Guest),
    route("reset-password", "/reset-password/:token", Access::Guest),
    route("verify-email", "/verify-email/:token", Access::Guest),
    route("resend-verification", "/resend-verification", Access::Guest),
    route("unauthorized", "/unauthorized", Access::Guest),
    route("learn", "/learn", Access::User),
    route("lesson", "/lesson/:id", Access::User),
    route("flashcards", "/flashcards/:lessonId", Access::User),
    route("choose-topic", "/choose-topic", Access::User),
    route("choose-level", "/choose-level", Access::User),
    route("choose-skills", "/choose-skills", Access::User),
    route("profile", "/profile", Access::User),
    route("packages", "/packages", Access::User),
    route("payment-success", "/payment/success", Access::User),
    route("payment-cancel", "/payment/cancel", Access::User),
    route("staff", "/staff/*", Access::Staff),
    route("admin", "/admin/*", Access::Admin),
];

/// A path matched against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub route: RouteDef,
    pub params: HashMap<String, String>,
}

/// Match `path` (query string and trailing slash ignored) against [`ROUTES`].
pub fn resolve(path: &str) -> Option<RouteMatch> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    ROUTES.iter().find_map(|def| {
        match_pattern(def.pattern, &segments).map(|params| RouteMatch {
            route: *def,
            params,
        })
    })
}

fn match_pattern(pattern: &str, segments: &[&str]) -> Option<HashMap<String, String>> {
    let parts: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let mut params = HashMap::new();

    for (i, part) in parts.iter().enumerate() {
        if *part == "*" {
            return Some(params);
        }
        let segment = segments.get(i)?;
        if let Some(name) = part.strip_prefix(':') {
            params.insert(name.to_string(), (*segment).to_string());
        } else if part != segment {
            return None;
        }
    }

    (parts.len() == segments.len()).then_some(params)
}

/// Result of a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "to", rename_all = "lowercase")]
pub enum GuardOutcome {
    Allow,
    Redirect(String),
    NotFound,
}

/// Decide whether `viewer` may open `path`.
///
/// Unauthenticated visitors go to the login page, visitors without the role
/// go to the unauthorized page, and unverified learners are held on the
/// resend-verification page.
pub fn guard(path: &str, viewer: &Viewer) -> GuardOutcome {
    let Some(matched) = resolve(path) else {
        return GuardOutcome::NotFound;
    };
    let access = matched.route.access;

    if access == Access::Guest {
        return GuardOutcome::Allow;
    }
    if !viewer.authenticated {
        return GuardOutcome::Redirect(LOGIN_PATH.to_string());
    }
    if !access.permits(viewer.role) {
        return GuardOutcome::Redirect(UNAUTHORIZED_PATH.to_string());
    }
    if viewer.role == Role::User && !viewer.verified {
        return GuardOutcome::Redirect(RESEND_VERIFICATION_PATH.to_string());
    }
    GuardOutcome::Allow
}

/// Where a freshly signed-in user lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Destination {
    Admin,
    Staff,
    Onboarding,
    Learn,
}

impl Destination {
    pub fn path(&self) -> &'static str {
        match self {
            Destination::Admin => ADMIN_HOME,
            Destination::Staff => STAFF_HOME,
            Destination::Onboarding => ONBOARDING_START,
            Destination::Learn => LEARN_HOME,
        }
    }
}

/// Post-login routing; first match wins.
pub fn destination_after_login(user: &User) -> Destination {
    match user.role() {
        Role::Admin => Destination::Admin,
        Role::Staff => Destination::Staff,
        Role::User if !user.has_completed_onboarding() => Destination::Onboarding,
        Role::User => Destination::Learn,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn learner(verified: bool) -> Viewer {
        Viewer {
            authenticated: true,
            role: Role::User,
            verified,
        }
    }

    fn with_role(role: Role) -> Viewer {
        Viewer {
            authenticated: true,
            role,
            verified: false,
        }
    }

    #[test]
    fn resolve_params_and_wildcards() {
        let m = resolve("/lesson/abc123").unwrap();
        assert_eq!(m.route.name, "lesson");
        assert_eq!(m.params["id"], "abc123");

        assert_eq!(resolve("/staff/contents/42").unwrap().route.name, "staff");
        assert_eq!(resolve("/staff").unwrap().route.name, "staff");
        assert_eq!(resolve("/learn/").unwrap().route.name, "learn");
        assert_eq!(resolve("/learn?tab=path").unwrap().route.name, "learn");
        assert_eq!(resolve("/").unwrap().route.name, "landing");
        assert!(resolve("/lesson").is_none());
        assert!(resolve("/lesson/1/extra").is_none());
        assert!(resolve("/nope").is_none());
    }

    #[test]
    fn guest_routes_always_open() {
        assert_eq!(guard("/login", &Viewer::GUEST), GuardOutcome::Allow);
        assert_eq!(guard("/reset-password/t0k", &Viewer::GUEST), GuardOutcome::Allow);
    }

    #[test]
    fn unauthenticated_goes_to_login() {
        assert_eq!(
            guard("/learn", &Viewer::GUEST),
            GuardOutcome::Redirect(LOGIN_PATH.into())
        );
        assert_eq!(
            guard("/admin/users", &Viewer::GUEST),
            GuardOutcome::Redirect(LOGIN_PATH.into())
        );
    }

    #[test]
    fn role_gates() {
        assert_eq!(
            guard("/admin/users", &learner(true)),
            GuardOutcome::Redirect(UNAUTHORIZED_PATH.into())
        );
        assert_eq!(
            guard("/admin/users", &with_role(Role::Staff)),
            GuardOutcome::Redirect(UNAUTHORIZED_PATH.into())
        );
        assert_eq!(guard("/staff/stats", &with_role(Role::Staff)), GuardOutcome::Allow);
        assert_eq!(guard("/staff/stats", &with_role(Role::Admin)), GuardOutcome::Allow);
        assert_eq!(guard("/admin/packages", &with_role(Role::Admin)), GuardOutcome::Allow);
    }

    #[test]
    fn unverified_learner_held_on_resend_page() {
        assert_eq!(
            guard("/learn", &learner(false)),
            GuardOutcome::Redirect(RESEND_VERIFICATION_PATH.into())
        );
        assert_eq!(guard(RESEND_VERIFICATION_PATH, &learner(false)), GuardOutcome::Allow);
        assert_eq!(guard("/learn", &learner(true)), GuardOutcome::Allow);
        // Privileged accounts skip the gate.
        assert_eq!(guard("/learn", &with_role(Role::Staff)), GuardOutcome::Allow);
    }

    #[test]
    fn unknown_path_not_found() {
        assert_eq!(guard("/does-not-exist", &learner(true)), GuardOutcome::NotFound);
    }

    #[test]
    fn staff_ignores_profile_completeness() {
        let user = User {
            role: Some(Role::Staff),
            ..Default::default()
        };
        assert_eq!(destination_after_login(&user), Destination::Staff);
        assert_eq!(destination_after_login(&user).path(), "/staff");
    }

    #[test]
    fn admin_first() {
        let user = User {
            role: Some(Role::Admin),
            level: Some("advanced".into()),
            preferred_skills: vec!["reading".into()],
            ..Default::default()
        };
        assert_eq!(destination_after_login(&user), Destination::Admin);
    }

    #[test]
    fn empty_skills_go_to_topic_choice() {
        let user = User {
            role: None,
            level: Some("beginner".into()),
            preferred_skills: vec![],
            ..Default::default()
        };
        assert_eq!(destination_after_login(&user).path(), "/choose-topic");
    }

    #[test]
    fn complete_profile_goes_to_learn() {
        let user = User {
            level: Some("beginner".into()),
            preferred_skills: vec!["listening".into()],
            ..Default::default()
        };
        assert_eq!(destination_after_login(&user), Destination::Learn);
    }
}
