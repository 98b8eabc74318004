//! Who may mutate what. Pure decisions; the UI adapter acts on them.

use crate::domain::{CastingId, User, UserRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Create, edit or delete castings.
    ManageCastings,
    /// Submit an application to one of the casting's roles.
    Apply { casting_id: CastingId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allowed,
    /// Log in first; `return_to` is where to resume afterwards.
    RedirectToLogin { return_to: Option<String> },
    /// Talent without an active subscription.
    RedirectToSubscription { return_to: Option<String> },
    Denied { reason: &'static str },
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allowed)
    }
}

/// Path of the casting detail screen, used as the post-login return target.
pub fn casting_path(casting_id: CastingId) -> String {
    format!("/castings/{}", casting_id)
}

/// Parse a path produced by [`casting_path`].
pub fn parse_casting_path(path: &str) -> Option<CastingId> {
    path.strip_prefix("/castings/")?.parse().ok()
}

pub fn decide(user: Option<&User>, action: Action) -> AccessDecision {
    let Some(user) = user else {
        let return_to = match action {
            Action::ManageCastings => None,
            Action::Apply { casting_id } => Some(casting_path(casting_id)),
        };
        return AccessDecision::RedirectToLogin { return_to };
    };

    match (action, user.role) {
        (Action::ManageCastings, Some(UserRole::Producer | UserRole::Admin)) => {
            AccessDecision::Allowed
        }
        (Action::ManageCastings, _) => AccessDecision::Denied {
            reason: "only producers manage castings",
        },
        (Action::Apply { .. }, Some(UserRole::Talent)) if user.has_subscription => {
            AccessDecision::Allowed
        }
        (Action::Apply { casting_id }, Some(UserRole::Talent)) => {
            AccessDecision::RedirectToSubscription {
                return_to: Some(casting_path(casting_id)),
            }
        }
        (Action::Apply { .. }, _) => AccessDecision::Denied {
            reason: "only talents apply to castings",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Option<UserRole>, has_subscription: bool) -> User {
        User {
            id: "u".to_string(),
            email: "u@demo.tn".to_string(),
            name: "U".to_string(),
            role,
            has_subscription,
            avatar: None,
            bio: None,
            location: None,
            phone: None,
        }
    }

    const APPLY: Action = Action::Apply { casting_id: 3 };

    #[test]
    fn test_anonymous() {
        assert_eq!(
            decide(None, Action::ManageCastings),
            AccessDecision::RedirectToLogin { return_to: None }
        );
        assert_eq!(
            decide(None, APPLY),
            AccessDecision::RedirectToLogin {
                return_to: Some("/castings/3".to_string())
            }
        );
    }

    #[test]
    fn test_talent_unsubscribed() {
        let u = user(Some(UserRole::Talent), false);
        assert!(matches!(
            decide(Some(&u), Action::ManageCastings),
            AccessDecision::Denied { .. }
        ));
        assert_eq!(
            decide(Some(&u), APPLY),
            AccessDecision::RedirectToSubscription {
                return_to: Some("/castings/3".to_string())
            }
        );
    }

    #[test]
    fn test_talent_subscribed() {
        let u = user(Some(UserRole::Talent), true);
        assert!(!decide(Some(&u), Action::ManageCastings).is_allowed());
        assert!(decide(Some(&u), APPLY).is_allowed());
    }

    #[test]
    fn test_producer_and_admin() {
        for role in [UserRole::Producer, UserRole::Admin] {
            let u = user(Some(role), true);
            assert!(decide(Some(&u), Action::ManageCastings).is_allowed());
            assert!(matches!(
                decide(Some(&u), APPLY),
                AccessDecision::Denied { .. }
            ));
        }
    }

    #[test]
    fn test_roleless_account_is_denied_everything() {
        let u = user(None, true);
        assert!(!decide(Some(&u), Action::ManageCastings).is_allowed());
        assert!(!decide(Some(&u), APPLY).is_allowed());
    }

    #[test]
    fn test_casting_paths() {
        assert!(!decide(None, APPLY).is_allowed());
        assert_eq!(parse_casting_path(&casting_path(12)), Some(12));
        assert_eq!(parse_casting_path("/profile"), None);
    }
}
