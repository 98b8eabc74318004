//! Session state: who is logged in, and where to send them once they are.
//!
//! Mock auth: nothing leaves the process. Demo identities come from the seed.

use crate::domain::validation::{
    validate_email, validate_password, validate_phone, validate_required,
};
use crate::domain::{DemoUser, DomainError, User, UserRole};
use tokio::sync::RwLock;
use tracing::info;

/// Id given to every account created through `login` or `signup` (single-session mock).
const LOCAL_USER_ID: &str = "1";

/// Profile edit. `None` keeps a field; an empty string clears bio, location or phone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Default)]
struct SessionState {
    user: Option<User>,
    /// One-shot return path remembered when a gated action sent the user to log in.
    redirect_after_auth: Option<String>,
}

pub struct SessionService {
    demo_users: Vec<DemoUser>,
    state: RwLock<SessionState>,
}

impl SessionService {
    pub fn new(demo_users: Vec<DemoUser>) -> Self {
        Self {
            demo_users,
            state: RwLock::new(SessionState::default()),
        }
    }

    pub fn demo_users(&self) -> &[DemoUser] {
        &self.demo_users
    }

    /// Whether `email` belongs to a seeded demo identity (which carries its own role).
    pub fn is_demo_email(&self, email: &str) -> bool {
        let email = email.trim();
        self.demo_users.iter().any(|d| d.user.email == email)
    }

    /// Log in by email. Demo emails resolve to the seeded identity (password checked);
    /// any other address gets a fresh unsubscribed account named after its local part.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        role: Option<UserRole>,
    ) -> Result<User, DomainError> {
        let email = email.trim();
        validate_email(email)?;
        validate_required(password, "password")?;

        let user = match self.demo_users.iter().find(|d| d.user.email == email) {
            Some(demo) if demo.password == password => demo.user.clone(),
            Some(_) => return Err(DomainError::Auth(format!("wrong password for {}", email))),
            None => User {
                id: LOCAL_USER_ID.to_string(),
                email: email.to_string(),
                name: email.split('@').next().unwrap_or(email).to_string(),
                role,
                has_subscription: false,
                avatar: None,
                bio: None,
                location: None,
                phone: None,
            },
        };
        self.set_user(user).await
    }

    pub async fn login_as_demo(&self, demo_id: &str) -> Result<User, DomainError> {
        let demo = self
            .demo_users
            .iter()
            .find(|d| d.user.id == demo_id)
            .ok_or_else(|| DomainError::not_found("demo user", demo_id))?;
        self.set_user(demo.user.clone()).await
    }

    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        name: &str,
        role: Option<UserRole>,
    ) -> Result<User, DomainError> {
        let email = email.trim();
        validate_email(email)?;
        validate_password(password)?;
        validate_required(name, "name")?;

        let user = User {
            id: LOCAL_USER_ID.to_string(),
            email: email.to_string(),
            name: name.trim().to_string(),
            role,
            has_subscription: false,
            avatar: None,
            bio: None,
            location: None,
            phone: None,
        };
        self.set_user(user).await
    }

    /// Clears both the user and any pending redirect.
    pub async fn logout(&self) {
        let mut state = self.state.write().await;
        if let Some(user) = state.user.take() {
            info!(user_id = %user.id, "logged out");
        }
        state.redirect_after_auth = None;
    }

    /// Returns the updated user, or `None` when nobody is logged in (no-op).
    pub async fn set_subscription(&self, has_subscription: bool) -> Option<User> {
        let mut state = self.state.write().await;
        let user = state.user.as_mut()?;
        user.has_subscription = has_subscription;
        info!(user_id = %user.id, has_subscription, "subscription changed");
        Some(user.clone())
    }

    /// Edit the logged-in user's profile. Fails with `Auth` when nobody is logged in.
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<User, DomainError> {
        if let Some(name) = &update.name {
            validate_required(name, "name")?;
        }
        if let Some(phone) = &update.phone {
            validate_phone(phone.trim())?;
        }

        let mut state = self.state.write().await;
        let user = state
            .user
            .as_mut()
            .ok_or_else(|| DomainError::Auth("log in to edit your profile".into()))?;
        if let Some(name) = update.name {
            user.name = name.trim().to_string();
        }
        for (slot, value) in [
            (&mut user.bio, update.bio),
            (&mut user.location, update.location),
            (&mut user.phone, update.phone),
        ] {
            if let Some(value) = value {
                let value = value.trim();
                *slot = (!value.is_empty()).then(|| value.to_string());
            }
        }
        info!(user_id = %user.id, "profile updated");
        Ok(user.clone())
    }

    pub async fn current_user(&self) -> Option<User> {
        self.state.read().await.user.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.user.is_some()
    }

    pub async fn set_redirect_after_auth(&self, path: Option<String>) {
        self.state.write().await.redirect_after_auth = path;
    }

    /// Returns and clears the pending redirect.
    pub async fn take_redirect_after_auth(&self) -> Option<String> {
        self.state.write().await.redirect_after_auth.take()
    }

    async fn set_user(&self, user: User) -> Result<User, DomainError> {
        let mut state = self.state.write().await;
        info!(
            user_id = %user.id,
            role = ?user.role,
            subscribed = user.has_subscription,
            "logged in"
        );
        state.user = Some(user.clone());
        Ok(user)
    }
}
