//! Implements InputPort. Inquire-driven screens routed in a loop.
//!
//! Gated screens ask `access::decide` first; a redirect to login or to the
//! subscription screen remembers the casting so the user lands back on it.

use crate::adapters::ui::forms::{self, WizardOutcome, cancelled};
use crate::adapters::ui::{progress, render};
use crate::domain::validation::{password_strength, validate_password};
use crate::domain::{CastingFilter, CastingId, CastingStatus, DomainError, UserRole};
use crate::ports::{ExportPort, InputPort};
use crate::usecases::access::{AccessDecision, Action, decide, parse_casting_path};
use crate::usecases::{CastingService, SessionService};
use async_trait::async_trait;
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::validator::Validation;
use inquire::{Confirm, Password, Select, Text};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const CATEGORIES: &[&str] = &["all", "tv", "film", "theater", "commercial"];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Screen {
    Home,
    Browse,
    Casting(CastingId),
    Apply {
        casting_id: CastingId,
        role_id: String,
    },
    Login,
    Signup,
    Subscription,
    MyApplications,
    Profile,
    Dashboard,
    ManageCasting(CastingId),
    CreateCasting,
    Quit,
}

/// Red prompt prefix and highlighted option for every inquire prompt.
pub fn apply_theme() {
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("›").with_fg(Color::LightRed))
        .with_highlighted_option_prefix(Styled::new("➜").with_fg(Color::LightRed))
        .with_answered_prompt_prefix(Styled::new("✔").with_fg(Color::LightGreen));
    inquire::set_global_render_config(config);
}

/// TUI adapter. Owns no state; everything lives in the services.
pub struct TuiInputPort {
    castings: Arc<CastingService>,
    session: Arc<SessionService>,
    exporter: Arc<dyn ExportPort>,
    submit_delay: Duration,
}

impl TuiInputPort {
    pub fn new(
        castings: Arc<CastingService>,
        session: Arc<SessionService>,
        exporter: Arc<dyn ExportPort>,
        submit_delay: Duration,
    ) -> Self {
        Self {
            castings,
            session,
            exporter,
            submit_delay,
        }
    }

    async fn show(&self, screen: Screen) -> Result<Screen, DomainError> {
        debug!(?screen, "route");
        match screen {
            Screen::Home => self.home().await,
            Screen::Browse => self.browse().await,
            Screen::Casting(id) => self.casting_detail(id).await,
            Screen::Apply {
                casting_id,
                role_id,
            } => self.apply(casting_id, &role_id).await,
            Screen::Login => self.login().await,
            Screen::Signup => self.signup().await,
            Screen::Subscription => self.subscription().await,
            Screen::MyApplications => self.my_applications().await,
            Screen::Profile => self.profile().await,
            Screen::Dashboard => self.dashboard().await,
            Screen::ManageCasting(id) => self.manage_casting(id).await,
            Screen::CreateCasting => self.create_casting().await,
            Screen::Quit => Ok(Screen::Quit),
        }
    }

    async fn home(&self) -> Result<Screen, DomainError> {
        let user = self.session.current_user().await;
        let mut options = vec!["Browse castings"];
        match &user {
            Some(u) => {
                render::print_user(u);
                if decide(Some(u), Action::ManageCastings).is_allowed() {
                    options.push("Producer dashboard");
                }
                if u.role == Some(UserRole::Talent) {
                    options.push("My applications");
                    options.push("Subscription");
                }
                options.push("Profile");
                options.push("Log out");
            }
            None => {
                options.push("Log in");
                options.push("Sign up");
            }
        }
        options.push("Quit");

        let Some(choice) = cancelled(Select::new("What next?", options).prompt())? else {
            return Ok(Screen::Quit);
        };
        Ok(match choice {
            "Browse castings" => Screen::Browse,
            "Producer dashboard" => Screen::Dashboard,
            "My applications" => Screen::MyApplications,
            "Subscription" => Screen::Subscription,
            "Profile" => Screen::Profile,
            "Log in" => Screen::Login,
            "Sign up" => Screen::Signup,
            "Log out" => {
                self.session.logout().await;
                render::notice("Logged out.");
                Screen::Home
            }
            _ => Screen::Quit,
        })
    }

    async fn browse(&self) -> Result<Screen, DomainError> {
        let Some(term) = cancelled(
            Text::new("Search:")
                .with_help_message("title, production or location; empty for all")
                .prompt(),
        )?
        else {
            return Ok(Screen::Home);
        };
        let Some(category) = cancelled(Select::new("Category:", CATEGORIES.to_vec()).prompt())?
        else {
            return Ok(Screen::Home);
        };

        let mut filter = CastingFilter::search(term.trim());
        if category != "all" {
            filter = filter.with_category(category);
        }
        let found = self.castings.search(&filter).await?;
        if found.is_empty() {
            render::notice("No castings match.");
            return Ok(Screen::Browse);
        }

        let mut labels: Vec<String> = found.iter().map(render::casting_line).collect();
        labels.push("Back".to_string());
        let title = format!("{} castings", found.len());
        let Some(picked) = cancelled(Select::new(&title, labels).raw_prompt())? else {
            return Ok(Screen::Home);
        };
        Ok(match found.get(picked.index) {
            Some(casting) => Screen::Casting(casting.id),
            None => Screen::Home,
        })
    }

    async fn casting_detail(&self, id: CastingId) -> Result<Screen, DomainError> {
        let casting = self.castings.view_casting(id).await?;
        render::print_casting(&casting);

        if casting.status != CastingStatus::Active || casting.roles.is_empty() {
            let _ = cancelled(Confirm::new("Back to browsing?").with_default(true).prompt())?;
            return Ok(Screen::Browse);
        }

        let mut labels: Vec<String> = casting
            .roles
            .iter()
            .map(|r| format!("Apply as {}", r.name))
            .collect();
        labels.push("Back".to_string());
        let Some(picked) = cancelled(Select::new("Roles:", labels).raw_prompt())? else {
            return Ok(Screen::Browse);
        };
        Ok(match casting.roles.get(picked.index) {
            Some(role) => Screen::Apply {
                casting_id: id,
                role_id: role.id.clone(),
            },
            None => Screen::Browse,
        })
    }

    async fn apply(&self, casting_id: CastingId, role_id: &str) -> Result<Screen, DomainError> {
        let user = self.session.current_user().await;
        match decide(user.as_ref(), Action::Apply { casting_id }) {
            AccessDecision::Allowed => {}
            AccessDecision::RedirectToLogin { return_to } => {
                render::notice("Log in to apply.");
                self.session.set_redirect_after_auth(return_to).await;
                return Ok(Screen::Login);
            }
            AccessDecision::RedirectToSubscription { return_to } => {
                render::notice("Applying requires a subscription.");
                self.session.set_redirect_after_auth(return_to).await;
                return Ok(Screen::Subscription);
            }
            AccessDecision::Denied { reason } => {
                render::print_error(&DomainError::AccessDenied(reason.to_string()));
                return Ok(Screen::Casting(casting_id));
            }
        }
        let Some(user) = user else {
            return Ok(Screen::Login);
        };

        let casting = self.castings.get_casting(casting_id).await?;
        let role = casting
            .role(role_id)
            .ok_or_else(|| DomainError::not_found("role", role_id))?;
        let Some(application) = forms::application_form(&casting, role, &user)? else {
            return Ok(Screen::Casting(casting_id));
        };

        let pb = progress::spinner("Sending application...");
        tokio::time::sleep(self.submit_delay).await;
        match self.castings.submit_application(application).await {
            Ok(app) => {
                pb.finish_with_message(format!("Application {} sent", app.id));
                Ok(Screen::Browse)
            }
            Err(e) => {
                pb.finish_and_clear();
                Err(e)
            }
        }
    }

    async fn login(&self) -> Result<Screen, DomainError> {
        let Some(method) = cancelled(
            Select::new("Log in with", vec!["Demo account", "Email and password"]).prompt(),
        )?
        else {
            return Ok(Screen::Home);
        };

        let user = if method == "Demo account" {
            let demos = self.session.demo_users();
            let labels: Vec<String> = demos
                .iter()
                .map(|d| format!("{}: {}", d.label, d.description))
                .collect();
            let Some(picked) = cancelled(Select::new("Account:", labels).raw_prompt())? else {
                return Ok(Screen::Home);
            };
            let Some(demo) = demos.get(picked.index) else {
                return Ok(Screen::Home);
            };
            let id = demo.user.id.clone();
            self.session.login_as_demo(&id).await?
        } else {
            let Some(email) = cancelled(Text::new("Email:").prompt())? else {
                return Ok(Screen::Home);
            };
            let Some(password) =
                cancelled(Password::new("Password:").without_confirmation().prompt())?
            else {
                return Ok(Screen::Home);
            };
            let role = if self.session.is_demo_email(&email) {
                None
            } else {
                match forms::pick_role("Log in as")? {
                    Some(role) => Some(role),
                    None => return Ok(Screen::Home),
                }
            };
            self.session.login(&email, &password, role).await?
        };

        render::print_user(&user);
        Ok(self.after_auth().await)
    }

    async fn signup(&self) -> Result<Screen, DomainError> {
        let Some(name) = cancelled(Text::new("Full name:").prompt())? else {
            return Ok(Screen::Home);
        };
        let Some(email) = cancelled(Text::new("Email:").prompt())? else {
            return Ok(Screen::Home);
        };
        let Some(password) = cancelled(
            Password::new("Password:")
                .with_help_message("8+ characters with upper case, lower case and a digit")
                .with_validator(|input: &str| match validate_password(input) {
                    Ok(()) => Ok(Validation::Valid),
                    Err(e) => Ok(Validation::Invalid(e.to_string().into())),
                })
                .prompt(),
        )?
        else {
            return Ok(Screen::Home);
        };
        render::print_strength(password_strength(&password));

        let Some(role) = forms::pick_role("I am")? else {
            return Ok(Screen::Home);
        };

        let user = self
            .session
            .signup(&email, &password, &name, Some(role))
            .await?;
        render::print_user(&user);
        Ok(self.after_auth().await)
    }

    async fn subscription(&self) -> Result<Screen, DomainError> {
        let Some(user) = self.session.current_user().await else {
            return Ok(Screen::Login);
        };
        if user.has_subscription {
            let cancel = cancelled(
                Confirm::new("Your subscription is active. Cancel it?")
                    .with_default(false)
                    .prompt(),
            )?;
            if cancel == Some(true) {
                self.session.set_subscription(false).await;
                render::notice("Subscription cancelled.");
            }
            return Ok(Screen::Home);
        }

        println!("Talent plan: apply to every open casting, no limits.");
        let activate = cancelled(
            Confirm::new("Activate the subscription?")
                .with_default(true)
                .prompt(),
        )?;
        if activate != Some(true) {
            self.session.set_redirect_after_auth(None).await;
            return Ok(Screen::Home);
        }
        self.session.set_subscription(true).await;
        render::notice("Subscription active.");
        Ok(self.after_auth().await)
    }

    async fn my_applications(&self) -> Result<Screen, DomainError> {
        let Some(user) = self.session.current_user().await else {
            return Ok(Screen::Login);
        };
        let applications = self.castings.applications_by_applicant(&user.email).await?;
        let castings = self.castings.list_castings().await?;
        render::print_my_applications(&applications, &castings);
        let _ = cancelled(Confirm::new("Back home?").with_default(true).prompt())?;
        Ok(Screen::Home)
    }

    async fn profile(&self) -> Result<Screen, DomainError> {
        let Some(user) = self.session.current_user().await else {
            return Ok(Screen::Login);
        };
        render::print_profile(&user);
        let edit = cancelled(Confirm::new("Edit your profile?").with_default(false).prompt())?;
        if edit != Some(true) {
            return Ok(Screen::Home);
        }
        let Some(update) = forms::profile_form(&user)? else {
            return Ok(Screen::Home);
        };
        let user = self.session.update_profile(update).await?;
        render::notice("Profile saved.");
        render::print_profile(&user);
        Ok(Screen::Home)
    }

    /// Resume where the gated action left off, if anywhere.
    async fn after_auth(&self) -> Screen {
        match self.session.take_redirect_after_auth().await {
            Some(path) => match parse_casting_path(&path) {
                Some(id) => Screen::Casting(id),
                None => {
                    warn!(%path, "unknown redirect target");
                    Screen::Home
                }
            },
            None => Screen::Home,
        }
    }

    /// `None` when the current user may manage castings, otherwise where to go instead.
    async fn producer_gate(&self) -> Option<Screen> {
        let user = self.session.current_user().await;
        match decide(user.as_ref(), Action::ManageCastings) {
            AccessDecision::Allowed => None,
            AccessDecision::RedirectToLogin { return_to } => {
                self.session.set_redirect_after_auth(return_to).await;
                Some(Screen::Login)
            }
            AccessDecision::RedirectToSubscription { .. } => Some(Screen::Subscription),
            AccessDecision::Denied { reason } => {
                render::print_error(&DomainError::AccessDenied(reason.to_string()));
                Some(Screen::Home)
            }
        }
    }

    async fn dashboard(&self) -> Result<Screen, DomainError> {
        if let Some(redirect) = self.producer_gate().await {
            return Ok(redirect);
        }
        render::print_stats(&self.castings.dashboard_stats().await?);

        let castings = self.castings.list_castings().await?;
        let mut labels = vec![
            "Create casting".to_string(),
            "Export all castings (JSON)".to_string(),
        ];
        labels.extend(
            castings
                .iter()
                .map(|c| format!("{} [{}]", render::casting_line(c), c.status)),
        );
        labels.push("Back".to_string());

        let Some(picked) = cancelled(Select::new("Dashboard:", labels).raw_prompt())? else {
            return Ok(Screen::Home);
        };
        match picked.index {
            0 => Ok(Screen::CreateCasting),
            1 => {
                let path = self.exporter.export_castings("castings", &castings).await?;
                render::notice(&format!("Exported to {}", path.display()));
                Ok(Screen::Dashboard)
            }
            i => Ok(match castings.get(i - 2) {
                Some(c) => Screen::ManageCasting(c.id),
                None => Screen::Home,
            }),
        }
    }

    async fn manage_casting(&self, id: CastingId) -> Result<Screen, DomainError> {
        if let Some(redirect) = self.producer_gate().await {
            return Ok(redirect);
        }
        let casting = self.castings.get_casting(id).await?;
        render::print_casting(&casting);

        let toggle = if casting.status == CastingStatus::Active {
            "Close casting"
        } else {
            "Publish casting"
        };
        let options = vec![
            "Review applications",
            "Export applications (CSV)",
            "Edit",
            toggle,
            "Delete",
            "Back",
        ];
        let Some(choice) = cancelled(Select::new("Manage:", options).prompt())? else {
            return Ok(Screen::Dashboard);
        };

        match choice {
            "Review applications" => {
                let reviews = self.castings.review_by_role(id).await?;
                render::print_review(&reviews);
            }
            "Export applications (CSV)" => {
                let apps = self.castings.applications_for_casting(id).await?;
                let name = format!("casting-{}-applications", id);
                let path = self.exporter.export_applications(&name, &apps).await?;
                render::notice(&format!(
                    "{} applications exported to {}",
                    apps.len(),
                    path.display()
                ));
            }
            "Edit" => match forms::edit_form(&casting)? {
                Some(patch) if !patch.is_empty() => {
                    self.castings.update_casting(id, patch).await?;
                    render::notice("Casting updated.");
                }
                Some(_) => render::notice("Nothing changed."),
                None => {}
            },
            "Close casting" => {
                self.castings.close_casting(id).await?;
                render::notice("Casting closed.");
            }
            "Publish casting" => {
                self.castings.publish_draft(id).await?;
                render::notice("Casting published.");
            }
            "Delete" => {
                let question = format!("Delete \"{}\"?", casting.title);
                let sure = cancelled(Confirm::new(&question).with_default(false).prompt())?;
                if sure == Some(true) {
                    self.castings.delete_casting(id).await?;
                    render::notice("Casting deleted.");
                    return Ok(Screen::Dashboard);
                }
            }
            _ => return Ok(Screen::Dashboard),
        }
        Ok(Screen::ManageCasting(id))
    }

    async fn create_casting(&self) -> Result<Screen, DomainError> {
        if let Some(redirect) = self.producer_gate().await {
            return Ok(redirect);
        }
        let Some((casting, outcome)) = forms::casting_wizard()? else {
            return Ok(Screen::Dashboard);
        };
        let stored = match outcome {
            WizardOutcome::Publish => self.castings.publish_casting(casting).await?,
            WizardOutcome::SaveDraft => self.castings.save_draft(casting).await?,
        };
        render::notice(&format!("Casting #{} saved ({}).", stored.id, stored.status));
        Ok(Screen::ManageCasting(stored.id))
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        let mut screen = Screen::Home;
        loop {
            screen = match self.show(screen).await {
                Ok(Screen::Quit) => return Ok(()),
                Ok(next) => next,
                // Terminal failures cannot be recovered by re-prompting.
                Err(e @ DomainError::Ui(_)) => return Err(e),
                Err(e) => {
                    warn!(error = %e, "screen failed");
                    render::print_error(&e);
                    Screen::Home
                }
            };
        }
    }
}
