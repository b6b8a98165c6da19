use std::sync::Arc;

use super::{FormState, Mount, Navigation, ScreenError};
use crate::api::models::{RegisterRequest, Role};
use crate::{quotes, AppContext};

const REGISTER_FAILED: &str = "Registration failed. Please try again.";
const REGISTERED: &str = "Account created successfully! Redirecting to login...";

const USERNAME_LENGTH: std::ops::RangeInclusive<usize> = 3..=15;
const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
}

impl RegisterForm {
    /// Client-side checks, mirroring what the backend enforces.
    fn validate(&self) -> Result<RegisterRequest, ScreenError> {
        if self.password != self.confirm_password {
            return Err(ScreenError::Validation("Passwords do not match".to_string()));
        }

        let username = self.username.trim();
        if !USERNAME_LENGTH.contains(&username.chars().count()) {
            return Err(ScreenError::Validation(format!(
                "Username must be between {} and {} characters",
                USERNAME_LENGTH.start(),
                USERNAME_LENGTH.end()
            )));
        }

        let email = self.email.trim();
        if !looks_like_email(email) {
            return Err(ScreenError::Validation(
                "Enter a valid email address".to_string(),
            ));
        }

        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ScreenError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }

        Ok(RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
            role: self.role,
        })
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}

pub struct RegisterScreen {
    ctx: Arc<AppContext>,
    form: RegisterForm,
    state: FormState,
    quote: &'static str,
    mount: Mount,
}

impl RegisterScreen {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self {
            ctx,
            form: RegisterForm::default(),
            state: FormState::Idle,
            quote: quotes::random(),
            mount: Mount::new(),
        }
    }

    pub fn form(&self) -> &RegisterForm {
        &self.form
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Quote picked when the screen was opened.
    pub fn quote(&self) -> &'static str {
        self.quote
    }

    pub fn mount_handle(&self) -> Mount {
        self.mount.clone()
    }

    /// Apply an edit to the form; any inline error is dismissed.
    pub fn edit(&mut self, edit: impl FnOnce(&mut RegisterForm)) {
        edit(&mut self.form);
        self.state.dismiss();
    }

    pub fn error_message(&self) -> Option<String> {
        self.state.error().map(|e| e.user_message(REGISTER_FAILED))
    }

    pub async fn submit(&mut self) -> Option<Navigation> {
        let request = match self.form.validate() {
            Ok(request) => request,
            Err(e) => {
                self.state = FormState::Failed(e);
                return None;
            }
        };

        self.state = FormState::Submitting;

        let ctx = Arc::clone(&self.ctx);
        let result = self
            .mount
            .guard(async move { ctx.api.register(&request).await })
            .await?;

        match result {
            Ok(message) => {
                tracing::debug!(message = ?message, "Registered");
                self.state = FormState::Succeeded(REGISTERED.to_string());
                Some(Navigation::Login)
            }
            Err(e) => {
                self.state = FormState::Failed(e.into());
                None
            }
        }
    }
}
