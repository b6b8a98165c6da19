use std::sync::Arc;

use super::{FormState, Mount, Navigation, ScreenError};
use crate::{quotes, AppContext};

const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

pub struct LoginScreen {
    ctx: Arc<AppContext>,
    form: LoginForm,
    state: FormState,
    quote: &'static str,
    mount: Mount,
}

impl LoginScreen {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self {
            ctx,
            form: LoginForm::default(),
            state: FormState::Idle,
            quote: quotes::random(),
            mount: Mount::new(),
        }
    }

    pub fn form(&self) -> &LoginForm {
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

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.form.username = username.into();
        self.state.dismiss();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.form.password = password.into();
        self.state.dismiss();
    }

    /// Inline error text, if the last submission failed.
    pub fn error_message(&self) -> Option<String> {
        self.state.error().map(|e| e.user_message(LOGIN_FAILED))
    }

    /// Submit the form. On success the token is stored and the screen asks to
    /// go to the dashboard; on failure it stays put with an inline error.
    pub async fn submit(&mut self) -> Option<Navigation> {
        let username = self.form.username.trim().to_string();
        if username.is_empty() || self.form.password.is_empty() {
            self.state = FormState::Failed(ScreenError::Validation(
                "Username and password are required".to_string(),
            ));
            return None;
        }

        self.state = FormState::Submitting;

        let ctx = Arc::clone(&self.ctx);
        let password = self.form.password.clone();
        let result = self
            .mount
            .guard(async move { ctx.api.login(&username, &password).await })
            .await?;

        let outcome = match result {
            Ok(token) => self.ctx.session.sign_in(&token).map_err(ScreenError::from),
            Err(e) => Err(ScreenError::from(e)),
        };

        match outcome {
            Ok(()) => {
                self.state = FormState::Succeeded("Signed in".to_string());
                Some(Navigation::Dashboard)
            }
            Err(e) => {
                tracing::debug!(error = %e, "Login failed");
                self.state = FormState::Failed(e);
                None
            }
        }
    }
}
