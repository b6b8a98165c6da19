//! Screen state machines.
//!
//! A screen is constructed with the shared [`AppContext`](crate::AppContext),
//! loads once on mount and ends in one of the [`ScreenState`] variants. Form
//! screens track a [`FormState`] instead. Neither retries nor refreshes.

mod dashboard;
mod home;
mod login;
mod material;
mod mount;
mod profile;
mod register;
mod subject;
mod upload;

pub use dashboard::{DashboardScreen, SubjectSummary};
pub use home::HomeScreen;
pub use login::LoginScreen;
pub use material::MaterialScreen;
pub use mount::{LoadOutcome, Mount};
pub use profile::{Profile, ProfileScreen};
pub use register::RegisterScreen;
pub use subject::SubjectScreen;
pub use upload::UploadScreen;

use thiserror::Error;

use crate::api::ApiError;
use crate::session::{Session, SessionError};

/// Shown whenever a request never reached the backend
pub const NETWORK_MESSAGE: &str = "Cannot connect to the server. Is it running?";

// ============================================================================
// Errors
// ============================================================================

/// Everything that can go wrong on a screen. Rendered inline, never retried.
#[derive(Debug, Error)]
pub enum ScreenError {
    /// Rejected on the client before any request was sent
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Api(#[from] ApiError),
    /// A successful response did not contain the requested resource
    #[error("{0}")]
    NotFound(String),
    #[error("You need to sign in to view this page")]
    MissingAuth,
    /// A local file could not be read or written
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ScreenError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        ScreenError::Io {
            context: context.into(),
            source,
        }
    }

    /// Message to show the user. `fallback` stands in for HTTP errors the
    /// server did not explain.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ScreenError::Api(ApiError::Network(_)) => NETWORK_MESSAGE.to_string(),
            ScreenError::Api(ApiError::Http {
                message: Some(message),
                ..
            }) => message.clone(),
            ScreenError::Api(ApiError::Http { .. }) => fallback.to_string(),
            ScreenError::Api(ApiError::Decode(_)) => {
                "The server sent a response this client does not understand.".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Whether the screen should send the user to the login page.
    pub fn requires_login(&self) -> bool {
        match self {
            ScreenError::MissingAuth => true,
            ScreenError::Api(e) => e.status() == Some(reqwest::StatusCode::UNAUTHORIZED),
            _ => false,
        }
    }
}

/// Read the session token or fail with [`ScreenError::MissingAuth`].
pub(crate) fn require_token(session: &Session) -> Result<String, ScreenError> {
    session.token()?.ok_or(ScreenError::MissingAuth)
}

// ============================================================================
// States
// ============================================================================

/// Lifecycle of a data-bearing screen: `Loading` until the one fetch resolves.
#[derive(Debug)]
pub enum ScreenState<T> {
    Loading,
    Error(ScreenError),
    Empty,
    Populated(T),
}

impl<T> Default for ScreenState<T> {
    fn default() -> Self {
        ScreenState::Loading
    }
}

impl<T> ScreenState<T> {
    /// Settle a finished load. `is_empty` decides between `Empty` and `Populated`.
    pub fn settle(result: Result<T, ScreenError>, is_empty: impl FnOnce(&T) -> bool) -> Self {
        match result {
            Ok(value) if is_empty(&value) => ScreenState::Empty,
            Ok(value) => ScreenState::Populated(value),
            Err(e) => ScreenState::Error(e),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ScreenState::Loading)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ScreenState::Empty)
    }

    pub fn error(&self) -> Option<&ScreenError> {
        match self {
            ScreenState::Error(e) => Some(e),
            _ => None,
        }
    }

    pub fn populated(&self) -> Option<&T> {
        match self {
            ScreenState::Populated(value) => Some(value),
            _ => None,
        }
    }
}

/// Lifecycle of a form submission.
#[derive(Debug, Default)]
pub enum FormState {
    #[default]
    Idle,
    Submitting,
    Failed(ScreenError),
    Succeeded(String),
}

impl FormState {
    pub fn error(&self) -> Option<&ScreenError> {
        match self {
            FormState::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Editing a field clears a previous failure.
    pub(crate) fn dismiss(&mut self) {
        if matches!(self, FormState::Failed(_)) {
            *self = FormState::Idle;
        }
    }
}

// ============================================================================
// Navigation
// ============================================================================

/// Where a screen asks to go next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Home,
    Login,
    Register,
    Dashboard,
    Subject(String),
    Material { subject_id: String, material_id: i64 },
    Upload,
    Profile,
}

impl std::fmt::Display for Navigation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Navigation::Home => write!(f, "/"),
            Navigation::Login => write!(f, "/login"),
            Navigation::Register => write!(f, "/register"),
            Navigation::Dashboard => write!(f, "/dashboard"),
            Navigation::Subject(id) => write!(f, "/dashboard/{id}"),
            Navigation::Material {
                subject_id,
                material_id,
            } => write!(f, "/dashboard/{subject_id}/{material_id}"),
            Navigation::Upload => write!(f, "/dashboard/upload"),
            Navigation::Profile => write!(f, "/dashboard/profile"),
        }
    }
}
