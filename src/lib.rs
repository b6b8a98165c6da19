//! classroom-buddy - Client for the Classroom Buddy academic material-sharing backend
//!
//! This crate provides the client side of the platform:
//! - Typed request layer over the backend's JSON envelopes (reqwest)
//! - Session token persisted in an embedded redb file
//! - Display derivation for material records (names, dates, download links)
//! - Screen state machines for login, registration, dashboard, materials and profile

pub mod api;
pub mod config;
pub mod display;
pub mod quotes;
pub mod screens;
pub mod session;
pub mod storage;
pub mod subjects;
#[cfg(test)]
pub mod testutil;

use api::{ApiClient, ApiError};
use config::Config;
use session::Session;

/// Shared application context, handed to every screen.
///
/// Lives from start-up to teardown and owns the one session.
#[derive(Debug)]
pub struct AppContext {
    pub config: Config,
    pub api: ApiClient,
    pub session: Session,
}

impl AppContext {
    pub fn new(config: Config, session: Session) -> Result<Self, ApiError> {
        let api = ApiClient::new(&config.api.base_url)?;
        Ok(Self {
            config,
            api,
            session,
        })
    }
}
