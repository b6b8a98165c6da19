use std::sync::Arc;

use super::{Navigation, ScreenError};
use crate::AppContext;

/// Landing page: offers the dashboard when signed in, sign-in otherwise.
pub struct HomeScreen {
    ctx: Arc<AppContext>,
}

impl HomeScreen {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self { ctx }
    }

    pub fn is_signed_in(&self) -> Result<bool, ScreenError> {
        Ok(self.ctx.session.is_signed_in()?)
    }

    /// Where the primary call to action leads.
    pub fn primary_action(&self) -> Result<Navigation, ScreenError> {
        if self.is_signed_in()? {
            Ok(Navigation::Dashboard)
        } else {
            Ok(Navigation::Login)
        }
    }
}
