use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;

use super::{require_token, LoadOutcome, Mount, Navigation, ScreenError, ScreenState};
use crate::api::models::Material;
use crate::display::MaterialView;
use crate::AppContext;

/// Name shown until the user's own uploads reveal it
pub const DEFAULT_USERNAME: &str = "Scholar";

/// The signed-in user's shelf.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub username: String,
    pub materials: Vec<MaterialView>,
    pub total_shelved: usize,
    pub unique_subjects: usize,
}

impl Profile {
    pub fn from_materials(materials: &[Material]) -> Self {
        let username = materials
            .first()
            .map(|m| m.username.trim())
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_USERNAME)
            .to_string();

        let unique_subjects = materials
            .iter()
            .map(|m| m.subject.as_str())
            .collect::<BTreeSet<_>>()
            .len();

        Profile {
            username,
            materials: materials.iter().map(MaterialView::from).collect(),
            total_shelved: materials.len(),
            unique_subjects,
        }
    }
}

pub struct ProfileScreen {
    ctx: Arc<AppContext>,
    state: ScreenState<Profile>,
    redirect: Option<Navigation>,
    mount: Mount,
}

impl ProfileScreen {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self {
            ctx,
            state: ScreenState::Loading,
            redirect: None,
            mount: Mount::new(),
        }
    }

    pub fn state(&self) -> &ScreenState<Profile> {
        &self.state
    }

    pub fn redirect(&self) -> Option<&Navigation> {
        self.redirect.as_ref()
    }

    pub fn mount_handle(&self) -> Mount {
        self.mount.clone()
    }

    pub async fn load(&mut self) -> LoadOutcome {
        if !self.mount.is_mounted() {
            return LoadOutcome::Unmounted;
        }

        let ctx = Arc::clone(&self.ctx);
        let fetch = async move {
            let token = require_token(&ctx.session)?;
            let page = ctx
                .api
                .materials_for_current_user(&token, ctx.config.api.page_size)
                .await?;
            Ok::<_, ScreenError>(Profile::from_materials(&page.content))
        };

        let Some(result) = self.mount.guard(fetch).await else {
            return LoadOutcome::Unmounted;
        };

        if let Err(ref e) = result {
            if e.requires_login() {
                self.redirect = Some(Navigation::Login);
            }
        }

        self.state = ScreenState::settle(result, |profile| profile.materials.is_empty());
        LoadOutcome::Completed
    }

    /// Forget the session and head back to the landing page.
    pub fn logout(&mut self) -> Result<Navigation, ScreenError> {
        self.ctx.session.sign_out()?;
        self.mount.unmount();
        Ok(Navigation::Home)
    }
}
