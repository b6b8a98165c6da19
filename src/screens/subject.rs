use std::sync::Arc;

use super::{require_token, LoadOutcome, Mount, Navigation, ScreenError, ScreenState};
use crate::display::MaterialView;
use crate::subjects::{self, Subject};
use crate::AppContext;

/// Materials filed under one subject.
pub struct SubjectScreen {
    ctx: Arc<AppContext>,
    subject_id: String,
    state: ScreenState<Vec<MaterialView>>,
    redirect: Option<Navigation>,
    mount: Mount,
}

impl SubjectScreen {
    pub fn new(ctx: Arc<AppContext>, subject_id: impl Into<String>) -> Self {
        Self {
            ctx,
            subject_id: subject_id.into(),
            state: ScreenState::Loading,
            redirect: None,
            mount: Mount::new(),
        }
    }

    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    pub fn subject(&self) -> &'static Subject {
        subjects::lookup(&self.subject_id)
    }

    pub fn state(&self) -> &ScreenState<Vec<MaterialView>> {
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
        let subject_id = self.subject_id.clone();
        let fetch = async move {
            let token = require_token(&ctx.session)?;
            let page = ctx
                .api
                .list_materials_by_subject(Some(&token), &subject_id, ctx.config.api.page_size)
                .await?;
            Ok::<_, ScreenError>(page.content.iter().map(MaterialView::from).collect::<Vec<_>>())
        };

        let Some(result) = self.mount.guard(fetch).await else {
            return LoadOutcome::Unmounted;
        };

        if let Err(ref e) = result {
            if e.requires_login() {
                self.redirect = Some(Navigation::Login);
            }
        }

        self.state = ScreenState::settle(result, |materials| materials.is_empty());
        LoadOutcome::Completed
    }
}
