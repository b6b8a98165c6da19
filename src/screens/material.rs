use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{require_token, LoadOutcome, Mount, Navigation, ScreenError, ScreenState};
use crate::display::MaterialView;
use crate::subjects;
use crate::AppContext;

/// Viewer for a single material, looked up by id within its subject.
pub struct MaterialScreen {
    ctx: Arc<AppContext>,
    subject_id: String,
    material_id: i64,
    state: ScreenState<MaterialView>,
    redirect: Option<Navigation>,
    mount: Mount,
}

impl MaterialScreen {
    pub fn new(ctx: Arc<AppContext>, subject_id: impl Into<String>, material_id: i64) -> Self {
        Self {
            ctx,
            subject_id: subject_id.into(),
            material_id,
            state: ScreenState::Loading,
            redirect: None,
            mount: Mount::new(),
        }
    }

    pub fn state(&self) -> &ScreenState<MaterialView> {
        &self.state
    }

    pub fn redirect(&self) -> Option<&Navigation> {
        self.redirect.as_ref()
    }

    pub fn mount_handle(&self) -> Mount {
        self.mount.clone()
    }

    /// Where the back link leads.
    pub fn back(&self) -> Navigation {
        Navigation::Subject(self.subject_id.clone())
    }

    pub async fn load(&mut self) -> LoadOutcome {
        if !self.mount.is_mounted() {
            return LoadOutcome::Unmounted;
        }

        let ctx = Arc::clone(&self.ctx);
        let subject_id = self.subject_id.clone();
        let material_id = self.material_id;
        let fetch = async move {
            let token = require_token(&ctx.session)?;
            let page = ctx
                .api
                .list_materials_by_subject(Some(&token), &subject_id, ctx.config.api.page_size)
                .await?;

            page.content
                .iter()
                .find(|m| m.id == material_id)
                .map(MaterialView::from)
                .ok_or_else(|| {
                    ScreenError::NotFound(format!(
                        "Material #{material_id} was not found in {}",
                        subjects::lookup(&subject_id).name
                    ))
                })
        };

        let Some(result) = self.mount.guard(fetch).await else {
            return LoadOutcome::Unmounted;
        };

        if let Err(ref e) = result {
            if e.requires_login() {
                self.redirect = Some(Navigation::Login);
            }
        }

        self.state = ScreenState::settle(result, |_| false);
        LoadOutcome::Completed
    }

    /// Download the loaded material into `dir`. Returns the written path.
    pub async fn save_to(&self, dir: &Path) -> Result<PathBuf, ScreenError> {
        let view = self.state.populated().ok_or_else(|| {
            ScreenError::Validation("Nothing to download until the material has loaded".to_string())
        })?;

        let data = self.ctx.api.download(&view.download_url).await?;

        let file_name = match &view.extension {
            Some(ext) => format!("{}.{ext}", sanitize_file_name(&view.name)),
            None => sanitize_file_name(&view.name),
        };
        let path = dir.join(file_name);

        tokio::fs::write(&path, &data)
            .await
            .map_err(|e| ScreenError::io(format!("Could not write {}", path.display()), e))?;

        tracing::info!(material_id = view.id, path = %path.display(), bytes = data.len(), "Saved material");
        Ok(path)
    }
}

fn sanitize_file_name(name: &str) -> String {
    name.trim_end_matches('…')
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}
