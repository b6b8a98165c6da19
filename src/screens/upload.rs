use std::path::PathBuf;
use std::sync::Arc;

use super::{require_token, FormState, Mount, Navigation, ScreenError};
use crate::api::models::UploadFile;
use crate::subjects;
use crate::AppContext;

const UPLOAD_FAILED: &str = "Upload failed. Please try again.";

#[derive(Debug, Clone)]
pub struct UploadForm {
    pub subject_id: String,
    pub file: Option<PathBuf>,
}

impl Default for UploadForm {
    fn default() -> Self {
        Self {
            subject_id: subjects::SUBJECTS
                .first()
                .map(|s| s.id.to_string())
                .unwrap_or_default(),
            file: None,
        }
    }
}

pub struct UploadScreen {
    ctx: Arc<AppContext>,
    form: UploadForm,
    state: FormState,
    redirect: Option<Navigation>,
    mount: Mount,
}

impl UploadScreen {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self {
            ctx,
            form: UploadForm::default(),
            state: FormState::Idle,
            redirect: None,
            mount: Mount::new(),
        }
    }

    pub fn form(&self) -> &UploadForm {
        &self.form
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn redirect(&self) -> Option<&Navigation> {
        self.redirect.as_ref()
    }

    pub fn mount_handle(&self) -> Mount {
        self.mount.clone()
    }

    /// Session check on mount. Without a token the screen is denied and asks
    /// to go to the login page.
    pub fn mount(&mut self) -> Option<Navigation> {
        match require_token(&self.ctx.session) {
            Ok(_) => None,
            Err(e) => self.deny(e),
        }
    }

    fn deny(&mut self, e: ScreenError) -> Option<Navigation> {
        if e.requires_login() {
            self.redirect = Some(Navigation::Login);
        }
        self.state = FormState::Failed(e);
        self.redirect.clone()
    }

    pub fn set_subject(&mut self, subject_id: impl Into<String>) {
        self.form.subject_id = subject_id.into();
        self.state.dismiss();
    }

    pub fn set_file(&mut self, path: impl Into<PathBuf>) {
        self.form.file = Some(path.into());
        self.state.dismiss();
    }

    pub fn error_message(&self) -> Option<String> {
        self.state.error().map(|e| e.user_message(UPLOAD_FAILED))
    }

    async fn read_file(&self) -> Result<UploadFile, ScreenError> {
        if subjects::find(&self.form.subject_id).is_none() {
            return Err(ScreenError::Validation(format!(
                "Unknown subject '{}'",
                self.form.subject_id
            )));
        }

        let path = self
            .form
            .file
            .as_deref()
            .ok_or_else(|| ScreenError::Validation("Choose a file to upload".to_string()))?;

        let display = path.display();
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| ScreenError::io(format!("Could not read {display}"), e))?;

        if !metadata.is_file() {
            return Err(ScreenError::Validation(format!("{display} is not a file")));
        }

        // Size is checked before the file is buffered.
        if metadata.len() == 0 {
            return Err(ScreenError::Validation(format!("{display} is empty")));
        }

        let max = self.ctx.config.max_upload_size;
        if metadata.len() > max {
            return Err(ScreenError::Validation(format!(
                "File exceeds maximum upload size of {max} bytes"
            )));
        }

        let file = UploadFile::from_path(path)
            .await
            .map_err(|e| ScreenError::io(format!("Could not read {display}"), e))?;

        // The file may have grown since it was measured.
        if file.byte_size() > max {
            return Err(ScreenError::Validation(format!(
                "File exceeds maximum upload size of {max} bytes"
            )));
        }

        Ok(file)
    }

    /// Validate and send the upload. Success leads to the subject's page.
    pub async fn submit(&mut self) -> Option<Navigation> {
        let token = match require_token(&self.ctx.session) {
            Ok(token) => token,
            Err(e) => return self.deny(e),
        };

        let file = match self.read_file().await {
            Ok(file) => file,
            Err(e) => {
                self.state = FormState::Failed(e);
                return None;
            }
        };

        self.state = FormState::Submitting;

        let ctx = Arc::clone(&self.ctx);
        let subject_id = self.form.subject_id.clone();
        let result = self
            .mount
            .guard(async move { ctx.api.upload_material(&token, &subject_id, file).await })
            .await?;

        match result {
            Ok(id) => {
                tracing::info!(material_id = id, subject = %self.form.subject_id, "Material uploaded");
                self.state = FormState::Succeeded(format!("Material #{id} uploaded"));
                Some(Navigation::Subject(self.form.subject_id.clone()))
            }
            Err(e) => {
                let e = ScreenError::from(e);
                if e.requires_login() {
                    self.redirect = Some(Navigation::Login);
                }
                self.state = FormState::Failed(e);
                None
            }
        }
    }
}
