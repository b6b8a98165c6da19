use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;

use super::{require_token, LoadOutcome, Mount, Navigation, ScreenError, ScreenState};
use crate::subjects::{Subject, SUBJECTS};
use crate::AppContext;

/// A catalogue subject with its material count, when the count could be fetched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectSummary {
    pub subject: &'static Subject,
    pub material_count: Option<u64>,
}

pub struct DashboardScreen {
    ctx: Arc<AppContext>,
    state: ScreenState<Vec<SubjectSummary>>,
    redirect: Option<Navigation>,
    mount: Mount,
}

impl DashboardScreen {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self {
            ctx,
            state: ScreenState::Loading,
            redirect: None,
            mount: Mount::new(),
        }
    }

    pub fn state(&self) -> &ScreenState<Vec<SubjectSummary>> {
        &self.state
    }

    pub fn redirect(&self) -> Option<&Navigation> {
        self.redirect.as_ref()
    }

    pub fn mount_handle(&self) -> Mount {
        self.mount.clone()
    }

    /// Fetch one count per subject, concurrently, and settle once all are in.
    /// A failed count only blanks that subject's count, unless the backend
    /// rejected the token: then the whole screen fails and asks for a login.
    pub async fn load(&mut self) -> LoadOutcome {
        if !self.mount.is_mounted() {
            return LoadOutcome::Unmounted;
        }

        let token = match require_token(&self.ctx.session) {
            Ok(token) => token,
            Err(e) => {
                if e.requires_login() {
                    self.redirect = Some(Navigation::Login);
                }
                self.state = ScreenState::Error(e);
                return LoadOutcome::Completed;
            }
        };

        let ctx = Arc::clone(&self.ctx);
        let counts = join_all(SUBJECTS.iter().map(|subject| {
            let ctx = Arc::clone(&ctx);
            let token = token.clone();
            async move {
                let count = ctx
                    .api
                    .list_materials_by_subject(Some(&token), subject.id, 1)
                    .await
                    .map(|page| page.total_elements)
                    .map_err(ScreenError::from);
                (subject, count)
            }
        }));

        let Some(counts) = self.mount.guard(counts).await else {
            return LoadOutcome::Unmounted;
        };

        let result = summarize(counts);
        if let Err(ref e) = result {
            if e.requires_login() {
                self.redirect = Some(Navigation::Login);
            }
        }

        self.state = ScreenState::settle(result, |s| s.is_empty());
        LoadOutcome::Completed
    }
}

/// Reduce the per-subject counts. A rejected token fails the screen; any
/// other failure leaves that subject's count unknown.
fn summarize(
    counts: Vec<(&'static Subject, Result<u64, ScreenError>)>,
) -> Result<Vec<SubjectSummary>, ScreenError> {
    let mut summaries = Vec::with_capacity(counts.len());

    for (subject, count) in counts {
        let material_count = match count {
            Ok(count) => Some(count),
            Err(e) if e.requires_login() => return Err(e),
            Err(e) => {
                tracing::warn!(subject = %subject.id, error = %e, "Failed to count materials");
                None
            }
        };
        summaries.push(SubjectSummary {
            subject,
            material_count,
        });
    }

    Ok(summaries)
}
