use std::future::Future;

use tokio_util::sync::CancellationToken;

/// Ties in-flight work to the screen that started it.
///
/// Clones share one token: any clone can unmount the screen, and every
/// guarded future of that screen is dropped as soon as it does.
#[derive(Debug, Clone, Default)]
pub struct Mount {
    token: CancellationToken,
}

/// How a load ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The fetch resolved and the screen state was updated.
    Completed,
    /// The screen was unmounted first; its state was left untouched.
    Unmounted,
}

impl Mount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unmount(&self) {
        self.token.cancel();
    }

    pub fn is_mounted(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Run `fut` unless the screen is unmounted first. `None` means the
    /// result must be discarded.
    pub async fn guard<F: Future>(&self, fut: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => None,
            output = fut => Some(output),
        }
    }
}
