use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared handle to the selected companion session.
///
/// `None` is the archive view. The handle lives in the application context
/// so the selection outlives any one controller.
#[derive(Debug, Clone, Default)]
pub struct SessionSelection {
    selected: Arc<RwLock<Option<String>>>,
}

impl SessionSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selected(session_id: impl Into<String>) -> Self {
        Self {
            selected: Arc::new(RwLock::new(Some(session_id.into()))),
        }
    }

    pub async fn get(&self) -> Option<String> {
        self.selected.read().await.clone()
    }

    pub async fn set(&self, session_id: Option<String>) {
        *self.selected.write().await = session_id;
    }
}
