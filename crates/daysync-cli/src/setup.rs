//! Logging, paths and service wiring for the binary.

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use daysync_application::AppContext;
use daysync_core::analysis::{AnalysisError, AnalysisService};
use daysync_core::entry::{DayAnalysis, DayEntry};
use daysync_core::secret::SecretService;
use daysync_core::session::ChatMessage;
use daysync_infrastructure::{ConfigService, DaySyncPaths, SecretServiceImpl};
use daysync_interaction::GeminiAnalysisService;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Installs the stderr subscriber. `DAYSYNC_LOG` wins over `RUST_LOG`.
pub fn init_tracing() {
    let filter = std::env::var("DAYSYNC_LOG")
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

pub struct Setup {
    pub paths: DaySyncPaths,
    pub ephemeral: bool,
}

impl Setup {
    pub fn new(data_dir: Option<PathBuf>, ephemeral: bool) -> Result<Self> {
        let mut paths = DaySyncPaths::resolve().context("Failed to resolve DaySync directories")?;
        if let Some(data_dir) = data_dir {
            paths = paths.with_data_dir(data_dir);
        }
        Ok(Self { paths, ephemeral })
    }

    /// Context for commands that never call the analysis service.
    pub fn offline_context(&self) -> AppContext {
        self.context(Arc::new(UnconfiguredAnalysisService))
    }

    /// Context with the Gemini service, failing early when no key is set.
    pub async fn online_context(&self) -> Result<AppContext> {
        let config = ConfigService::new(self.paths.config_file())
            .get_config()
            .context("Failed to load config.toml")?;

        let secret_service = SecretServiceImpl::new(self.paths.secret_file());
        if !secret_service.secret_file_exists().await {
            let created = self
                .paths
                .ensure_secret_file()
                .context("Failed to create secret.json template")?;
            tracing::info!("Created secret template at {:?}", created);
        }
        let secrets = secret_service
            .load_secrets()
            .await
            .context("Failed to load secret.json")?;

        let service = GeminiAnalysisService::from_secrets(&secrets, &config.analysis).map_err(
            |e| {
                anyhow::anyhow!(
                    "{e}\nAdd your key to {} or export GEMINI_API_KEY.",
                    self.paths.secret_file().display()
                )
            },
        )?;
        tracing::debug!(
            "Using chat model {} and analysis model {}",
            service.chat_model(),
            service.analysis_model()
        );
        Ok(self.context(Arc::new(service)))
    }

    fn context(&self, analysis: Arc<dyn AnalysisService>) -> AppContext {
        if self.ephemeral {
            AppContext::ephemeral(analysis)
        } else {
            AppContext::with_file_stores(&self.paths, analysis)
        }
    }
}

/// Stand-in for read-only commands, which have no use for an API key.
pub(crate) struct UnconfiguredAnalysisService;

impl UnconfiguredAnalysisService {
    fn error() -> AnalysisError {
        AnalysisError::Config("this command does not use the analysis service".to_string())
    }
}

#[async_trait]
impl AnalysisService for UnconfiguredAnalysisService {
    async fn request_follow_up(&self, _: &str, _: &[String]) -> Result<String, AnalysisError> {
        Err(Self::error())
    }

    async fn request_day_analysis(
        &self,
        _: &str,
        _: &[String],
        _: &[DayEntry],
    ) -> Result<DayAnalysis, AnalysisError> {
        Err(Self::error())
    }

    async fn request_companion_reply(
        &self,
        _: &str,
        _: &[ChatMessage],
    ) -> Result<String, AnalysisError> {
        Err(Self::error())
    }
}
