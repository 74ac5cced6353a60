use std::sync::Arc;

use seedcat_api::{ApiServer, ApiState};
use seedcat_config::ServiceConfig;
use seedcat_prov::{GraphRenderer, GraphvizRenderer, RenderOptions};
use seedcat_telemetry::{LoggingConfig, build_sha, init_logging};
use tracing::info;

use crate::error::{AppError, AppResult};

/// Dependencies required to start the render service.
pub(crate) struct BootstrapDependencies {
    config: ServiceConfig,
    renderer: Arc<dyn GraphRenderer>,
}

impl BootstrapDependencies {
    /// Construct production dependencies from the environment for the binary entrypoint.
    pub(crate) fn from_env() -> AppResult<Self> {
        let config = ServiceConfig::from_env()
            .map_err(|err| AppError::config("service_config.from_env", err))?;
        Ok(Self::from_config(config))
    }

    pub(crate) fn from_config(config: ServiceConfig) -> Self {
        let renderer: Arc<dyn GraphRenderer> =
            Arc::new(GraphvizRenderer::new(&config.dot_program));
        Self { config, renderer }
    }
}

/// Entry point for the render service boot sequence.
///
/// # Errors
///
/// Returns an error if configuration is invalid, logging cannot be installed, or the
/// server fails to bind or serve.
pub async fn run_app() -> AppResult<()> {
    let dependencies = BootstrapDependencies::from_env()?;
    init_logging(&LoggingConfig {
        level: &dependencies.config.log_level,
        format: dependencies.config.log_format,
        build_sha: build_sha(),
    })
    .map_err(|err| AppError::telemetry("telemetry.init", err))?;
    run_app_with(dependencies).await
}

/// Boot sequence that relies entirely on injected dependencies to simplify testing.
pub(crate) async fn run_app_with(dependencies: BootstrapDependencies) -> AppResult<()> {
    let BootstrapDependencies { config, renderer } = dependencies;
    info!(
        bind_addr = %config.bind_addr,
        dot = %config.dot_program.display(),
        dpi = ?config.dpi,
        "render service bootstrap starting"
    );

    let state = ApiState::new(renderer, RenderOptions { dpi: config.dpi });
    ApiServer::new(state)
        .serve(config.bind_addr)
        .await
        .map_err(|err| AppError::api_server("api_server.serve", err))?;
    info!("render service shutdown complete");
    Ok(())
}
