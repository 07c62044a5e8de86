//! Application state

use common::Config;
use engine::ActionPipeline;
use platform::PlatformClient;
use sqlx::PgPool;

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub pool: PgPool,
    pub pipeline: ActionPipeline,
    pub platform: PlatformClient,
}

impl AppState {
    pub fn new(config: Config, pool: PgPool) -> Self {
        let pipeline = ActionPipeline::new(pool.clone());
        let platform = PlatformClient::new(
            config.platform_url.clone(),
            config.platform_service_key.clone(),
        );
        Self {
            config,
            pool,
            pipeline,
            platform,
        }
    }
}
