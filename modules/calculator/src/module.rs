//! Module declaration for the Calculator module.

use std::sync::Arc;

use axum::Router;
use calculator_bootstrap::{ConfigError, ConfigProvider, module_config_or_default};
use tracing::{debug, info};
use utoipa::OpenApi;

use crate::api::rest::{CalculatorApiDoc, register_routes};
use crate::config::CalculatorConfig;
use crate::domain::service::CalculatorService;
use crate::infra::InMemoryInstanceStore;

/// Calculator module.
///
/// Owns the instance store and the service, and contributes the calculator
/// routes and their `OpenAPI` document to the host router.
pub struct CalculatorModule {
    config: CalculatorConfig,
    service: Arc<CalculatorService>,
}

impl CalculatorModule {
    pub const NAME: &'static str = "calculator";

    /// Builds the module from `modules.calculator.config`, falling back to defaults.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidConfig` if the section is present but invalid.
    pub fn from_config(provider: &dyn ConfigProvider) -> Result<Self, ConfigError> {
        let cfg: CalculatorConfig = module_config_or_default(provider, Self::NAME)?;
        debug!(max_instance_id = cfg.max_instance_id, "Loaded calculator config");
        Ok(Self::new(cfg))
    }

    #[must_use]
    pub fn new(config: CalculatorConfig) -> Self {
        let store = Arc::new(InMemoryInstanceStore::with_max_instance_id(
            config.max_instance_id,
        ));
        let service = Arc::new(CalculatorService::new(store));

        info!("Calculator module initialized");
        Self { config, service }
    }

    #[must_use]
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    #[must_use]
    pub fn service(&self) -> Arc<CalculatorService> {
        Arc::clone(&self.service)
    }

    /// Adds the calculator routes to `router`.
    #[must_use]
    pub fn register_rest(&self, router: Router) -> Router {
        register_routes(router, self.service())
    }

    /// `OpenAPI` document of the calculator routes.
    #[must_use]
    pub fn openapi() -> utoipa::openapi::OpenApi {
        CalculatorApiDoc::openapi()
    }
}

impl Default for CalculatorModule {
    fn default() -> Self {
        Self::new(CalculatorConfig::default())
    }
}
