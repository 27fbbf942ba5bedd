//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::CatalogService;
use crate::config::Settings;
use crate::infrastructure::traits::{CommandRunner, LinkOpener, RealCommandRunner, SystemLinkOpener};

/// Container holding the application settings and the catalog session.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Catalog session owning the taxonomy tree
    pub catalog: CatalogService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        let cmd: Arc<dyn CommandRunner> = Arc::new(RealCommandRunner);
        let opener = Arc::new(SystemLinkOpener::new(settings.browser.clone(), cmd));
        Self::with_deps(settings, opener)
    }

    /// Create a service container with custom dependencies (for testing).
    ///
    /// Seeds the example species when `settings.seed_examples` is set.
    pub fn with_deps(
        settings: Settings,
        opener: Arc<dyn LinkOpener>,
    ) -> Self {
        let settings = Arc::new(settings);
        let mut catalog = CatalogService::new(opener);
        if settings.seed_examples {
            catalog.seed_examples();
        }

        Self { settings, catalog }
    }
}
