//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::ScriptService;
use crate::application::OutlineSession;
use crate::config::Settings;
use crate::domain::{sample_outline, Forest};
use crate::infrastructure::traits::{FileSystem, IdGenerator, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Node id source
    pub ids: Arc<dyn IdGenerator>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        let ids: Arc<dyn IdGenerator> = Arc::from(settings.id_style.generator());
        Self::with_deps(settings, Arc::new(RealFileSystem), ids)
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self { settings, fs, ids }
    }

    pub fn script_service(&self) -> ScriptService {
        ScriptService::new(self.fs.clone())
    }

    /// A session over the configured starting outline (sample or empty).
    pub fn session(&self, empty: bool) -> OutlineSession {
        let initial = if empty || !self.settings.seed {
            Forest::new()
        } else {
            sample_outline()
        };
        OutlineSession::new(initial, self.ids.clone(), &self.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::traits::SequentialIdGenerator;

    fn container(seed: bool) -> ServiceContainer {
        let settings = Settings {
            seed,
            ..Settings::default()
        };
        ServiceContainer::with_deps(
            settings,
            Arc::new(RealFileSystem),
            Arc::new(SequentialIdGenerator::new("t")),
        )
    }

    #[test]
    fn given_seed_setting_when_creating_session_then_starts_from_sample() {
        assert_eq!(container(true).session(false).snapshot().len(), 4);
        assert!(container(true).session(true).snapshot().is_empty());
        assert!(container(false).session(false).snapshot().is_empty());
    }
}
