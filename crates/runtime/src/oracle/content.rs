//! Owned catalog and config the engine borrows per dispatch.

use std::sync::Arc;

use tactics_content::ContentFactory;
use tactics_core::{
    AbilityRegistry, CatalogSnapshot, GameConfig, GameEngine, GameEnv, ReactiveHook,
    engine::default_hooks,
};

use crate::api::Result;

/// Bundle of the read-only inputs a [`GameEngine`] needs.
#[derive(Clone)]
pub struct ContentBundle {
    catalog: CatalogSnapshot,
    config: GameConfig,
    abilities: AbilityRegistry,
    hooks: Vec<Arc<dyn ReactiveHook>>,
}

impl ContentBundle {
    pub fn new(catalog: CatalogSnapshot, config: GameConfig) -> Self {
        Self {
            catalog,
            config,
            abilities: AbilityRegistry::standard(),
            hooks: default_hooks().to_vec(),
        }
    }

    /// Built-in catalog with default rules.
    pub fn standard() -> Self {
        Self::new(CatalogSnapshot::standard(), GameConfig::default())
    }

    /// Catalog and config read from a content data directory.
    pub fn load(factory: &ContentFactory) -> Result<Self> {
        let catalog = factory.load_catalog()?;
        let config = factory.load_config()?;
        Ok(Self::new(catalog, config))
    }

    #[must_use]
    pub fn with_abilities(mut self, abilities: AbilityRegistry) -> Self {
        self.abilities = abilities;
        self
    }

    #[must_use]
    pub fn with_hooks(mut self, hooks: Vec<Arc<dyn ReactiveHook>>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn catalog(&self) -> &CatalogSnapshot {
        &self.catalog
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn engine(&self) -> GameEngine<'_> {
        GameEngine::new(GameEnv::new(&self.catalog, &self.config))
            .with_registry(self.abilities.clone())
            .with_hooks(self.hooks.clone())
    }
}

impl std::fmt::Debug for ContentBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentBundle")
            .field("classes", &self.catalog.classes.len())
            .field("heroes", &self.catalog.heroes.len())
            .field("config", &self.config)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}
