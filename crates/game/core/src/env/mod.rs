//! Read-only collaborators of the engine.
//!
//! The catalog exposes unit, hero, and ability tables; the config carries the
//! rule tunables; the RNG oracle is the only source of entropy and is passed
//! per dispatch instead of living here. [`GameEnv`] bundles the read-only
//! parts so handlers never couple to concrete implementations.
mod catalog;
mod rng;

pub use catalog::{
    AbilitySpec, AttackReach, CatalogOracle, CatalogSnapshot, ChargeSpec, ClassProfile,
    HeroProfile, MovementShape,
};
pub use rng::{PcgRng, RngOracle, ScriptedDice};

use crate::config::GameConfig;
use crate::state::{AbilityId, UnitState};

/// Aggregates the read-only oracles required by the dispatcher and handlers.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    catalog: &'a dyn CatalogOracle,
    config: &'a GameConfig,
}

impl<'a> GameEnv<'a> {
    pub fn new(catalog: &'a dyn CatalogOracle, config: &'a GameConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &'a dyn CatalogOracle {
        self.catalog
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }

    pub fn class_profile(&self, unit: &UnitState) -> Option<&'a ClassProfile> {
        self.catalog.class(unit.class)
    }

    pub fn has_ability(&self, unit: &UnitState, ability: AbilityId) -> bool {
        self.catalog
            .abilities_of(unit.class, unit.hero.as_ref())
            .contains(&ability)
    }

    /// True for a unit holding `ability` with a full charge stock.
    pub fn has_full_stock(&self, unit: &UnitState, ability: AbilityId) -> bool {
        if !self.has_ability(unit, ability) {
            return false;
        }
        self.catalog
            .charge_spec(ability)
            .is_some_and(|spec| spec.max > 0 && unit.charges(ability) >= spec.max)
    }
}

impl std::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEnv")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
