//! Unit catalog loader.

use std::collections::BTreeSet;
use std::path::Path;

use tactics_core::{CatalogOracle, CatalogSnapshot};

use crate::loaders::{LoadResult, read_file};

/// Loader for the unit catalog from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load a catalog from a RON file and check it is self-consistent.
    pub fn load(path: &Path) -> LoadResult<CatalogSnapshot> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid catalog {}: {}", path.display(), e))
    }

    /// Parse catalog data from RON text.
    pub fn parse(content: &str) -> LoadResult<CatalogSnapshot> {
        let catalog: CatalogSnapshot = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog RON: {}", e))?;
        Self::validate(&catalog)?;
        Ok(catalog)
    }

    /// Every class appears once, and every referenced ability and base class
    /// is defined.
    pub fn validate(catalog: &CatalogSnapshot) -> LoadResult<()> {
        let mut classes = BTreeSet::new();
        for profile in &catalog.classes {
            anyhow::ensure!(
                classes.insert(profile.class),
                "class {} defined twice",
                profile.class
            );
            for ability in &profile.abilities {
                anyhow::ensure!(
                    catalog.ability(*ability).is_some(),
                    "class {} references undefined ability {}",
                    profile.class,
                    ability
                );
            }
        }

        let mut heroes = BTreeSet::new();
        for hero in &catalog.heroes {
            anyhow::ensure!(heroes.insert(&hero.id), "hero {} defined twice", hero.id);
            anyhow::ensure!(
                catalog.class(hero.base).is_some(),
                "hero {} has undefined base class {}",
                hero.id,
                hero.base
            );
            for ability in &hero.abilities {
                anyhow::ensure!(
                    catalog.ability(*ability).is_some(),
                    "hero {} references undefined ability {}",
                    hero.id,
                    ability
                );
            }
        }

        for spec in &catalog.abilities {
            if let Some(charges) = spec.charges {
                anyhow::ensure!(
                    charges.initial <= charges.max && charges.cost <= charges.max,
                    "ability {} charges exceed their maximum",
                    spec.id
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tactics_core::{AbilityId, UnitClass};

    use super::*;

    #[test]
    fn standard_catalog_is_consistent() {
        CatalogLoader::validate(&CatalogSnapshot::standard()).unwrap();
    }

    #[test]
    fn undefined_ability_is_rejected() {
        let mut catalog = CatalogSnapshot::standard();
        catalog.abilities.retain(|spec| spec.id != AbilityId::Watch);

        let err = CatalogLoader::validate(&catalog).unwrap_err();
        assert!(err.to_string().contains("watch"), "{err}");
    }

    #[test]
    fn duplicate_class_is_rejected() {
        let mut catalog = CatalogSnapshot::standard();
        let knight = catalog
            .classes
            .iter()
            .find(|profile| profile.class == UnitClass::Knight)
            .cloned()
            .unwrap();
        catalog.classes.push(knight);

        assert!(CatalogLoader::validate(&catalog).is_err());
    }
}
