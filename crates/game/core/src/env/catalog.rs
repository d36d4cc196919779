//! Static unit, hero, and ability tables.

use crate::state::{AbilityId, HeroId, TurnSlots, UnitClass};

/// How a class moves across the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MovementShape {
    /// Walks up to `radius` steps through empty cells.
    Step { radius: u32, diagonal: bool },
    /// Slides orthogonally up to `max` cells, stopping before the first unit.
    Slide { max: u32 },
    /// Chess-knight leap over anything in between.
    Leap,
    /// Appears on any empty cell within `radius`.
    Teleport { radius: u32 },
}

/// Which cells a class can hit with a basic attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AttackReach {
    /// The eight surrounding cells.
    Adjacent,
    /// A straight line up to `max` cells.
    Line {
        max: u32,
        diagonal: bool,
        clear_path: bool,
    },
}

/// Charge economy of one ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChargeSpec {
    pub max: u32,
    /// Charges consumed per use.
    pub cost: u32,
    /// Charges regained at the start of the owner's turn.
    pub recharge: u32,
    /// Charges at lobby creation.
    pub initial: u32,
}

impl ChargeSpec {
    pub const fn new(max: u32, cost: u32, recharge: u32, initial: u32) -> Self {
        Self {
            max,
            cost,
            recharge,
            initial,
        }
    }

    /// Count after one turn-start recharge, capped at `max`.
    pub fn recharged(&self, current: u32) -> u32 {
        current.saturating_add(self.recharge).min(self.max)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilitySpec {
    pub id: AbilityId,
    /// Slots spent on use. Empty for passives.
    pub slots: TurnSlots,
    pub charges: Option<ChargeSpec>,
    /// Passive abilities cannot be activated with `UseAbility`.
    pub passive: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassProfile {
    pub class: UnitClass,
    pub hp: u32,
    pub attack: u32,
    pub movement: MovementShape,
    pub reach: AttackReach,
    pub stealth: bool,
    pub abilities: Vec<AbilityId>,
}

/// Variant of a base class with stat overrides and extra abilities.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeroProfile {
    pub id: HeroId,
    pub base: UnitClass,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hp: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attack: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: Vec<AbilityId>,
}

/// Read-only access to the unit catalog.
pub trait CatalogOracle: Send + Sync {
    fn class(&self, class: UnitClass) -> Option<&ClassProfile>;

    fn hero(&self, hero: &HeroId) -> Option<&HeroProfile>;

    fn ability(&self, ability: AbilityId) -> Option<&AbilitySpec>;

    /// Abilities of a class, plus those granted by the hero variant.
    fn abilities_of(&self, class: UnitClass, hero: Option<&HeroId>) -> Vec<AbilityId> {
        let mut abilities = self
            .class(class)
            .map(|profile| profile.abilities.clone())
            .unwrap_or_default();
        if let Some(profile) = hero.and_then(|hero| self.hero(hero)) {
            for ability in &profile.abilities {
                if !abilities.contains(ability) {
                    abilities.push(*ability);
                }
            }
        }
        abilities
    }

    fn charge_spec(&self, ability: AbilityId) -> Option<ChargeSpec> {
        self.ability(ability).and_then(|spec| spec.charges)
    }
}

/// Plain-data catalog.
///
/// [`CatalogSnapshot::standard`] carries the built-in tables; content loaders
/// deserialize the same shape from data files.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogSnapshot {
    pub classes: Vec<ClassProfile>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub heroes: Vec<HeroProfile>,
    pub abilities: Vec<AbilitySpec>,
}

impl CatalogSnapshot {
    pub fn new(
        classes: Vec<ClassProfile>,
        heroes: Vec<HeroProfile>,
        abilities: Vec<AbilitySpec>,
    ) -> Self {
        Self {
            classes,
            heroes,
            abilities,
        }
    }

    pub fn standard() -> Self {
        use AbilityId::*;

        let adjacent = AttackReach::Adjacent;
        let class = |class, hp, attack, movement, reach, stealth, abilities: &[AbilityId]| {
            ClassProfile {
                class,
                hp,
                attack,
                movement,
                reach,
                stealth,
                abilities: abilities.to_vec(),
            }
        };

        let classes = vec![
            class(
                UnitClass::Spearman,
                3,
                1,
                MovementShape::Step {
                    radius: 1,
                    diagonal: true,
                },
                AttackReach::Line {
                    max: 2,
                    diagonal: false,
                    clear_path: false,
                },
                false,
                &[],
            ),
            class(
                UnitClass::Rider,
                3,
                1,
                MovementShape::Slide { max: 3 },
                adjacent,
                false,
                &[RiderCharge],
            ),
            class(
                UnitClass::Knight,
                4,
                1,
                MovementShape::Leap,
                adjacent,
                false,
                &[],
            ),
            class(
                UnitClass::Archer,
                2,
                1,
                MovementShape::Step {
                    radius: 1,
                    diagonal: false,
                },
                AttackReach::Line {
                    max: 4,
                    diagonal: true,
                    clear_path: true,
                },
                false,
                &[],
            ),
            class(
                UnitClass::Trickster,
                2,
                1,
                MovementShape::Teleport { radius: 2 },
                adjacent,
                false,
                &[TricksterBurst],
            ),
            class(
                UnitClass::Assassin,
                2,
                2,
                MovementShape::Step {
                    radius: 2,
                    diagonal: true,
                },
                adjacent,
                true,
                &[],
            ),
            class(
                UnitClass::Berserker,
                4,
                1,
                MovementShape::Step {
                    radius: 1,
                    diagonal: true,
                },
                adjacent,
                false,
                &[BerserkerRage],
            ),
        ];

        let heroes = vec![
            HeroProfile {
                id: HeroId::new("ember_mage"),
                base: UnitClass::Archer,
                hp: None,
                attack: None,
                abilities: vec![Fireball],
            },
            HeroProfile {
                id: HeroId::new("warden"),
                base: UnitClass::Spearman,
                hp: Some(4),
                attack: None,
                abilities: vec![Shove, Shelter],
            },
            HeroProfile {
                id: HeroId::new("sentinel"),
                base: UnitClass::Knight,
                hp: None,
                attack: None,
                abilities: vec![Watch],
            },
        ];

        let active = |id, slots, charges| AbilitySpec {
            id,
            slots,
            charges,
            passive: false,
        };
        let passive = |id, charges| AbilitySpec {
            id,
            slots: TurnSlots::empty(),
            charges: Some(charges),
            passive: true,
        };

        let abilities = vec![
            active(
                RiderCharge,
                TurnSlots::MOVE | TurnSlots::ATTACK,
                Some(ChargeSpec::new(2, 2, 1, 2)),
            ),
            active(
                TricksterBurst,
                TurnSlots::ATTACK,
                Some(ChargeSpec::new(3, 3, 1, 3)),
            ),
            active(
                Fireball,
                TurnSlots::ATTACK | TurnSlots::ACTION,
                Some(ChargeSpec::new(3, 3, 1, 3)),
            ),
            active(Shove, TurnSlots::ACTION, None),
            active(Shelter, TurnSlots::ACTION, None),
            passive(BerserkerRage, ChargeSpec::new(6, 6, 1, 0)),
            passive(Watch, ChargeSpec::new(1, 1, 1, 1)),
        ];

        Self::new(classes, heroes, abilities)
    }
}

impl CatalogOracle for CatalogSnapshot {
    fn class(&self, class: UnitClass) -> Option<&ClassProfile> {
        self.classes.iter().find(|profile| profile.class == class)
    }

    fn hero(&self, hero: &HeroId) -> Option<&HeroProfile> {
        self.heroes.iter().find(|profile| &profile.id == hero)
    }

    fn ability(&self, ability: AbilityId) -> Option<&AbilitySpec> {
        self.abilities.iter().find(|spec| spec.id == ability)
    }
}
