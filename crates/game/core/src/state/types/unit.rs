use std::collections::BTreeMap;
use std::fmt;

use super::{Player, Position, TurnSlots, UnitId};

/// Movement archetype of a unit. Each class has its own movement shape,
/// attack reach, and class abilities (see [`crate::env::CatalogOracle`]).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum UnitClass {
    Spearman,
    Rider,
    Knight,
    Archer,
    Trickster,
    Assassin,
    Berserker,
}

/// Catalog key of a hero variant.
///
/// Heroes are data: the id selects a [`crate::env::HeroProfile`] that overrides
/// base stats and adds abilities. The set grows without touching the engine.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct HeroId(pub String);

impl HeroId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HeroId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Every ability the engine knows how to charge, spend, or react with.
///
/// Active abilities have a handler in the [`crate::abilities::AbilityRegistry`];
/// passive ones (rage, watch) only carry charges consumed elsewhere.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AbilityId {
    RiderCharge,
    TricksterBurst,
    BerserkerRage,
    Fireball,
    Shove,
    Shelter,
    Watch,
}

/// One combat participant.
///
/// # Invariants
///
/// - `!alive` implies `position == None`
/// - `slots` is only meaningful while this unit is the active unit
/// - `charges[a] <= max_charges(a)` as configured in the catalog
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitState {
    pub id: UnitId,
    pub owner: Player,
    pub class: UnitClass,
    pub hero: Option<HeroId>,

    pub hp: u32,
    pub max_hp: u32,
    /// Damage dealt by a successful basic attack.
    pub attack: u32,

    /// `None` before placement and after death.
    pub position: Option<Position>,
    pub alive: bool,

    /// Slots already spent during the current turn.
    pub slots: TurnSlots,
    pub charges: BTreeMap<AbilityId, u32>,

    pub stealthed: bool,
    pub stealth_turns_left: u8,

    /// Warden currently sheltering this unit, if any.
    pub shelter: Option<UnitId>,
}

impl UnitState {
    pub fn new(id: UnitId, owner: Player, class: UnitClass, hp: u32, attack: u32) -> Self {
        Self {
            id,
            owner,
            class,
            hero: None,
            hp,
            max_hp: hp,
            attack,
            position: None,
            alive: true,
            slots: TurnSlots::empty(),
            charges: BTreeMap::new(),
            stealthed: false,
            stealth_turns_left: 0,
            shelter: None,
        }
    }

    #[must_use]
    pub fn with_hero(mut self, hero: HeroId) -> Self {
        self.hero = Some(hero);
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn with_charges(mut self, ability: AbilityId, charges: u32) -> Self {
        self.charges.insert(ability, charges);
        self
    }

    /// Alive and standing on the board.
    pub fn is_deployed(&self) -> bool {
        self.alive && self.position.is_some()
    }

    pub fn charges(&self, ability: AbilityId) -> u32 {
        self.charges.get(&ability).copied().unwrap_or(0)
    }

    /// Removes the unit from play. Leaves `id` and `owner` for bookkeeping.
    pub fn kill(&mut self) {
        self.hp = 0;
        self.alive = false;
        self.position = None;
        self.stealthed = false;
        self.stealth_turns_left = 0;
        self.shelter = None;
    }
}
