use std::collections::BTreeMap;

use super::{Player, UnitId};

/// Fog-of-war bookkeeping: which stealthed units each player has located.
///
/// This is authoritative state, not a view. A missing entry means "not
/// revealed". A player always knows its own units, so only enemy entries are
/// meaningful.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Knowledge {
    pub one: BTreeMap<UnitId, bool>,
    pub two: BTreeMap<UnitId, bool>,
}

impl Knowledge {
    fn map(&self, player: Player) -> &BTreeMap<UnitId, bool> {
        match player {
            Player::One => &self.one,
            Player::Two => &self.two,
        }
    }

    fn map_mut(&mut self, player: Player) -> &mut BTreeMap<UnitId, bool> {
        match player {
            Player::One => &mut self.one,
            Player::Two => &mut self.two,
        }
    }

    pub fn knows(&self, player: Player, unit: UnitId) -> bool {
        self.map(player).get(&unit).copied().unwrap_or(false)
    }

    pub fn set(&mut self, player: Player, unit: UnitId, known: bool) {
        self.map_mut(player).insert(unit, known);
    }

    /// Drops every entry for `unit` (used when it dies or leaves stealth).
    pub fn forget(&mut self, unit: UnitId) {
        self.one.remove(&unit);
        self.two.remove(&unit);
    }
}
