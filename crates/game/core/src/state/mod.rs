//! Authoritative game state representation.
//!
//! This module owns the data structures that describe units, turn
//! bookkeeping, pending continuations, and fog of war. Hosts clone or
//! serialize this state between dispatches but mutate it exclusively through
//! the engine.
pub mod event;
pub mod types;

use std::collections::BTreeMap;

pub use event::{GameEvent, ShoveOutcome};
pub use types::{
    AbilityId, CombatFlags, DuelContext, DuelSource, HeroId, InitiativeContext, Knowledge,
    LobbyState, PendingAoE, PendingCombatEntry, PendingRoll, Phase, PlacementState, Player,
    Position, QueueContext, QueueMode, RollContext, RollId, RollKind, SearchContext,
    ShoveContext, TargetStage, TurnSlots, TurnState, UnitClass, UnitId, UnitState,
    can_spend_slots, reset_turn_economy, spend_slots,
};

/// Canonical snapshot of the game.
///
/// A plain data aggregate with no embedded callables, so snapshot/restore is
/// a straight serialize/deserialize.
///
/// # Invariants
///
/// - `pending_roll` is `None` or a single record
/// - `pending_combat_queue` and `pending_aoe` are empty outside a multi-target
///   resolution
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub phase: Phase,
    pub units: BTreeMap<UnitId, UnitState>,
    pub turn: TurnState,
    pub placement: PlacementState,
    pub lobby: LobbyState,

    pub pending_roll: Option<PendingRoll>,
    pub pending_combat_queue: Vec<PendingCombatEntry>,
    pub pending_aoe: Option<PendingAoE>,

    pub knowledge: Knowledge,
    pub winner: Option<Player>,

    /// Sequential unit id allocator. Ids are never reused.
    next_unit_id: u32,
    /// Sequential roll id allocator.
    next_roll_id: u64,
}

impl GameState {
    /// Creates an empty lobby.
    pub fn new() -> Self {
        Self {
            phase: Phase::Lobby,
            units: BTreeMap::new(),
            turn: TurnState::default(),
            placement: PlacementState::default(),
            lobby: LobbyState::default(),
            pending_roll: None,
            pending_combat_queue: Vec::new(),
            pending_aoe: None,
            knowledge: Knowledge::default(),
            winner: None,
            next_unit_id: 1,
            next_roll_id: 1,
        }
    }

    pub fn unit(&self, id: UnitId) -> Option<&UnitState> {
        self.units.get(&id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut UnitState> {
        self.units.get_mut(&id)
    }

    /// Returns the unit only if it is alive.
    pub fn living_unit(&self, id: UnitId) -> Option<&UnitState> {
        self.units.get(&id).filter(|unit| unit.alive)
    }

    /// Returns the unit standing on `position`, if any.
    pub fn unit_at(&self, position: Position) -> Option<&UnitState> {
        self.units
            .values()
            .find(|unit| unit.alive && unit.position == Some(position))
    }

    pub fn is_occupied(&self, position: Position) -> bool {
        self.unit_at(position).is_some()
    }

    pub fn units_of(&self, player: Player) -> impl Iterator<Item = &UnitState> {
        self.units.values().filter(move |unit| unit.owner == player)
    }

    pub fn has_living_units(&self, player: Player) -> bool {
        self.units_of(player).any(|unit| unit.alive)
    }

    /// Whether `player` may see (and therefore target) `unit`.
    pub fn is_visible_to(&self, player: Player, unit: &UnitState) -> bool {
        unit.owner == player || !unit.stealthed || self.knowledge.knows(player, unit.id)
    }

    /// Allocates a new unique [`UnitId`].
    pub fn allocate_unit_id(&mut self) -> UnitId {
        let id = UnitId(self.next_unit_id);
        self.next_unit_id += 1;
        id
    }

    /// Allocates a new unique [`RollId`].
    pub fn allocate_roll_id(&mut self) -> RollId {
        let id = RollId(self.next_roll_id);
        self.next_roll_id += 1;
        id
    }

    /// True while an area effect or path attack is being resolved.
    pub fn is_resolving_queue(&self) -> bool {
        !self.pending_combat_queue.is_empty() || self.pending_aoe.is_some()
    }

    /// Drops all multi-target bookkeeping.
    pub fn clear_queues(&mut self) {
        self.pending_combat_queue.clear();
        self.pending_aoe = None;
    }

    /// SHA-256 over the bincode encoding of the full state.
    ///
    /// Two hosts that replay the same commands with the same dice arrive at
    /// the same digest.
    #[cfg(feature = "serde")]
    pub fn digest(&self) -> [u8; 32] {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        if let Ok(bytes) = bincode::serialize(self) {
            hasher.update(&bytes);
        }
        hasher.finalize().into()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sequential_and_never_reused() {
        let mut state = GameState::new();
        assert_eq!(state.allocate_unit_id(), UnitId(1));
        assert_eq!(state.allocate_unit_id(), UnitId(2));
        assert_eq!(state.allocate_roll_id(), RollId(1));
        assert_eq!(state.allocate_roll_id(), RollId(2));
    }

    #[test]
    fn stealthed_enemy_is_hidden_until_known() {
        let mut state = GameState::new();
        let mut unit = UnitState::new(UnitId(3), Player::Two, UnitClass::Assassin, 2, 2)
            .with_position(Position::new(4, 4));
        unit.stealthed = true;
        state.units.insert(unit.id, unit.clone());

        assert!(state.is_visible_to(Player::Two, &unit));
        assert!(!state.is_visible_to(Player::One, &unit));

        state.knowledge.set(Player::One, unit.id, true);
        assert!(state.is_visible_to(Player::One, &unit));
    }

    #[test]
    fn dead_units_do_not_occupy_cells() {
        let mut state = GameState::new();
        let mut unit = UnitState::new(UnitId(1), Player::One, UnitClass::Knight, 4, 1)
            .with_position(Position::new(2, 2));
        state.units.insert(unit.id, unit.clone());
        assert!(state.is_occupied(Position::new(2, 2)));

        unit.kill();
        state.units.insert(unit.id, unit);
        assert!(!state.is_occupied(Position::new(2, 2)));
        assert!(!state.has_living_units(Player::One));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn digest_tracks_state_changes() {
        let mut state = GameState::new();
        let before = hex::encode(state.digest());
        assert_eq!(before, hex::encode(state.clone().digest()));

        state.lobby.set_ready(Player::One, true);
        assert_ne!(before, hex::encode(state.digest()));
    }
}
