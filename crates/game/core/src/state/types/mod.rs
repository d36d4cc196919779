pub mod common;
pub mod economy;
pub mod knowledge;
pub mod pending;
pub mod turn;
pub mod unit;

pub use common::{Player, Position, RollId, UnitId};
pub use economy::{TurnSlots, can_spend_slots, reset_turn_economy, spend_slots};
pub use knowledge::Knowledge;
pub use pending::{
    CombatFlags, DuelContext, DuelSource, InitiativeContext, PendingAoE, PendingCombatEntry,
    PendingRoll, QueueContext, QueueMode, RollContext, RollKind, SearchContext, ShoveContext,
    TargetStage,
};
pub use turn::{LobbyState, Phase, PlacementState, TurnState};
pub use unit::{AbilityId, HeroId, UnitClass, UnitState};
