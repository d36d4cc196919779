//! Activated class and hero abilities.
//!
//! Each active ability is a handler registered under its [`AbilityId`]. The
//! shared preconditions (ownership, charges, slots) live in [`use_ability`];
//! a handler only validates its own payload and runs the effect. Passive
//! abilities (`berserker_rage`, `watch`) carry charges but have no handler:
//! combat and the reactive hooks consume them.

pub mod ember_mage;
pub mod rider;
pub mod trickster;
pub mod warden;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::action::guard::{acting_unit, ensure_slots};
use crate::action::{AbilityPayload, ActionError};
use crate::engine::ActionContext;
use crate::state::{AbilityId, GameEvent, Player, UnitId, spend_slots};

/// Effect body of one active ability.
pub trait AbilityHandler: Send + Sync {
    /// Validates the payload and applies the effect.
    ///
    /// Slots and charges have already been spent on the context when this
    /// runs; returning an error discards the whole context.
    fn try_use(
        &self,
        ctx: &mut ActionContext<'_>,
        unit: UnitId,
        payload: &AbilityPayload,
    ) -> Result<(), ActionError>;
}

/// Lookup table from ability id to handler.
#[derive(Clone, Default)]
pub struct AbilityRegistry {
    handlers: BTreeMap<AbilityId, Arc<dyn AbilityHandler>>,
}

impl AbilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in active ability.
    pub fn standard() -> Self {
        Self::new()
            .with(AbilityId::RiderCharge, rider::ChargeHandler)
            .with(AbilityId::TricksterBurst, trickster::BurstHandler)
            .with(AbilityId::Fireball, ember_mage::FireballHandler)
            .with(AbilityId::Shove, warden::ShoveHandler)
            .with(AbilityId::Shelter, warden::ShelterHandler)
    }

    #[must_use]
    pub fn with(mut self, ability: AbilityId, handler: impl AbilityHandler + 'static) -> Self {
        self.register(ability, Arc::new(handler));
        self
    }

    pub fn register(&mut self, ability: AbilityId, handler: Arc<dyn AbilityHandler>) {
        self.handlers.insert(ability, handler);
    }

    pub fn get(&self, ability: AbilityId) -> Option<&Arc<dyn AbilityHandler>> {
        self.handlers.get(&ability)
    }

    pub fn contains(&self, ability: AbilityId) -> bool {
        self.handlers.contains_key(&ability)
    }
}

impl fmt::Debug for AbilityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}

/// Validates the shared preconditions, spends the cost, then runs the handler.
pub(crate) fn use_ability(
    ctx: &mut ActionContext<'_>,
    registry: &AbilityRegistry,
    player: Player,
    id: UnitId,
    ability: AbilityId,
    payload: &AbilityPayload,
) -> Result<(), ActionError> {
    let unit = acting_unit(&ctx.state, player, id)?;
    if !ctx.env().has_ability(unit, ability) {
        return Err(ActionError::AbilityNotOwned { unit: id, ability });
    }
    let spec = ctx
        .catalog()
        .ability(ability)
        .ok_or(ActionError::UnknownAbility(ability))?;
    if spec.passive {
        return Err(ActionError::PassiveAbility(ability));
    }
    let handler = registry
        .get(ability)
        .cloned()
        .ok_or(ActionError::UnknownAbility(ability))?;

    let cost = spec.charges.map_or(0, |charges| charges.cost);
    let available = unit.charges(ability);
    if available < cost {
        return Err(ActionError::NotEnoughCharges {
            ability,
            needed: cost,
            available,
        });
    }
    ensure_slots(unit, spec.slots)?;

    let slots = spec.slots;
    if let Some(unit) = ctx.state.unit_mut(id) {
        spend_slots(unit, slots);
    }
    if spec.charges.is_some() {
        set_charges(ctx, id, ability, available - cost);
    }
    handler.try_use(ctx, id, payload)
}

/// Overwrites a charge count, emitting `ChargesUpdated` only when it changes.
pub(crate) fn set_charges(ctx: &mut ActionContext<'_>, id: UnitId, ability: AbilityId, value: u32) {
    let Some(unit) = ctx.state.unit_mut(id) else {
        return;
    };
    if unit.charges(ability) == value && unit.charges.contains_key(&ability) {
        return;
    }
    unit.charges.insert(ability, value);
    ctx.emit(GameEvent::ChargesUpdated {
        unit: id,
        ability,
        charges: value,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_has_no_passives() {
        let registry = AbilityRegistry::standard();
        assert!(registry.contains(AbilityId::RiderCharge));
        assert!(registry.contains(AbilityId::Shelter));
        assert!(!registry.contains(AbilityId::BerserkerRage));
        assert!(!registry.contains(AbilityId::Watch));
    }
}
