//! Lobby: arena choice, rosters, readiness, and game start.

use crate::config::GameConfig;
use crate::engine::ActionContext;
use crate::roll::begin_initiative;
use crate::state::{GameEvent, Phase, Player, UnitState};

use super::{ActionError, UnitSpec};

pub(crate) fn choose_arena(ctx: &mut ActionContext<'_>, arena: &str) -> Result<(), ActionError> {
    let arena = arena.trim();
    if arena.is_empty() {
        return Err(ActionError::EmptyArena);
    }
    ctx.state.lobby.arena = Some(arena.to_owned());
    ctx.emit(GameEvent::ArenaChosen {
        arena: arena.to_owned(),
    });
    Ok(())
}

/// Creates the player's seven units from catalog profiles.
pub(crate) fn lobby_init(
    ctx: &mut ActionContext<'_>,
    player: Player,
    roster: &[UnitSpec],
) -> Result<(), ActionError> {
    if ctx.state.units_of(player).next().is_some() {
        return Err(ActionError::RosterAlreadySubmitted(player));
    }
    if roster.len() != GameConfig::UNITS_PER_SIDE {
        return Err(ActionError::RosterSize {
            expected: GameConfig::UNITS_PER_SIDE,
            found: roster.len(),
        });
    }

    let catalog = ctx.catalog();
    let mut units = Vec::with_capacity(roster.len());
    for spec in roster {
        let profile = catalog
            .class(spec.class)
            .ok_or(ActionError::MissingProfile(spec.class))?;
        let (mut hp, mut attack) = (profile.hp, profile.attack);

        if let Some(hero) = &spec.hero {
            let hero_profile = catalog
                .hero(hero)
                .ok_or_else(|| ActionError::UnknownHero(hero.clone()))?;
            if hero_profile.base != spec.class {
                return Err(ActionError::HeroClassMismatch {
                    hero: hero.clone(),
                    base: hero_profile.base,
                    class: spec.class,
                });
            }
            hp = hero_profile.hp.unwrap_or(hp);
            attack = hero_profile.attack.unwrap_or(attack);
        }

        let id = ctx.state.allocate_unit_id();
        let mut unit = UnitState::new(id, player, spec.class, hp, attack);
        if let Some(hero) = &spec.hero {
            unit = unit.with_hero(hero.clone());
        }
        for ability in catalog.abilities_of(spec.class, spec.hero.as_ref()) {
            if let Some(charges) = catalog.charge_spec(ability) {
                unit = unit.with_charges(ability, charges.initial);
            }
        }
        units.push(unit);
    }

    let ids = units.iter().map(|unit| unit.id).collect();
    for unit in units {
        ctx.state.units.insert(unit.id, unit);
    }
    ctx.emit(GameEvent::LobbyInitialized { player, units: ids });
    Ok(())
}

pub(crate) fn set_ready(
    ctx: &mut ActionContext<'_>,
    player: Player,
    ready: bool,
) -> Result<(), ActionError> {
    if ready && ctx.state.units_of(player).next().is_none() {
        return Err(ActionError::RosterMissing(player));
    }
    ctx.state.lobby.set_ready(player, ready);
    ctx.emit(GameEvent::PlayerReady { player, ready });
    Ok(())
}

/// Moves to placement and immediately asks Player One for initiative.
pub(crate) fn start_game(ctx: &mut ActionContext<'_>) -> Result<(), ActionError> {
    if !ctx.state.lobby.both_ready() {
        return Err(ActionError::PlayersNotReady);
    }
    for player in Player::ALL {
        if ctx.state.units_of(player).next().is_none() {
            return Err(ActionError::RosterMissing(player));
        }
    }

    ctx.state.phase = Phase::Placement;
    ctx.emit(GameEvent::GameStarted);
    begin_initiative(ctx);
    Ok(())
}
