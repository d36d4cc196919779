#![allow(dead_code)]

use tactics_core::{
    Action, CatalogOracle, CatalogSnapshot, Command, GameConfig, GameEngine, GameEnv, GameEvent,
    GameState, Phase, Player, Position, ResolveRoll, RollChoice, RollKind, ScriptedDice,
    Transition, UnitId, UnitSpec, UnitState,
};

/// Catalog and config a test engine borrows from.
pub struct Table {
    pub catalog: CatalogSnapshot,
    pub config: GameConfig,
}

impl Table {
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    pub fn with_config(config: GameConfig) -> Self {
        Self {
            catalog: CatalogSnapshot::standard(),
            config,
        }
    }

    pub fn engine(&self) -> GameEngine<'_> {
        GameEngine::new(GameEnv::new(&self.catalog, &self.config))
    }

    /// Puts a unit straight onto the board, stats and charges from the catalog.
    pub fn spawn(
        &self,
        state: &mut GameState,
        owner: Player,
        spec: UnitSpec,
        x: i32,
        y: i32,
    ) -> UnitId {
        let profile = self.catalog.class(spec.class).expect("class profile");
        let (mut hp, mut attack) = (profile.hp, profile.attack);
        if let Some(hero) = spec.hero.as_ref().and_then(|hero| self.catalog.hero(hero)) {
            hp = hero.hp.unwrap_or(hp);
            attack = hero.attack.unwrap_or(attack);
        }

        let id = state.allocate_unit_id();
        let mut unit =
            UnitState::new(id, owner, spec.class, hp, attack).with_position(Position::new(x, y));
        if let Some(hero) = spec.hero.clone() {
            unit = unit.with_hero(hero);
        }
        for ability in self.catalog.abilities_of(spec.class, spec.hero.as_ref()) {
            if let Some(charges) = self.catalog.charge_spec(ability) {
                unit = unit.with_charges(ability, charges.initial);
            }
        }
        state.units.insert(id, unit);
        id
    }
}

/// Switches a hand-built state into battle with `order` as the turn queue.
pub fn begin_battle(state: &mut GameState, order: &[UnitId]) {
    state.phase = Phase::Battle;
    state.placement.order = order.to_vec();
    state.turn.queue = order.to_vec();
    state.turn.index = 0;
    state.turn.round = 1;
}

/// Dispatches and panics with the rejection reason if refused.
pub fn act(
    engine: &GameEngine<'_>,
    state: &GameState,
    player: Player,
    action: Action,
    dice: &[u8],
) -> Transition {
    let mut rng = ScriptedDice::new(dice.iter().copied());
    match engine.try_dispatch(state, &Command::new(player, action), &mut rng) {
        Ok(transition) => transition,
        Err(error) => panic!("command rejected: {error}"),
    }
}

/// Resolves the pending roll as the player it is addressed to.
pub fn resolve(
    engine: &GameEngine<'_>,
    state: &GameState,
    dice: &[u8],
    choice: Option<RollChoice>,
) -> Transition {
    let pending = state.pending_roll.as_ref().expect("a pending roll");
    let mut resolve = ResolveRoll::new(pending.id, pending.player);
    if let Some(choice) = choice {
        resolve = resolve.with_choice(choice);
    }
    act(
        engine,
        state,
        pending.player,
        Action::ResolvePendingRoll(resolve),
        dice,
    )
}

/// Activates `unit` as its owner.
pub fn start_turn(engine: &GameEngine<'_>, state: &GameState, unit: UnitId) -> GameState {
    let owner = state.unit(unit).expect("unit").owner;
    act(engine, state, owner, Action::UnitStartTurn { unit }, &[])
        .state
}

pub fn pending_kind(state: &GameState) -> Option<RollKind> {
    state.pending_roll.as_ref().map(|pending| pending.kind())
}

pub fn count<F: Fn(&GameEvent) -> bool>(events: &[GameEvent], predicate: F) -> usize {
    events.iter().filter(|event| predicate(event)).count()
}

pub fn position_of<F: Fn(&GameEvent) -> bool>(events: &[GameEvent], predicate: F) -> usize {
    events
        .iter()
        .position(|event| predicate(event))
        .expect("event present")
}
