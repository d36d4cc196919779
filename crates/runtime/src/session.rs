//! Synchronous game session.
//!
//! A [`Session`] owns the authoritative [`GameState`], feeds commands through
//! the engine with host dice, and records what it accepted so the game can be
//! persisted and replayed.

use tactics_content::ContentFactory;
use tactics_core::{
    Command, GameError, GameEvent, GameState, RngOracle, ScriptedDice, Transition,
};
use tracing::{debug, info, info_span};

use crate::api::{Result, RuntimeError};
use crate::config::SessionConfig;
use crate::events::{Event, EventBus, GameStateEvent, TurnEvent};
use crate::oracle::{ContentBundle, RecordingRng, StdRngOracle};
use crate::repository::{ActionLogEntry, FileActionLog, FileStateRepository, StateRepository};

pub struct Session {
    content: ContentBundle,
    state: GameState,
    rng: Box<dyn RngOracle + Send>,
    nonce: u64,
    history: Vec<ActionLogEntry>,
    action_log: Option<FileActionLog>,
    snapshots: Option<Box<dyn StateRepository>>,
    event_bus: EventBus,
}

impl Session {
    /// Fresh lobby over `content`, rolling with `rng`.
    pub fn new(content: ContentBundle, rng: impl RngOracle + Send + 'static) -> Self {
        Self {
            content,
            state: GameState::new(),
            rng: Box::new(rng),
            nonce: 0,
            history: Vec::new(),
            action_log: None,
            snapshots: None,
            event_bus: EventBus::new(),
        }
    }

    /// Builds a session from host settings: content directory, seed, and the
    /// optional snapshot and log locations.
    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        let factory = match &config.data_dir {
            Some(dir) => ContentFactory::new(dir),
            None => ContentFactory::bundled(),
        };
        let content = ContentBundle::load(&factory)?;
        let rng = match config.seed {
            Some(seed) => StdRngOracle::seeded(seed),
            None => StdRngOracle::from_entropy(),
        };

        let mut session =
            Self::new(content, rng).with_event_bus(EventBus::with_capacity(config.event_buffer_size));
        if let Some(dir) = &config.snapshot_dir {
            session = session.with_snapshots(FileStateRepository::new(dir)?);
        }
        if let Some(path) = &config.action_log {
            session = session.with_action_log(FileActionLog::create(path)?);
        }

        info!(
            seed = ?config.seed,
            data_dir = %factory.data_dir().display(),
            "session created"
        );
        Ok(session)
    }

    #[must_use]
    pub fn with_state(mut self, state: GameState) -> Self {
        self.state = state;
        self
    }

    #[must_use]
    pub fn with_snapshots(mut self, repo: impl StateRepository + 'static) -> Self {
        self.snapshots = Some(Box::new(repo));
        self
    }

    #[must_use]
    pub fn with_action_log(mut self, log: FileActionLog) -> Self {
        self.action_log = Some(log);
        self
    }

    #[must_use]
    pub fn with_event_bus(mut self, event_bus: EventBus) -> Self {
        self.event_bus = event_bus;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn content(&self) -> &ContentBundle {
        &self.content
    }

    /// Number of commands accepted so far.
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn history(&self) -> &[ActionLogEntry] {
        &self.history
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Applies `command` to the session state.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::Rejected`] when the engine refuses the command; the
    /// state is unchanged. Log failures surface after the state has advanced.
    pub fn submit(&mut self, command: Command) -> Result<Transition> {
        let span = info_span!(
            "dispatch",
            nonce = self.nonce,
            player = %command.player,
            action = command.action.name(),
        );
        let _enter = span.enter();

        let engine = self.content.engine();
        let mut recorder = RecordingRng::new(self.rng.as_mut());
        let outcome = engine.try_dispatch(&self.state, &command, &mut recorder);
        let dice = recorder.into_faces();

        let transition = match outcome {
            Ok(transition) => transition,
            Err(error) => {
                debug!(code = error.error_code(), %error, "command rejected");
                self.event_bus
                    .publish(Event::GameState(GameStateEvent::ActionRejected {
                        nonce: self.nonce,
                        command,
                        code: error.error_code().to_string(),
                        reason: error.to_string(),
                    }));
                return Err(error.into());
            }
        };

        let before = self.state.phase;
        let after = transition.state.phase;
        if before != after {
            info!(from = %before, to = %after, "phase changed");
        }
        for event in &transition.events {
            if let GameEvent::GameEnded { winner } = event {
                info!(winner = %winner, "game ended");
            }
        }
        debug!(events = transition.events.len(), dice = ?dice, "command applied");

        let entry = ActionLogEntry {
            nonce: self.nonce,
            command,
            dice,
            digest: transition.state.digest(),
        };
        self.state = transition.state.clone();
        self.nonce += 1;
        self.publish(&entry, &transition.events);

        let logged = match self.action_log.as_mut() {
            Some(log) => log.append(&entry).map(|_| ()),
            None => Ok(()),
        };
        self.history.push(entry);
        logged?;

        Ok(transition)
    }

    fn publish(&self, entry: &ActionLogEntry, events: &[GameEvent]) {
        self.event_bus
            .publish(Event::GameState(GameStateEvent::ActionExecuted {
                nonce: entry.nonce,
                command: entry.command.clone(),
                events: events.to_vec(),
                digest: entry.digest,
            }));
        for turn in events.iter().filter_map(TurnEvent::from_game_event) {
            self.event_bus.publish(Event::Turn(turn));
        }
    }

    /// Stores the current state under the current nonce.
    pub fn snapshot(&self) -> Result<u64> {
        let repo = self
            .snapshots
            .as_ref()
            .ok_or(RuntimeError::SnapshotsDisabled)?;
        repo.save(self.nonce, &self.state)?;
        info!(
            nonce = self.nonce,
            digest = %hex::encode(self.state.digest()),
            "saved snapshot"
        );
        Ok(self.nonce)
    }

    /// Replaces the state with the snapshot stored at `nonce`.
    ///
    /// The in-memory history and the attached action log are both cut back to
    /// the commands before `nonce`, so the log keeps replaying.
    pub fn restore(&mut self, nonce: u64) -> Result<()> {
        let repo = self
            .snapshots
            .as_ref()
            .ok_or(RuntimeError::SnapshotsDisabled)?;
        let state = repo
            .load(nonce)?
            .ok_or(RuntimeError::SnapshotNotFound(nonce))?;

        let dropped = match self.action_log.as_mut() {
            Some(log) => log.truncate_from(nonce)?,
            None => 0,
        };

        self.state = state;
        self.nonce = nonce;
        self.history.retain(|entry| entry.nonce < nonce);
        info!(nonce, phase = %self.state.phase, dropped, "restored snapshot");
        Ok(())
    }
}

/// Re-applies logged commands from a fresh lobby with their recorded dice,
/// checking each resulting digest.
///
/// # Errors
///
/// [`RuntimeError::ReplayDiverged`] at the first entry whose digest does not
/// match, or [`RuntimeError::Rejected`] if the engine refuses a logged command.
pub fn replay(content: &ContentBundle, entries: &[ActionLogEntry]) -> Result<GameState> {
    let engine = content.engine();
    let mut state = GameState::new();

    for entry in entries {
        let mut dice = ScriptedDice::new(entry.dice.iter().copied());
        let transition = engine.try_dispatch(&state, &entry.command, &mut dice)?;
        let digest = transition.state.digest();
        if digest != entry.digest {
            return Err(RuntimeError::ReplayDiverged {
                nonce: entry.nonce,
                expected: entry.digest_hex(),
                actual: hex::encode(digest),
            });
        }
        state = transition.state;
    }

    debug!(entries = entries.len(), "replay verified");
    Ok(state)
}
