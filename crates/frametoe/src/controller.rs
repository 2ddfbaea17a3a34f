//! Event-driven controller around a single session.
//!
//! The controller owns the [`Session`] and the timers around it: the
//! opponent's delayed reply and the countdown tick. Timers run as spawned
//! tasks that post [`Scheduled`] events back to the controller. Every
//! event carries the generation it was scheduled in; the generation moves
//! on with each new session and each terminal transition, so a timer that
//! outlives its game is dropped on arrival.

use crate::collaborators::{IdentityProvider, Notifier, PlayerId, ResultsRecorder};
use crate::config::GameConfig;
use frametoe_engine::{
    Board, Difficulty, EngineError, EngineMisuseError, InvalidMoveError, Outcome, Position,
    Session, SessionSnapshot, Side, Skin,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// Shortest countdown period the clock accepts.
pub const MIN_TICK_PERIOD: Duration = Duration::from_millis(1);

/// Messages sent from the controller to the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A new session began; the opponent has opened.
    SessionStarted(SessionSnapshot),
    /// A marker was placed.
    MoveMade {
        /// Who moved.
        side: Side,
        /// Where.
        position: Position,
        /// Board after the move.
        board: Board,
    },
    /// A human move was refused.
    MoveRejected(InvalidMoveError),
    /// The countdown advanced.
    CountdownTick {
        /// Units left.
        remaining: u32,
    },
    /// The session finished.
    GameOver {
        /// How it ended.
        outcome: Outcome,
    },
    /// The session was dropped.
    SessionClosed,
}

/// Commands accepted by [`GameController::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    /// Start a session, replacing any current one.
    Start {
        /// Opponent strength.
        difficulty: Difficulty,
        /// Human's marker skin.
        skin: Skin,
    },
    /// Place the human's marker at a cell index.
    Move(usize),
    /// New session after a finished one.
    PlayAgain,
    /// Restart the current session from scratch.
    Reset,
    /// Drop the session.
    ReturnToMenu,
    /// Stop the loop.
    Quit,
}

/// Timer events posted back to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheduled {
    /// The opponent's delayed reply is due.
    OpponentReply {
        /// Generation the reply was scheduled in.
        generation: u64,
    },
    /// One countdown period elapsed.
    Tick {
        /// Generation the clock was started in.
        generation: u64,
    },
}

impl Scheduled {
    fn generation(&self) -> u64 {
        match self {
            Scheduled::OpponentReply { generation } | Scheduled::Tick { generation } => *generation,
        }
    }
}

/// The three outside collaborators.
#[derive(Clone, derive_new::new)]
pub struct Collaborators {
    identity: Arc<dyn IdentityProvider>,
    recorder: Arc<dyn ResultsRecorder>,
    notifier: Arc<dyn Notifier>,
}

/// Owns one session at a time and drives its timers.
pub struct GameController {
    session: Option<Session>,
    rng: StdRng,
    reply_delay: Duration,
    tick_period: Duration,
    collaborators: Collaborators,
    identity: Option<PlayerId>,
    generation: u64,
    scheduled_tx: mpsc::UnboundedSender<Scheduled>,
    scheduled_rx: mpsc::UnboundedReceiver<Scheduled>,
    reply_token: CancellationToken,
    clock_token: CancellationToken,
    reports: JoinSet<()>,
    events: mpsc::UnboundedSender<GameEvent>,
}

impl GameController {
    /// Creates a controller with no session.
    ///
    /// A tick period below [`MIN_TICK_PERIOD`] is raised to it.
    #[instrument(skip_all, fields(seed = ?config.seed()))]
    pub fn new(
        config: &GameConfig,
        collaborators: Collaborators,
        events: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        let rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(*seed),
            None => StdRng::from_os_rng(),
        };
        let (scheduled_tx, scheduled_rx) = mpsc::unbounded_channel();
        let mut tick_period = config.tick_period();
        if tick_period < MIN_TICK_PERIOD {
            warn!(?tick_period, "Tick period too short, using the minimum");
            tick_period = MIN_TICK_PERIOD;
        }
        Self {
            session: None,
            rng,
            reply_delay: config.reply_delay(),
            tick_period,
            collaborators,
            identity: None,
            generation: 0,
            scheduled_tx,
            scheduled_rx,
            reply_token: CancellationToken::new(),
            clock_token: CancellationToken::new(),
            reports: JoinSet::new(),
            events,
        }
    }

    /// Starts a new session, replacing any current one.
    ///
    /// The player's identity is looked up until a lookup yields one; a
    /// failed or empty lookup leaves this game anonymous and is retried on
    /// the next start.
    #[instrument(skip(self))]
    pub async fn start(
        &mut self,
        difficulty: Difficulty,
        skin: Skin,
    ) -> Result<SessionSnapshot, EngineMisuseError> {
        self.resolve_identity().await;
        let session = Session::started(difficulty, skin, &mut self.rng)?;
        Ok(self.install(session))
    }

    /// Places the human's marker and schedules whatever follows.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn apply_human_move(&mut self, index: usize) -> Result<SessionSnapshot, EngineError> {
        let session = self.session.as_mut().ok_or(EngineMisuseError::NoSession)?;
        let clock_was_running = session.countdown().is_running();

        let snapshot = match session.apply_human_move(index) {
            Ok(snapshot) => snapshot,
            Err(EngineError::InvalidMove(reason)) => {
                self.emit(GameEvent::MoveRejected(reason));
                return Err(reason.into());
            }
            Err(e) => return Err(e),
        };

        self.emit_last_move(&snapshot);

        if let Some(outcome) = snapshot.outcome() {
            self.finish(outcome, snapshot.difficulty);
            return Ok(snapshot);
        }
        if !clock_was_running && snapshot.countdown_running {
            self.start_clock();
        }
        self.schedule_reply();
        Ok(snapshot)
    }

    /// Replaces a finished session with a fresh one.
    #[instrument(skip(self))]
    pub fn play_again(&mut self) -> Result<SessionSnapshot, EngineMisuseError> {
        let session = self.session.as_ref().ok_or(EngineMisuseError::NoSession)?;
        let fresh = session.play_again(&mut self.rng)?;
        Ok(self.install(fresh))
    }

    /// Restarts from any phase with the current difficulty and skin.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> Result<SessionSnapshot, EngineMisuseError> {
        let session = self.session.as_ref().ok_or(EngineMisuseError::NoSession)?;
        let fresh = Session::started(session.difficulty(), session.skin(), &mut self.rng)?;
        info!("Session reset");
        Ok(self.install(fresh))
    }

    /// Drops the session and cancels its timers.
    #[instrument(skip(self))]
    pub fn return_to_menu(&mut self) {
        self.advance_generation();
        if self.session.take().is_some() {
            info!("Returned to menu");
            self.emit(GameEvent::SessionClosed);
        }
    }

    /// Adopts an existing session, e.g. one rebuilt with [`Session::replay`].
    ///
    /// Timers are armed to match its state: the clock if it is running, the
    /// reply if the opponent is to move.
    #[instrument(skip(self, session), fields(phase = %session.phase()))]
    pub async fn resume(&mut self, session: Session) -> SessionSnapshot {
        self.resolve_identity().await;
        let snapshot = self.install(session);
        if snapshot.countdown_running {
            self.start_clock();
        }
        if self.session.as_ref().is_some_and(Session::awaiting_opponent) {
            self.schedule_reply();
        }
        snapshot
    }

    /// Read-only view of the current session.
    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.session.as_ref().map(Session::snapshot)
    }

    /// Current generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Waits for the next timer event.
    pub async fn next_scheduled(&mut self) -> Option<Scheduled> {
        self.scheduled_rx.recv().await
    }

    /// Applies a timer event if it still belongs to the live session.
    ///
    /// Returns `Ok(None)` for stale or cancelled events.
    #[instrument(skip(self), fields(current = self.generation))]
    pub fn handle_scheduled(
        &mut self,
        event: Scheduled,
    ) -> Result<Option<SessionSnapshot>, EngineMisuseError> {
        if event.generation() != self.generation {
            debug!("Ignoring stale scheduled event");
            return Ok(None);
        }
        let Some(session) = self.session.as_mut() else {
            debug!("Ignoring scheduled event without a session");
            return Ok(None);
        };

        let snapshot = match event {
            Scheduled::OpponentReply { .. } => {
                if self.reply_token.is_cancelled() || !session.awaiting_opponent() {
                    debug!("Ignoring opponent reply");
                    return Ok(None);
                }
                let snapshot = session.apply_opponent_move(&mut self.rng)?;
                self.emit_last_move(&snapshot);
                snapshot
            }
            Scheduled::Tick { .. } => {
                if self.clock_token.is_cancelled() || !session.countdown().is_running() {
                    debug!("Ignoring countdown tick");
                    return Ok(None);
                }
                let snapshot = session.tick();
                self.emit(GameEvent::CountdownTick {
                    remaining: snapshot.countdown_remaining,
                });
                snapshot
            }
        };

        if let Some(outcome) = snapshot.outcome() {
            self.finish(outcome, snapshot.difficulty);
        }
        Ok(Some(snapshot))
    }

    /// Waits for and applies the next live timer event, skipping stale ones.
    ///
    /// Returns `Ok(None)` without waiting when no timer is armed: no
    /// session, a finished one, or the human to move with the clock idle.
    pub async fn pump(&mut self) -> Result<Option<SessionSnapshot>, EngineMisuseError> {
        while self.timers_armed() {
            let Some(event) = self.next_scheduled().await else {
                break;
            };
            if let Some(snapshot) = self.handle_scheduled(event)? {
                return Ok(Some(snapshot));
            }
        }
        Ok(None)
    }

    fn timers_armed(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.countdown().is_running() || s.awaiting_opponent())
    }

    /// Runs until [`ControlCommand::Quit`] or the command channel closes.
    ///
    /// Invalid moves are reported as [`GameEvent::MoveRejected`] and other
    /// refused commands are logged; neither stops the loop.
    #[instrument(skip_all)]
    pub async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<ControlCommand>,
    ) -> Result<(), EngineMisuseError> {
        info!("Controller loop started");
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    None | Some(ControlCommand::Quit) => break,
                    Some(command) => self.handle_command(command).await,
                },
                Some(event) = self.scheduled_rx.recv() => {
                    self.handle_scheduled(event)?;
                }
            }
        }

        self.return_to_menu();
        self.flush_reports().await;
        info!("Controller loop stopped");
        Ok(())
    }

    async fn handle_command(&mut self, command: ControlCommand) {
        let result = match command {
            ControlCommand::Start { difficulty, skin } => {
                self.start(difficulty, skin).await.map(|_| ()).map_err(EngineError::from)
            }
            ControlCommand::Move(index) => self.apply_human_move(index).map(|_| ()),
            ControlCommand::PlayAgain => self.play_again().map(|_| ()).map_err(EngineError::from),
            ControlCommand::Reset => self.reset().map(|_| ()).map_err(EngineError::from),
            ControlCommand::ReturnToMenu => {
                self.return_to_menu();
                Ok(())
            }
            ControlCommand::Quit => Ok(()),
        };
        match result {
            Ok(()) | Err(EngineError::InvalidMove(_)) => {}
            Err(e) => warn!(?command, error = %e, "Command refused"),
        }
    }

    /// Waits for outstanding outcome reports.
    #[instrument(skip(self), fields(pending = self.reports.len()))]
    pub async fn flush_reports(&mut self) {
        while let Some(joined) = self.reports.join_next().await {
            if let Err(e) = joined {
                warn!(error = %e, "Outcome report task failed");
            }
        }
    }

    async fn resolve_identity(&mut self) {
        if self.identity.is_some() {
            return;
        }
        match self.collaborators.identity.player_identity().await {
            Ok(Some(identity)) => {
                debug!(%identity, "Identity resolved");
                self.identity = Some(identity);
            }
            Ok(None) => debug!("No identity yet, playing anonymously"),
            Err(e) => warn!(error = %e, "Identity lookup failed, playing anonymously"),
        }
    }

    fn install(&mut self, session: Session) -> SessionSnapshot {
        self.advance_generation();
        let snapshot = session.snapshot();
        self.session = Some(session);
        self.emit(GameEvent::SessionStarted(snapshot.clone()));
        if let Some(opening) = snapshot.last_move() {
            self.emit(GameEvent::MoveMade {
                side: opening.side,
                position: opening.position,
                board: snapshot.board,
            });
        }
        snapshot
    }

    /// Cancels both timers and moves to a new generation.
    fn advance_generation(&mut self) {
        self.reply_token.cancel();
        self.clock_token.cancel();
        self.reply_token = CancellationToken::new();
        self.clock_token = CancellationToken::new();
        self.generation += 1;
        debug!(generation = self.generation, "Generation advanced");
    }

    fn schedule_reply(&self) {
        let token = self.reply_token.clone();
        let tx = self.scheduled_tx.clone();
        let delay = self.reply_delay;
        let event = Scheduled::OpponentReply {
            generation: self.generation,
        };
        debug!(?delay, "Scheduling opponent reply");
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    if tx.send(event).is_err() {
                        debug!("Controller dropped before opponent reply");
                    }
                }
            }
        });
    }

    fn start_clock(&self) {
        let token = self.clock_token.clone();
        let tx = self.scheduled_tx.clone();
        let period = self.tick_period;
        let generation = self.generation;
        debug!(?period, "Starting countdown clock");
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {
                        if tx.send(Scheduled::Tick { generation }).is_err() {
                            break;
                        }
                    }
                }
            }
        });
    }

    fn finish(&mut self, outcome: Outcome, difficulty: Difficulty) {
        self.advance_generation();
        info!(%outcome, "Game over");
        self.emit(GameEvent::GameOver { outcome });
        self.report(outcome, difficulty);
    }

    fn report(&mut self, outcome: Outcome, difficulty: Difficulty) {
        let Some(identity) = self.identity.clone() else {
            debug!("No identity, outcome not reported");
            return;
        };
        let recorder = Arc::clone(&self.collaborators.recorder);
        let notifier = Arc::clone(&self.collaborators.notifier);
        self.reports.spawn(async move {
            if let Err(e) = recorder.record_outcome(&identity, outcome, difficulty).await {
                warn!(error = %e, "Failed to record outcome");
            }
            if let Err(e) = notifier.notify(&identity, outcome).await {
                warn!(error = %e, "Failed to send notification");
            }
        });
    }

    fn emit_last_move(&self, snapshot: &SessionSnapshot) {
        if let Some(mv) = snapshot.last_move() {
            self.emit(GameEvent::MoveMade {
                side: mv.side,
                position: mv.position,
                board: snapshot.board,
            });
        }
    }

    fn emit(&self, event: GameEvent) {
        if self.events.send(event).is_err() {
            debug!("Event receiver dropped");
        }
    }
}
