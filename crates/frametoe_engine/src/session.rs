//! Turn/session state machine.
//!
//! A [`Session`] is one play-through. It moves through
//! `NotStarted -> InProgress -> Terminal(outcome)` and never leaves
//! `Terminal`; playing again builds a new session. The engine holds no
//! state between calls: the caller owns the session and drives it.
//!
//! The opponent's reply is not applied inside [`Session::apply_human_move`].
//! The caller schedules [`Session::apply_opponent_move`] so the human's
//! placement can be shown first.

use crate::action::{EngineError, EngineMisuseError, Move};
use crate::contracts::check_human_move;
#[cfg(debug_assertions)]
use crate::contracts::{Contract, PlacementContract};
use crate::countdown::Countdown;
use crate::opponent::{opening_move, select_move};
use crate::phases::{Outcome, Phase};
use crate::rules::evaluate;
use crate::snapshot::SessionSnapshot;
use crate::types::{Board, Cell, Difficulty, Side, Skin};
use rand::Rng;
use tracing::{debug, info, instrument, warn};

/// One game from opening move to outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub(crate) board: Board,
    pub(crate) turn: Side,
    pub(crate) difficulty: Difficulty,
    pub(crate) skin: Skin,
    pub(crate) countdown: Countdown,
    pub(crate) phase: Phase,
    pub(crate) history: Vec<Move>,
}

impl Session {
    /// Creates an inert session waiting for [`Session::start`].
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Side::Opponent,
            difficulty: Difficulty::default(),
            skin: Skin::default(),
            countdown: Countdown::new(),
            phase: Phase::NotStarted,
            history: Vec::new(),
        }
    }

    /// Creates a session and starts it in one step.
    ///
    /// # Errors
    ///
    /// Only fails if the opening move cannot be placed, which an empty
    /// board rules out.
    #[instrument(skip(rng))]
    pub fn started<R: Rng + ?Sized>(
        difficulty: Difficulty,
        skin: Skin,
        rng: &mut R,
    ) -> Result<Self, EngineMisuseError> {
        let mut session = Self::new();
        session.begin(difficulty, skin, rng)?;
        Ok(session)
    }

    /// Starts the session: empty board, opponent places its opening marker
    /// on a random cell, then the human is to move.
    ///
    /// The countdown stays idle until the human's first move.
    ///
    /// # Errors
    ///
    /// Returns [`EngineMisuseError::AlreadyStarted`] unless the session is
    /// `NotStarted`.
    #[instrument(skip(self, rng), fields(phase = %self.phase))]
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        difficulty: Difficulty,
        skin: Skin,
        rng: &mut R,
    ) -> Result<SessionSnapshot, EngineMisuseError> {
        if self.phase != Phase::NotStarted {
            warn!("Start called on a session that already started");
            return Err(EngineMisuseError::AlreadyStarted);
        }
        self.begin(difficulty, skin, rng)?;
        Ok(self.snapshot())
    }

    fn begin<R: Rng + ?Sized>(
        &mut self,
        difficulty: Difficulty,
        skin: Skin,
        rng: &mut R,
    ) -> Result<(), EngineMisuseError> {
        self.board = Board::new();
        self.history.clear();
        self.countdown = Countdown::new();
        self.difficulty = difficulty;
        self.skin = skin;
        self.turn = Side::Opponent;
        self.phase = Phase::InProgress;

        let opening = opening_move(&self.board, rng)?;
        info!(%difficulty, %skin, opening = %opening, "Session started");
        self.place(Move::opponent(opening))
    }

    /// Places the human's marker at `index`.
    ///
    /// The first human move of a session starts the countdown. If the
    /// move ends the game the session becomes terminal and the countdown
    /// stops; otherwise the opponent is to move.
    ///
    /// # Errors
    ///
    /// - [`EngineError::Misuse`] if the session is not in progress.
    /// - [`EngineError::InvalidMove`] if the move fails validation.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn apply_human_move(&mut self, index: usize) -> Result<SessionSnapshot, EngineError> {
        match self.phase {
            Phase::NotStarted => return Err(EngineMisuseError::NotStarted.into()),
            Phase::Terminal(_) => return Err(EngineMisuseError::NotInProgress.into()),
            Phase::InProgress => {}
        }

        let position = check_human_move(self, index).inspect_err(|e| {
            warn!(index, error = %e, "Rejected human move");
        })?;

        if !self.countdown.is_running() {
            debug!("First human move, starting countdown");
            self.countdown.start();
        }
        self.place(Move::human(position))?;
        Ok(self.snapshot())
    }

    /// Lets the opponent choose and place its marker.
    ///
    /// # Errors
    ///
    /// Returns [`EngineMisuseError`] unless the session is in progress with
    /// the opponent to move.
    #[instrument(skip(self, rng), fields(phase = %self.phase, turn = %self.turn))]
    pub fn apply_opponent_move<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<SessionSnapshot, EngineMisuseError> {
        match self.phase {
            Phase::NotStarted => return Err(EngineMisuseError::NotStarted),
            Phase::Terminal(_) => return Err(EngineMisuseError::NotInProgress),
            Phase::InProgress => {}
        }
        if self.turn != Side::Opponent {
            return Err(EngineMisuseError::NotOpponentsTurn);
        }

        let position = select_move(&self.board, self.difficulty, self.skin, rng)?;
        self.place(Move::opponent(position))?;
        Ok(self.snapshot())
    }

    /// Advances the countdown by one unit.
    ///
    /// Only counts while the session is in progress and the countdown has
    /// been started. Reaching zero ends the session as
    /// [`Outcome::TimedOut`] whichever side is to move. A no-op in every
    /// other state.
    #[instrument(skip(self), fields(remaining = self.countdown.remaining()))]
    pub fn tick(&mut self) -> SessionSnapshot {
        if self.phase == Phase::InProgress && self.countdown.is_running() {
            let remaining = self.countdown.tick();
            debug!(remaining, "Countdown tick");
            if remaining == 0 {
                self.finish(Outcome::TimedOut);
            }
        }
        self.snapshot()
    }

    /// Builds a brand new started session with the same skin and
    /// difficulty.
    ///
    /// # Errors
    ///
    /// Returns [`EngineMisuseError::NotTerminal`] unless this session has
    /// finished.
    #[instrument(skip(self, rng), fields(phase = %self.phase))]
    pub fn play_again<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Session, EngineMisuseError> {
        if !self.phase.is_terminal() {
            return Err(EngineMisuseError::NotTerminal);
        }
        Session::started(self.difficulty, self.skin, rng)
    }

    /// Rebuilds a session from a move history.
    ///
    /// The history must open with the opponent and alternate. Human moves
    /// pass through the same validation as live play, so the countdown is
    /// running after the first one.
    ///
    /// # Errors
    ///
    /// Returns [`EngineMisuseError::InvalidReplay`] for out-of-turn moves,
    /// occupied cells, or moves after the game ended, and any error a live
    /// human move would raise.
    #[instrument(skip(moves), fields(move_count = moves.len()))]
    pub fn replay(
        difficulty: Difficulty,
        skin: Skin,
        moves: &[Move],
    ) -> Result<Session, EngineError> {
        if moves.first().map(|mv| mv.side) != Some(Side::Opponent) {
            return Err(EngineMisuseError::InvalidReplay(
                "history must open with the opponent's move".to_string(),
            )
            .into());
        }

        let mut session = Self::new();
        session.difficulty = difficulty;
        session.skin = skin;
        session.phase = Phase::InProgress;

        for (index, mv) in moves.iter().enumerate() {
            if session.phase.is_terminal() {
                return Err(EngineMisuseError::InvalidReplay(format!(
                    "move {} played after the game ended",
                    index
                ))
                .into());
            }
            if mv.side != session.turn {
                return Err(EngineMisuseError::InvalidReplay(format!(
                    "move {} is out of turn ({} to move)",
                    index, session.turn
                ))
                .into());
            }

            match mv.side {
                Side::Human => {
                    session.apply_human_move(mv.position.to_index())?;
                }
                Side::Opponent => {
                    if !session.board.is_empty(mv.position) {
                        return Err(EngineMisuseError::InvalidReplay(format!(
                            "move {} targets occupied {}",
                            index, mv.position
                        ))
                        .into());
                    }
                    session.place(*mv)?;
                }
            }
        }

        debug!(phase = %session.phase, "Replay complete");
        Ok(session)
    }

    /// Writes a move to the board, flips the turn and settles the outcome.
    fn place(&mut self, mv: Move) -> Result<(), EngineMisuseError> {
        #[cfg(debug_assertions)]
        let before = self.clone();

        self.board.set(mv.position, Cell::for_side(mv.side, self.skin));
        self.history.push(mv);
        self.turn = mv.side.other();
        debug!(%mv, "Move placed");

        if let Some(outcome) = Outcome::from_evaluation(evaluate(&self.board)) {
            self.finish(outcome);
        }

        #[cfg(debug_assertions)]
        PlacementContract::post(&before, self)?;

        Ok(())
    }

    fn finish(&mut self, outcome: Outcome) {
        self.phase = Phase::Terminal(outcome);
        self.countdown.stop();
        info!(%outcome, moves = self.history.len(), "Session finished");
    }

    /// True while a scheduled opponent reply should still be applied.
    pub fn awaiting_opponent(&self) -> bool {
        self.phase == Phase::InProgress && self.turn == Side::Opponent
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move.
    pub fn turn(&self) -> Side {
        self.turn
    }

    /// Returns the difficulty.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Returns the human's marker skin.
    pub fn skin(&self) -> Skin {
        self.skin
    }

    /// Returns the countdown.
    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    /// Returns the lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the outcome once terminal.
    pub fn outcome(&self) -> Option<Outcome> {
        self.phase.outcome()
    }

    /// Returns move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Read-only view for the UI.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::from(self)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
