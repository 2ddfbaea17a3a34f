//! Interactive terminal play over stdin.

use crate::controller::{ControlCommand, GameController, GameEvent};
use anyhow::Result;
use frametoe_engine::{Difficulty, Outcome, Position, Side, Skin};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, instrument};

/// Maps one line of input to a command.
///
/// Any number becomes a move so out-of-range cells are rejected by the
/// engine; cell labels such as `center` work too.
pub fn parse_command(line: &str, difficulty: Difficulty, skin: Skin) -> Option<ControlCommand> {
    let line = line.trim();
    if let Ok(index) = line.parse::<usize>() {
        return Some(ControlCommand::Move(index));
    }
    match line.to_ascii_lowercase().as_str() {
        "s" | "start" => Some(ControlCommand::Start { difficulty, skin }),
        "a" | "again" => Some(ControlCommand::PlayAgain),
        "r" | "reset" => Some(ControlCommand::Reset),
        "m" | "menu" => Some(ControlCommand::ReturnToMenu),
        "q" | "quit" => Some(ControlCommand::Quit),
        other => {
            Position::parse_cell(other).map(|pos| ControlCommand::Move(pos.to_index()))
        }
    }
}

fn describe(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::HumanWin => "You win!",
        Outcome::OpponentWin => "Opponent wins!",
        Outcome::Draw => "Draw!",
        Outcome::TimedOut => "Time ran out!",
    }
}

fn render(event: &GameEvent) -> Option<String> {
    match event {
        GameEvent::SessionStarted(snapshot) => Some(format!(
            "New game ({} opponent, you play {}). {}",
            snapshot.difficulty,
            snapshot.skin,
            snapshot.status_string()
        )),
        GameEvent::MoveMade {
            side,
            position,
            board,
        } => {
            let who = match side {
                Side::Human => "You",
                Side::Opponent => "Opponent",
            };
            Some(format!("{} played {}\n{}\n", who, position, board.display()))
        }
        GameEvent::MoveRejected(reason) => Some(format!("Can't move there: {}", reason)),
        GameEvent::CountdownTick { remaining } if *remaining <= 5 => {
            Some(format!("{}s left", remaining))
        }
        GameEvent::CountdownTick { .. } => None,
        GameEvent::GameOver { outcome } => Some(format!(
            "{} [a] play again, [m] menu, [q] quit",
            describe(*outcome)
        )),
        GameEvent::SessionClosed => Some("Menu: [s] start, [q] quit".to_string()),
    }
}

/// Runs an interactive game until the player quits or stdin closes.
#[instrument(skip(controller, events))]
pub async fn run_interactive(
    controller: GameController,
    events: mpsc::UnboundedReceiver<GameEvent>,
    difficulty: Difficulty,
    skin: Skin,
) -> Result<()> {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    command_tx.send(ControlCommand::Start { difficulty, skin })?;

    let printer = tokio::spawn(print_events(events));

    let reader = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            match parse_command(&line, difficulty, skin) {
                Some(command) => {
                    let quit = command == ControlCommand::Quit;
                    if command_tx.send(command).is_err() || quit {
                        break;
                    }
                }
                None => println!("Commands: 0-8 move, a again, r reset, m menu, s start, q quit"),
            }
        }
        debug!("Input closed");
    });

    controller.run(command_rx).await?;
    reader.abort();
    printer.await?;
    Ok(())
}

async fn print_events(mut events: mpsc::UnboundedReceiver<GameEvent>) {
    while let Some(event) = events.recv().await {
        if let Some(text) = render(&event) {
            println!("{}", text);
        }
    }
}
