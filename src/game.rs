use crate::input::Command;
use common::{GameState, Outcome};
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

#[derive(Debug, PartialEq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct Session {
    game_state: GameState,
    json: bool,
}

impl Session {
    pub fn new(game_state: GameState, json: bool) -> Self {
        Session { game_state, json }
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> anyhow::Result<()> {
        self.draw(out)?;
        for line in input.lines() {
            if self.handle_line(&line?, out)? == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    pub fn handle_line(&mut self, line: &str, out: &mut impl Write) -> io::Result<Flow> {
        let command: Command = match line.parse() {
            Ok(command) => command,
            Err(err) => {
                warn!("Invalid command {:?}: {}", line, err);
                writeln!(out, "{}", err)?;
                return Ok(Flow::Continue);
            }
        };
        match command {
            Command::Quit => {
                info!("player quit");
                return Ok(Flow::Quit);
            }
            Command::Reset => self.game_state.reset(),
            Command::Place { x, y } => {
                if let Err(err) = self.game_state.play(x, y) {
                    warn!("Rejected placement at ({}, {}): {}", x, y, err);
                    writeln!(out, "{}", err)?;
                    return Ok(Flow::Continue);
                }
            }
        }
        self.draw(out)?;
        Ok(Flow::Continue)
    }

    fn draw(&self, out: &mut impl Write) -> io::Result<()> {
        write!(out, "{}", frame(&self.game_state))?;
        writeln!(out, "{}", status(&self.game_state))?;
        if self.json {
            let snapshot = serde_json::to_string(&self.game_state.snapshot())?;
            writeln!(out, "{}", snapshot)?;
        }
        Ok(())
    }
}

// Board with column indices on top and row indices on the left
fn frame(game_state: &GameState) -> String {
    let header: String = (0..game_state.size())
        .map(|x| char::from_digit((x % 10) as u32, 10).unwrap_or(' '))
        .collect();
    let mut frame = format!("   {}\n", header);
    for (y, row) in game_state.render().lines().enumerate() {
        frame.push_str(&format!("{:>2}|{}|\n", y, row));
    }
    frame
}

fn status(game_state: &GameState) -> String {
    match game_state.outcome() {
        Outcome::InProgress => format!("{} to move", game_state.to_move()),
        Outcome::Won(stone) => format!("{} wins! Type reset to play again", stone),
        Outcome::Draw => "Draw! Type reset to play again".to_string(),
    }
}
