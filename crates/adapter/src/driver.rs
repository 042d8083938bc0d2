//! Driver module - runs one game over a line-delimited JSON stream
//!
//! Input is handled strictly one line at a time, so every command is applied to the
//! game atomically with respect to the observation that follows it.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::core::Game;
use crate::protocol::{
    create_ack, create_error, create_observation, parse_message, OutboundMessage, ParsedMessage,
};

/// Driver configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriverConfig {
    /// Piece RNG seed; `None` seeds from the operating system
    pub seed: Option<u64>,
    /// Append every inbound and outbound line to this file
    pub log_path: Option<String>,
}

impl DriverConfig {
    /// Read configuration from the environment
    ///
    /// - `BLOCKFALL_SEED`: u64 seed (unset or unparsable means random)
    /// - `BLOCKFALL_LOG_PATH`: wire log file (unset or empty disables it)
    pub fn from_env() -> Self {
        use std::env;

        let seed = env::var("BLOCKFALL_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok());

        let log_path = env::var("BLOCKFALL_LOG_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self { seed, log_path }
    }

    /// Create the game this configuration describes
    pub fn new_game(&self) -> Game {
        match self.seed {
            Some(seed) => Game::new(seed),
            None => Game::from_entropy(),
        }
    }
}

/// One game plus the outbound sequence counter
#[derive(Debug, Clone)]
pub struct Session {
    game: Game,
    seq: u64,
}

impl Session {
    pub fn new(game: Game) -> Self {
        Self { game, seq: 0 }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    fn next_seq(&mut self) -> u64 {
        self.seq = self.seq.wrapping_add(1);
        self.seq
    }

    /// Handle one inbound line and return the replies in send order
    ///
    /// Blank lines produce no reply.
    pub fn handle_line(&mut self, line: &str) -> Vec<OutboundMessage> {
        let line = line.trim();
        if line.is_empty() {
            return Vec::new();
        }

        match parse_message(line) {
            Ok(ParsedMessage::Command(cmd)) => {
                let was_over = self.game.is_game_over();
                let mut last_event = None;
                for action in cmd.actions.iter() {
                    self.game.apply_action(action);
                    if let Some(ev) = self.game.take_last_event() {
                        last_event = Some(ev);
                    }
                }
                if !was_over && self.game.is_game_over() {
                    eprintln!(
                        "[Driver] Top-out after command {} (score {}, lines {})",
                        cmd.seq,
                        self.game.score(),
                        self.game.lines()
                    );
                }

                let ack = create_ack(self.next_seq());
                let obs = create_observation(self.next_seq(), self.game.snapshot(), last_event);
                vec![OutboundMessage::Ack(ack), OutboundMessage::Observation(obs)]
            }
            Ok(ParsedMessage::Observe(_)) => {
                let obs = create_observation(self.next_seq(), self.game.snapshot(), None);
                vec![OutboundMessage::Observation(obs)]
            }
            Err(rejected) => {
                eprintln!(
                    "[Driver] Rejected message (seq {:?}): {}",
                    rejected.seq, rejected.source
                );
                let err = create_error(
                    self.next_seq(),
                    rejected.code,
                    &rejected.source.to_string(),
                );
                vec![OutboundMessage::Error(err)]
            }
        }
    }
}

/// Run a session until `input` reaches end of stream
pub fn run<R: BufRead, W: Write>(config: &DriverConfig, input: R, mut output: W) -> Result<()> {
    let mut wire_log = match config.log_path.as_deref() {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open wire log {}", path))?;
            eprintln!("[Driver] Wire log: {}", path);
            Some(file)
        }
        None => None,
    };

    match config.seed {
        Some(seed) => eprintln!("[Driver] Starting game with seed {}", seed),
        None => eprintln!("[Driver] Starting game with random seed"),
    }
    let mut session = Session::new(config.new_game());

    let mut buf: Vec<u8> = Vec::with_capacity(4096);
    for line in input.lines() {
        let line = line.context("failed to read command line")?;
        log_line(&mut wire_log, line.as_bytes());

        for msg in session.handle_line(&line) {
            buf.clear();
            serde_json::to_writer(&mut buf, &msg).context("failed to encode message")?;
            buf.push(b'\n');
            output
                .write_all(&buf)
                .context("failed to write message")?;
            log_line(&mut wire_log, &buf[..buf.len() - 1]);
        }
        output.flush().context("failed to flush output")?;
    }

    eprintln!("[Driver] Input closed");
    Ok(())
}

/// Best-effort wire log write; a failing log never stops the game
fn log_line(log: &mut Option<File>, line: &[u8]) {
    let Some(file) = log.as_mut() else {
        return;
    };
    if file.write_all(line).and_then(|_| file.write_all(b"\n")).is_err() {
        eprintln!("[Driver] Wire log write failed; disabling");
        *log = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line_is_ignored() {
        let mut session = Session::new(Game::new(1));
        assert!(session.handle_line("   ").is_empty());
    }

    #[test]
    fn test_command_replies_ack_then_observation() {
        let mut session = Session::new(Game::new(1));
        let out = session.handle_line(r#"{"type":"command","seq":1,"actions":["moveDown"]}"#);

        assert_eq!(out.len(), 2);
        assert!(matches!(out[0], OutboundMessage::Ack(_)));
        assert!(matches!(out[1], OutboundMessage::Observation(_)));
        assert_eq!(out[0].seq(), 1);
        assert_eq!(out[1].seq(), 2);
        assert_eq!(session.game().active_piece().y, 0);
    }

    #[test]
    fn test_rejected_line_leaves_game_untouched() {
        let mut session = Session::new(Game::new(1));
        let before = session.game().snapshot();

        let out = session.handle_line(r#"{"type":"command","seq":1,"actions":["moveDown","fly"]}"#);
        assert_eq!(out.len(), 1);
        assert!(matches!(out[0], OutboundMessage::Error(_)));
        assert_eq!(session.game().snapshot(), before);
    }

    #[test]
    fn test_config_new_game_uses_seed() {
        let config = DriverConfig {
            seed: Some(42),
            log_path: None,
        };
        let a = config.new_game();
        let b = Game::new(42);
        assert_eq!(a.active_piece(), b.active_piece());
        assert_eq!(a.next_piece(), b.next_piece());
    }
}
