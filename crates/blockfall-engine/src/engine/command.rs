use serde::{Deserialize, Serialize};

/// A player command accepted by [`GameSession::handle`](crate::GameSession::handle).
///
/// Movement commands only take effect while the session is active. `TogglePause` is
/// ignored after game over, and `NewGame` is accepted in every mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    TogglePause,
    NewGame,
}

impl Command {
    /// Commands that move or rotate the falling piece.
    pub const PIECE_COMMANDS: [Self; 5] = [
        Command::MoveLeft,
        Command::MoveRight,
        Command::SoftDrop,
        Command::Rotate,
        Command::HardDrop,
    ];

    /// Returns whether the command acts on the falling piece.
    #[must_use]
    pub const fn is_piece_command(self) -> bool {
        !matches!(self, Command::TogglePause | Command::NewGame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_commands() {
        for command in Command::PIECE_COMMANDS {
            assert!(command.is_piece_command(), "{command:?}");
        }
        assert!(!Command::TogglePause.is_piece_command());
        assert!(!Command::NewGame.is_piece_command());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&Command::HardDrop).unwrap(),
            "\"hard_drop\""
        );
        let command: Command = serde_json::from_str("\"toggle_pause\"").unwrap();
        assert_eq!(command, Command::TogglePause);
    }
}
