use thiserror::Error;

use crate::TileId;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("No tile with id {0} on this board")]
    UnknownTile(TileId),
    #[error("Round is not being played, no new moves are accepted")]
    NotPlaying,
    #[error("Auto-play is not enabled for this round")]
    AutoPlayDisabled,
}

pub type Result<T> = core::result::Result<T, GameError>;
