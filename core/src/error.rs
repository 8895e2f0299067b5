use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board dimensions must be at least 1x1")]
    InvalidDimension,
    #[error("Coordinates are outside of the board")]
    OutOfBounds,
    #[error("Mine layout rows do not form a rectangle")]
    InvalidBoardShape,
}

pub type Result<T> = core::result::Result<T, GameError>;
