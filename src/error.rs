//! Error types for the Zhithead engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZhitheadError {
    #[error("deck too short to deal: need {needed} cards, have {available}")]
    ShortDeck { needed: usize, available: usize },

    #[error("invalid game action: {0}")]
    InvalidAction(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    SerializationError(String),
}

pub type Result<T> = std::result::Result<T, ZhitheadError>;
