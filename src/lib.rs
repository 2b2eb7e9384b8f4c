//! Zhithead - rules engine for a Shithead/Palace card game variant
//!
//! The core is an event-driven game state machine over a two-seat
//! table: deck and pile management, layered hand precedence (hand,
//! face-up, face-down), legality checking, and the special-rank
//! effects (transparent 8s, burning 10s). Player agents, human or
//! automated, sit behind the [`game::PlayerController`] trait.

pub mod cards;
pub mod error;
pub mod game;
pub mod zones;

pub use error::{Result, ZhitheadError};
