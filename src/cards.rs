//! Card types, deck construction, and play legality
//!
//! Legality against the pile is computed from the *effective* top card:
//! the most recent pile card after skipping trailing Eights, which are
//! transparent. The raw pile order is untouched; burn and take-pile
//! operations always move the full pile.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Card suits (standard French deck, no jokers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];
}

/// Card ranks in Zhithead play order: 2 is lowest, Ace is highest.
///
/// The derived `Ord` is the legality ordering. Three ranks carry
/// special rules on top of the ordering:
/// - `Two` resets the pile (playable on anything, anything beats it)
/// - `Eight` is transparent (skipped when finding the effective top)
/// - `Ten` burns the pile after it lands
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Numeric value, 2..=14 (Ace high)
    pub fn value(&self) -> u8 {
        match self {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 11,
            Rank::Queen => 12,
            Rank::King => 13,
            Rank::Ace => 14,
        }
    }

    /// Wild ranks are playable regardless of the pile top.
    pub fn is_wild(&self) -> bool {
        matches!(self, Rank::Two | Rank::Eight | Rank::Ten)
    }
}

/// A single card instance.
///
/// The 52-card deck never contains duplicates, so structural equality
/// identifies a specific instance and zones can remove exactly the card
/// that was played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Card { rank, suit }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = match self.rank {
            Rank::Jack => "J".to_string(),
            Rank::Queen => "Q".to_string(),
            Rank::King => "K".to_string(),
            Rank::Ace => "A".to_string(),
            other => other.value().to_string(),
        };
        let suit = match self.suit {
            Suit::Clubs => "♣",
            Suit::Diamonds => "♦",
            Suit::Hearts => "♥",
            Suit::Spades => "♠",
        };
        write!(f, "{}{}", rank, suit)
    }
}

/// Build the standard 52-card deck in rank-major order (unshuffled).
pub fn standard_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(52);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card::new(rank, suit));
        }
    }
    deck
}

/// The effective top card of the pile: the last card after skipping
/// trailing Eights. `None` when the pile is empty or all Eights.
pub fn effective_top(pile: &[Card]) -> Option<Card> {
    pile.iter().rev().find(|c| c.rank != Rank::Eight).copied()
}

/// Can `card` legally be played onto `pile`?
///
/// True when the pile is effectively empty, the rank is wild, or the
/// rank is at least the effective top rank. Pure: depends only on the
/// arguments.
pub fn can_play(card: Card, pile: &[Card]) -> bool {
    match effective_top(pile) {
        None => true,
        Some(top) => card.rank.is_wild() || card.rank >= top.rank,
    }
}
