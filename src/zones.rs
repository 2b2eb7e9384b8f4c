//! Card zones: deck, pile, and each seat's hand / face-up / face-down

use crate::cards::{can_play, Card};
use serde::{Deserialize, Serialize};

/// The two sides of the table.
///
/// The engine is agent-agnostic, but the human seat is special in two
/// places: face-up selection at setup is driven by explicit choice
/// events, and a "no move" sentinel from its agent is a precondition
/// violation rather than a take-pile signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    Human,
    Bot,
}

impl Seat {
    pub fn opponent(&self) -> Seat {
        match self {
            Seat::Human => Seat::Bot,
            Seat::Bot => Seat::Human,
        }
    }
}

/// Different zones where cards can exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Deck,
    Pile,
    Hand,
    FaceUp,
    FaceDown,
    /// Out-of-play cards removed by a burn. Keeps every card accounted
    /// for: burning clears the pile but never destroys cards.
    Burned,
}

/// An ordered zone of cards (order matters for Deck and Pile)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardZone {
    /// Zone type
    pub zone_type: Zone,

    /// Cards in this zone (top of Deck/Pile = last element)
    pub cards: Vec<Card>,
}

impl CardZone {
    pub fn new(zone_type: Zone) -> Self {
        CardZone {
            zone_type,
            cards: Vec::new(),
        }
    }

    pub fn with_cards(zone_type: Zone, cards: Vec<Card>) -> Self {
        CardZone { zone_type, cards }
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Remove exactly one matching card instance. Returns false when the
    /// card is not present; callers treat that as an invariant violation.
    pub fn remove(&mut self, card: Card) -> bool {
        if let Some(pos) = self.cards.iter().position(|&c| c == card) {
            // Order-preserving remove: iteration order is part of the
            // deterministic-replay contract.
            self.cards.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Draw from the top (for Deck)
    pub fn draw_top(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Look at the top card without removing it
    pub fn peek_top(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    /// Remove and return all cards in table order (take-pile)
    pub fn take_all(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards)
    }

    /// Clear all cards (burn)
    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Shuffle the zone (for Deck)
    pub fn shuffle(&mut self, rng: &mut impl rand::Rng) {
        use rand::seq::SliceRandom;
        self.cards.shuffle(rng);
    }
}

/// The three zones a seat plays from, in precedence order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerZones {
    pub seat: Seat,
    pub hand: CardZone,
    pub face_up: CardZone,
    pub face_down: CardZone,
}

impl PlayerZones {
    pub fn new(seat: Seat) -> Self {
        PlayerZones {
            seat,
            hand: CardZone::new(Zone::Hand),
            face_up: CardZone::new(Zone::FaceUp),
            face_down: CardZone::new(Zone::FaceDown),
        }
    }

    /// The zone this seat must currently play from: hand while
    /// non-empty, else face-up while non-empty, else face-down.
    pub fn playable_zone(&self) -> Zone {
        if !self.hand.is_empty() {
            Zone::Hand
        } else if !self.face_up.is_empty() {
            Zone::FaceUp
        } else {
            Zone::FaceDown
        }
    }

    /// Cards in the currently playable zone
    pub fn playable_cards(&self) -> &[Card] {
        &self.zone(self.playable_zone()).cards
    }

    pub fn zone(&self, zone: Zone) -> &CardZone {
        match zone {
            Zone::Hand => &self.hand,
            Zone::FaceUp => &self.face_up,
            Zone::FaceDown => &self.face_down,
            other => panic!("{:?} is not a player zone", other),
        }
    }

    pub fn zone_mut(&mut self, zone: Zone) -> &mut CardZone {
        match zone {
            Zone::Hand => &mut self.hand,
            Zone::FaceUp => &mut self.face_up,
            Zone::FaceDown => &mut self.face_down,
            other => panic!("{:?} is not a player zone", other),
        }
    }

    /// Does this seat have a legal play from its governing zone?
    ///
    /// A governing non-empty face-down zone always counts: blind cards
    /// are flipped without knowing their legality, so there is always a
    /// play to attempt.
    pub fn has_legal_play(&self, pile: &[Card]) -> bool {
        if self.playable_zone() == Zone::FaceDown {
            return !self.face_down.is_empty();
        }
        self.playable_cards().iter().any(|&c| can_play(c, pile))
    }

    /// All three zones empty: this seat has gone out.
    pub fn all_empty(&self) -> bool {
        self.hand.is_empty() && self.face_up.is_empty() && self.face_down.is_empty()
    }

    pub fn total_cards(&self) -> usize {
        self.hand.len() + self.face_up.len() + self.face_down.len()
    }
}
