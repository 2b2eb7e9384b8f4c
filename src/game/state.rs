//! Main game state structure

use crate::cards::standard_deck;
use crate::game::GameLogger;
use crate::zones::{CardZone, PlayerZones, Seat, Zone};
use crate::{Result, ZhitheadError};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

/// Cards dealt face-down to each seat
pub const FACE_DOWN_SIZE: usize = 3;
/// Cards dealt to each seat's hand (3 of which end up face-up)
pub const HAND_SIZE: usize = 6;
/// Face-up cards each seat must end setup with
pub const FACE_UP_SIZE: usize = 3;

/// Which zone a seat's UI currently displays. Pure presentation flag;
/// it lives in the state container but never touches rule legality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShownHand {
    #[default]
    Hand,
    OffHand,
}

/// Complete game state
///
/// Central structure holding all card locations, the turn marker, and
/// the per-seat display preference. Mutated only by the state machine's
/// transition handlers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Draw deck, consumed from the top only, never replenished
    pub deck: CardZone,

    /// Shared discard pile both seats play onto (top = last)
    pub pile: CardZone,

    /// Cards removed from play by burns
    pub burned: CardZone,

    /// The human seat's zones
    pub human: PlayerZones,

    /// The automated seat's zones
    pub bot: PlayerZones,

    /// Whose turn it is
    pub current_turn: Seat,

    /// Per-seat display preference (human, bot)
    pub shown_hand: (ShownHand, ShownHand),

    /// Winner once a seat has emptied all three zones
    pub winner: Option<Seat>,

    /// Seeded RNG; shuffling at deal is the engine's only source of
    /// randomness, so a fixed seed makes a whole game reproducible.
    ///
    /// Wrapped in RefCell so shuffling can borrow the RNG while zones
    /// are borrowed mutably.
    pub rng: RefCell<ChaCha12Rng>,

    /// Centralized logger for game events
    #[serde(default)]
    pub logger: GameLogger,
}

impl GameState {
    /// Create a dealt two-seat game from a seed.
    ///
    /// Shuffles a standard 52-card deck, deals each seat 3 face-down
    /// cards and 6 hand cards, then moves the bot's first 3 hand cards
    /// to its face-up row. The human's face-up row starts empty pending
    /// explicit choices.
    pub fn new_with_seed(seed: u64) -> Self {
        let mut state = GameState::bare();
        *state.rng.borrow_mut() = ChaCha12Rng::seed_from_u64(seed);
        state.deck = CardZone::with_cards(Zone::Deck, standard_deck());
        state.shuffle_deck();
        state
            .deal()
            .expect("a standard 52-card deck always covers a two-seat deal");

        // The bot's face-up allotment is fixed at deal time.
        for _ in 0..FACE_UP_SIZE {
            let card = state.bot.hand.cards.remove(0);
            state.bot.face_up.add(card);
        }
        state
    }

    /// An empty, undealt state. Used by tests and by scenario setups
    /// that place cards manually.
    pub fn bare() -> Self {
        GameState {
            deck: CardZone::new(Zone::Deck),
            pile: CardZone::new(Zone::Pile),
            burned: CardZone::new(Zone::Burned),
            human: PlayerZones::new(Seat::Human),
            bot: PlayerZones::new(Seat::Bot),
            current_turn: Seat::Human,
            shown_hand: (ShownHand::default(), ShownHand::default()),
            winner: None,
            rng: RefCell::new(ChaCha12Rng::seed_from_u64(0)),
            logger: GameLogger::new(),
        }
    }

    /// Reseed the RNG for deterministic gameplay.
    pub fn seed_rng(&mut self, seed: u64) {
        *self.rng.borrow_mut() = ChaCha12Rng::seed_from_u64(seed);
    }

    /// Fisher-Yates shuffle of the deck using the game's RNG.
    pub fn shuffle_deck(&mut self) {
        self.deck.shuffle(&mut *self.rng.borrow_mut());
    }

    /// Deal the face-down rows and hands for both seats from the deck.
    ///
    /// Fails fast when the deck cannot cover the full deal; the
    /// remainder after a successful deal stays as the draw deck.
    pub fn deal(&mut self) -> Result<()> {
        let needed = 2 * (FACE_DOWN_SIZE + HAND_SIZE);
        if self.deck.len() < needed {
            return Err(ZhitheadError::ShortDeck {
                needed,
                available: self.deck.len(),
            });
        }
        for seat in [Seat::Human, Seat::Bot] {
            for _ in 0..FACE_DOWN_SIZE {
                let card = self.deck.draw_top().expect("deck length checked above");
                self.zones_mut(seat).face_down.add(card);
            }
        }
        for seat in [Seat::Human, Seat::Bot] {
            for _ in 0..HAND_SIZE {
                let card = self.deck.draw_top().expect("deck length checked above");
                self.zones_mut(seat).hand.add(card);
            }
        }
        Ok(())
    }

    pub fn zones(&self, seat: Seat) -> &PlayerZones {
        match seat {
            Seat::Human => &self.human,
            Seat::Bot => &self.bot,
        }
    }

    pub fn zones_mut(&mut self, seat: Seat) -> &mut PlayerZones {
        match seat {
            Seat::Human => &mut self.human,
            Seat::Bot => &mut self.bot,
        }
    }

    pub fn shown_hand(&self, seat: Seat) -> ShownHand {
        match seat {
            Seat::Human => self.shown_hand.0,
            Seat::Bot => self.shown_hand.1,
        }
    }

    pub fn set_shown_hand(&mut self, seat: Seat, shown: ShownHand) {
        match seat {
            Seat::Human => self.shown_hand.0 = shown,
            Seat::Bot => self.shown_hand.1 = shown,
        }
    }

    pub fn switch_turns(&mut self) {
        self.current_turn = self.current_turn.opponent();
    }

    /// Move the whole pile into `seat`'s hand (take-pile).
    pub fn take_pile_into_hand(&mut self, seat: Seat) {
        let taken = self.pile.take_all();
        self.zones_mut(seat).hand.cards.extend(taken);
    }

    /// Draw one card from the deck into `seat`'s hand. No-op once the
    /// deck is exhausted.
    pub fn draw_into_hand(&mut self, seat: Seat) {
        if let Some(card) = self.deck.draw_top() {
            self.zones_mut(seat).hand.add(card);
        }
    }

    /// Burn the pile: move every pile card out of play.
    pub fn burn_pile(&mut self) {
        let burned = self.pile.take_all();
        self.burned.cards.extend(burned);
    }

    /// Total number of cards across every location. Stays at 52 for a
    /// dealt game (card conservation).
    pub fn total_cards(&self) -> usize {
        self.deck.len()
            + self.pile.len()
            + self.burned.len()
            + self.human.total_cards()
            + self.bot.total_cards()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;
    use std::collections::HashSet;

    #[test]
    fn test_deal_distribution() {
        let state = GameState::new_with_seed(42);

        assert_eq!(state.human.face_down.len(), FACE_DOWN_SIZE);
        assert_eq!(state.human.hand.len(), HAND_SIZE);
        assert_eq!(state.human.face_up.len(), 0);

        assert_eq!(state.bot.face_down.len(), FACE_DOWN_SIZE);
        assert_eq!(state.bot.hand.len(), HAND_SIZE - FACE_UP_SIZE);
        assert_eq!(state.bot.face_up.len(), FACE_UP_SIZE);

        assert_eq!(state.deck.len(), 52 - 2 * (FACE_DOWN_SIZE + HAND_SIZE));
        assert!(state.pile.is_empty());
        assert_eq!(state.current_turn, Seat::Human);
    }

    #[test]
    fn test_deal_conserves_all_52_cards() {
        let state = GameState::new_with_seed(7);
        assert_eq!(state.total_cards(), 52);

        let mut seen: HashSet<Card> = HashSet::new();
        for card in state
            .deck
            .cards
            .iter()
            .chain(&state.human.hand.cards)
            .chain(&state.human.face_down.cards)
            .chain(&state.bot.hand.cards)
            .chain(&state.bot.face_up.cards)
            .chain(&state.bot.face_down.cards)
        {
            assert!(seen.insert(*card), "duplicate card {} after deal", card);
        }
        assert_eq!(seen.len(), 52);
    }

    #[test]
    fn test_same_seed_same_deal() {
        let a = GameState::new_with_seed(1234);
        let b = GameState::new_with_seed(1234);
        assert_eq!(a.deck.cards, b.deck.cards);
        assert_eq!(a.human.hand.cards, b.human.hand.cards);
        assert_eq!(a.bot.face_up.cards, b.bot.face_up.cards);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = GameState::new_with_seed(1);
        let b = GameState::new_with_seed(2);
        // Astronomically unlikely to collide across the whole deal.
        assert_ne!(a.deck.cards, b.deck.cards);
    }

    #[test]
    fn test_short_deck_deal_fails() {
        let mut state = GameState::bare();
        state.deck = CardZone::with_cards(
            Zone::Deck,
            standard_deck().into_iter().take(10).collect(),
        );
        let err = state.deal().unwrap_err();
        assert!(matches!(
            err,
            ZhitheadError::ShortDeck {
                needed: 18,
                available: 10
            }
        ));
    }

    #[test]
    fn test_draw_into_hand_noop_on_empty_deck() {
        let mut state = GameState::bare();
        assert!(state.deck.is_empty());
        state.draw_into_hand(Seat::Human);
        assert!(state.human.hand.is_empty());
    }

    #[test]
    fn test_take_pile_preserves_order_and_clears() {
        let mut state = GameState::bare();
        let cards = standard_deck();
        state.pile.add(cards[0]);
        state.pile.add(cards[1]);

        state.take_pile_into_hand(Seat::Bot);
        assert!(state.pile.is_empty());
        assert_eq!(state.bot.hand.cards, vec![cards[0], cards[1]]);
    }

    #[test]
    fn test_switch_turns_toggles() {
        let mut state = GameState::bare();
        assert_eq!(state.current_turn, Seat::Human);
        state.switch_turns();
        assert_eq!(state.current_turn, Seat::Bot);
        state.switch_turns();
        assert_eq!(state.current_turn, Seat::Human);
    }
}
