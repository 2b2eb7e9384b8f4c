//! Player agent trait and read-only game state view
//!
//! This module defines the interface between the engine and player
//! agents (the human input adapter or an automated strategy). The game
//! loop calls the agent when the machine requests a move; the agent
//! inspects a read-only view of the state and returns a decision value.
//! Agents never mutate game state.

use crate::cards::{can_play, Card};
use crate::game::machine::Phase;
use crate::game::state::{GameState, ShownHand};
use crate::zones::{Seat, Zone};
use smallvec::SmallVec;

/// Read-only view of game state for player agents
///
/// Scoped to one seat: it exposes the shared pile, that seat's full
/// player record (hand, face-up, face-down), and public counts, the
/// same shape the engine hands out with every move request. Face-down
/// values are present but blind: [`legal_moves`](Self::legal_moves)
/// never reads them, and a well-behaved agent flips without peeking —
/// legality of a flip is settled by the engine, not the agent.
pub struct GameStateView<'a> {
    game: &'a GameState,
    seat: Seat,
    phase: Phase,
}

impl<'a> GameStateView<'a> {
    pub fn new(game: &'a GameState, seat: Seat, phase: Phase) -> Self {
        GameStateView { game, seat, phase }
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Is this request a setup-time face-up choice?
    pub fn is_choosing_face_up(&self) -> bool {
        self.phase == Phase::ChoosingFaceUpCards
    }

    /// The shared pile in table order (top = last)
    pub fn pile(&self) -> &[Card] {
        &self.game.pile.cards
    }

    pub fn hand(&self) -> &[Card] {
        &self.game.zones(self.seat).hand.cards
    }

    pub fn face_up(&self) -> &[Card] {
        &self.game.zones(self.seat).face_up.cards
    }

    pub fn face_down(&self) -> &[Card] {
        &self.game.zones(self.seat).face_down.cards
    }

    pub fn deck_len(&self) -> usize {
        self.game.deck.len()
    }

    pub fn current_turn(&self) -> Seat {
        self.game.current_turn
    }

    pub fn shown_hand(&self, seat: Seat) -> ShownHand {
        self.game.shown_hand(seat)
    }

    /// Opponent's public information: face-up cards and zone counts.
    pub fn opponent_face_up(&self) -> &[Card] {
        &self.game.zones(self.seat.opponent()).face_up.cards
    }

    pub fn opponent_hand_len(&self) -> usize {
        self.game.zones(self.seat.opponent()).hand.len()
    }

    /// The zone this seat must currently play from
    pub fn playable_zone(&self) -> Zone {
        self.game.zones(self.seat).playable_zone()
    }

    /// Cards in the currently playable zone
    pub fn playable_cards(&self) -> &[Card] {
        self.game.zones(self.seat).playable_cards()
    }

    /// Cards in the governing zone that are legal against the pile.
    ///
    /// Empty when the face-down zone governs: blind cards are flipped
    /// without legality knowledge, so the helper never reads them.
    pub fn legal_moves(&self) -> SmallVec<[Card; 8]> {
        if self.playable_zone() == Zone::FaceDown {
            return SmallVec::new();
        }
        self.playable_cards()
            .iter()
            .copied()
            .filter(|&c| can_play(c, self.pile()))
            .collect()
    }
}

/// A player agent the engine queries for moves.
///
/// During `Playing`, `choose_card` must return a card from the seat's
/// currently playable zone, or `None` as the "no legal move" sentinel.
/// Only automated seats may return the sentinel; from the human seat it
/// is a precondition violation and the engine re-asks without mutating.
///
/// During face-up selection the same method is called and must return a
/// card currently in hand.
pub trait PlayerController {
    /// The seat this agent plays for
    fn seat(&self) -> Seat;

    /// Choose a card to play (or `None` when nothing is legal)
    fn choose_card(&mut self, view: &GameStateView) -> Option<Card>;

    /// Optional: called once when the game ends
    fn on_game_end(&mut self, _view: &GameStateView, _won: bool) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Rank, Suit};
    use crate::game::state::GameState;

    fn c(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn test_view_scopes_to_seat() {
        let mut state = GameState::bare();
        state.human.hand.add(c(Rank::Five, Suit::Spades));
        state.bot.hand.add(c(Rank::Nine, Suit::Clubs));

        let view = GameStateView::new(&state, Seat::Human, Phase::Playing);
        assert_eq!(view.hand(), &[c(Rank::Five, Suit::Spades)]);
        assert_eq!(view.opponent_hand_len(), 1);
    }

    #[test]
    fn test_legal_moves_respects_pile_and_precedence() {
        let mut state = GameState::bare();
        state.pile.add(c(Rank::Jack, Suit::Hearts));
        state.human.hand.add(c(Rank::Three, Suit::Clubs));
        state.human.hand.add(c(Rank::Queen, Suit::Clubs));
        state.human.hand.add(c(Rank::Two, Suit::Diamonds));

        let view = GameStateView::new(&state, Seat::Human, Phase::Playing);
        let legal = view.legal_moves();
        assert_eq!(
            legal.as_slice(),
            &[c(Rank::Queen, Suit::Clubs), c(Rank::Two, Suit::Diamonds)]
        );
    }

    #[test]
    fn test_legal_moves_from_face_up_when_hand_empty() {
        let mut state = GameState::bare();
        state.human.face_up.add(c(Rank::Four, Suit::Clubs));

        let view = GameStateView::new(&state, Seat::Human, Phase::Playing);
        assert_eq!(view.playable_zone(), Zone::FaceUp);
        assert_eq!(view.legal_moves().as_slice(), &[c(Rank::Four, Suit::Clubs)]);
    }

    #[test]
    fn test_legal_moves_empty_when_blind_zone_governs() {
        let mut state = GameState::bare();
        state.pile.add(c(Rank::Six, Suit::Hearts));
        // The hidden King would beat the pile, but the helper must not
        // look at blind values.
        state.human.face_down.add(c(Rank::King, Suit::Clubs));

        let view = GameStateView::new(&state, Seat::Human, Phase::Playing);
        assert_eq!(view.playable_zone(), Zone::FaceDown);
        assert_eq!(view.face_down().len(), 1);
        assert!(view.legal_moves().is_empty());
    }
}
