//! Greedy baseline controller
//!
//! Serves as the default automated opponent and as both seats in
//! simulations. Plays the lowest legal card and hoards wild ranks;
//! during setup it banks its highest cards face-up; blind cards are
//! flipped in dealt order without peeking. Deterministic given the
//! view, which keeps seeded games reproducible.

use crate::cards::Card;
use crate::game::controller::{GameStateView, PlayerController};
use crate::zones::{Seat, Zone};

pub struct GreedyController {
    seat: Seat,
}

impl GreedyController {
    pub fn new(seat: Seat) -> Self {
        GreedyController { seat }
    }
}

impl PlayerController for GreedyController {
    fn seat(&self) -> Seat {
        self.seat
    }

    fn choose_card(&mut self, view: &GameStateView) -> Option<Card> {
        if view.is_choosing_face_up() {
            // High cards are worth the most late in the game.
            return view.hand().iter().copied().max_by_key(|c| c.rank);
        }
        if view.playable_zone() == Zone::FaceDown {
            // Blind flip in dealt order; the engine settles legality.
            return view.face_down().first().copied();
        }
        // Lowest legal card first, wilds last.
        view.legal_moves()
            .iter()
            .copied()
            .min_by_key(|c| (c.rank.is_wild(), c.rank))
    }
}
