//! Scripted player controller for testing and examples
//!
//! Follows a predetermined sequence of answers, useful for
//! deterministic scenario tests.

use crate::cards::Card;
use crate::game::controller::{GameStateView, PlayerController};
use crate::zones::Seat;

/// A controller that answers move requests from a fixed script.
/// Once the script runs out it returns the "no move" sentinel.
pub struct ScriptedController {
    seat: Seat,
    script: Vec<Option<Card>>,
    cursor: usize,
}

impl ScriptedController {
    pub fn new(seat: Seat, script: Vec<Option<Card>>) -> Self {
        ScriptedController {
            seat,
            script,
            cursor: 0,
        }
    }

    /// Convenience constructor for scripts that always answer a card.
    pub fn playing(seat: Seat, cards: Vec<Card>) -> Self {
        Self::new(seat, cards.into_iter().map(Some).collect())
    }
}

impl PlayerController for ScriptedController {
    fn seat(&self) -> Seat {
        self.seat
    }

    fn choose_card(&mut self, _view: &GameStateView) -> Option<Card> {
        let answer = self.script.get(self.cursor).copied().flatten();
        self.cursor += 1;
        answer
    }
}
