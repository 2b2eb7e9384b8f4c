//! Game loop implementation
//!
//! Drives the state machine against a pair of player agents: services
//! outstanding move requests, advances the virtual clock to each timer
//! deadline, and stops on victory or the request limit. The loop also
//! plays the role of the human-input adapter in simulations: when the
//! human seat is stuck it submits the take-pile event on its behalf,
//! since a human agent must never answer with the no-move sentinel.

use crate::game::controller::{GameStateView, PlayerController};
use crate::game::machine::{Event, GameMachine, Phase};
use crate::zones::Seat;
use crate::{Result, ZhitheadError};
use serde::{Deserialize, Serialize};

/// Result of running a game to completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    /// Winner of the game (None when the request limit was hit)
    pub winner: Option<Seat>,
    /// Number of agent requests serviced
    pub requests_served: u32,
    /// Reason the game ended
    pub end_reason: GameEndReason,
}

/// Reason the game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEndReason {
    /// A seat emptied all three zones
    Victory(Seat),
    /// The request limit was reached before anyone went out
    RequestLimit,
}

enum StepOutcome {
    Progress,
    WaitTimer(u64),
    Finished(GameResult),
}

/// Game loop manager
pub struct GameLoop<'a> {
    /// The machine being driven
    pub machine: &'a mut GameMachine,
    max_requests: u32,
    requests_served: u32,
}

impl<'a> GameLoop<'a> {
    pub fn new(machine: &'a mut GameMachine) -> Self {
        GameLoop {
            machine,
            max_requests: 1000,
            requests_served: 0,
        }
    }

    /// Cap the number of agent requests before forcing an end (a bound
    /// on stalled games, e.g. a misbehaving scripted agent).
    pub fn with_max_requests(mut self, max_requests: u32) -> Self {
        self.max_requests = max_requests;
        self
    }

    /// Run the game to completion with instant (virtual) timers.
    pub fn run_game(
        &mut self,
        human: &mut dyn PlayerController,
        bot: &mut dyn PlayerController,
    ) -> Result<GameResult> {
        loop {
            match self.step(human, bot)? {
                StepOutcome::Progress => {}
                StepOutcome::WaitTimer(deadline) => self.machine.advance_to(deadline),
                StepOutcome::Finished(result) => {
                    self.notify_game_end(human, bot);
                    return Ok(result);
                }
            }
        }
    }

    /// Run the game with wall-clock timers: identical semantics, but
    /// each timer deadline is awaited in real time.
    pub async fn run_realtime(
        &mut self,
        human: &mut dyn PlayerController,
        bot: &mut dyn PlayerController,
    ) -> Result<GameResult> {
        loop {
            match self.step(human, bot)? {
                StepOutcome::Progress => {}
                StepOutcome::WaitTimer(deadline) => {
                    let wait_ms = deadline.saturating_sub(self.machine.now_ms());
                    tokio::time::sleep(std::time::Duration::from_millis(wait_ms)).await;
                    self.machine.advance_to(deadline);
                }
                StepOutcome::Finished(result) => {
                    self.notify_game_end(human, bot);
                    return Ok(result);
                }
            }
        }
    }

    fn step(
        &mut self,
        human: &mut dyn PlayerController,
        bot: &mut dyn PlayerController,
    ) -> Result<StepOutcome> {
        if self.machine.phase() == Phase::GameOver {
            let winner = self.machine.winner().expect("GameOver always has a winner");
            return Ok(StepOutcome::Finished(GameResult {
                winner: Some(winner),
                requests_served: self.requests_served,
                end_reason: GameEndReason::Victory(winner),
            }));
        }
        if self.requests_served >= self.max_requests {
            return Ok(StepOutcome::Finished(GameResult {
                winner: None,
                requests_served: self.requests_served,
                end_reason: GameEndReason::RequestLimit,
            }));
        }
        if let Some(seat) = self.machine.pending_request() {
            self.requests_served += 1;
            self.serve_request(seat, human, bot);
            return Ok(StepOutcome::Progress);
        }
        if let Some(deadline) = self.machine.next_deadline() {
            return Ok(StepOutcome::WaitTimer(deadline));
        }
        // No request outstanding and no timer pending: the machine can
        // never make progress again.
        Err(ZhitheadError::InvalidAction(
            "engine stalled with no pending request or timer".to_string(),
        ))
    }

    fn serve_request(
        &mut self,
        seat: Seat,
        human: &mut dyn PlayerController,
        bot: &mut dyn PlayerController,
    ) {
        // Input-adapter duty: a stuck human takes the pile instead of
        // answering the request.
        if seat == Seat::Human
            && self.machine.phase() == Phase::Playing
            && !self.machine.has_legal_play(Seat::Human)
        {
            self.machine.handle_event(Event::TakePile);
            return;
        }
        let card = {
            let view = GameStateView::new(&self.machine.state, seat, self.machine.phase());
            self.controller_for(seat, human, bot).choose_card(&view)
        };
        self.machine.handle_event(Event::CardChosen { seat, card });
    }

    fn controller_for<'c>(
        &self,
        seat: Seat,
        human: &'c mut dyn PlayerController,
        bot: &'c mut dyn PlayerController,
    ) -> &'c mut dyn PlayerController {
        match seat {
            Seat::Human => human,
            Seat::Bot => bot,
        }
    }

    fn notify_game_end(
        &mut self,
        human: &mut dyn PlayerController,
        bot: &mut dyn PlayerController,
    ) {
        let winner = self.machine.winner();
        let phase = self.machine.phase();
        let human_view = GameStateView::new(&self.machine.state, Seat::Human, phase);
        human.on_game_end(&human_view, winner == Some(Seat::Human));
        let bot_view = GameStateView::new(&self.machine.state, Seat::Bot, phase);
        bot.on_game_end(&bot_view, winner == Some(Seat::Bot));
    }
}

/// Convenience: run one seeded greedy-vs-greedy game to completion.
pub fn run_seeded_game(seed: u64) -> Result<GameResult> {
    use crate::game::greedy_controller::GreedyController;
    use crate::game::state::GameState;

    let mut machine = GameMachine::new(GameState::new_with_seed(seed));
    let mut human = GreedyController::new(Seat::Human);
    let mut bot = GreedyController::new(Seat::Bot);
    GameLoop::new(&mut machine).run_game(&mut human, &mut bot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::greedy_controller::GreedyController;
    use crate::game::scripted_controller::ScriptedController;
    use crate::game::state::GameState;

    #[test]
    fn test_seeded_games_reach_victory() {
        // Two deterministic greedy agents could in principle cycle
        // forever on an adversarial shuffle, so assert over a batch of
        // seeds rather than pinning one.
        let victories = (0..10)
            .filter(|&seed| {
                let result = run_seeded_game(seed).unwrap();
                if let GameEndReason::Victory(winner) = result.end_reason {
                    assert_eq!(result.winner, Some(winner));
                    true
                } else {
                    false
                }
            })
            .count();
        assert!(victories >= 1, "no seed in 0..10 produced a finished game");
    }

    #[test]
    fn test_card_conservation_over_full_game() {
        for seed in [0, 1, 7, 42, 1234] {
            let mut machine = GameMachine::new(GameState::new_with_seed(seed));
            let mut human = GreedyController::new(Seat::Human);
            let mut bot = GreedyController::new(Seat::Bot);
            let result = GameLoop::new(&mut machine)
                .with_max_requests(2000)
                .run_game(&mut human, &mut bot)
                .unwrap();

            // Whatever happened, every one of the 52 cards is still in
            // exactly one location; a winner went out completely.
            assert_eq!(machine.state.total_cards(), 52, "seed {}", seed);
            if let Some(winner) = result.winner {
                assert!(machine.state.zones(winner).all_empty());
            }
        }
    }

    #[test]
    fn test_same_seed_same_result() {
        let a = run_seeded_game(7).unwrap();
        let b = run_seeded_game(7).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_request_limit_on_stalling_agents() {
        // A scripted human that immediately runs out of answers keeps
        // violating its contract; the loop must bail at the cap.
        let mut machine = GameMachine::new(GameState::new_with_seed(5));
        let mut human = ScriptedController::new(Seat::Human, vec![]);
        let mut bot = GreedyController::new(Seat::Bot);
        let result = GameLoop::new(&mut machine)
            .with_max_requests(50)
            .run_game(&mut human, &mut bot)
            .unwrap();

        assert_eq!(result.end_reason, GameEndReason::RequestLimit);
        assert_eq!(result.winner, None);
        assert_eq!(result.requests_served, 50);
    }

    #[test]
    fn test_realtime_driver_matches_virtual_clock() {
        // Paused tokio time: the realtime driver auto-advances sleeps,
        // so this completes instantly while exercising the async path.
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
            .unwrap();
        let realtime = rt.block_on(async {
            let mut machine = GameMachine::new(GameState::new_with_seed(42));
            let mut human = GreedyController::new(Seat::Human);
            let mut bot = GreedyController::new(Seat::Bot);
            GameLoop::new(&mut machine)
                .run_realtime(&mut human, &mut bot)
                .await
                .unwrap()
        });
        let virtual_clock = run_seeded_game(42).unwrap();
        assert_eq!(realtime, virtual_clock);
    }
}
