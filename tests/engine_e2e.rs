//! End-to-end engine tests
//!
//! Drives whole games through the public API: the fixed scenario from
//! the rule set, determinism across runs, and card conservation from
//! setup to victory.

use similar_asserts::assert_eq as assert_eq_diff;
use zhithead::cards::{Card, Rank, Suit};
use zhithead::game::{
    Event, GameEndReason, GameLoop, GameMachine, GameState, GreedyController, OutputMode,
    Phase, VerbosityLevel,
};
use zhithead::zones::Seat;

fn c(rank: Rank, suit: Suit) -> Card {
    Card::new(rank, suit)
}

fn played(seat: Seat, card: Card) -> Event {
    Event::CardChosen {
        seat,
        card: Some(card),
    }
}

/// The fixed four-card scenario: human holds 5♠ 8♦, bot holds 3♣ 10♥,
/// empty pile and deck, human to move.
#[test]
fn test_fixed_four_card_scenario() {
    let mut state = GameState::bare();
    state.human.hand.add(c(Rank::Five, Suit::Spades));
    state.human.hand.add(c(Rank::Eight, Suit::Diamonds));
    state.bot.hand.add(c(Rank::Three, Suit::Clubs));
    state.bot.hand.add(c(Rank::Ten, Suit::Hearts));
    let mut machine = GameMachine::new_playing(state);

    // Human plays 5♠ on the empty pile.
    assert_eq!(machine.pending_request(), Some(Seat::Human));
    machine.handle_event(played(Seat::Human, c(Rank::Five, Suit::Spades)));
    assert_eq!(machine.state.pile.cards, vec![c(Rank::Five, Suit::Spades)]);

    // Post-move sequence: no burn (5 on top), no draw (deck empty),
    // turn passes to the bot.
    let base = machine.now_ms();
    machine.advance_to(base + 1000);
    assert_eq!(machine.state.current_turn, Seat::Bot);
    assert_eq!(machine.pending_request(), Some(Seat::Bot));

    // Bot plays 10♥ (legal, 10 is wild).
    machine.handle_event(played(Seat::Bot, c(Rank::Ten, Suit::Hearts)));
    assert_eq!(
        machine.state.pile.cards,
        vec![c(Rank::Five, Suit::Spades), c(Rank::Ten, Suit::Hearts)]
    );

    // t+600: burn fires on the raw 10 top.
    let base = machine.now_ms();
    machine.advance_to(base + 600);
    assert!(machine.state.pile.is_empty());
    assert_eq!(
        machine.state.burned.cards,
        vec![c(Rank::Five, Suit::Spades), c(Rank::Ten, Suit::Hearts)]
    );

    // t+625: draw-up is a no-op on the empty deck.
    machine.advance_to(base + 625);
    assert!(machine.state.bot.hand.contains(c(Rank::Three, Suit::Clubs)));
    assert_eq!(machine.state.bot.hand.len(), 1);

    // t+1000: turn switches back to the human.
    machine.advance_to(base + 1000);
    assert_eq!(machine.state.current_turn, Seat::Human);
    assert_eq!(machine.state.total_cards(), 4);
}

#[test]
fn test_setup_through_victory_with_greedy_agents() {
    let mut state = GameState::new_with_seed(11);
    state.logger.set_verbosity(VerbosityLevel::Minimal);
    state.logger.set_output_mode(OutputMode::Memory);
    let mut machine = GameMachine::new(state);
    assert_eq!(machine.phase(), Phase::ChoosingFaceUpCards);

    let mut human = GreedyController::new(Seat::Human);
    let mut bot = GreedyController::new(Seat::Bot);
    let result = GameLoop::new(&mut machine)
        .with_max_requests(2000)
        .run_game(&mut human, &mut bot)
        .unwrap();

    // Setup completed: the human banked exactly 3 face-up cards before
    // play started (they may have been played again since, so check
    // conservation rather than counts).
    assert_eq!(machine.state.total_cards(), 52);

    if let GameEndReason::Victory(winner) = result.end_reason {
        assert_eq!(machine.phase(), Phase::GameOver);
        assert!(machine.state.zones(winner).all_empty());
        let outcome_logged = machine
            .state
            .logger
            .entries()
            .iter()
            .any(|entry| entry.message.contains("wins the game"));
        assert!(outcome_logged);
    } else {
        // Greedy-vs-greedy can in principle cycle; the loop must then
        // have stopped exactly at the cap.
        assert_eq!(result.requests_served, 2000);
    }
}

#[test]
fn test_whole_game_determinism() {
    let run = |seed: u64| {
        let mut machine = GameMachine::new(GameState::new_with_seed(seed));
        let mut human = GreedyController::new(Seat::Human);
        let mut bot = GreedyController::new(Seat::Bot);
        let result = GameLoop::new(&mut machine)
            .with_max_requests(2000)
            .run_game(&mut human, &mut bot)
            .unwrap();
        let state_json = serde_json::to_string_pretty(&machine.state).unwrap();
        (result, state_json)
    };

    let (result_a, state_a) = run(42);
    let (result_b, state_b) = run(42);
    assert_eq!(result_a, result_b);
    assert_eq_diff!(state_a, state_b);

    let (_, state_other) = run(43);
    assert_ne!(state_a, state_other);
}

#[test]
fn test_face_down_endgame_is_reachable() {
    // Across a batch of seeds, at least one finished game must have
    // passed through blind face-down play: the winner's face-down
    // cards can only leave through the blind-precedence path.
    let mut saw_finished = false;
    for seed in 0..20 {
        let mut machine = GameMachine::new(GameState::new_with_seed(seed));
        let mut human = GreedyController::new(Seat::Human);
        let mut bot = GreedyController::new(Seat::Bot);
        let result = GameLoop::new(&mut machine)
            .with_max_requests(2000)
            .run_game(&mut human, &mut bot)
            .unwrap();
        if let Some(winner) = result.winner {
            saw_finished = true;
            assert!(machine.state.zones(winner).face_down.is_empty());
        }
    }
    assert!(saw_finished, "no seed in 0..20 finished a game");
}
