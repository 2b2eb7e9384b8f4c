//! Event-driven game state machine
//!
//! Drives the whole game: face-up selection, the turn loop, and the
//! post-move timer chain (burn, draw-up, turn switch). The machine owns
//! the [`GameState`] and is the only code that mutates it; agents and
//! the UI feed it [`Event`]s and read the context back.
//!
//! Two logically concurrent regions share the context during play: the
//! turn loop (`WaitForMove` / `BeforeNewMove`) and the display-preference
//! switcher, which only tracks which zone each seat's UI shows and never
//! touches rule state.
//!
//! Time is a virtual millisecond clock. Entering a state schedules
//! timers stamped with the current epoch; leaving a state bumps the
//! epoch, so a timer from a superseded state can never fire a stale
//! mutation against the newer context.

use crate::cards::{can_play, Card, Rank};
use crate::game::state::{GameState, ShownHand, FACE_UP_SIZE};
use crate::zones::{Seat, Zone};
use serde::{Deserialize, Serialize};

/// Settle delay before the face-up quota check transitions to play
pub const SETTLE_DELAY_MS: u64 = 500;
/// Post-move delay before the burn check
pub const BURN_DELAY_MS: u64 = 600;
/// Post-move delay before drawing up from the deck
pub const DRAW_DELAY_MS: u64 = 625;
/// Post-move delay before the turn switches
pub const SWITCH_DELAY_MS: u64 = 1000;

/// Top-level machine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the human to pick 3 face-up cards
    ChoosingFaceUpCards,
    /// Main turn loop
    Playing,
    /// A seat emptied all three zones
    GameOver,
}

/// Sub-state of the turn loop while `Playing`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopState {
    /// A move request is outstanding for the current seat
    WaitForMove,
    /// A card just landed; the timer chain is running
    BeforeNewMove,
}

/// External inputs to the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// An agent answered a move request. `None` is the "no legal move"
    /// sentinel, valid only from the automated seat.
    CardChosen { seat: Seat, card: Option<Card> },
    /// The human takes the whole pile (only legal with no playable card)
    TakePile,
    /// Switcher region: set which zone a seat's UI displays
    SetShownHand { seat: Seat, shown: ShownHand },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerAction {
    SettleCheck,
    BurnCheck,
    DrawUp,
    SwitchTurns,
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    deadline_ms: u64,
    epoch: u64,
    action: TimerAction,
}

/// The Zhithead game state machine
pub struct GameMachine {
    /// Game context, mutated exclusively by transition handlers
    pub state: GameState,
    phase: Phase,
    loop_state: LoopState,
    now_ms: u64,
    epoch: u64,
    timers: Vec<Timer>,
    /// Seat with an outstanding move request, if any. At most one
    /// request is in flight at a time.
    pending_request: Option<Seat>,
}

impl GameMachine {
    /// Create a machine over a dealt state, starting at face-up selection.
    pub fn new(state: GameState) -> Self {
        let mut machine = GameMachine {
            state,
            phase: Phase::ChoosingFaceUpCards,
            loop_state: LoopState::WaitForMove,
            now_ms: 0,
            epoch: 0,
            timers: Vec::new(),
            pending_request: None,
        };
        machine.enter_choosing();
        machine
    }

    /// Create a machine that skips setup and starts in the turn loop.
    /// Used for scenario tests and states prepared by hand.
    pub fn new_playing(state: GameState) -> Self {
        let mut machine = GameMachine {
            state,
            phase: Phase::Playing,
            loop_state: LoopState::WaitForMove,
            now_ms: 0,
            epoch: 0,
            timers: Vec::new(),
            pending_request: None,
        };
        machine.enter_wait_for_move();
        machine
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn loop_state(&self) -> LoopState {
        self.loop_state
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn winner(&self) -> Option<Seat> {
        self.state.winner
    }

    /// Seat the machine is currently waiting on, if any
    pub fn pending_request(&self) -> Option<Seat> {
        self.pending_request
    }

    /// Earliest live timer deadline, if any
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers
            .iter()
            .filter(|t| t.epoch == self.epoch)
            .map(|t| t.deadline_ms)
            .min()
    }

    /// Does `seat` have a legal play from its governing zone right now?
    pub fn has_legal_play(&self, seat: Seat) -> bool {
        self.state.zones(seat).has_legal_play(&self.state.pile.cards)
    }

    /// Advance the virtual clock, firing due timers in deadline order.
    /// Timers stamped with a superseded epoch are discarded unfired.
    pub fn advance_to(&mut self, now_ms: u64) {
        loop {
            self.timers.retain(|t| t.epoch == self.epoch);
            let due = self
                .timers
                .iter()
                .enumerate()
                .filter(|(_, t)| t.deadline_ms <= now_ms)
                .min_by_key(|(idx, t)| (t.deadline_ms, *idx))
                .map(|(idx, _)| idx);
            let Some(idx) = due else { break };
            let timer = self.timers.remove(idx);
            self.now_ms = self.now_ms.max(timer.deadline_ms);
            self.fire(timer.action);
        }
        self.now_ms = self.now_ms.max(now_ms);
    }

    /// Process one external event to completion.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::CardChosen { seat, card } => self.on_card_chosen(seat, card),
            Event::TakePile => self.on_take_pile(),
            Event::SetShownHand { seat, shown } => self.on_set_shown_hand(seat, shown),
        }
    }

    // ------------------------------------------------------------------
    // State entries
    // ------------------------------------------------------------------

    fn enter_choosing(&mut self) {
        self.phase = Phase::ChoosingFaceUpCards;
        self.bump_epoch();
        self.schedule(SETTLE_DELAY_MS, TimerAction::SettleCheck);
        if !self.face_up_quota_met() {
            self.pending_request = Some(Seat::Human);
            self.state
                .logger
                .verbose("asking human to pick a face-up card");
        }
    }

    fn enter_playing(&mut self) {
        self.phase = Phase::Playing;
        self.state.logger.normal("all face-up cards chosen, play begins");
        self.enter_wait_for_move();
    }

    fn enter_wait_for_move(&mut self) {
        self.bump_epoch();
        self.loop_state = LoopState::WaitForMove;
        if self.state.winner.is_some() {
            self.enter_game_over();
            return;
        }
        let seat = self.state.current_turn;
        self.pending_request = Some(seat);
        self.state
            .logger
            .verbose(&format!("asking {:?} for a move", seat));
    }

    fn enter_before_new_move(&mut self) {
        self.bump_epoch();
        self.loop_state = LoopState::BeforeNewMove;
        self.pending_request = None;
        // Three independent scheduled actions, not branches of one
        // timer: burn never cancels the draw or the turn switch.
        self.schedule(BURN_DELAY_MS, TimerAction::BurnCheck);
        self.schedule(DRAW_DELAY_MS, TimerAction::DrawUp);
        self.schedule(SWITCH_DELAY_MS, TimerAction::SwitchTurns);
    }

    fn enter_game_over(&mut self) {
        self.phase = Phase::GameOver;
        self.bump_epoch();
        self.pending_request = None;
        if let Some(winner) = self.state.winner {
            self.state
                .logger
                .minimal(&format!("{:?} wins the game", winner));
        }
    }

    // ------------------------------------------------------------------
    // Event handlers
    // ------------------------------------------------------------------

    fn on_card_chosen(&mut self, seat: Seat, card: Option<Card>) {
        if self.pending_request != Some(seat) {
            // Unsolicited or superseded response (e.g. after a take-pile
            // switched the turn away).
            self.state.logger.log(
                crate::game::VerbosityLevel::Verbose,
                &format!("ignoring unsolicited response from {:?}", seat),
                Some("violation"),
            );
            return;
        }
        self.pending_request = None;
        match self.phase {
            Phase::ChoosingFaceUpCards => self.on_face_up_chosen(card),
            Phase::Playing => self.on_move_chosen(seat, card),
            Phase::GameOver => {}
        }
    }

    fn on_face_up_chosen(&mut self, card: Option<Card>) {
        if self.face_up_quota_met() {
            // Quota already met: reject, stay put.
            self.log_violation("face-up choice after quota met");
            return;
        }
        let Some(card) = card else {
            // The human agent must always return a concrete card.
            self.log_violation("human agent returned no card during face-up selection");
            self.enter_choosing();
            return;
        };
        if !self.state.human.hand.contains(card) {
            self.log_violation(&format!("face-up choice {} is not in hand", card));
            self.enter_choosing();
            return;
        }
        let removed = self.state.human.hand.remove(card);
        debug_assert!(removed, "presence checked above");
        self.state.human.face_up.add(card);
        self.state
            .logger
            .normal(&format!("human sets {} face-up", card));
        self.enter_choosing();
    }

    fn on_move_chosen(&mut self, seat: Seat, card: Option<Card>) {
        if self.loop_state != LoopState::WaitForMove {
            return;
        }
        let Some(card) = card else {
            if seat == Seat::Human {
                // Humans signal a stuck turn via TakePile, never the
                // sentinel.
                self.log_violation("human agent returned the no-move sentinel");
                self.pending_request = Some(seat);
                return;
            }
            self.state
                .logger
                .normal(&format!("{:?} cannot play and takes the pile", seat));
            self.state.take_pile_into_hand(seat);
            self.state.switch_turns();
            self.enter_wait_for_move();
            return;
        };

        let playable_zone = self.state.zones(seat).playable_zone();
        if !self.state.zones(seat).zone(playable_zone).contains(card) {
            self.log_violation(&format!(
                "{:?} chose {} which is not in its playable zone",
                seat, card
            ));
            self.pending_request = Some(seat);
            return;
        }
        if !can_play(card, &self.state.pile.cards) {
            if playable_zone == Zone::FaceDown {
                // A blind flip cannot be retracted: the revealed card
                // and the whole pile go to the player's hand.
                let removed = self.state.zones_mut(seat).face_down.remove(card);
                debug_assert!(removed, "presence checked above");
                self.state.logger.normal(&format!(
                    "{:?} flips {} and must take the pile",
                    seat, card
                ));
                self.state.take_pile_into_hand(seat);
                self.state.zones_mut(seat).hand.add(card);
                self.state.switch_turns();
                self.enter_wait_for_move();
                return;
            }
            // Not an error: silently re-ask.
            self.state
                .logger
                .verbose(&format!("illegal move {} rejected, re-asking {:?}", card, seat));
            self.pending_request = Some(seat);
            return;
        }

        let removed = self.state.zones_mut(seat).zone_mut(playable_zone).remove(card);
        debug_assert!(removed, "presence checked above");
        self.state.pile.add(card);
        self.state
            .logger
            .normal(&format!("{:?} plays {} from {:?}", seat, card, playable_zone));

        if self.state.zones(seat).all_empty() {
            self.state.winner = Some(seat);
        }
        self.enter_before_new_move();
    }

    fn on_take_pile(&mut self) {
        let accepted = self.phase == Phase::Playing
            && self.loop_state == LoopState::WaitForMove
            && self.state.current_turn == Seat::Human
            && !self.has_legal_play(Seat::Human);
        if !accepted {
            self.state.logger.verbose("take-pile rejected");
            return;
        }
        self.state.logger.normal("human takes the pile");
        self.state.take_pile_into_hand(Seat::Human);
        self.state.switch_turns();
        self.enter_wait_for_move();
    }

    fn on_set_shown_hand(&mut self, seat: Seat, shown: ShownHand) {
        // Switcher region: active only during play, fully decoupled
        // from the turn loop.
        if self.phase != Phase::Playing {
            return;
        }
        self.state.set_shown_hand(seat, shown);
    }

    // ------------------------------------------------------------------
    // Timer actions
    // ------------------------------------------------------------------

    fn fire(&mut self, action: TimerAction) {
        match action {
            TimerAction::SettleCheck => {
                if self.phase == Phase::ChoosingFaceUpCards && self.face_up_quota_met() {
                    self.enter_playing();
                }
            }
            TimerAction::BurnCheck => {
                // The burn check reads the raw top card, not the
                // 8-skipping effective top.
                if self.state.pile.peek_top().map(|c| c.rank) == Some(Rank::Ten) {
                    self.state.logger.normal("pile burns");
                    self.state.burn_pile();
                }
            }
            TimerAction::DrawUp => {
                let seat = self.state.current_turn;
                self.state.draw_into_hand(seat);
            }
            TimerAction::SwitchTurns => {
                self.state.switch_turns();
                self.state
                    .logger
                    .verbose(&format!("turn passes to {:?}", self.state.current_turn));
                self.enter_wait_for_move();
            }
        }
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn face_up_quota_met(&self) -> bool {
        self.state.human.face_up.len() == FACE_UP_SIZE
    }

    fn schedule(&mut self, delay_ms: u64, action: TimerAction) {
        self.timers.push(Timer {
            deadline_ms: self.now_ms + delay_ms,
            epoch: self.epoch,
            action,
        });
    }

    fn bump_epoch(&mut self) {
        self.epoch += 1;
    }

    fn log_violation(&self, message: &str) {
        self.state.logger.log(
            crate::game::VerbosityLevel::Normal,
            message,
            Some("violation"),
        );
    }
}
