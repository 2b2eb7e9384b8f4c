//! Game state, state machine, and turn loop

pub mod controller;
pub mod game_loop;
pub mod greedy_controller;
pub mod logger;
pub mod machine;
pub mod scripted_controller;
pub mod state;

pub use controller::{GameStateView, PlayerController};
pub use game_loop::{run_seeded_game, GameEndReason, GameLoop, GameResult};
pub use greedy_controller::GreedyController;
pub use logger::{GameLogger, LogEntry, OutputMode, VerbosityLevel};
pub use machine::{Event, GameMachine, LoopState, Phase};
pub use scripted_controller::ScriptedController;
pub use state::{GameState, ShownHand, FACE_DOWN_SIZE, FACE_UP_SIZE, HAND_SIZE};
