//! Centralized logger for game events
//!
//! Log entries can be printed to stdout, captured in memory for tests,
//! or both. Uses interior mutability so the machine can log while the
//! state is borrowed elsewhere.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;

/// Verbosity level for game output
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum VerbosityLevel {
    /// Silent - no output during game
    Silent = 0,
    /// Minimal - only game outcome
    Minimal = 1,
    /// Normal - moves, burns, and turn changes (default)
    #[default]
    Normal = 2,
    /// Verbose - all events including rejected moves and timers
    Verbose = 3,
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    /// Output only to stdout (default)
    #[default]
    Stdout,
    /// Capture only to in-memory buffer (no stdout)
    Memory,
    /// Both stdout and in-memory buffer
    Both,
}

/// A captured log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    pub message: String,
    /// Event category, e.g. "move", "burn", "violation"
    pub category: Option<String>,
}

/// Centralized logger for game events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameLogger {
    verbosity: VerbosityLevel,
    output_mode: OutputMode,
    #[serde(skip)]
    log_buffer: RefCell<Vec<LogEntry>>,
}

impl GameLogger {
    pub fn new() -> Self {
        GameLogger {
            verbosity: VerbosityLevel::default(),
            output_mode: OutputMode::default(),
            log_buffer: RefCell::new(Vec::new()),
        }
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    /// Log a message at the given level with an optional category.
    pub fn log(&self, level: VerbosityLevel, message: &str, category: Option<&str>) {
        if level > self.verbosity {
            return;
        }
        if matches!(self.output_mode, OutputMode::Stdout | OutputMode::Both) {
            println!("{}", message);
        }
        if matches!(self.output_mode, OutputMode::Memory | OutputMode::Both) {
            self.log_buffer.borrow_mut().push(LogEntry {
                level,
                message: message.to_string(),
                category: category.map(|s| s.to_string()),
            });
        }
    }

    pub fn minimal(&self, message: &str) {
        self.log(VerbosityLevel::Minimal, message, None);
    }

    pub fn normal(&self, message: &str) {
        self.log(VerbosityLevel::Normal, message, None);
    }

    pub fn verbose(&self, message: &str) {
        self.log(VerbosityLevel::Verbose, message, None);
    }

    /// Snapshot of the captured entries (Memory/Both modes only)
    pub fn entries(&self) -> Vec<LogEntry> {
        self.log_buffer.borrow().clone()
    }

    pub fn clear(&self) {
        self.log_buffer.borrow_mut().clear();
    }
}

impl Default for GameLogger {
    fn default() -> Self {
        GameLogger::new()
    }
}
