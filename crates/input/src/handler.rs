//! DAS/ARR input handler for terminal environments.
//!
//! Left, right and down auto-repeat while held: one action on press, nothing
//! until the DAS delay has passed, then one action per ARR interval. Terminals
//! that never report key releases are handled with a timeout: a movement key
//! not seen again within `key_release_timeout_ms` counts as released.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;

use crate::map::action_for_code;
use crate::types::{GameAction, DEFAULT_ARR_MS, DEFAULT_DAS_MS, SOFT_DROP_ARR_MS};

// Longer than a typical key-repeat gap, shorter than a deliberate second tap.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Most repeats a single update can emit
pub const MAX_REPEATS_PER_UPDATE: usize = 32;

/// Repeat timing for one held key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Repeater {
    action: Option<GameAction>,
    das_ms: u32,
    arr_ms: u32,
    das_timer: u32,
    arr_accumulator: u32,
}

impl Repeater {
    fn new(das_ms: u32, arr_ms: u32) -> Self {
        Self {
            action: None,
            das_ms,
            // A zero rate would never drain the accumulator.
            arr_ms: arr_ms.max(1),
            das_timer: 0,
            arr_accumulator: 0,
        }
    }

    /// Returns the action to fire immediately, if this press starts a hold
    fn press(&mut self, action: GameAction) -> Option<GameAction> {
        if self.action == Some(action) {
            return None;
        }
        self.action = Some(action);
        self.das_timer = 0;
        self.arr_accumulator = 0;
        Some(action)
    }

    fn release(&mut self) {
        self.action = None;
        self.das_timer = 0;
        self.arr_accumulator = 0;
    }

    fn is_held(&self) -> bool {
        self.action.is_some()
    }

    fn update(&mut self, elapsed_ms: u32, out: &mut ArrayVec<GameAction, MAX_REPEATS_PER_UPDATE>) {
        let Some(action) = self.action else {
            return;
        };

        let prev_das = self.das_timer;
        self.das_timer = self.das_timer.saturating_add(elapsed_ms);
        if self.das_timer < self.das_ms {
            return;
        }

        // Only time past the DAS threshold counts toward repeats.
        let excess = if prev_das < self.das_ms {
            self.das_timer - self.das_ms
        } else {
            elapsed_ms
        };
        self.arr_accumulator = self.arr_accumulator.saturating_add(excess);

        while self.arr_accumulator >= self.arr_ms {
            if out.try_push(action).is_err() {
                self.arr_accumulator = 0;
                break;
            }
            self.arr_accumulator -= self.arr_ms;
        }
    }
}

/// Tracks held movement keys and turns elapsed time into repeated actions.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: Repeater,
    down: Repeater,
    last_key_time: Instant,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    /// Horizontal DAS delay and ARR interval; soft drop repeats without delay
    pub fn with_config(das_ms: u32, arr_ms: u32) -> Self {
        Self {
            horizontal: Repeater::new(das_ms, arr_ms),
            down: Repeater::new(0, SOFT_DROP_ARR_MS),
            last_key_time: Instant::now(),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// The currently held horizontal direction, if any
    pub fn horizontal(&self) -> Option<GameAction> {
        self.horizontal.action
    }

    pub fn is_soft_dropping(&self) -> bool {
        self.down.is_held()
    }

    /// Feed a key press (or terminal auto-repeat).
    ///
    /// Returns the action for the first press of a movement key. Repeats of a
    /// key already held return `None`; [`update`](Self::update) produces them.
    /// Keys that do not repeat are ignored here.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<GameAction> {
        match action_for_code(code)? {
            action @ (GameAction::MoveLeft | GameAction::MoveRight) => {
                self.last_key_time = Instant::now();
                self.horizontal.press(action)
            }
            GameAction::SoftDrop => {
                self.last_key_time = Instant::now();
                self.down.press(GameAction::SoftDrop)
            }
            _ => None,
        }
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        match action_for_code(code) {
            Some(action @ (GameAction::MoveLeft | GameAction::MoveRight)) => {
                if self.horizontal.action == Some(action) {
                    self.horizontal.release();
                }
            }
            Some(GameAction::SoftDrop) => self.down.release(),
            _ => {}
        }
    }

    /// Advance the repeat timers by `elapsed_ms` and collect repeats
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameAction, MAX_REPEATS_PER_UPDATE> {
        let mut actions = ArrayVec::new();

        let since_last_key = self.last_key_time.elapsed();
        if since_last_key > Duration::from_millis(u64::from(self.key_release_timeout_ms)) {
            self.horizontal.release();
            self.down.release();
        }

        self.horizontal.update(elapsed_ms, &mut actions);
        self.down.update(elapsed_ms, &mut actions);
        actions
    }

    pub fn reset(&mut self) {
        self.horizontal.release();
        self.down.release();
        self.last_key_time = Instant::now();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
