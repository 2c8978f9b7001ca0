/*!
Cooperative pause gate for the stepping loop.

A controller thread calls `pause()`; the stepper blocks at the top of its
next `Cpu::step` until `resume()` is called. The gate is a plain
`Mutex<bool>` plus `Condvar` so a paused stepper consumes no CPU while it
waits. A single-threaded embedder that never pauses pays one uncontended
lock per step.
*/

use std::sync::{Condvar, Mutex, MutexGuard};

/// Pause flag and its wakeup channel.
pub struct PauseGate {
    paused: Mutex<bool>,
    resumed: Condvar,
}

impl PauseGate {
    /// Create a gate in the running (not paused) state.
    pub fn new() -> Self {
        Self {
            paused: Mutex::new(false),
            resumed: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, bool> {
        self.paused.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Ask the stepper to hold before its next instruction.
    pub fn pause(&self) {
        *self.lock() = true;
    }

    /// Release a paused stepper (and any other waiters).
    pub fn resume(&self) {
        *self.lock() = false;
        self.resumed.notify_all();
    }

    /// Block until the gate is open. Called by the stepper only.
    pub fn wait_while_paused(&self) {
        let mut paused = self.lock();
        while *paused {
            paused = self
                .resumed
                .wait(paused)
                .unwrap_or_else(|e| e.into_inner());
        }
    }

    /// True when a pause request is outstanding.
    pub fn is_paused(&self) -> bool {
        *self.lock()
    }
}

impl Default for PauseGate {
    fn default() -> Self {
        Self::new()
    }
}
