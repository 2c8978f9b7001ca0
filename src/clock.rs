/*!
Pacing clock: converts a cycle budget into wall-clock sleeps.

Overview
========
`PacingClock` keeps a monotonically non-decreasing cycle counter and a
monotonic epoch. `wait_next_cycle` computes the wall-clock instant the
next cycle is due (`(cycle_count + 1) * cycle_duration` past the epoch)
and sleeps the difference; when the deadline has already passed it merely
yields. The stepper calls it once per instruction and then folds the
opcode's base cost plus any page-cross / branch-taken / interrupt-entry
penalties into the counter with `add_cycles`, so the pacing schedule
stretches in proportion to the work the emulated CPU actually did.

Sharing
=======
The clock sits behind `Arc` so a controller thread can retune the rate
while the stepper runs. All state lives under one mutex; the sleep itself
happens outside the lock so `set_frequency` is never blocked behind a
pacing wait. A frequency change resets the counter and epoch and takes
effect on the next `wait_next_cycle`.

Granularity
===========
Millisecond-scale sleep precision is acceptable here: the clock paces at
instruction granularity, and hosts that need tighter timing run at a
higher frequency and batch instructions per wakeup.
*/

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::error::CpuError;

/// Default emulated rate: 1 MHz, the classic 6502 machine clock.
pub const DEFAULT_HZ: f64 = 1_000_000.0;

/// Canonical machine rates a host can offer without hard-coding numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockRate {
    /// Apple I: 1 MHz.
    AppleI,
    /// Atari 2600: 1.19 MHz.
    Atari2600,
    /// Commodore 64 (PAL): 0.985 MHz.
    Commodore64,
}

impl ClockRate {
    /// The rate in Hz.
    pub fn hz(self) -> f64 {
        match self {
            ClockRate::AppleI => 1_000_000.0,
            ClockRate::Atari2600 => 1_190_000.0,
            ClockRate::Commodore64 => 985_000.0,
        }
    }
}

struct ClockState {
    hz: f64,
    cycle_duration: f64, // seconds per cycle
    cycle_count: u64,
    epoch: Instant,
}

/// Cycle counter coupled to real time. See the module docs for the
/// pacing contract.
pub struct PacingClock {
    state: Mutex<ClockState>,
}

impl PacingClock {
    /// Create a clock running at `hz`. Fails the same way
    /// `set_frequency` does on a non-positive or non-finite rate.
    pub fn new(hz: f64) -> Result<Self, CpuError> {
        if !hz.is_finite() || hz <= 0.0 {
            return Err(CpuError::InvalidArgument);
        }
        Ok(Self {
            state: Mutex::new(ClockState {
                hz,
                cycle_duration: 1.0 / hz,
                cycle_count: 0,
                epoch: Instant::now(),
            }),
        })
    }

    fn lock(&self) -> MutexGuard<'_, ClockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Block until the next cycle is due, then count it.
    ///
    /// The deadline is derived from the cycle counter, so cycles added
    /// via `add_cycles` push every later deadline further out. When the
    /// deadline has already passed the thread yields instead of sleeping
    /// so a saturated emulation still makes progress.
    pub fn wait_next_cycle(&self) {
        let (target, epoch) = {
            let state = self.lock();
            (
                (state.cycle_count + 1) as f64 * state.cycle_duration,
                state.epoch,
            )
        };
        let elapsed = epoch.elapsed().as_secs_f64();
        if elapsed < target {
            std::thread::sleep(Duration::from_secs_f64(target - elapsed));
        } else {
            std::thread::yield_now();
        }
        self.lock().cycle_count += 1;
    }

    /// Fold extra cycles into the schedule (base instruction cost,
    /// page-cross and branch penalties, interrupt entry).
    pub fn add_cycles(&self, cycles: u64) {
        let mut state = self.lock();
        state.cycle_count = state.cycle_count.saturating_add(cycles);
    }

    /// Retune the rate and restart the schedule. Takes effect on the
    /// next `wait_next_cycle`.
    pub fn set_frequency(&self, hz: f64) -> Result<(), CpuError> {
        if !hz.is_finite() || hz <= 0.0 {
            return Err(CpuError::InvalidArgument);
        }
        let mut state = self.lock();
        state.hz = hz;
        state.cycle_duration = 1.0 / hz;
        state.cycle_count = 0;
        state.epoch = Instant::now();
        Ok(())
    }

    /// Retune to a canonical machine rate.
    pub fn set_rate(&self, rate: ClockRate) {
        // Preset rates are all positive, so this cannot fail.
        let _ = self.set_frequency(rate.hz());
    }

    /// Zero the counter and restart the epoch at the current rate.
    pub fn reset(&self) {
        let mut state = self.lock();
        state.cycle_count = 0;
        state.epoch = Instant::now();
    }

    /// Total cycles accounted for since the last reset.
    pub fn cycle_count(&self) -> u64 {
        self.lock().cycle_count
    }

    /// Configured rate in Hz.
    pub fn frequency(&self) -> f64 {
        self.lock().hz
    }

    /// Wall time since the epoch (reset or frequency change).
    pub fn elapsed(&self) -> Duration {
        self.lock().epoch.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_frequencies() {
        assert!(PacingClock::new(0.0).is_err());
        assert!(PacingClock::new(-1.0).is_err());
        assert!(PacingClock::new(f64::NAN).is_err());
        let clock = PacingClock::new(DEFAULT_HZ).unwrap();
        assert!(clock.set_frequency(f64::INFINITY).is_err());
        // Rate unchanged after a rejected update.
        assert_eq!(clock.frequency(), DEFAULT_HZ);
    }

    #[test]
    fn wait_counts_cycles() {
        // High rate so the test does not actually sleep a measurable time.
        let clock = PacingClock::new(1_000_000_000.0).unwrap();
        for _ in 0..10 {
            clock.wait_next_cycle();
        }
        assert_eq!(clock.cycle_count(), 10);
    }

    #[test]
    fn add_cycles_is_monotonic() {
        let clock = PacingClock::new(DEFAULT_HZ).unwrap();
        clock.add_cycles(4);
        clock.add_cycles(0);
        clock.add_cycles(7);
        assert_eq!(clock.cycle_count(), 11);
    }

    #[test]
    fn wait_honors_the_schedule() {
        // 1 kHz => each cycle is 1 ms. Three waits must take at least ~3 ms.
        let clock = PacingClock::new(1_000.0).unwrap();
        let start = Instant::now();
        for _ in 0..3 {
            clock.wait_next_cycle();
        }
        // Lower bound only; schedulers can oversleep freely.
        assert!(start.elapsed() >= Duration::from_millis(2));
    }

    #[test]
    fn set_frequency_resets_schedule() {
        let clock = PacingClock::new(DEFAULT_HZ).unwrap();
        clock.add_cycles(100);
        clock.set_frequency(2_000_000.0).unwrap();
        assert_eq!(clock.cycle_count(), 0);
        assert_eq!(clock.frequency(), 2_000_000.0);
    }

    #[test]
    fn presets_expose_expected_rates() {
        assert_eq!(ClockRate::AppleI.hz(), 1_000_000.0);
        assert_eq!(ClockRate::Atari2600.hz(), 1_190_000.0);
        assert_eq!(ClockRate::Commodore64.hz(), 985_000.0);
        let clock = PacingClock::new(DEFAULT_HZ).unwrap();
        clock.set_rate(ClockRate::Atari2600);
        assert_eq!(clock.frequency(), 1_190_000.0);
    }
}
