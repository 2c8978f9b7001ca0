#![doc = r#"
Headless, cycle-paced NMOS 6502 emulator core.

This crate exposes the building blocks a retro-computing host (TUI,
REPL, or automated test harness) wires together and drives:

Modules:
- bus: 16-bit address router mapping non-overlapping ranges to devices
- clock: pacing clock converting the cycle budget into wall-clock sleeps
- cpu: registers, addressing modes, decode table, stepping, interrupts
- debug: breakpoint sets and instruction traces (observational only)
- error: status taxonomy shared by every fallible operation
- interrupt: thread-safe IRQ/NMI latch posted from host threads
- memory: device capability trait plus plain and monitored RAM
- pause: cooperative pause gate for the stepping loop
- queue: bounded thread-safe byte FIFOs for host<->CPU serial traffic

The host owns every entity: construct a `Cpu`, connect devices to its
bus, clone the queue/latch/pause handles onto whichever threads need
them, then call `step` from exactly one thread.

In tests, shared program builders are available under `crate::test_utils`.
"#]

pub mod bus;
pub mod clock;
pub mod cpu;
pub mod debug;
pub mod error;
pub mod interrupt;
pub mod memory;
pub mod pause;
pub mod queue;

// Re-export commonly used types at the crate root for convenience.
pub use bus::Bus;
pub use clock::{ClockRate, PacingClock};
pub use cpu::{Cpu, InterruptKind, OpcodeInfo, StepOutcome, opcode_info};
pub use debug::{BreakpointSet, Trace};
pub use error::CpuError;
pub use interrupt::InterruptLatch;
pub use memory::{MemoryDevice, MonitoredRam, Ram};
pub use pause::PauseGate;
pub use queue::ByteQueue;

// Shared test utilities (only compiled for tests)
#[cfg(test)]
pub mod test_utils;
