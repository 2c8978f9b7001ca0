/*!
6502 CPU core: register state, port-aware memory access, and the public
stepping API.

Layout:

```text
state.rs      - Architectural registers + status flag helpers.
addressing.rs - Addressing-mode / operand resolution.
execute.rs    - Instruction semantics (ALU, stack, RMW, BCD).
table.rs      - Static 256-entry decode table.
dispatch/     - Step orchestration + per-family opcode handlers.
```

The `Cpu` owns its bus and pacing clock and holds shared handles to the
two serial byte queues, the interrupt latch, and the pause gate. Host
threads interact through clones of those handles (plus the convenience
`inject_irq`/`inject_nmi`/`pause`/`resume` wrappers); exactly one thread
drives `step`.

Port interception: reads of `$D011` dequeue from the input queue
(`$00` when empty) and writes to `$D012` enqueue to the output queue,
both without touching the bus. Every other access routes through the bus
to whatever devices the host connected.
*/

use std::path::Path;
use std::sync::Arc;

use crate::bus::Bus;
use crate::clock::{ClockRate, DEFAULT_HZ, PacingClock};
use crate::debug::{BreakpointSet, Trace};
use crate::error::CpuError;
use crate::interrupt::InterruptLatch;
use crate::pause::PauseGate;
use crate::queue::ByteQueue;

pub(crate) mod addressing;
pub(crate) mod dispatch;
pub(crate) mod execute;
pub mod state;
pub(crate) mod table;


use state::CpuState;

/// NMI vector location (little-endian).
pub const NMI_VECTOR: u16 = 0xFFFA;
/// RESET vector location (little-endian).
pub const RESET_VECTOR: u16 = 0xFFFC;
/// IRQ/BRK vector location (little-endian).
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Input port: reads dequeue one host keystroke (`$00` when empty).
pub const INPUT_PORT: u16 = 0xD011;
/// Output port: writes enqueue one byte of serial output.
pub const OUTPUT_PORT: u16 = 0xD012;

/// Which interrupt a step serviced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptKind {
    Nmi,
    Irq,
}

/// Decode-table metadata for one opcode byte, for host-side disassembly
/// display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeInfo {
    /// Display mnemonic (e.g. `"LDA"`).
    pub mnemonic: &'static str,
    /// Encoded instruction length in bytes.
    pub bytes: u8,
    /// Base cycle cost before penalties.
    pub base_cycles: u8,
}

/// Look up the decode-table metadata for `opcode`. Returns `None` for
/// bytes with no documented decoding.
pub fn opcode_info(opcode: u8) -> Option<OpcodeInfo> {
    let entry = &table::OPCODE_TABLE[opcode as usize];
    if matches!(entry.kind, table::ExecKind::Illegal) {
        return None;
    }
    Some(OpcodeInfo {
        mnemonic: entry.mnemonic,
        bytes: entry.bytes,
        base_cycles: entry.base_cycles,
    })
}

/// What a successful `Cpu::step` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// An instruction executed. `breakpoint_hit` reports whether its
    /// address was in the supplied breakpoint set (observational only).
    Instruction { breakpoint_hit: bool },
    /// An interrupt entry ran instead of an instruction.
    Interrupt(InterruptKind),
}

/// The 6502 CPU core.
pub struct Cpu {
    pub(crate) state: CpuState,
    bus: Bus,
    clock: Arc<PacingClock>,
    input_queue: Arc<ByteQueue>,
    output_queue: Arc<ByteQueue>,
    interrupts: Arc<InterruptLatch>,
    pause: Arc<PauseGate>,
    debug_mode: bool,
    last_trace: Option<Trace>,
}

impl Cpu {
    /// Create a CPU with power-up register state, an empty bus, fresh
    /// queues and latch, and a 1 MHz pacing clock.
    pub fn new() -> Result<Self, CpuError> {
        Ok(Self {
            state: CpuState::new(),
            bus: Bus::new(),
            clock: Arc::new(PacingClock::new(DEFAULT_HZ)?),
            input_queue: Arc::new(ByteQueue::new()),
            output_queue: Arc::new(ByteQueue::new()),
            interrupts: Arc::new(InterruptLatch::new()),
            pause: Arc::new(PauseGate::new()),
            debug_mode: false,
            last_trace: None,
        })
    }

    // ---------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------

    /// Hardware reset: registers to power-up values, PC from the reset
    /// vector, pacing restarted, pending interrupts and pause cleared.
    pub fn reset(&mut self) {
        self.state = CpuState::new();
        self.state.pc = self.read_word(RESET_VECTOR);
        self.clock.reset();
        self.interrupts.clear();
        self.pause.resume();
        log::debug!("reset: PC <- ${:04X}", self.state.pc);
    }

    /// Load a flat binary file at `load_addr` and point the reset
    /// vector at it (byte `i` of the file lands at `load_addr + i`).
    pub fn load_program(&mut self, path: impl AsRef<Path>, load_addr: u16) -> Result<(), CpuError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            log::warn!("failed to open program {}: {e}", path.display());
            if e.kind() == std::io::ErrorKind::NotFound {
                CpuError::FileNotFound {
                    path: path.to_owned(),
                }
            } else {
                CpuError::ReadFailed {
                    path: path.to_owned(),
                }
            }
        })?;
        if bytes.is_empty() {
            return Err(CpuError::ReadFailed {
                path: path.to_owned(),
            });
        }
        self.load_bytes(&bytes, load_addr)
    }

    /// Load an in-memory program image at `load_addr` by issuing bus
    /// writes, then rewrite the reset vector to `load_addr`. The image
    /// must be nonempty and fit below `$10000`.
    pub fn load_bytes(&mut self, bytes: &[u8], load_addr: u16) -> Result<(), CpuError> {
        if bytes.is_empty() || load_addr as usize + bytes.len() > 0x1_0000 {
            return Err(CpuError::InvalidArgument);
        }
        for (i, &byte) in bytes.iter().enumerate() {
            self.write(load_addr + i as u16, byte);
        }
        self.write(RESET_VECTOR, (load_addr & 0xFF) as u8);
        self.write(RESET_VECTOR.wrapping_add(1), (load_addr >> 8) as u8);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Memory access (port-aware)
    // ---------------------------------------------------------------------

    /// Read one byte. `$D011` taps the input queue; everything else
    /// routes through the bus.
    pub fn read(&mut self, addr: u16) -> u8 {
        if addr == INPUT_PORT {
            return self.input_queue.dequeue().unwrap_or(0x00);
        }
        self.bus.read(addr)
    }

    /// Write one byte. `$D012` feeds the output queue; everything else
    /// routes through the bus.
    pub fn write(&mut self, addr: u16, data: u8) {
        if addr == OUTPUT_PORT {
            if !self.output_queue.enqueue(data) {
                log::warn!("output queue full; dropping byte 0x{data:02X}");
            }
            return;
        }
        self.bus.write(addr, data);
    }

    /// Read a little-endian word through the port-aware `read`.
    pub fn read_word(&mut self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    // ---------------------------------------------------------------------
    // Stepping
    // ---------------------------------------------------------------------

    /// Execute one instruction or interrupt entry. Blocks while paused
    /// and honors the pacing clock. See `StepOutcome` for what ran;
    /// `InvalidOpcode` leaves PC one past the undecodable byte.
    pub fn step(&mut self, breakpoints: Option<&BreakpointSet>) -> Result<StepOutcome, CpuError> {
        dispatch::step(self, breakpoints)
    }

    /// Step up to `max_instructions` times, stopping early on the first
    /// error.
    pub fn run(&mut self, max_instructions: usize) -> Result<(), CpuError> {
        for _ in 0..max_instructions {
            self.step(None)?;
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Host-thread interactions
    // ---------------------------------------------------------------------

    /// Post a maskable interrupt; observed by the next step.
    pub fn inject_irq(&self) {
        self.interrupts.post_irq();
    }

    /// Post a non-maskable interrupt; observed by the next step.
    pub fn inject_nmi(&self) {
        self.interrupts.post_nmi();
    }

    /// Hold the stepper before its next instruction.
    pub fn pause(&self) {
        self.pause.pause();
    }

    /// Release a paused stepper.
    pub fn resume(&self) {
        self.pause.resume();
    }

    /// Retune the pacing clock (takes effect on the next cycle wait).
    pub fn set_clock_frequency(&self, hz: f64) -> Result<(), CpuError> {
        self.clock.set_frequency(hz)
    }

    /// Retune the pacing clock to a canonical machine rate.
    pub fn set_clock_rate(&self, rate: ClockRate) {
        self.clock.set_rate(rate);
    }

    /// Toggle instruction tracing (purely observational).
    pub fn set_debug_mode(&mut self, enabled: bool) {
        self.debug_mode = enabled;
        if !enabled {
            self.last_trace = None;
        }
    }

    // ---------------------------------------------------------------------
    // Wiring / inspection
    // ---------------------------------------------------------------------

    /// The CPU-side bus, for connecting devices.
    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }

    /// Shared handle to the host->CPU input queue.
    pub fn input_queue(&self) -> Arc<ByteQueue> {
        Arc::clone(&self.input_queue)
    }

    /// Shared handle to the CPU->host output queue.
    pub fn output_queue(&self) -> Arc<ByteQueue> {
        Arc::clone(&self.output_queue)
    }

    /// Shared handle to the interrupt latch.
    pub fn interrupt_handle(&self) -> Arc<InterruptLatch> {
        Arc::clone(&self.interrupts)
    }

    /// Shared handle to the pause gate.
    pub fn pause_handle(&self) -> Arc<PauseGate> {
        Arc::clone(&self.pause)
    }

    /// Shared handle to the pacing clock.
    pub fn clock_handle(&self) -> Arc<PacingClock> {
        Arc::clone(&self.clock)
    }

    /// Copyable register snapshot (implements `Display` as a one-line
    /// status summary).
    pub fn registers(&self) -> CpuState {
        self.state
    }

    /// Accumulator.
    pub fn a(&self) -> u8 {
        self.state.a
    }

    /// X index register.
    pub fn x(&self) -> u8 {
        self.state.x
    }

    /// Y index register.
    pub fn y(&self) -> u8 {
        self.state.y
    }

    /// Stack pointer.
    pub fn sp(&self) -> u8 {
        self.state.sp
    }

    /// Program counter.
    pub fn pc(&self) -> u16 {
        self.state.pc
    }

    /// Move the program counter (host debugger feature; takes effect on
    /// the next step).
    pub fn set_pc(&mut self, addr: u16) {
        self.state.pc = addr;
    }

    /// Status register.
    pub fn status(&self) -> u8 {
        self.state.status
    }

    /// Cycles accounted for since the last reset.
    pub fn cycle_count(&self) -> u64 {
        self.clock.cycle_count()
    }

    /// The most recent instruction trace (debug mode only).
    pub fn last_trace(&self) -> Option<Trace> {
        self.last_trace
    }

    // ---------------------------------------------------------------------
    // Crate-internal plumbing for the dispatcher
    // ---------------------------------------------------------------------

    pub(crate) fn clock(&self) -> &PacingClock {
        &self.clock
    }

    pub(crate) fn pause_gate(&self) -> &PauseGate {
        &self.pause
    }

    pub(crate) fn interrupt_latch(&self) -> &InterruptLatch {
        &self.interrupts
    }

    pub(crate) fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    pub(crate) fn record_trace(&mut self, pc: u16, opcode: u8, mnemonic: &'static str) {
        self.last_trace = Some(Trace {
            pc,
            opcode,
            mnemonic,
        });
    }
}
