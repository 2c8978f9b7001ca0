/*!
Error taxonomy shared across the emulator core.

All configuration-time failures (bad sizes, bad frequencies, overlapping
bus ranges) surface as `InvalidArgument`; allocation failures for
host-owned buffers surface as `MemoryOverflow`. `InvalidOpcode` is the
only error `Cpu::step` produces at run time, and it carries enough context
for a host to render the conventional
`Invalid opcode 0x?? at PC: $xxxx` diagnostic.

The loader errors distinguish a missing file from a short/failed read so
a front-end can prompt differently for each.
*/

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the emulator core. The core never panics on bad
/// input and never terminates the process; every fallible operation
/// reports one of these and leaves the caller in charge.
#[derive(Debug, Error)]
pub enum CpuError {
    /// A construction parameter was out of range (zero-sized RAM,
    /// non-power-of-two monitored RAM, non-positive clock frequency,
    /// overlapping bus binding, program image past the end of memory).
    #[error("invalid argument")]
    InvalidArgument,

    /// A host-owned buffer could not be allocated.
    #[error("memory allocation failed")]
    MemoryOverflow,

    /// The fetched opcode has no entry in the decode table. `pc` is the
    /// address of the offending byte; the program counter itself has
    /// already advanced past it.
    #[error("Invalid opcode 0x{opcode:02X} at PC: ${pc:04X}")]
    InvalidOpcode { opcode: u8, pc: u16 },

    /// The program file does not exist.
    #[error("program file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The program file exists but could not be read (or was empty).
    #[error("failed to read program file: {}", path.display())]
    ReadFailed { path: PathBuf },
}
